//! Configuration parsing: machine description text into a [`Machine`].
//!
//! A configuration consists of an alphabet line, a `slots pawls` header,
//! and any number of rotor descriptors. Each descriptor is a name, a
//! type tag (`R` reflector, `N` fixed, `M<notches>` moving with one
//! notch symbol per character after the `M`), and a cycle-notation
//! wiring split over one or more `(...)` tokens, possibly continuing
//! onto following lines.
//!
//! This module does no I/O; the caller hands it the full configuration
//! text and receives an assembled machine back.

use std::rc::Rc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorPool};

/// Parses `text` as a machine configuration.
///
/// # Errors
/// - [`EnigmaError::TruncatedInput`] if the text ends before the
///   alphabet, the header, or a complete rotor descriptor.
/// - [`EnigmaError::InvalidNumber`] for a non-integer header field.
/// - [`EnigmaError::BadRotorType`] for an unrecognized type tag.
/// - Alphabet, permutation, and geometry errors from the components.
pub fn parse(text: &str) -> Result<Machine, EnigmaError> {
    let mut lines = text.lines();
    let alphabet_line = lines
        .find(|l| !l.trim().is_empty())
        .ok_or(EnigmaError::TruncatedInput("alphabet"))?;
    let alphabet = Rc::new(Alphabet::new(alphabet_line.trim())?);

    let rest: Vec<&str> = lines.flat_map(str::split_whitespace).collect();
    let mut tokens = rest.into_iter().peekable();

    let num_rotors = parse_count(tokens.next(), "slot count")?;
    let num_pawls = parse_count(tokens.next(), "pawl count")?;

    let mut pool = RotorPool::new();
    while let Some(name) = tokens.next() {
        let tag = tokens
            .next()
            .ok_or(EnigmaError::TruncatedInput("rotor descriptor"))?;
        let mut cycles = String::new();
        // Groups may contain whitespace, so a single `(...)` group can
        // span several tokens; keep consuming while one is open.
        let mut depth = 0usize;
        while let Some(token) = tokens.peek() {
            if depth == 0 && !token.starts_with('(') {
                break;
            }
            depth += token.matches('(').count();
            depth = depth.saturating_sub(token.matches(')').count());
            cycles.push_str(token);
            cycles.push(' ');
            tokens.next();
        }
        if cycles.is_empty() {
            return Err(EnigmaError::TruncatedInput("rotor wiring"));
        }
        let perm = Permutation::new(&cycles, Rc::clone(&alphabet))?;
        let rotor = match tag {
            "R" => Rotor::reflector(name, perm)?,
            "N" => Rotor::fixed(name, perm),
            _ if tag.starts_with('M') => Rotor::moving(name, perm, &tag[1..])?,
            _ => return Err(EnigmaError::BadRotorType(tag.to_string())),
        };
        pool.insert(rotor)?;
    }

    Machine::new(alphabet, num_rotors, num_pawls, pool)
}

/// Parses a header count field.
fn parse_count(token: Option<&str>, what: &'static str) -> Result<usize, EnigmaError> {
    let token = token.ok_or(EnigmaError::TruncatedInput(what))?;
    token
        .parse()
        .map_err(|_| EnigmaError::InvalidNumber(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::rotor::RotorKind;

    const TINY: &str = "\
ABCD
3 2
R R (AB) (CD)
M1 MC (ABC)
M2 MB (ABD)
";

    #[test]
    fn test_parse_tiny_config() {
        let m = parse(TINY).unwrap();
        assert_eq!(m.alphabet().size(), 4);
        assert_eq!(m.num_rotors(), 3);
        assert_eq!(m.num_pawls(), 2);
        assert_eq!(m.pool().len(), 3);
        let r = m.pool().get(m.pool().lookup("R").unwrap());
        assert_eq!(*r.kind(), RotorKind::Reflector);
        let m2 = m.pool().get(m.pool().lookup("M2").unwrap());
        assert!(m2.rotates());
    }

    #[test]
    fn test_parse_wiring_spanning_lines() {
        let text = "\
ABCD
2 1
R R (AB)
  (CD)
M1 MB (ABCD)
";
        let m = parse(text).unwrap();
        let r = m.pool().get(m.pool().lookup("R").unwrap());
        assert_eq!(r.permutation().permute_char('C').unwrap(), 'D');
    }

    #[test]
    fn test_parse_moving_rotor_notches() {
        let m = parse(TINY).unwrap();
        let mut m2 = m.pool().get(m.pool().lookup("M2").unwrap()).clone();
        m2.set('B').unwrap();
        assert!(m2.at_notch());
        m2.set('C').unwrap();
        assert!(!m2.at_notch());
    }

    #[test]
    fn test_group_with_internal_whitespace() {
        let text = "\
ABCD
3 2
R R (AB CD)
M1 MC (ABC)
M2 MB (ABD)
";
        let m = parse(text).unwrap();
        let r = m.pool().get(m.pool().lookup("R").unwrap());
        // (AB CD) is one four-symbol cycle, not two transpositions.
        assert_eq!(r.permutation().permute_char('B').unwrap(), 'C');
        assert_eq!(r.permutation().permute_char('D').unwrap(), 'A');
    }

    #[test]
    fn test_empty_config_truncated() {
        assert_eq!(
            parse("").unwrap_err(),
            EnigmaError::TruncatedInput("alphabet")
        );
        assert_eq!(
            parse("\n  \n").unwrap_err(),
            EnigmaError::TruncatedInput("alphabet")
        );
    }

    #[test]
    fn test_missing_header_truncated() {
        assert_eq!(
            parse("ABCD\n").unwrap_err(),
            EnigmaError::TruncatedInput("slot count")
        );
        assert_eq!(
            parse("ABCD\n3\n").unwrap_err(),
            EnigmaError::TruncatedInput("pawl count")
        );
    }

    #[test]
    fn test_non_numeric_header() {
        let err = parse("ABCD\nthree 2\n").unwrap_err();
        assert_eq!(err, EnigmaError::InvalidNumber("three".to_string()));
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_descriptor_missing_tag_truncated() {
        assert_eq!(
            parse("ABCD\n3 2\nR\n").unwrap_err(),
            EnigmaError::TruncatedInput("rotor descriptor")
        );
    }

    #[test]
    fn test_descriptor_missing_wiring_truncated() {
        assert_eq!(
            parse("ABCD\n3 2\nR R\n").unwrap_err(),
            EnigmaError::TruncatedInput("rotor wiring")
        );
    }

    #[test]
    fn test_bad_type_tag() {
        assert_eq!(
            parse("ABCD\n3 2\nR Q (AB) (CD)\n").unwrap_err(),
            EnigmaError::BadRotorType("Q".to_string())
        );
    }

    #[test]
    fn test_wiring_outside_alphabet() {
        assert_eq!(
            parse("ABCD\n3 2\nR R (AE)\n").unwrap_err(),
            EnigmaError::CycleSymbolNotInAlphabet('E')
        );
    }

    #[test]
    fn test_bad_geometry_rejected() {
        assert_eq!(
            parse("ABCD\n2 2\nR R (AB) (CD)\n").unwrap_err(),
            EnigmaError::InvalidGeometry { slots: 2, pawls: 2 }
        );
    }

    #[test]
    fn test_duplicate_rotor_name_rejected() {
        let text = "ABCD\n3 2\nR R (AB) (CD)\nR N (ABCD)\n";
        assert_eq!(
            parse(text).unwrap_err(),
            EnigmaError::DuplicateRotorName("R".to_string())
        );
    }
}
