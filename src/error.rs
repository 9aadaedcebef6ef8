//! Error types for the enigma library.

use std::fmt;

/// Broad error classes from the simulator's failure taxonomy.
///
/// Every [`EnigmaError`] variant belongs to exactly one class; callers
/// that only care about the class can branch on [`EnigmaError::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An index or symbol outside the declared alphabet.
    Domain,
    /// Malformed configuration or setting data.
    Config,
    /// A configuration or message stream ended mid-item.
    TruncatedInput,
}

/// Errors produced by the enigma library.
///
/// All errors are immediately fatal to the operation that raised them;
/// the engine never retries or continues best-effort after one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnigmaError {
    /// Index is outside `0..size` for the alphabet in use.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The alphabet size.
        size: usize,
    },
    /// Symbol was never declared in the alphabet.
    SymbolNotInAlphabet(char),
    /// The alphabet specification declares the same symbol twice.
    DuplicateSymbol(char),
    /// The alphabet specification declares no symbols at all.
    EmptyAlphabet,
    /// A cycle group references a symbol outside the alphabet.
    CycleSymbolNotInAlphabet(char),
    /// A symbol appears in more than one cycle position (cycles must be disjoint).
    RepeatedCycleSymbol(char),
    /// Cycle notation has an unbalanced or nested parenthesis.
    UnclosedCycle,
    /// Two rotors in one pool were declared with the same name.
    DuplicateRotorName(String),
    /// A setting line names a rotor absent from the machine's pool.
    UnknownRotor(String),
    /// The same rotor name appears twice in one installation.
    RotorAlreadyInstalled(String),
    /// Slot 0 was populated with a rotor that is not a reflector.
    ReflectorRequired(String),
    /// A reflector's wiring leaves some symbol mapped to itself.
    ReflectorNotDerangement(String),
    /// A rotor descriptor carries an unrecognized type tag.
    BadRotorType(String),
    /// A field that must be an integer could not be parsed as one.
    InvalidNumber(String),
    /// Slot/pawl counts violate `1 < slots` or `0 <= pawls < slots`.
    InvalidGeometry {
        /// Declared rotor slot count.
        slots: usize,
        /// Declared pawl count.
        pawls: usize,
    },
    /// An installation supplied the wrong number of rotor names.
    WrongNumberOfRotors {
        /// Slot count of the machine.
        expected: usize,
        /// Names actually supplied.
        actual: usize,
    },
    /// A position or ring string has the wrong number of symbols.
    WrongSettingLength {
        /// One symbol per non-reflector slot.
        expected: usize,
        /// Symbols actually supplied.
        actual: usize,
    },
    /// Conversion was requested before any rotors were installed.
    NoRotorsInstalled,
    /// A message stream does not open with a `*` setting line.
    MissingSettingLine,
    /// The stream ended before a complete item could be read.
    TruncatedInput(&'static str),
}

impl EnigmaError {
    /// Returns the broad class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnigmaError::IndexOutOfRange { .. } | EnigmaError::SymbolNotInAlphabet(_) => {
                ErrorKind::Domain
            }
            EnigmaError::TruncatedInput(_) => ErrorKind::TruncatedInput,
            _ => ErrorKind::Config,
        }
    }
}

impl fmt::Display for EnigmaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnigmaError::IndexOutOfRange { index, size } => {
                write!(f, "Index {} is outside the alphabet range 0..{}", index, size)
            }
            EnigmaError::SymbolNotInAlphabet(c) => {
                write!(f, "Symbol '{}' is not in the alphabet", c)
            }
            EnigmaError::DuplicateSymbol(c) => {
                write!(f, "Symbol '{}' appears more than once in the alphabet", c)
            }
            EnigmaError::EmptyAlphabet => {
                write!(f, "Alphabet must contain at least one symbol")
            }
            EnigmaError::CycleSymbolNotInAlphabet(c) => {
                write!(f, "Cycle symbol '{}' is not in the alphabet", c)
            }
            EnigmaError::RepeatedCycleSymbol(c) => {
                write!(f, "Symbol '{}' appears in more than one cycle position", c)
            }
            EnigmaError::UnclosedCycle => {
                write!(f, "Cycle notation has an unbalanced parenthesis")
            }
            EnigmaError::DuplicateRotorName(name) => {
                write!(f, "A rotor named '{}' already exists in the pool", name)
            }
            EnigmaError::UnknownRotor(name) => {
                write!(f, "No rotor named '{}' in the machine's pool", name)
            }
            EnigmaError::RotorAlreadyInstalled(name) => {
                write!(f, "Rotor '{}' is repeated in the setting line", name)
            }
            EnigmaError::ReflectorRequired(name) => {
                write!(f, "First rotor '{}' is not a reflector", name)
            }
            EnigmaError::ReflectorNotDerangement(name) => {
                write!(f, "Reflector '{}' maps some symbol to itself", name)
            }
            EnigmaError::BadRotorType(tag) => {
                write!(f, "Unrecognized rotor type tag '{}'", tag)
            }
            EnigmaError::InvalidNumber(token) => {
                write!(f, "Expected an integer, got '{}'", token)
            }
            EnigmaError::InvalidGeometry { slots, pawls } => {
                write!(
                    f,
                    "Invalid geometry: {} rotor slots with {} pawls",
                    slots, pawls
                )
            }
            EnigmaError::WrongNumberOfRotors { expected, actual } => {
                write!(f, "Expected {} rotor names, got {}", expected, actual)
            }
            EnigmaError::WrongSettingLength { expected, actual } => {
                write!(f, "Expected {} setting symbols, got {}", expected, actual)
            }
            EnigmaError::NoRotorsInstalled => {
                write!(f, "No rotors are installed in the machine")
            }
            EnigmaError::MissingSettingLine => {
                write!(f, "Input does not start with a setting line")
            }
            EnigmaError::TruncatedInput(what) => {
                write!(f, "Input truncated while reading {}", what)
            }
        }
    }
}

impl std::error::Error for EnigmaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_symbol_not_in_alphabet() {
        let err = EnigmaError::SymbolNotInAlphabet('q');
        assert_eq!(format!("{}", err), "Symbol 'q' is not in the alphabet");
    }

    #[test]
    fn test_display_index_out_of_range() {
        let err = EnigmaError::IndexOutOfRange { index: 26, size: 26 };
        assert_eq!(
            format!("{}", err),
            "Index 26 is outside the alphabet range 0..26"
        );
    }

    #[test]
    fn test_display_unknown_rotor() {
        let err = EnigmaError::UnknownRotor("IX".to_string());
        assert_eq!(
            format!("{}", err),
            "No rotor named 'IX' in the machine's pool"
        );
    }

    #[test]
    fn test_display_wrong_setting_length() {
        let err = EnigmaError::WrongSettingLength {
            expected: 4,
            actual: 3,
        };
        assert_eq!(format!("{}", err), "Expected 4 setting symbols, got 3");
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            EnigmaError::SymbolNotInAlphabet('!').kind(),
            ErrorKind::Domain
        );
        assert_eq!(
            EnigmaError::IndexOutOfRange { index: 9, size: 4 }.kind(),
            ErrorKind::Domain
        );
        assert_eq!(
            EnigmaError::UnknownRotor("X".to_string()).kind(),
            ErrorKind::Config
        );
        assert_eq!(
            EnigmaError::TruncatedInput("rotor descriptor").kind(),
            ErrorKind::TruncatedInput
        );
    }

    #[test]
    fn test_error_trait_object() {
        let err: Box<dyn std::error::Error> = Box::new(EnigmaError::EmptyAlphabet);
        assert_eq!(err.to_string(), "Alphabet must contain at least one symbol");
    }
}
