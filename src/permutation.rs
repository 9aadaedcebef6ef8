//! Permutation of an alphabet's index space, built from cycle notation.
//!
//! A permutation is written as parenthesized chains `(c0 c1 ... cm)`
//! meaning `c0→c1→...→cm→c0`. Symbols absent from every chain are fixed
//! points. The permutation is a pure structural object: the ring symbol
//! it stores for its owning rotor never alters `permute`/`invert`
//! results (ring adjustment happens in the rotor's conversion math).

use std::rc::Rc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;

/// A permutation over the indices `0..alphabet.size()`.
///
/// Holds dense forward and inverse lookup tables derived from the cycle
/// notation it was constructed from, plus a ring symbol (defaulting to
/// the alphabet's first symbol) on behalf of its owning rotor.
#[derive(Debug, Clone)]
pub struct Permutation {
    alphabet: Rc<Alphabet>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
    ring: char,
    ring_offset: usize,
}

impl Permutation {
    /// Builds a permutation from `cycles` over `alphabet`.
    ///
    /// Whitespace inside groups is ignored; text between groups is
    /// skipped. An empty `cycles` string yields the identity.
    ///
    /// # Errors
    /// - [`EnigmaError::CycleSymbolNotInAlphabet`] for a group symbol
    ///   outside the alphabet.
    /// - [`EnigmaError::RepeatedCycleSymbol`] if a symbol appears in more
    ///   than one cycle position (cycles must be disjoint).
    /// - [`EnigmaError::UnclosedCycle`] for unbalanced or nested
    ///   parentheses.
    pub fn new(cycles: &str, alphabet: Rc<Alphabet>) -> Result<Self, EnigmaError> {
        let size = alphabet.size();
        let mut forward: Vec<usize> = (0..size).collect();
        let mut assigned = vec![false; size];

        let mut group: Option<Vec<usize>> = None;
        for c in cycles.chars() {
            match (c, &mut group) {
                ('(', None) => group = Some(Vec::new()),
                ('(', Some(_)) => return Err(EnigmaError::UnclosedCycle),
                (')', Some(indices)) => {
                    Self::add_cycle(&mut forward, &mut assigned, indices, &alphabet)?;
                    group = None;
                }
                (')', None) => return Err(EnigmaError::UnclosedCycle),
                (c, Some(indices)) if !c.is_whitespace() => {
                    if !alphabet.contains(c) {
                        return Err(EnigmaError::CycleSymbolNotInAlphabet(c));
                    }
                    indices.push(alphabet.to_int(c)?);
                }
                // Whitespace inside a group and anything outside one.
                _ => {}
            }
        }
        if group.is_some() {
            return Err(EnigmaError::UnclosedCycle);
        }

        let mut inverse = vec![0usize; size];
        for (from, &to) in forward.iter().enumerate() {
            inverse[to] = from;
        }

        let ring = alphabet.to_char(0)?;
        Ok(Permutation {
            alphabet,
            forward,
            inverse,
            ring,
            ring_offset: 0,
        })
    }

    /// The identity permutation over `alphabet`.
    pub fn identity(alphabet: Rc<Alphabet>) -> Self {
        Permutation::new("", alphabet).expect("empty cycle string is always valid")
    }

    /// Wires one cycle `c0→c1→...→cm→c0` into the forward table.
    fn add_cycle(
        forward: &mut [usize],
        assigned: &mut [bool],
        indices: &[usize],
        alphabet: &Alphabet,
    ) -> Result<(), EnigmaError> {
        for (i, &from) in indices.iter().enumerate() {
            if assigned[from] {
                // Already wired by this or an earlier group.
                return Err(EnigmaError::RepeatedCycleSymbol(alphabet.to_char(from)?));
            }
            assigned[from] = true;
            forward[from] = indices[(i + 1) % indices.len()];
        }
        Ok(())
    }

    /// Returns the size of the alphabet this permutation acts on.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Returns the alphabet this permutation was built over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Reduces `p` modulo the alphabet size, mapping negative and
    /// overflowed values into `0..size`.
    pub fn wrap(&self, p: isize) -> usize {
        p.rem_euclid(self.size() as isize) as usize
    }

    /// Applies the permutation to `p` modulo the alphabet size.
    pub fn permute(&self, p: isize) -> usize {
        self.forward[self.wrap(p)]
    }

    /// Applies the inverse permutation to `p` modulo the alphabet size.
    pub fn invert(&self, p: isize) -> usize {
        self.inverse[self.wrap(p)]
    }

    /// Applies the permutation to the symbol `c`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `c` is not in the
    /// alphabet.
    pub fn permute_char(&self, c: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.to_int(c)?;
        self.alphabet.to_char(self.forward[index])
    }

    /// Applies the inverse permutation to the symbol `c`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `c` is not in the
    /// alphabet.
    pub fn invert_char(&self, c: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.to_int(c)?;
        self.alphabet.to_char(self.inverse[index])
    }

    /// Returns true iff no symbol is a fixed point.
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &to)| i != to)
    }

    /// Stores the ring symbol for the owning rotor.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `r` is not in the
    /// alphabet.
    pub fn set_ring(&mut self, r: char) -> Result<(), EnigmaError> {
        self.ring_offset = self.alphabet.to_int(r)?;
        self.ring = r;
        Ok(())
    }

    /// Returns the stored ring symbol.
    pub fn ring(&self) -> char {
        self.ring
    }

    /// Returns the stored ring symbol's alphabet index.
    pub fn ring_offset(&self) -> usize {
        self.ring_offset
    }
}
