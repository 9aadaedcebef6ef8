//! Alphabet: bidirectional mapping between symbols and dense indices.
//!
//! Every other component of the machine works in the index space
//! `0..size`; the alphabet is the only place where symbols and indices
//! are translated into each other.

use std::collections::HashMap;

use crate::error::EnigmaError;

/// An ordered set of distinct symbols, indexed `0..size`.
///
/// Constructed once from a configuration line and immutable thereafter.
/// Declaration order defines index assignment.
#[derive(Debug, Clone)]
pub struct Alphabet {
    chars: Vec<char>,
    indices: HashMap<char, usize>,
}

impl Alphabet {
    /// Creates an alphabet from the symbols of `chars`, in order.
    ///
    /// # Errors
    /// Returns [`EnigmaError::EmptyAlphabet`] if `chars` is empty, and
    /// [`EnigmaError::DuplicateSymbol`] if any symbol repeats.
    pub fn new(chars: &str) -> Result<Self, EnigmaError> {
        if chars.is_empty() {
            return Err(EnigmaError::EmptyAlphabet);
        }
        let count = chars.chars().count();
        let mut indices = HashMap::with_capacity(count);
        let mut ordered = Vec::with_capacity(count);
        for c in chars.chars() {
            if indices.insert(c, ordered.len()).is_some() {
                return Err(EnigmaError::DuplicateSymbol(c));
            }
            ordered.push(c);
        }
        Ok(Alphabet {
            chars: ordered,
            indices,
        })
    }

    /// Returns the number of symbols in the alphabet.
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] if `index >= size()`.
    pub fn to_char(&self, index: usize) -> Result<char, EnigmaError> {
        self.chars
            .get(index)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Returns the index of `symbol`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `symbol` was never
    /// declared.
    pub fn to_int(&self, symbol: char) -> Result<usize, EnigmaError> {
        self.indices
            .get(&symbol)
            .copied()
            .ok_or(EnigmaError::SymbolNotInAlphabet(symbol))
    }

    /// Returns true if `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.indices.contains_key(&symbol)
    }
}

impl Default for Alphabet {
    /// The upper-case Latin alphabet `A..Z`.
    fn default() -> Self {
        Alphabet::new("ABCDEFGHIJKLMNOPQRSTUVWXYZ").expect("default alphabet is valid")
    }
}
