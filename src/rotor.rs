//! Rotors: the wired, possibly rotating discs of the machine.
//!
//! The reflector/fixed/moving hierarchy is a closed set of variants
//! dispatched by exhaustive matching; only a moving rotor carries a
//! notch set, and only a moving rotor ever changes its setting.
//!
//! Rotors live in a [`RotorPool`] and are addressed by [`RotorId`], so
//! the machine's installed slot list aliases pool entries by index: a
//! position advanced during one message is visible machine-wide without
//! hidden copies.

use std::collections::HashMap;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;

/// The closed set of rotor variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Sits in slot 0, only ever converts forward, never advances.
    Reflector,
    /// Converts in both directions but never advances.
    Fixed,
    /// Converts in both directions and advances under pawl pressure.
    Moving {
        /// Alphabet indices at which this rotor's notch engages.
        notches: Vec<usize>,
    },
}

/// A single rotor: a named wiring with a rotational setting.
///
/// The variant is fixed for the rotor's entire lifetime. The setting is
/// always an index in `0..alphabet.size()`.
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    perm: Permutation,
    setting: usize,
    kind: RotorKind,
}

impl Rotor {
    /// Creates a reflector named `name` wired as `perm`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::ReflectorNotDerangement`] if the wiring
    /// leaves any symbol mapped to itself; a reflector with a fixed point
    /// would let that symbol encrypt to itself.
    pub fn reflector(name: &str, perm: Permutation) -> Result<Self, EnigmaError> {
        if !perm.derangement() {
            return Err(EnigmaError::ReflectorNotDerangement(name.to_string()));
        }
        Ok(Rotor {
            name: name.to_string(),
            perm,
            setting: 0,
            kind: RotorKind::Reflector,
        })
    }

    /// Creates a non-rotating rotor named `name` wired as `perm`.
    pub fn fixed(name: &str, perm: Permutation) -> Self {
        Rotor {
            name: name.to_string(),
            perm,
            setting: 0,
            kind: RotorKind::Fixed,
        }
    }

    /// Creates a rotating rotor named `name` wired as `perm`, with one
    /// notch per symbol of `notches`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if a notch symbol is
    /// outside the rotor's alphabet.
    pub fn moving(name: &str, perm: Permutation, notches: &str) -> Result<Self, EnigmaError> {
        let indices = notches
            .chars()
            .map(|c| perm.alphabet().to_int(c))
            .collect::<Result<Vec<usize>, EnigmaError>>()?;
        Ok(Rotor {
            name: name.to_string(),
            perm,
            setting: 0,
            kind: RotorKind::Moving { notches: indices },
        })
    }

    /// Returns the rotor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rotor's variant.
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// Returns the wired permutation.
    pub fn permutation(&self) -> &Permutation {
        &self.perm
    }

    /// Returns the alphabet this rotor encodes over.
    pub fn alphabet(&self) -> &Alphabet {
        self.perm.alphabet()
    }

    /// Returns the current rotational setting as an alphabet index.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Sets the rotor position to the symbol `c`, as done manually at the
    /// start of a new message.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `c` is outside the
    /// rotor's alphabet.
    pub fn set(&mut self, c: char) -> Result<(), EnigmaError> {
        self.setting = self.alphabet().to_int(c)?;
        Ok(())
    }

    /// Sets the ring offset to the symbol `c`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `c` is outside the
    /// rotor's alphabet.
    pub fn set_ring(&mut self, c: char) -> Result<(), EnigmaError> {
        self.perm.set_ring(c)
    }

    /// Returns true if this rotor is capable of rotating.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns true if a notch sits at the current setting.
    ///
    /// Always false for reflectors and fixed rotors.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.setting),
            RotorKind::Reflector | RotorKind::Fixed => false,
        }
    }

    /// Advances the setting one position, wrapping past the last symbol.
    ///
    /// Only a moving rotor has a ratchet for the pawl to engage; the
    /// other variants are unchanged.
    pub fn advance(&mut self) {
        match self.kind {
            RotorKind::Moving { .. } => {
                self.setting = (self.setting + 1) % self.alphabet().size();
            }
            RotorKind::Reflector | RotorKind::Fixed => {}
        }
    }

    /// Converts `p` entering from the right, leaving to the left.
    ///
    /// The signal enters at the rotor's rotational offset (setting minus
    /// ring), passes through the wiring, and leaves shifted back.
    pub fn convert_forward(&self, p: usize) -> usize {
        let shift = self.setting as isize - self.perm.ring_offset() as isize;
        let wired = self.perm.permute(p as isize + shift);
        self.perm.wrap(wired as isize - shift)
    }

    /// Converts `p` entering from the left, leaving to the right.
    ///
    /// The machine never routes a reflected signal back through slot 0,
    /// so this is only ever called on fixed and moving rotors.
    pub fn convert_backward(&self, p: usize) -> usize {
        let shift = self.setting as isize - self.perm.ring_offset() as isize;
        let wired = self.perm.invert(p as isize + shift);
        self.perm.wrap(wired as isize - shift)
    }
}

/// Unique identifier for a rotor within a [`RotorPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorId(pub(crate) usize);

/// Arena of rotors addressed by [`RotorId`], with by-name lookup.
///
/// Stores all rotors in a contiguous `Vec`; the machine's installed slot
/// list holds ids into it, avoiding `Rc<RefCell<>>` aliasing.
#[derive(Debug, Default)]
pub struct RotorPool {
    rotors: Vec<Rotor>,
    by_name: HashMap<String, RotorId>,
}

impl RotorPool {
    /// Creates a new empty pool.
    pub fn new() -> Self {
        RotorPool::default()
    }

    /// Creates a new empty pool with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        RotorPool {
            rotors: Vec::with_capacity(capacity),
            by_name: HashMap::with_capacity(capacity),
        }
    }

    /// Adds `rotor` to the pool.
    ///
    /// # Errors
    /// Returns [`EnigmaError::DuplicateRotorName`] if the pool already
    /// holds a rotor with the same name; exactly one rotor instance per
    /// declared name may exist.
    pub fn insert(&mut self, rotor: Rotor) -> Result<RotorId, EnigmaError> {
        if self.by_name.contains_key(rotor.name()) {
            return Err(EnigmaError::DuplicateRotorName(rotor.name().to_string()));
        }
        let id = RotorId(self.rotors.len());
        self.by_name.insert(rotor.name().to_string(), id);
        self.rotors.push(rotor);
        Ok(id)
    }

    /// Returns the id of the rotor named `name`, if present.
    pub fn lookup(&self, name: &str) -> Option<RotorId> {
        self.by_name.get(name).copied()
    }

    /// Returns the rotor with the given id.
    pub fn get(&self, id: RotorId) -> &Rotor {
        &self.rotors[id.0]
    }

    /// Returns the rotor with the given id, mutably.
    pub fn get_mut(&mut self, id: RotorId) -> &mut Rotor {
        &mut self.rotors[id.0]
    }

    /// Returns the number of rotors in the pool.
    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    /// Returns true if the pool holds no rotors.
    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }
}
