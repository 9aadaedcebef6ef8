//! Machine: the assembled rotor stack, plugboard, and stepping logic.
//!
//! Orchestrates per-character conversion: the plugboard feeds the
//! rightmost rotor, the signal runs left through every installed rotor
//! to the reflector, folds, runs back right through every rotor except
//! the reflector, and exits through the plugboard again. Rotors and
//! permutations stay passive; the machine is the sole orchestrator.

use std::collections::HashSet;
use std::rc::Rc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorId, RotorKind, RotorPool};

/// A complete rotor-cipher machine.
///
/// # Architecture
///
/// ```text
/// Alphabet     (symbol <-> index bijection)
///     |
/// Permutation  (cycle-notation wiring, forward/inverse tables)
///     |
/// Rotor        (reflector / fixed / moving; setting + ring offsets)
///     |
/// Machine      (slot list over a RotorPool, plugboard, stepping)
/// ```
///
/// Slot 0 always holds the reflector; slots `1..num_rotors` run left to
/// right, and only the rightmost `num_pawls` slots can ever advance.
/// Installed slots alias entries of the shared [`RotorPool`] by id, so a
/// rotor advanced during one message keeps that position if reinstalled
/// by name without an intervening `set_rotors`.
#[derive(Debug)]
pub struct Machine {
    alphabet: Rc<Alphabet>,
    num_rotors: usize,
    num_pawls: usize,
    pool: RotorPool,
    slots: Vec<RotorId>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine over `alphabet` with `num_rotors` slots, of
    /// which the rightmost `num_pawls` are pawl-eligible, drawing from
    /// the rotors of `pool`.
    ///
    /// The plugboard starts as the identity permutation.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidGeometry`] unless `1 < num_rotors`
    /// and `num_pawls < num_rotors`.
    pub fn new(
        alphabet: Rc<Alphabet>,
        num_rotors: usize,
        num_pawls: usize,
        pool: RotorPool,
    ) -> Result<Self, EnigmaError> {
        if num_rotors < 2 || num_pawls >= num_rotors {
            return Err(EnigmaError::InvalidGeometry {
                slots: num_rotors,
                pawls: num_pawls,
            });
        }
        let plugboard = Permutation::identity(Rc::clone(&alphabet));
        Ok(Machine {
            alphabet,
            num_rotors,
            num_pawls,
            pool,
            slots: Vec::with_capacity(num_rotors),
            plugboard,
        })
    }

    /// Returns the machine's alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls, and thus of slots that can rotate.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the shared rotor pool.
    pub fn pool(&self) -> &RotorPool {
        &self.pool
    }

    /// Populates the slot list with the rotors named in `names`, left to
    /// right; `names[0]` names the reflector.
    ///
    /// Replaces any previous installation. Rotor positions are whatever
    /// the pool entries last held; call [`set_rotors`](Self::set_rotors)
    /// before converting.
    ///
    /// # Errors
    /// - [`EnigmaError::WrongNumberOfRotors`] unless exactly
    ///   `num_rotors` names are given.
    /// - [`EnigmaError::UnknownRotor`] for a name absent from the pool.
    /// - [`EnigmaError::RotorAlreadyInstalled`] for a name repeated
    ///   within this installation.
    /// - [`EnigmaError::ReflectorRequired`] if `names[0]` is not a
    ///   reflector.
    pub fn insert_rotors(&mut self, names: &[&str]) -> Result<(), EnigmaError> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::WrongNumberOfRotors {
                expected: self.num_rotors,
                actual: names.len(),
            });
        }
        // Uniqueness is scoped to this installation, not to the pool.
        let mut used: HashSet<&str> = HashSet::with_capacity(names.len());
        let mut slots = Vec::with_capacity(names.len());
        for (i, &name) in names.iter().enumerate() {
            let id = self
                .pool
                .lookup(name)
                .ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;
            if !used.insert(name) {
                return Err(EnigmaError::RotorAlreadyInstalled(name.to_string()));
            }
            if i == 0 && *self.pool.get(id).kind() != RotorKind::Reflector {
                return Err(EnigmaError::ReflectorRequired(name.to_string()));
            }
            slots.push(id);
        }
        self.slots = slots;
        Ok(())
    }

    /// Sets the installed rotors' positions from `setting`: one symbol
    /// per non-reflector slot, leftmost first.
    ///
    /// # Errors
    /// - [`EnigmaError::NoRotorsInstalled`] if nothing is installed.
    /// - [`EnigmaError::WrongSettingLength`] unless exactly
    ///   `num_rotors - 1` symbols are given.
    /// - [`EnigmaError::SymbolNotInAlphabet`] for a symbol outside the
    ///   alphabet.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), EnigmaError> {
        self.set_each(setting, |rotor, c| rotor.set(c))
    }

    /// Sets the installed rotors' ring offsets from `ring`, one symbol
    /// per non-reflector slot, leftmost first.
    ///
    /// # Errors
    /// Same conditions as [`set_rotors`](Self::set_rotors).
    pub fn set_ring(&mut self, ring: &str) -> Result<(), EnigmaError> {
        self.set_each(ring, |rotor, c| rotor.set_ring(c))
    }

    /// Applies one symbol of `symbols` to each non-reflector slot.
    fn set_each(
        &mut self,
        symbols: &str,
        apply: impl Fn(&mut Rotor, char) -> Result<(), EnigmaError>,
    ) -> Result<(), EnigmaError> {
        if self.slots.is_empty() {
            return Err(EnigmaError::NoRotorsInstalled);
        }
        let expected = self.num_rotors - 1;
        let actual = symbols.chars().count();
        if actual != expected {
            return Err(EnigmaError::WrongSettingLength { expected, actual });
        }
        for (i, c) in symbols.chars().enumerate() {
            apply(self.pool.get_mut(self.slots[i + 1]), c)?;
        }
        Ok(())
    }

    /// Sets the plugboard permutation, applied on entry and on exit of
    /// every conversion. A plugboard built from disjoint 2-cycles is
    /// self-inverse, so the same forward application serves both ends.
    pub fn set_plugboard(&mut self, plugboard: Permutation) {
        self.plugboard = plugboard;
    }

    /// Builds the plugboard from cycle notation over the machine's own
    /// alphabet and installs it. An empty string clears the plugboard
    /// back to the identity.
    ///
    /// # Errors
    /// Any cycle-notation parse error from [`Permutation::new`].
    pub fn set_plugboard_cycles(&mut self, cycles: &str) -> Result<(), EnigmaError> {
        self.plugboard = Permutation::new(cycles, Rc::clone(&self.alphabet))?;
        Ok(())
    }

    /// Clears the installed slot list, preparing for the next message
    /// block. Rotor positions in the pool are left untouched: a fresh
    /// `set_rotors` is required before the next conversion.
    pub fn reset(&mut self) {
        self.slots.clear();
    }

    /// Returns the window view: the current position symbol of every
    /// non-reflector slot, leftmost first.
    pub fn positions(&self) -> String {
        self.slots
            .iter()
            .skip(1)
            .map(|&id| {
                self.alphabet
                    .to_char(self.pool.get(id).setting())
                    .expect("rotor setting is always within the alphabet")
            })
            .collect()
    }

    /// Computes which slots advance on this keystroke, from a read-only
    /// snapshot of pre-step positions.
    ///
    /// The rightmost slot always advances. The notch scan covers the
    /// pawl window *excluding* its leftmost slot (`i > n - pawls`): the
    /// leftmost pawl-eligible rotor's own notch never independently
    /// triggers it, only a right neighbor's notch does. No position is
    /// mutated here; every notch check sees the state at the start of
    /// the keystroke, which is what makes double-stepping come out
    /// right.
    fn advance_set(&self) -> Vec<bool> {
        let n = self.slots.len();
        let mut advance = vec![false; n];
        advance[n - 1] = true;
        let window = n - self.num_pawls;
        for i in ((window + 1)..n).rev() {
            if self.pool.get(self.slots[i]).at_notch() {
                advance[i] = true;
                advance[i - 1] = true;
            }
        }
        advance
    }

    /// Steps the machine once: decide from pre-step state, then apply.
    ///
    /// The apply pass covers the full pawl window (`i >= n - pawls`),
    /// one slot wider on the left than the notch scan; the asymmetry is
    /// deliberate and matches the physical pawl arrangement.
    fn machine_advance(&mut self) {
        let advance = self.advance_set();
        let n = self.slots.len();
        let window = n - self.num_pawls;
        for i in (window..n).rev() {
            if advance[i] {
                self.pool.get_mut(self.slots[i]).advance();
            }
        }
    }

    /// Converts one symbol, given and returned as an alphabet index,
    /// advancing the machine.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NoRotorsInstalled`] if no installation has
    /// been made.
    pub fn convert_index(&mut self, c: usize) -> Result<usize, EnigmaError> {
        if self.slots.is_empty() {
            return Err(EnigmaError::NoRotorsInstalled);
        }
        let mut value = self.plugboard.permute(c as isize);
        self.machine_advance();
        for &id in self.slots.iter().rev() {
            value = self.pool.get(id).convert_forward(value);
        }
        for &id in self.slots.iter().skip(1) {
            value = self.pool.get(id).convert_backward(value);
        }
        Ok(self.plugboard.permute(value as isize))
    }

    /// Converts a message, advancing the machine once per non-space
    /// symbol. Spaces are skipped: not encrypted, not stepped over, and
    /// absent from the output.
    ///
    /// # Errors
    /// - [`EnigmaError::NoRotorsInstalled`] if nothing is installed.
    /// - [`EnigmaError::SymbolNotInAlphabet`] for any non-space symbol
    ///   outside the alphabet.
    pub fn convert(&mut self, msg: &str) -> Result<String, EnigmaError> {
        let mut out = String::with_capacity(msg.len());
        for c in msg.chars() {
            if c == ' ' {
                continue;
            }
            let index = self.alphabet.to_int(c)?;
            let converted = self.convert_index(index)?;
            out.push(self.alphabet.to_char(converted)?);
        }
        Ok(out)
    }
}
