//! Historical rotor-cipher machine simulator.
//!
//! Simulates an Enigma-style machine: given a machine configuration
//! (alphabet, rotor slots, pawl count, available rotor hardware) and a
//! per-message setting (selected rotors, initial positions, ring
//! offsets, plugboard wiring), it encrypts or decrypts text one symbol
//! at a time, advancing rotor state between symbols exactly as the
//! physical machine would.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbol <-> index bijection)
//!     ↕
//! Permutation  (cycle-notation wiring, forward/inverse lookup, ring)
//!     ↕
//! Rotor        (reflector / fixed / moving variants, notch stepping)
//!     ↕ pooled in a RotorPool, addressed by RotorId
//! Machine      (plugboard + rotor stack + reflector, odometer stepping)
//!     ↕
//! config / session  (configuration text, message scripts, grouping)
//! ```
//!
//! # Examples
//!
//! Assemble a machine from configuration text and run a message script:
//!
//! ```
//! use enigma::{config, Session};
//!
//! let machine = config::parse(
//!     "ABCD\n3 2\nR R (AB) (CD)\nM1 MC (ABC)\nM2 MB (ABD)\n",
//! ).unwrap();
//! let mut session = Session::new(machine);
//! let output = session.run("* R M1 M2 AA\nA\n").unwrap();
//! assert_eq!(output, vec!["D".to_string()]);
//! ```
//!
//! Build a machine directly and use the self-inverse property:
//!
//! ```
//! use std::rc::Rc;
//! use enigma::{Alphabet, Machine, Permutation, Rotor, RotorPool};
//!
//! let alphabet = Rc::new(Alphabet::default());
//! let mut pool = RotorPool::new();
//! pool.insert(Rotor::reflector("B", Permutation::new(
//!     "(AE) (BN) (CK) (DQ) (FU) (GY) (HI) (JM) (LO) (PW) (RX) (SZ) (TV)",
//!     Rc::clone(&alphabet),
//! ).unwrap()).unwrap()).unwrap();
//! pool.insert(Rotor::moving("I", Permutation::new(
//!     "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)",
//!     Rc::clone(&alphabet),
//! ).unwrap(), "Q").unwrap()).unwrap();
//!
//! let mut machine = Machine::new(alphabet, 2, 1, pool).unwrap();
//! machine.insert_rotors(&["B", "I"]).unwrap();
//! machine.set_rotors("A").unwrap();
//! let ciphertext = machine.convert("HELLO").unwrap();
//!
//! machine.set_rotors("A").unwrap();
//! assert_eq!(machine.convert(&ciphertext).unwrap(), "HELLO");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod permutation;
pub mod rotor;
pub mod session;

pub use alphabet::Alphabet;
pub use error::{EnigmaError, ErrorKind};
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorId, RotorKind, RotorPool};
pub use session::{format_message_line, Session};
