//! Rotor cipher machine simulator.
//!
//! A [`Machine`] is built from an [`Alphabet`], a number of rotor slots, a
//! number of pawls, and the [`Rotor`]s available to it. Each rotor wraps a
//! [`Permutation`] written in cycle notation. Once rotors are inserted and
//! set, [`Machine::convert`] encodes one keystroke at a time; encoding the
//! ciphertext again under the same key gives back the plaintext.
//!
//! ```
//! use enigma::historical;
//!
//! let mut machine = historical::m4()?;
//! machine.insert_rotors(&["B", "Beta", "I", "II", "III"])?;
//! machine.set_rotors("AAAA")?;
//! assert_eq!(machine.convert_msg("AAAAA")?, "BDZGO");
//! # Ok::<(), enigma::EnigmaError>(())
//! ```

pub mod alphabet;
pub mod config;
pub mod error;
pub mod historical;
pub mod machine;
pub mod permutation;
pub mod rotor;
pub mod session;

pub use alphabet::Alphabet;
pub use config::{MachineConfig, Settings};
pub use error::{EnigmaError, Result};
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorKind};
