use std::io;

use thiserror::Error;

/// Everything that can go wrong while building or driving a machine.
#[derive(Error, Debug)]
pub enum EnigmaError {
	/// Malformed alphabet, rotor, slot assignment, setting or plugboard.
	#[error("configuration error: {0}")]
	Configuration(String),

	/// Index or setting outside `[0, size)`.
	#[error("index {index} out of range for alphabet of size {size}")]
	Range { index: isize, size: usize },

	#[error("character {0:?} is not in the alphabet")]
	NotFound(char),

	#[error("i/o error: {0}")]
	Io(#[from] io::Error),
}

pub type Result<T, E = EnigmaError> = std::result::Result<T, E>;

/// Shorthand for `Err(EnigmaError::Configuration(format!(...)))`.
macro_rules! config_err {
	($($arg:tt)*) => (
		Err($crate::error::EnigmaError::Configuration(format!($($arg)*)))
	)
}

pub(crate) use config_err;
