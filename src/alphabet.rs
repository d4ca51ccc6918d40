//! An ordered set of encodable characters.

use std::collections::HashMap;
use std::fmt;

use crate::error::{config_err, EnigmaError, Result};

pub const UPPER_CASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Character number `k` has index `k`, numbering from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
	chars: Vec<char>,
	index: HashMap<char, usize>,
}

impl Alphabet {
	/// Fails if `chars` is empty or repeats a character.
	pub fn new(chars: &str) -> Result<Self> {
		let chars: Vec<char> = chars.chars().collect();
		if chars.is_empty() {
			return config_err!("alphabet is empty");
		}

		let mut index = HashMap::with_capacity(chars.len());
		for (i, &c) in chars.iter().enumerate() {
			if index.insert(c, i).is_some() {
				return config_err!("alphabet repeats {:?}", c);
			}
		}

		Ok(Alphabet { chars, index })
	}

	pub fn size(&self) -> usize {
		self.chars.len()
	}

	pub fn contains(&self, c: char) -> bool {
		self.index.contains_key(&c)
	}

	/// Character at `index`, where `0 <= index < size()`.
	pub fn to_char(&self, index: usize) -> Result<char> {
		self.chars.get(index).copied().ok_or(EnigmaError::Range {
			index: index as isize,
			size: self.size(),
		})
	}

	/// Index of `c`; the inverse of [`Alphabet::to_char`].
	pub fn to_int(&self, c: char) -> Result<usize> {
		self.index.get(&c).copied().ok_or(EnigmaError::NotFound(c))
	}

	pub fn chars(&self) -> &[char] {
		&self.chars
	}
}

impl Default for Alphabet {
	fn default() -> Self {
		let chars: Vec<char> = UPPER_CASE.chars().collect();
		let index = chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
		Alphabet { chars, index }
	}
}

impl fmt::Display for Alphabet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.chars.iter().try_for_each(|c| write!(f, "{}", c))
	}
}
