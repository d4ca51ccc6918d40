//! Bijections over alphabet indices, written in cycle notation.
//!
//! A permutation keeps two total lookup tables, `forward[i]` and
//! `inverse[i]`, built once at construction. Applying it in either
//! direction is a single index.

use std::fmt;

use crate::alphabet::Alphabet;
use crate::error::{config_err, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
	alphabet: Alphabet,
	forward: Vec<usize>,
	inverse: Vec<usize>,
}

impl Permutation {
	/// Builds the permutation whose disjoint cycles are `cycles`, each given
	/// as its characters in order (`"AELT"` maps A to E, ..., T to A).
	/// Members of the alphabet that appear in no cycle map to themselves.
	pub fn new<I, S>(alphabet: &Alphabet, cycles: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let size = alphabet.size();
		let mut forward: Vec<usize> = (0..size).collect();
		let mut seen = vec![false; size];

		for cycle in cycles {
			let cycle = cycle.as_ref();
			let mut members = Vec::with_capacity(cycle.len());
			for c in cycle.chars() {
				let Ok(i) = alphabet.to_int(c) else {
					return config_err!("cycle ({}) uses {:?}, which is not in the alphabet", cycle, c);
				};
				if seen[i] {
					return config_err!("{:?} appears more than once in the cycles", c);
				}
				seen[i] = true;
				members.push(i);
			}
			if members.is_empty() {
				return config_err!("empty cycle");
			}
			for (k, &from) in members.iter().enumerate() {
				forward[from] = members[(k + 1) % members.len()];
			}
		}

		Ok(Self::from_table(alphabet, forward))
	}

	pub fn identity(alphabet: &Alphabet) -> Self {
		Self::from_table(alphabet, (0..alphabet.size()).collect())
	}

	/// Builds a permutation from a wiring table: the character at position
	/// `k` of `wiring` is the image of alphabet character `k`.
	pub fn from_wiring(alphabet: &Alphabet, wiring: &str) -> Result<Self> {
		let size = alphabet.size();
		let mut forward = Vec::with_capacity(size);
		let mut seen = vec![false; size];
		for c in wiring.chars() {
			let Ok(i) = alphabet.to_int(c) else {
				return config_err!("wiring uses {:?}, which is not in the alphabet", c);
			};
			if seen[i] {
				return config_err!("wiring repeats {:?}", c);
			}
			seen[i] = true;
			forward.push(i);
		}
		if forward.len() != size {
			return config_err!("wiring has {} contacts, alphabet has {}", forward.len(), size);
		}

		Ok(Self::from_table(alphabet, forward))
	}

	fn from_table(alphabet: &Alphabet, forward: Vec<usize>) -> Self {
		let mut inverse = vec![0; forward.len()];
		for (from, &to) in forward.iter().enumerate() {
			inverse[to] = from;
		}
		Permutation {
			alphabet: alphabet.clone(),
			forward,
			inverse,
		}
	}

	/// `p` modulo the size of this permutation, in `[0, size)`.
	pub fn wrap(&self, p: isize) -> usize {
		p.rem_euclid(self.size() as isize) as usize
	}

	pub fn size(&self) -> usize {
		self.forward.len()
	}

	/// Image of `p` (reduced modulo the alphabet size).
	pub fn permute(&self, p: isize) -> usize {
		self.forward[self.wrap(p)]
	}

	/// Preimage of `c` (reduced modulo the alphabet size).
	pub fn invert(&self, c: isize) -> usize {
		self.inverse[self.wrap(c)]
	}

	pub fn permute_char(&self, p: char) -> Result<char> {
		let i = self.alphabet.to_int(p)?;
		self.alphabet.to_char(self.forward[i])
	}

	pub fn invert_char(&self, c: char) -> Result<char> {
		let i = self.alphabet.to_int(c)?;
		self.alphabet.to_char(self.inverse[i])
	}

	pub fn alphabet(&self) -> &Alphabet {
		&self.alphabet
	}

	/// True iff no character maps to itself.
	pub fn is_derangement(&self) -> bool {
		self.forward.iter().enumerate().all(|(i, &p)| i != p)
	}
}

// Cycle notation, fixed points omitted.
impl fmt::Display for Permutation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let chars = self.alphabet.chars();
		let mut visited = vec![false; self.size()];
		let mut first = true;
		for start in 0..self.size() {
			if visited[start] || self.forward[start] == start {
				continue;
			}
			if !first {
				write!(f, " ")?;
			}
			first = false;
			write!(f, "(")?;
			let mut i = start;
			while !visited[i] {
				visited[i] = true;
				write!(f, "{}", chars[i])?;
				i = self.forward[i];
			}
			write!(f, ")")?;
		}
		Ok(())
	}
}
