//! Rotors: a wiring permutation turned by a rotational offset.
//!
//! Reflectors, fixed rotors and moving rotors share one struct; what they
//! may do is decided by [`RotorKind`].

use crate::alphabet::Alphabet;
use crate::error::{config_err, EnigmaError, Result};
use crate::permutation::Permutation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
	/// Always at setting 0, traversed once per keystroke.
	Reflecting,
	/// No ratchet; never advances.
	Fixed,
	/// Steps under pawl control; `notches` holds alphabet indices.
	Moving { notches: Vec<usize> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
	name: String,
	permutation: Permutation,
	kind: RotorKind,
	setting: usize,
	ring: usize,
}

impl Rotor {
	pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Self {
		Self::with_kind(name, permutation, RotorKind::Reflecting)
	}

	pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
		Self::with_kind(name, permutation, RotorKind::Fixed)
	}

	/// A moving rotor whose notches sit at the characters of `notches`.
	pub fn moving(name: impl Into<String>, permutation: Permutation, notches: &str) -> Result<Self> {
		let notches = notches
			.chars()
			.map(|c| match permutation.alphabet().to_int(c) {
				Ok(i) => Ok(i),
				Err(_) => config_err!("notch {:?} is not in the alphabet", c),
			})
			.collect::<Result<Vec<_>>>()?;
		Ok(Self::with_kind(name, permutation, RotorKind::Moving { notches }))
	}

	fn with_kind(name: impl Into<String>, permutation: Permutation, kind: RotorKind) -> Self {
		Rotor {
			name: name.into(),
			permutation,
			kind,
			setting: 0,
			ring: 0,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> &RotorKind {
		&self.kind
	}

	pub fn alphabet(&self) -> &Alphabet {
		self.permutation.alphabet()
	}

	pub fn permutation(&self) -> &Permutation {
		&self.permutation
	}

	pub fn size(&self) -> usize {
		self.permutation.size()
	}

	/// True iff I can advance under ratchet control.
	pub fn rotates(&self) -> bool {
		matches!(self.kind, RotorKind::Moving { .. })
	}

	pub fn reflecting(&self) -> bool {
		self.kind == RotorKind::Reflecting
	}

	/// True iff my current setting lines up with one of my notches, letting
	/// the rotor on my left step together with me.
	pub fn at_notch(&self) -> bool {
		match &self.kind {
			RotorKind::Moving { notches } => notches.contains(&self.setting),
			_ => false,
		}
	}

	/// Steps one position; a no-op unless I rotate.
	pub fn advance(&mut self) {
		if self.rotates() {
			self.setting = self.permutation.wrap(self.setting as isize + 1);
		}
	}

	pub fn setting(&self) -> usize {
		self.setting
	}

	pub fn set(&mut self, posn: usize) -> Result<()> {
		if self.reflecting() && posn != 0 {
			return config_err!("reflector {} has only one position", self.name);
		}
		self.setting = self.check_range(posn)?;
		Ok(())
	}

	pub fn set_char(&mut self, c: char) -> Result<()> {
		let posn = self.alphabet().to_int(c)?;
		self.set(posn)
	}

	pub fn ring(&self) -> usize {
		self.ring
	}

	/// Turns the wiring against the letter ring (Ringstellung). Notches stay
	/// with the letter ring.
	pub fn set_ring(&mut self, posn: usize) -> Result<()> {
		if self.reflecting() && posn != 0 {
			return config_err!("reflector {} has no ring setting", self.name);
		}
		self.ring = self.check_range(posn)?;
		Ok(())
	}

	fn check_range(&self, posn: usize) -> Result<usize> {
		if posn >= self.size() {
			return Err(EnigmaError::Range {
				index: posn as isize,
				size: self.size(),
			});
		}
		Ok(posn)
	}

	fn offset(&self) -> isize {
		self.setting as isize - self.ring as isize
	}

	/// Result of passing contact `p` right to left through me.
	pub fn convert_forward(&self, p: usize) -> usize {
		let offset = self.offset();
		let out = self.permutation.permute(p as isize + offset);
		self.permutation.wrap(out as isize - offset)
	}

	/// Result of passing contact `e` left to right through me.
	pub fn convert_backward(&self, e: usize) -> usize {
		let offset = self.offset();
		let out = self.permutation.invert(e as isize + offset);
		self.permutation.wrap(out as isize - offset)
	}
}
