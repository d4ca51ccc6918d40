//! A complete machine: a row of rotor slots plus a plugboard.
//!
//! Slot 0 holds the reflector, slot `num_rotors - 1` the rightmost (fastest)
//! rotor. Each keystroke first steps the rotors, then runs the signal
//! through the plugboard, right to left through every slot including the
//! reflector, back left to right through slots `1..`, and through the
//! plugboard again.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::error::{config_err, EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::Rotor;

#[derive(Debug, Clone)]
pub struct Machine {
	alphabet: Alphabet,
	num_rotors: usize,
	pawls: usize,
	catalog: Vec<Rotor>,
	rotors: Vec<Rotor>,
	plugboard: Permutation,
}

impl Machine {
	/// A machine over `alphabet` with `1 < num_rotors` slots and
	/// `0 <= pawls < num_rotors` pawls. `all_rotors` are the rotors
	/// available to [`Machine::insert_rotors`].
	pub fn new(
		alphabet: Alphabet,
		num_rotors: usize,
		pawls: usize,
		all_rotors: impl IntoIterator<Item = Rotor>,
	) -> Result<Self> {
		if num_rotors <= 1 {
			return config_err!("a machine needs more than one rotor slot, got {}", num_rotors);
		}
		if pawls >= num_rotors {
			return config_err!("{} pawls do not fit {} rotor slots", pawls, num_rotors);
		}

		let catalog: Vec<Rotor> = all_rotors.into_iter().collect();
		let mut names = HashSet::with_capacity(catalog.len());
		for rotor in &catalog {
			if !names.insert(rotor.name()) {
				return config_err!("rotor {} is described twice", rotor.name());
			}
			if rotor.alphabet() != &alphabet {
				return config_err!("rotor {} is wired over a different alphabet", rotor.name());
			}
		}
		debug!(num_rotors, pawls, available = catalog.len(), "machine built");

		let plugboard = Permutation::identity(&alphabet);
		Ok(Machine {
			alphabet,
			num_rotors,
			pawls,
			catalog,
			rotors: Vec::new(),
			plugboard,
		})
	}

	pub fn num_rotors(&self) -> usize {
		self.num_rotors
	}

	/// Number of pawls, and so of rightmost slots that hold moving rotors.
	pub fn num_pawls(&self) -> usize {
		self.pawls
	}

	pub fn alphabet(&self) -> &Alphabet {
		&self.alphabet
	}

	/// Every rotor this machine can be loaded with.
	pub fn available_rotors(&self) -> &[Rotor] {
		&self.catalog
	}

	/// The rotor currently in `slot`, if any.
	pub fn rotor(&self, slot: usize) -> Option<&Rotor> {
		self.rotors.get(slot)
	}

	pub fn plugboard(&self) -> &Permutation {
		&self.plugboard
	}

	/// Loads fresh copies of the rotors named `names` (`names[0]` is the
	/// reflector), all at setting 0. On error the slots are left unchanged.
	pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
		if names.len() != self.num_rotors {
			return config_err!("expected {} rotors, got {}", self.num_rotors, names.len());
		}

		let first_moving = self.num_rotors - self.pawls;
		let mut rotors = Vec::with_capacity(self.num_rotors);
		for (slot, name) in names.iter().enumerate() {
			let name = name.as_ref();
			let Some(rotor) = self.catalog.iter().find(|r| r.name() == name) else {
				return config_err!("misnamed rotor {}", name);
			};
			if rotors.iter().any(|r: &Rotor| r.name() == name) {
				return config_err!("rotor {} is used twice", name);
			}
			if (slot == 0) != rotor.reflecting() {
				return config_err!("reflector in wrong place: slot {} holds {}", slot, name);
			}
			if slot > 0 && (slot >= first_moving) != rotor.rotates() {
				return config_err!(
					"slot {} needs a {} rotor, {} is not",
					slot,
					if slot >= first_moving { "moving" } else { "non-moving" },
					name
				);
			}

			let mut rotor = rotor.clone();
			rotor.set(0)?;
			rotor.set_ring(0)?;
			rotors.push(rotor);
		}

		debug!(rotors = ?names.iter().map(|n| n.as_ref()).collect::<Vec<&str>>(), "rotors inserted");
		self.rotors = rotors;
		Ok(())
	}

	/// Sets slots `1..num_rotors` from `setting`, leftmost first. `setting`
	/// holds one alphabet character per non-reflector slot.
	pub fn set_rotors(&mut self, setting: &str) -> Result<()> {
		let posns = self.slot_positions(setting, "setting")?;
		for (rotor, posn) in self.rotors[1..].iter_mut().zip(posns) {
			rotor.set(posn)?;
		}
		debug!(setting, "rotors set");
		Ok(())
	}

	/// Sets the ring of slots `1..num_rotors` from `rings`, like
	/// [`Machine::set_rotors`].
	pub fn set_rings(&mut self, rings: &str) -> Result<()> {
		let posns = self.slot_positions(rings, "ring setting")?;
		for (rotor, posn) in self.rotors[1..].iter_mut().zip(posns) {
			rotor.set_ring(posn)?;
		}
		debug!(rings, "rings set");
		Ok(())
	}

	fn slot_positions(&self, setting: &str, what: &str) -> Result<Vec<usize>> {
		if self.rotors.is_empty() {
			return config_err!("no rotors inserted");
		}
		let len = setting.chars().count();
		if len != self.num_rotors - 1 {
			return config_err!(
				"{} {:?} has {} characters, expected {}",
				what,
				setting,
				len,
				self.num_rotors - 1
			);
		}
		setting.chars().map(|c| self.alphabet.to_int(c)).collect()
	}

	pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<()> {
		if plugboard.alphabet() != &self.alphabet {
			return config_err!("plugboard is wired over a different alphabet");
		}
		debug!(%plugboard, "plugboard set");
		self.plugboard = plugboard;
		Ok(())
	}

	/// Current settings of slots `1..num_rotors` as alphabet characters.
	pub fn settings(&self) -> String {
		self.rotors
			.iter()
			.skip(1)
			.filter_map(|r| self.alphabet.to_char(r.setting()).ok())
			.collect()
	}

	/// Steps the rotors, then returns the encoding of index `c`.
	pub fn convert(&mut self, c: usize) -> Result<usize> {
		if self.rotors.is_empty() {
			return config_err!("no rotors inserted");
		}
		if c >= self.alphabet.size() {
			return Err(EnigmaError::Range {
				index: c as isize,
				size: self.alphabet.size(),
			});
		}

		self.advance_rotors();

		let mut c = self.plugboard.permute(c as isize);
		for rotor in self.rotors.iter().rev() {
			c = rotor.convert_forward(c);
		}
		for rotor in &self.rotors[1..] {
			c = rotor.convert_backward(c);
		}
		Ok(self.plugboard.permute(c as isize))
	}

	/// The rightmost rotor always steps. A rotor sitting at a notch steps
	/// together with its left neighbour when that neighbour rotates, which
	/// gives the double step. All decisions read the settings from before
	/// this keystroke.
	fn advance_rotors(&mut self) {
		let last = self.rotors.len() - 1;
		let mut step = vec![false; self.rotors.len()];
		step[last] = true;
		for i in (1..=last).rev() {
			if self.rotors[i].at_notch() && self.rotors[i - 1].rotates() {
				step[i] = true;
				step[i - 1] = true;
			}
		}

		for (rotor, &s) in self.rotors.iter_mut().zip(&step) {
			if s {
				rotor.advance();
			}
		}
		trace!(settings = %self.settings(), "advanced");
	}

	/// Encodes `msg`, ignoring spaces. Every character is checked against the
	/// alphabet before the first one is converted, so a bad message leaves
	/// the rotors where they were.
	pub fn convert_msg(&mut self, msg: &str) -> Result<String> {
		let input = msg
			.chars()
			.filter(|&c| c != ' ')
			.map(|c| self.alphabet.to_int(c))
			.collect::<Result<Vec<_>>>()?;

		let mut out = String::with_capacity(input.len());
		for c in input {
			let e = self.convert(c)?;
			out.push(self.alphabet.to_char(e)?);
		}
		Ok(out)
	}
}
