//! Wiring of the service machines, Army/Air Force M3 and Navy M4.
//!
//! Each table row is the image of `A..Z` at the zero setting, followed by
//! the notch letters (steps at: q, e, v, j, z for I-V).

use crate::alphabet::Alphabet;
use crate::error::Result;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

const MOVING: [(&str, &str, &str); 8] = [
	("I",    "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "Q"),
	("II",   "AJDKSIRUXBLHWTMCQGZNPYFVOE", "E"),
	("III",  "BDFHJLCPRTXVZNYEIWGAKMUSQO", "V"),
	("IV",   "ESOVPZJAYQUIRHXLNFTGKDCMWB", "J"),
	("V",    "VZBRGITYUPSDNHLXAWMJQOFECK", "Z"),
	("VI",   "JPGVOUMFYQBENHZRDKASXLICTW", "ZM"),
	("VII",  "NZJHGRCXMYSWBOUFAIVLPEKQDT", "ZM"),
	("VIII", "FKQHTLXOCBJSPDZRAMEWNIUYGV", "ZM"),
];

/* M4 fourth-slot wheels, never stepped */
const FIXED: [(&str, &str); 2] = [
	("Beta",  "LEYJVCNIXWPBQMDRTAKZGFUHOS"),
	("Gamma", "FSOKANUERHMBTIYCWLQPZXVGJD"),
];

/* B and C are the thin M4 reflectors, *-WIDE the M3 ones */
const REFLECTORS: [(&str, &str); 4] = [
	("B",      "ENKQAUYWJICOPBLMDXZVFTHRGS"),
	("C",      "RDOBJNTKVEHMLFCWZAXGYIPSUQ"),
	("B-WIDE", "YRUHQSLDPXNGOKMIEBFZCWVJAT"),
	("C-WIDE", "FVPJIAOYEDRZXWGCTKUQSBNMHL"),
];

/// Every historical rotor, over the upper-case alphabet.
pub fn catalog() -> Result<Vec<Rotor>> {
	let alpha = Alphabet::default();
	let mut rotors = Vec::with_capacity(MOVING.len() + FIXED.len() + REFLECTORS.len());

	for (name, wiring, notches) in MOVING {
		rotors.push(Rotor::moving(name, Permutation::from_wiring(&alpha, wiring)?, notches)?);
	}
	for (name, wiring) in FIXED {
		rotors.push(Rotor::fixed(name, Permutation::from_wiring(&alpha, wiring)?));
	}
	for (name, wiring) in REFLECTORS {
		rotors.push(Rotor::reflector(name, Permutation::from_wiring(&alpha, wiring)?));
	}

	Ok(rotors)
}

/// Reflector plus three moving rotors.
pub fn m3() -> Result<Machine> {
	Machine::new(Alphabet::default(), 4, 3, catalog()?)
}

/// Thin reflector, a fixed Beta/Gamma wheel, then three moving rotors.
pub fn m4() -> Result<Machine> {
	Machine::new(Alphabet::default(), 5, 3, catalog()?)
}
