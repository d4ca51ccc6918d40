//! Text formats: the machine description and the `*` settings line.
//!
//! A machine description is whitespace separated:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//! 5 3
//! I     MQ  (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! Beta  N   (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B     R   (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
//!           (RX) (SZ) (TV)
//! ```
//!
//! A settings line names the rotors, their setting, optionally their ring
//! setting, and the plugboard:
//!
//! ```text
//! * B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
//! ```

use std::iter::Peekable;
use std::str::SplitWhitespace;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::{config_err, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// Characters the file format reserves.
const RESERVED: [char; 3] = ['*', '(', ')'];

#[derive(Debug, Clone)]
pub struct MachineConfig {
	pub alphabet: Alphabet,
	pub num_rotors: usize,
	pub pawls: usize,
	pub rotors: Vec<Rotor>,
}

impl MachineConfig {
	pub fn parse(text: &str) -> Result<Self> {
		let mut tokens = text.split_whitespace().peekable();

		let Some(chars) = tokens.next() else {
			return config_err!("configuration is empty");
		};
		if chars.contains(RESERVED) {
			return config_err!("alphabet {:?} uses one of * ( )", chars);
		}
		let alphabet = Alphabet::new(chars)?;
		let num_rotors = parse_count(tokens.next(), "number of rotors")?;
		let pawls = parse_count(tokens.next(), "number of pawls")?;

		let mut rotors = Vec::new();
		while let Some(name) = tokens.next() {
			rotors.push(parse_rotor(name, &mut tokens, &alphabet)?);
		}
		debug!(%alphabet, num_rotors, pawls, rotors = rotors.len(), "configuration read");

		Ok(MachineConfig {
			alphabet,
			num_rotors,
			pawls,
			rotors,
		})
	}

	pub fn into_machine(self) -> Result<Machine> {
		Machine::new(self.alphabet, self.num_rotors, self.pawls, self.rotors)
	}
}

fn parse_count(token: Option<&str>, what: &str) -> Result<usize> {
	match token.map(str::parse::<usize>) {
		Some(Ok(n)) => Ok(n),
		Some(Err(_)) => config_err!("{} {:?} is not a number", what, token.unwrap_or_default()),
		None => config_err!("configuration truncated before {}", what),
	}
}

/// Reads one description: `name type (cycle)...`, leaving `tokens` at the
/// next rotor name.
fn parse_rotor(
	name: &str,
	tokens: &mut Peekable<SplitWhitespace<'_>>,
	alphabet: &Alphabet,
) -> Result<Rotor> {
	if name.starts_with('(') {
		return config_err!("cycle {} does not follow a rotor type", name);
	}
	let Some(kind) = tokens.next() else {
		return config_err!("bad rotor description: {} has no type", name);
	};

	let mut wiring = String::new();
	while let Some(cycle) = tokens.next_if(|t| t.starts_with('(')) {
		wiring.push_str(cycle);
	}
	let permutation = Permutation::new(alphabet, parse_cycles(&wiring)?)?;

	let mut kind_chars = kind.chars();
	let rotor = match (kind_chars.next(), kind_chars.as_str()) {
		(Some('M'), notches) => Rotor::moving(name, permutation, notches)?,
		(Some('N'), "") => Rotor::fixed(name, permutation),
		(Some('R'), "") => Rotor::reflector(name, permutation),
		_ => return config_err!("bad rotor description: {} has type {:?}", name, kind),
	};
	debug!(name, kind, "rotor described");
	Ok(rotor)
}

/// Splits cycle notation such as `"(AB) (CDE)(F)"` into `["AB", "CDE", "F"]`.
/// Whitespace between cycles is ignored.
pub fn parse_cycles(text: &str) -> Result<Vec<String>> {
	let mut cycles = Vec::new();
	let mut current: Option<String> = None;

	for c in text.chars().filter(|c| !c.is_whitespace()) {
		match c {
			'(' if current.is_some() => return config_err!("nested '(' in {:?}", text),
			'(' => current = Some(String::new()),
			')' => match current.take() {
				Some(cycle) => cycles.push(cycle),
				None => return config_err!("unmatched ')' in {:?}", text),
			},
			_ => match current.as_mut() {
				Some(cycle) => cycle.push(c),
				None => return config_err!("{:?} is outside any cycle in {:?}", c, text),
			},
		}
	}
	if current.is_some() {
		return config_err!("unclosed '(' in {:?}", text);
	}

	Ok(cycles)
}

/// One `*` line: which rotors go where and how they are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub rotors: Vec<String>,
	pub setting: String,
	pub rings: Option<String>,
	pub plugboard: Vec<String>,
}

impl Settings {
	pub fn parse(line: &str, num_rotors: usize) -> Result<Self> {
		let Some(rest) = line.trim_start().strip_prefix('*') else {
			return config_err!("settings line must start with '*': {:?}", line);
		};
		let mut tokens = rest.split_whitespace().peekable();

		let rotors: Vec<String> = tokens.by_ref().take(num_rotors).map(String::from).collect();
		if rotors.len() != num_rotors {
			return config_err!("settings line names {} rotors, expected {}", rotors.len(), num_rotors);
		}
		let Some(setting) = tokens.next_if(|t| !t.starts_with('(')) else {
			return config_err!("settings line has no rotor setting");
		};
		let rings = tokens.next_if(|t| !t.starts_with('(')).map(String::from);
		let plugboard = parse_cycles(&tokens.collect::<Vec<_>>().join(" "))?;

		Ok(Settings {
			rotors,
			setting: setting.to_string(),
			rings,
			plugboard,
		})
	}

	/// Re-keys `machine`: fresh rotors, settings, rings, then plugboard.
	/// On error `machine` keeps its previous key.
	pub fn apply(&self, machine: &mut Machine) -> Result<()> {
		let mut keyed = machine.clone();
		let plugboard = Permutation::new(keyed.alphabet(), &self.plugboard)?;
		keyed.insert_rotors(&self.rotors)?;
		keyed.set_rotors(&self.setting)?;
		if let Some(rings) = &self.rings {
			keyed.set_rings(rings)?;
		}
		keyed.set_plugboard(plugboard)?;
		*machine = keyed;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::EnigmaError;
	use crate::rotor::RotorKind;
	use pretty_assertions::assert_eq;
	use test_case::test_case;

	const SMALL: &str = "
		ABCD
		3 1
		R1 R (AB) (CD)
		F1 N (ABC)
		M1 MCD (AD)(BC)
		M2 MA
	";

	#[test]
	fn reads_machine_description() {
		let config = MachineConfig::parse(SMALL).unwrap();
		assert_eq!(config.alphabet.to_string(), "ABCD");
		assert_eq!(config.num_rotors, 3);
		assert_eq!(config.pawls, 1);

		let kinds: Vec<_> = config.rotors.iter().map(|r| (r.name(), r.kind().clone())).collect();
		assert_eq!(
			kinds,
			vec![
				("R1", RotorKind::Reflecting),
				("F1", RotorKind::Fixed),
				("M1", RotorKind::Moving { notches: vec![2, 3] }),
				("M2", RotorKind::Moving { notches: vec![0] }),
			]
		);
		assert_eq!(config.rotors[2].permutation().to_string(), "(AD) (BC)");
		assert_eq!(config.rotors[3].permutation().to_string(), "");

		let machine = config.into_machine().unwrap();
		assert_eq!(machine.available_rotors().len(), 4);
	}

	#[test_case("" ; "empty")]
	#[test_case("AB*C 3 1" ; "reserved character in alphabet")]
	#[test_case("ABCA 3 1" ; "repeated alphabet character")]
	#[test_case("ABCD three 1" ; "rotor count not a number")]
	#[test_case("ABCD 3" ; "missing pawls")]
	#[test_case("ABCD 3 1 R1" ; "rotor without type")]
	#[test_case("ABCD 3 1 R1 X (AB)" ; "unknown type")]
	#[test_case("ABCD 3 1 R1 RA (AB)" ; "reflector with notch")]
	#[test_case("ABCD 3 1 M1 MZ (AB)" ; "notch outside alphabet")]
	#[test_case("ABCD 3 1 R1 R (AB) (BC)" ; "character in two cycles")]
	#[test_case("ABCD 3 1 R1 R (AB" ; "unclosed cycle")]
	#[test_case("ABCD 3 1 (AB) R1 R" ; "cycle before rotor")]
	fn rejects_bad_descriptions(text: &str) {
		assert!(matches!(MachineConfig::parse(text), Err(EnigmaError::Configuration(_))));
	}

	#[test]
	fn duplicate_rotor_names_fail_at_build() {
		let config = MachineConfig::parse("ABCD 3 1 R1 R (AB) R1 R (CD)").unwrap();
		assert!(matches!(config.into_machine(), Err(EnigmaError::Configuration(_))));
	}

	#[test]
	fn cycles_ignore_spacing() {
		assert_eq!(parse_cycles(" (AB)(CDE)  (F) ").unwrap(), vec!["AB", "CDE", "F"]);
		assert_eq!(parse_cycles("").unwrap(), Vec::<String>::new());
		assert!(parse_cycles("(A(B))").is_err());
		assert!(parse_cycles("AB)").is_err());
		assert!(parse_cycles("(AB) C").is_err());
	}

	#[test]
	fn reads_settings_line() {
		let settings = Settings::parse("* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)", 5).unwrap();
		assert_eq!(
			settings,
			Settings {
				rotors: ["B", "Beta", "III", "IV", "I"].map(String::from).to_vec(),
				setting: "AXLE".into(),
				rings: None,
				plugboard: ["HQ", "EX", "IP", "TR", "BY"].map(String::from).to_vec(),
			}
		);
	}

	#[test]
	fn reads_ring_setting() {
		let settings = Settings::parse("*B-WIDE I II III AAA BBB", 4).unwrap();
		assert_eq!(settings.rings.as_deref(), Some("BBB"));
		assert!(settings.plugboard.is_empty());
	}

	#[test_case("B I II III AAA" ; "missing asterisk")]
	#[test_case("* B I II" ; "too few rotors")]
	#[test_case("* B I II III" ; "missing setting")]
	#[test_case("* B I II III AAA (AB" ; "unclosed plugboard cycle")]
	#[test_case("* B I II III AAA BBB CCC" ; "stray token")]
	fn rejects_bad_settings(line: &str) {
		assert!(matches!(Settings::parse(line, 4), Err(EnigmaError::Configuration(_))));
	}

	#[test]
	fn repeated_plugboard_letter_is_rejected() {
		let mut machine = crate::historical::m3().unwrap();
		let settings = Settings::parse("* B-WIDE I II III AAA (AB) (AC)", 4).unwrap();
		assert!(matches!(settings.apply(&mut machine), Err(EnigmaError::Configuration(_))));
	}

	#[test]
	fn failed_apply_keeps_previous_key() {
		let mut machine = crate::historical::m3().unwrap();
		Settings::parse("* B-WIDE I II III KDO (AB)", 4).unwrap().apply(&mut machine).unwrap();

		let bad = Settings::parse("* C-WIDE V II IV QQ", 4).unwrap();
		assert!(matches!(bad.apply(&mut machine), Err(EnigmaError::Configuration(_))));
		assert_eq!(machine.rotor(1).unwrap().name(), "I");
		assert_eq!(machine.settings(), "KDO");
		assert_eq!(machine.plugboard().to_string(), "(AB)");
	}

	#[test]
	fn applies_to_machine() {
		let mut machine = crate::historical::m4().unwrap();
		let settings = Settings::parse("* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)", 5).unwrap();
		settings.apply(&mut machine).unwrap();
		assert_eq!(machine.settings(), "AXLE");
		assert_eq!(machine.convert_msg("FROM HIS SHOULDER HIAWATHA").unwrap(), "QVPQSOKOILPUBKJZPISFXDW");
	}
}
