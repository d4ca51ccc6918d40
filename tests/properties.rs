//! Property-based tests for permutations, rotors and whole machines.

use proptest::prelude::*;
use proptest::sample::subsequence;

use enigma::alphabet::UPPER_CASE;
use enigma::{historical, Alphabet, Machine, Permutation, Rotor};

const MOVING: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];

fn shuffled_alphabet() -> impl Strategy<Value = String> {
	Just(UPPER_CASE.chars().collect::<Vec<_>>())
		.prop_shuffle()
		.prop_map(|chars| chars.into_iter().collect())
}

/// Up to 13 disjoint letter pairs, in cycle form.
fn plug_pairs() -> impl Strategy<Value = Vec<String>> {
	(shuffled_alphabet(), 0usize..=13).prop_map(|(letters, n)| {
		let letters: Vec<char> = letters.chars().collect();
		letters.chunks(2).take(n).map(|pair| pair.iter().collect()).collect()
	})
}

fn keyed_m3(reflector: &str, rotors: &[&str], setting: &str, rings: &str, plugs: &[String]) -> Machine {
	let mut machine = historical::m3().unwrap();
	let mut names = vec![reflector];
	names.extend_from_slice(rotors);
	machine.insert_rotors(&names).unwrap();
	machine.set_rotors(setting).unwrap();
	machine.set_rings(rings).unwrap();
	let plugboard = Permutation::new(&Alphabet::default(), plugs).unwrap();
	machine.set_plugboard(plugboard).unwrap();
	machine
}

proptest! {
	#[test]
	fn permutation_inverts_both_ways(wiring in shuffled_alphabet(), i in -100isize..100) {
		let p = Permutation::from_wiring(&Alphabet::default(), &wiring).unwrap();
		let i_wrapped = p.wrap(i);
		prop_assert_eq!(p.invert(p.permute(i) as isize), i_wrapped);
		prop_assert_eq!(p.permute(p.invert(i) as isize), i_wrapped);
	}

	#[test]
	fn cycle_notation_round_trips(wiring in shuffled_alphabet()) {
		let alpha = Alphabet::default();
		let p = Permutation::from_wiring(&alpha, &wiring).unwrap();
		let cycles: Vec<String> = p
			.to_string()
			.split_whitespace()
			.map(|c| c.trim_matches(|ch: char| ch == '(' || ch == ')').to_string())
			.collect();
		prop_assert_eq!(Permutation::new(&alpha, &cycles).unwrap(), p);
	}

	#[test]
	fn rotor_backward_undoes_forward(
		wiring in shuffled_alphabet(),
		setting in 0usize..26,
		ring in 0usize..26,
		p in 0usize..26,
	) {
		let perm = Permutation::from_wiring(&Alphabet::default(), &wiring).unwrap();
		let mut rotor = Rotor::moving("X", perm, "A").unwrap();
		rotor.set(setting).unwrap();
		rotor.set_ring(ring).unwrap();
		prop_assert_eq!(rotor.convert_backward(rotor.convert_forward(p)), p);
	}

	#[test]
	fn machine_is_reciprocal(
		rotors in subsequence(MOVING.to_vec(), 3).prop_shuffle(),
		wide_c in any::<bool>(),
		setting in "[A-Z]{3}",
		rings in "[A-Z]{3}",
		plugs in plug_pairs(),
		msg in "[A-Z]{0,120}",
	) {
		let reflector = if wide_c { "C-WIDE" } else { "B-WIDE" };
		let mut encoder = keyed_m3(reflector, &rotors, &setting, &rings, &plugs);
		let mut decoder = keyed_m3(reflector, &rotors, &setting, &rings, &plugs);

		let cipher = encoder.convert_msg(&msg).unwrap();
		prop_assert_eq!(cipher.len(), msg.len());
		prop_assert_eq!(decoder.convert_msg(&cipher).unwrap(), msg);
		prop_assert_eq!(encoder.settings(), decoder.settings());
	}

	#[test]
	fn no_letter_encrypts_to_itself(
		rotors in subsequence(MOVING.to_vec(), 3).prop_shuffle(),
		setting in "[A-Z]{3}",
		msg in "[A-Z]{1,60}",
	) {
		let mut machine = keyed_m3("B-WIDE", &rotors, &setting, "AAA", &[]);
		let cipher = machine.convert_msg(&msg).unwrap();
		for (m, c) in msg.chars().zip(cipher.chars()) {
			prop_assert_ne!(m, c);
		}
	}
}
