//! Drives a machine over a stream of `*` settings lines and message lines.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{config_err, Result};
use crate::machine::Machine;

const GROUP: usize = 5;

/// Converts every message line of `input` and writes it to `output` in
/// groups of five. Each `*` line re-keys `machine` for the lines after it.
pub fn process<R: BufRead, W: Write>(machine: &mut Machine, input: R, mut output: W) -> Result<()> {
	let mut keyed = false;
	let mut converted = 0usize;

	for (number, line) in input.lines().enumerate() {
		let line = line?;
		if line.trim_start().starts_with('*') {
			Settings::parse(&line, machine.num_rotors())?.apply(machine)?;
			info!(line = number + 1, settings = %machine.settings(), "machine keyed");
			keyed = true;
			continue;
		}
		if !keyed {
			if line.trim().is_empty() {
				continue;
			}
			return config_err!("input must begin with a '*' settings line, got {:?}", line);
		}

		let msg = machine.convert_msg(&line)?;
		converted += msg.chars().count();
		writeln!(output, "{}", format_groups(&msg))?;
	}

	output.flush()?;
	debug!(converted, "input exhausted");
	Ok(())
}

/// `msg` split into groups of five characters separated by single spaces;
/// the last group may be shorter.
pub fn format_groups(msg: &str) -> String {
	let chars: Vec<char> = msg.chars().collect();
	chars
		.chunks(GROUP)
		.map(|group| group.iter().collect::<String>())
		.collect::<Vec<_>>()
		.join(" ")
}
