//! Enigma simulator: reads a machine description, then converts each
//! message group of the input.
//!
//!     enigma <config> [input] [output]

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use enigma::{session, MachineConfig};

#[derive(Debug, Parser)]
#[command(name = "enigma", version, about = "Encrypt and decrypt messages on a rotor machine")]
struct Args {
	/// Machine description: alphabet, rotor and pawl counts, rotors
	config: PathBuf,

	/// Messages to convert, each group led by a `*` settings line [default: stdin]
	input: Option<PathBuf>,

	/// Where converted messages go [default: stdout]
	output: Option<PathBuf>,

	/// More log output on stderr (-v info, -vv debug, -vvv trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

macro_rules! unwrap {
	($res:expr) => (
		match $res {
			Ok(v) => v,
			Err(e) => {
				let _ = writeln!(io::stderr(), "Error: {:#}", e);
				std::process::exit(1);
			}
		}
	)
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.try_init();
}

fn run(args: &Args) -> anyhow::Result<()> {
	let text = fs::read_to_string(&args.config)
		.with_context(|| format!("could not open {}", args.config.display()))?;
	let mut machine = MachineConfig::parse(&text)?.into_machine()?;

	let output: Box<dyn Write> = match &args.output {
		Some(path) => Box::new(BufWriter::new(
			File::create(path).with_context(|| format!("could not open {}", path.display()))?,
		)),
		None => Box::new(io::stdout().lock()),
	};

	match &args.input {
		Some(path) => {
			let f = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
			session::process(&mut machine, BufReader::new(f), output)?;
		}
		None => session::process(&mut machine, io::stdin().lock(), output)?,
	}

	Ok(())
}

fn main() {
	let args = Args::parse();
	init_logging(args.verbose);
	unwrap!(run(&args));
}
