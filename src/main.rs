use clap::Parser;
use fotableau::report::{self, Mode};
use fotableau::{ReportResult, TableauConfig, MAX_CONSTANTS};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fotableau")]
#[command(about = "Classify formulas and decide their satisfiability by tableau")]
#[command(version)]
struct Cli {
	/// Input file: a mode header line, then one formula per line
	#[arg(default_value = "input.txt")]
	input: PathBuf,

	/// Print classification sentences (overrides the header)
	#[arg(long)]
	parse: bool,

	/// Print satisfiability sentences (overrides the header)
	#[arg(long)]
	sat: bool,

	/// Number of constants quantifier rules may introduce
	#[arg(long, default_value_t = MAX_CONSTANTS)]
	max_constants: usize,

	/// Give up with "may or may not be satisfiable" after this many rule applications
	#[arg(long)]
	max_expansions: Option<usize>,
}

fn run(cli: &Cli) -> ReportResult<()> {
	let mode = if cli.parse || cli.sat {
		Some(Mode {
			parse: cli.parse,
			sat: cli.sat,
		})
	} else {
		None
	};
	let config = TableauConfig {
		max_constants: cli.max_constants,
		max_expansions: cli.max_expansions,
	};
	let input = BufReader::new(File::open(&cli.input)?);
	let stdout = io::stdout();
	let mut output = stdout.lock();
	report::run(input, &mut output, mode, &config)
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_target(false)
		.with_writer(io::stderr)
		.init();

	let cli = Cli::parse();
	if let Err(err) = run(&cli) {
		eprintln!("fotableau: {}: {}", cli.input.display(), err);
		std::process::exit(1);
	}
}
