use clap::Parser;
use serde::{Deserialize, Serialize};
use std::{
	fs,
	io::{self, BufWriter, Write},
	path::PathBuf,
	process::ExitCode,
	str::FromStr,
};
use tabrdf_core::{Namespaces, Pattern, Term, Translator};
use tabrdf_inference::{Classifier, Interpretation, Options, RoleKind};
use yansi::Paint;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Query file (RON), giving the namespaces and the pattern to classify.
	input: PathBuf,

	/// Turn debugging information on.
	#[arg(short, long = "verbose", action = clap::ArgAction::Count)]
	verbosity: u8,

	/// Output file path.
	#[arg(short, long)]
	output: Option<PathBuf>,

	#[arg(short, long, default_value = "text")]
	format: Format,

	/// Maximum number of propagation passes.
	#[arg(long)]
	max_passes: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown format `{0}`")]
struct UnknownFormat(String);

#[derive(Debug, Clone, Copy)]
enum Format {
	Text,
	Ron,
}

impl FromStr for Format {
	type Err = UnknownFormat;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"text" => Ok(Self::Text),
			"ron" => Ok(Self::Ron),
			other => Err(UnknownFormat(other.to_owned())),
		}
	}
}

/// Query file.
#[derive(Deserialize)]
struct Query {
	#[serde(default)]
	namespaces: Namespaces,

	#[serde(default)]
	options: Options,

	pattern: Pattern,
}

#[derive(Debug, thiserror::Error)]
enum Error {
	#[error(transparent)]
	IO(#[from] io::Error),

	#[error("invalid query file: {0}")]
	Parsing(#[from] ron::error::SpannedError),

	#[error("unable to serialize report: {0}")]
	Serialization(#[from] ron::Error),
}

fn main() -> ExitCode {
	let args = Args::parse();

	stderrlog::new()
		.verbosity(args.verbosity as usize)
		.init()
		.expect("unable to initialize logger");

	match run(args) {
		Ok(code) => code,
		Err(e) => {
			log::error!("{e}");
			ExitCode::FAILURE
		}
	}
}

fn run(args: Args) -> Result<ExitCode, Error> {
	let content = fs::read_to_string(&args.input)?;
	let mut query: Query = ron::from_str(&content)?;

	if args.max_passes.is_some() {
		query.options.max_passes = args.max_passes
	}

	let translator = Translator::new(query.namespaces);
	let classifier = Classifier::with_options(&translator, query.options);

	match classifier.classify(&query.pattern) {
		Ok(interpretation) => {
			let output = match args.output {
				Some(path) => Output::File(BufWriter::new(fs::File::create(path)?)),
				None => Output::StdOut(BufWriter::new(io::stdout().lock())),
			};

			produce_output(&translator, &interpretation, args.format, output)?;
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!(
				"{}: {}",
				Paint::red("error").bold(),
				Paint::new("pattern cannot be evaluated on the tabular resource").bold()
			);
			eprintln!();
			eprintln!("\t{e}");

			if let Some(term) = e.term() {
				for triple in query.pattern.iter().filter(|t| {
					t.0 == *term || t.1 == *term || t.2 == *term
				}) {
					eprintln!("\tin {} {} {} .", triple.0, triple.1, triple.2);
				}
			}

			Ok(ExitCode::FAILURE)
		}
	}
}

pub enum Output {
	File(BufWriter<fs::File>),
	StdOut(BufWriter<io::StdoutLock<'static>>),
}

impl Write for Output {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		match self {
			Self::File(f) => f.write(buf),
			Self::StdOut(s) => s.write(buf),
		}
	}

	fn flush(&mut self) -> io::Result<()> {
		match self {
			Self::File(f) => f.flush(),
			Self::StdOut(s) => s.flush(),
		}
	}
}

/// Classified term, as reported.
#[derive(Serialize)]
struct Entry<'a> {
	term: &'a Term,
	role: RoleKind,

	#[serde(skip_serializing_if = "Vec::is_empty")]
	joined: Vec<RoleKind>,

	#[serde(skip_serializing_if = "Option::is_none")]
	native: Option<String>,
}

fn produce_output(
	translator: &Translator,
	interpretation: &Interpretation,
	format: Format,
	mut output: Output,
) -> Result<(), Error> {
	let entries: Vec<_> = interpretation
		.iter()
		.map(|(term, role)| Entry {
			term,
			role: role.kind(),
			joined: role
				.as_join()
				.map(|join| join.constituents().iter().collect())
				.unwrap_or_default(),
			native: interpretation
				.native(translator, term)
				.map(|e| e.to_string()),
		})
		.collect();

	match format {
		Format::Text => {
			for entry in &entries {
				write!(output, "{}\t{}", entry.term, entry.role)?;

				if !entry.joined.is_empty() {
					let joined: Vec<_> = entry.joined.iter().map(RoleKind::as_str).collect();
					write!(output, " (join of {})", joined.join(", "))?;
				}

				if let Some(native) = &entry.native {
					write!(output, "\t{native}")?;
				}

				writeln!(output)?;
			}
		}
		Format::Ron => {
			let report = ron::ser::to_string_pretty(&entries, ron::ser::PrettyConfig::default())?;
			writeln!(output, "{report}")?;
		}
	}

	output.flush()?;
	Ok(())
}
