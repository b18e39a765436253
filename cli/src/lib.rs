use anyhow::{anyhow, Error, Result};
use clap::{Parser, Subcommand};
use log::info;
use reviewgraph::article::{articles_to_dataset, from_json_file};
use reviewgraph::canonical::{canonicalize, to_canonical_string};
use reviewgraph::config::Config;
use reviewgraph::report::{compare, ReportOutcome};
use reviewgraph::serializer::to_writer;
use reviewgraph::util::{read_path, write_dataset_to_file};
use reviewgraph::{Dataset, Prefixes};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "reviewgraph")]
#[command(about = "Format, canonicalize and compare RDF graphs of scholarly articles and reviews")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false", global = true)]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false", global = true)]
    debug: bool,
    /// JSON configuration file; built-in defaults are used when omitted
    #[clap(long, short, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse an RDF document (or a directory of them) and write it as Turtle
    Fmt {
        /// File or directory to read
        input: PathBuf,
        /// Output file; stdout when omitted
        #[clap(long, short)]
        output: Option<PathBuf>,
        /// Extra prefix declarations as prefix=iri
        #[clap(long = "prefix", short = 'p', num_args = 1..)]
        prefixes: Vec<String>,
    },
    /// Split shared blank nodes and print the canonical form
    Canonicalize {
        /// File or directory to read
        input: PathBuf,
    },
    /// Compare a validation report (or plain graph) with the expected one
    Compare {
        /// The expected report or graph
        expected: PathBuf,
        /// The report or graph to check
        actual: PathBuf,
    },
    /// Build article graphs from a JSON file of bibliographic records
    Article {
        /// JSON file with one record or an array of records
        fields: PathBuf,
        /// Output file; stdout when omitted
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration as JSON
    Config {
        /// Also write the configuration to this file
        #[clap(long)]
        save: Option<PathBuf>,
    },
    /// Print the version
    Version,
}

fn parse_prefix(value: &str) -> Result<(String, String)> {
    value
        .split_once('=')
        .map(|(p, iri)| (p.trim().to_string(), iri.trim().to_string()))
        .ok_or_else(|| anyhow!("Invalid prefix '{}', expected prefix=iri", value))
}

fn write_output(dataset: &Dataset, prefixes: &Prefixes, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => write_dataset_to_file(dataset, path, prefixes),
        None => {
            let stdout = std::io::stdout();
            to_writer(dataset, prefixes, stdout.lock())?;
            Ok(())
        }
    }
}

pub fn run() -> Result<()> {
    reviewgraph::init_logging();
    let cmd = Cli::parse();
    execute(cmd)
}

pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    reviewgraph::init_logging();
    let cmd = Cli::try_parse_from(args).map_err(Error::from)?;
    execute(cmd)
}

fn execute(cmd: Cli) -> Result<()> {
    // The RUST_LOG env var is set by `init_logging` if REVIEWGRAPH_LOG is present.
    // CLI flags for verbosity take precedence. If nothing is set, we default to "warn".
    if cmd.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if cmd.verbose {
        std::env::set_var("RUST_LOG", "info");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    let _ = env_logger::try_init();

    let config = match &cmd.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    match cmd.command {
        Commands::Fmt {
            input,
            output,
            prefixes,
        } => {
            let dataset = read_path(&input)?;
            let mut table = config.prefixes.clone();
            for value in &prefixes {
                let (prefix, iri) = parse_prefix(value)?;
                table.insert(prefix, iri);
            }
            info!("Formatting {} statements", dataset.len());
            write_output(&dataset, &table, output.as_deref())?;
        }
        Commands::Canonicalize { input } => {
            let dataset = read_path(&input)?;
            let canonical = canonicalize(&dataset, &config.structural_predicates)?;
            print!("{}", to_canonical_string(&canonical)?);
        }
        Commands::Compare { expected, actual } => {
            let expected = read_path(&expected)?;
            let actual = read_path(&actual)?;
            match compare(&actual, &expected, &config)? {
                ReportOutcome::Match => println!("{}", ReportOutcome::Match),
                outcome => {
                    let mut stdout = std::io::stdout().lock();
                    writeln!(stdout, "{}", outcome)?;
                    return Err(anyhow!("Comparison failed"));
                }
            }
        }
        Commands::Article { fields, output } => {
            let records = from_json_file(&fields)?;
            info!("Building {} article records", records.len());
            let dataset = articles_to_dataset(&records, &config)?;
            write_output(&dataset, &config.prefixes, output.as_deref())?;
        }
        Commands::Config { save } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if let Some(path) = save {
                config.save_to_file(&path)?;
            }
        }
        Commands::Version => {
            println!("reviewgraph {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
