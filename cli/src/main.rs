use std::path::{Path, PathBuf};
use std::process::ExitCode;

use argchecker_loader::SchemaFile;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "ARGCHECK_LOG";

/// CLI output format for matched values.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argcheck")]
#[command(version, about = "Check argument vectors against declarative schemas")]
struct Cli {
    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check arguments given after `--` and print the matched values.
    Check(CheckArgs),
    /// Print the usage line synthesized from a schema file.
    Usage(UsageArgs),
    /// Lint one or more schema files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Schema file (.json, .yaml or .yml).
    #[arg(long)]
    schema: PathBuf,
    /// Program name for the usage line (overrides the schema file).
    #[arg(long)]
    name: Option<String>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to check.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Schema file (.json, .yaml or .yml).
    #[arg(long)]
    schema: PathBuf,
    /// Program name for the usage line (overrides the schema file).
    #[arg(long)]
    name: Option<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema files to lint.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

/// Why a command did not succeed.
#[derive(Debug)]
enum Failure {
    /// Schema loading, linting or output failed.
    Fatal(String),
    /// The checked arguments were rejected.
    Rejected { message: String, usage: String },
}

impl Failure {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Fatal(_) => 1,
            Self::Rejected { .. } => 2,
        }
    }

    fn report(&self) {
        match self {
            Self::Fatal(message) => eprintln!("error: {message}"),
            Self::Rejected { message, usage } => eprintln!("error: {message}\n{usage}"),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Usage(args) => run_usage(args),
        Command::Validate(args) => run_validate(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            failure.report();
            ExitCode::from(failure.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load(path: &Path) -> Result<SchemaFile, Failure> {
    SchemaFile::load(path)
        .map_err(|err| Failure::Fatal(format!("Failed to load '{}': {err}", path.display())))
}

fn run_check(args: CheckArgs) -> Result<(), Failure> {
    let file = load(&args.schema)?;
    let mut checker = file.to_checker(args.name.as_deref());

    if let Err(err) = checker.check(&args.args) {
        return Err(Failure::Rejected {
            message: err.to_string(),
            usage: checker.usage().to_string(),
        });
    }
    info!(
        schema = %args.schema.display(),
        matched = checker.matches().len(),
        "Arguments accepted"
    );

    let raw = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(checker.matches())
            .map_err(|err| Failure::Fatal(format!("Failed to serialize matches: {err}")))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(checker.matches())
            .map_err(|err| Failure::Fatal(format!("Failed to serialize matches: {err}")))?,
    };
    println!("{}", raw.trim_end());
    Ok(())
}

fn run_usage(args: UsageArgs) -> Result<(), Failure> {
    let file = load(&args.schema)?;
    println!("{}", file.to_checker(args.name.as_deref()).usage());
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), Failure> {
    let mut failures = Vec::new();
    let mut keys = 0usize;

    for path in &args.inputs {
        match SchemaFile::load_validated(path) {
            Ok(file) => keys += file.expect.len(),
            Err(err) => failures.push(err.to_string()),
        }
    }

    if !failures.is_empty() {
        return Err(Failure::Fatal(failures.join("\n")));
    }

    info!(files = args.inputs.len(), keys, "Schemas validated");
    println!(
        "Validated {} schema file(s) declaring {keys} key(s).",
        args.inputs.len()
    );
    Ok(())
}
