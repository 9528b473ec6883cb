mod input;
mod render;
mod terminal;

use std::fmt;
use std::path::PathBuf;

use services::{AppServices, AssessmentConfig, Clock, ParseSinkError, SinkKind};
use storage::sqlite::SqliteRepository;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidLimit { raw: String },
    InvalidSink(ParseSinkError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
            ArgsError::InvalidSink(err) => write!(f, "invalid --sink value: {err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- take    [--db <sqlite_url>] [--bank <path>] [--sink <kind>] [-v]");
    eprintln!("  cargo run -p app -- history [--db <sqlite_url>] [--limit <n>] [-v]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://results.sqlite3");
    eprintln!("  --sink sqlite   (sqlite | sheet | none)");
    eprintln!("  --limit 20");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STYLE_DB_URL, STYLE_BANK_PATH, STYLE_SINK,");
    eprintln!("  STYLE_SHEET_WEBHOOK_URL, STYLE_SHEET_TOKEN, STYLE_SHEET_NAME, STYLE_SHEET_WORKSHEET,");
    eprintln!("  STYLE_PERSIST_TIMEOUT_MS, STYLE_ADVANCE_DELAY_MS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Take,
    History,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "take" => Some(Self::Take),
            "history" => Some(Self::History),
            _ => None,
        }
    }
}

/// Flag overrides, applied on top of the environment.
#[derive(Debug, Default)]
struct Args {
    db_url: Option<String>,
    bank_path: Option<PathBuf>,
    sink: Option<SinkKind>,
    limit: u32,
    verbose: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            limit: 20,
            ..Self::default()
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = Some(value);
                }
                "--bank" => {
                    parsed.bank_path = Some(PathBuf::from(require_value(args, "--bank")?));
                }
                "--sink" => {
                    let value = require_value(args, "--sink")?;
                    parsed.sink = Some(value.parse().map_err(ArgsError::InvalidSink)?);
                }
                "--limit" => {
                    let value = require_value(args, "--limit")?;
                    parsed.limit = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidLimit { raw: value.clone() })?;
                }
                "--verbose" | "-v" => parsed.verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn apply(&self, config: &mut AssessmentConfig) {
        if let Some(db_url) = &self.db_url {
            config.db_url.clone_from(db_url);
        }
        if let Some(path) = &self.bank_path {
            config.bank_path = Some(path.clone());
        }
        if let Some(sink) = self.sink {
            config.sink = sink;
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Logs go to stderr so they never interleave with the quiz on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_memory_url(raw: &str) -> bool {
    raw == "sqlite::memory:" || raw.contains("mode=memory")
}

fn normalize_sqlite_url(raw: String) -> String {
    if is_memory_url(&raw) {
        return raw;
    }

    let trimmed = raw.trim();
    let path_str = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if is_memory_url(db_url) {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn take(config: AssessmentConfig) -> Result<(), Box<dyn std::error::Error>> {
    let services = AppServices::from_config(config, Clock::default_clock()).await?;
    let advance_delay = services.config().advance_delay;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    terminal::run_session(&services.session_loop(), stdin, &mut stdout, advance_delay).await?;
    Ok(())
}

async fn history(db_url: &str, limit: u32) -> Result<(), Box<dyn std::error::Error>> {
    let repo = SqliteRepository::connect(db_url).await?;
    repo.migrate().await?;

    let results = repo.list_results(limit).await?;
    if results.is_empty() {
        println!("No saved results.");
        return Ok(());
    }
    for stored in results {
        let record = &stored.record;
        println!(
            "#{:<4} {}  {:<24} Driver {:>6}  Analytical {:>6}  Amiable {:>6}  Expressive {:>6}",
            stored.id,
            record.timestamp,
            record.dominant_style,
            record.scores.driver,
            record.scores.analytical,
            record.scores.amiable,
            record.scores.expressive,
        );
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Taking the assessment is the default when no subcommand is given.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Take,
        Some(first) if first.starts_with('-') => Command::Take,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    init_tracing(parsed.verbose);

    let mut config = AssessmentConfig::from_env();
    parsed.apply(&mut config);
    config.db_url = normalize_sqlite_url(config.db_url);

    match cmd {
        Command::Take => {
            if config.sink == SinkKind::Sqlite {
                // Open + migrate happens in AppServices; the file must exist first.
                prepare_sqlite_file(&config.db_url)?;
            }
            take(config).await
        }
        Command::History => {
            prepare_sqlite_file(&config.db_url)?;
            history(&config.db_url, parsed.limit).await
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
