use std::fmt;
use std::io::Write;
use std::sync::Arc;

use services::{AssumeReachable, Clock, ConnectivityProbe, QuizLibrary, QuizServices, TcpProbe};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod icons;
mod play;
mod render;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidProbe { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidProbe { raw } => {
                write!(f, "invalid --probe value (expected assume|tcp): {raw}")
            }
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
    eprintln!("  quiz [play] [--db <sqlite_url>] [--source <url>] [--probe <assume|tcp>]");
    eprintln!("  quiz list   [--db <sqlite_url>] [--source <url>] [--probe <assume|tcp>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:quiz.sqlite3");
    eprintln!("  --source <last successfully loaded source, or the public sample feed>");
    eprintln!("  --probe assume");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_SOURCE_URL, QUIZ_PROBE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    List,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeKind {
    Assume,
    Tcp,
}

impl ProbeKind {
    fn parse(raw: &str) -> Result<Self, ArgsError> {
        match raw.trim() {
            "assume" => Ok(Self::Assume),
            "tcp" => Ok(Self::Tcp),
            _ => Err(ArgsError::InvalidProbe {
                raw: raw.to_string(),
            }),
        }
    }

    fn build(self) -> Arc<dyn ConnectivityProbe> {
        match self {
            Self::Assume => Arc::new(AssumeReachable),
            Self::Tcp => Arc::new(TcpProbe::default()),
        }
    }
}

struct Args {
    db_url: String,
    source: Option<String>,
    probe: ProbeKind,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("quiz.sqlite3".into()), normalize_sqlite_url);
        let mut source = std::env::var("QUIZ_SOURCE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut probe = match std::env::var("QUIZ_PROBE") {
            Ok(value) => ProbeKind::parse(&value)?,
            Err(_) => ProbeKind::Assume,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--source" => {
                    source = Some(require_value(args, "--source")?);
                }
                "--probe" => {
                    let value = require_value(args, "--probe")?;
                    probe = ProbeKind::parse(&value)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            source,
            probe,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
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

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn begin_refresh(library: &mut QuizLibrary, source: Option<&str>) {
    match source {
        Some(source) => library.begin_refresh(source),
        None => library.begin_refresh_last_known(),
    }
}

/// Load categories, offering a manual retry for recoverable failures.
async fn load_with_retry<R>(
    library: &mut QuizLibrary,
    source: Option<&str>,
    input: &mut tokio::io::Lines<R>,
    interactive: bool,
) -> Result<bool, Box<dyn std::error::Error>>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    loop {
        begin_refresh(library, source);
        let err = match library.finish_refresh().await {
            Ok(_) => return Ok(true),
            Err(err) => err,
        };
        eprintln!("{}", render::load_error(&err));
        if !interactive || !err.is_retryable() {
            return Ok(false);
        }
        eprint!("Retry? [y/N] ");
        std::io::stderr().flush()?;
        let answer = input.next_line().await?.unwrap_or_default();
        if !answer.trim().eq_ignore_ascii_case("y") {
            return Ok(false);
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&parsed.db_url)?;
    let services =
        QuizServices::new_sqlite(&parsed.db_url, Clock::default_clock(), parsed.probe.build())
            .await?;
    tracing::debug!(db = %parsed.db_url, probe = ?parsed.probe, "services ready");

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();
    let mut library = services.library();

    let interactive = cmd == Command::Play;
    if !load_with_retry(&mut library, parsed.source.as_deref(), &mut input, interactive).await? {
        std::process::exit(1);
    }

    match cmd {
        Command::List => {
            play::list_categories(library.categories(), &mut stdout)?;
        }
        Command::Play => {
            let Some(category) =
                play::choose_category(library.categories(), &mut input, &mut stdout).await?
            else {
                return Ok(());
            };
            let mut session = services.start_session(category);
            play::run_session(&mut session, &mut input, &mut stdout).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(&mut args.iter().map(|s| (*s).to_string()))
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&[
            "--db",
            "sqlite::memory:",
            "--source",
            "https://example.com/q.json",
            "--probe",
            "tcp",
        ])
        .unwrap();
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.source.as_deref(), Some("https://example.com/q.json"));
        assert_eq!(args.probe, ProbeKind::Tcp);
    }

    #[test]
    fn rejects_unknown_probe_and_args() {
        assert!(matches!(
            parse(&["--probe", "ping"]),
            Err(ArgsError::InvalidProbe { .. })
        ));
        assert!(matches!(parse(&["--verbose"]), Err(ArgsError::UnknownArg(_))));
        assert!(matches!(
            parse(&["--source"]),
            Err(ArgsError::MissingValue { flag: "--source" })
        ));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/quiz.sqlite3".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/quiz.sqlite3"));
    }
}
