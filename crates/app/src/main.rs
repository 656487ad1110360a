use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use mathgen_core::model::{AiSettings, AiSettingsError, Difficulty, ProgressSnapshot};
use services::config::ai_settings_from_lookup;
use services::{AppServices, Clock, PracticeService, ProgressService};
use storage::{DEFAULT_EXPIRY, Storage};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://mathgen.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidExpiryHours { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidExpiryHours { raw } => {
                write!(f, "invalid --expiry-hours value: {raw} (expected a positive integer)")
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

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn generation_enabled(&self) -> bool {
        self.services.generation_enabled()
    }

    fn practice(&self) -> Arc<PracticeService> {
        self.services.practice()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StorageTarget {
    Sqlite(String),
    Memory,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    storage: StorageTarget,
    expiry: Duration,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  mathgen ui    [--db <sqlite_url>] [--memory] [--expiry-hours <n>]");
    eprintln!("  mathgen stats [--db <sqlite_url>] [--expiry-hours <n>]");
    eprintln!("  mathgen reset [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --expiry-hours {}", DEFAULT_EXPIRY.num_hours());
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MATHGEN_DB_URL, MATHGEN_EXPIRY_HOURS, RUST_LOG");
    eprintln!("  MATHGEN_AI_API_KEY (or GOOGLE_API_KEY), MATHGEN_AI_BASE_URL,");
    eprintln!("  MATHGEN_AI_PROBLEM_MODEL, MATHGEN_AI_FEEDBACK_MODEL, MATHGEN_AI_TIMEOUT_SECS");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Stats,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "stats" => Some(Self::Stats),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Only the desktop UI talks to the model; `stats` and `reset` ignore the AI
/// environment and run with defaults.
fn ai_settings_for(
    cmd: Command,
    env: impl Fn(&str) -> Option<String>,
) -> Result<AiSettings, AiSettingsError> {
    match cmd {
        Command::Ui => ai_settings_from_lookup(env),
        Command::Stats | Command::Reset => Ok(AiSettings::default()),
    }
}

fn parse_expiry_hours(raw: String) -> Result<Duration, ArgsError> {
    match raw.trim().parse::<i64>() {
        Ok(hours) if hours > 0 => Ok(Duration::hours(hours)),
        _ => Err(ArgsError::InvalidExpiryHours { raw }),
    }
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut storage = StorageTarget::Sqlite(
            env("MATHGEN_DB_URL")
                .filter(|value| !value.trim().is_empty())
                .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url),
        );
        let mut expiry = match env("MATHGEN_EXPIRY_HOURS") {
            Some(raw) => parse_expiry_hours(raw)?,
            None => DEFAULT_EXPIRY,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    storage = StorageTarget::Sqlite(normalize_sqlite_url(value));
                }
                "--memory" => storage = StorageTarget::Memory,
                "--expiry-hours" => {
                    expiry = parse_expiry_hours(require_value(args, "--expiry-hours")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { storage, expiry })
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

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (e.g. under a test harness) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_stats(snapshot: &ProgressSnapshot) {
    let scores = &snapshot.scores;
    println!("History entries: {}", snapshot.history.len());
    println!(
        "Overall: {}/{} correct ({}%)",
        scores.correct(),
        scores.total(),
        scores.accuracy()
    );
    for difficulty in Difficulty::ALL {
        let tier = scores.tier(difficulty);
        println!(
            "  {:<6} {}/{} ({}%)",
            difficulty.label(),
            tier.correct,
            tier.total,
            tier.accuracy()
        );
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, |name| std::env::var(name).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    let storage = match &parsed.storage {
        StorageTarget::Sqlite(db_url) => {
            prepare_sqlite_file(db_url)?;
            tracing::info!(db_url = %db_url, "opening progress store");
            Storage::sqlite(db_url).await?
        }
        StorageTarget::Memory => {
            tracing::info!("using in-memory progress store");
            Storage::in_memory()
        }
    };

    let settings = ai_settings_for(cmd, |name| std::env::var(name).ok())?;
    let clock = Clock::default_clock();
    let services = AppServices::with_storage(&storage, clock, parsed.expiry, &settings).await?;

    match cmd {
        Command::Ui => {
            if !services.generation_enabled() {
                tracing::warn!("no API key configured; problem generation is disabled");
            }
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Math Problem Generator")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Stats => {
            print_stats(&services.progress().snapshot().await);
            Ok(())
        }
        Command::Reset => {
            services.progress().clear().await;
            println!("Progress cleared.");
            Ok(())
        }
    }
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

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut iter = args.iter().map(|arg| (*arg).to_string());
        Args::parse(&mut iter, move |name: &str| {
            env.iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        })
    }

    #[test]
    fn defaults_to_sqlite_file_and_twelve_hours() {
        let args = parse(&[], &[]).unwrap();
        assert_eq!(args.storage, StorageTarget::Sqlite(DEFAULT_DB_URL.to_string()));
        assert_eq!(args.expiry, Duration::hours(12));
    }

    #[test]
    fn flags_override_environment() {
        let args = parse(
            &["--db", "sqlite:///tmp/other.db", "--expiry-hours", "2"],
            &[("MATHGEN_DB_URL", "sqlite:///tmp/env.db"), ("MATHGEN_EXPIRY_HOURS", "5")],
        )
        .unwrap();
        assert_eq!(
            args.storage,
            StorageTarget::Sqlite("sqlite:///tmp/other.db".to_string())
        );
        assert_eq!(args.expiry, Duration::hours(2));

        let args = parse(&["--memory"], &[("MATHGEN_DB_URL", "sqlite:///tmp/env.db")]).unwrap();
        assert_eq!(args.storage, StorageTarget::Memory);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse(&["--expiry-hours", "0"], &[]),
            Err(ArgsError::InvalidExpiryHours { .. })
        ));
        assert!(matches!(
            parse(&[], &[("MATHGEN_EXPIRY_HOURS", "soon")]),
            Err(ArgsError::InvalidExpiryHours { .. })
        ));
        assert!(matches!(
            parse(&["--db"], &[]),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
        assert!(matches!(
            parse(&["--db", "  "], &[]),
            Err(ArgsError::InvalidDbUrl { .. })
        ));
        assert!(matches!(parse(&["--bogus"], &[]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn only_the_ui_reads_ai_settings() {
        let env = |name: &str| (name == "MATHGEN_AI_BASE_URL").then(|| "not a url".to_string());

        assert!(ai_settings_for(Command::Ui, env).is_err());
        for cmd in [Command::Stats, Command::Reset] {
            let settings = ai_settings_for(cmd, env).unwrap();
            assert_eq!(settings.base_url(), AiSettings::default().base_url());
        }
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("sqlite:data/progress.db".to_string());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/progress.db"), "{url}");
        assert_eq!(
            normalize_sqlite_url("sqlite::memory:".to_string()),
            "sqlite::memory:"
        );
    }
}
