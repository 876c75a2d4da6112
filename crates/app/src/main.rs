use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use server::config::sqlite_url_for_path;
use server::{CorsPolicy, ServerConfig};
use services::Clock;
use storage::local::{FileStore, LocalStore};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_STORE_PATH: &str = "desk-state.json";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPort { raw: String },
    InvalidDbUrl { raw: String },
    InvalidStorePath { raw: String },
    Config(server::ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPort { raw } => write!(f, "invalid --port value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidStorePath { raw } => write!(f, "invalid --store value: {raw}"),
            ArgsError::Config(err) => write!(f, "{err}"),
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
    store: Arc<dyn LocalStore>,
    clock: Clock,
}

impl UiApp for DesktopApp {
    fn local_store(&self) -> Arc<dyn LocalStore> {
        Arc::clone(&self.store)
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--store <path>]");
    eprintln!("  cargo run -p app -- serve [--db <sqlite_url>] [--port <n>] [--cors <origins>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --store desk-state.json");
    eprintln!("  --db sqlite:desk.sqlite?mode=rwc");
    eprintln!("  --port 3000");
    eprintln!("  --cors *");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DESK_STORE_PATH, DESK_DB_URL, DB_PATH, PORT, CORS_ORIGINS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Serve,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "serve" => Some(Self::Serve),
            _ => None,
        }
    }
}

struct UiArgs {
    store_path: PathBuf,
}

impl UiArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut store_path = std::env::var("DESK_STORE_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--store" => {
                    let value = require_value(args, "--store")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidStorePath { raw: value });
                    }
                    store_path = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { store_path })
    }
}

fn parse_serve(args: &mut impl Iterator<Item = String>) -> Result<ServerConfig, ArgsError> {
    let mut config = ServerConfig::from_env().map_err(ArgsError::Config)?;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                config.db_url = sqlite_url_for_path(value.trim());
            }
            "--port" => {
                let value = require_value(args, "--port")?;
                let port: u16 = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidPort { raw: value.clone() })?;
                config.addr.set_port(port);
            }
            "--cors" => {
                let value = require_value(args, "--cors")?;
                config.cors = CorsPolicy::parse(&value);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(config)
}

/// Create the parent directory of a file-backed `SQLite` URL.
fn prepare_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    let Some(rest) = db_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let path = rest.trim_start_matches("//");
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" || path.starts_with("file:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn launch_ui(args: UiArgs) {
    let store: Arc<dyn LocalStore> = Arc::new(FileStore::open(&args.store_path));
    tracing::info!(path = %args.store_path.display(), "opening desk");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        store,
        clock: Clock::default_clock(),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Exam Desk")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}

fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    prepare_sqlite_dir(&config.db_url)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(config))?;
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the desktop UI.
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

    let report = |e: ArgsError| {
        eprintln!("{e}");
        print_usage();
        e
    };

    let mut iter = argv.into_iter();
    match cmd {
        Command::Ui => {
            let args = UiArgs::parse(&mut iter).map_err(report)?;
            launch_ui(args);
            Ok(())
        }
        Command::Serve => {
            let config = parse_serve(&mut iter).map_err(report)?;
            run_server(config)
        }
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        tracing::error!(error = %err, "exiting");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
