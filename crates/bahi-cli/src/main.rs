// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod messaging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use bahi_app::{AppState, Composer, Theme};
use bahi_db::Store;
use config::Config;
use messaging::SystemSurface;
use runtime::DbRuntime;
use std::env;
use std::path::{Path, PathBuf};
use time::UtcOffset;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `bahi --print-example-config` for a template",
            options.config_path.display()
        )
    })?;

    let db_path = if options.demo {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    if options.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    // Must run before any thread exists, including the log writer.
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let _log_guard = init_logging(&log_dir()?)?;
    info!(db = %db_path.display(), demo = options.demo, "bahi starting");

    let store = Store::open(&db_path).with_context(|| {
        format!(
            "open database {} -- if this path is wrong, set [storage].db_path or BAHI_DB_PATH",
            db_path.display()
        )
    })?;
    store.bootstrap()?;
    if options.demo {
        store.seed_demo_bills()?;
    }
    if options.check_only {
        return Ok(());
    }

    let theme = startup_theme(&store, &config);
    let mut state = AppState::with_theme(theme);

    let composer = Composer::new(config.shop_name(), config.owner_contact(), offset);
    let mut runtime = DbRuntime::new(
        &store,
        composer,
        config.platform(),
        offset,
        SystemSurface::stdout(),
    );
    bahi_tui::run_app(&mut state, &mut runtime)
}

/// A saved toggle wins over `[ui] theme`; an unreadable slot counts as unsaved.
fn startup_theme(store: &Store, config: &Config) -> Theme {
    match store.persisted_theme() {
        Ok(Some(theme)) => theme,
        Ok(None) => config.theme(),
        Err(error) => {
            warn!(error = %format!("{error:#}"), "theme slot unreadable; using config theme");
            config.theme()
        }
    }
}

fn log_dir() -> Result<PathBuf> {
    if let Some(path) = env::var_os("BAHI_LOG_DIR") {
        return Ok(PathBuf::from(path));
    }
    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set BAHI_LOG_DIR to a writable directory")
    })?;
    Ok(data_root.join(bahi_db::APP_NAME).join("logs"))
}

/// The terminal belongs to the UI, so logs go to a daily file.
fn init_logging(logs_dir: &Path) -> Result<WorkerGuard> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("create log directory {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, "bahi.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,bahi=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .context("install log subscriber")?;

    Ok(guard)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_db_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        ..CliOptions::default()
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => options.print_config_path = true,
            "--print-path" => options.print_db_path = true,
            "--print-example-config" => options.print_example = true,
            "--demo" => options.demo = true,
            "--check" => options.check_only = true,
            "--help" | "-h" => options.show_help = true,
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("bahi - unpaid bill tracker");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-path             Print resolved database path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch with sample bills (in-memory)");
    println!("  --check                  Validate config and database, then exit");
    println!("  --help                   Show this help");
}
