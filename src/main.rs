mod app;
mod cli;
mod ui;

use taskdeck::api::{HttpTaskService, TaskService};
use taskdeck::auth::{FileIdentityProvider, Session};
use taskdeck::board::{self, Filter, GroupBy};
use taskdeck::config::Config;
use taskdeck::store::TaskStore;
use taskdeck::task::{Priority, Status, TaskDraft};
use taskdeck::utils::paths::{get_credentials_path, get_crash_log_path, get_logs_dir};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Cli, Commands};
use std::fs;
use std::io::Write;
use std::panic;
use ui::theme::Theme;

/// Install a panic hook that writes crash information to a log file
fn install_crash_handler() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if let Ok(crash_log_path) = get_crash_log_path() {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut crash_report = format!("=== CRASH at {} ===\n", timestamp);

            if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            } else if let Some(message) = panic_info.payload().downcast_ref::<String>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            }

            if let Some(location) = panic_info.location() {
                crash_report.push_str(&format!(
                    "Location: {}:{}:{}\n",
                    location.file(),
                    location.line(),
                    location.column()
                ));
            }

            crash_report.push_str(&format!(
                "\nBacktrace:\n{}\n",
                std::backtrace::Backtrace::force_capture()
            ));
            crash_report.push('\n');

            if let Ok(mut file) = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log_path)
            {
                let _ = file.write_all(crash_report.as_bytes());
                eprintln!("\nCrash logged to: {}", crash_log_path.display());
            }
        }

        default_hook(panic_info);
    }));
}

/// Initialize file-based logging for the TUI mode.
///
/// Logs are written to ~/.taskdeck/logs/taskdeck.log
/// Use `tail -f ~/.taskdeck/logs/taskdeck.log` to follow logs.
///
/// Log level can be controlled with RUST_LOG env var (default: info).
fn init_file_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = match get_logs_dir() {
        Ok(dir) => dir,
        Err(_) => return None,
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "taskdeck.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(guard)
}

fn main() -> Result<()> {
    // Install crash handler first thing
    install_crash_handler();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Commands::Add {
            name,
            status,
            priority,
            due,
            description,
            image,
        }) => {
            handle_add(&config, name, status, priority, due, description, image)?;
        }
        Some(Commands::Show {
            group_by,
            search,
            status,
            priority,
            due,
            page,
        }) => {
            handle_show(&config, group_by, search, status, priority, due, page)?;
        }
        None => {
            // Guard must be kept alive for the duration of the app
            let _log_guard = init_file_logging();

            tracing::info!("taskdeck starting");

            let service = HttpTaskService::new(&config.api_url, config.request_timeout())?;
            let mut store = TaskStore::new(Box::new(service), config.history_limit);
            store.initialize();

            let session = Session::new(Box::new(FileIdentityProvider::new(
                get_credentials_path()?,
            )));
            let theme = Theme::from_config(&config);

            let state = app::AppState::new(
                store,
                session,
                theme,
                config.page_size,
                Local::now().date_naive(),
            );

            ui::run_tui(state)?;

            tracing::info!("taskdeck exiting gracefully");
        }
    }

    Ok(())
}

fn handle_add(
    config: &Config,
    name: String,
    status: Status,
    priority: Priority,
    due: Option<NaiveDate>,
    description: Option<String>,
    image: Option<String>,
) -> Result<()> {
    let draft = TaskDraft {
        name,
        status,
        priority,
        due_date: due.unwrap_or_else(|| Local::now().date_naive()),
        description,
        image,
    };
    draft.validate()?;

    let service = HttpTaskService::new(&config.api_url, config.request_timeout())?;
    let task = service.create(&draft)?;

    println!("✓ Task created (id {})", task.id);

    Ok(())
}

fn handle_show(
    config: &Config,
    group_by: GroupBy,
    search: Option<String>,
    status: Option<Status>,
    priority: Option<Priority>,
    due: Option<NaiveDate>,
    page: usize,
) -> Result<()> {
    let service = HttpTaskService::new(&config.api_url, config.request_timeout())?;
    let tasks = service.list()?;

    let filter = Filter {
        search,
        status,
        priority,
        due,
    };
    let filtered = board::filter_tasks(&tasks, &filter);
    let today = Local::now().date_naive();

    println!("\n📋 Task board - grouped by {}\n", group_by);

    for key in board::columns(group_by) {
        let in_column = board::column_tasks(&filtered, key, today);
        let page_slice = board::paginate(&in_column, page, config.page_size);

        println!("{} ({})", key.label(), in_column.len());
        if page_slice.is_empty() {
            println!("  (empty)");
        }
        for task in page_slice {
            println!(
                "  [{}] {}  {} · due {}",
                task.id, task.name, task.priority, task.due_date
            );
        }
        println!();
    }

    let counts = board::status_counts(&tasks);
    println!(
        "todo: {}  in_progress: {}  done: {}",
        counts.todo, counts.in_progress, counts.done
    );

    Ok(())
}
