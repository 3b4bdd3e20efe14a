use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

use tomat::{
    app::{App, Flow},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    notify::NotificationMode,
    runtime::{CrosstermEventSource, FixedTicker, IntervalScheduler, PomoEvent, Runner},
};

/// minimal pomodoro timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A pomodoro timer for the terminal. Adjust focus and break durations while stopped, then start, pause and stop sessions from the keyboard."
)]
pub struct Cli {
    /// how to announce the end of a focus or break period
    #[clap(short = 'n', long, value_enum)]
    notify: Option<NotificationMode>,

    /// path to the config file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// path to the log file
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// write the effective preferences to the config file and exit
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Flags win over the config file
    fn effective_config(&self, loaded: Config) -> Config {
        Config {
            notification: self.notify.unwrap_or(loaded.notification),
            ..loaded
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = cli.config_store();
    let loaded = store.try_load();
    let config = cli.effective_config(loaded.as_ref().cloned().unwrap_or_default());

    if let Some(log_path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        // Logging is best effort; the timer works without it
        if let Err(err) = logging::init(&log_path, &config.log_level) {
            eprintln!("logging disabled: {err}");
        }
    }
    // Reported only now so the warning reaches the log file
    if let Err(err) = &loaded {
        tracing::warn!(path = %store.path().display(), %err, "ignoring config, using defaults");
    }

    if cli.save_config {
        store.save(&config)?;
        println!("saved config to {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    tracing::info!(notification = %config.notification, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(
        IntervalScheduler::default(),
        config.notification.notifier(),
    );
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<IntervalScheduler<FixedTicker>>,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let event = runner.step(app.pomodoro.scheduler_mut());
        let redraw = !matches!(event, PomoEvent::Idle);

        if app.handle_event(event) == Flow::Quit {
            tracing::info!("quitting");
            break;
        }

        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["tomat"]);
        assert_eq!(cli.notify, None);
        assert_eq!(cli.config, None);
        assert_eq!(cli.log_file, None);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_notify_values() {
        let cli = Cli::parse_from(["tomat", "-n", "desktop"]);
        assert_eq!(cli.notify, Some(NotificationMode::Desktop));

        let cli = Cli::parse_from(["tomat", "--notify", "none"]);
        assert_eq!(cli.notify, Some(NotificationMode::None));
    }

    #[test]
    fn test_cli_rejects_unknown_notify() {
        assert!(Cli::try_parse_from(["tomat", "--notify", "siren"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let cli = Cli::parse_from(["tomat", "--notify", "none"]);
        let loaded = Config {
            notification: NotificationMode::Desktop,
            log_level: "debug".into(),
        };
        let effective = cli.effective_config(loaded);
        assert_eq!(effective.notification, NotificationMode::None);
        assert_eq!(effective.log_level, "debug");
    }

    #[test]
    fn test_config_file_used_without_flag() {
        let cli = Cli::parse_from(["tomat"]);
        let loaded = Config {
            notification: NotificationMode::Desktop,
            log_level: "info".into(),
        };
        assert_eq!(
            cli.effective_config(loaded).notification,
            NotificationMode::Desktop
        );
    }

    #[test]
    fn test_config_path_flag() {
        let cli = Cli::parse_from(["tomat", "-c", "/tmp/tomat.json"]);
        assert_eq!(
            cli.config_store().path(),
            std::path::Path::new("/tmp/tomat.json")
        );
    }

    #[test]
    fn test_cli_command_is_valid() {
        Cli::command().debug_assert();
    }
}
