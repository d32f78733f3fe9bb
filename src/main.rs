use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};

use stellar_blitz::{App, GameConfig, InputManager, TerminalSink};

const CONFIG_ENV: &str = "STELLAR_BLITZ_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "stellar-blitz.toml";
const LOG_FILE: &str = "stellar-blitz.log";

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    // Bad config fails here, before the terminal is touched
    let config = load_config()?;
    let app = App::new(config)?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    if !supports_keyboard_enhancement {
        log::warn!(
            "terminal does not report key releases: held keys last one frame \
             and holding Space fires again on every auto-repeat"
        );
    }

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let mut sink = TerminalSink::new(Terminal::new(CrosstermBackend::new(stdout))?);
    let mut input = InputManager::new(supports_keyboard_enhancement);

    let result = app.run(&mut input, &mut sink);

    // Cleanup
    let terminal = sink.terminal_mut();
    if supports_keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let summary = result?;
    println!("Final score: {}", summary.score);
    Ok(())
}

/// Logs go to a file: stdout belongs to the terminal UI.
fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("could not create {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Config path from the environment, else the default file if present, else
/// built-in defaults.
fn load_config() -> Result<GameConfig> {
    let path = match std::env::var_os(CONFIG_ENV) {
        Some(path) => Some(PathBuf::from(path)),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|path| path.exists()),
    };

    let Some(path) = path else {
        log::info!("no {DEFAULT_CONFIG_FILE} found, using default config");
        let config = GameConfig::default();
        config.validate()?;
        return Ok(config);
    };

    load_config_file(&path)
}

fn load_config_file(path: &Path) -> Result<GameConfig> {
    let config = GameConfig::load(path)
        .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}
