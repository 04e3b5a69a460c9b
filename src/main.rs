mod config;
mod data_store;
mod errors;
mod models;
mod render;
mod storage;
mod theme;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::storage::open_store;
use crate::ui::{App, render};

/// 终端界面占用 stdout，日志写入数据目录下的文件
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let log_file = config.log_path().and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    match log_file {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
            .init(),
    }
}

fn main() -> io::Result<()> {
    let mut config = Config::from_env();
    let dir_result = config.ensure_data_dir();
    init_logging(&config);

    tracing::info!("Starting prompt organizer");
    if let Err(err) = dir_result {
        tracing::warn!("Cannot create data directory {err}; falling back to memory storage");
        eprintln!("prompt-organizer: cannot create data directory {err}; nothing will be saved");
    }

    // 每次打开都从存储重新加载
    let store = open_store(&config);
    let mut app = App::new(store);
    app.load_data();
    app.load_theme();

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!("Popup closed");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press && ui::handle_key_event(app, key.code) {
                break;
            }
        }
    }
    Ok(())
}
