use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
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
    sync::mpsc::{self, Sender},
    time::Duration,
};

use tipsum::{
    app::{App, Settings},
    config::{Config, ConfigStore, FileConfigStore},
    content::Mode,
    runtime::{self, AppEvent, ChannelEventSource, FixedTicker, Runner, TICK_RATE_MS},
};

/// terminal typing practice against live web paragraphs and image captions
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Fetches a target text from the web (a filler-text paragraph, or a random image with a caption to type) and measures your speed and accuracy against it live."
)]
struct Cli {
    /// content source to start in
    #[clap(short, long, value_enum)]
    mode: Option<Mode>,

    /// override the filler-text endpoint
    #[clap(long)]
    paragraph_url: Option<String>,

    /// override the random-image endpoint
    #[clap(long)]
    image_url: Option<String>,

    /// skip loading and saving the config file
    #[clap(long)]
    no_config: bool,
}

impl Cli {
    fn resolve(&self, config: &Config) -> (Mode, Settings) {
        let mode = self
            .mode
            .or_else(|| Mode::from_name(&config.mode))
            .unwrap_or(Mode::Text);

        let settings = Settings {
            paragraph_url: self
                .paragraph_url
                .clone()
                .unwrap_or_else(|| config.paragraph_url.clone()),
            image_url: self
                .image_url
                .clone()
                .unwrap_or_else(|| config.image_url.clone()),
        };

        (mode, settings)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = if cli.no_config {
        Config::default()
    } else {
        store.load()
    };
    let (mode, settings) = cli.resolve(&config);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(mode, settings);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if !cli.no_config {
        let _ = store.save(&Config::from(&app));
    }

    result
}

fn start_fetch(app: &mut App, tx: &Sender<AppEvent>) {
    let ticket = app.begin_fetch();
    runtime::spawn_fetch(
        ticket,
        app.settings.paragraph_url.clone(),
        app.settings.image_url.clone(),
        tx.clone(),
    );
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let (tx, rx) = mpsc::channel();
    runtime::spawn_input_thread(tx.clone());

    let runner = Runner::new(
        ChannelEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    // initial load fetches for the configured mode
    start_fetch(app, &tx);
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                // sessions ignore ticks outside Typing; skip the redraw too
                if app.session.phase == tipsum::session::Phase::Typing {
                    app.on_tick();
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
                continue;
            }
            AppEvent::Resize => {}
            AppEvent::Fetched { generation, result } => {
                app.apply_fetch(generation, result);
            }
            AppEvent::Key(key) => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Enter => start_fetch(app, &tx),
                KeyCode::Tab => {
                    let ticket = app.toggle_mode();
                    runtime::spawn_fetch(
                        ticket,
                        app.settings.paragraph_url.clone(),
                        app.settings.image_url.clone(),
                        tx.clone(),
                    );
                }
                KeyCode::Backspace => app.backspace(),
                KeyCode::Char(c) => app.write(c),
                _ => {}
            },
        }

        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
