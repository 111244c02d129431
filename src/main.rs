use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use probwatch::{
    events, logging, ui, App, Overrides, PreferenceStore, RandomSource, Sampler, SeededRandom,
    SeriesBuffer, Settings, SystemClock, ThemeChoice, ThemeMode, ThreadRandom, TokioScheduler,
    View,
};
use probwatch_core::{SeriesStream, ValueRange};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

#[derive(Parser, Debug)]
#[command(name = "probwatch")]
#[command(about = "Terminal dashboard for a simulated probability signal")]
struct Args {
    /// Settings file (TOML, JSON or YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tick interval (e.g., "3s", "500ms")
    #[arg(short, long)]
    interval: Option<String>,

    /// Number of observations to keep
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Lower bound of the random walk
    #[arg(long)]
    min: Option<f64>,

    /// Upper bound of the random walk
    #[arg(long)]
    max: Option<f64>,

    /// Largest change between two observations
    #[arg(long)]
    step: Option<f64>,

    /// Seed for a reproducible walk
    #[arg(long)]
    seed: Option<u64>,

    /// Theme for this run (auto uses the saved preference, then the terminal background)
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Theme preference file
    #[arg(long = "prefs")]
    prefs_path: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Generate observations, write them to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Number of observations to generate with --export
    #[arg(long, default_value = "20", requires = "export")]
    samples: usize,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            interval: self.interval.clone(),
            capacity: self.capacity,
            min: self.min,
            max: self.max,
            step: self.step,
            seed: self.seed,
            theme: self.theme,
            prefs_path: self.prefs_path.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply(args.overrides());
    settings.validate()?;

    logging::init(settings.log_file.as_deref())?;
    tracing::info!(?settings, "starting probwatch");

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(&settings, args.samples, export_path);
    }

    run_with_generator(&settings)
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}

/// Run the TUI fed by a scheduled generator
fn run_with_generator(settings: &Settings) -> Result<()> {
    let interval = settings.interval()?;

    // Build a tokio runtime for the scheduler
    let rt = tokio::runtime::Runtime::new()?;
    let scheduler = TokioScheduler::new(rt.handle().clone());

    let sampler = Sampler::new(settings.sampler, SystemClock, random_source(settings.seed))?;
    let (source, generator) = probwatch::spawn_generator(&scheduler, interval, sampler);

    let store = settings
        .prefs_path
        .clone()
        .map(PreferenceStore::new)
        .unwrap_or_else(|| PreferenceStore::new(PreferenceStore::default_path()));
    let mode = initial_theme(settings.theme, &store);

    let series = SeriesBuffer::new(settings.capacity)?;
    let app = App::new(Box::new(source), series, mode)
        .with_preferences(store)
        .with_value_range(ValueRange::new(settings.sampler.min, settings.sampler.max));

    // Run the TUI in the main thread while the runtime drives the generator
    let result = run_tui(app);

    generator.stop();
    rt.shutdown_timeout(Duration::from_millis(100));

    result
}

fn initial_theme(choice: ThemeChoice, store: &PreferenceStore) -> ThemeMode {
    let saved = match store.load() {
        Ok(prefs) => prefs.theme,
        Err(e) => {
            tracing::warn!(error = %e, path = %store.path().display(), "ignoring theme preference");
            None
        }
    };
    choice.resolve(saved, ThemeMode::detect)
}

/// Run the TUI with the given app
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let top = (area.height / 2).saturating_sub(2);
                let centered =
                    ratatui::layout::Rect::new(0, top, area.width, 5u16.min(area.height - top));
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Chart => ui::chart::render(frame, app, chunks[2]),
                View::History => ui::history::render(frame, app, chunks[2]),
                View::Stats => ui::stats::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table border (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Drain whatever the generator produced since the last frame
        app.reload_data();
    }

    Ok(())
}

/// Generate `samples` observations and export them without starting the UI
fn export_to_file(settings: &Settings, samples: usize, export_path: &Path) -> Result<()> {
    let mut stream = SeriesStream::new(
        settings.sampler,
        settings.capacity,
        SystemClock,
        random_source(settings.seed),
    )?;
    for _ in 0..samples {
        stream.tick();
    }

    probwatch::export_series(stream.buffer(), export_path)
        .with_context(|| format!("Failed to export to {}", export_path.display()))?;

    tracing::info!(samples, path = %export_path.display(), "exported series");
    println!("Exported {} observations to: {}", stream.buffer().len(), export_path.display());
    Ok(())
}
