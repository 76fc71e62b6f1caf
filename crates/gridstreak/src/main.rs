use std::io::IsTerminal;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gridstreak_config::{Config, DisplayConfig};
use gridstreak_scene::{
    AnimationClock, CancelHandle, FrameScheduler, MonotonicClock, RandomSource, Raster, RasterView,
    ResizeObserver, Scene, Surface, raster_size,
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{DefaultTerminal, Frame, layout::Size};
use tracing::{debug, info};

mod cli;
mod logging;

use cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let config = load_config(&cli)?;
    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    // Nothing to draw on: bail out before any frame is scheduled.
    if !std::io::stdout().is_terminal() {
        debug!("stdout is not a terminal, not starting");
        return Ok(());
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, config, rng);
    ratatui::restore();
    result
}

fn load_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(fps) = cli.fps {
        config.display.fps = fps;
        config.validate()?;
    }
    Ok(config)
}

fn run(terminal: &mut DefaultTerminal, config: Config, rng: StdRng) -> color_eyre::Result<()> {
    let mut clock = MonotonicClock::new();
    let scheduler = FrameScheduler::with_fps(config.display.fps);
    let size = terminal.size()?;
    let app = App::new(config, size, rng, &clock, scheduler.cancel_handle());

    let frames = app.run(terminal, &scheduler, &mut clock)?;
    info!(frames, "animation stopped");
    Ok(())
}

/// The main application: owns the scene, the raster it is drawn onto and the
/// resize tracking for the terminal.
#[derive(Debug)]
pub struct App<R> {
    display: DisplayConfig,
    scene: Scene<R>,
    raster: Raster,
    observer: ResizeObserver,
    cancel: CancelHandle,
}

impl<R: RandomSource> App<R> {
    /// Construct a new instance of [`App`] sized to `size` terminal cells.
    pub fn new<C: AnimationClock + ?Sized>(
        config: Config,
        size: Size,
        rng: R,
        clock: &C,
        cancel: CancelHandle,
    ) -> Self {
        let (cols, rows) = raster_size(size.width, size.height);
        let raster = Raster::new(cols, rows, config.display.pixel_scale);
        let (width, height) = raster.size();
        let scene = Scene::new(config.scene, width, height, rng, clock);

        Self {
            display: config.display,
            scene,
            raster,
            observer: ResizeObserver::new(size.width, size.height),
            cancel,
        }
    }

    /// Run the application's main loop until cancelled. Returns the number
    /// of frames drawn.
    pub fn run<C: AnimationClock + ?Sized>(
        mut self,
        terminal: &mut DefaultTerminal,
        scheduler: &FrameScheduler,
        clock: &mut C,
    ) -> color_eyre::Result<u64> {
        scheduler.run(clock, |time| {
            terminal.draw(|frame| self.render(frame, time))?;
            self.handle_crossterm_events()
        })
    }

    /// Renders one animation frame into the terminal frame.
    fn render(&mut self, frame: &mut Frame, time: f64) {
        let area = frame.area();
        if let Some((cols, rows)) = self.observer.observe(area.width, area.height) {
            let (width, height) = raster_size(cols, rows);
            self.raster.resize(width, height);
            let (width, height) = self.raster.size();
            self.scene.resize(width, height);
        }

        self.scene.frame(&mut self.raster, time);
        frame.render_widget(RasterView::new(&self.raster, self.display.backdrop), area);
    }

    /// Drains pending crossterm events without blocking; the scheduler owns
    /// the frame pacing.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                // Picked up from the frame area on the next draw.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Quit keys are the only input the animation reacts to.
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ => {}
        }
    }

    /// Cancel the frame scheduler.
    fn quit(&mut self) {
        self.cancel.cancel();
    }
}
