use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use trophy_showcase::cli::{Cli, Command, ContactArgs, TrophyArgs};
use trophy_showcase::config::ShowcaseConfig;
use trophy_showcase::contact::{handle_submission, LogMailer};
use trophy_showcase::core::{Clock, LoopSettings, Mount, Showcase, WindowDimensions};
use trophy_showcase::gpu::{HologramRenderer, TrophyRenderer};
use trophy_showcase::hologram::HologramFeed;
use trophy_showcase::loaders::spawn_load;
use trophy_showcase::scene::{AssetBarrier, AssetKind};

const INITIAL_WINDOW_WIDTH: u32 = 1024;
const INITIAL_WINDOW_HEIGHT: u32 = 768;

/// What is mounted in the window
enum Visual {
    Trophy(Showcase<TrophyRenderer>),
    Hologram(Mount<HologramRenderer<HologramFeed>>),
}

impl Visual {
    fn frame(&mut self, now: f32) {
        match self {
            Visual::Trophy(v) => {
                v.frame(now);
            }
            Visual::Hologram(v) => {
                v.frame(now);
            }
        }
    }

    fn set_visible(&mut self, visible: bool) {
        match self {
            Visual::Trophy(v) => v.set_visible(visible),
            Visual::Hologram(v) => v.set_visible(visible),
        }
    }

    fn request_resize(&mut self, dimensions: WindowDimensions, now: f32) {
        match self {
            Visual::Trophy(v) => v.request_resize(dimensions, now),
            Visual::Hologram(v) => v.request_resize(dimensions, now),
        }
    }

    fn context_lost(&self) -> bool {
        match self {
            Visual::Trophy(v) => v.state().context_lost,
            Visual::Hologram(v) => v.state().context_lost,
        }
    }

    fn on_context_restored(&mut self) {
        match self {
            Visual::Trophy(v) => v.on_context_restored(),
            Visual::Hologram(v) => v.on_context_restored(),
        }
    }

    fn teardown(&mut self) {
        match self {
            Visual::Trophy(v) => v.teardown(),
            Visual::Hologram(v) => v.teardown(),
        }
    }
}

#[derive(Clone, Copy)]
enum Mode {
    Trophy,
    Hologram,
}

struct App {
    mode: Mode,
    config: ShowcaseConfig,
    window: Option<Arc<Window>>,
    visual: Option<Visual>,
    clock: Clock,
}

impl App {
    fn new(mode: Mode, config: ShowcaseConfig) -> Self {
        Self {
            mode,
            config,
            window: None,
            visual: None,
            clock: Clock::new(),
        }
    }

    fn mount(&self, window: Arc<Window>) -> Result<Visual> {
        let dimensions = WindowDimensions::from(window.inner_size());
        match self.mode {
            Mode::Trophy => {
                let (barrier, body_tx, plinth_tx) = AssetBarrier::new();
                // loads start before the GPU is up so they overlap device creation
                spawn_load(AssetKind::Body, self.config.body_asset.clone(), body_tx)?;
                spawn_load(AssetKind::Plinth, self.config.plinth_asset.clone(), plinth_tx)?;

                let renderer = pollster::block_on(TrophyRenderer::new(window))?;
                Ok(Visual::Trophy(Showcase::start(
                    renderer,
                    dimensions,
                    self.config.showcase_options(),
                    barrier,
                )))
            }
            Mode::Hologram => {
                let feed = self.config.hologram_feed()?;
                let renderer = pollster::block_on(HologramRenderer::new(window, feed))?;
                let settings = LoopSettings {
                    resize_debounce: self.config.resize_debounce_ms as f32 / 1000.0,
                    ..LoopSettings::hologram()
                };
                Ok(Visual::Hologram(Mount::start(renderer, dimensions, settings)))
            }
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(visual) = self.visual.as_mut() {
            visual.teardown();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let title = match self.mode {
            Mode::Trophy => "Trophy Showcase",
            Mode::Hologram => "Hologram",
        };
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(title)
                .with_inner_size(winit::dpi::LogicalSize::new(INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // a failed surface means no visual output, not a crash
        match self.mount(window.clone()) {
            Ok(visual) => self.visual = Some(visual),
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        }
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let now = self.clock.elapsed();
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::Occluded(occluded) => {
                if let Some(visual) = self.visual.as_mut() {
                    if !occluded && visual.context_lost() {
                        visual.on_context_restored();
                    }
                    visual.set_visible(!occluded);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(visual) = self.visual.as_mut() {
                    if visual.context_lost() {
                        visual.on_context_restored();
                    }
                    visual.request_resize(size.into(), now);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(visual) = self.visual.as_mut() {
                    visual.frame(now);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(visual) = self.visual.as_mut() {
            visual.teardown();
        }
    }
}

fn run_contact(args: &ContactArgs) -> Result<()> {
    let body = match (&args.json, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => {
            std::fs::read_to_string(path).context(format!("Failed to read request body: {:?}", path))?
        }
        (None, None) => anyhow::bail!("no request body given"),
    };

    let response = handle_submission(&body, &LogMailer);
    println!("{}", response.status);
    println!("{}", response.to_json()?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ShowcaseConfig::load(path)?,
        None => ShowcaseConfig::default(),
    };

    let mode = match cli.command.unwrap_or(Command::Trophy(TrophyArgs::default())) {
        Command::Contact(args) => return run_contact(&args),
        Command::Trophy(args) => {
            args.apply(&mut config);
            Mode::Trophy
        }
        Command::Hologram(args) => {
            args.apply(&mut config);
            Mode::Hologram
        }
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(mode, config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
