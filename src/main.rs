use std::num::NonZeroU32;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use grid_raycaster::cli::{Args, usage_error};
use grid_raycaster::framebuffer::FrameBuffer;
use grid_raycaster::movement::Intent;
use grid_raycaster::scaler::{ScaleLut, blit_stretched};
use grid_raycaster::scene::Scene;
use grid_raycaster::session::{SCREEN_HEIGHT, SCREEN_WIDTH, Session, SessionOptions};
use grid_raycaster::texture::TextureSet;
use grid_raycaster::{Error, Result};

const TICK: Duration = Duration::from_nanos(1_000_000_000 / 30);
const MAX_FRAME_DT: Duration = Duration::from_millis(100);
/// Radians per pixel of horizontal pointer motion.
const MOUSE_SENSITIVITY: f64 = 0.001;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    session: Session,

    // Fixed 1280x960 frame, stretched to the window
    fb: FrameBuffer,
    scale_lut: ScaleLut,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    last_tick: Instant,
    tick_backlog: Duration,
    mouse: bool,

    // Set when the loop had to stop on an error
    failure: Option<Error>,
}

impl App {
    fn new(session: Session, mouse: bool) -> Self {
        Self {
            window: None,
            surface: None,
            session,
            fb: FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            scale_lut: ScaleLut::default(),
            frame_counter: 0,
            last_fps_print: Instant::now(),
            last_tick: Instant::now(),
            tick_backlog: Duration::ZERO,
            mouse,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        self.failure = Some(err);
        event_loop.exit();
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("grid raycaster")
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| Error::Display(format!("window: {e}")))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| Error::Display(format!("softbuffer context: {e}")))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| Error::Display(format!("softbuffer surface: {e}")))?;

        if self.mouse {
            window.set_cursor_visible(false);
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                warn!(%e, "pointer grab unavailable");
            }
        }

        let size = window.inner_size();
        info!(width = size.width, height = size.height, "window created");
        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        self.last_tick = Instant::now();
        Ok(())
    }

    /// Runs as many fixed ticks as wall time allows.
    fn advance(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).min(MAX_FRAME_DT);
        self.last_tick = now;
        self.tick_backlog += dt;
        while self.tick_backlog >= TICK {
            self.session.tick();
            self.tick_backlog -= TICK;
        }
    }

    fn redraw(&mut self, id: WindowId) {
        self.advance();

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return,
        };

        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return; // minimized
        };
        if let Err(e) = surface.resize(w, h) {
            warn!(%e, "surface resize failed");
            return;
        }

        self.session.render(&mut self.fb);

        let (dw, dh) = (size.width as usize, size.height as usize);
        if !self.scale_lut.fits(dw, dh) {
            self.scale_lut = ScaleLut::new(dw, dh, self.fb.width(), self.fb.height());
        }

        let mut buf = match surface.buffer_mut() {
            Ok(buf) => buf,
            Err(e) => {
                warn!(%e, "no surface buffer");
                return;
            }
        };
        blit_stretched(&mut buf, &self.scale_lut, &self.fb);
        if let Err(e) = buf.present() {
            warn!(%e, "present failed");
        }

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            debug!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }

        window.request_redraw();
    }
}

fn intent_for(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::KeyW => Some(Intent::Forward),
        KeyCode::KeyS => Some(Intent::Backward),
        KeyCode::KeyA => Some(Intent::StrafeLeft),
        KeyCode::KeyD => Some(Intent::StrafeRight),
        KeyCode::ArrowLeft => Some(Intent::TurnLeft),
        KeyCode::ArrowRight => Some(Intent::TurnRight),
        KeyCode::KeyE => Some(Intent::ToggleDoor),
        _ => None,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("window closed; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape && state == ElementState::Pressed {
                    info!("escape pressed; stopping");
                    event_loop.exit();
                    return;
                }
                if let Some(intent) = intent_for(code) {
                    self.session
                        .set_intent(intent, state == ElementState::Pressed);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(id),

            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, _) } = event {
            if self.mouse {
                self.session.rotate(dx * MOUSE_SENSITIVITY);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    args.validate()?;
    let scene = Scene::load(&args.map, args.doors)?;
    let textures = TextureSet::load(&scene.config.textures, args.door_dir())?;
    info!(
        spawn_col = scene.spawn.col,
        spawn_row = scene.spawn.row,
        facing = ?scene.spawn.facing,
        "starting"
    );

    let session = Session::new(
        scene,
        textures,
        SessionOptions {
            doors: args.doors,
            minimap: args.minimap,
        },
    );

    let event_loop = EventLoop::new().map_err(|e| Error::Display(format!("event loop: {e}")))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(session, args.mouse);
    event_loop
        .run_app(&mut app)
        .map_err(|e| Error::Display(format!("event loop: {e}")))?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn report(err: Error) -> ExitCode {
    eprintln!("Error: {err}");
    ExitCode::from(err.exit_code())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match usage_error(&e) {
            Some(err) => return report(err),
            None => e.exit(),
        },
    };
    init_tracing(args.log_level.as_deref());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err),
    }
}
