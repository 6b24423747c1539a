//! Terminal host for the Truite renderer

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self},
};
use nalgebra::Vector3;
use std::io::{self, stdout, Stdout};
use std::time::{Duration, Instant};
use truite_core::{KeyBindings, KeyState, ObjectId, RenderMode, Scene};

pub mod controls;
pub mod renderer;

pub use controls::Command;
pub use renderer::TerminalSurface;

/// Main application struct running the frame loop against the real terminal
pub struct TerminalApp {
    scene: Scene,
    surface: TerminalSurface<Stdout>,
    keys: KeyState<KeyCode>,
    bindings: KeyBindings<KeyCode>,
    spins: Vec<(ObjectId, Vector3<f32>)>,
    reports_releases: bool,
    running: bool,
    last_tick: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// `columns` and `rows` must match the size the scene was configured for.
    pub fn new(scene: Scene, columns: u16, rows: u16) -> Self {
        let surface = TerminalSurface::new(columns as usize, rows as usize, stdout());
        let (width, height) = surface.size();
        let center = scene.camera().center();
        if center.x * 2.0 != width as f32 || center.y * 2.0 != height as f32 {
            tracing::warn!(width, height, "scene was configured for a different surface size");
        }

        let now = Instant::now();
        Self {
            scene,
            surface,
            keys: KeyState::new(),
            bindings: controls::default_bindings(),
            spins: Vec::new(),
            reports_releases: false,
            running: true,
            last_tick: now,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
        }
    }

    /// Rotate `object` continuously by `degrees_per_second` on each axis.
    pub fn spin(&mut self, object: ObjectId, degrees_per_second: Vector3<f32>) {
        self.spins.push((object, degrees_per_second));
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        // Without release events every press only counts for one tick.
        self.reports_releases = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.reports_releases {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        tracing::debug!(
            reports_releases = self.reports_releases,
            objects = self.scene.len(),
            "terminal ready"
        );

        let result = self.main_loop();
        let cleanup = self.restore_terminal();

        result.and(cleanup)
    }

    /// Undo every terminal mode `run` set, even if an earlier step fails.
    fn restore_terminal(&self) -> io::Result<()> {
        let pop_flags = if self.reports_releases {
            execute!(stdout(), PopKeyboardEnhancementFlags)
        } else {
            Ok(())
        };
        let raw_mode = terminal::disable_raw_mode();
        let screen = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);

        first_error([pop_flags, raw_mode, screen])
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            self.poll_input()?;
            if !self.running {
                break;
            }

            let dt = (frame_start - self.last_tick).as_secs_f32();
            self.last_tick = frame_start;
            self.update(dt);

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        Ok(())
    }

    /// Drain every pending event into the key state.
    fn poll_input(&mut self) -> io::Result<()> {
        if !self.reports_releases {
            self.keys.release_all();
        }

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let code = controls::normalize(key.code);
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.keys.press(code),
            KeyEventKind::Release => self.keys.release(code),
        }

        match controls::command_for(&key) {
            Some(Command::Quit) => self.running = false,
            Some(Command::ToggleFill) => {
                for object in self.scene.objects_mut() {
                    object.mode = match object.mode {
                        RenderMode::Wireframe => RenderMode::Filled,
                        RenderMode::Filled => RenderMode::Wireframe,
                    };
                }
            }
            // With release events the light key is read as held in `update`.
            Some(Command::ToggleLight) if !self.reports_releases => {
                let light = !self.scene.light_mode();
                self.scene.set_light_mode(light);
            }
            Some(Command::ToggleLight) | None => {}
        }
    }

    fn update(&mut self, dt: f32) {
        let actions = self.bindings.held_actions(&self.keys);
        self.scene.apply_actions(actions, dt);
        if self.reports_releases {
            self.scene
                .set_light_mode(self.keys.is_held(&controls::LIGHT_KEY));
        }

        for (id, rate) in &self.spins {
            if let Some(object) = self.scene.object_mut(*id) {
                object.rotate(*rate * dt);
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let camera = self.scene.camera();
        self.surface.set_overlay(format!(
            "Truite | FPS: {:.1} | cam {:.0},{:.0},{:.0} f={:.0} | WASD/Arrows=Move +/-=Zoom F=Fill Space=Light Q=Quit",
            self.fps,
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.screen_dist(),
        ));

        self.scene.render(&mut self.surface)
    }
}

/// The first failure among steps that have all already run.
fn first_error(steps: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    steps.into_iter().fold(Ok(()), |outcome, step| outcome.and(step))
}
