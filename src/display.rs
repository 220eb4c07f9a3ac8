//! The display: scene registry, double-buffered frame state and the
//! fixed-rate render loop.

use std::io;
use std::time::{Duration, Instant};

use anymap::AnyMap;
use crossterm::event::KeyEvent;
use log::{debug, warn};
use smallvec::SmallVec;

use crate::rendering::frame::Frame;
use crate::rendering::overlay::overlay;
use crate::rendering::terminal::Terminal;
use crate::scene::{Scene, SceneCore};
use crate::{PressedKeys, UpdateInfo};

/// The per-frame view of the display handed to scenes and their objects.
///
/// This is how an object reaches "upward": current terminal dimensions, the
/// target frame rate, the shared extension state, and the deferred
/// navigation commands. It is a borrowed handle constructed fresh every
/// frame, never an ownership edge.
pub struct SceneContext<'a> {
    width: usize,
    height: usize,
    target_fps: f64,
    /// Arbitrary state shared across scenes, keyed by type. Scenes use this
    /// to pass data to one another (menu selections, editor targets, ...).
    pub extensions: &'a mut AnyMap,
    requested_scene: Option<String>,
    stop_requested: bool,
}

impl<'a> SceneContext<'a> {
    pub(crate) fn new(
        width: usize,
        height: usize,
        target_fps: f64,
        extensions: &'a mut AnyMap,
    ) -> Self {
        Self {
            width,
            height,
            target_fps,
            extensions,
            requested_scene: None,
            stop_requested: false,
        }
    }

    /// Current display width in characters.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Current display height in characters.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn target_fps(&self) -> f64 {
        self.target_fps
    }

    /// A blank frame sized to the current display, for objects that want a
    /// full-screen canvas to draw into.
    pub fn populate_frame(&self) -> Frame {
        Frame::blank(self.width, self.height)
    }

    /// Requests a switch to the named scene. The switch applies at the end
    /// of the current frame; the next frame's update and render target the
    /// new scene. The last request made during a frame wins.
    pub fn switch_scene(&mut self, name: impl Into<String>) {
        self.requested_scene = Some(name.into());
    }

    /// Requests that the render loop stop after the current frame. This is
    /// terminal: a stopped display does not resume.
    pub fn stop_rendering(&mut self) {
        self.stop_requested = true;
    }

    pub(crate) fn into_commands(self) -> (Option<String>, bool) {
        (self.requested_scene, self.stop_requested)
    }
}

/// Owns the scenes, the frame buffers and the terminal, and drives the
/// render loop.
///
/// One display exists per process. Scenes are registered at startup with
/// [`Display::add_scene`]; the first one registered becomes current.
/// [`Display::start_rendering`] runs the loop until some scene requests a
/// stop, at which point the display is permanently stopped.
pub struct Display<T: Terminal> {
    terminal: T,
    scenes: Vec<Box<dyn Scene>>,
    current: usize,
    width: usize,
    height: usize,
    current_frame: Frame,
    previous_frame: Frame,
    is_rendering: bool,
    stopped: bool,
    target_fps: f64,
    extensions: AnyMap,
    last_dt: f64,
}

impl<T: Terminal> Display<T> {
    /// Creates a display over the given terminal backend.
    ///
    /// # Panics
    /// Panics if `target_fps` is not positive.
    pub fn new(mut terminal: T, target_fps: f64) -> io::Result<Self> {
        assert!(target_fps > 0.0, "target_fps must be positive");
        let (width, height) = terminal.size()?;
        Ok(Self {
            terminal,
            scenes: Vec::new(),
            current: 0,
            width,
            height,
            current_frame: Frame::blank(width, height),
            previous_frame: Frame::blank(width, height),
            is_rendering: false,
            stopped: false,
            target_fps,
            extensions: AnyMap::new(),
            last_dt: 0.0,
        })
    }

    /// Registers a scene under a name. The first scene registered becomes
    /// the current one.
    pub fn add_scene(&mut self, mut scene: Box<dyn Scene>, name: impl Into<String>) {
        scene.core_mut().name = name.into();
        self.scenes.push(scene);
    }

    /// Last known display width in characters.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Last known display height in characters.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_rendering(&self) -> bool {
        self.is_rendering
    }

    /// A blank frame sized to the current display.
    pub fn populate_frame(&self) -> Frame {
        Frame::blank(self.width, self.height)
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn extensions(&self) -> &AnyMap {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut AnyMap {
        &mut self.extensions
    }

    /// Looks up a registered scene by name.
    pub fn scene(&self, name: &str) -> Option<&dyn Scene> {
        self.scenes
            .iter()
            .find(|s| s.core().name() == name)
            .map(|s| &**s)
    }

    pub fn current_scene_name(&self) -> Option<&str> {
        self.scenes.get(self.current).map(|s| s.core().name())
    }

    /// Switches to the named scene: it becomes current immediately, running
    /// its `start` hook on first activation and `restart` on every later
    /// one. Switching to an unregistered name is a no-op and the current
    /// scene stays active.
    pub fn switch_scene(&mut self, name: &str) {
        let Some(idx) = self.scenes.iter().position(|s| s.core().name() == name) else {
            debug!("ignoring switch to unregistered scene {name:?}");
            return;
        };
        self.current = idx;
        self.activate(idx, false);
    }

    /// Stops the render loop after the frame in progress. Stopping is
    /// terminal; a stopped display cannot be started again.
    pub fn stop_rendering(&mut self) {
        self.is_rendering = false;
    }

    /// Runs the render loop until a stop is requested.
    ///
    /// The initial activation always runs the scene's `start` hook, never
    /// `restart`, regardless of the started flag. After that the loop
    /// repeats the per-frame protocol (input, update, render, composite,
    /// staged mutations, diff, write, pacing) at the target frame rate.
    pub fn start_rendering(&mut self, initial_scene: &str) -> io::Result<()> {
        if self.stopped {
            return Ok(());
        }
        if self.scenes.is_empty() {
            warn!("start_rendering called with no scenes registered");
            return Ok(());
        }
        if let Some(idx) = self
            .scenes
            .iter()
            .position(|s| s.core().name() == initial_scene)
        {
            self.current = idx;
        } else {
            debug!("initial scene {initial_scene:?} is not registered");
        }

        self.is_rendering = true;
        self.activate(self.current, true);

        let mut last_tick = Instant::now();
        while self.is_rendering {
            let tick_start = Instant::now();
            self.last_dt = tick_start.duration_since(last_tick).as_secs_f64();
            last_tick = tick_start;

            self.tick()?;

            let elapsed = tick_start.elapsed();
            match remaining_budget(self.target_fps, elapsed) {
                Some(free_time) => std::thread::sleep(free_time),
                None => {
                    let budget = Duration::from_secs_f64(1.0 / self.target_fps);
                    warn!(
                        "render loop running behind by {}ms",
                        (elapsed - budget).as_millis()
                    );
                }
            }
        }
        self.stopped = true;
        Ok(())
    }

    /// Advances the display by exactly one frame.
    ///
    /// This is what the render loop calls every tick; it is public so that
    /// a harness can drive any number of frames against a stub terminal
    /// without the real loop and its pacing.
    pub fn tick(&mut self) -> io::Result<()> {
        if self.scenes.is_empty() {
            return Ok(());
        }

        // resize accounting runs before anything else so the whole frame
        // observes the new dimensions
        let (term_width, term_height) = self.terminal.size()?;
        let has_resized = term_width != self.width || term_height != self.height;
        if has_resized {
            self.width = term_width;
            self.height = term_height;
            self.terminal.clear()?;
            self.terminal.set_cursor_visible(false)?;
            debug!("display resized to ({term_width}, {term_height})");
        }

        // drain every buffered key press, arrival order, without waiting
        let mut keys: SmallVec<[KeyEvent; 16]> = SmallVec::new();
        let mut pressed = PressedKeys::new();
        while let Some(key) = self.terminal.poll_key()? {
            pressed.record(key.code);
            keys.push(key);
        }
        let info = UpdateInfo {
            keys,
            pressed,
            has_resized,
            dt: self.last_dt,
        };

        // the old frame moves to previous; no copy
        self.previous_frame = std::mem::replace(
            &mut self.current_frame,
            Frame::blank(self.width, self.height),
        );

        let (requested_scene, stop_requested) = {
            let Self {
                scenes,
                extensions,
                current,
                width,
                height,
                target_fps,
                current_frame,
                ..
            } = self;
            let scene = &mut scenes[*current];
            let mut ctx = SceneContext::new(*width, *height, *target_fps, extensions);

            scene.update(&info, &mut ctx);
            let core = scene.core_mut();
            core.update_objects(&info, &mut ctx);
            core.render_objects(&ctx);
            composite(core, current_frame);
            core.apply_pending_changes();

            ctx.into_commands()
        };

        // the write is skipped entirely when nothing visible changed
        if self.current_frame != self.previous_frame {
            self.terminal.draw_frame(&self.current_frame)?;
        }

        // navigation requested during the frame applies now, so the next
        // frame targets the new scene
        if stop_requested {
            self.stop_rendering();
        }
        if let Some(name) = requested_scene {
            self.switch_scene(&name);
        }

        Ok(())
    }

    /// Runs the start-or-restart dispatch for the scene at `idx`.
    ///
    /// `force_start` is the initial-activation path: the very first scene
    /// shown always gets a fresh `start`, bypassing the started-flag check.
    fn activate(&mut self, idx: usize, force_start: bool) {
        let (requested_scene, stop_requested) = {
            let Self {
                scenes,
                extensions,
                width,
                height,
                target_fps,
                ..
            } = self;
            let scene = &mut scenes[idx];
            let mut ctx = SceneContext::new(*width, *height, *target_fps, extensions);
            if force_start || !scene.core().started() {
                scene.start(&mut ctx);
                scene.core_mut().started = true;
            } else {
                scene.restart(&mut ctx);
            }
            ctx.into_commands()
        };
        if stop_requested {
            self.stop_rendering();
        }
        if let Some(name) = requested_scene {
            self.switch_scene(&name);
        }
    }
}

/// Overlays every enabled object of the scene onto the frame, in ascending
/// z-index. The sort is stable, so objects sharing a z-index keep their
/// insertion order.
fn composite(core: &SceneCore, frame: &mut Frame) {
    let objects = core.objects();
    let mut order: Vec<usize> = (0..objects.len()).collect();
    order.sort_by_key(|&idx| objects[idx].common().z_index);
    for idx in order {
        let common = objects[idx].common();
        if !common.enabled {
            continue;
        }
        overlay(frame, common.position, &common.content);
    }
}

/// Time left in this frame's budget, or `None` when the frame overran it.
fn remaining_budget(target_fps: f64, elapsed: Duration) -> Option<Duration> {
    Duration::from_secs_f64(1.0 / target_fps).checked_sub(elapsed)
}
