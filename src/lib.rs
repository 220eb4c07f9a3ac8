#![doc = include_str!("../README.md")]

use std::io;
use std::io::stdout;

use crossterm::event::{KeyCode, KeyEvent};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{cursor, execute};
use smallvec::SmallVec;

pub mod display;
pub mod objects;
pub mod rendering;
pub mod scene;
pub mod style;
pub mod util;
pub mod vector;

pub use crate::display::{Display, SceneContext};
pub use crate::objects::{ObjectCommon, ObjectId, RenderObject};
pub use crate::rendering::frame::Frame;
pub use crate::rendering::terminal::Terminal;
pub use crate::scene::{Scene, SceneCore};
pub use crate::vector::Vector2;

/// The keys that were pressed since the last frame, as a membership view.
///
/// Complements the ordered key list on [`UpdateInfo`]: use this to ask
/// "was Enter pressed this frame" once, and the list when arrival order or
/// duplicates matter (e.g. typed text).
pub struct PressedKeys {
    inner: micromap::Map<KeyCode, u8, 16>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self {
            inner: micromap::Map::new(),
        }
    }

    pub(crate) fn record(&mut self, code: KeyCode) {
        if let Some(count) = self.inner.get_mut(&code) {
            *count += 1;
        } else if self.inner.len() < 16 {
            self.inner.insert(code, 1);
        }
    }

    /// Returns true if the given key was pressed since the last frame.
    pub fn did_press(&self, key: KeyCode) -> bool {
        self.inner.contains_key(&key)
    }

    /// Returns true if the given character key was pressed since the last frame.
    pub fn did_press_char(&self, c: char) -> bool {
        self.did_press(KeyCode::Char(c))
    }

    /// Returns true if the given character key was pressed since the last frame, ignoring case.
    pub fn did_press_char_ignore_case(&self, c: char) -> bool {
        self.did_press_char(c) || self.did_press_char(c.to_ascii_uppercase())
    }
}

impl Default for PressedKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything that happened between the previous frame and this one.
///
/// Built fresh by the display every frame, passed by reference to the
/// current scene and each of its enabled objects, and discarded afterwards.
pub struct UpdateInfo {
    /// The raw key presses since the last frame, in arrival order,
    /// duplicates preserved.
    pub keys: SmallVec<[KeyEvent; 16]>,
    /// Membership view over [`Self::keys`].
    pub pressed: PressedKeys,
    /// Whether the terminal dimensions changed since the last frame. When
    /// set, the display has already re-read its dimensions for this frame.
    pub has_resized: bool,
    /// The time in seconds the previous frame took, pacing sleep included.
    pub dt: f64,
}

/// Sets up the terminal for rendering.
///
/// Enters the alternate screen, enables raw mode and hides the cursor.
/// Call before constructing a [`Display`]; pair with [`terminal_cleanup`]
/// after the render loop, and consider [`install_panic_handler`] in
/// between.
///
/// Note: if you are stuck in a bad terminal state, you can try running
/// `reset` in the terminal.
pub fn terminal_setup() -> io::Result<()> {
    let mut stdout = stdout();

    execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    enable_raw_mode()?;
    execute!(stdout, cursor::Hide)?;

    Ok(())
}

/// Resets everything done by [`terminal_setup`].
pub fn terminal_cleanup() -> io::Result<()> {
    let mut stdout = stdout();
    execute!(stdout, cursor::Show)?;
    execute!(
        stdout,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
    )?;

    disable_raw_mode()?;

    execute!(stdout, crossterm::terminal::LeaveAlternateScreen)?;

    Ok(())
}

/// Installs a panic handler that restores the terminal before panicking.
///
/// Without this the panic message would be lost to the alternate screen
/// and raw mode.
pub fn install_panic_handler() {
    let old_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |pinfo| {
        let _ = terminal_cleanup();
        eprintln!("{}", pinfo);
        old_hook(pinfo);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_keys_membership() {
        let mut pressed = PressedKeys::new();
        pressed.record(KeyCode::Enter);
        pressed.record(KeyCode::Char('a'));
        pressed.record(KeyCode::Char('a'));

        assert!(pressed.did_press(KeyCode::Enter));
        assert!(pressed.did_press_char('a'));
        assert!(!pressed.did_press_char('b'));
        assert!(pressed.did_press_char_ignore_case('A'));
    }

    #[test]
    fn test_pressed_keys_is_bounded() {
        let mut pressed = PressedKeys::new();
        // more distinct keys than the map holds; the tail is dropped
        // rather than overflowing
        for c in 'a'..='z' {
            pressed.record(KeyCode::Char(c));
        }
        assert!(pressed.did_press_char('a'));
        assert!(!pressed.did_press_char('z'));
    }
}
