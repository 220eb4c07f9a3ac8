//! A boxed single-line text input with a blinking cursor.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::display::SceneContext;
use crate::objects::{ObjectCommon, RenderObject};
use crate::util::{center_text, tail_chars};
use crate::vector::Vector2;
use crate::{style, UpdateInfo};

/// Invoked with the current value when Enter is pressed.
pub type SubmitCallback = Box<dyn FnMut(&str, &mut SceneContext)>;

const BG_COLOUR: &str = style::bg::GRAYSCALE_240;
const INPUT_BG_COLOUR: &str = style::bg::GRAYSCALE_235;
const FG_COLOUR: &str = style::fg::WHITE;

/// Total width of the input box in characters.
pub const INPUT_WIDTH: usize = 40;
const INPUT_PADDING: usize = 3;
// cursor blink toggles per second
const CURSOR_CHANGES_PER_SEC: f64 = 2.0;

/// A titled text input box.
///
/// Printable keys append to the value, Backspace deletes, Enter hands the
/// value to the submit callback. A value longer than the visible span shows
/// its tail. The block cursor blinks at a rate derived from the target
/// frame rate.
pub struct TextInput {
    common: ObjectCommon,
    title: String,
    value: String,
    on_submit: Option<SubmitCallback>,
    cursor_shown: bool,
    cursor_loop: u32,
}

impl TextInput {
    pub fn new(title: impl Into<String>, position: Vector2) -> Self {
        let mut common = ObjectCommon::default();
        common.position = position;
        common.size = Vector2::new(INPUT_WIDTH as i32, 5);
        Self {
            common,
            title: title.into(),
            value: String::new(),
            on_submit: None,
            cursor_shown: true,
            cursor_loop: 0,
        }
    }

    pub fn on_submit(&mut self, callback: impl FnMut(&str, &mut SceneContext) + 'static) {
        self.on_submit = Some(Box::new(callback));
    }

    /// The text typed so far.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    fn submit(&mut self, ctx: &mut SceneContext) {
        // the callback must not borrow the input while it runs
        let mut callback = self.on_submit.take();
        if let Some(callback) = callback.as_mut() {
            callback(&self.value, ctx);
        }
        self.on_submit = callback;
    }

    /// Number of frames between cursor toggles at the given frame rate.
    fn cursor_display_loop(target_fps: f64) -> u32 {
        (target_fps / CURSOR_CHANGES_PER_SEC).max(1.0) as u32
    }
}

impl RenderObject for TextInput {
    fn common(&self) -> &ObjectCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ObjectCommon {
        &mut self.common
    }

    fn update(&mut self, info: &UpdateInfo, ctx: &mut SceneContext) {
        // typed text needs the ordered list: duplicates and ordering matter
        for key in &info.keys {
            match key.code {
                // control chords are not text
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.value.push(c)
                }
                KeyCode::Backspace => {
                    self.value.pop();
                }
                KeyCode::Enter => self.submit(ctx),
                _ => {}
            }
        }

        self.cursor_loop += 1;
        if self.cursor_loop >= Self::cursor_display_loop(ctx.target_fps()) {
            self.cursor_shown = !self.cursor_shown;
            self.cursor_loop = 0;
        }
    }

    fn render(&mut self, _ctx: &SceneContext) {
        let visible_span = INPUT_WIDTH - 2 * INPUT_PADDING - 1;
        let shown = tail_chars(&self.value, visible_span);
        let fill = visible_span.saturating_sub(shown.chars().count());

        let cursor_colour = if self.cursor_shown {
            style::fg::WHITE
        } else {
            // paint the block in the input background so it vanishes
            style::fg::GRAYSCALE_235
        };
        let display_value = format!(
            "{}{}{}{}",
            shown,
            cursor_colour,
            style::glyph::SOLID_BLOCK,
            " ".repeat(fill)
        );

        let padding = " ".repeat(INPUT_PADDING);
        let blank_line = format!("{}{}{}", BG_COLOUR, " ".repeat(INPUT_WIDTH), style::RESET);
        let title_line = format!(
            "{}{}{}{}",
            BG_COLOUR,
            FG_COLOUR,
            center_text(&self.title, INPUT_WIDTH),
            style::RESET
        );
        let input_line = format!(
            "{}{}{}{}{}{}{}{}",
            BG_COLOUR,
            padding,
            FG_COLOUR,
            INPUT_BG_COLOUR,
            display_value,
            BG_COLOUR,
            padding,
            style::RESET
        );

        self.common.content = vec![
            blank_line.clone(),
            title_line,
            blank_line.clone(),
            input_line,
            blank_line,
        ];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::overlay::{visible_text, visible_width};
    use crate::PressedKeys;
    use anymap::AnyMap;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use smallvec::SmallVec;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn typed(codes: &[KeyCode]) -> UpdateInfo {
        let mut keys: SmallVec<[KeyEvent; 16]> = SmallVec::new();
        let mut pressed = PressedKeys::new();
        for code in codes {
            pressed.record(*code);
            keys.push(KeyEvent::new(*code, KeyModifiers::NONE));
        }
        UpdateInfo {
            keys,
            pressed,
            has_resized: false,
            dt: 0.0,
        }
    }

    #[test]
    fn test_typing_appends_in_order_with_duplicates() {
        let mut extensions = AnyMap::new();
        let mut ctx = SceneContext::new(80, 24, 30.0, &mut extensions);
        let mut input = TextInput::new("Maze name", Vector2::ZERO);

        input.update(
            &typed(&[
                KeyCode::Char('a'),
                KeyCode::Char('b'),
                KeyCode::Char('b'),
                KeyCode::Char('a'),
            ]),
            &mut ctx,
        );
        assert_eq!(input.value(), "abba");

        input.update(&typed(&[KeyCode::Backspace]), &mut ctx);
        assert_eq!(input.value(), "abb");
    }

    #[test]
    fn test_backspace_on_empty_value_is_harmless() {
        let mut extensions = AnyMap::new();
        let mut ctx = SceneContext::new(80, 24, 30.0, &mut extensions);
        let mut input = TextInput::new("Maze name", Vector2::ZERO);
        input.update(&typed(&[KeyCode::Backspace]), &mut ctx);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_enter_submits_the_value() {
        let mut extensions = AnyMap::new();
        let mut ctx = SceneContext::new(80, 24, 30.0, &mut extensions);
        let submitted = Rc::new(RefCell::new(String::new()));
        let sink = submitted.clone();

        let mut input = TextInput::new("Maze name", Vector2::ZERO);
        input.on_submit(move |value, _ctx| *sink.borrow_mut() = value.to_string());

        input.update(&typed(&[KeyCode::Char('h'), KeyCode::Char('i')]), &mut ctx);
        input.update(&typed(&[KeyCode::Enter]), &mut ctx);
        assert_eq!(*submitted.borrow(), "hi");
    }

    #[test]
    fn test_render_lines_have_a_fixed_visible_width() {
        let mut extensions = AnyMap::new();
        let ctx = SceneContext::new(80, 24, 30.0, &mut extensions);
        let mut input = TextInput::new("Maze name", Vector2::ZERO);
        input.render(&ctx);

        assert_eq!(input.common().content.len(), 5);
        for line in &input.common().content {
            assert_eq!(visible_width(line), INPUT_WIDTH);
        }
        assert_eq!(visible_text(&input.common().content[1]).trim(), "Maze name");
    }

    #[test]
    fn test_overlong_value_shows_its_tail() {
        let mut extensions = AnyMap::new();
        let mut ctx = SceneContext::new(80, 24, 30.0, &mut extensions);
        let mut input = TextInput::new("Maze name", Vector2::ZERO);
        let long: Vec<KeyCode> = "abcdefghijklmnopqrstuvwxyz0123456789XYZW"
            .chars()
            .map(KeyCode::Char)
            .collect();
        input.update(&typed(&long), &mut ctx);
        input.render(&ctx);

        let line = visible_text(&input.common().content[3]);
        assert!(line.contains("XYZW"));
        assert!(!line.contains("abc"), "the head scrolled out of view");
        assert_eq!(visible_width(&input.common().content[3]), INPUT_WIDTH);
    }

    #[test]
    fn test_cursor_blinks_at_the_configured_rate() {
        let mut extensions = AnyMap::new();
        let mut ctx = SceneContext::new(80, 24, 30.0, &mut extensions);
        let mut input = TextInput::new("Maze name", Vector2::ZERO);
        assert!(input.cursor_shown);

        // 30 fps, 2 toggles/sec: 15 frames per toggle
        for _ in 0..15 {
            input.update(&typed(&[]), &mut ctx);
        }
        assert!(!input.cursor_shown);
        for _ in 0..15 {
            input.update(&typed(&[]), &mut ctx);
        }
        assert!(input.cursor_shown);
    }
}
