//! A single line of styled text.

use crate::display::SceneContext;
use crate::objects::{ObjectCommon, RenderObject};
use crate::style;
use crate::vector::Vector2;

/// A simple one-line label.
pub struct Label {
    common: ObjectCommon,
    text: String,
    foreground: &'static str,
    background: &'static str,
    needs_render: bool,
}

impl Label {
    pub fn new(text: impl Into<String>, position: Vector2) -> Self {
        let text = text.into();
        let mut common = ObjectCommon::default();
        common.position = position;
        common.size = Vector2::new(text.chars().count() as i32, 1);
        Self {
            common,
            text,
            foreground: style::fg::WHITE,
            background: "",
            needs_render: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.common.size = Vector2::new(self.text.chars().count() as i32, 1);
        self.needs_render = true;
    }

    pub fn set_foreground(&mut self, foreground: &'static str) {
        self.foreground = foreground;
        self.needs_render = true;
    }

    pub fn set_background(&mut self, background: &'static str) {
        self.background = background;
        self.needs_render = true;
    }
}

impl RenderObject for Label {
    fn common(&self) -> &ObjectCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ObjectCommon {
        &mut self.common
    }

    fn render(&mut self, _ctx: &SceneContext) {
        if !self.needs_render {
            return;
        }
        self.common.content = vec![format!(
            "{}{}{}{}",
            self.background,
            self.foreground,
            self.text,
            style::RESET
        )];
        self.needs_render = false;
    }
}
