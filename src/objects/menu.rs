//! A vertical menu with a selection cursor and per-item callbacks.

use crossterm::event::KeyCode;

use crate::display::SceneContext;
use crate::objects::{ObjectCommon, RenderObject};
use crate::util::center_text;
use crate::vector::Vector2;
use crate::{style, UpdateInfo};

/// Invoked when a menu item is selected with Enter.
pub type MenuCallback = Box<dyn FnMut(&mut SceneContext)>;

struct MenuItem {
    text: String,
    callback: Option<MenuCallback>,
}

// padding each side in chars
const MENU_PADDING: usize = 2;
const MENU_ITEM_PADDING: usize = 2;

const MENU_BG: &str = style::bg::GRAYSCALE_250;
const MENU_FG: &str = style::fg::BLACK;
const MENU_ITEM_BG: &str = style::bg::GRAYSCALE_245;
const MENU_ITEM_SELECTED_BG: &str = style::bg::GRAYSCALE_240;

/// A titled menu that keeps itself centred on the display.
///
/// Up/Down move the selection (wrapping), Enter runs the selected item's
/// callback. The menu re-renders only when the selection moved; a resize
/// merely recentres it, the content is position-independent.
pub struct Menu {
    common: ObjectCommon,
    title: String,
    items: Vec<MenuItem>,
    content_width: usize,
    selected: usize,
    needs_render: bool,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let content_width = title.chars().count();
        Self {
            common: ObjectCommon::default(),
            title,
            items: Vec::new(),
            content_width,
            selected: 0,
            needs_render: true,
        }
    }

    /// Adds an item with no callback; selecting it does nothing.
    pub fn add_item(&mut self, text: impl Into<String>) {
        self.push_item(text.into(), None);
    }

    /// Adds an item whose callback runs when the item is selected.
    pub fn add_item_with(
        &mut self,
        text: impl Into<String>,
        callback: impl FnMut(&mut SceneContext) + 'static,
    ) {
        self.push_item(text.into(), Some(Box::new(callback)));
    }

    fn push_item(&mut self, text: String, callback: Option<MenuCallback>) {
        self.content_width = self.content_width.max(text.chars().count());
        self.items.push(MenuItem { text, callback });
    }

    /// Index of the currently selected item.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Resets the selection cursor to the first item.
    pub fn reset_selection(&mut self) {
        self.selected = 0;
        self.needs_render = true;
    }

    fn move_up(&mut self) {
        self.selected = self.selected.checked_sub(1).unwrap_or(self.items.len().saturating_sub(1));
        self.needs_render = true;
    }

    fn move_down(&mut self) {
        self.selected += 1;
        if self.selected >= self.items.len() {
            self.selected = 0;
        }
        self.needs_render = true;
    }

    fn select_item(&mut self, ctx: &mut SceneContext) {
        if let Some(item) = self.items.get_mut(self.selected) {
            if let Some(callback) = item.callback.as_mut() {
                callback(ctx);
            }
        }
    }

    /// Sizes the menu box and recentres it on the display.
    fn calculate_sizes(&mut self, ctx: &SceneContext) {
        let menu_width = (self.content_width + 2 * (MENU_PADDING + MENU_ITEM_PADDING)) as i32;
        let menu_height = 4 + self.items.len() as i32;
        let x = ctx.width() as i32 / 2 - menu_width / 2;
        let y = ctx.height() as i32 / 2 - menu_height / 2;
        self.common.position = Vector2::new(x, y);
        self.common.size = Vector2::new(menu_width, menu_height);
    }
}

impl RenderObject for Menu {
    fn common(&self) -> &ObjectCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ObjectCommon {
        &mut self.common
    }

    fn update(&mut self, info: &UpdateInfo, ctx: &mut SceneContext) {
        if self.items.is_empty() {
            return;
        }
        if info.pressed.did_press(KeyCode::Down) {
            self.move_down();
        }
        if info.pressed.did_press(KeyCode::Up) {
            self.move_up();
        }
        if info.pressed.did_press(KeyCode::Enter) {
            self.select_item(ctx);
        }

        // a resize or the initial frame means the position is stale
        if info.has_resized || self.common.size == Vector2::ZERO {
            self.calculate_sizes(ctx);
        }
    }

    fn render(&mut self, _ctx: &SceneContext) {
        // the stored content stays valid until the selection moves
        if !self.needs_render {
            return;
        }

        let width = self.common.size.x.max(0) as usize;
        let height = 4 + self.items.len();
        let mut render = Vec::with_capacity(height);

        let blank_line = format!("{}{}{}", MENU_BG, " ".repeat(width), style::RESET);
        render.push(blank_line.clone());
        render.push(format!(
            "{}{}{}{}",
            MENU_BG,
            MENU_FG,
            center_text(&self.title, width),
            style::RESET
        ));
        render.push(blank_line.clone());

        for (i, item) in self.items.iter().enumerate() {
            let item_bg = if self.selected == i {
                MENU_ITEM_SELECTED_BG
            } else {
                MENU_ITEM_BG
            };
            render.push(format!(
                "{}{}{}{}{}{}{}{}{}{}",
                MENU_BG,
                MENU_FG,
                " ".repeat(MENU_PADDING),
                item_bg,
                " ".repeat(MENU_ITEM_PADDING),
                center_text(&item.text, self.content_width),
                " ".repeat(MENU_ITEM_PADDING),
                MENU_BG,
                " ".repeat(MENU_PADDING),
                style::RESET
            ));
        }

        render.push(blank_line);

        self.needs_render = false;
        self.common.content = render;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::overlay::{visible_text, visible_width};
    use crate::PressedKeys;
    use anymap::AnyMap;
    use smallvec::SmallVec;
    use std::cell::Cell;
    use std::rc::Rc;

    fn info_with(keys: &[KeyCode]) -> UpdateInfo {
        let mut pressed = PressedKeys::new();
        for key in keys {
            pressed.record(*key);
        }
        UpdateInfo {
            keys: SmallVec::new(),
            pressed,
            has_resized: false,
            dt: 0.0,
        }
    }

    fn test_menu() -> Menu {
        let mut menu = Menu::new("Main Menu");
        menu.add_item("Play");
        menu.add_item("Editor");
        menu.add_item("Quit");
        menu
    }

    #[test]
    fn test_selection_moves_and_wraps() {
        let mut extensions = AnyMap::new();
        let mut ctx = SceneContext::new(80, 24, 30.0, &mut extensions);
        let mut menu = test_menu();

        menu.update(&info_with(&[KeyCode::Down]), &mut ctx);
        assert_eq!(menu.selected(), 1);
        menu.update(&info_with(&[KeyCode::Down]), &mut ctx);
        menu.update(&info_with(&[KeyCode::Down]), &mut ctx);
        assert_eq!(menu.selected(), 0, "wraps past the last item");
        menu.update(&info_with(&[KeyCode::Up]), &mut ctx);
        assert_eq!(menu.selected(), 2, "wraps above the first item");
    }

    #[test]
    fn test_enter_runs_the_selected_callback() {
        let mut extensions = AnyMap::new();
        let mut ctx = SceneContext::new(80, 24, 30.0, &mut extensions);
        let chosen = Rc::new(Cell::new(false));
        let flag = chosen.clone();

        let mut menu = Menu::new("Main Menu");
        menu.add_item("Play");
        menu.add_item_with("Quit", move |_ctx| flag.set(true));

        menu.update(&info_with(&[KeyCode::Down]), &mut ctx);
        menu.update(&info_with(&[KeyCode::Enter]), &mut ctx);
        assert!(chosen.get());
    }

    #[test]
    fn test_menu_centres_itself() {
        let mut extensions = AnyMap::new();
        let mut ctx = SceneContext::new(80, 24, 30.0, &mut extensions);
        let mut menu = test_menu();
        menu.update(&info_with(&[]), &mut ctx);

        // content width is the title (9 chars), plus 2x2 padding both sides
        assert_eq!(menu.common().size, Vector2::new(17, 7));
        assert_eq!(menu.common().position, Vector2::new(32, 9));
    }

    #[test]
    fn test_render_produces_uniform_lines() {
        let mut extensions = AnyMap::new();
        let mut ctx = SceneContext::new(80, 24, 30.0, &mut extensions);
        let mut menu = test_menu();
        menu.update(&info_with(&[]), &mut ctx);
        menu.render(&ctx);

        let content = &menu.common().content;
        assert_eq!(content.len(), 7);
        for line in content {
            assert_eq!(visible_width(line), 17);
        }
        assert_eq!(visible_text(&content[1]).trim(), "Main Menu");
        assert_eq!(visible_text(&content[3]).trim(), "Play");
    }

    #[test]
    fn test_render_is_memoized_until_selection_changes() {
        let mut extensions = AnyMap::new();
        let mut ctx = SceneContext::new(80, 24, 30.0, &mut extensions);
        let mut menu = test_menu();
        menu.update(&info_with(&[]), &mut ctx);
        menu.render(&ctx);
        let before = menu.common().content.clone();

        // no input: content object is untouched
        menu.render(&ctx);
        assert_eq!(menu.common().content, before);

        menu.update(&info_with(&[KeyCode::Down]), &mut ctx);
        menu.render(&ctx);
        assert_ne!(menu.common().content, before);
    }
}
