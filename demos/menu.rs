//! Menu navigation between two scenes.
//!
//! The main menu leads to a text-input screen; submitting there hands the
//! value back through the shared extension state and returns to the menu,
//! which shows it. Exercises start/restart, deferred object swaps and
//! cross-scene state.

use termstage::objects::border::{Border, BorderSection};
use termstage::objects::fps_counter::FpsCounter;
use termstage::objects::label::Label;
use termstage::objects::menu::Menu;
use termstage::objects::text_input::{TextInput, INPUT_WIDTH};
use termstage::objects::ObjectId;
use termstage::rendering::terminal::CrosstermTerminal;
use termstage::scene::{Scene, SceneCore};
use termstage::{style, Display, SceneContext, UpdateInfo, Vector2};

use crossterm::event::KeyCode;

/// The value last submitted on the typing screen.
struct LastInput(String);

#[derive(Default)]
struct MainMenuScene {
    core: SceneCore,
    menu_id: Option<ObjectId>,
    status_id: Option<ObjectId>,
}

impl MainMenuScene {
    fn build_menu() -> Menu {
        let mut menu = Menu::new("termstage demo");
        menu.add_item_with("Type something", |ctx| ctx.switch_scene("typing"));
        menu.add_item("Not hooked up");
        menu.add_item_with("Quit", |ctx| ctx.stop_rendering());
        menu
    }

    fn show_menu(&mut self, ctx: &mut SceneContext) {
        if let Some(id) = self.menu_id.take() {
            self.core.remove_object(id);
        }
        if let Some(id) = self.status_id.take() {
            self.core.remove_object(id);
        }

        self.menu_id = Some(self.core.add_object(Box::new(Self::build_menu())));

        if let Some(LastInput(value)) = ctx.extensions.get::<LastInput>() {
            let text = format!("you typed: {value}");
            let x = (ctx.width() as i32 - text.chars().count() as i32) / 2;
            let y = ctx.height() as i32 - 3;
            let mut status = Label::new(text, Vector2::new(x, y));
            status.set_foreground(style::fg::GRAYSCALE_250);
            self.status_id = Some(self.core.add_object(Box::new(status)));
        }
    }
}

impl Scene for MainMenuScene {
    fn core(&self) -> &SceneCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }

    fn start(&mut self, ctx: &mut SceneContext) {
        self.core.add_object(Box::new(Border::new()));
        self.core
            .add_object(Box::new(FpsCounter::new(Vector2::new(2, 1))));
        self.show_menu(ctx);
    }

    fn restart(&mut self, ctx: &mut SceneContext) {
        // coming back from another screen: fresh menu, fresh status line
        self.show_menu(ctx);
    }
}

#[derive(Default)]
struct TypingScene {
    core: SceneCore,
    input_id: Option<ObjectId>,
}

impl TypingScene {
    fn show_input(&mut self, ctx: &SceneContext) {
        if let Some(id) = self.input_id.take() {
            self.core.remove_object(id);
        }

        let x = (ctx.width() as i32 - INPUT_WIDTH as i32) / 2;
        let y = ctx.height() as i32 / 2 - 2;
        let mut input = TextInput::new("Say something", Vector2::new(x, y));
        input.on_submit(|value, ctx| {
            ctx.extensions.insert(LastInput(value.to_string()));
            ctx.switch_scene("mainMenu");
        });
        self.input_id = Some(self.core.add_object(Box::new(input)));
    }
}

impl Scene for TypingScene {
    fn core(&self) -> &SceneCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }

    fn start(&mut self, ctx: &mut SceneContext) {
        let width = ctx.width() as i32;
        let height = ctx.height() as i32;
        self.core
            .add_object(Box::new(Border::with_sections(vec![BorderSection::new(
                Vector2::new(0, height - 3),
                Vector2::new(width, 3),
            )])));

        let hint = Label::new("Enter submits, Esc goes back", Vector2::new(2, height - 2));
        self.core.add_object(Box::new(hint));

        self.show_input(ctx);
    }

    fn restart(&mut self, ctx: &mut SceneContext) {
        // the previous visit's half-typed value should not linger
        self.show_input(ctx);
    }

    fn update(&mut self, info: &UpdateInfo, ctx: &mut SceneContext) {
        if info.pressed.did_press(KeyCode::Esc) {
            ctx.switch_scene("mainMenu");
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    termstage::terminal_setup()?;
    termstage::install_panic_handler();

    let terminal = CrosstermTerminal::new_with_custom_buf_writer();
    let mut display = Display::new(terminal, 20.0)?;
    display.add_scene(Box::new(MainMenuScene::default()), "mainMenu");
    display.add_scene(Box::new(TypingScene::default()), "typing");
    display.start_rendering("mainMenu")?;

    termstage::terminal_cleanup()?;
    Ok(())
}
