//! Smallest useful program: a border, a label and an FPS readout.
//! Press `q` to quit.

use termstage::objects::border::Border;
use termstage::objects::fps_counter::FpsCounter;
use termstage::objects::label::Label;
use termstage::rendering::terminal::CrosstermTerminal;
use termstage::scene::{Scene, SceneCore};
use termstage::{style, Display, SceneContext, UpdateInfo, Vector2};

#[derive(Default)]
struct HelloScene {
    core: SceneCore,
}

impl Scene for HelloScene {
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

        let text = "hello, termstage — press q to quit";
        let x = (ctx.width() as i32 - text.chars().count() as i32) / 2;
        let y = ctx.height() as i32 / 2;
        let mut label = Label::new(text, Vector2::new(x, y));
        label.set_foreground(style::fg::BRIGHT_CYAN);
        self.core.add_object(Box::new(label));
    }

    fn update(&mut self, info: &UpdateInfo, ctx: &mut SceneContext) {
        if info.pressed.did_press_char_ignore_case('q') {
            ctx.stop_rendering();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    termstage::terminal_setup()?;
    termstage::install_panic_handler();

    let terminal = CrosstermTerminal::new_with_custom_buf_writer();
    let mut display = Display::new(terminal, 60.0)?;
    display.add_scene(Box::new(HelloScene::default()), "hello");
    display.start_rendering("hello")?;

    termstage::terminal_cleanup()?;
    Ok(())
}
