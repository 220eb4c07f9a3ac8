//! The render object contract and the bundled object types.

use std::any::Any;

use crate::display::SceneContext;
use crate::vector::Vector2;
use crate::UpdateInfo;

pub mod border;
pub mod fps_counter;
pub mod label;
pub mod menu;
pub mod text_input;

/// Handle to an object inside a scene, assigned when the object is added.
///
/// Used to look the object up or to queue its removal later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) u64);

/// The fields every render object shares.
///
/// Object types embed one of these and hand it out through
/// [`RenderObject::common`]; the scene and the compositor read position,
/// stacking and content through it.
#[derive(Debug)]
pub struct ObjectCommon {
    /// Top-left corner of the object on the display.
    pub position: Vector2,
    /// Width and height of the object.
    pub size: Vector2,
    /// Stacking key: a larger value renders on top of a smaller one.
    pub z_index: i32,
    /// Optional identifier, can be used to find the object in its scene.
    pub name: Option<String>,
    /// Disabled objects are skipped for update, render and compositing.
    pub enabled: bool,
    /// The lines produced by the last render call. May be stale until
    /// `render` runs again.
    pub content: Vec<String>,
    pub(crate) id: Option<ObjectId>,
}

impl Default for ObjectCommon {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            size: Vector2::ZERO,
            z_index: 0,
            name: None,
            enabled: true,
            content: Vec::new(),
            id: None,
        }
    }
}

impl ObjectCommon {
    /// The id assigned when the object was added to a scene.
    pub fn id(&self) -> Option<ObjectId> {
        self.id
    }
}

/// A drawable, updatable unit of a scene.
///
/// An object's two operations side-effect only the object's own state:
/// `update` reads this frame's input and timing, `render` (re)produces the
/// object's content lines. Content lines embed whatever escape sequences
/// the object needs and reset them at line end; the compositor applies no
/// styling of its own.
///
/// Objects whose layout rarely changes are expected to memoize their
/// content behind a needs-render flag and return early from `render`.
pub trait RenderObject: Any {
    fn common(&self) -> &ObjectCommon;
    fn common_mut(&mut self) -> &mut ObjectCommon;

    /// Called once per frame, before render, with everything that happened
    /// since the previous frame.
    fn update(&mut self, info: &UpdateInfo, ctx: &mut SceneContext) {}

    /// Called once per frame to produce the object's content lines.
    fn render(&mut self, ctx: &SceneContext);
}
