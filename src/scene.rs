//! Scenes: the per-screen collections of render objects.
//!
//! A scene owns its objects and never mutates that collection while it is
//! being iterated: additions and removals are staged in pending queues and
//! applied at one well-defined point per frame, after compositing.

use crate::display::SceneContext;
use crate::objects::{ObjectId, RenderObject};
use crate::UpdateInfo;

/// The state every scene carries: its objects, the staged add/remove
/// queues, its registered name and whether it has been started yet.
///
/// Scene types embed one of these and hand it out through [`Scene::core`].
#[derive(Default)]
pub struct SceneCore {
    pub(crate) name: String,
    pub(crate) started: bool,
    objects: Vec<Box<dyn RenderObject>>,
    pending_add: Vec<Box<dyn RenderObject>>,
    pending_remove: Vec<ObjectId>,
    next_id: u64,
}

impl SceneCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The name the scene was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the scene's one-time `start` has already run.
    pub fn started(&self) -> bool {
        self.started
    }

    /// The objects currently in the scene, in insertion order.
    ///
    /// Objects added this frame are not in here until the pending changes
    /// are applied.
    pub fn objects(&self) -> &[Box<dyn RenderObject>] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [Box<dyn RenderObject>] {
        &mut self.objects
    }

    /// Queues an object for addition and hands back its id.
    ///
    /// The id is assigned immediately, so the scene can hold on to it
    /// before the queue is flushed; the object itself only joins
    /// [`Self::objects`] when the pending changes are applied.
    pub fn add_object(&mut self, mut object: Box<dyn RenderObject>) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        object.common_mut().id = Some(id);
        self.pending_add.push(object);
        id
    }

    /// Queues an object for removal. Removing an id that is not present is
    /// a no-op.
    pub fn remove_object(&mut self, id: ObjectId) {
        self.pending_remove.push(id);
    }

    /// Finds an object by id, looking through the live collection and the
    /// not-yet-flushed additions.
    pub fn object(&self, id: ObjectId) -> Option<&dyn RenderObject> {
        self.objects
            .iter()
            .chain(self.pending_add.iter())
            .find(|o| o.common().id == Some(id))
            .map(|o| &**o)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut dyn RenderObject> {
        self.objects
            .iter_mut()
            .chain(self.pending_add.iter_mut())
            .find(|o| o.common().id == Some(id))
            .map(|o| &mut **o)
    }

    /// Finds the first object registered under `name`.
    pub fn object_by_name(&self, name: &str) -> Option<&dyn RenderObject> {
        self.objects
            .iter()
            .chain(self.pending_add.iter())
            .find(|o| o.common().name.as_deref() == Some(name))
            .map(|o| &**o)
    }

    /// Applies the staged mutations: removals first, then additions, then
    /// both queues are cleared. Called once per frame, after compositing.
    pub fn apply_pending_changes(&mut self) {
        if !self.pending_remove.is_empty() {
            let removed = std::mem::take(&mut self.pending_remove);
            self.objects
                .retain(|o| o.common().id.is_none_or(|id| !removed.contains(&id)));
        }
        self.objects.append(&mut self.pending_add);
    }

    /// Updates every enabled object, in insertion order.
    pub fn update_objects(&mut self, info: &UpdateInfo, ctx: &mut SceneContext) {
        for object in self.objects.iter_mut() {
            if !object.common().enabled {
                continue;
            }
            object.update(info, ctx);
        }
    }

    /// Renders every enabled object, in insertion order. Stacking is a
    /// compositing concern, not a render-order concern.
    pub fn render_objects(&mut self, ctx: &SceneContext) {
        for object in self.objects.iter_mut() {
            if !object.common().enabled {
                continue;
            }
            object.render(ctx);
        }
    }
}

/// A logical screen of the application.
///
/// Scenes are registered with a display at startup and live for the whole
/// process. The first time a scene becomes active its `start` hook runs;
/// every later activation runs `restart` instead, so scenes must be
/// restart-safe (there is no teardown hook on switch-away).
pub trait Scene {
    fn core(&self) -> &SceneCore;
    fn core_mut(&mut self) -> &mut SceneCore;

    /// One-time setup, run on first activation.
    fn start(&mut self, ctx: &mut SceneContext) {}

    /// Re-entry hook, run on every activation after the first. Typically
    /// clears transient objects and resets selection state.
    fn restart(&mut self, ctx: &mut SceneContext) {}

    /// Per-frame scene logic, run before the scene's objects update.
    fn update(&mut self, info: &UpdateInfo, ctx: &mut SceneContext) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::ObjectCommon;
    use crate::display::SceneContext;

    struct Dummy {
        common: ObjectCommon,
    }

    impl Dummy {
        fn new(name: &str) -> Self {
            let mut common = ObjectCommon::default();
            common.name = Some(name.to_string());
            Self { common }
        }
    }

    impl RenderObject for Dummy {
        fn common(&self) -> &ObjectCommon {
            &self.common
        }

        fn common_mut(&mut self) -> &mut ObjectCommon {
            &mut self.common
        }

        fn render(&mut self, _ctx: &SceneContext) {}
    }

    #[test]
    fn test_additions_are_deferred_until_applied() {
        let mut core = SceneCore::new();
        let id = core.add_object(Box::new(Dummy::new("a")));
        assert!(core.objects().is_empty());
        // but the object is already reachable through its id
        assert!(core.object(id).is_some());

        core.apply_pending_changes();
        assert_eq!(core.objects().len(), 1);
        assert!(core.object(id).is_some());
    }

    #[test]
    fn test_removals_are_deferred_until_applied() {
        let mut core = SceneCore::new();
        let id = core.add_object(Box::new(Dummy::new("a")));
        core.apply_pending_changes();

        core.remove_object(id);
        assert_eq!(core.objects().len(), 1);
        core.apply_pending_changes();
        assert!(core.objects().is_empty());
    }

    #[test]
    fn test_removing_a_missing_id_is_a_noop() {
        let mut core = SceneCore::new();
        let id = core.add_object(Box::new(Dummy::new("a")));
        core.apply_pending_changes();
        core.remove_object(id);
        core.apply_pending_changes();
        // removing again must not disturb anything
        core.remove_object(id);
        core.apply_pending_changes();
        assert!(core.objects().is_empty());
    }

    #[test]
    fn test_removals_apply_before_additions() {
        let mut core = SceneCore::new();
        let first = core.add_object(Box::new(Dummy::new("first")));
        core.apply_pending_changes();

        core.remove_object(first);
        core.add_object(Box::new(Dummy::new("second")));
        core.apply_pending_changes();

        assert_eq!(core.objects().len(), 1);
        assert!(core.object_by_name("second").is_some());
        assert!(core.object_by_name("first").is_none());
    }

    #[test]
    fn test_object_lookup_by_name() {
        let mut core = SceneCore::new();
        core.add_object(Box::new(Dummy::new("status")));
        core.apply_pending_changes();
        assert!(core.object_by_name("status").is_some());
        assert!(core.object_by_name("missing").is_none());
    }

    #[test]
    fn test_ids_stay_unique_across_removals() {
        let mut core = SceneCore::new();
        let a = core.add_object(Box::new(Dummy::new("a")));
        core.apply_pending_changes();
        core.remove_object(a);
        core.apply_pending_changes();
        let b = core.add_object(Box::new(Dummy::new("b")));
        assert_ne!(a, b);
    }
}
