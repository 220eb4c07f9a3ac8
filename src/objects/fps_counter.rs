//! An on-screen frame rate readout.

use crate::display::SceneContext;
use crate::objects::{ObjectCommon, RenderObject};
use crate::vector::Vector2;
use crate::{style, UpdateInfo};

// weight of the newest sample in the moving average
const SMOOTHING: f64 = 0.1;

/// Renders a smoothed frames-per-second readout.
///
/// Each frame's `dt` feeds an exponential moving average, so the number is
/// steady enough to read while still following load changes.
pub struct FpsCounter {
    common: ObjectCommon,
    average_fps: f64,
}

impl FpsCounter {
    pub fn new(position: Vector2) -> Self {
        let mut common = ObjectCommon::default();
        common.position = position;
        // on top of whatever the scene draws
        common.z_index = 100;
        Self {
            common,
            average_fps: 0.0,
        }
    }

    pub fn average_fps(&self) -> f64 {
        self.average_fps
    }
}

impl RenderObject for FpsCounter {
    fn common(&self) -> &ObjectCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ObjectCommon {
        &mut self.common
    }

    fn update(&mut self, info: &UpdateInfo, _ctx: &mut SceneContext) {
        if info.dt <= 0.0 {
            return;
        }
        let sample = 1.0 / info.dt;
        if self.average_fps == 0.0 {
            self.average_fps = sample;
        } else {
            self.average_fps = self.average_fps * (1.0 - SMOOTHING) + sample * SMOOTHING;
        }
    }

    fn render(&mut self, _ctx: &SceneContext) {
        let line = format!(
            "{}FPS: {:>5.1}{}",
            style::fg::GRAYSCALE_250,
            self.average_fps,
            style::RESET
        );
        self.common.size = Vector2::new(10, 1);
        self.common.content = vec![line];
    }
}
