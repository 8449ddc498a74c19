use crate::error::{Result, SandboxError};
use crate::vector::Vector2;
use serde::Deserialize;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;
pub const MIN_ITERATIONS_PER_SECOND: f32 = 0.5;
pub const MAX_ITERATIONS_PER_SECOND: f32 = 240.0;

/// How `deltaTime` is derived each frame.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    /// Wall-clock seconds since the previous frame.
    #[default]
    Realtime,
    /// `(1/60) * iterations_per_second`, independent of frame delivery.
    Constant,
}

/// Host-owned knobs, read by value once per tick.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub time_mode: TimeMode,
    pub iterations_per_second: f32,
    pub calculate_angles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_mode: TimeMode::Realtime,
            iterations_per_second: 60.0,
            calculate_angles: true,
        }
    }
}

impl Settings {
    /// Checks documented ranges. The simulation itself trusts its settings,
    /// so hosts run this before handing values over.
    pub fn validated(self) -> Result<Self> {
        let ips = self.iterations_per_second;
        if !(MIN_ITERATIONS_PER_SECOND..=MAX_ITERATIONS_PER_SECOND).contains(&ips) {
            return Err(SandboxError::InvalidSettings(format!(
                "iterations per second {ips} outside [{MIN_ITERATIONS_PER_SECOND}, {MAX_ITERATIONS_PER_SECOND}]"
            )));
        }
        Ok(self)
    }
}

/// Camera state: pan offset and a zoom that eases toward `target_zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct World {
    /// Stored but not applied to rendering.
    pub position: Vector2,
    pub zoom: f32,
    pub target_zoom: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            zoom: 1.0,
            target_zoom: 1.0,
        }
    }
}

impl World {
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vector2::new(x, y);
    }

    /// Jumps straight to `zoom`, with no easing.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.target_zoom = self.zoom;
    }

    /// Shifts the zoom target by `delta`, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn nudge_target_zoom(&mut self, delta: f32) {
        self.target_zoom = (self.target_zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// One easing step: closes 10% of the gap to the target.
    pub fn smooth_zoom(&mut self) {
        self.zoom += (self.target_zoom - self.zoom) * 0.1;
    }

    pub fn screen_to_world(&self, screen: Vector2) -> Vector2 {
        screen / self.zoom
    }

    pub fn world_to_screen(&self, world: Vector2) -> Vector2 {
        world * self.zoom
    }
}
