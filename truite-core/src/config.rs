//! Scene configuration and startup constants

use nalgebra::Point3;

use crate::color::Color;
use crate::error::ConfigError;

/// Everything a [`Scene`](crate::Scene) needs to know before the first frame.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Horizontal field of view in degrees, strictly between 0 and 180.
    pub fov_degrees: f32,
    pub camera_position: Point3<f32>,
    pub background: Color,
    pub light_background: Color,
    pub center_marker: Color,
    /// Camera translation speed in world units per second.
    pub camera_speed: f32,
    /// Focal length change in units per second.
    pub zoom_speed: f32,
}

impl SceneConfig {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::ScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        // NaN fails both comparisons
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(self.fov_degrees));
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            screen_width: 500,
            screen_height: 480,
            fov_degrees: 60.0,
            camera_position: Point3::new(200.0, 150.0, 0.0),
            background: Color::BLACK,
            light_background: Color::WHITE,
            center_marker: Color::MAGENTA,
            camera_speed: 90.0,
            zoom_speed: 300.0,
        }
    }
}
