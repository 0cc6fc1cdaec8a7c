//! Scrolling camera that trails a target across the world.
//!
//! The camera keeps a floating-point focus point that lags behind the target
//! by a constant fraction of the distance moved each frame. Rendering offsets
//! center the viewport on the focus, except near the world's borders where
//! the viewport is pinned so nothing outside the world is shown.
//!
//! The camera never feeds back into the simulation; it only reads positions.
//!
//! # Example
//!
//! ```
//! use glam::IVec2;
//! use skyhop_core::camera::ScrollingCamera;
//! use skyhop_core::config::CameraConfig;
//!
//! let config = CameraConfig { viewport_width: 640, viewport_height: 480, lag: 0.0 };
//! let mut camera = ScrollingCamera::new(&config, IVec2::new(2000, 1000), IVec2::new(100, 100));
//! assert_eq!(camera.offsets(), IVec2::ZERO);
//!
//! camera.update(IVec2::new(1000, 500));
//! assert_eq!(camera.offsets(), IVec2::new(680, 260));
//! ```

use glam::{IVec2, Vec2};

use crate::config::CameraConfig;
use crate::geometry::Rect;

/// Lagging camera over a world of fixed size.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollingCamera {
    viewport: IVec2,
    world: IVec2,
    /// Fraction of each frame's motion the focus trails by.
    lag: f32,
    focus: Vec2,
    last_position: Vec2,
}

impl ScrollingCamera {
    /// Creates a camera focused on `target`.
    ///
    /// # Arguments
    ///
    /// * `config` - Viewport size and lag in `[0, 1)`
    /// * `world_size` - World size in pixels
    /// * `target` - Initial target center in pixels
    #[must_use]
    pub fn new(config: &CameraConfig, world_size: IVec2, target: IVec2) -> Self {
        let start = target.as_vec2();
        Self {
            viewport: IVec2::new(config.viewport_width, config.viewport_height),
            world: world_size,
            lag: config.lag.clamp(0.0, 1.0).sqrt(),
            focus: start,
            last_position: start,
        }
    }

    /// Moves the focus toward `target`, trailing by the lag factor.
    pub fn update(&mut self, target: IVec2) {
        let target = target.as_vec2();
        let delta = target - self.last_position;
        self.focus = target - delta * self.lag;
        self.last_position = self.focus;
    }

    /// Jumps the focus straight to `target`, for example after a door teleport.
    pub fn snap_to_target(&mut self, target: IVec2) {
        self.focus = target.as_vec2();
        self.last_position = self.focus;
    }

    /// Current focus point.
    #[must_use]
    pub const fn focus(&self) -> Vec2 {
        self.focus
    }

    /// Top-left corner of the viewport in world pixels.
    #[must_use]
    pub fn offsets(&self) -> IVec2 {
        let focus = self.focus.floor().as_ivec2();
        IVec2::new(
            axis_offset(focus.x, self.viewport.x, self.world.x),
            axis_offset(focus.y, self.viewport.y, self.world.y),
        )
    }

    /// The part of the world currently on screen.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        let offsets = self.offsets();
        Rect::new(offsets.x, offsets.y, self.viewport.x, self.viewport.y)
    }
}

fn axis_offset(focus: i32, screen: i32, world: i32) -> i32 {
    let half = screen / 2;
    if focus < half {
        0
    } else if focus > world - half {
        world - screen
    } else {
        focus - half
    }
}
