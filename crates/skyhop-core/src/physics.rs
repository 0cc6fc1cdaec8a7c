//! Shared physics contract for every moving entity.
//!
//! Each primitive operates on a [`Body`] against a [`WorldView`] of the rest
//! of the level. Concrete behaviors compose them in a fixed order:
//!
//! ```text
//! check_water -> apply_gravity -> move_x -> check_platforms_x
//!             -> move_y -> check_platforms_y -> check_world_edges
//!             -> check_world_bottom -> (animate)
//! ```
//!
//! Horizontal displacement is resolved completely before the vertical move,
//! so a body moving diagonally into a corner is stopped by the wall first and
//! cannot tunnel.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use glam::IVec2;
//! use skyhop_core::config::SimConfig;
//! use skyhop_core::entity::{Body, EntityInner, PlatformBehavior, PlatformComponents};
//! use skyhop_core::geometry::Rect;
//! use skyhop_core::world::World;
//! use skyhop_core::world_view::WorldView;
//!
//! let config = Arc::new(SimConfig::default());
//! let mut world = World::new(640, 640, Arc::clone(&config));
//! world.spawn(EntityInner::Platform(PlatformComponents {
//!     body: Body::new(Rect::new(0, 128, 640, 64)),
//!     behavior: PlatformBehavior::Static,
//! }));
//! let view = WorldView::new(&world);
//!
//! let mut body = Body::new(Rect::new(100, 60, 64, 64)).with_velocity(IVec2::new(0, 8));
//! body.move_y();
//! assert!(body.check_platforms_y(&view));
//! assert_eq!(body.rect.bottom(), 128);
//! assert_eq!(body.velocity.y, 0);
//! assert!(body.on_platform(&view));
//! ```

use glam::IVec2;

use crate::config::{PhysicsConfig, SimConfig};
use crate::entity::{Body, EntityTag};
use crate::geometry::Rect;
use crate::world_view::WorldView;

impl Body {
    /// Centers the box on a grid tile.
    pub fn move_to(&mut self, grid: IVec2, config: &SimConfig) {
        self.rect.set_center(config.tile_center(grid));
    }

    /// Accelerates downward, capped at terminal velocity.
    ///
    /// Uses the fluid constants while `in_water` is set.
    pub fn apply_gravity(&mut self, physics: &PhysicsConfig) {
        let (gravity, terminal) = if self.in_water {
            (physics.water_gravity, physics.water_terminal_velocity)
        } else {
            (physics.gravity, physics.terminal_velocity)
        };
        self.velocity.y = (self.velocity.y + gravity).min(terminal);
    }

    /// Integrates horizontal velocity.
    pub fn move_x(&mut self) {
        self.rect.x += self.velocity.x;
    }

    /// Integrates vertical velocity.
    pub fn move_y(&mut self) {
        self.rect.y += self.velocity.y;
    }

    /// Reverses horizontal direction.
    pub fn turn_around(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    /// Recomputes `in_water` from fluid overlap and returns it.
    pub fn check_water(&mut self, view: &WorldView<'_>) -> bool {
        self.in_water = view.in_fluid(self.rect);
        self.in_water
    }

    /// Returns true if a solid lies directly below the box.
    ///
    /// Probes a copy shifted one pixel down; the body is never moved.
    #[must_use]
    pub fn on_platform(&self, view: &WorldView<'_>) -> bool {
        view.any_overlapping(self.rect.translated(0, 1), EntityTag::SOLIDS)
    }

    /// Pushes the box out of solids along the horizontal direction of travel.
    ///
    /// Moving right snaps `right` to the solid's left edge, moving left snaps
    /// `left` to its right edge. Horizontal velocity is left untouched so
    /// patrolling bodies can turn around instead of stopping.
    ///
    /// # Returns
    ///
    /// True if any solid was overlapped.
    pub fn check_platforms_x(&mut self, view: &WorldView<'_>) -> bool {
        let hits = view.solid_rects(self.rect);
        let dx = self.velocity.x;
        self.snap_x(&hits, dx);
        !hits.is_empty()
    }

    /// Pushes the box out of solids along the vertical direction of travel.
    ///
    /// Falling snaps `bottom` to the solid's top, rising snaps `top` to its
    /// bottom. Any hit zeroes vertical velocity.
    ///
    /// # Returns
    ///
    /// True if any solid was overlapped.
    pub fn check_platforms_y(&mut self, view: &WorldView<'_>) -> bool {
        let hits = view.solid_rects(self.rect);
        for platform in &hits {
            if self.velocity.y > 0 {
                self.rect.set_bottom(platform.top());
            } else if self.velocity.y < 0 {
                self.rect.set_top(platform.bottom());
            }
        }
        if hits.is_empty() {
            false
        } else {
            self.velocity.y = 0;
            true
        }
    }

    /// Returns true when the body should turn to avoid walking off a ledge.
    ///
    /// The body is "at edge" unless a solid one pixel below extends at least
    /// to its leading edge: the left edge when moving left, the right edge
    /// when moving right. A body with no horizontal velocity is always at edge.
    #[must_use]
    pub fn check_platform_edges(&self, view: &WorldView<'_>) -> bool {
        let below = view.solid_rects(self.rect.translated(0, 1));
        let supported = below.iter().any(|platform| {
            if self.velocity.x < 0 {
                platform.left() <= self.rect.left()
            } else if self.velocity.x > 0 {
                platform.right() >= self.rect.right()
            } else {
                false
            }
        });
        !supported
    }

    /// Clamps the box horizontally into `[0, world width]`.
    ///
    /// # Returns
    ///
    /// True if a clamp happened.
    pub fn check_world_edges(&mut self, view: &WorldView<'_>) -> bool {
        if self.rect.left() < 0 {
            self.rect.set_left(0);
            true
        } else if self.rect.right() > view.width() {
            self.rect.set_right(view.width());
            true
        } else {
            false
        }
    }

    /// Returns true once the top edge has dropped below the world.
    #[must_use]
    pub fn check_world_bottom(&self, view: &WorldView<'_>) -> bool {
        self.rect.top() > view.height()
    }

    /// Displaces the box by `dx` (for example when carried by a platform),
    /// resolving solids and world edges as for a move of that size.
    ///
    /// # Returns
    ///
    /// True if the displacement was blocked.
    pub fn shift_x(&mut self, dx: i32, view: &WorldView<'_>) -> bool {
        self.rect.x += dx;
        let hits = view.solid_rects(self.rect);
        self.snap_x(&hits, dx);
        let clamped = self.check_world_edges(view);
        !hits.is_empty() || clamped
    }

    /// Moves the box out of `hits` against the direction of travel `dx`.
    pub(crate) fn snap_x(&mut self, hits: &[Rect], dx: i32) {
        for platform in hits {
            if dx > 0 {
                self.rect.set_right(platform.left());
            } else if dx < 0 {
                self.rect.set_left(platform.right());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::entity::{EntityInner, FluidComponents, PlatformBehavior, PlatformComponents};
    use crate::level::FluidKind;
    use crate::world::World;

    fn world(platforms: &[Rect]) -> World {
        let mut world = World::new(640, 640, Arc::new(SimConfig::default()));
        for rect in platforms {
            world.spawn(EntityInner::Platform(PlatformComponents {
                body: Body::new(*rect),
                behavior: PlatformBehavior::Static,
            }));
        }
        world
    }

    fn body(x: i32, y: i32, vx: i32, vy: i32) -> Body {
        Body::new(Rect::new(x, y, 64, 64)).with_velocity(IVec2::new(vx, vy))
    }

    mod gravity_tests {
        use super::*;

        #[test]
        fn accelerates_until_terminal() {
            let physics = PhysicsConfig::default();
            let mut b = body(0, 0, 0, 19);
            b.apply_gravity(&physics);
            assert_eq!(b.velocity.y, 20);
            b.apply_gravity(&physics);
            assert_eq!(b.velocity.y, 20);
        }

        #[test]
        fn water_uses_fluid_terminal_velocity() {
            let physics = PhysicsConfig::default();
            let mut b = body(0, 0, 0, 10);
            b.in_water = true;
            b.apply_gravity(&physics);
            assert_eq!(b.velocity.y, physics.water_terminal_velocity);
        }

        #[test]
        fn check_water_tracks_fluid_overlap() {
            let mut w = world(&[]);
            w.spawn(EntityInner::Fluid(FluidComponents {
                kind: FluidKind::Water,
                rect: Rect::new(0, 300, 640, 200),
            }));
            let view = WorldView::new(&w);

            let mut dry = body(0, 0, 0, 0);
            assert!(!dry.check_water(&view));
            let mut wet = body(0, 280, 0, 0);
            assert!(wet.check_water(&view));
            assert!(wet.in_water);
        }
    }

    mod axis_tests {
        use super::*;

        #[test]
        fn x_hit_snaps_but_keeps_velocity() {
            let w = world(&[Rect::new(200, 0, 64, 64)]);
            let view = WorldView::new(&w);

            let mut b = body(130, 0, 10, 0);
            b.move_x();
            assert!(b.check_platforms_x(&view));
            assert_eq!(b.rect.right(), 200);
            assert_eq!(b.velocity.x, 10);

            let mut b = body(270, 0, -10, 0);
            b.move_x();
            assert!(b.check_platforms_x(&view));
            assert_eq!(b.rect.left(), 264);
        }

        #[test]
        fn rising_hit_snaps_top_and_stops() {
            let w = world(&[Rect::new(0, 0, 640, 64)]);
            let view = WorldView::new(&w);

            let mut b = body(100, 70, 0, -10);
            b.move_y();
            assert!(b.check_platforms_y(&view));
            assert_eq!(b.rect.top(), 64);
            assert_eq!(b.velocity.y, 0);
        }

        #[test]
        fn no_hit_leaves_velocity() {
            let w = world(&[]);
            let view = WorldView::new(&w);
            let mut b = body(100, 100, 3, 7);
            b.move_x();
            b.move_y();
            assert!(!b.check_platforms_x(&view));
            assert!(!b.check_platforms_y(&view));
            assert_eq!(b.velocity, IVec2::new(3, 7));
            assert_eq!(b.rect.position(), IVec2::new(103, 107));
        }

        #[test]
        fn corner_is_resolved_by_x_first() {
            // wall to the right, floor below; moving diagonally into the corner
            let w = world(&[Rect::new(200, 0, 64, 300), Rect::new(0, 300, 640, 64)]);
            let view = WorldView::new(&w);

            let mut b = body(130, 230, 10, 10);
            b.move_x();
            b.check_platforms_x(&view);
            b.move_y();
            b.check_platforms_y(&view);

            assert_eq!(b.rect.right(), 200);
            assert_eq!(b.rect.bottom(), 300);
        }
    }

    mod ground_check_tests {
        use super::*;

        #[test]
        fn on_platform_detects_touching_floor() {
            let w = world(&[Rect::new(0, 200, 640, 64)]);
            let view = WorldView::new(&w);
            assert!(body(100, 136, 0, 0).on_platform(&view));
            assert!(!body(100, 135, 0, 0).on_platform(&view));
        }

        #[test]
        fn ledge_detection_follows_travel_direction() {
            let w = world(&[Rect::new(0, 200, 200, 64)]);
            let view = WorldView::new(&w);

            // fully supported
            assert!(!body(50, 136, 2, 0).check_platform_edges(&view));
            assert!(!body(50, 136, -2, 0).check_platform_edges(&view));
            // hanging over the right end
            assert!(body(150, 136, 2, 0).check_platform_edges(&view));
            assert!(!body(150, 136, -2, 0).check_platform_edges(&view));
            // idle bodies always report an edge
            assert!(body(50, 136, 0, 0).check_platform_edges(&view));
        }

        #[test]
        fn world_edges_clamp_both_sides() {
            let w = world(&[]);
            let view = WorldView::new(&w);

            let mut b = body(-5, 0, -3, 0);
            assert!(b.check_world_edges(&view));
            assert_eq!(b.rect.left(), 0);

            let mut b = body(600, 0, 3, 0);
            assert!(b.check_world_edges(&view));
            assert_eq!(b.rect.right(), 640);

            let mut b = body(10, 0, 3, 0);
            assert!(!b.check_world_edges(&view));
        }

        #[test]
        fn world_bottom_uses_top_edge() {
            let w = world(&[]);
            let view = WorldView::new(&w);
            assert!(!body(0, 640, 0, 0).check_world_bottom(&view));
            assert!(body(0, 641, 0, 0).check_world_bottom(&view));
        }

        #[test]
        fn move_to_centers_on_tile() {
            let mut b = body(0, 0, 0, 0);
            b.move_to(IVec2::new(5, 5), &SimConfig::default());
            assert_eq!(b.rect, Rect::new(320, 320, 64, 64));
        }

        #[test]
        fn shift_x_is_blocked_by_walls() {
            let w = world(&[Rect::new(200, 0, 64, 64)]);
            let view = WorldView::new(&w);

            let mut b = body(130, 0, 0, 0);
            assert!(b.shift_x(10, &view));
            assert_eq!(b.rect.right(), 200);
            assert!(!b.shift_x(-10, &view));
            assert_eq!(b.rect.right(), 190);
        }
    }
}
