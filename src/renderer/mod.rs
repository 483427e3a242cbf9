//! Rendering seam
//!
//! The game loop draws through `RenderSurface`; it never owns a drawing
//! context. `Projection` maps play-area boxes to screen pixels for both
//! variants so every surface lays the scene out the same way.

pub mod quad_batch;
pub mod vertex;

pub use quad_batch::{Label, QuadBatch};
pub use vertex::{Color, Vertex, colors};

use glam::{Vec2, Vec3, Vec3Swizzles};

use crate::config::{ArcadeConfig, Variant};
use crate::consts::depth::{CAMERA_Z, NEAR_PLANE, TAN_HALF_FOV};

/// Primitive used for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rect,
    Cube,
    Sphere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Something the game can draw on
pub trait RenderSurface {
    fn clear(&mut self);

    /// Draw a play-area box (`pos` is the min corner)
    fn fill_shape(&mut self, shape: Shape, color: Color, pos: Vec3, size: Vec3);

    /// Draw text at `anchor`, given as a fraction of the surface (0..1)
    fn fill_text(&mut self, text: &str, anchor: Vec2, px: f32, align: TextAlign, color: Color);
}

/// Screen-space rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenRect {
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn centre(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

/// Play area to screen mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub variant: Variant,
    /// Play area width/height
    pub field: Vec2,
    /// Surface size in pixels
    pub view: Vec2,
}

impl Projection {
    pub fn new(config: &ArcadeConfig, view: Vec2) -> Self {
        Self {
            variant: config.variant,
            field: Vec2::new(config.arena.width, config.arena.height),
            view,
        }
    }

    /// Project a box. Depth boxes behind the near plane yield `None`.
    pub fn project_box(&self, pos: Vec3, size: Vec3) -> Option<ScreenRect> {
        match self.variant {
            Variant::Flat => {
                let scale = self.view / self.field;
                Some(ScreenRect {
                    min: pos.xy() * scale,
                    max: (pos + size).xy() * scale,
                })
            }
            Variant::Depth => {
                let centre = pos + size / 2.0;
                let dist = CAMERA_Z - centre.z;
                if dist < NEAR_PLANE {
                    return None;
                }
                let px_per_unit = (self.view.y / 2.0) / (TAN_HALF_FOV * dist);
                // Field centre sits on the camera axis; screen y grows downward
                let offset = centre.xy() - self.field / 2.0;
                let screen = self.view / 2.0 + Vec2::new(offset.x, -offset.y) * px_per_unit;
                let half = size.xy() / 2.0 * px_per_unit;
                Some(ScreenRect {
                    min: screen - half,
                    max: screen + half,
                })
            }
        }
    }

    /// Fractional anchor to pixels
    pub fn anchor(&self, anchor: Vec2) -> Vec2 {
        anchor * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_projection_is_scale() {
        let projection = Projection::new(&ArcadeConfig::flat(), Vec2::new(400.0, 300.0));
        let rect = projection
            .project_box(Vec3::new(100.0, 100.0, 0.0), Vec3::new(50.0, 30.0, 0.0))
            .unwrap();
        assert_eq!(rect.min, Vec2::new(50.0, 50.0));
        assert_eq!(rect.size(), Vec2::new(25.0, 15.0));
    }

    #[test]
    fn test_depth_projection_shrinks_with_distance() {
        let projection = Projection::new(&ArcadeConfig::depth(), Vec2::new(800.0, 600.0));
        let near = projection
            .project_box(Vec3::new(4.5, 4.5, -5.5), Vec3::ONE)
            .unwrap();
        let far = projection
            .project_box(Vec3::new(4.5, 4.5, -20.5), Vec3::ONE)
            .unwrap();

        assert!(near.size().x > far.size().x);
        // Centred boxes land in the middle of the view
        assert!((near.centre() - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_depth_projection_culls_behind_camera() {
        let projection = Projection::new(&ArcadeConfig::depth(), Vec2::new(800.0, 600.0));
        assert!(projection.project_box(Vec3::new(4.5, 4.5, 1.0), Vec3::ONE).is_none());
    }

    #[test]
    fn test_depth_up_is_screen_up() {
        let projection = Projection::new(&ArcadeConfig::depth(), Vec2::new(800.0, 600.0));
        let high = projection
            .project_box(Vec3::new(4.5, 8.0, -5.5), Vec3::ONE)
            .unwrap();
        assert!(high.centre().y < 300.0);
    }
}
