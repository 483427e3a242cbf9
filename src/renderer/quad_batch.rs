//! CPU vertex batch
//!
//! Collects every shape of a frame as triangles in screen pixels, and text as
//! labels. Used by the native runner and by tests; a GPU backend can upload
//! `as_bytes()` directly.

use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

use super::vertex::{Color, Vertex};
use super::{Projection, RenderSurface, ScreenRect, Shape, TextAlign};

/// Triangles per sphere disc
pub const SPHERE_SEGMENTS: usize = 8;

/// Text queued for the frame
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Pixels
    pub pos: Vec2,
    pub px: f32,
    pub align: TextAlign,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct QuadBatch {
    projection: Projection,
    vertices: Vec<Vertex>,
    labels: Vec<Label>,
}

impl QuadBatch {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            vertices: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Raw vertex bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    fn push_rect(&mut self, rect: ScreenRect, color: Color) {
        let (min, max) = (rect.min, rect.max);
        // Two triangles
        self.vertices.push(Vertex::new(min.x, min.y, color));
        self.vertices.push(Vertex::new(max.x, min.y, color));
        self.vertices.push(Vertex::new(max.x, max.y, color));

        self.vertices.push(Vertex::new(min.x, min.y, color));
        self.vertices.push(Vertex::new(max.x, max.y, color));
        self.vertices.push(Vertex::new(min.x, max.y, color));
    }

    fn push_disc(&mut self, rect: ScreenRect, color: Color) {
        let centre = rect.centre();
        let radius = rect.size().min_element() / 2.0;

        for i in 0..SPHERE_SEGMENTS {
            let a1 = (i as f32 / SPHERE_SEGMENTS as f32) * TAU;
            let a2 = ((i + 1) as f32 / SPHERE_SEGMENTS as f32) * TAU;
            let p1 = centre + Vec2::new(a1.cos(), a1.sin()) * radius;
            let p2 = centre + Vec2::new(a2.cos(), a2.sin()) * radius;

            self.vertices.push(Vertex::new(centre.x, centre.y, color));
            self.vertices.push(Vertex::new(p1.x, p1.y, color));
            self.vertices.push(Vertex::new(p2.x, p2.y, color));
        }
    }
}

impl RenderSurface for QuadBatch {
    fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
    }

    fn fill_shape(&mut self, shape: Shape, color: Color, pos: Vec3, size: Vec3) {
        let Some(rect) = self.projection.project_box(pos, size) else {
            return;
        };
        match shape {
            Shape::Rect | Shape::Cube => self.push_rect(rect, color),
            Shape::Sphere => self.push_disc(rect, color),
        }
    }

    fn fill_text(&mut self, text: &str, anchor: Vec2, px: f32, align: TextAlign, color: Color) {
        self.labels.push(Label {
            text: text.to_string(),
            pos: self.projection.anchor(anchor),
            px,
            align,
            color,
        });
    }
}
