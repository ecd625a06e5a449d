//! CPU-side triangle batch: every shape for a frame goes into one vertex and index buffer

use crate::blob::{rings, BLOB_SLICES};
use crate::vertex::Vertex2D;
use nimbus_core::{Color, Vec2};
use nimbus_sim::{DrawCommand, SoftBlob};
use std::f32::consts::TAU;

/// Indexed triangle list built up over a frame
#[derive(Debug, Default, Clone)]
pub struct DrawBatch {
    pub vertices: Vec<Vertex2D>,
    pub indices: Vec<u32>,
}

impl DrawBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn base(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Flat rectangle from `origin` (bottom-left) spanning `size`
    pub fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.fill_rect_gradient(origin, size, color, color);
    }

    /// Rectangle shaded vertically from `bottom` to `top`
    pub fn fill_rect_gradient(&mut self, origin: Vec2, size: Vec2, bottom: Color, top: Color) {
        let base = self.base();
        let (x0, y0) = (origin.x, origin.y);
        let (x1, y1) = (origin.x + size.x, origin.y + size.y);
        self.vertices.extend_from_slice(&[
            Vertex2D::new(Vec2::new(x0, y0), bottom),
            Vertex2D::new(Vec2::new(x1, y0), bottom),
            Vertex2D::new(Vec2::new(x1, y1), top),
            Vertex2D::new(Vec2::new(x0, y1), top),
        ]);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Filled regular polygon around `center`, expanded from a fan into a triangle list.
    ///
    /// The rim has `slices + 1` vertices, the first repeated at the end to close the fan.
    pub fn fan(&mut self, center: Vec2, radius: f32, slices: u32, color: Color) {
        if slices < 3 {
            return;
        }
        let base = self.base();
        self.vertices.push(Vertex2D::new(center, color));
        for k in 0..=slices {
            let angle = TAU * k as f32 / slices as f32;
            self.vertices
                .push(Vertex2D::new(center.on_circle(radius, angle), color));
        }
        for k in 0..slices {
            self.indices
                .extend_from_slice(&[base, base + 1 + k, base + 2 + k]);
        }
    }

    /// Soft disc as layered translucent fans, smallest ring first
    pub fn soft_blob(&mut self, blob: &SoftBlob) {
        for ring in rings(blob) {
            self.fan(
                blob.center,
                ring.radius,
                BLOB_SLICES,
                blob.color.with_alpha(ring.alpha),
            );
        }
    }

    /// Append a frame's draw list in order
    pub fn extend_from_commands(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::GradientRect {
                    origin,
                    size,
                    bottom,
                    top,
                } => self.fill_rect_gradient(*origin, *size, *bottom, *top),
                DrawCommand::Rect {
                    origin,
                    size,
                    color,
                } => self.fill_rect(*origin, *size, *color),
                DrawCommand::SoftBlob(blob) => self.soft_blob(blob),
            }
        }
    }
}
