//! Widget coordinate space and the image mesh.
//!
//! Widgets are positioned in pixels relative to the viewport centre with +y
//! pointing up. On a rotated display the logical frame is turned a quarter:
//! widget x runs down the physical screen and widget y runs to the left.
//!
//! # Mesh
//!
//! Every image builds the same 32-vertex mesh once: a 4×4 grid whose inner
//! 2×2 quad is opaque while the border ring is transparent, followed by a
//! vertically mirrored copy darkened with distance from the mirror line.
//! Only the opaque quad is rasterised; its extent is what maps an image's
//! size onto the screen.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Coordinates
// =============================================================================

/// 2D vector in widget space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Convert a widget-space point to normalized device coordinates.
pub fn to_ndc(viewport: Size, rotated: bool, point: Vec2) -> Vec2 {
    let half_w = viewport.width as f32 / 2.0;
    let half_h = viewport.height as f32 / 2.0;
    if rotated {
        Vec2::new(-point.y / half_w, point.x / half_h)
    } else {
        Vec2::new(point.x / half_w, point.y / half_h)
    }
}

/// Physical screen rectangle covered by a widget centred at `center` with
/// the given `size`, both in widget space.
pub fn screen_rect(viewport: Size, rotated: bool, center: Vec2, size: Vec2) -> Rectangle {
    let half_w = viewport.width as f32 / 2.0;
    let half_h = viewport.height as f32 / 2.0;
    let (cx, cy, w, h) = if rotated {
        (half_w - center.y, half_h - center.x, size.y, size.x)
    } else {
        (half_w + center.x, half_h - center.y, size.x, size.y)
    };
    let (w, h) = (w.abs(), h.abs());

    let left = (cx - w / 2.0).round() as i32;
    let right = (cx + w / 2.0).round() as i32;
    let top = (cy - h / 2.0).round() as i32;
    let bottom = (cy + h / 2.0).round() as i32;
    Rectangle::new(
        Point::new(left, top),
        Size::new((right - left).max(0) as u32, (bottom - top).max(0) as u32),
    )
}

/// Physical pixel centre of a widget-space point.
pub fn screen_point(viewport: Size, rotated: bool, point: Vec2) -> Point {
    let half_w = viewport.width as f32 / 2.0;
    let half_h = viewport.height as f32 / 2.0;
    if rotated {
        Point::new((half_w - point.y).round() as i32, (half_h - point.x).round() as i32)
    } else {
        Point::new((half_w + point.x).round() as i32, (half_h - point.y).round() as i32)
    }
}

// =============================================================================
// Mesh
// =============================================================================

/// Vertices in one grid (the mirrored copy doubles it).
const GRID_VERTICES: usize = 16;

/// Total vertex count including the reflection.
pub const MESH_VERTEX_COUNT: usize = GRID_VERTICES * 2;

/// Two triangles covering the opaque centre quad.
pub const OPAQUE_INDICES: [u16; 6] = [6, 5, 9, 6, 9, 10];

/// Interior vertices drawn fully opaque.
const OPAQUE_VERTICES: [usize; 4] = [5, 6, 9, 10];

/// Half extent of the unit quad.
const HALF: f32 = 0.5;

/// Interleaved vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

/// Image mesh, built once per image.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: [Vertex; MESH_VERTEX_COUNT],
}

impl Mesh {
    /// Build the grid and its reflection. `height` is the image height in
    /// pixels and controls how quickly the reflection darkens.
    pub fn build(height: f32) -> Self {
        let mut vertices = [Vertex::default(); MESH_VERTEX_COUNT];

        for (i, vertex) in vertices.iter_mut().take(GRID_VERTICES).enumerate() {
            let (row, col) = (i / 4, i % 4);
            let x = if col < 2 { -HALF } else { HALF };
            let y = if row < 2 { HALF } else { -HALF };
            vertex.position = [x, y, 0.0];
            vertex.normal = [0.0, 1.0, 0.0];
            vertex.color = [1.0, 1.0, 1.0, 0.0];
            vertex.uv = [x + HALF, y + HALF];
        }
        for i in OPAQUE_VERTICES {
            vertices[i].color[3] = 1.0;
        }

        for row in 0..4 {
            let y = vertices[row * 4].position[1];
            // Fades with distance from the mirror line.
            let dark = if height > 0.0 { (-y / height).clamp(0.0, 1.0) } else { 0.0 };
            for col in 0..4 {
                let src = row * 4 + col;
                let mut mirrored = vertices[src];
                mirrored.position[1] = -mirrored.position[1];
                mirrored.color[0] = dark;
                mirrored.color[1] = dark;
                mirrored.color[2] = dark;
                vertices[src + GRID_VERTICES] = mirrored;
            }
        }

        Self { vertices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub const fn opaque_indices(&self) -> &'static [u16] {
        &OPAQUE_INDICES
    }

    /// Unit-space extent (width, height) of the opaque quad.
    pub fn opaque_extent(&self) -> Vec2 {
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (f32::MAX, f32::MIN, f32::MAX, f32::MIN);
        for &idx in &OPAQUE_INDICES {
            let [x, y, _] = self.vertices[idx as usize].position;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        Vec2::new(max_x - min_x, max_y - min_y)
    }
}
