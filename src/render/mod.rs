use std::cmp::Ordering;

use crate::{
    config,
    types::{BodySnapshot, Rgb, Shape, Vec2},
};

pub const FILL: char = '█';

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// A grid of painted cells. Empty cells carry no color; occupancy is
/// decided entirely by paint order, so the buffer itself stays dumb.
#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Option<Rgb>>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize((width as usize).saturating_mul(height as usize), None);
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Rgb> {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        self.cells[(y as usize) * (self.width as usize) + (x as usize)]
    }

    fn paint(&mut self, x: u16, y: u16, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.cells[(y as usize) * (self.width as usize) + (x as usize)] = Some(color);
    }
}

/// World position of a cell's center.
fn cell_center(x: i32, y: i32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) * config::PX_PER_CELL_X,
        (y as f32 + 0.5) * config::PX_PER_CELL_Y,
    )
}

/// Rasterizes the frame in painter's order: lighter bodies first, so the
/// heaviest body owns any contested cell.
pub fn draw(snapshot: &[BodySnapshot], viewport: Viewport, frame: &mut FrameBuffer) {
    if frame.width() != viewport.width || frame.height() != viewport.height {
        frame.resize(viewport.width, viewport.height);
    } else {
        frame.clear();
    }

    let mut order: Vec<&BodySnapshot> = snapshot.iter().collect();
    order.sort_by(|a, b| a.mass.partial_cmp(&b.mass).unwrap_or(Ordering::Equal));

    for body in order {
        match body.shape {
            Shape::Circle { radius } => draw_circle(body, radius, viewport, frame),
            Shape::Polygon { sides, radius } => {
                draw_polygon(body, sides, radius, viewport, frame)
            }
            // Walls are invisible by construction and never reach the
            // snapshot; any other rect has no visual.
            Shape::Rect { .. } => {}
        }
    }
}

fn draw_circle(body: &BodySnapshot, radius: f32, viewport: Viewport, frame: &mut FrameBuffer) {
    let (x0, y0, x1, y1) = cell_bounds(body.pos, radius, viewport);
    let radius_sq = radius * radius;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let delta = cell_center(x, y) - body.pos;
            if delta.length_sq() <= radius_sq {
                frame.paint(x as u16, y as u16, body.color);
            }
        }
    }
}

fn draw_polygon(
    body: &BodySnapshot,
    sides: u32,
    radius: f32,
    viewport: Viewport,
    frame: &mut FrameBuffer,
) {
    let sides = sides.max(3) as usize;
    let mut verts = Vec::with_capacity(sides);
    for k in 0..sides {
        let angle = body.angle + k as f32 * std::f32::consts::TAU / sides as f32;
        verts.push(body.pos + Vec2::new(angle.cos() * radius, angle.sin() * radius));
    }
    let (x0, y0, x1, y1) = cell_bounds(body.pos, radius, viewport);
    for y in y0..=y1 {
        for x in x0..=x1 {
            if point_in_convex(cell_center(x, y), &verts) {
                frame.paint(x as u16, y as u16, body.color);
            }
        }
    }
}

/// Cell-space bounding box of a disc, clamped to the viewport.
fn cell_bounds(pos: Vec2, radius: f32, viewport: Viewport) -> (i32, i32, i32, i32) {
    let x0 = ((pos.x - radius) / config::PX_PER_CELL_X).floor() as i32;
    let x1 = ((pos.x + radius) / config::PX_PER_CELL_X).ceil() as i32;
    let y0 = ((pos.y - radius) / config::PX_PER_CELL_Y).floor() as i32;
    let y1 = ((pos.y + radius) / config::PX_PER_CELL_Y).ceil() as i32;
    (
        x0.max(0),
        y0.max(0),
        x1.min(viewport.width as i32 - 1),
        y1.min(viewport.height as i32 - 1),
    )
}

/// Same-side test for a convex polygon with consistent winding.
fn point_in_convex(p: Vec2, verts: &[Vec2]) -> bool {
    let mut sign = 0.0_f32;
    for k in 0..verts.len() {
        let a = verts[k];
        let b = verts[(k + 1) % verts.len()];
        let edge = b - a;
        let to_p = p - a;
        let cross = edge.x * to_p.y - edge.y * to_p.x;
        if cross != 0.0 {
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
    }
    true
}
