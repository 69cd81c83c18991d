//! Game-level shapes built on the canvas primitives

use crate::rasterizer::{rotate, Canvas, Color, Vec2};

/// Geometry of a [`Shape`], relative to its position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned box centred on the position
    Rect { width: f32, height: f32 },
    /// Rotation has no visible effect on a circle
    Circle { radius: f32 },
    /// Corners as offsets from the position
    Triangle { vertices: [Vec2; 3] },
}

/// A colored shape with a position and an accumulated rotation (radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub position: Vec2,
    pub color: Color,
    pub angle: f32,
    pub kind: ShapeKind,
}

impl Shape {
    pub fn rect(position: Vec2, width: f32, height: f32, color: Color) -> Self {
        Self { position, color, angle: 0.0, kind: ShapeKind::Rect { width, height } }
    }

    pub fn circle(position: Vec2, radius: f32, color: Color) -> Self {
        Self { position, color, angle: 0.0, kind: ShapeKind::Circle { radius } }
    }

    pub fn triangle(position: Vec2, vertices: [Vec2; 3], color: Color) -> Self {
        Self { position, color, angle: 0.0, kind: ShapeKind::Triangle { vertices } }
    }

    /// Add `delta` radians to the current rotation
    pub fn rotate(&mut self, delta: f32) {
        if !matches!(self.kind, ShapeKind::Circle { .. }) {
            self.angle += delta;
        }
    }

    pub fn set_rotation(&mut self, angle: f32) {
        if self.angle != angle {
            self.rotate(angle - self.angle);
        }
    }

    /// Screen-space corners after rotation, or `None` for circles
    pub fn corners(&self) -> Option<Vec<Vec2>> {
        let local = match self.kind {
            ShapeKind::Rect { width, height } => {
                let (hw, hh) = (width * 0.5, height * 0.5);
                vec![
                    Vec2::new(-hw, -hh),
                    Vec2::new(hw, -hh),
                    Vec2::new(-hw, hh),
                    Vec2::new(hw, hh),
                ]
            }
            ShapeKind::Triangle { vertices } => vertices.to_vec(),
            ShapeKind::Circle { .. } => return None,
        };
        Some(local.into_iter().map(|v| rotate(self.angle, v) + self.position).collect())
    }

    /// Draw with the canvas's current paint
    pub fn draw(&self, canvas: &mut Canvas) {
        let (px, py) = (self.position.x, self.position.y);
        match self.kind {
            ShapeKind::Rect { width, height } if self.angle == 0.0 => {
                canvas.draw_rect(
                    self.color,
                    (px - width * 0.5) as i32,
                    (py - height * 0.5) as i32,
                    (px + width * 0.5) as i32,
                    (py + height * 0.5) as i32,
                );
            }
            ShapeKind::Circle { radius } => {
                canvas.draw_circle(self.color, px as i32, py as i32, radius as i32);
            }
            _ => {
                let Some(c) = self.corners() else {
                    return;
                };
                let p: Vec<(i32, i32)> = c.iter().map(|v| (v.x as i32, v.y as i32)).collect();
                canvas.draw_triangle(self.color, p[0].0, p[0].1, p[1].0, p[1].1, p[2].0, p[2].1);
                if p.len() == 4 {
                    canvas.draw_triangle(self.color, p[1].0, p[1].1, p[2].0, p[2].1, p[3].0, p[3].1);
                }
            }
        }
    }
}
