//! 2D vector math and affine transforms for sprite blits

use std::ops::{Add, Mul, Sub};
use serde::{Serialize, Deserialize};
use super::error::RasterError;

/// Pivots smaller than this make a matrix count as singular
const PIVOT_EPSILON: f32 = 1e-6;

/// 2D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

/// Rotate `v` counter-clockwise (in y-up terms) by `angle` radians about the origin
pub fn rotate(angle: f32, v: Vec2) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2 {
        x: cos * v.x - sin * v.y,
        y: sin * v.x + cos * v.y,
    }
}

pub fn deg_to_rad(angle: f32) -> f32 {
    angle.to_radians()
}

pub fn rad_to_deg(angle: f32) -> f32 {
    angle.to_degrees()
}

/// Row-major 3x3 matrix acting on column vectors `(x, y, 1)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3(pub [[f32; 3]; 3]);

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Mat3([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn translation(dx: f32, dy: f32) -> Self {
        Mat3([[1.0, 0.0, dx], [0.0, 1.0, dy], [0.0, 0.0, 1.0]])
    }

    pub fn scaling(sx: f32, sy: f32) -> Self {
        Mat3([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Apply to the homogeneous point (x, y, 1). A zero `w` is treated as 1.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.0;
        let ox = m[0][0] * x + m[0][1] * y + m[0][2];
        let oy = m[1][0] * x + m[1][1] * y + m[1][2];
        let w = m[2][0] * x + m[2][1] * y + m[2][2];
        let w = if w == 0.0 { 1.0 } else { w };
        (ox / w, oy / w)
    }

    /// Gauss-Jordan elimination with partial pivoting
    pub fn inverse(&self) -> Result<Mat3, RasterError> {
        let mut a = self.0;
        let mut inv = Mat3::IDENTITY.0;

        for col in 0..3 {
            let pivot_row = (col..3)
                .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
                .unwrap_or(col);
            if !(a[pivot_row][col].abs() >= PIVOT_EPSILON) {
                return Err(RasterError::DegenerateTransform);
            }
            a.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            let pivot = a[col][col];
            for k in 0..3 {
                a[col][k] /= pivot;
                inv[col][k] /= pivot;
            }

            for row in 0..3 {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..3 {
                    a[row][k] -= factor * a[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        Ok(Mat3(inv))
    }
}

impl Mul for Mat3 {
    type Output = Mat3;
    fn mul(self, other: Mat3) -> Mat3 {
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.0[r][k] * other.0[k][c]).sum();
            }
        }
        Mat3(out)
    }
}

/// Affine transform with a lazily recomputed inverse.
///
/// Each operation right-multiplies the forward matrix, so the operation applied
/// last acts on points first. `Transform::new().translate(50.0, 50.0).rotate(a)`
/// rotates about the origin and then moves the result to (50, 50).
#[derive(Debug, Clone)]
pub struct Transform {
    forward: Mat3,
    inverse: Mat3,
    inverse_dirty: bool,
}

impl Transform {
    pub fn new() -> Self {
        Self {
            forward: Mat3::IDENTITY,
            inverse: Mat3::IDENTITY,
            inverse_dirty: false,
        }
    }

    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        self.compose(Mat3::rotation(angle))
    }

    pub fn translate(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.compose(Mat3::translation(dx, dy))
    }

    pub fn scale(&mut self, sx: f32, sy: f32) -> &mut Self {
        self.compose(Mat3::scaling(sx, sy))
    }

    fn compose(&mut self, op: Mat3) -> &mut Self {
        self.forward = self.forward * op;
        self.inverse_dirty = true;
        self
    }

    /// Back to identity with a valid inverse
    pub fn reset(&mut self) {
        self.forward = Mat3::IDENTITY;
        self.inverse = Mat3::IDENTITY;
        self.inverse_dirty = false;
    }

    pub fn forward(&self, x: f32, y: f32) -> (f32, f32) {
        self.forward.apply(x, y)
    }

    /// Map through the inverse. Only meaningful after a successful `invert()`
    /// since the last composition.
    pub fn backward(&self, x: f32, y: f32) -> (f32, f32) {
        self.inverse.apply(x, y)
    }

    /// Recompute the inverse if stale. A singular matrix leaves it stale.
    pub fn invert(&mut self) -> Result<(), RasterError> {
        if !self.inverse_dirty {
            return Ok(());
        }
        self.inverse = self.forward.inverse()?;
        self.inverse_dirty = false;
        Ok(())
    }

    pub fn is_inverse_stale(&self) -> bool {
        self.inverse_dirty
    }

    pub fn matrix(&self) -> &Mat3 {
        &self.forward
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
