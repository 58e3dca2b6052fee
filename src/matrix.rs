//! Column-major 4x4 transformation matrices.
//!
//! [`Mat4`] is a flat `[f32; 16]` laid out the way `glUniformMatrix4fv`
//! expects with `transpose = false`: element `(column, row)` lives at index
//! `column * 4 + row`. Every helper returns a new matrix:
//!
//! ```
//! use gl_samples::{Deg, matrix::Mat4};
//!
//! let world = Mat4::identity().rotate_y(Deg(30.0)).rotate_x(Deg(7.5));
//! let proj = Mat4::perspective(Deg(45.0), 640.0 / 480.0, 0.1, 1000.0);
//! let clip = proj * world;
//! # let _ = clip;
//! ```
//!
//! A vertex `v` is transformed as `projection * view * world * v`.

use std::ops::{Index, Mul};

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, Vector3, Vector4};

/// A 4x4 matrix stored as 16 column-major `f32`s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4(pub [f32; 16]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, //
    ]);

    /// The multiplicative identity.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Symmetric right-handed perspective projection.
    ///
    /// `fovy` is the vertical field of view. Points at view-space depth
    /// `z = -near` land on NDC depth `-1` and points at `z = -far` on `+1`.
    /// `near` and `far` must differ; the result is meaningless otherwise.
    pub fn perspective(fovy: impl Into<Rad<f32>>, aspect: f32, near: f32, far: f32) -> Self {
        debug_assert!(near != far, "near and far clip planes must differ");
        let Rad(fovy) = fovy.into();
        let f = 1.0 / (fovy / 2.0).tan();

        let mut m = [0.0; 16];
        m[0] = f / aspect;
        m[5] = f;
        m[10] = (far + near) / (near - far);
        m[11] = -1.0;
        m[14] = (2.0 * far * near) / (near - far);
        Self(m)
    }

    /// View transform for a camera at `eye` looking at `target`.
    ///
    /// The rotation rows are the Gram-Schmidt basis `right`, `up`,
    /// `-forward`; the translation column moves `eye` to the origin.
    /// `target == eye` or `up` parallel to the view direction is undefined.
    pub fn look_at(eye: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        let eye = eye.to_vec();

        Self([
            right.x,
            up.x,
            -forward.x,
            0.0,
            right.y,
            up.y,
            -forward.y,
            0.0,
            right.z,
            up.z,
            -forward.z,
            0.0,
            -right.dot(eye),
            -up.dot(eye),
            forward.dot(eye),
            1.0,
        ])
    }

    /// Returns `Rx(angle) * self`, a counter-clockwise turn about +X.
    pub fn rotate_x(self, angle: impl Into<Rad<f32>>) -> Self {
        self.rotate_plane(1, 2, angle.into())
    }

    /// Returns `Ry(angle) * self`, a counter-clockwise turn about +Y.
    pub fn rotate_y(self, angle: impl Into<Rad<f32>>) -> Self {
        self.rotate_plane(2, 0, angle.into())
    }

    // Premultiplies by a rotation that turns axis `from` towards axis `to`,
    // touching only those two rows of every column.
    fn rotate_plane(self, from: usize, to: usize, Rad(angle): Rad<f32>) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = self.0;
        for column in m.chunks_exact_mut(4) {
            let (a, b) = (column[from], column[to]);
            column[from] = c * a - s * b;
            column[to] = s * a + c * b;
        }
        Self(m)
    }

    /// Applies the matrix to a homogeneous column vector.
    pub fn transform(&self, v: Vector4<f32>) -> Vector4<f32> {
        let v = [v.x, v.y, v.z, v.w];
        let mut out = [0.0; 4];
        for (row, value) in out.iter_mut().enumerate() {
            *value = (0..4).map(|column| self[(column, row)] * v[column]).sum();
        }
        Vector4::new(out[0], out[1], out[2], out[3])
    }

    /// The raw column-major storage, ready for a uniform upload.
    pub fn as_array(&self) -> &[f32; 16] {
        &self.0
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Indexed by `(column, row)`.
impl Index<(usize, usize)> for Mat4 {
    type Output = f32;

    fn index(&self, (column, row): (usize, usize)) -> &f32 {
        &self.0[column * 4 + row]
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut m = [0.0; 16];
        for column in 0..4 {
            for row in 0..4 {
                m[column * 4 + row] = (0..4).map(|k| self[(k, row)] * rhs[(column, k)]).sum();
            }
        }
        Mat4(m)
    }
}

impl Mul<Vector4<f32>> for Mat4 {
    type Output = Vector4<f32>;

    fn mul(self, rhs: Vector4<f32>) -> Vector4<f32> {
        self.transform(rhs)
    }
}

impl From<Matrix4<f32>> for Mat4 {
    fn from(m: Matrix4<f32>) -> Self {
        let raw: &[f32; 16] = m.as_ref();
        Mat4(*raw)
    }
}

impl From<Mat4> for Matrix4<f32> {
    fn from(Mat4(m): Mat4) -> Self {
        Matrix4::new(
            m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], m[9], m[10], m[11], m[12],
            m[13], m[14], m[15],
        )
    }
}
