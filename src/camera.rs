//! Fixed camera and projection for the 3D samples.

use cgmath::{Point3, Rad, Vector3};

use crate::matrix::Mat4;

/// A camera at `eye` looking at `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new(eye: Point3<f32>, target: Point3<f32>) -> Self {
        Self {
            eye,
            target,
            up: Vector3::unit_y(),
        }
    }

    pub fn calc_matrix(&self) -> Mat4 {
        Mat4::look_at(self.eye, self.target, self.up)
    }
}

/// Perspective projection that tracks the framebuffer aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: aspect(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect(width, height);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// World transform of the spinning cubes after `seconds`: one radian per
/// second about Y, a quarter of that about X.
pub fn spin(seconds: f32) -> Mat4 {
    Mat4::identity()
        .rotate_y(Rad(seconds))
        .rotate_x(Rad(seconds / 4.0))
}

fn aspect(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use cgmath::Deg;

    use super::*;

    #[test]
    fn resize_updates_aspect() {
        let mut projection = Projection::new(640, 480, Deg(45.0), 0.1, 1000.0);
        assert_eq!(projection.aspect(), 640.0 / 480.0);
        projection.resize(800, 800);
        assert_eq!(projection.aspect(), 1.0);
        assert_eq!(projection.calc_matrix()[(0, 0)], projection.calc_matrix()[(1, 1)]);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let projection = Projection::new(640, 0, Deg(45.0), 0.1, 1000.0);
        assert!(projection.aspect().is_finite());
    }

    #[test]
    fn spin_starts_at_identity() {
        assert_eq!(spin(0.0), Mat4::identity());
    }

    #[test]
    fn spin_after_half_turn_flips_x_axis() {
        // Y by pi then X by pi/4: +X ends up at -X
        let x = spin(std::f32::consts::PI).transform(cgmath::Vector4::new(1.0, 0.0, 0.0, 0.0));
        assert!((x.x + 1.0).abs() < 1e-5);
        assert!(x.y.abs() < 1e-5 && x.z.abs() < 1e-5);
    }

    #[test]
    fn camera_moves_eye_to_origin() {
        let camera = Camera::new(Point3::new(0.0, 0.0, -8.0), Point3::new(0.0, 0.0, 0.0));
        let eye = camera.calc_matrix().transform(cgmath::Vector4::new(0.0, 0.0, -8.0, 1.0));
        assert!(eye.x.abs() < 1e-6 && eye.y.abs() < 1e-6 && eye.z.abs() < 1e-6);
    }
}
