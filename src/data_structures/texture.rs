//! 2D textures and the procedural checkerboard.
//!
//! [`checkerboard`] builds the image on the CPU with the `image` crate;
//! [`Texture::from_image`] uploads any RGBA8 image with the nearest-neighbour,
//! repeating sampler state the textured samples use.

use glow::HasContext;
use image::{Rgb, Rgba, RgbaImage};

use crate::data_structures::ResourceError;

/// Checkerboard of 2x2 texel squares.
///
/// Texel `(x, y)` is `odd` when `x / 2 + y / 2` is odd and `even` otherwise.
/// Alpha is always opaque.
pub fn checkerboard(width: u32, height: u32, odd: Rgb<u8>, even: Rgb<u8>) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let Rgb([r, g, b]) = if (x / 2 + y / 2) % 2 == 1 { odd } else { even };
        Rgba([r, g, b, 255])
    })
}

/// A GL `TEXTURE_2D` with RGBA8 storage.
#[derive(Debug)]
pub struct Texture {
    raw: glow::NativeTexture,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Uploads `image` as level 0 with `REPEAT` wrapping and `NEAREST`
    /// filtering. Leaves the texture bound to `TEXTURE_2D`.
    pub fn from_image(gl: &glow::Context, image: &RgbaImage) -> Result<Self, ResourceError> {
        let (width, height) = image.dimensions();
        unsafe {
            let raw = gl
                .create_texture()
                .map_err(|reason| ResourceError::create("texture", reason))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(raw));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.as_raw())),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
            log::debug!("Uploaded {}x{} texture {:?}", width, height, raw);
            Ok(Self { raw, width, height })
        }
    }

    /// Binds to texture unit `unit` (0 for `TEXTURE0`).
    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.raw));
        }
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe { gl.delete_texture(self.raw) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const DARK_RED: Rgb<u8> = Rgb([128, 0, 0]);

    #[test]
    fn squares_are_two_texels_wide() {
        let board = checkerboard(16, 16, RED, DARK_RED);
        assert_eq!(board.dimensions(), (16, 16));
        assert_eq!(*board.get_pixel(0, 0), Rgba([128, 0, 0, 255]));
        assert_eq!(*board.get_pixel(1, 1), Rgba([128, 0, 0, 255]));
        assert_eq!(*board.get_pixel(2, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*board.get_pixel(3, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*board.get_pixel(2, 2), Rgba([128, 0, 0, 255]));
        assert_eq!(*board.get_pixel(0, 2), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn board_is_opaque_and_balanced() {
        let board = checkerboard(16, 16, RED, DARK_RED);
        assert!(board.pixels().all(|p| p[3] == 255));
        let odd = board.pixels().filter(|p| p[0] == 255).count();
        assert_eq!(odd, 16 * 16 / 2);
    }

    #[test]
    fn raw_layout_is_row_major_rgba() {
        let board = checkerboard(4, 2, RED, DARK_RED);
        let raw = board.as_raw();
        assert_eq!(raw.len(), 4 * 2 * 4);
        // texel (2, 0) starts at byte 8
        assert_eq!(&raw[8..12], &[255, 0, 0, 255]);
    }
}
