// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `image` module provides the pixel buffer container and in-place colour conversion.

use std::fmt;

use crate::errors::{Error, Result};
use crate::mode::Mode;

/// An enumeration of the pixel formats an image buffer may carry. All formats store one byte per
/// channel, pixels interleaved row-major.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// Grayscale luminance only.
    Y,
    /// Luminance with blue-difference and red-difference chroma (Y, Cb, Cr byte order).
    YCbCr,
    /// Red, green, blue.
    Rgb,
}

impl PixelFormat {
    /// Gets the number of bytes per pixel for this format.
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Y => 1,
            PixelFormat::YCbCr | PixelFormat::Rgb => 3,
        }
    }
}

// Fixed-point RGB <-> YCbCr conversion constants, courtesy of Leszek Szary.
// https://stackoverflow.com/questions/1737726/how-to-perform-rgb-yuv-conversion-in-c-c

fn clip(x: i32) -> u8 {
    x.clamp(0, 255) as u8
}

fn rgb_to_y(r: i32, g: i32, b: i32) -> u8 {
    clip((19595 * r + 38470 * g + 7471 * b) >> 16)
}

fn rgb_to_cb(b: i32, y: i32) -> u8 {
    clip(((36962 * (b - y)) >> 16) + 128)
}

fn rgb_to_cr(r: i32, y: i32) -> u8 {
    clip(((46727 * (r - y)) >> 16) + 128)
}

fn ycbcr_to_r(y: i32, cr: i32) -> u8 {
    clip(y + ((91881 * cr) >> 16) - 179)
}

fn ycbcr_to_g(y: i32, cb: i32, cr: i32) -> u8 {
    clip(y - ((22544 * cb + 46793 * cr) >> 16) + 135)
}

fn ycbcr_to_b(y: i32, cb: i32) -> u8 {
    clip(y + ((116129 * cb) >> 16) - 226)
}

/// `Image` is a container for interleaved 8-bit pixel data.
///
/// The buffer length always equals `width * height * format.channels()`.
#[derive(Clone)]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    buf: Vec<u8>,
}

impl Image {
    /// Instantiates a black `Image` with the given properties.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Image {
        let len = width as usize * height as usize * format.channels();
        Image { width, height, format, buf: vec![0; len] }
    }

    /// Instantiates a black `Image` with the dimensions and pixel format the given mode
    /// prescribes.
    pub fn for_mode(mode: Mode) -> Image {
        let (width, height) = mode.dimensions();
        Image::new(width, height, mode.pixel_format())
    }

    /// Packs an existing pixel buffer into an `Image`. The buffer length must match the given
    /// properties exactly or `BadParameter` is returned.
    pub fn from_parts(width: u32, height: u32, format: PixelFormat, buf: Vec<u8>) -> Result<Image> {
        if buf.len() != width as usize * height as usize * format.channels() {
            return Err(Error::BadParameter);
        }

        Ok(Image { width, height, format, buf })
    }

    /// Consumes the image and returns its properties and pixel buffer.
    pub fn into_parts(self) -> (u32, u32, PixelFormat, Vec<u8>) {
        (self.width, self.height, self.format, self.buf)
    }

    /// Gets the image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Gets the image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Gets the pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Gets an immutable slice of the pixel data.
    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    /// Gets a mutable slice of the pixel data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Converts the image to the given pixel format in place.
    ///
    /// Converting to the current format is a no-op. Conversions from `Y` to a colour format are
    /// not supported; the discarded chroma cannot be recovered.
    pub fn convert(&mut self, format: PixelFormat) -> Result<()> {
        if self.format == format {
            return Ok(());
        }

        if self.format == PixelFormat::Y {
            return Err(Error::UnsupportedConversion);
        }

        let num_px = self.width as usize * self.height as usize;

        match (self.format, format) {
            (PixelFormat::YCbCr, PixelFormat::Y) => {
                // Condense the luminance channel.
                for i in 0..num_px {
                    self.buf[i] = self.buf[i * 3];
                }
                self.buf.truncate(num_px);
            }
            (PixelFormat::Rgb, PixelFormat::Y) => {
                for i in 0..num_px {
                    let r = i32::from(self.buf[i * 3 + 0]);
                    let g = i32::from(self.buf[i * 3 + 1]);
                    let b = i32::from(self.buf[i * 3 + 2]);
                    self.buf[i] = rgb_to_y(r, g, b);
                }
                self.buf.truncate(num_px);
            }
            (PixelFormat::Rgb, PixelFormat::YCbCr) => {
                for px in self.buf.chunks_exact_mut(3) {
                    let r = i32::from(px[0]);
                    let g = i32::from(px[1]);
                    let b = i32::from(px[2]);
                    let y = rgb_to_y(r, g, b);
                    px[0] = y;
                    px[1] = rgb_to_cb(b, i32::from(y));
                    px[2] = rgb_to_cr(r, i32::from(y));
                }
            }
            (PixelFormat::YCbCr, PixelFormat::Rgb) => {
                for px in self.buf.chunks_exact_mut(3) {
                    let y = i32::from(px[0]);
                    let cb = i32::from(px[1]);
                    let cr = i32::from(px[2]);
                    px[0] = ycbcr_to_r(y, cr);
                    px[1] = ycbcr_to_g(y, cb, cr);
                    px[2] = ycbcr_to_b(y, cb);
                }
            }
            _ => return Err(Error::UnsupportedConversion),
        }

        self.format = format;
        Ok(())
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
