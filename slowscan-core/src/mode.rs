// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `mode` module identifies the supported SSTV transmission modes and answers the pure
//! per-mode queries: image geometry, pixel format, and VIS code.

use std::fmt;

use crate::image::PixelFormat;

/// A `Mode` is a unique identifier for one supported SSTV transmission mode.
///
/// The discriminant of each variant is the mode's VIS code with the parity bit already embedded,
/// i.e. the byte that is transmitted during the VIS header.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    /// FAX480 monochrome.
    Fax480 = 85,

    /// Robot B&W 8s, red channel.
    RobotBw8R = 129,
    /// Robot B&W 8s, green channel.
    RobotBw8G = 130,
    /// Robot B&W 8s, blue channel.
    RobotBw8B = 3,
    /// Robot B&W 12s, red channel.
    RobotBw12R = 5,
    /// Robot B&W 12s, green channel.
    RobotBw12G = 6,
    /// Robot B&W 12s, blue channel.
    RobotBw12B = 135,
    /// Robot B&W 24s, red channel.
    RobotBw24R = 9,
    /// Robot B&W 24s, green channel.
    RobotBw24G = 10,
    /// Robot B&W 24s, blue channel.
    RobotBw24B = 139,
    /// Robot B&W 36s, red channel.
    RobotBw36R = 141,
    /// Robot B&W 36s, green channel.
    RobotBw36G = 142,
    /// Robot B&W 36s, blue channel.
    RobotBw36B = 15,

    /// Robot Color 12s. Chroma is vertically subsampled.
    RobotC12 = 0,
    /// Robot Color 24s.
    RobotC24 = 132,
    /// Robot Color 36s. Chroma is vertically subsampled.
    RobotC36 = 136,
    /// Robot Color 72s.
    RobotC72 = 12,

    /// Scottie S1.
    ScottieS1 = 60,
    /// Scottie S2.
    ScottieS2 = 184,
    /// Scottie S3.
    ScottieS3 = 180,
    /// Scottie S4.
    ScottieS4 = 48,
    /// Scottie DX.
    ScottieDx = 204,

    /// Martin M1.
    MartinM1 = 172,
    /// Martin M2.
    MartinM2 = 40,
    /// Martin M3.
    MartinM3 = 36,
    /// Martin M4.
    MartinM4 = 160,

    /// PD 50.
    Pd50 = 221,
    /// PD 90.
    Pd90 = 99,
    /// PD 120.
    Pd120 = 95,
    /// PD 160.
    Pd160 = 226,
    /// PD 180.
    Pd180 = 96,
    /// PD 240.
    Pd240 = 225,
    /// PD 290.
    Pd290 = 222,
}

impl Mode {
    /// Every supported mode, in transmission-family order.
    pub const ALL: [Mode; 33] = [
        Mode::Fax480,
        Mode::RobotBw8R,
        Mode::RobotBw8G,
        Mode::RobotBw8B,
        Mode::RobotBw12R,
        Mode::RobotBw12G,
        Mode::RobotBw12B,
        Mode::RobotBw24R,
        Mode::RobotBw24G,
        Mode::RobotBw24B,
        Mode::RobotBw36R,
        Mode::RobotBw36G,
        Mode::RobotBw36B,
        Mode::RobotC12,
        Mode::RobotC24,
        Mode::RobotC36,
        Mode::RobotC72,
        Mode::ScottieS1,
        Mode::ScottieS2,
        Mode::ScottieS3,
        Mode::ScottieS4,
        Mode::ScottieDx,
        Mode::MartinM1,
        Mode::MartinM2,
        Mode::MartinM3,
        Mode::MartinM4,
        Mode::Pd50,
        Mode::Pd90,
        Mode::Pd120,
        Mode::Pd160,
        Mode::Pd180,
        Mode::Pd240,
        Mode::Pd290,
    ];

    /// Gets the VIS code transmitted for this mode, parity bit included.
    pub fn vis_code(self) -> u8 {
        self as u8
    }

    /// Looks up the mode identified by a transmitted VIS code.
    pub fn from_vis_code(code: u8) -> Option<Mode> {
        Mode::ALL.iter().copied().find(|m| m.vis_code() == code)
    }

    /// Gets the image dimensions, in pixels, this mode transmits.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Mode::Fax480 => (512, 480),

            Mode::RobotBw8R | Mode::RobotBw8G | Mode::RobotBw8B => (160, 120),
            Mode::RobotBw12R | Mode::RobotBw12G | Mode::RobotBw12B => (160, 120),
            Mode::RobotBw24R | Mode::RobotBw24G | Mode::RobotBw24B => (320, 240),
            Mode::RobotBw36R | Mode::RobotBw36G | Mode::RobotBw36B => (320, 240),

            Mode::RobotC12 => (160, 120),
            Mode::RobotC24 => (320, 120),
            Mode::RobotC36 => (320, 240),
            Mode::RobotC72 => (320, 240),

            Mode::ScottieS1 | Mode::ScottieS2 | Mode::ScottieDx => (320, 256),
            Mode::ScottieS3 | Mode::ScottieS4 => (320, 128),

            Mode::MartinM1 | Mode::MartinM2 => (320, 256),
            Mode::MartinM3 | Mode::MartinM4 => (320, 128),

            Mode::Pd50 | Mode::Pd90 => (320, 256),
            Mode::Pd120 | Mode::Pd180 | Mode::Pd240 => (640, 496),
            Mode::Pd160 => (512, 400),
            Mode::Pd290 => (800, 616),
        }
    }

    /// Gets the pixel format of the image this mode transmits.
    pub fn pixel_format(self) -> PixelFormat {
        match self {
            Mode::Fax480 => PixelFormat::Y,

            Mode::RobotBw8R | Mode::RobotBw8G | Mode::RobotBw8B => PixelFormat::Y,
            Mode::RobotBw12R | Mode::RobotBw12G | Mode::RobotBw12B => PixelFormat::Y,
            Mode::RobotBw24R | Mode::RobotBw24G | Mode::RobotBw24B => PixelFormat::Y,
            Mode::RobotBw36R | Mode::RobotBw36G | Mode::RobotBw36B => PixelFormat::Y,

            Mode::RobotC12 | Mode::RobotC24 | Mode::RobotC36 | Mode::RobotC72 => {
                PixelFormat::YCbCr
            }

            Mode::ScottieS1
            | Mode::ScottieS2
            | Mode::ScottieS3
            | Mode::ScottieS4
            | Mode::ScottieDx => PixelFormat::Rgb,

            Mode::MartinM1 | Mode::MartinM2 | Mode::MartinM3 | Mode::MartinM4 => PixelFormat::Rgb,

            Mode::Pd50
            | Mode::Pd90
            | Mode::Pd120
            | Mode::Pd160
            | Mode::Pd180
            | Mode::Pd240
            | Mode::Pd290 => PixelFormat::YCbCr,
        }
    }

    /// Gets the canonical upper-case name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Fax480 => "FAX480",
            Mode::RobotBw8R => "ROBOT_BW8_R",
            Mode::RobotBw8G => "ROBOT_BW8_G",
            Mode::RobotBw8B => "ROBOT_BW8_B",
            Mode::RobotBw12R => "ROBOT_BW12_R",
            Mode::RobotBw12G => "ROBOT_BW12_G",
            Mode::RobotBw12B => "ROBOT_BW12_B",
            Mode::RobotBw24R => "ROBOT_BW24_R",
            Mode::RobotBw24G => "ROBOT_BW24_G",
            Mode::RobotBw24B => "ROBOT_BW24_B",
            Mode::RobotBw36R => "ROBOT_BW36_R",
            Mode::RobotBw36G => "ROBOT_BW36_G",
            Mode::RobotBw36B => "ROBOT_BW36_B",
            Mode::RobotC12 => "ROBOT_C12",
            Mode::RobotC24 => "ROBOT_C24",
            Mode::RobotC36 => "ROBOT_C36",
            Mode::RobotC72 => "ROBOT_C72",
            Mode::ScottieS1 => "SCOTTIE_S1",
            Mode::ScottieS2 => "SCOTTIE_S2",
            Mode::ScottieS3 => "SCOTTIE_S3",
            Mode::ScottieS4 => "SCOTTIE_S4",
            Mode::ScottieDx => "SCOTTIE_DX",
            Mode::MartinM1 => "MARTIN_M1",
            Mode::MartinM2 => "MARTIN_M2",
            Mode::MartinM3 => "MARTIN_M3",
            Mode::MartinM4 => "MARTIN_M4",
            Mode::Pd50 => "PD50",
            Mode::Pd90 => "PD90",
            Mode::Pd120 => "PD120",
            Mode::Pd160 => "PD160",
            Mode::Pd180 => "PD180",
            Mode::Pd240 => "PD240",
            Mode::Pd290 => "PD290",
        }
    }

    /// Looks up a mode by its canonical name. The match is case-insensitive.
    pub fn from_name(name: &str) -> Option<Mode> {
        let name = name.to_ascii_uppercase();
        Mode::ALL.iter().copied().find(|m| m.name() == name)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
