// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! # Project Slowscan
//!
//! Slowscan is a pure Rust Slow-Scan Television (SSTV) encoder. It converts a raster image into
//! the frequency-modulated audio waveform one of the amateur-radio SSTV modes prescribes, at
//! any caller-chosen sample rate, streaming samples into caller-owned buffers.
//!
//! # Support
//!
//! The supported transmission modes are listed below.
//!
//! | Family       | Modes                             | Image            |
//! |--------------|-----------------------------------|------------------|
//! | FAX          | FAX480                            | 512x480 gray     |
//! | Robot B&W    | BW8, BW12 (R/G/B)                 | 160x120 gray     |
//! | Robot B&W    | BW24, BW36 (R/G/B)                | 320x240 gray     |
//! | Robot Color  | C12                               | 160x120 YCbCr    |
//! | Robot Color  | C24                               | 320x120 YCbCr    |
//! | Robot Color  | C36, C72                          | 320x240 YCbCr    |
//! | Scottie      | S1, S2, DX                        | 320x256 RGB      |
//! | Scottie      | S3, S4                            | 320x128 RGB      |
//! | Martin       | M1, M2                            | 320x256 RGB      |
//! | Martin       | M3, M4                            | 320x128 RGB      |
//! | PD           | PD50, PD90                        | 320x256 YCbCr    |
//! | PD           | PD120, PD180, PD240               | 640x496 YCbCr    |
//! | PD           | PD160                             | 512x400 YCbCr    |
//! | PD           | PD290                             | 800x616 YCbCr    |
//!
//! # Usage
//!
//! Build an [`Image`](crate::core::image::Image) of the geometry the mode prescribes, create an
//! [`Encoder`](crate::encoder::Encoder), and drain it through a
//! [`SignalBuffer`](crate::core::signal::SignalBuffer) until it reports the end of the stream.

pub use slowscan_core as core;
pub use slowscan_encoder as encoder;
