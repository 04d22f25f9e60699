// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! SSTV signal synthesis for Project Slowscan.
//!
//! An [`Encoder`] turns an image of a mode's prescribed geometry into the frequency-modulated
//! waveform that mode transmits: leader and VIS header, then per-line sync, porch, and scan
//! segments with pixel values pitch-mapped into the 1500..2300 Hz band. Samples are produced
//! incrementally into a caller-owned buffer, so a session can be drained across as many calls
//! as the caller likes.

pub mod descriptor;
pub mod encoder;
pub mod osc;
pub mod pool;

pub use encoder::{EncodeStatus, Encoder};
pub use pool::{EncoderHandle, EncoderPool, DEFAULT_ENCODER_SLOTS};
