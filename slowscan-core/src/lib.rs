// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Shared structs and traits for Project Slowscan: the error taxonomy, the SSTV mode registry,
//! the image container with colour conversion, and the sample types a waveform is synthesised
//! into.

pub mod errors;
pub mod image;
pub mod mode;
pub mod sample;
pub mod signal;
