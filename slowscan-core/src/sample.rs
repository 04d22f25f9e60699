// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `sample` module defines the output sample trait and the sinusoid lookup tables that back
//! sample synthesis.

use std::f64::consts::PI;

use lazy_static::lazy_static;

/// An enumeration of the sample formats a signal buffer may carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    /// Signed 8-bit integer.
    S8,
    /// Unsigned 8-bit integer, DC-offset so that silence is mid-scale.
    U8,
    /// Signed 16-bit integer.
    S16,
}

/// The sample trait is implemented by the concrete types a waveform may be synthesised into.
///
/// A tone is generated by a 32-bit phase accumulator; the top 10 bits of the phase word index a
/// 1024-entry table holding one period of a sine wave at an amplitude near the type's full
/// scale. No interpolation is performed between entries.
pub trait Sample: Copy + Clone + Default + PartialOrd + PartialEq + Sized {
    /// The `SampleFormat` of this sample type.
    const FORMAT: SampleFormat;

    /// The mid-point value between the maximum and minimum sample value. If a sample is set to
    /// this value it is silent.
    const MID: Self;

    /// Looks up the sinusoid sample selected by a 32-bit oscillator phase word.
    fn from_phase(phase: u32) -> Self;
}

const SIN_TABLE_LEN: usize = 1024;

/// Index bits are the top 10 of the 32-bit phase word.
const PHASE_INDEX_SHIFT: u32 = 22;

fn sin_at(index: usize) -> f64 {
    (2.0 * PI * index as f64 / SIN_TABLE_LEN as f64).sin()
}

lazy_static! {
    static ref SIN_INT10_I8: [i8; SIN_TABLE_LEN] = {
        let mut table = [0; SIN_TABLE_LEN];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = (sin_at(i) * 127.0).round() as i8;
        }
        table
    };

    static ref SIN_INT10_U8: [u8; SIN_TABLE_LEN] = {
        let mut table = [0; SIN_TABLE_LEN];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = (sin_at(i) * 127.5 + 127.5).round().min(255.0) as u8;
        }
        table
    };

    static ref SIN_INT10_I16: [i16; SIN_TABLE_LEN] = {
        let mut table = [0; SIN_TABLE_LEN];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = (sin_at(i) * 32767.0).round() as i16;
        }
        table
    };
}

impl Sample for i8 {
    const FORMAT: SampleFormat = SampleFormat::S8;
    const MID: i8 = 0;

    #[inline(always)]
    fn from_phase(phase: u32) -> i8 {
        SIN_INT10_I8[(phase >> PHASE_INDEX_SHIFT) as usize]
    }
}

impl Sample for u8 {
    const FORMAT: SampleFormat = SampleFormat::U8;
    const MID: u8 = 128;

    #[inline(always)]
    fn from_phase(phase: u32) -> u8 {
        SIN_INT10_U8[(phase >> PHASE_INDEX_SHIFT) as usize]
    }
}

impl Sample for i16 {
    const FORMAT: SampleFormat = SampleFormat::S16;
    const MID: i16 = 0;

    #[inline(always)]
    fn from_phase(phase: u32) -> i16 {
        SIN_INT10_I16[(phase >> PHASE_INDEX_SHIFT) as usize]
    }
}
