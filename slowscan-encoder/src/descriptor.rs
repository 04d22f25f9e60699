// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `descriptor` module precomputes, for a `(mode, sample rate)` pair, the duration and
//! frequency of every waveform segment a mode transmits.
//!
//! Durations are kept both in nanoseconds and in micro-samples (one sample = 10^6
//! micro-samples), so that segment boundaries that fall between sample periods carry their
//! fractional residue into the next segment instead of drifting. Frequencies are kept both in
//! hertz and as the per-sample increment of a 32-bit phase accumulator.

use slowscan_core::errors::{Error, Result};
use slowscan_core::mode::Mode;

/// A tone: its frequency in hertz and the per-sample phase-accumulator increment that produces
/// it at the descriptor's sample rate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ToneDesc {
    pub hz: u32,
    pub phase_delta: u32,
}

impl ToneDesc {
    fn new(hz: u32, sample_rate: u32) -> ToneDesc {
        ToneDesc { hz, phase_delta: ((u64::from(hz) << 32) / u64::from(sample_rate)) as u32 }
    }
}

/// A duration: nanoseconds and micro-samples at the descriptor's sample rate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanDesc {
    pub nanos: u32,
    pub usamp: u64,
}

impl SpanDesc {
    fn new(nanos: u32, sample_rate: u32) -> SpanDesc {
        SpanDesc { nanos, usamp: u64::from(nanos) * u64::from(sample_rate) / 1000 }
    }
}

/// A fixed-frequency segment.
#[derive(Copy, Clone, Debug, Default)]
pub struct SegmentDesc {
    pub time: SpanDesc,
    pub freq: ToneDesc,
}

/// The VIS header block: one bit duration and the three signalling tones.
#[derive(Copy, Clone, Debug, Default)]
pub struct VisDesc {
    pub time: SpanDesc,
    /// Start and stop bit tone (1200 Hz).
    pub sep_freq: ToneDesc,
    /// Tone of a `0` data bit (1300 Hz).
    pub low_freq: ToneDesc,
    /// Tone of a `1` data bit (1100 Hz).
    pub high_freq: ToneDesc,
}

/// Pixel segments: the scan dwell times and the map from pixel value to oscillator increment.
#[derive(Clone, Debug)]
pub struct PixelDesc {
    pub time: SpanDesc,
    /// Dwell time of the subsampled chroma scans in the Robot colour modes.
    pub time2: SpanDesc,
    pub low_freq: ToneDesc,
    pub bandwidth: ToneDesc,
    /// Phase delta encoding `low_freq + bandwidth * v / 255` Hz for every pixel value `v`.
    pub val_phase_delta: [u32; 256],
}

impl Default for PixelDesc {
    fn default() -> PixelDesc {
        PixelDesc {
            time: Default::default(),
            time2: Default::default(),
            low_freq: Default::default(),
            bandwidth: Default::default(),
            val_phase_delta: [0; 256],
        }
    }
}

/// A `ModeDescriptor` holds every segment timing and frequency of one mode at one sample rate.
///
/// Sub-descriptors a mode does not use are left zeroed.
#[derive(Clone, Debug, Default)]
pub struct ModeDescriptor {
    pub leader_tone: SegmentDesc,
    pub break_tone: SegmentDesc,
    pub vis: VisDesc,
    pub sync: SegmentDesc,
    pub porch: SegmentDesc,
    pub porch2: SegmentDesc,
    pub separator: SegmentDesc,
    pub separator2: SegmentDesc,
    pub pixel: PixelDesc,
}

impl ModeDescriptor {
    /// Computes the descriptor for `mode` at `sample_rate` Hz.
    pub fn new(mode: Mode, sample_rate: u32) -> Result<ModeDescriptor> {
        if sample_rate == 0 {
            return Err(Error::BadParameter);
        }

        let mut desc = ModeDescriptor::default();

        // The transmission header is common to all modes: leader tone, break, leader tone, then
        // the VIS block at 30 ms per bit.
        desc.leader_tone.time = SpanDesc::new(300_000_000, sample_rate);
        desc.leader_tone.freq = ToneDesc::new(1900, sample_rate);

        desc.break_tone.time = SpanDesc::new(10_000_000, sample_rate);
        desc.break_tone.freq = ToneDesc::new(1200, sample_rate);

        desc.vis.time = SpanDesc::new(30_000_000, sample_rate);
        desc.vis.sep_freq = ToneDesc::new(1200, sample_rate);
        desc.vis.low_freq = ToneDesc::new(1300, sample_rate);
        desc.vis.high_freq = ToneDesc::new(1100, sample_rate);

        // Scan frequencies. Every mode syncs at 1200 Hz and scans pixels over 1500..2300 Hz; the
        // Robot colour modes additionally separate their chroma scans.
        desc.sync.freq = ToneDesc::new(1200, sample_rate);
        desc.porch.freq = ToneDesc::new(1500, sample_rate);
        desc.pixel.low_freq = ToneDesc::new(1500, sample_rate);
        desc.pixel.bandwidth = ToneDesc::new(800, sample_rate);

        match mode {
            Mode::RobotC12 | Mode::RobotC24 | Mode::RobotC36 | Mode::RobotC72 => {
                desc.porch2.freq = ToneDesc::new(1900, sample_rate);
                desc.separator.freq = ToneDesc::new(1500, sample_rate);
                desc.separator2.freq = ToneDesc::new(2300, sample_rate);
            }
            _ => (),
        }

        // Segment durations.
        match mode {
            Mode::Fax480 => {
                desc.sync.time = SpanDesc::new(5_120_000, sample_rate);
                desc.pixel.time = SpanDesc::new(512_000, sample_rate);
            }

            Mode::RobotBw8R | Mode::RobotBw8G | Mode::RobotBw8B => {
                desc.sync.time = SpanDesc::new(10_000_000, sample_rate);
                desc.pixel.time = SpanDesc::new(350_000, sample_rate);
            }
            Mode::RobotBw12R | Mode::RobotBw12G | Mode::RobotBw12B => {
                desc.sync.time = SpanDesc::new(7_000_000, sample_rate);
                desc.pixel.time = SpanDesc::new(581_250, sample_rate);
            }
            Mode::RobotBw24R | Mode::RobotBw24G | Mode::RobotBw24B => {
                desc.sync.time = SpanDesc::new(12_000_000, sample_rate);
                desc.pixel.time = SpanDesc::new(290_625, sample_rate);
            }
            Mode::RobotBw36R | Mode::RobotBw36G | Mode::RobotBw36B => {
                desc.sync.time = SpanDesc::new(12_000_000, sample_rate);
                desc.pixel.time = SpanDesc::new(431_250, sample_rate);
            }

            Mode::RobotC12 => {
                desc.sync.time = SpanDesc::new(9_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(3_000_000, sample_rate);
                desc.porch2.time = SpanDesc::new(1_500_000, sample_rate);
                desc.separator.time = SpanDesc::new(4_500_000, sample_rate);
                desc.separator2.time = SpanDesc::new(4_500_000, sample_rate);
                desc.pixel.time = SpanDesc::new(375_000, sample_rate);
                desc.pixel.time2 = SpanDesc::new(187_500, sample_rate);
            }
            Mode::RobotC24 => {
                desc.sync.time = SpanDesc::new(9_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(3_000_000, sample_rate);
                desc.porch2.time = SpanDesc::new(1_500_000, sample_rate);
                desc.separator.time = SpanDesc::new(4_500_000, sample_rate);
                desc.separator2.time = SpanDesc::new(4_500_000, sample_rate);
                desc.pixel.time = SpanDesc::new(275_000, sample_rate);
                desc.pixel.time2 = SpanDesc::new(137_500, sample_rate);
            }
            Mode::RobotC36 => {
                desc.sync.time = SpanDesc::new(9_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(3_000_000, sample_rate);
                desc.porch2.time = SpanDesc::new(1_500_000, sample_rate);
                desc.separator.time = SpanDesc::new(4_500_000, sample_rate);
                desc.separator2.time = SpanDesc::new(4_500_000, sample_rate);
                desc.pixel.time = SpanDesc::new(281_250, sample_rate);
                desc.pixel.time2 = SpanDesc::new(140_625, sample_rate);
            }
            Mode::RobotC72 => {
                desc.sync.time = SpanDesc::new(9_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(3_000_000, sample_rate);
                desc.porch2.time = SpanDesc::new(1_500_000, sample_rate);
                desc.separator.time = SpanDesc::new(4_500_000, sample_rate);
                desc.separator2.time = SpanDesc::new(4_500_000, sample_rate);
                desc.pixel.time = SpanDesc::new(431_250, sample_rate);
                desc.pixel.time2 = SpanDesc::new(215_625, sample_rate);
            }

            Mode::ScottieS1 => {
                desc.sync.time = SpanDesc::new(9_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(1_500_000, sample_rate);
                desc.pixel.time = SpanDesc::new(432_000, sample_rate);
            }
            Mode::ScottieS2 => {
                desc.sync.time = SpanDesc::new(9_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(1_500_000, sample_rate);
                desc.pixel.time = SpanDesc::new(275_200, sample_rate);
            }
            Mode::ScottieS3 => {
                desc.sync.time = SpanDesc::new(9_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(1_500_000, sample_rate);
                desc.pixel.time = SpanDesc::new(432_000, sample_rate);
            }
            Mode::ScottieS4 => {
                desc.sync.time = SpanDesc::new(9_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(1_500_000, sample_rate);
                desc.pixel.time = SpanDesc::new(275_200, sample_rate);
            }
            Mode::ScottieDx => {
                desc.sync.time = SpanDesc::new(9_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(1_500_000, sample_rate);
                desc.pixel.time = SpanDesc::new(1_080_000, sample_rate);
            }

            Mode::MartinM1 => {
                desc.sync.time = SpanDesc::new(4_862_000, sample_rate);
                desc.porch.time = SpanDesc::new(572_000, sample_rate);
                desc.pixel.time = SpanDesc::new(457_600, sample_rate);
            }
            Mode::MartinM2 => {
                desc.sync.time = SpanDesc::new(4_862_000, sample_rate);
                desc.porch.time = SpanDesc::new(572_000, sample_rate);
                desc.pixel.time = SpanDesc::new(228_800, sample_rate);
            }
            Mode::MartinM3 => {
                desc.sync.time = SpanDesc::new(4_862_000, sample_rate);
                desc.porch.time = SpanDesc::new(572_000, sample_rate);
                desc.pixel.time = SpanDesc::new(457_600, sample_rate);
            }
            Mode::MartinM4 => {
                desc.sync.time = SpanDesc::new(4_862_000, sample_rate);
                desc.porch.time = SpanDesc::new(572_000, sample_rate);
                desc.pixel.time = SpanDesc::new(228_800, sample_rate);
            }

            Mode::Pd50 => {
                desc.sync.time = SpanDesc::new(20_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(2_080_000, sample_rate);
                desc.pixel.time = SpanDesc::new(286_000, sample_rate);
            }
            Mode::Pd90 => {
                desc.sync.time = SpanDesc::new(20_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(2_080_000, sample_rate);
                desc.pixel.time = SpanDesc::new(532_000, sample_rate);
            }
            Mode::Pd120 => {
                desc.sync.time = SpanDesc::new(20_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(2_080_000, sample_rate);
                desc.pixel.time = SpanDesc::new(190_000, sample_rate);
            }
            Mode::Pd160 => {
                desc.sync.time = SpanDesc::new(20_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(2_080_000, sample_rate);
                desc.pixel.time = SpanDesc::new(382_000, sample_rate);
            }
            Mode::Pd180 => {
                desc.sync.time = SpanDesc::new(20_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(2_080_000, sample_rate);
                desc.pixel.time = SpanDesc::new(286_000, sample_rate);
            }
            Mode::Pd240 => {
                desc.sync.time = SpanDesc::new(20_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(2_080_000, sample_rate);
                desc.pixel.time = SpanDesc::new(382_000, sample_rate);
            }
            Mode::Pd290 => {
                desc.sync.time = SpanDesc::new(20_000_000, sample_rate);
                desc.porch.time = SpanDesc::new(2_080_000, sample_rate);
                desc.pixel.time = SpanDesc::new(286_000, sample_rate);
            }
        }

        // Pixel value to phase delta lookup table. Computed in 64-bit so that the scaled
        // frequency survives the shift without truncation.
        for (value, delta) in desc.pixel.val_phase_delta.iter_mut().enumerate() {
            let freq_t255 = u64::from(desc.pixel.low_freq.hz) * 255
                + u64::from(desc.pixel.bandwidth.hz) * value as u64;

            *delta = ((freq_t255 << 32) / (u64::from(sample_rate) * 255)) as u32;
        }

        Ok(desc)
    }
}

#[cfg(test)]
mod tests {
    use super::ModeDescriptor;
    use slowscan_core::errors::Error;
    use slowscan_core::mode::Mode;

    #[test]
    fn verify_all_modes_at_common_rates() {
        for &mode in Mode::ALL.iter() {
            for &rate in &[8000, 16000, 44100, 48000] {
                let desc = ModeDescriptor::new(mode, rate).unwrap();

                // The pixel band must rise with the pixel value.
                assert!(
                    desc.pixel.val_phase_delta[255] > desc.pixel.val_phase_delta[0],
                    "{} at {} Hz has a degenerate pixel band",
                    mode,
                    rate
                );

                // Every mode scans at least one pixel segment per line.
                assert!(desc.pixel.time.usamp > 0);
                assert!(desc.sync.time.usamp > 0);
            }
        }
    }

    #[test]
    fn verify_zero_sample_rate_rejected() {
        assert_eq!(ModeDescriptor::new(Mode::Pd120, 0).unwrap_err(), Error::BadParameter);
    }

    #[test]
    fn verify_header_timings_at_48k() {
        let desc = ModeDescriptor::new(Mode::Pd120, 48000).unwrap();

        // 300 ms of leader at 48 kHz is exactly 14400 samples.
        assert_eq!(desc.leader_tone.time.usamp, 14_400_000_000);
        assert_eq!(desc.break_tone.time.usamp, 480_000_000);
        assert_eq!(desc.vis.time.usamp, 1_440_000_000);

        assert_eq!(desc.leader_tone.freq.hz, 1900);
        assert_eq!(desc.leader_tone.freq.phase_delta, ((1900u64 << 32) / 48000) as u32);
        assert_eq!(desc.vis.sep_freq.hz, 1200);
        assert_eq!(desc.vis.low_freq.hz, 1300);
        assert_eq!(desc.vis.high_freq.hz, 1100);
    }

    #[test]
    fn verify_pixel_lookup_formula() {
        let desc = ModeDescriptor::new(Mode::Fax480, 48000).unwrap();

        // Mid grey through the documented 64-bit expression.
        let expected = ((1500u64 * 255 + 800 * 128) << 32) / (48000u64 * 255);
        assert_eq!(desc.pixel.val_phase_delta[128], expected as u32);

        // Band endpoints encode 1500 Hz and 2300 Hz exactly.
        assert_eq!(desc.pixel.val_phase_delta[0], ((1500u64 << 32) / 48000) as u32);
        assert_eq!(desc.pixel.val_phase_delta[255], ((2300u64 << 32) / 48000) as u32);
    }

    #[test]
    fn verify_robot_colour_separators() {
        let desc = ModeDescriptor::new(Mode::RobotC36, 48000).unwrap();

        assert_eq!(desc.porch2.freq.hz, 1900);
        assert_eq!(desc.separator.freq.hz, 1500);
        assert_eq!(desc.separator2.freq.hz, 2300);
        assert_eq!(desc.pixel.time.nanos, 281_250);
        assert_eq!(desc.pixel.time2.nanos, 140_625);

        // Modes outside the Robot colour family leave the separators unpopulated.
        let desc = ModeDescriptor::new(Mode::MartinM1, 48000).unwrap();
        assert_eq!(desc.separator.freq.hz, 0);
        assert_eq!(desc.separator.time.usamp, 0);
    }
}
