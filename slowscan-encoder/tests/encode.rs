// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use slowscan_core::image::Image;
use slowscan_core::mode::Mode;
use slowscan_core::sample::Sample;
use slowscan_core::signal::SignalBuffer;
use slowscan_encoder::{EncodeStatus, Encoder};

const RATE: u32 = 48000;

fn phase_delta(hz: u64) -> u32 {
    ((hz << 32) / u64::from(RATE)) as u32
}

/// Drains a session to completion and returns the total number of samples emitted.
fn drain(mut enc: Encoder) -> u64 {
    let mut signal = SignalBuffer::<i16>::new(65536);
    let mut total = 0;

    loop {
        let status = enc.encode(&mut signal).unwrap();
        total += signal.len() as u64;

        if status == EncodeStatus::End {
            return total;
        }
        assert_eq!(signal.len(), signal.capacity());
    }
}

#[test]
fn header_prefix_matches_reference_oscillator() {
    // At 48 kHz every header segment is a whole number of samples: 300 ms of leader is 14400,
    // the 10 ms break 480, and each 30 ms VIS bit 1440. PD120 transmits VIS 95 = 0b0101_1111,
    // LSB first, with 1100 Hz marking a set bit and 1300 Hz a clear bit.
    let segments: [(u64, usize); 13] = [
        (1900, 14400),
        (1200, 480),
        (1900, 14400),
        (1200, 1440),
        (1100, 1440),
        (1100, 1440),
        (1100, 1440),
        (1100, 1440),
        (1100, 1440),
        (1300, 1440),
        (1100, 1440),
        (1300, 1440),
        (1200, 1440),
    ];
    let prefix_len: usize = segments.iter().map(|&(_, n)| n).sum();

    let mut enc = Encoder::new(Image::for_mode(Mode::Pd120), Mode::Pd120, RATE).unwrap();
    let mut signal = SignalBuffer::<i16>::new(prefix_len);
    assert_eq!(enc.encode(&mut signal).unwrap(), EncodeStatus::BufferFull);

    let mut produced = signal.samples().iter();
    let mut phase: u32 = 0;
    for &(hz, count) in segments.iter() {
        let delta = phase_delta(hz);
        for n in 0..count {
            phase = phase.wrapping_add(delta);
            assert_eq!(
                *produced.next().unwrap(),
                i16::from_phase(phase),
                "mismatch {} samples into the {} Hz segment",
                n,
                hz
            );
        }
    }
}

#[test]
fn pd90_fill_handoff() {
    // Header plus 128 row pairs of sync (20 ms), porch (2.08 ms), and four 320-pixel scans at
    // 532 us each: 4_363_157_760_000 micro-samples in all.
    const EXPECTED_SAMPLES: u64 = 4_363_157;

    let mut enc = Encoder::new(Image::for_mode(Mode::Pd90), Mode::Pd90, RATE).unwrap();
    let mut signal = SignalBuffer::<i16>::new(1000);
    let mut total = 0;

    loop {
        match enc.encode(&mut signal).unwrap() {
            EncodeStatus::BufferFull => {
                assert_eq!(signal.len(), 1000);
                total += signal.len() as u64;
            }
            EncodeStatus::End => {
                total += signal.len() as u64;
                break;
            }
        }
    }

    assert_eq!(total, EXPECTED_SAMPLES);
}

#[test]
fn fax480_stream_length() {
    // 480 rows of a 5120 us sync and 512 pixels of 512 us each, after the common header.
    let mut img = Image::for_mode(Mode::Fax480);
    img.data_mut().fill(128);

    let enc = Encoder::new(img, Mode::Fax480, RATE).unwrap();
    assert_eq!(drain(enc), 6_201_442);
}

#[test]
fn robot_c36_stream_length() {
    // Every Robot C36 row sums to exactly 7_344_000_000 micro-samples at 48 kHz, so the stream
    // length lands on a whole sample with no residue.
    let enc = Encoder::new(Image::for_mode(Mode::RobotC36), Mode::RobotC36, RATE).unwrap();
    assert_eq!(drain(enc), 1_806_240);
}

#[test]
fn scottie_s1_stream_length() {
    let enc = Encoder::new(Image::for_mode(Mode::ScottieS1), Mode::ScottieS1, RATE).unwrap();
    assert_eq!(drain(enc), 5_306_079);
}

#[test]
fn every_mode_runs_to_completion() {
    // 8 kHz leaves the shortest chroma segments barely over one sample period, the tightest
    // legal fit for the micro-sample countdown.
    for &mode in Mode::ALL.iter() {
        let mut enc = Encoder::new(Image::for_mode(mode), mode, 8000).unwrap();
        let mut signal = SignalBuffer::<i16>::new(65536);
        let mut total = 0u64;

        loop {
            match enc.encode(&mut signal).unwrap() {
                EncodeStatus::BufferFull => total += signal.len() as u64,
                EncodeStatus::End => {
                    total += signal.len() as u64;
                    break;
                }
            }
        }

        assert!(total > 0, "{} produced no samples", mode);
    }
}

#[test]
fn sample_types_share_one_schedule() {
    // The same session schedule drives all three output types; counts must agree.
    let total_i16 =
        drain(Encoder::new(Image::for_mode(Mode::RobotBw8R), Mode::RobotBw8R, RATE).unwrap());

    let mut enc = Encoder::new(Image::for_mode(Mode::RobotBw8R), Mode::RobotBw8R, RATE).unwrap();
    let mut signal = SignalBuffer::<u8>::new(65536);
    let mut total_u8 = 0;
    loop {
        let status = enc.encode(&mut signal).unwrap();
        total_u8 += signal.len() as u64;
        if status == EncodeStatus::End {
            break;
        }
    }

    assert_eq!(total_i16, total_u8);
}
