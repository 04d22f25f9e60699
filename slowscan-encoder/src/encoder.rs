// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `encoder` module drives the per-mode segment schedulers that turn an image into an SSTV
//! waveform.
//!
//! An [`Encoder`] is a resumable session: each call to [`Encoder::encode`] fills the caller's
//! signal buffer and returns, and the next call picks up mid-segment where the previous one
//! stopped. The concatenation of the buffers returned across calls is the complete waveform the
//! mode prescribes for the image.

use std::fmt;

use log::debug;

use slowscan_core::errors::{Error, Result};
use slowscan_core::image::Image;
use slowscan_core::mode::Mode;
use slowscan_core::sample::Sample;
use slowscan_core::signal::SignalBuffer;

use crate::descriptor::{ModeDescriptor, SegmentDesc};
use crate::osc::ToneGenerator;

// Channel offsets within an interleaved pixel.
const CHAN_Y: usize = 0;
const CHAN_CB: usize = 1;
const CHAN_CR: usize = 2;
const CHAN_R: usize = 0;
const CHAN_G: usize = 1;
const CHAN_B: usize = 2;

/// Outcome of a successful [`Encoder::encode`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum EncodeStatus {
    /// The signal buffer was filled to capacity and more of the waveform remains.
    BufferFull = 1000,
    /// The waveform is complete; the buffer holds its final samples.
    End = 1001,
}

impl EncodeStatus {
    /// Returns the numeric status code of this outcome.
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Scheduler state. One state is one waveform segment kind; scan states emit one pixel segment
/// per transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Start,

    Leader1,
    Break,
    Leader2,

    VisStart,
    VisBit,
    VisStop,

    Sync,
    SyncFirst,
    Porch,
    Porch2,
    PorchR,
    PorchG,
    PorchB,
    PorchRy,
    PorchBy,

    Separator,
    Separator2,
    SeparatorRy,
    SeparatorBy,

    YScan,
    YOddScan,
    YEvenScan,
    RyScan,
    ByScan,
    RScan,
    GScan,
    BScan,

    End,
}

/// Per-mode scan pattern family.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Family {
    Mono,
    RobotColourHalf,
    RobotColourFull,
    Scottie,
    Martin,
    Pd,
}

fn family_of(mode: Mode) -> Family {
    match mode {
        Mode::Fax480 => Family::Mono,

        Mode::RobotBw8R
        | Mode::RobotBw8G
        | Mode::RobotBw8B
        | Mode::RobotBw12R
        | Mode::RobotBw12G
        | Mode::RobotBw12B
        | Mode::RobotBw24R
        | Mode::RobotBw24G
        | Mode::RobotBw24B
        | Mode::RobotBw36R
        | Mode::RobotBw36G
        | Mode::RobotBw36B => Family::Mono,

        Mode::RobotC12 | Mode::RobotC36 => Family::RobotColourHalf,
        Mode::RobotC24 | Mode::RobotC72 => Family::RobotColourFull,

        Mode::ScottieS1 | Mode::ScottieS2 | Mode::ScottieS3 | Mode::ScottieS4 | Mode::ScottieDx => {
            Family::Scottie
        }

        Mode::MartinM1 | Mode::MartinM2 | Mode::MartinM3 | Mode::MartinM4 => Family::Martin,

        Mode::Pd50
        | Mode::Pd90
        | Mode::Pd120
        | Mode::Pd160
        | Mode::Pd180
        | Mode::Pd240
        | Mode::Pd290 => Family::Pd,
    }
}

/// An SSTV encoding session.
pub struct Encoder {
    image: Image,
    mode: Mode,
    sample_rate: u32,
    descriptor: ModeDescriptor,
    state: State,
    fsk: ToneGenerator,

    // VIS progress.
    vis_bit: u8,

    // Scan cursor. `line` is the top row of the current PD pair.
    line: u32,
    col: u32,
}

impl Encoder {
    /// Creates a session encoding `image` as `mode` at `sample_rate` Hz.
    ///
    /// The image dimensions and pixel format must be exactly the ones the mode prescribes.
    pub fn new(image: Image, mode: Mode, sample_rate: u32) -> Result<Encoder> {
        if sample_rate == 0 {
            return Err(Error::BadParameter);
        }

        if (image.width(), image.height()) != mode.dimensions() {
            return Err(Error::BadResolution);
        }

        if image.format() != mode.pixel_format() {
            return Err(Error::BadFormat);
        }

        // PD modes scan row pairs; every PD geometry in the registry is even-height.
        debug_assert!(family_of(mode) != Family::Pd || image.height() % 2 == 0);

        let descriptor = ModeDescriptor::new(mode, sample_rate)?;

        debug!("created {} encoder at {} Hz", mode, sample_rate);

        Ok(Encoder {
            image,
            mode,
            sample_rate,
            descriptor,
            state: State::Start,
            fsk: ToneGenerator::new(),
            vis_bit: 0,
            line: 0,
            col: 0,
        })
    }

    /// Gets the mode this session encodes.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Gets the output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Fills `signal` with the next stretch of the waveform.
    ///
    /// The buffer is reset first, then filled until either it is full (`BufferFull`) or the
    /// waveform ends (`End`). A zero-capacity buffer returns `BufferFull` immediately without
    /// advancing the session.
    pub fn encode<S: Sample>(&mut self, signal: &mut SignalBuffer<S>) -> Result<EncodeStatus> {
        signal.clear();

        if signal.capacity() == 0 {
            return Ok(EncodeStatus::BufferFull);
        }

        loop {
            if self.fsk.needs_program() {
                self.advance();

                if self.state == State::End {
                    return Ok(EncodeStatus::End);
                }

                // Every transition must cover at least one whole sample; anything less means
                // the sample rate cannot represent the mode's shortest segment.
                if self.fsk.needs_program() {
                    return Err(Error::Internal);
                }

                continue;
            }

            if signal.is_full() {
                return Ok(EncodeStatus::BufferFull);
            }

            signal.push(self.fsk.tick());
        }
    }

    fn program(&mut self, segment: SegmentDesc) {
        self.fsk.program(segment.freq.phase_delta, segment.time.usamp);
    }

    /// Programs the next VIS data bit. A set bit is the 1100 Hz tone, a clear bit the 1300 Hz
    /// tone.
    fn program_vis_bit(&mut self) {
        let bit = (self.mode.vis_code() >> self.vis_bit) & 0x1;
        self.state = State::VisBit;
        self.vis_bit += 1;

        let vis = self.descriptor.vis;
        let tone = if bit == 1 { vis.high_freq } else { vis.low_freq };
        self.fsk.program(tone.phase_delta, vis.time.usamp);
    }

    /// Programs one full-rate pixel segment and moves the scan cursor right.
    fn scan_pixel(&mut self, value: u8) {
        let time = self.descriptor.pixel.time;
        self.fsk.program(self.descriptor.pixel.val_phase_delta[value as usize], time.usamp);
        self.col += 1;
    }

    /// Programs one subsampled-chroma pixel segment and moves the scan cursor right.
    fn scan_pixel2(&mut self, value: u8) {
        let time = self.descriptor.pixel.time2;
        self.fsk.program(self.descriptor.pixel.val_phase_delta[value as usize], time.usamp);
        self.col += 1;
    }

    fn luma(&self, line: u32, col: u32) -> u8 {
        let idx = self.image.width() as usize * line as usize + col as usize;
        self.image.data()[idx]
    }

    fn channel(&self, line: u32, col: u32, channel: usize) -> u8 {
        let idx = (self.image.width() as usize * line as usize + col as usize) * 3 + channel;
        self.image.data()[idx]
    }

    fn channel_avg(&self, line_a: u32, line_b: u32, col: u32, channel: usize) -> u8 {
        let a = u16::from(self.channel(line_a, col, channel));
        let b = u16::from(self.channel(line_b, col, channel));
        ((a + b) / 2) as u8
    }

    /// Performs one scheduler transition, programming the tone generator for the next segment.
    fn advance(&mut self) {
        match self.state {
            // Transmission header, common to all modes.
            State::Start => {
                self.state = State::Leader1;
                self.program(self.descriptor.leader_tone);
            }
            State::Leader1 => {
                self.state = State::Break;
                self.program(self.descriptor.break_tone);
            }
            State::Break => {
                self.state = State::Leader2;
                self.program(self.descriptor.leader_tone);
            }
            State::Leader2 => {
                self.state = State::VisStart;
                self.vis_bit = 0;
                let vis = self.descriptor.vis;
                self.fsk.program(vis.sep_freq.phase_delta, vis.time.usamp);
            }

            // VIS data bits, least significant first.
            State::VisStart => self.program_vis_bit(),
            State::VisBit if self.vis_bit <= 7 => self.program_vis_bit(),
            State::VisBit => {
                self.state = State::VisStop;
                let vis = self.descriptor.vis;
                self.fsk.program(vis.sep_freq.phase_delta, vis.time.usamp);
            }

            // Scan pattern, per mode family.
            _ => match family_of(self.mode) {
                Family::Mono => self.advance_mono(),
                Family::RobotColourHalf => self.advance_robot_colour_half(),
                Family::RobotColourFull => self.advance_robot_colour_full(),
                Family::Scottie => self.advance_scottie(),
                Family::Martin => self.advance_martin(),
                Family::Pd => self.advance_pd(),
            },
        }
    }

    /// FAX480 and the Robot B&W modes: sync, then one grayscale scan per row.
    fn advance_mono(&mut self) {
        let (width, height) = (self.image.width(), self.image.height());

        match self.state {
            State::VisStop => {
                self.state = State::Sync;
                self.line = 0;
                self.program(self.descriptor.sync);
            }
            State::Sync => {
                self.col = 0;
                self.state = State::YScan;
                let y = self.luma(self.line, self.col);
                self.scan_pixel(y);
            }
            State::YScan if self.col < width => {
                let y = self.luma(self.line, self.col);
                self.scan_pixel(y);
            }
            State::YScan if self.line < height - 1 => {
                self.state = State::Sync;
                self.line += 1;
                self.program(self.descriptor.sync);
            }
            _ => self.state = State::End,
        }
    }

    /// Robot C12/C36: full-rate luminance, then R-Y on even rows and B-Y on odd rows at half
    /// rate, each chroma scan averaging the row with its pair neighbour.
    fn advance_robot_colour_half(&mut self) {
        let (width, height) = (self.image.width(), self.image.height());

        match self.state {
            State::VisStop => {
                self.state = State::Sync;
                self.line = 0;
                self.program(self.descriptor.sync);
            }
            State::Sync => {
                self.state = State::Porch;
                self.program(self.descriptor.porch);
            }
            State::Porch => {
                self.col = 0;
                self.state = State::YScan;
                let y = self.channel(self.line, self.col, CHAN_Y);
                self.scan_pixel(y);
            }
            State::YScan if self.col < width => {
                let y = self.channel(self.line, self.col, CHAN_Y);
                self.scan_pixel(y);
            }
            State::YScan => {
                if self.line % 2 == 0 {
                    self.state = State::Separator;
                    self.program(self.descriptor.separator);
                }
                else {
                    self.state = State::Separator2;
                    self.program(self.descriptor.separator2);
                }
            }
            State::Separator | State::Separator2 => {
                self.state = State::Porch2;
                self.program(self.descriptor.porch2);
            }
            State::Porch2 if self.line % 2 == 0 => {
                self.col = 0;
                self.state = State::RyScan;
                let ry = self.channel_avg(self.line, self.line + 1, self.col, CHAN_CR);
                self.scan_pixel2(ry);
            }
            State::RyScan if self.col < width => {
                let ry = self.channel_avg(self.line, self.line + 1, self.col, CHAN_CR);
                self.scan_pixel2(ry);
            }
            State::Porch2 => {
                self.col = 0;
                self.state = State::ByScan;
                let by = self.channel_avg(self.line, self.line - 1, self.col, CHAN_CB);
                self.scan_pixel2(by);
            }
            State::ByScan if self.col < width => {
                let by = self.channel_avg(self.line, self.line - 1, self.col, CHAN_CB);
                self.scan_pixel2(by);
            }
            State::RyScan | State::ByScan if self.line < height - 1 => {
                self.state = State::Sync;
                self.line += 1;
                self.program(self.descriptor.sync);
            }
            _ => self.state = State::End,
        }
    }

    /// Robot C24/C72: every row carries luminance plus both chroma scans at half rate.
    fn advance_robot_colour_full(&mut self) {
        let (width, height) = (self.image.width(), self.image.height());

        match self.state {
            State::VisStop => {
                self.state = State::Sync;
                self.line = 0;
                self.program(self.descriptor.sync);
            }
            State::Sync => {
                self.state = State::Porch;
                self.program(self.descriptor.porch);
            }
            State::Porch => {
                self.col = 0;
                self.state = State::YScan;
                let y = self.channel(self.line, self.col, CHAN_Y);
                self.scan_pixel(y);
            }
            State::YScan if self.col < width => {
                let y = self.channel(self.line, self.col, CHAN_Y);
                self.scan_pixel(y);
            }
            State::YScan => {
                self.state = State::SeparatorRy;
                self.program(self.descriptor.separator);
            }
            State::SeparatorRy => {
                self.state = State::PorchRy;
                self.program(self.descriptor.porch2);
            }
            State::PorchRy => {
                self.col = 0;
                self.state = State::RyScan;
                let ry = self.channel(self.line, self.col, CHAN_CR);
                self.scan_pixel2(ry);
            }
            State::RyScan if self.col < width => {
                let ry = self.channel(self.line, self.col, CHAN_CR);
                self.scan_pixel2(ry);
            }
            State::RyScan => {
                self.state = State::SeparatorBy;
                self.program(self.descriptor.separator2);
            }
            State::SeparatorBy => {
                self.state = State::PorchBy;
                self.program(self.descriptor.porch2);
            }
            State::PorchBy => {
                self.col = 0;
                self.state = State::ByScan;
                let by = self.channel(self.line, self.col, CHAN_CB);
                self.scan_pixel2(by);
            }
            State::ByScan if self.col < width => {
                let by = self.channel(self.line, self.col, CHAN_CB);
                self.scan_pixel2(by);
            }
            State::ByScan if self.line < height - 1 => {
                self.state = State::Sync;
                self.line += 1;
                self.program(self.descriptor.sync);
            }
            _ => self.state = State::End,
        }
    }

    /// Scottie: the sync pulse falls between blue and red. Only the very first row leads with
    /// its own sync.
    fn advance_scottie(&mut self) {
        let (width, height) = (self.image.width(), self.image.height());

        match self.state {
            State::VisStop => {
                self.state = State::SyncFirst;
                self.line = 0;
                self.program(self.descriptor.sync);
            }
            State::SyncFirst => {
                self.state = State::PorchG;
                self.program(self.descriptor.porch);
            }
            State::PorchG => {
                self.col = 0;
                self.state = State::GScan;
                let g = self.channel(self.line, self.col, CHAN_G);
                self.scan_pixel(g);
            }
            State::GScan if self.col < width => {
                let g = self.channel(self.line, self.col, CHAN_G);
                self.scan_pixel(g);
            }
            State::GScan => {
                self.state = State::PorchB;
                self.program(self.descriptor.porch);
            }
            State::PorchB => {
                self.col = 0;
                self.state = State::BScan;
                let b = self.channel(self.line, self.col, CHAN_B);
                self.scan_pixel(b);
            }
            State::BScan if self.col < width => {
                let b = self.channel(self.line, self.col, CHAN_B);
                self.scan_pixel(b);
            }
            State::BScan => {
                self.state = State::Sync;
                self.program(self.descriptor.sync);
            }
            State::Sync => {
                self.state = State::PorchR;
                self.program(self.descriptor.porch);
            }
            State::PorchR => {
                self.col = 0;
                self.state = State::RScan;
                let r = self.channel(self.line, self.col, CHAN_R);
                self.scan_pixel(r);
            }
            State::RScan if self.col < width => {
                let r = self.channel(self.line, self.col, CHAN_R);
                self.scan_pixel(r);
            }
            State::RScan if self.line < height - 1 => {
                self.line += 1;
                self.state = State::PorchG;
                self.program(self.descriptor.porch);
            }
            _ => self.state = State::End,
        }
    }

    /// Martin: sync leads every row, a trailing porch closes it.
    fn advance_martin(&mut self) {
        let (width, height) = (self.image.width(), self.image.height());

        match self.state {
            State::VisStop => {
                self.state = State::Sync;
                self.line = 0;
                self.program(self.descriptor.sync);
            }
            State::Sync => {
                self.state = State::PorchG;
                self.program(self.descriptor.porch);
            }
            State::PorchG => {
                self.col = 0;
                self.state = State::GScan;
                let g = self.channel(self.line, self.col, CHAN_G);
                self.scan_pixel(g);
            }
            State::GScan if self.col < width => {
                let g = self.channel(self.line, self.col, CHAN_G);
                self.scan_pixel(g);
            }
            State::GScan => {
                self.state = State::PorchB;
                self.program(self.descriptor.porch);
            }
            State::PorchB => {
                self.col = 0;
                self.state = State::BScan;
                let b = self.channel(self.line, self.col, CHAN_B);
                self.scan_pixel(b);
            }
            State::BScan if self.col < width => {
                let b = self.channel(self.line, self.col, CHAN_B);
                self.scan_pixel(b);
            }
            State::BScan => {
                self.state = State::PorchR;
                self.program(self.descriptor.porch);
            }
            State::PorchR => {
                self.col = 0;
                self.state = State::RScan;
                let r = self.channel(self.line, self.col, CHAN_R);
                self.scan_pixel(r);
            }
            State::RScan if self.col < width => {
                let r = self.channel(self.line, self.col, CHAN_R);
                self.scan_pixel(r);
            }
            State::RScan => {
                self.state = State::Porch;
                self.program(self.descriptor.porch);
            }
            State::Porch if self.line < height - 1 => {
                self.line += 1;
                self.state = State::Sync;
                self.program(self.descriptor.sync);
            }
            _ => self.state = State::End,
        }
    }

    /// PD: rows are scanned in pairs sharing one chroma scan; `line` is the even (top) row of
    /// the current pair.
    fn advance_pd(&mut self) {
        let (width, height) = (self.image.width(), self.image.height());

        match self.state {
            State::VisStop => {
                self.state = State::Sync;
                self.line = 0;
                self.program(self.descriptor.sync);
            }
            // A new pair is begun only if both of its rows exist.
            State::YOddScan if self.col >= width && self.line + 2 < height => {
                self.state = State::Sync;
                self.line += 2;
                self.program(self.descriptor.sync);
            }
            State::Sync => {
                self.state = State::Porch;
                self.program(self.descriptor.porch);
            }
            State::Porch => {
                self.col = 0;
                self.state = State::YEvenScan;
                let y = self.channel(self.line, self.col, CHAN_Y);
                self.scan_pixel(y);
            }
            State::YEvenScan if self.col < width => {
                let y = self.channel(self.line, self.col, CHAN_Y);
                self.scan_pixel(y);
            }
            State::YEvenScan => {
                self.col = 0;
                self.state = State::RyScan;
                let ry = self.channel_avg(self.line, self.line + 1, self.col, CHAN_CR);
                self.scan_pixel(ry);
            }
            State::RyScan if self.col < width => {
                let ry = self.channel_avg(self.line, self.line + 1, self.col, CHAN_CR);
                self.scan_pixel(ry);
            }
            State::RyScan => {
                self.col = 0;
                self.state = State::ByScan;
                let by = self.channel_avg(self.line, self.line + 1, self.col, CHAN_CB);
                self.scan_pixel(by);
            }
            State::ByScan if self.col < width => {
                let by = self.channel_avg(self.line, self.line + 1, self.col, CHAN_CB);
                self.scan_pixel(by);
            }
            State::ByScan => {
                self.col = 0;
                self.state = State::YOddScan;
                let y = self.channel(self.line + 1, self.col, CHAN_Y);
                self.scan_pixel(y);
            }
            State::YOddScan if self.col < width => {
                let y = self.channel(self.line + 1, self.col, CHAN_Y);
                self.scan_pixel(y);
            }
            _ => self.state = State::End,
        }
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("mode", &self.mode)
            .field("sample_rate", &self.sample_rate)
            .field("state", &self.state)
            .field("line", &self.line)
            .field("col", &self.col)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Encoder, EncodeStatus, State, CHAN_G};
    use slowscan_core::errors::Error;
    use slowscan_core::image::{Image, PixelFormat};
    use slowscan_core::mode::Mode;
    use slowscan_core::signal::SignalBuffer;

    fn encoder_for(mode: Mode) -> Encoder {
        Encoder::new(Image::for_mode(mode), mode, 48000).unwrap()
    }

    /// Runs the scheduler to completion and returns the visited states with consecutive
    /// duplicates collapsed.
    fn state_trace(mut enc: Encoder) -> Vec<State> {
        let mut trace = Vec::new();
        while enc.state != State::End {
            enc.advance();
            if trace.last() != Some(&enc.state) {
                trace.push(enc.state);
            }
        }
        trace
    }

    #[test]
    fn verify_creation_validation() {
        // Wrong dimensions.
        let img = Image::new(320, 256, PixelFormat::YCbCr);
        assert_eq!(Encoder::new(img, Mode::Pd120, 48000).unwrap_err(), Error::BadResolution);

        // Wrong pixel format.
        let img = Image::new(640, 496, PixelFormat::Rgb);
        assert_eq!(Encoder::new(img, Mode::Pd120, 48000).unwrap_err(), Error::BadFormat);

        // Degenerate sample rate.
        let img = Image::for_mode(Mode::Pd120);
        assert_eq!(Encoder::new(img, Mode::Pd120, 0).unwrap_err(), Error::BadParameter);
    }

    #[test]
    fn verify_header_prefix_states() {
        let mut enc = encoder_for(Mode::MartinM1);

        let mut states = Vec::new();
        for _ in 0..15 {
            enc.advance();
            states.push(enc.state);
        }

        let expected = [
            State::Leader1,
            State::Break,
            State::Leader2,
            State::VisStart,
            State::VisBit,
            State::VisBit,
            State::VisBit,
            State::VisBit,
            State::VisBit,
            State::VisBit,
            State::VisBit,
            State::VisBit,
            State::VisStop,
            State::Sync,
            State::PorchG,
        ];
        assert_eq!(states, expected);
    }

    #[test]
    fn verify_vis_bits_lsb_first() {
        // PD120 transmits VIS 95 = 0b0101_1111.
        let mut enc = encoder_for(Mode::Pd120);

        // Skip to the VIS start bit.
        for _ in 0..4 {
            enc.advance();
        }
        assert_eq!(enc.state, State::VisStart);

        let vis = enc.descriptor.vis;
        let expected = [
            vis.high_freq, // 1
            vis.high_freq, // 1
            vis.high_freq, // 1
            vis.high_freq, // 1
            vis.high_freq, // 1
            vis.low_freq,  // 0
            vis.high_freq, // 1
            vis.low_freq,  // 0
        ];

        for (i, tone) in expected.iter().enumerate() {
            enc.advance();
            assert_eq!(enc.state, State::VisBit);
            assert_eq!(enc.fsk.phase_delta(), tone.phase_delta, "VIS bit {}", i);
        }

        enc.advance();
        assert_eq!(enc.state, State::VisStop);
        assert_eq!(enc.fsk.phase_delta(), vis.sep_freq.phase_delta);
    }

    #[test]
    fn verify_scottie_sync_placement() {
        let trace = state_trace(encoder_for(Mode::ScottieS3));

        // The first row leads with its own sync pulse.
        let first_row = [
            State::VisStop,
            State::SyncFirst,
            State::PorchG,
            State::GScan,
            State::PorchB,
            State::BScan,
            State::Sync,
            State::PorchR,
            State::RScan,
        ];
        let start = trace.iter().position(|&s| s == State::VisStop).unwrap();
        assert_eq!(&trace[start..start + first_row.len()], &first_row);

        // Every following row goes straight from red back to the green porch; the only sync
        // sits between blue and red.
        let second_row = [
            State::PorchG,
            State::GScan,
            State::PorchB,
            State::BScan,
            State::Sync,
            State::PorchR,
            State::RScan,
        ];
        let after = start + first_row.len();
        assert_eq!(&trace[after..after + second_row.len()], &second_row);

        // One leading sync plus one per row.
        let syncs = trace.iter().filter(|&&s| s == State::Sync || s == State::SyncFirst).count();
        assert_eq!(syncs, 128 + 1);
    }

    #[test]
    fn verify_mono_scan_structure() {
        let mut enc = encoder_for(Mode::Fax480);

        let mut syncs = 0;
        let mut pixels = 0u64;
        while enc.state != State::End {
            enc.advance();
            match enc.state {
                State::Sync => syncs += 1,
                State::YScan => pixels += 1,
                _ => (),
            }
        }

        assert_eq!(syncs, 480);
        assert_eq!(pixels, 480 * 512);
    }

    #[test]
    fn verify_pd_pair_structure() {
        let mut enc = encoder_for(Mode::Pd50);

        let mut syncs = 0;
        let mut even = 0u64;
        let mut odd = 0u64;
        let mut chroma = 0u64;
        while enc.state != State::End {
            enc.advance();
            match enc.state {
                State::Sync => syncs += 1,
                State::YEvenScan => even += 1,
                State::YOddScan => odd += 1,
                State::RyScan | State::ByScan => chroma += 1,
                _ => (),
            }
        }

        // 256 rows in 128 pairs; one sync, one even scan, one odd scan, and one scan of each
        // chroma channel per pair.
        assert_eq!(syncs, 128);
        assert_eq!(even, 128 * 320);
        assert_eq!(odd, 128 * 320);
        assert_eq!(chroma, 2 * 128 * 320);
    }

    #[test]
    fn verify_robot_half_row_parity() {
        let trace = state_trace(encoder_for(Mode::RobotC12));

        // Even rows separate with the 1500 Hz separator and scan R-Y, odd rows with the
        // 2300 Hz separator and scan B-Y.
        let start = trace.iter().position(|&s| s == State::YScan).unwrap();
        let even_row = [
            State::YScan,
            State::Separator,
            State::Porch2,
            State::RyScan,
            State::Sync,
            State::Porch,
        ];
        assert_eq!(&trace[start..start + even_row.len()], &even_row);

        let odd_row = [
            State::YScan,
            State::Separator2,
            State::Porch2,
            State::ByScan,
            State::Sync,
            State::Porch,
        ];
        let after = start + even_row.len();
        assert_eq!(&trace[after..after + odd_row.len()], &odd_row);
    }

    #[test]
    fn verify_chroma_averaging() {
        let mut img = Image::for_mode(Mode::RobotC12);
        {
            // Cr of the first two rows; their average rides the first R-Y scan.
            let data = img.data_mut();
            for col in 0..160 {
                data[col * 3 + 2] = 100;
                data[(160 + col) * 3 + 2] = 200;
            }
        }

        let mut enc = Encoder::new(img, Mode::RobotC12, 48000).unwrap();
        while enc.state != State::RyScan {
            enc.advance();
        }

        assert_eq!(enc.fsk.phase_delta(), enc.descriptor.pixel.val_phase_delta[150]);
    }

    #[test]
    fn verify_scottie_scans_green_first() {
        let mut img = Image::for_mode(Mode::ScottieS3);
        img.data_mut()[CHAN_G] = 77;

        let mut enc = Encoder::new(img, Mode::ScottieS3, 48000).unwrap();
        while enc.state != State::GScan {
            enc.advance();
        }

        assert_eq!(enc.fsk.phase_delta(), enc.descriptor.pixel.val_phase_delta[77]);
    }

    #[test]
    fn verify_zero_capacity_is_a_no_op() {
        let mut enc = encoder_for(Mode::RobotBw8R);
        let mut empty = SignalBuffer::<i16>::new(0);

        assert_eq!(enc.encode(&mut empty).unwrap(), EncodeStatus::BufferFull);
        assert_eq!(empty.len(), 0);
        assert_eq!(enc.state, State::Start);

        // The stream is bit-identical to one from an untouched session.
        let mut probed = SignalBuffer::<i16>::new(512);
        enc.encode(&mut probed).unwrap();

        let mut fresh = SignalBuffer::<i16>::new(512);
        encoder_for(Mode::RobotBw8R).encode(&mut fresh).unwrap();

        assert_eq!(probed.samples(), fresh.samples());
    }

    #[test]
    fn verify_end_is_sticky() {
        let mut enc = encoder_for(Mode::RobotBw8R);
        let mut signal = SignalBuffer::<i16>::new(1 << 22);

        while enc.encode(&mut signal).unwrap() != EncodeStatus::End {}

        // Once the waveform is complete, further calls report the end with no samples.
        assert_eq!(enc.encode(&mut signal).unwrap(), EncodeStatus::End);
        assert_eq!(signal.len(), 0);
    }
}
