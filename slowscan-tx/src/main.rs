// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

use std::error::Error;

use clap::{App, Arg};
use log::{error, info};

use slowscan::core::image::{Image, PixelFormat};
use slowscan::core::mode::Mode;
use slowscan::core::signal::SignalBuffer;
use slowscan::encoder::{EncodeStatus, Encoder};

/// Samples encoded per drain of the signal buffer.
const CHUNK_SAMPLES: usize = 128 * 1024;

fn main() {
    pretty_env_logger::init();

    let matches = App::new("Slowscan Tx")
        .version("0.2")
        .about("Encode an image into an SSTV audio signal")
        .arg(
            Arg::new("list")
                .long("list")
                .short('l')
                .help("List the supported SSTV modes"),
        )
        .arg(
            Arg::new("MODE")
                .help("The SSTV mode to transmit")
                .required_unless_present("list")
                .index(1),
        )
        .arg(
            Arg::new("INPUT")
                .help("The input image file path")
                .required_unless_present("list")
                .index(2),
        )
        .arg(
            Arg::new("OUTPUT")
                .help("The output WAV file path")
                .required_unless_present("list")
                .index(3),
        )
        .arg(
            Arg::new("SAMPLE_RATE")
                .help("The output sample rate in Hz")
                .default_value("48000")
                .index(4),
        )
        .get_matches();

    if matches.is_present("list") {
        print_modes();
        return;
    }

    let mode = match Mode::from_name(matches.value_of("MODE").unwrap()) {
        Some(mode) => mode,
        None => {
            error!("unknown mode '{}', see --list", matches.value_of("MODE").unwrap());
            std::process::exit(1);
        }
    };

    let sample_rate = match matches.value_of("SAMPLE_RATE").unwrap().parse::<u32>() {
        Ok(rate) if rate > 0 => rate,
        _ => {
            error!("sample rate must be a positive integer");
            std::process::exit(1);
        }
    };

    let input = matches.value_of("INPUT").unwrap();
    let output = matches.value_of("OUTPUT").unwrap();

    if let Err(err) = transmit(mode, input, output, sample_rate) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn print_modes() {
    println!("Supported modes:");
    for mode in Mode::ALL.iter() {
        let (w, h) = mode.dimensions();
        let format = match mode.pixel_format() {
            PixelFormat::Y => "grayscale",
            PixelFormat::YCbCr => "YCbCr",
            PixelFormat::Rgb => "RGB",
        };
        println!("  * {:<14} {}x{} {}", mode.name(), w, h, format);
    }
}

fn transmit(mode: Mode, input: &str, output: &str, sample_rate: u32) -> Result<(), Box<dyn Error>> {
    let (width, height) = mode.dimensions();

    info!("loading image from {}", input);
    let decoded = image::open(input)?;

    // The transmitted geometry is fixed by the mode; the source aspect ratio gives way.
    info!("resizing to {}x{}", width, height);
    let resized = decoded.resize_exact(width, height, image::imageops::FilterType::Lanczos3);

    let mut img = Image::from_parts(width, height, PixelFormat::Rgb, resized.to_rgb8().into_raw())?;
    img.convert(mode.pixel_format())?;

    let mut encoder = Encoder::new(img, mode, sample_rate)?;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(output, spec)?;

    info!("encoding {} to {}", mode, output);
    let mut signal = SignalBuffer::<i16>::new(CHUNK_SAMPLES);
    loop {
        let status = encoder.encode(&mut signal)?;

        for &sample in signal.samples() {
            writer.write_sample(sample)?;
        }
        info!("wrote {} samples", signal.len());

        if status == EncodeStatus::End {
            break;
        }
    }

    writer.finalize()?;
    info!("done");

    Ok(())
}
