//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::{fs, time::Duration, time::Instant};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use bjpeg::tools::cli::{opts_init, Mode, Opts};
use bjpeg::tools::image_io::{self, DriverResult};
use bjpeg::{decode_image, encode_image, PixelOrder};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> DriverResult<()> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    )?;

    let opts = opts_init();

    //----- Figure how what we need to do and go do it
    let result = match opts.op_mode {
        Mode::Compress => compress(&opts),
        Mode::Decompress => decompress(&opts),
    };

    match &result {
        Ok(()) => info!("Done.\n"),
        Err(e) => error!("Failed: {}", e),
    }
    result
}

/// Load the source image, encode it and write the container.
fn compress(opts: &Opts) -> DriverResult<()> {
    info!("Compressing {} -> {}", opts.src.display(), opts.dst.display());
    image_io::check_overwrite(&opts.dst, opts.force_overwrite)?;
    let image = image_io::load(&opts.src)?;

    let start = Instant::now();
    let bytes = encode_image(&image, &opts.settings)?;
    let elapsed = start.elapsed();

    fs::write(&opts.dst, &bytes)?;
    report(image.data().len(), bytes.len(), elapsed);
    Ok(())
}

/// Read a container, decode it and write the image.
fn decompress(opts: &Opts) -> DriverResult<()> {
    info!("Decompressing {} -> {}", opts.src.display(), opts.dst.display());
    image_io::check_overwrite(&opts.dst, opts.force_overwrite)?;
    let bytes = fs::read(&opts.src)?;

    let start = Instant::now();
    let image = decode_image(&bytes, PixelOrder::Rgb)?;
    info!(
        "Decoded {}x{} image in {:?}",
        image.width(),
        image.height(),
        start.elapsed()
    );

    image_io::save(&opts.dst, &image)
}

/// Log the raw size, compressed size, ratio and time taken.
fn report(raw: usize, compressed: usize, elapsed: Duration) {
    let ratio = if compressed == 0 {
        0.0
    } else {
        raw as f64 / compressed as f64
    };
    info!(
        "{} bytes raw, {} bytes compressed, ratio {:.2}, took {:?}",
        raw, compressed, ratio, elapsed
    );
}
