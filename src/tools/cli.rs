use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};

use crate::compression::compress::{DEFAULT_CHROMA_QUALITY, DEFAULT_LUMA_QUALITY};
use crate::compression::pipeline::Settings;

/// Destination used when compressing without an explicit output path.
pub const DEFAULT_DESTINATION: &str = "./res.bjpeg";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Compress or Decompress
pub enum Mode {
    Compress,
    Decompress,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "An experimental JPEG-style still image compressor",
    long_about = "
    Splits an image into luma and chroma planes, codes every 8x8 block with a DCT,
    quality-scaled quantization, zigzag scan and run-length coding, and stores the
    three channels in a small binary container. Quality 1.0 is near lossless."
)]
pub struct Args {
    /// Path to source image
    #[clap(value_name = "SrcPath")]
    pub src: PathBuf,

    /// Path to destination image
    #[clap(value_name = "DstPath")]
    pub dst: Option<PathBuf>,

    /// Decompress SrcPath instead of compressing it
    #[clap(short = 'd', long = "decompress")]
    pub decompress: bool,

    /// Luma quality, 0 < q <= 1. Lower is smaller and blurrier
    #[clap(short = 'q', long = "quality", default_value_t = DEFAULT_LUMA_QUALITY)]
    pub quality: f32,

    /// Chroma quality, 0 < q <= 1
    #[clap(short = 'c', long = "chroma-quality", default_value_t = DEFAULT_CHROMA_QUALITY)]
    pub chroma_quality: f32,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    pub force: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    pub v: u8,
}

/// Everything the driver needs, resolved from the command line.
#[derive(Debug)]
pub struct Opts {
    /// Compress/Decompress
    pub op_mode: Mode,
    /// File to read
    pub src: PathBuf,
    /// File to write
    pub dst: PathBuf,
    /// Qualities handed to the codec
    pub settings: Settings,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Log level requested with -v
    pub verbosity: LevelFilter,
}

impl Opts {
    /// Resolve defaults that depend on other arguments, like the destination path.
    pub fn from_args(args: Args) -> Self {
        let op_mode = if args.decompress {
            Mode::Decompress
        } else {
            Mode::Compress
        };
        let dst = match (args.dst, op_mode) {
            (Some(dst), _) => dst,
            (None, Mode::Compress) => PathBuf::from(DEFAULT_DESTINATION),
            (None, Mode::Decompress) => args.src.with_extension("png"),
        };
        Self {
            op_mode,
            src: args.src,
            dst,
            settings: Settings::new(args.quality, args.chroma_quality),
            force_overwrite: args.force,
            verbosity: verbosity(args.v),
        }
    }
}

fn verbosity(v: u8) -> LevelFilter {
    match v {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Parse the command line, set the log level and report what we are about to do.
pub fn opts_init() -> Opts {
    let opts = Opts::from_args(Args::parse());

    // Set the log level
    log::set_max_level(opts.verbosity);

    // Below we report initialization status to the user
    info!("---- bjpeg Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Reading {}", opts.src.display());
    info!("Writing {}", opts.dst.display());
    if opts.op_mode == Mode::Compress {
        info!(
            "Quality set to {} (luma) / {} (chroma)",
            opts.settings.luma_quality, opts.settings.chroma_quality
        );
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    info!("---- bjpeg Initialization End ----\n");
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn opts(args: &[&str]) -> Opts {
        Opts::from_args(Args::parse_from(std::iter::once("bjpeg").chain(args.iter().copied())))
    }

    #[test]
    fn compress_defaults() {
        let o = opts(&["in.bmp"]);
        assert_eq!(o.op_mode, Mode::Compress);
        assert_eq!(o.dst, PathBuf::from(DEFAULT_DESTINATION));
        assert_eq!(o.settings, Settings::default());
        assert_eq!(o.verbosity, LevelFilter::Info);
        assert!(!o.force_overwrite);
    }

    #[test]
    fn decompress_defaults_to_png_next_to_source() {
        let o = opts(&["-d", "pics/cat.bjpeg"]);
        assert_eq!(o.op_mode, Mode::Decompress);
        assert_eq!(o.dst, PathBuf::from("pics/cat.png"));
    }

    #[test]
    fn explicit_flags() {
        let o = opts(&["--decompress", "a.bjpeg", "b.bmp", "-f", "-v", "5"]);
        assert_eq!(o.dst, PathBuf::from("b.bmp"));
        assert!(o.force_overwrite);
        assert_eq!(o.verbosity, LevelFilter::Trace);
    }

    #[test]
    fn qualities() {
        let o = opts(&["in.png", "-q", "0.9", "--chroma-quality", "0.4"]);
        assert_eq!(o.settings, Settings::new(0.9, 0.4));
    }

    #[test]
    fn no_pixel_order_flag() {
        assert!(Args::try_parse_from(["bjpeg", "--bgr", "in.bmp"]).is_err());
    }
}
