//! Runs the three channel codecs side by side.
//!
//! Each channel gets one rayon task that owns its input plane (or record) outright. Tasks write
//! only to their own result slot, and the scope is the single join point. Results are read back
//! by channel, never by completion order, so the output is always Y, U, V.

use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};
use crate::types::Plane;

use super::compress::{ChannelCodec, ChannelRecord, DEFAULT_CHROMA_QUALITY, DEFAULT_LUMA_QUALITY};

/// Channel identity, used to pick the codec and to tag failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Y,
    U,
    V,
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Fixed channel order of the container.
pub const CHANNELS: [Channel; 3] = [Channel::Y, Channel::U, Channel::V];

impl Channel {
    /// Luma gets the luminance table, both chroma channels the chrominance table.
    pub fn codec(self) -> ChannelCodec {
        match self {
            Channel::Y => ChannelCodec::luma(),
            Channel::U | Channel::V => ChannelCodec::chroma(),
        }
    }
}

/// Per-channel quality settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub luma_quality: f32,
    pub chroma_quality: f32,
}

impl Settings {
    pub fn new(luma_quality: f32, chroma_quality: f32) -> Self {
        Self {
            luma_quality,
            chroma_quality,
        }
    }

    /// Quality 1.0 on every channel.
    pub fn lossless() -> Self {
        Self::new(1.0, 1.0)
    }

    pub fn quality(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Y => self.luma_quality,
            Channel::U | Channel::V => self.chroma_quality,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_LUMA_QUALITY, DEFAULT_CHROMA_QUALITY)
    }
}

/// Exactly three channel records in Y, U, V order.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedImage {
    pub y: ChannelRecord,
    pub u: ChannelRecord,
    pub v: ChannelRecord,
}

impl CompressedImage {
    pub fn channel(&self, channel: Channel) -> &ChannelRecord {
        match channel {
            Channel::Y => &self.y,
            Channel::U => &self.u,
            Channel::V => &self.v,
        }
    }

    pub fn into_records(self) -> [ChannelRecord; 3] {
        [self.y, self.u, self.v]
    }
}

impl From<[ChannelRecord; 3]> for CompressedImage {
    fn from(records: [ChannelRecord; 3]) -> Self {
        let [y, u, v] = records;
        Self { y, u, v }
    }
}

/// Run `task` once per channel in parallel and collect the outputs in channel order.
///
/// Every task runs to completion. If any failed, the first failure in Y, U, V order is
/// returned and all outputs are dropped.
pub fn run_channels<I, O, F>(inputs: [I; 3], task: F) -> Result<[O; 3]>
where
    I: Send,
    O: Send,
    F: Fn(Channel, I) -> Result<O> + Sync,
{
    let mut slots: [Option<Result<O>>; 3] = [None, None, None];
    let task = &task;
    let jobs = slots.iter_mut().zip(inputs).zip(CHANNELS);
    rayon::scope(move |s| {
        for ((slot, input), channel) in jobs {
            s.spawn(move |_| *slot = Some(task(channel, input)));
        }
    });

    let [y, u, v] = slots;
    Ok([
        collect(Channel::Y, y)?,
        collect(Channel::U, u)?,
        collect(Channel::V, v)?,
    ])
}

fn collect<O>(channel: Channel, slot: Option<Result<O>>) -> Result<O> {
    match slot {
        Some(Ok(out)) => Ok(out),
        Some(Err(err)) => Err(Error::ChannelTaskFailure {
            channel,
            source: Box::new(err),
        }),
        None => Err(Error::ChannelTaskFailure {
            channel,
            source: Box::new(Error::Internal("channel task produced no result")),
        }),
    }
}

/// Compress Y, U and V planes concurrently.
pub fn compress_planes(planes: [Plane; 3], settings: &Settings) -> Result<CompressedImage> {
    let records = run_channels(planes, |channel, plane| {
        channel.codec().compress(&plane, settings.quality(channel))
    })?;
    Ok(records.into())
}

/// Decompress all three records concurrently, each to its stored dimensions.
pub fn decompress_image(image: CompressedImage) -> Result<[Plane; 3]> {
    run_channels(image.into_records(), |channel, record| {
        channel.codec().decompress(&record, None)
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::rle::RunPair;

    fn planes() -> [Plane; 3] {
        [
            Plane::from_fn(20, 12, |x, y| (x * 10 + y) as u8),
            Plane::filled(20, 12, 100),
            Plane::filled(20, 12, 160),
        ]
    }

    #[test]
    fn output_in_channel_order() {
        let image = compress_planes(planes(), &Settings::lossless()).unwrap();
        let back = decompress_image(image).unwrap();
        assert_eq!(back[1], Plane::filled(20, 12, 100));
        assert_eq!(back[2], Plane::filled(20, 12, 160));
    }

    #[test]
    fn channel_settings_are_applied() {
        let settings = Settings::new(0.9, 0.3);
        let image = compress_planes(planes(), &settings).unwrap();
        assert_eq!(image.y.quality, 0.9);
        assert_eq!(image.u.quality, 0.3);
        assert_eq!(image.v.quality, 0.3);
    }

    #[test]
    fn failing_channel_is_named() {
        let mut image = compress_planes(planes(), &Settings::default()).unwrap();
        image.v.runs.push(RunPair::new(1, 0));
        match decompress_image(image) {
            Err(Error::ChannelTaskFailure { channel, source }) => {
                assert_eq!(channel, Channel::V);
                assert!(matches!(*source, Error::DimensionMismatch { .. }));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn first_failure_in_channel_order_wins() {
        let result = run_channels([1, 2, 3], |channel, n: i32| {
            if n >= 2 {
                Err(Error::Internal("boom"))
            } else {
                Ok((channel, n))
            }
        });
        assert!(matches!(
            result,
            Err(Error::ChannelTaskFailure {
                channel: Channel::U,
                ..
            })
        ));
    }

    #[test]
    fn tasks_see_their_own_input() {
        let out = run_channels([10, 20, 30], |channel, n: i32| Ok((channel, n * 2))).unwrap();
        assert_eq!(out, [(Channel::Y, 20), (Channel::U, 40), (Channel::V, 60)]);
    }
}
