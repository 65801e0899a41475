//! The clip contract every graph node implements.

use std::sync::Arc;

use crate::env::Environment;
use crate::error::{GraphError, Result};
use crate::frame::VideoFrame;
use crate::stream::StreamDescriptor;

/// A pull-based frame and audio producer.
///
/// Clips are shared through [`ClipRef`] and may be queried from several
/// threads at once; implementations guard any mutable state themselves.
pub trait Clip: Send + Sync {
    /// Produce frame `n`.
    fn get_frame(&self, n: i32, env: &dyn Environment) -> Result<VideoFrame>;

    /// Write `count` audio samples starting at sample `start` into `buf`.
    ///
    /// `buf` holds at least `stream().bytes_from_audio_samples(count)` bytes.
    fn get_audio(&self, buf: &mut [u8], start: i64, count: i64, env: &dyn Environment) -> Result<()>;

    /// Field parity of frame `n` (true = top field first).
    fn get_parity(&self, n: i32) -> bool;

    fn stream(&self) -> &StreamDescriptor;
}

/// Shared handle to a clip.
pub type ClipRef = Arc<dyn Clip>;

/// Fail unless `buf` can hold `count` samples of `desc`'s audio.
pub fn check_audio_buffer(desc: &StreamDescriptor, buf: &[u8], count: i64) -> Result<()> {
    let needed = desc.bytes_from_audio_samples(count);
    if buf.len() < needed {
        return Err(GraphError::AudioBuffer {
            needed,
            available: buf.len(),
        });
    }
    Ok(())
}
