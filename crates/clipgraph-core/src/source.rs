//! Constant sources.

use std::sync::Arc;

use crate::clip::{check_audio_buffer, Clip, ClipRef};
use crate::env::Environment;
use crate::error::Result;
use crate::frame::{FrameBuffer, PropValue, VideoFrame};
use crate::stream::{SampleType, StreamDescriptor};

/// A clip whose every frame is the same solid picture and whose audio is a
/// constant level.
pub struct BlankClip {
    desc: StreamDescriptor,
    frame: VideoFrame,
    parity: bool,
    sample: Vec<u8>,
}

impl BlankClip {
    /// Zeroed frames and silence.
    pub fn new(desc: StreamDescriptor) -> Self {
        Self::with_plane_values(desc, &[])
    }

    /// Fill each plane with one byte; planes past the end of `values` stay zero.
    pub fn with_plane_values(desc: StreamDescriptor, values: &[u8]) -> Self {
        let mut frame = FrameBuffer::for_stream(&desc);
        for (plane, &value) in frame.planes.iter_mut().zip(values) {
            plane.data.fill(value);
        }
        let sample = encode_sample(desc.audio.sample_type, 0.0).repeat(desc.audio.channels as usize);
        Self {
            desc,
            frame: Arc::new(frame),
            parity: false,
            sample,
        }
    }

    pub fn with_parity(mut self, parity: bool) -> Self {
        self.parity = parity;
        self
    }

    /// Constant audio level in `-1.0..=1.0`, written to every channel.
    pub fn with_audio_level(mut self, level: f32) -> Self {
        self.sample = encode_sample(self.desc.audio.sample_type, level)
            .repeat(self.desc.audio.channels as usize);
        self
    }

    /// Attach a property to every produced frame.
    pub fn with_prop(mut self, key: &str, value: PropValue) -> Self {
        Arc::make_mut(&mut self.frame).props.insert(key.to_string(), value);
        self
    }

    pub fn into_ref(self) -> ClipRef {
        Arc::new(self)
    }
}

fn encode_sample(sample_type: SampleType, level: f32) -> Vec<u8> {
    let level = level.clamp(-1.0, 1.0);
    match sample_type {
        SampleType::U8 => vec![(128.0 + level * 127.0) as u8],
        SampleType::I16 => bytemuck::bytes_of(&((level * i16::MAX as f32) as i16)).to_vec(),
        SampleType::I24 => {
            let v = (level * 8_388_607.0) as i32;
            bytemuck::bytes_of(&v)[..3].to_vec()
        }
        SampleType::I32 => bytemuck::bytes_of(&((level as f64 * i32::MAX as f64) as i32)).to_vec(),
        SampleType::F32 => bytemuck::bytes_of(&level).to_vec(),
    }
}

impl Clip for BlankClip {
    fn get_frame(&self, _n: i32, _env: &dyn Environment) -> Result<VideoFrame> {
        Ok(Arc::clone(&self.frame))
    }

    fn get_audio(&self, buf: &mut [u8], _start: i64, count: i64, _env: &dyn Environment) -> Result<()> {
        check_audio_buffer(&self.desc, buf, count)?;
        let len = self.desc.bytes_from_audio_samples(count);
        if self.sample.is_empty() {
            return Ok(());
        }
        for chunk in buf[..len].chunks_exact_mut(self.sample.len()) {
            chunk.copy_from_slice(&self.sample);
        }
        Ok(())
    }

    fn get_parity(&self, _n: i32) -> bool {
        self.parity
    }

    fn stream(&self) -> &StreamDescriptor {
        &self.desc
    }
}
