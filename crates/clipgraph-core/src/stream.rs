//! Stream descriptors: what a clip produces.

use serde::{Deserialize, Serialize};

use crate::colorspace::Colorspace;
use crate::time::FrameRate;

/// Audio sample encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SampleType {
    U8,
    #[default]
    I16,
    I24,
    I32,
    F32,
}

impl SampleType {
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::I16 => 2,
            Self::I24 => 3,
            Self::I32 | Self::F32 => 4,
        }
    }
}

/// Audio stream layout. A sample rate of zero means no audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub sample_type: SampleType,
}

impl AudioFormat {
    pub const NONE: Self = Self {
        sample_rate: 0,
        channels: 0,
        sample_type: SampleType::I16,
    };

    pub fn new(sample_rate: u32, channels: u16, sample_type: SampleType) -> Self {
        Self {
            sample_rate,
            channels,
            sample_type,
        }
    }

    pub fn has_audio(&self) -> bool {
        self.sample_rate != 0 && self.channels != 0
    }

    /// Bytes of one multi-channel sample.
    pub fn bytes_per_audio_sample(&self) -> usize {
        self.channels as usize * self.sample_type.bytes_per_sample()
    }
}

/// Everything a consumer needs to know about a clip's output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub width: u32,
    pub height: u32,
    pub colorspace: Colorspace,
    pub num_frames: i32,
    pub frame_rate: FrameRate,
    pub audio: AudioFormat,
}

impl StreamDescriptor {
    /// Video-only descriptor.
    pub fn video(width: u32, height: u32, colorspace: Colorspace, num_frames: i32) -> Self {
        Self {
            width,
            height,
            colorspace,
            num_frames,
            frame_rate: FrameRate::default(),
            audio: AudioFormat::NONE,
        }
    }

    pub fn with_frame_rate(mut self, frame_rate: FrameRate) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_audio(mut self, audio: AudioFormat) -> Self {
        self.audio = audio;
        self
    }

    pub fn has_audio(&self) -> bool {
        self.audio.has_audio()
    }

    /// Same colorspace tag, component count and bit depth.
    pub fn is_same_colorspace(&self, other: &StreamDescriptor) -> bool {
        self.colorspace.is_same_colorspace(&other.colorspace)
    }

    /// Convert a frame number to the index of its first audio sample.
    pub fn audio_samples_from_frames(&self, frames: i64) -> i64 {
        if !self.has_audio() {
            return 0;
        }
        self.frame_rate
            .samples_from_frames(frames, self.audio.sample_rate)
    }

    /// Convert a count of multi-channel samples to a byte count.
    pub fn bytes_from_audio_samples(&self, samples: i64) -> usize {
        samples.max(0) as usize * self.audio.bytes_per_audio_sample()
    }
}
