//! Frame buffer types for video frames in CPU memory.
//!
//! Every plane is independently pitched: chroma planes of subsampled formats
//! are smaller than the luma plane and never share its offsets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::colorspace::{Colorspace, PlaneId};
use crate::stream::StreamDescriptor;

/// Row alignment for freshly allocated planes.
pub const FRAME_ALIGN: usize = 64;

/// A frame property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropValue {
    Int(i64),
    Float(f64),
    Data(String),
}

/// Per-frame properties, carried alongside the pixels.
pub type FrameProps = BTreeMap<String, PropValue>;

/// A plane of pixel data with pitch information.
#[derive(Debug, Clone)]
pub struct FramePlane {
    pub id: PlaneId,
    /// Raw pixel data
    pub data: Vec<u8>,
    /// Bytes per row in memory (may include padding)
    pub pitch: usize,
    /// Bytes of visible pixels per row
    pub row_size: usize,
    /// Height in rows
    pub height: u32,
}

impl FramePlane {
    /// Create a zeroed plane, pitch aligned to [`FRAME_ALIGN`].
    pub fn new(id: PlaneId, row_size: usize, height: u32) -> Self {
        let pitch = (row_size + FRAME_ALIGN - 1) & !(FRAME_ALIGN - 1);
        let data = vec![0u8; pitch * height as usize];
        Self {
            id,
            data,
            pitch,
            row_size,
            height,
        }
    }

    /// Byte offset of column `x_bytes` in row `y`.
    #[inline]
    pub fn offset(&self, x_bytes: usize, y: u32) -> usize {
        y as usize * self.pitch + x_bytes
    }

    /// Get the visible bytes of a row.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.offset(0, y);
        &self.data[start..start + self.row_size]
    }

    /// Get the visible bytes of a row mutably.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = self.offset(0, y);
        let end = start + self.row_size;
        &mut self.data[start..end]
    }

    /// Fill a rectangle by repeating `pattern` (one sample) across it.
    pub fn fill_rect(&mut self, x_bytes: usize, y: u32, width_bytes: usize, rows: u32, pattern: &[u8]) {
        if pattern.is_empty() {
            return;
        }
        for row in y..y + rows {
            let start = self.offset(x_bytes, row);
            let span = &mut self.data[start..start + width_bytes];
            for chunk in span.chunks_mut(pattern.len()) {
                chunk.copy_from_slice(&pattern[..chunk.len()]);
            }
        }
    }
}

/// A video frame in CPU memory.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub colorspace: Colorspace,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel data planes, in family order
    pub planes: SmallVec<[FramePlane; 4]>,
    pub props: FrameProps,
}

impl FrameBuffer {
    /// Create a zeroed frame buffer with the given dimensions and colorspace.
    pub fn new(width: u32, height: u32, colorspace: Colorspace) -> Self {
        let planes = colorspace
            .planes()
            .iter()
            .map(|&id| {
                let row_size = colorspace.bytes_from_pixels(id, colorspace.plane_width(id, width));
                FramePlane::new(id, row_size, colorspace.plane_height(id, height))
            })
            .collect();

        Self {
            colorspace,
            width,
            height,
            planes,
            props: FrameProps::new(),
        }
    }

    /// Allocate a frame shaped like the stream's video.
    pub fn for_stream(desc: &StreamDescriptor) -> Self {
        Self::new(desc.width, desc.height, desc.colorspace)
    }

    /// Look up a plane by identifier.
    pub fn plane(&self, id: PlaneId) -> Option<&FramePlane> {
        self.planes.iter().find(|p| p.id == id)
    }

    /// Look up a plane by identifier, mutably.
    pub fn plane_mut(&mut self, id: PlaneId) -> Option<&mut FramePlane> {
        self.planes.iter_mut().find(|p| p.id == id)
    }

    /// Get the primary plane (plane 0).
    #[inline]
    pub fn primary_plane(&self) -> &FramePlane {
        &self.planes[0]
    }

    /// Get the primary plane mutably.
    #[inline]
    pub fn primary_plane_mut(&mut self) -> &mut FramePlane {
        &mut self.planes[0]
    }

    /// True when every visible byte of both frames matches. Padding is ignored.
    pub fn same_pixels(&self, other: &FrameBuffer) -> bool {
        self.colorspace == other.colorspace
            && self.width == other.width
            && self.height == other.height
            && self.planes.len() == other.planes.len()
            && self.planes.iter().zip(&other.planes).all(|(a, b)| {
                a.row_size == b.row_size
                    && a.height == b.height
                    && (0..a.height).all(|y| a.row(y) == b.row(y))
            })
    }
}

/// Read-only frame handed out by clips.
pub type VideoFrame = Arc<FrameBuffer>;

/// Copy `rows` rows of `row_bytes` bytes between pitched buffers.
///
/// `dst` and `src` start at the first byte of the rectangle.
pub fn copy_rect(
    dst: &mut [u8],
    dst_pitch: usize,
    src: &[u8],
    src_pitch: usize,
    row_bytes: usize,
    rows: usize,
) {
    if row_bytes == 0 || rows == 0 {
        return;
    }
    if dst_pitch == row_bytes && src_pitch == row_bytes {
        let len = row_bytes * rows;
        dst[..len].copy_from_slice(&src[..len]);
        return;
    }
    for y in 0..rows {
        let d = y * dst_pitch;
        let s = y * src_pitch;
        dst[d..d + row_bytes].copy_from_slice(&src[s..s + row_bytes]);
    }
}
