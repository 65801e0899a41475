//! ShowFiveVersions: five clips in a staggered 3x2 mosaic.
//!
//! ```text
//! +-----+-----+-----+
//! |  0  |  2  |  4  |
//! +--+--+--+--+--+--+
//! |  |  1  |  3  |  |
//! +--+-----+-----+--+
//! ```
//!
//! The two half cells left over in the lower row are filled with mid-gray.

use std::sync::Arc;

use clipgraph_core::{
    ArgValue, Clip, ClipRef, Colorspace, Environment, FrameBuffer, GraphError, PlaneId, Result,
    StreamDescriptor, VideoFrame,
};
use smallvec::SmallVec;
use tracing::info;

const NAME: &str = "ShowFiveVersions";

pub struct ShowFiveVersions {
    children: [ClipRef; 5],
    /// Size of one input clip.
    cell_width: u32,
    desc: StreamDescriptor,
}

impl ShowFiveVersions {
    pub fn new(children: [ClipRef; 5]) -> Result<Self> {
        let mut desc = *children[0].stream();
        for child in &children[1..] {
            let other = child.stream();
            desc.num_frames = desc.num_frames.max(other.num_frames);
            if desc.width != other.width
                || desc.height != other.height
                || desc.colorspace != other.colorspace
            {
                return Err(GraphError::filter(
                    NAME,
                    "video attributes of all clips must match",
                ));
            }
        }
        let cell_width = desc.width;
        desc.width *= 3;
        desc.height *= 2;

        info!(width = desc.width, height = desc.height, "ShowFiveVersions constructed");
        Ok(Self {
            children,
            cell_width,
            desc,
        })
    }

    /// Build from five bound clip arguments.
    pub fn create(args: &[ArgValue]) -> Result<ArgValue> {
        let clips: Vec<ClipRef> = args
            .iter()
            .map(|arg| {
                arg.as_clip()
                    .cloned()
                    .ok_or_else(|| GraphError::invalid_arguments(NAME, "expected five clips"))
            })
            .collect::<Result<_>>()?;
        let children: [ClipRef; 5] = clips
            .try_into()
            .map_err(|_| GraphError::invalid_arguments(NAME, "expected five clips"))?;
        Ok(ArgValue::Clip(Arc::new(Self::new(children)?)))
    }

    /// Fill the two spare half cells of the lower mosaic row.
    fn fill_spare_cells(&self, dst: &mut FrameBuffer) {
        let cs = self.desc.colorspace;
        // Bottom-up storage puts the lower row first in memory.
        let lower_row_first = cs.is_packed_rgb();
        for plane in dst.planes.iter_mut() {
            let id = plane.id;
            let half_height = plane.height / 2;
            let cell = cs.plane_width(id, self.cell_width);
            let gap = cell / 2;
            let right = 2 * cell + gap;
            let y = if lower_row_first { 0 } else { half_height };
            let gray = mid_gray(&cs, id);
            plane.fill_rect(0, y, cs.bytes_from_pixels(id, gap), half_height, &gray);
            plane.fill_rect(
                cs.bytes_from_pixels(id, right),
                y,
                cs.bytes_from_pixels(id, 3 * cell - right),
                half_height,
                &gray,
            );
        }
    }
}

/// One pixel of mid-gray for `plane`.
fn mid_gray(cs: &Colorspace, plane: PlaneId) -> SmallVec<[u8; 8]> {
    let component: SmallVec<[u8; 4]> = if cs.is_float() {
        let value: f32 = if plane.is_chroma() { 0.0 } else { 0.5 };
        SmallVec::from_slice(&value.to_le_bytes())
    } else {
        match cs.bits_per_component {
            8 => SmallVec::from_slice(&[0x80]),
            bits => SmallVec::from_slice(&(1u16 << (bits - 1)).to_le_bytes()),
        }
    };
    let components = cs.bytes_per_pixel(plane) / component.len();
    let mut pixel = SmallVec::new();
    for _ in 0..components.max(1) {
        pixel.extend_from_slice(&component);
    }
    pixel
}

impl Clip for ShowFiveVersions {
    fn get_frame(&self, n: i32, env: &dyn Environment) -> Result<VideoFrame> {
        let cs = self.desc.colorspace;
        let mut dst = env.new_video_frame(&self.desc, None);
        self.fill_spare_cells(&mut dst);

        for (c, child) in self.children.iter().enumerate() {
            let src = child.get_frame(n, env)?;
            if c == 0 {
                env.copy_frame_props(&src, &mut dst);
            }

            let odd = c % 2 == 1;
            let lower = odd ^ cs.is_packed_rgb();
            for (p, dst_plane) in dst.planes.iter_mut().enumerate() {
                let src_plane = &src.planes[p];
                let id = dst_plane.id;
                let cell = cs.plane_width(id, self.cell_width);
                let half_height = dst_plane.height / 2;

                let mut x = (c as u32 / 2) * cell;
                if odd {
                    x += cell / 2;
                }
                let y = if lower { half_height } else { 0 };
                let offset = dst_plane.offset(cs.bytes_from_pixels(id, x), y);

                env.bit_blt(
                    &mut dst_plane.data[offset..],
                    dst_plane.pitch,
                    &src_plane.data,
                    src_plane.pitch,
                    src_plane.row_size,
                    half_height as usize,
                );
            }
        }

        Ok(Arc::new(dst))
    }

    fn get_audio(&self, buf: &mut [u8], start: i64, count: i64, env: &dyn Environment) -> Result<()> {
        self.children[0].get_audio(buf, start, count, env)
    }

    fn get_parity(&self, n: i32) -> bool {
        self.children[0].get_parity(n)
    }

    fn stream(&self) -> &StreamDescriptor {
        &self.desc
    }
}
