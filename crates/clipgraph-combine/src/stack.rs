//! StackVertical and StackHorizontal.

use std::sync::Arc;

use clipgraph_core::{
    ArgValue, Clip, ClipRef, Environment, GraphError, Result, StreamDescriptor, VideoFrame,
};
use tracing::info;

/// Stacking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Top to bottom; widths must match.
    Vertical,
    /// Left to right; heights must match.
    Horizontal,
}

impl Orientation {
    pub fn filter_name(self) -> &'static str {
        match self {
            Orientation::Vertical => "StackVertical",
            Orientation::Horizontal => "StackHorizontal",
        }
    }
}

/// Several clips laid out side by side in one frame.
pub struct Stack {
    orientation: Orientation,
    /// Children in copy order.
    children: Vec<ClipRef>,
    /// Index in `children` of the first clip passed in; provides audio,
    /// parity and frame properties.
    first_child: usize,
    desc: StreamDescriptor,
}

impl Stack {
    pub fn new(orientation: Orientation, mut children: Vec<ClipRef>) -> Result<Self> {
        let name = orientation.filter_name();
        if children.len() < 2 {
            return Err(GraphError::filter(name, "at least two clips are required"));
        }

        let mut desc = *children[0].stream();
        for child in &children[1..] {
            let other = child.stream();
            match orientation {
                Orientation::Vertical => {
                    if desc.width != other.width {
                        return Err(GraphError::filter(name, "image widths don't match"));
                    }
                }
                Orientation::Horizontal => {
                    if desc.height != other.height {
                        return Err(GraphError::filter(name, "image heights don't match"));
                    }
                }
            }
            if !desc.is_same_colorspace(other) {
                return Err(GraphError::filter(name, "image formats don't match"));
            }
            desc.num_frames = desc.num_frames.max(other.num_frames);
            match orientation {
                Orientation::Vertical => desc.height += other.height,
                Orientation::Horizontal => desc.width += other.width,
            }
        }

        // Interleaved RGB is stored bottom-up, so the last clip's rows come first.
        let first_child = if orientation == Orientation::Vertical && desc.colorspace.is_packed_rgb() {
            children.reverse();
            children.len() - 1
        } else {
            0
        };

        info!(
            filter = name,
            clips = children.len(),
            width = desc.width,
            height = desc.height,
            "stack constructed"
        );
        Ok(Self {
            orientation,
            children,
            first_child,
            desc,
        })
    }

    pub fn vertical(children: Vec<ClipRef>) -> Result<Self> {
        Self::new(Orientation::Vertical, children)
    }

    pub fn horizontal(children: Vec<ClipRef>) -> Result<Self> {
        Self::new(Orientation::Horizontal, children)
    }

    /// Build from bound `(clip, clip+)` arguments.
    pub fn create(orientation: Orientation, args: &[ArgValue]) -> Result<ArgValue> {
        let name = orientation.filter_name();
        let mut children = Vec::new();
        for arg in args {
            match arg {
                ArgValue::Clip(clip) => children.push(ClipRef::clone(clip)),
                ArgValue::Array(items) => {
                    for item in items {
                        let clip = item.as_clip().ok_or_else(|| {
                            GraphError::invalid_arguments(name, "clip array not recognized!")
                        })?;
                        children.push(ClipRef::clone(clip));
                    }
                }
                _ => return Err(GraphError::invalid_arguments(name, "clip array not recognized!")),
            }
        }
        Ok(ArgValue::Clip(Arc::new(Self::new(orientation, children)?)))
    }
}

impl Clip for Stack {
    fn get_frame(&self, n: i32, env: &dyn Environment) -> Result<VideoFrame> {
        let frames = self
            .children
            .iter()
            .map(|child| child.get_frame(n, env))
            .collect::<Result<Vec<_>>>()?;

        let mut dst = env.new_video_frame(&self.desc, Some(&frames[self.first_child]));

        // Each plane keeps its own running offset: chroma planes have their
        // own pitch and height.
        for (p, dst_plane) in dst.planes.iter_mut().enumerate() {
            let mut offset = 0;
            for src in &frames {
                let src_plane = &src.planes[p];
                match self.orientation {
                    Orientation::Vertical => {
                        let rows = src_plane.height as usize;
                        env.bit_blt(
                            &mut dst_plane.data[offset..],
                            dst_plane.pitch,
                            &src_plane.data,
                            src_plane.pitch,
                            dst_plane.row_size,
                            rows,
                        );
                        offset += dst_plane.pitch * rows;
                    }
                    Orientation::Horizontal => {
                        env.bit_blt(
                            &mut dst_plane.data[offset..],
                            dst_plane.pitch,
                            &src_plane.data,
                            src_plane.pitch,
                            src_plane.row_size,
                            dst_plane.height as usize,
                        );
                        offset += src_plane.row_size;
                    }
                }
            }
        }

        Ok(Arc::new(dst))
    }

    fn get_audio(&self, buf: &mut [u8], start: i64, count: i64, env: &dyn Environment) -> Result<()> {
        self.children[self.first_child].get_audio(buf, start, count, env)
    }

    fn get_parity(&self, n: i32) -> bool {
        self.children[self.first_child].get_parity(n)
    }

    fn stream(&self) -> &StreamDescriptor {
        &self.desc
    }
}
