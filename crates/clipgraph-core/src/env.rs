//! The services a clip may call back into while being built or queried.

use tracing::debug;

use crate::clip::ClipRef;
use crate::error::{GraphError, Result};
use crate::frame::{copy_rect, FrameBuffer};
use crate::function::FunctionTable;
use crate::stream::StreamDescriptor;
use crate::value::ArgValue;

/// Filter construction and frame allocation.
pub trait Environment: Send + Sync {
    /// Resolve `name` against the registered functions and call it.
    fn invoke(&self, name: &str, args: &[ArgValue]) -> Result<ArgValue>;

    /// Like [`Environment::invoke`], but the result must be a clip.
    fn invoke_clip(&self, name: &str, args: &[ArgValue]) -> Result<ClipRef> {
        match self.invoke(name, args)? {
            ArgValue::Clip(clip) => Ok(clip),
            _ => Err(GraphError::NotAClip(name.to_string())),
        }
    }

    /// Allocate a writable frame for `desc`, taking properties from `hint`.
    fn new_video_frame(&self, desc: &StreamDescriptor, hint: Option<&FrameBuffer>) -> FrameBuffer {
        let mut frame = FrameBuffer::for_stream(desc);
        if let Some(hint) = hint {
            self.copy_frame_props(hint, &mut frame);
        }
        frame
    }

    fn copy_frame_props(&self, src: &FrameBuffer, dst: &mut FrameBuffer) {
        dst.props.clone_from(&src.props);
    }

    /// Pitched rectangular copy.
    fn bit_blt(
        &self,
        dst: &mut [u8],
        dst_pitch: usize,
        src: &[u8],
        src_pitch: usize,
        row_bytes: usize,
        rows: usize,
    ) {
        copy_rect(dst, dst_pitch, src, src_pitch, row_bytes, rows);
    }
}

/// In-process environment over a [`FunctionTable`].
#[derive(Default)]
pub struct ScriptEnvironment {
    functions: FunctionTable,
}

impl ScriptEnvironment {
    pub fn new(functions: FunctionTable) -> Self {
        Self { functions }
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }
}

impl Environment for ScriptEnvironment {
    fn invoke(&self, name: &str, args: &[ArgValue]) -> Result<ArgValue> {
        debug!(function = name, args = args.len(), "invoke");
        self.functions.call(name, args, self)
    }
}
