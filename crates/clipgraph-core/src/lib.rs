//! clipgraph Core - Foundation types for the clip graph
//!
//! This crate provides the types every graph node shares:
//! - Colorspaces, planes and stream descriptors
//! - Frame buffers with independently pitched planes
//! - Filter argument values
//! - The `Clip` and `Environment` contracts and the function table
//! - Error types

pub mod clip;
pub mod colorspace;
pub mod env;
pub mod error;
pub mod frame;
pub mod function;
pub mod source;
pub mod stream;
pub mod time;
pub mod value;

pub use clip::{check_audio_buffer, Clip, ClipRef};
pub use colorspace::{ChromaSubsampling, Colorspace, PixelType, PlaneId};
pub use env::{Environment, ScriptEnvironment};
pub use error::{GraphError, Result};
pub use frame::{copy_rect, FrameBuffer, FramePlane, FrameProps, PropValue, VideoFrame};
pub use function::{Arity, CreateFn, FunctionEntry, FunctionTable, Param, ParamKind, Signature};
pub use source::BlankClip;
pub use stream::{AudioFormat, SampleType, StreamDescriptor};
pub use time::FrameRate;
pub use value::{ArgKind, ArgValue};
