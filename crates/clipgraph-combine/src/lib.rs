//! clipgraph Combine - filters that assemble or re-derive clips
//!
//! - `StackVertical` / `StackHorizontal`: frames laid out side by side
//! - `ShowFiveVersions`: five clips in a staggered mosaic
//! - `Animate`: a filter rebuilt with interpolated arguments across a range
//! - `ApplyRange`: a filter applied to a frame range only

pub mod animate;
pub mod cache;
pub mod config;
pub mod interpolate;
pub mod mosaic;
pub mod stack;

pub use animate::Animate;
pub use cache::StageCache;
pub use config::CombineConfig;
pub use mosaic::ShowFiveVersions;
pub use stack::{Orientation, Stack};

use clipgraph_core::{FunctionTable, Param, ParamKind, Signature};

const CLIP: Param = Param::one(ParamKind::Clip);
const INT: Param = Param::one(ParamKind::Int);
const STRING: Param = Param::one(ParamKind::String);

/// Register the combine filters with the default configuration.
pub fn register(table: &mut FunctionTable) {
    register_with_config(table, &CombineConfig::default());
}

/// Register the combine filters.
pub fn register_with_config(table: &mut FunctionTable, config: &CombineConfig) {
    let clips = Signature::new([CLIP, Param::one_or_more(ParamKind::Clip)]);
    table.add("StackVertical", clips.clone(), |args, _| {
        Stack::create(Orientation::Vertical, args)
    });
    table.add("StackHorizontal", clips, |args, _| {
        Stack::create(Orientation::Horizontal, args)
    });
    table.add(
        "ShowFiveVersions",
        Signature::new([CLIP, CLIP, CLIP, CLIP, CLIP]),
        |args, _| ShowFiveVersions::create(args),
    );

    let cache_size = config.animate_cache_size;
    let rest = Param::zero_or_more(ParamKind::Any);
    table.add(
        "Animate",
        Signature::new([INT, INT, STRING, rest]),
        move |args, env| Animate::create(args, cache_size, env),
    );
    table.add(
        "Animate",
        Signature::new([CLIP, INT, INT, STRING, rest]),
        move |args, env| Animate::create(args, cache_size, env),
    );
    table.add(
        "ApplyRange",
        Signature::new([CLIP, INT, INT, STRING, rest]),
        Animate::create_range,
    );
}
