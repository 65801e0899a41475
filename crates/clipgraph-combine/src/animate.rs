//! Animate and ApplyRange.
//!
//! `Animate` rebuilds a filter with arguments interpolated between a
//! "before" and an "after" list across `first..=last`, memoizing the
//! constructed instances per stage. `ApplyRange` builds the filter once and
//! switches between it and the unfiltered clip at the range boundaries, for
//! video, audio and parity alike.

use clipgraph_core::{
    check_audio_buffer, ArgValue, Clip, ClipRef, Environment, GraphError, Result,
    StreamDescriptor, VideoFrame,
};
use parking_lot::Mutex;
use tracing::{info, trace};

use crate::cache::StageCache;
use crate::interpolate::{check_arg_pairs, interpolate_args};

enum Mode {
    /// Interpolate across the range, clamped outside it.
    Animate { cache: Mutex<StageCache> },
    /// Filtered inside the range, `context` outside it.
    Range { context: ClipRef },
}

pub struct Animate {
    first: i32,
    last: i32,
    filter: String,
    args_before: Vec<ArgValue>,
    args_after: Vec<ArgValue>,
    mode: Mode,
    /// Stage-0 instance. Audio, parity and the stream layout come from here.
    base: ClipRef,
    desc: StreamDescriptor,
}

impl Animate {
    /// Animate `filter` from `before` at `first` to `after` at `last`.
    ///
    /// A `context` clip is prepended to both argument lists.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        context: Option<ClipRef>,
        first: i32,
        last: i32,
        filter: &str,
        before: &[ArgValue],
        after: &[ArgValue],
        cache_size: usize,
        env: &dyn Environment,
    ) -> Result<Self> {
        const NAME: &str = "Animate";
        if first > last {
            return Err(GraphError::filter(
                NAME,
                "final frame number must be greater than initial.",
            ));
        }
        if first == last {
            return Err(GraphError::filter(
                NAME,
                "final frame cannot be the same as initial frame.",
            ));
        }
        check_arg_pairs(NAME, before, after)?;

        let args_before = with_context(context.as_ref(), before);
        let args_after = with_context(context.as_ref(), after);
        let scale = span(first, last);

        let mut cache = StageCache::new(cache_size.max(2));
        let base = env.invoke_clip(filter, &args_before)?;
        let end = env.invoke_clip(filter, &args_after)?;

        let (b, e) = (base.stream(), end.stream());
        if b.width != e.width || b.height != e.height {
            return Err(GraphError::filter(
                NAME,
                "initial and final video frame sizes must match",
            ));
        }

        cache.store(0, 0, ClipRef::clone(&base));
        cache.store(1, scale, end);

        info!(filter, first, last, args = args_before.len(), "Animate constructed");
        Ok(Self {
            first,
            last,
            filter: filter.to_string(),
            args_before,
            args_after,
            mode: Mode::Animate {
                cache: Mutex::new(cache),
            },
            desc: *base.stream(),
            base,
        })
    }

    /// Apply `filter` with `args` to `context` on `first..=last` only.
    pub fn apply_range(
        context: ClipRef,
        first: i32,
        last: i32,
        filter: &str,
        args: &[ArgValue],
        env: &dyn Environment,
    ) -> Result<Self> {
        const NAME: &str = "ApplyRange";
        if first > last {
            return Err(GraphError::filter(
                NAME,
                "final frame number must be greater than initial.",
            ));
        }
        check_arg_pairs(NAME, args, args)?;

        let filter_args = with_context(Some(&context), args);
        let base = env.invoke_clip(filter, &filter_args)?;

        let (filtered, unfiltered) = (base.stream(), context.stream());
        if filtered.width != unfiltered.width || filtered.height != unfiltered.height {
            return Err(GraphError::filter(
                NAME,
                "Filtered and unfiltered video frame sizes must match",
            ));
        }
        if !filtered.is_same_colorspace(unfiltered) {
            return Err(GraphError::filter(
                NAME,
                "Filtered and unfiltered video colorspace must match",
            ));
        }

        info!(filter, first, last, "ApplyRange constructed");
        Ok(Self {
            first,
            last,
            filter: filter.to_string(),
            args_after: filter_args.clone(),
            args_before: filter_args,
            mode: Mode::Range { context },
            desc: *base.stream(),
            base,
        })
    }

    /// Build from `(int first, int last, string filter, array args)`, with an
    /// optional leading clip. `args` holds the before list followed by the
    /// after list.
    pub fn create(args: &[ArgValue], cache_size: usize, env: &dyn Environment) -> Result<ArgValue> {
        let (context, rest) = match args.split_first() {
            Some((ArgValue::Clip(clip), rest)) => (Some(ClipRef::clone(clip)), rest),
            _ => (None, args),
        };
        let (first, last, filter, list) = unpack_range_args("Animate", rest)?;
        if list.len() % 2 != 0 {
            return Err(GraphError::filter(
                "Animate",
                "must have two argument lists of the same length",
            ));
        }
        let (before, after) = list.split_at(list.len() / 2);
        let animate = Self::new(context, first, last, filter, before, after, cache_size, env)?;
        Ok(ArgValue::Clip(animate.into_ref()))
    }

    /// Build from `(clip, int first, int last, string filter, array args)`.
    pub fn create_range(args: &[ArgValue], env: &dyn Environment) -> Result<ArgValue> {
        let context = args
            .first()
            .and_then(ArgValue::as_clip)
            .ok_or_else(|| GraphError::invalid_arguments("ApplyRange", "expected a clip"))?;
        let (first, last, filter, list) = unpack_range_args("ApplyRange", &args[1..])?;
        let range = Self::apply_range(ClipRef::clone(context), first, last, filter, list, env)?;
        Ok(ArgValue::Clip(range.into_ref()))
    }

    pub fn into_ref(self) -> ClipRef {
        std::sync::Arc::new(self)
    }

    /// Stages currently held by the cache, in slot order. Empty for
    /// `ApplyRange`, which never interpolates.
    pub fn cached_stages(&self) -> Vec<Option<i64>> {
        match &self.mode {
            Mode::Animate { cache } => cache.lock().stages().collect(),
            Mode::Range { .. } => Vec::new(),
        }
    }

    /// Interpolated instance for `stage`, built on a cache miss.
    fn instance(
        &self,
        cache: &Mutex<StageCache>,
        stage: i64,
        env: &dyn Environment,
    ) -> Result<ClipRef> {
        let scale = span(self.first, self.last);
        let mut cache = cache.lock();
        cache.get_or_insert_with(stage, |stage| {
            let args = interpolate_args(&self.args_before, &self.args_after, stage, scale);
            env.invoke_clip(&self.filter, &args)
        })
    }

    fn outside(&self, n: i32) -> bool {
        n < self.first || n > self.last
    }

    fn range_audio(
        &self,
        context: &ClipRef,
        buf: &mut [u8],
        mut start: i64,
        mut count: i64,
        env: &dyn Environment,
    ) -> Result<()> {
        let desc = self.base.stream();
        let switch_start = desc.audio_samples_from_frames(self.first as i64);
        let switch_end = desc.audio_samples_from_frames(self.last as i64 + 1);

        if start + count <= switch_start || start >= switch_end {
            return context.get_audio(buf, start, count, env);
        }
        if start >= switch_start && start + count <= switch_end {
            return self.base.get_audio(buf, start, count, env);
        }

        check_audio_buffer(desc, buf, count)?;
        let mut offset = 0;

        if switch_start > start {
            let pre = switch_start - start;
            trace!(start, count = pre, "unfiltered audio before range");
            context.get_audio(&mut buf[offset..], start, pre, env)?;
            start += pre;
            count -= pre;
            offset += desc.bytes_from_audio_samples(pre);
        }

        let filtered = count.min(switch_end - start);
        trace!(start, count = filtered, "filtered audio");
        self.base.get_audio(&mut buf[offset..], start, filtered, env)?;
        start += filtered;
        count -= filtered;
        offset += desc.bytes_from_audio_samples(filtered);

        if count > 0 {
            trace!(start, count, "unfiltered audio after range");
            context.get_audio(&mut buf[offset..], start, count, env)?;
        }
        Ok(())
    }
}

/// Number of stages past the first; `last - first` without `i32` overflow.
fn span(first: i32, last: i32) -> i64 {
    last as i64 - first as i64
}

fn with_context(context: Option<&ClipRef>, args: &[ArgValue]) -> Vec<ArgValue> {
    context
        .map(|clip| ArgValue::Clip(ClipRef::clone(clip)))
        .into_iter()
        .chain(args.iter().cloned())
        .collect()
}

fn unpack_range_args<'a>(name: &str, args: &'a [ArgValue]) -> Result<(i32, i32, &'a str, &'a [ArgValue])> {
    match args {
        [ArgValue::Int(first), ArgValue::Int(last), ArgValue::String(filter), ArgValue::Array(list)] => {
            Ok((*first, *last, filter.as_ref(), list.as_slice()))
        }
        _ => Err(GraphError::invalid_arguments(
            name,
            "expected (int first, int last, string filter, args...)",
        )),
    }
}

impl Clip for Animate {
    fn get_frame(&self, n: i32, env: &dyn Environment) -> Result<VideoFrame> {
        match &self.mode {
            Mode::Range { context } if self.outside(n) => context.get_frame(n, env),
            Mode::Range { .. } => self.base.get_frame(n, env),
            Mode::Animate { cache } => {
                let stage = span(self.first, n.clamp(self.first, self.last));
                self.instance(cache, stage, env)?.get_frame(n, env)
            }
        }
    }

    fn get_audio(&self, buf: &mut [u8], start: i64, count: i64, env: &dyn Environment) -> Result<()> {
        match &self.mode {
            Mode::Range { context } => self.range_audio(context, buf, start, count, env),
            Mode::Animate { .. } => self.base.get_audio(buf, start, count, env),
        }
    }

    // Parity inside the range always comes from the stage-0 instance, even
    // when the animated filter changes parity across the range.
    fn get_parity(&self, n: i32) -> bool {
        if let Mode::Range { context } = &self.mode {
            if self.outside(n) {
                return context.get_parity(n);
            }
        }
        self.base.get_parity(n)
    }

    fn stream(&self) -> &StreamDescriptor {
        &self.desc
    }
}
