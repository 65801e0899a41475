//! Argument validation and per-stage interpolation for Animate.

use clipgraph_core::{ArgValue, GraphError, Result};

/// Check that `before` and `after` can be interpolated position by position.
///
/// Strings and bools must be identical, numbers may differ (they are what
/// gets interpolated), clips are taken as given. Anything else, arrays
/// included, is rejected.
pub fn check_arg_pairs(name: &str, before: &[ArgValue], after: &[ArgValue]) -> Result<()> {
    if before.len() != after.len() {
        return Err(GraphError::filter(
            name,
            "must have two argument lists of the same length",
        ));
    }
    for (a, b) in before.iter().zip(after) {
        match (a, b) {
            (ArgValue::String(x), ArgValue::String(y)) => {
                if x != y {
                    return Err(GraphError::filter(
                        name,
                        "string arguments must match before and after",
                    ));
                }
            }
            (ArgValue::Bool(x), ArgValue::Bool(y)) => {
                if x != y {
                    return Err(GraphError::filter(
                        name,
                        "boolean arguments must match before and after",
                    ));
                }
            }
            (ArgValue::Int(_) | ArgValue::Float(_), ArgValue::Int(_) | ArgValue::Float(_)) => {}
            (ArgValue::Clip(_), ArgValue::Clip(_)) => {}
            _ => {
                return Err(GraphError::filter(
                    name,
                    "must have two argument lists with matching types",
                ));
            }
        }
    }
    Ok(())
}

/// Value of one argument at `stage` out of `scale`.
///
/// `scale` spans a whole `i32` frame range, so it can exceed `i32::MAX`.
/// Two ints interpolate in 128-bit integer arithmetic with truncation; any
/// other numeric pair interpolates in double precision and narrows to a
/// float. Non-numeric arguments keep their "before" value.
pub fn interpolate(before: &ArgValue, after: &ArgValue, stage: i64, scale: i64) -> ArgValue {
    debug_assert!(scale > 0 && (0..=scale).contains(&stage));
    match (before, after) {
        (&ArgValue::Int(a), &ArgValue::Int(b)) => {
            let (scale, stage) = (scale as i128, stage as i128);
            ArgValue::Int(((a as i128 * (scale - stage) + b as i128 * stage) / scale) as i32)
        }
        _ => match (before.as_float(), after.as_float()) {
            (Some(a), Some(b)) => {
                let (scale, stage) = (scale as f64, stage as f64);
                ArgValue::Float(((a as f64 * (scale - stage) + b as f64 * stage) / scale) as f32)
            }
            _ => before.clone(),
        },
    }
}

/// The whole argument list at `stage`.
pub fn interpolate_args(
    before: &[ArgValue],
    after: &[ArgValue],
    stage: i64,
    scale: i64,
) -> Vec<ArgValue> {
    before
        .iter()
        .zip(after)
        .map(|(a, b)| interpolate(a, b, stage, scale))
        .collect()
}
