//! Integration test crate for clipgraph.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It builds filter graphs through the function table the way a script
//! host would.



#[cfg(test)]
mod animate;

#[cfg(test)]
mod apply_range;
