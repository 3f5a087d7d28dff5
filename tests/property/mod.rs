//! Property-based tests for resolution, pruning and aggregation

mod pruning;
mod resolution;
