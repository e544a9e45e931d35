//! # IronTick Bench
//!
//! Benchmarking utilities for IronTick decoder performance testing.

pub mod frames;
