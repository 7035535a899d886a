//! Shared utility modules used across the clustering pipeline.

pub mod bitset;
pub mod graph;
pub mod linear;
