//! Command implementations

pub mod anneal;
pub mod chunk;
pub mod condense;
pub mod lessons;
pub mod reduce;
