//! # strand-std
//!
//! Ready-made steps and strategies for [`strand_core`] traversals.

pub mod nodes;
pub mod prelude;
pub mod strategies;

pub use prelude::*;
