//! # Strand
//!
//! Lazy, pull-based traversal execution over graph-shaped data.
//!
//! ```
//! use strand::prelude::*;
//!
//! let mut traversal = Traversal::builder()
//!     .then(StartStep::new())
//!     .label("a")
//!     .then(FlatMapStep::new(|t| vec![t.value().clone(), Value::from("b")]))
//!     .then(PathFilterStep::simple())
//!     .build()?;
//! traversal.inject([Value::from("a"), Value::from("b")])?;
//! assert_eq!(traversal.to_list()?, vec![Value::from("b")]);
//! # Ok::<(), strand::TraversalError>(())
//! ```

// Re-export core modules
pub use strand_core::config;
pub use strand_core::error;
pub use strand_core::generator;
pub use strand_core::label;
pub use strand_core::metadata;
pub use strand_core::outcome;
pub use strand_core::path;
pub use strand_core::requirement;
pub use strand_core::ring;
pub use strand_core::schematic;
pub use strand_core::step;
pub use strand_core::strategy;
pub use strand_core::telemetry;
pub use strand_core::traversal;
pub use strand_core::traverser;
pub use strand_core::value;

pub use strand_core::{
    EngineConfig, Outcome, Path, Requirement, Requirements, Step, Strategy, Traversal,
    TraversalError, TraversalResult, Traverser, Value, load_config,
};

/// Standard steps and strategies.
pub use strand_std as steps;

#[cfg(feature = "observe")]
pub use strand_observe as observe;

pub mod prelude {
    pub use strand_core::prelude::*;
    pub use strand_core::{EngineConfig, PathTracking, Traced, TraversalRing};
    pub use strand_std::prelude::*;
}

/// Build a traversal from `config` and log its shape.
pub fn configured(config: EngineConfig) -> traversal::TraversalBuilder {
    tracing::debug!(?config, "building traversal");
    traversal::TraversalBuilder::with_config(config)
}
