pub use crate::nodes::debug::{LogLevel, LogStep};
pub use crate::nodes::flow::{IdentityStep, StartStep};
pub use crate::nodes::lambda::{FlatMapStep, MapStep, SideEffectStep};
pub use crate::nodes::logic::FilterStep;
pub use crate::nodes::path::{PathFilterConfig, PathFilterStep, PathStep};
pub use crate::strategies::identity_removal::IdentityRemovalStrategy;
