use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strand_core::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Logs every value that passes through.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LogStep {
    pub message: String,
    #[serde(default)]
    pub level: LogLevel,
    #[serde(skip)]
    base: StepBase,
}

impl LogStep {
    pub fn new(message: impl Into<String>, level: LogLevel) -> Self {
        Self {
            message: message.into(),
            level,
            base: StepBase::new(),
        }
    }
}

impl Step for LogStep {
    fn name(&self) -> &'static str {
        "LogStep"
    }

    fn kind(&self) -> StepKind {
        StepKind::SideEffect
    }

    fn base(&self) -> &StepBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StepBase {
        &mut self.base
    }

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        let value = traverser.value();
        let bulk = traverser.bulk();
        match self.level {
            LogLevel::Error => tracing::error!(%value, bulk, "{}", self.message),
            LogLevel::Warn => tracing::warn!(%value, bulk, "{}", self.message),
            LogLevel::Info => tracing::info!(%value, bulk, "{}", self.message),
            LogLevel::Debug => tracing::debug!(%value, bulk, "{}", self.message),
            LogLevel::Trace => tracing::trace!(%value, bulk, "{}", self.message),
        }
        Ok(Outcome::next(traverser))
    }

    fn box_clone(&self) -> Box<dyn Step> {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        strand_core::step::with_labels(
            strand_core::step::step_string(self.name(), [self.message.as_str()]),
            self.labels(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_values_through() {
        let mut t = Traversal::builder()
            .then(LogStep::new("seen", LogLevel::Debug))
            .build()
            .unwrap();
        t.inject([Value::from(1)]).unwrap();
        assert_eq!(t.to_list().unwrap(), vec![Value::from(1)]);
        assert_eq!(t.to_string(), "[LogStep(seen)]");
    }

    #[test]
    fn deserializes_with_default_level() {
        let step: LogStep = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(step.level, LogLevel::Info);
        let step: LogStep = serde_json::from_str(r#"{"message":"hi","level":"warn"}"#).unwrap();
        assert_eq!(step.level, LogLevel::Warn);
    }

    #[test]
    fn level_schema_lists_variants() {
        let schema = schemars::schema_for!(LogLevel);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("\"trace\""));
    }
}
