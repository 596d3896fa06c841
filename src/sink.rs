//! Output sinks receiving the evaluation record on submit.
//!
//! No backend consumes the record yet; the page writes it to the browser
//! console. Tests plug in their own sink to observe deliveries.

use crate::EvaluationRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("could not convert record for output: {0}")]
    Serialization(String),
}

/// Destination for a submitted evaluation.
pub trait EvaluationSink {
    fn deliver(&self, record: &EvaluationRecord) -> Result<(), SinkError>;
}

/// Writes the record to the browser console as a plain JS object.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl EvaluationSink for ConsoleSink {
    fn deliver(&self, record: &EvaluationRecord) -> Result<(), SinkError> {
        let value = serde_wasm_bindgen::to_value(record)
            .map_err(|e| SinkError::Serialization(e.to_string()))?;
        web_sys::console::log_1(&value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{submit_evaluation, SubmitError, TimeFormValues};

    struct FailingSink;

    impl EvaluationSink for FailingSink {
        fn deliver(&self, _record: &EvaluationRecord) -> Result<(), SinkError> {
            Err(SinkError::Serialization("boom".to_string()))
        }
    }

    #[test]
    fn sink_failure_surfaces_after_validation() {
        let values = TimeFormValues {
            prancha: "01:02".to_string(),
            forca_isometrica_maos: "00:30".to_string(),
        };
        match submit_evaluation(&values, &FailingSink) {
            Err(SubmitError::Sink(e)) => {
                assert_eq!(e.to_string(), "could not convert record for output: boom")
            }
            other => panic!("expected sink error, got {:?}", other),
        }
    }
}
