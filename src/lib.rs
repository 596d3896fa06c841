use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use wasm_bindgen::prelude::*;

use crate::sink::{EvaluationSink, SinkError};

/// User-facing validation messages
pub mod messages {
    pub const REQUIRED: &str = "Valor obrigatório.";
    pub const INVALID_TIME: &str = "Tempo inserido é inválido.";
}

// `\d` in the regex crate matches any Unicode digit, the form only takes ASCII ones
static MIN_SEC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{2}):([0-9]{2})$").unwrap());

/// Exclusive upper bound for both the minutes and the seconds component.
const COMPONENT_LIMIT: u8 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("{}", messages::REQUIRED)]
    Required,
    #[error("{}", messages::INVALID_TIME)]
    InvalidFormat,
    /// Matched the `MM:SS` shape but a component is 60 or more.
    #[error("{}", messages::INVALID_TIME)]
    OutOfRange { minutes: u8, seconds: u8 },
}

/// A minutes/seconds pair that already passed validation.
///
/// Fields are private: the only ways to obtain one are [`validate_time`],
/// [`EvaluationField::validate`] and `str::parse`, so every `MinSec` in the
/// program satisfies `minutes < 60 && seconds < 60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinSec {
    minutes: u8,
    seconds: u8,
}

impl MinSec {
    /// Convert into the `PT<m>M<ss>S` representation.
    pub fn to_iso_duration(&self) -> IsoDuration {
        IsoDuration(format!("PT{}M{:02}S", self.minutes, self.seconds))
    }
}

impl FromStr for MinSec {
    type Err = TimeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let captures = MIN_SEC_REGEX
            .captures(input)
            .ok_or(TimeError::InvalidFormat)?;

        // Two ASCII digits always fit in a u8
        let minutes: u8 = captures[1].parse().map_err(|_| TimeError::InvalidFormat)?;
        let seconds: u8 = captures[2].parse().map_err(|_| TimeError::InvalidFormat)?;

        if minutes >= COMPONENT_LIMIT || seconds >= COMPONENT_LIMIT {
            return Err(TimeError::OutOfRange { minutes, seconds });
        }

        Ok(MinSec { minutes, seconds })
    }
}

impl fmt::Display for MinSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// ISO-8601 style duration string, e.g. `PT5M09S`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IsoDuration(String);

impl IsoDuration {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a raw time value.
///
/// An empty string counts as absent. Absent values are rejected with
/// [`TimeError::Required`] when `required` is set and accepted as `None`
/// otherwise. Present values must be `MM:SS` with both parts below 60.
pub fn validate_time(input: Option<&str>, required: bool) -> Result<Option<MinSec>, TimeError> {
    let input = input.filter(|s| !s.is_empty());

    match input {
        None if required => Err(TimeError::Required),
        None => Ok(None),
        Some(raw) => raw.parse().map(Some),
    }
}

/// Transform a validated time into its duration string. `None` stays `None`.
pub fn min_sec_to_pt(time: Option<MinSec>) -> Option<IsoDuration> {
    time.map(|t| t.to_iso_duration())
}

/// The two fields of the evaluation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationField {
    Prancha,
    ForcaIsometricaMaos,
}

impl EvaluationField {
    pub const ALL: [EvaluationField; 2] = [EvaluationField::Prancha, EvaluationField::ForcaIsometricaMaos];

    /// Field name as used in the serialized record and as the input id.
    pub fn name(&self) -> &'static str {
        match self {
            EvaluationField::Prancha => "prancha",
            EvaluationField::ForcaIsometricaMaos => "forcaIsometricaMaos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EvaluationField::Prancha => "Prancha:",
            EvaluationField::ForcaIsometricaMaos => "Força de Preensão:",
        }
    }

    pub fn required(&self) -> bool {
        true
    }

    /// Run the shared time validation with this field's rules.
    pub fn validate(&self, raw: &str) -> Result<Option<MinSec>, TimeError> {
        let result = validate_time(Some(raw), self.required());
        if let Err(ref e) = result {
            debug!("Field '{}' rejected {:?}: {:?}", self.name(), raw, e);
        }
        result
    }
}

impl fmt::Display for EvaluationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw text of both inputs as held by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeFormValues {
    pub prancha: String,
    pub forca_isometrica_maos: String,
}

impl TimeFormValues {
    pub fn get(&self, field: EvaluationField) -> &str {
        match field {
            EvaluationField::Prancha => &self.prancha,
            EvaluationField::ForcaIsometricaMaos => &self.forca_isometrica_maos,
        }
    }
}

/// Per-field validation errors collected on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub prancha: Option<TimeError>,
    pub forca_isometrica_maos: Option<TimeError>,
}

impl FormErrors {
    pub fn get(&self, field: EvaluationField) -> Option<&TimeError> {
        match field {
            EvaluationField::Prancha => self.prancha.as_ref(),
            EvaluationField::ForcaIsometricaMaos => self.forca_isometrica_maos.as_ref(),
        }
    }

    fn set(&mut self, field: EvaluationField, error: TimeError) {
        match field {
            EvaluationField::Prancha => self.prancha = Some(error),
            EvaluationField::ForcaIsometricaMaos => self.forca_isometrica_maos = Some(error),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prancha.is_none() && self.forca_isometrica_maos.is_none()
    }

    /// Fields with an error, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (EvaluationField, &TimeError)> {
        EvaluationField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|e| (field, e)))
    }

    /// User-facing message per invalid field, keyed by field name.
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.iter().map(|(field, e)| (field.name(), e.to_string())).collect()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(field, e)| format!("{}: {}", field, e)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Both fields after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedTimes {
    pub prancha: Option<MinSec>,
    pub forca_isometrica_maos: Option<MinSec>,
}

/// Validate every field, collecting all errors instead of stopping at the first.
pub fn validate_form(values: &TimeFormValues) -> Result<ValidatedTimes, FormErrors> {
    let mut errors = FormErrors::default();
    let mut validated = ValidatedTimes {
        prancha: None,
        forca_isometrica_maos: None,
    };

    for field in EvaluationField::ALL {
        match field.validate(values.get(field)) {
            Ok(time) => match field {
                EvaluationField::Prancha => validated.prancha = time,
                EvaluationField::ForcaIsometricaMaos => validated.forca_isometrica_maos = time,
            },
            Err(e) => errors.set(field, e),
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(errors)
    }
}

/// The record handed to the output sink on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    pub prancha: Option<IsoDuration>,
    pub forca_isometrica_maos: Option<IsoDuration>,
}

impl From<ValidatedTimes> for EvaluationRecord {
    fn from(times: ValidatedTimes) -> Self {
        EvaluationRecord {
            prancha: min_sec_to_pt(times.prancha),
            forca_isometrica_maos: min_sec_to_pt(times.forca_isometrica_maos),
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form has invalid fields: {0}")]
    Invalid(FormErrors),
    #[error("output sink failed: {0}")]
    Sink(#[from] SinkError),
}

/// Validate and transform the form contents without delivering them.
pub fn evaluate(values: &TimeFormValues) -> Result<EvaluationRecord, FormErrors> {
    validate_form(values).map(EvaluationRecord::from)
}

/// Validate, transform and deliver the form contents.
///
/// The sink is only called once every field is valid; on validation failure
/// the per-field errors come back in [`SubmitError::Invalid`].
pub fn submit_evaluation(
    values: &TimeFormValues,
    sink: &impl EvaluationSink,
) -> Result<EvaluationRecord, SubmitError> {
    let record = evaluate(values).map_err(|errors| {
        debug!("Submission blocked: {}", errors);
        SubmitError::Invalid(errors)
    })?;

    sink.deliver(&record)?;

    info!(
        "Evaluation submitted (prancha={:?}, forcaIsometricaMaos={:?})",
        record.prancha.as_ref().map(IsoDuration::as_str),
        record.forca_isometrica_maos.as_ref().map(IsoDuration::as_str)
    );
    Ok(record)
}

/// Result of [`evaluate`] in the shape handed to JavaScript.
///
/// Tagged by `status` so callers can tell a record from a set of errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EvaluationOutcome {
    Valid { record: EvaluationRecord },
    Invalid { errors: BTreeMap<&'static str, String> },
}

impl From<Result<EvaluationRecord, FormErrors>> for EvaluationOutcome {
    fn from(result: Result<EvaluationRecord, FormErrors>) -> Self {
        match result {
            Ok(record) => EvaluationOutcome::Valid { record },
            Err(errors) => EvaluationOutcome::Invalid {
                errors: errors.messages(),
            },
        }
    }
}

/// JavaScript entry point running the same validation and transform as the page.
#[wasm_bindgen(js_name = evaluateTimes)]
pub fn evaluate_times(prancha: &str, forca_isometrica_maos: &str) -> JsValue {
    let values = TimeFormValues {
        prancha: prancha.to_string(),
        forca_isometrica_maos: forca_isometrica_maos.to_string(),
    };
    let outcome = EvaluationOutcome::from(evaluate(&values));

    serde_wasm_bindgen::to_value(&outcome).unwrap_or_else(|e| {
        warn!("Failed to serialize evaluation result: {}", e);
        JsValue::NULL
    })
}

pub mod mask;
pub mod sink;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_times_within_range() {
        for raw in ["00:00", "05:09", "12:03", "59:59", "00:59", "59:00"] {
            let parsed = validate_time(Some(raw), true).unwrap().unwrap();
            assert_eq!(parsed.to_string(), raw);
        }
    }

    #[test]
    fn rejects_malformed_input_with_invalid_message() {
        for raw in ["5:09", "05:9", "0509", "05-09", "ab:cd", "005:09", " 05:09", "05:09 ", "05:", ":09", "١٢:٣٤"] {
            let err = validate_time(Some(raw), true).unwrap_err();
            assert_eq!(err, TimeError::InvalidFormat, "input {:?}", raw);
            assert_eq!(err.to_string(), "Tempo inserido é inválido.");
        }
    }

    #[test]
    fn rejects_components_of_sixty_or_more() {
        assert_eq!(
            validate_time(Some("60:00"), true),
            Err(TimeError::OutOfRange { minutes: 60, seconds: 0 })
        );
        assert_eq!(
            validate_time(Some("00:60"), true),
            Err(TimeError::OutOfRange { minutes: 0, seconds: 60 })
        );
        let err = validate_time(Some("99:99"), true).unwrap_err();
        assert_eq!(err.to_string(), messages::INVALID_TIME);
    }

    #[test]
    fn missing_value_is_required() {
        assert_eq!(validate_time(None, true), Err(TimeError::Required));
        assert_eq!(validate_time(Some(""), true), Err(TimeError::Required));
        assert_eq!(TimeError::Required.to_string(), "Valor obrigatório.");
    }

    #[test]
    fn missing_value_is_fine_when_optional() {
        assert_eq!(validate_time(None, false), Ok(None));
        assert_eq!(validate_time(Some(""), false), Ok(None));
        assert!(validate_time(Some("1:00"), false).is_err());
    }

    #[test]
    fn transform_pads_seconds_only() {
        let t: MinSec = "05:09".parse().unwrap();
        assert_eq!(min_sec_to_pt(Some(t)).unwrap().as_str(), "PT5M09S");

        let t: MinSec = "00:00".parse().unwrap();
        assert_eq!(min_sec_to_pt(Some(t)).unwrap().as_str(), "PT0M00S");

        let t: MinSec = "12:03".parse().unwrap();
        assert_eq!(t.to_iso_duration().to_string(), "PT12M03S");

        assert_eq!(min_sec_to_pt(None), None);
    }

    #[test]
    fn validate_form_collects_every_field_error() {
        let values = TimeFormValues {
            prancha: String::new(),
            forca_isometrica_maos: "61:00".to_string(),
        };
        let errors = validate_form(&values).unwrap_err();
        assert_eq!(errors.get(EvaluationField::Prancha), Some(&TimeError::Required));
        assert!(matches!(
            errors.get(EvaluationField::ForcaIsometricaMaos),
            Some(TimeError::OutOfRange { minutes: 61, .. })
        ));
        assert_eq!(
            errors.to_string(),
            "prancha: Valor obrigatório.; forcaIsometricaMaos: Tempo inserido é inválido."
        );
    }

    #[test]
    fn record_serializes_with_form_field_names() {
        let values = TimeFormValues {
            prancha: "05:09".to_string(),
            forca_isometrica_maos: "12:03".to_string(),
        };
        let record = EvaluationRecord::from(validate_form(&values).unwrap());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "prancha": "PT5M09S", "forcaIsometricaMaos": "PT12M03S" })
        );
    }

    #[test]
    fn absent_durations_serialize_as_null() {
        let record = EvaluationRecord {
            prancha: None,
            forca_isometrica_maos: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"prancha":null,"forcaIsometricaMaos":null}"#);
    }

    #[test]
    fn outcome_tags_valid_record() {
        let values = TimeFormValues {
            prancha: "05:09".to_string(),
            forca_isometrica_maos: "12:03".to_string(),
        };
        let outcome = EvaluationOutcome::from(evaluate(&values));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({
                "status": "valid",
                "record": { "prancha": "PT5M09S", "forcaIsometricaMaos": "PT12M03S" }
            })
        );
    }

    #[test]
    fn outcome_tags_field_errors() {
        let values = TimeFormValues {
            prancha: "5:09".to_string(),
            forca_isometrica_maos: String::new(),
        };
        let outcome = EvaluationOutcome::from(evaluate(&values));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({
                "status": "invalid",
                "errors": {
                    "prancha": "Tempo inserido é inválido.",
                    "forcaIsometricaMaos": "Valor obrigatório."
                }
            })
        );
    }
}
