//! JSON input loading
//!
//! Labels, features and predicted probabilities are read from JSON files:
//! either a (possibly nested) array of numbers, or a frame object of the
//! form `{"columns": ["a", "b"], "data": [[1, 2], [3, 4]]}`. Unrecognized
//! JSON shapes are carried through as unsupported containers so the
//! validator reports them with its usual errors.

use crate::error::{Result, ValidationError};
use crate::tabular::DataFrame;
use crate::types::{Features, LabelContainer, Nested, PredProbs};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FrameFile<T> {
    columns: Vec<String>,
    data: Vec<Vec<T>>,
}

fn is_frame(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("columns") && obj.contains_key("data"))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn to_nested<T>(value: &Value, scalar: &impl Fn(&Value) -> Option<T>) -> Option<Nested<T>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| to_nested(item, scalar))
            .collect::<Option<Vec<_>>>()
            .map(Nested::List),
        other => scalar(other).map(Nested::Scalar),
    }
}

/// Integral JSON numbers in `i64` range, including floats such as `1.0`
fn as_class_label(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f))
            .map(|f| f as i64)
    })
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ValidationError::file_io_error("read", path, &e))
}

/// Parse a labels container from JSON text
pub fn parse_labels(json: &str) -> Result<LabelContainer> {
    let value: Value = serde_json::from_str(json)?;
    if is_frame(&value) {
        let frame: FrameFile<i64> = serde_json::from_value(value)?;
        return Ok(LabelContainer::Frame(DataFrame::from_rows(
            frame.columns,
            frame.data,
        )?));
    }
    match &value {
        Value::Array(items) => {
            let nested = items
                .iter()
                .map(|item| to_nested(item, &as_class_label))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| {
                    ValidationError::invalid_value("labels must contain only integer class indices.")
                })?;
            Ok(LabelContainer::Sequence(nested))
        },
        Value::Number(_) => as_class_label(&value)
            .map(LabelContainer::Scalar)
            .ok_or_else(|| ValidationError::invalid_value("label scalar must be an integer.")),
        other => Ok(LabelContainer::unsupported(format!(
            "JSON {}",
            json_type_name(other)
        ))),
    }
}

/// Parse a features handle from JSON text
pub fn parse_features(json: &str) -> Result<Features> {
    let value: Value = serde_json::from_str(json)?;
    if is_frame(&value) {
        let frame: FrameFile<f64> = serde_json::from_value(value)?;
        return Ok(Features::Frame(DataFrame::from_rows(frame.columns, frame.data)?));
    }
    let Value::Array(items) = &value else {
        return Err(ValidationError::invalid_type(format!(
            "features must be a JSON array or frame object, got {}.",
            json_type_name(&value)
        )));
    };
    let nested = items
        .iter()
        .map(|item| to_nested(item, &Value::as_f64))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ValidationError::invalid_value("features must contain only numbers."))?;
    Nested::coerce(&nested)
        .map(Features::Array)
        .ok_or_else(|| ValidationError::invalid_value("features must form a rectangular array."))
}

/// Parse a predicted-probability matrix from JSON text
pub fn parse_pred_probs(json: &str) -> Result<PredProbs> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = &value else {
        return Ok(PredProbs::unsupported(format!("JSON {}", json_type_name(&value))));
    };
    let nested = items
        .iter()
        .map(|item| to_nested(item, &Value::as_f64))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ValidationError::invalid_type("pred_probs must contain only numbers."))?;
    Nested::coerce(&nested)
        .map(PredProbs::Dense)
        .ok_or_else(|| ValidationError::invalid_value("pred_probs must form a rectangular array."))
}

/// Load labels from a JSON file
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<LabelContainer> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading labels");
    parse_labels(&read_file(path)?)
}

/// Load features from a JSON file
pub fn load_features<P: AsRef<Path>>(path: P) -> Result<Features> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading features");
    parse_features(&read_file(path)?)
}

/// Load predicted probabilities from a JSON file
pub fn load_pred_probs<P: AsRef<Path>>(path: P) -> Result<PredProbs> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading pred_probs");
    parse_pred_probs(&read_file(path)?)
}
