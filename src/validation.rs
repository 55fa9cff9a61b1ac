//! Input validation for matching runs.
//!
//! Checks the records handed over by collaborators before scoring.
//! Detects:
//! - Steps with a blank name or machine
//! - Steps with a zero duration
//! - Companies with a blank name
//! - Duplicate company IDs
//!
//! A bad record never aborts a run: the matcher drops it, logs a warning,
//! and scores the rest.

use crate::models::{Company, ProcessStep, DEFAULT_STEP_MINUTES};
use serde_json::Value;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required text field is missing or blank.
    MissingField,
    /// A duration is zero, negative, or not a number.
    InvalidDuration,
    /// Two companies share the same ID.
    DuplicateId,
    /// A record is not a JSON object.
    MalformedRecord,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks a single step.
pub fn check_step(step: &ProcessStep) -> Result<(), ValidationError> {
    if step.name.trim().is_empty() {
        return Err(ValidationError::new(
            ValidationErrorKind::MissingField,
            format!("Step for machine '{}' has no name", step.machine),
        ));
    }
    if step.machine.trim().is_empty() {
        return Err(ValidationError::new(
            ValidationErrorKind::MissingField,
            format!("Step '{}' has no machine", step.name),
        ));
    }
    if step.minutes == 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidDuration,
            format!("Step '{}' has a zero duration", step.name),
        ));
    }
    Ok(())
}

/// Checks a single company in isolation.
pub fn check_company(company: &Company) -> Result<(), ValidationError> {
    if company.name.trim().is_empty() {
        return Err(ValidationError::new(
            ValidationErrorKind::MissingField,
            format!("Company {} has no name", company.id),
        ));
    }
    Ok(())
}

/// Validates the input of a matching run.
///
/// Checks:
/// 1. Every step has a name, a machine, and a positive duration
/// 2. Every company has a name
/// 3. No duplicate company IDs
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(steps: &[ProcessStep], companies: &[Company]) -> ValidationResult {
    let mut errors: Vec<ValidationError> =
        steps.iter().filter_map(|s| check_step(s).err()).collect();

    let mut ids = HashSet::new();
    for company in companies {
        if let Err(e) = check_company(company) {
            errors.push(e);
        }
        if !ids.insert(company.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate company ID: {}", company.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Splits steps into the usable ones and the errors of the rejected ones.
pub fn retain_valid_steps(steps: &[ProcessStep]) -> (Vec<ProcessStep>, Vec<ValidationError>) {
    let mut valid = Vec::with_capacity(steps.len());
    let mut errors = Vec::new();
    for step in steps {
        match check_step(step) {
            Ok(()) => valid.push(step.clone()),
            Err(e) => errors.push(e),
        }
    }
    (valid, errors)
}

/// Splits companies into the usable ones and the errors of the rejected ones.
///
/// Of two companies sharing an ID, the first one in catalog order is kept.
pub fn retain_valid_companies(companies: &[Company]) -> (Vec<Company>, Vec<ValidationError>) {
    let mut valid = Vec::with_capacity(companies.len());
    let mut errors = Vec::new();
    let mut ids = HashSet::new();
    for company in companies {
        if let Err(e) = check_company(company) {
            errors.push(e);
            continue;
        }
        if !ids.insert(company.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate company ID: {}", company.id),
            ));
            continue;
        }
        valid.push(company.clone());
    }
    (valid, errors)
}

/// Parses loosely-typed step records (e.g., edited in a UI).
///
/// Per record:
/// - `name` and `machine` are required; numbers are accepted and stringified.
/// - `minutes` may be a number or a numeric string. Missing, `null`, or `0`
///   becomes the default duration; anything else non-positive or non-numeric
///   rejects the record.
/// - `tolerance` / `precision` are optional; blank values are dropped.
///
/// Rejected records are reported, never fatal.
pub fn parse_step_records(records: &[Value]) -> (Vec<ProcessStep>, Vec<ValidationError>) {
    let mut steps = Vec::with_capacity(records.len());
    let mut errors = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        match parse_step_record(record) {
            Ok(step) => steps.push(step),
            Err(mut e) => {
                e.message = format!("record {idx}: {}", e.message);
                errors.push(e);
            }
        }
    }
    (steps, errors)
}

fn parse_step_record(record: &Value) -> Result<ProcessStep, ValidationError> {
    let obj = record.as_object().ok_or_else(|| {
        ValidationError::new(ValidationErrorKind::MalformedRecord, "not an object")
    })?;

    let name = text_field(obj.get("name")).ok_or_else(|| {
        ValidationError::new(ValidationErrorKind::MissingField, "missing 'name'")
    })?;
    let machine = text_field(obj.get("machine")).ok_or_else(|| {
        ValidationError::new(ValidationErrorKind::MissingField, "missing 'machine'")
    })?;
    let minutes = minutes_field(obj.get("minutes"))?;

    let mut step = ProcessStep::new(name, machine).with_minutes(minutes);
    step.tolerance = text_field(obj.get("tolerance"));
    step.precision = text_field(obj.get("precision"));
    Ok(step)
}

fn text_field(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn minutes_field(value: Option<&Value>) -> Result<u32, ValidationError> {
    let invalid = |shown: &dyn std::fmt::Display| {
        ValidationError::new(
            ValidationErrorKind::InvalidDuration,
            format!("invalid minutes '{shown}'"),
        )
    };

    let number = match value {
        None | Some(Value::Null) => return Ok(DEFAULT_STEP_MINUTES),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid(n))?,
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(DEFAULT_STEP_MINUTES),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid(s))?,
        Some(other) => return Err(invalid(other)),
    };

    if number == 0.0 {
        return Ok(DEFAULT_STEP_MINUTES);
    }
    if !number.is_finite() || number < 0.0 || number > u32::MAX as f64 {
        return Err(invalid(&number));
    }
    // Fractional estimates truncate toward zero.
    match number.trunc() as u32 {
        0 => Err(invalid(&number)),
        m => Ok(m),
    }
}
