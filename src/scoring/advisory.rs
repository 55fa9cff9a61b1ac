//! Advisory service seam.
//!
//! An advisor is an optional external scorer asked for a boost in [0, 1]
//! for one company against the full step list. The scorer blends it in with
//! a small fixed weight. Advisors fail closed: every error is returned to the
//! scorer, which logs it and keeps the pre-nudge score.

use std::fmt::Debug;

use serde_json::Value;

use crate::error::AdvisoryError;

/// An external boost provider.
///
/// Implementations must bound their own latency (e.g., an HTTP timeout) and
/// must not panic on bad responses.
pub trait Advisor: Send + Sync + Debug {
    /// Advisor name, for logs.
    fn name(&self) -> &'static str;

    /// Whether the advisor should be consulted at all.
    fn is_configured(&self) -> bool {
        true
    }

    /// Requests a boost in [0, 1].
    ///
    /// `company` and `steps` are the plain-text descriptions built by
    /// [`Company::describe`](crate::models::Company::describe) and
    /// [`describe_steps`](crate::models::describe_steps).
    fn request_boost(&self, company: &str, steps: &str) -> Result<f64, AdvisoryError>;
}

/// The absent advisor. Never consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAdvisor;

impl Advisor for DisabledAdvisor {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn is_configured(&self) -> bool {
        false
    }

    fn request_boost(&self, _company: &str, _steps: &str) -> Result<f64, AdvisoryError> {
        Err(AdvisoryError::NotConfigured)
    }
}

/// System prompt sent with every boost request.
pub const SYSTEM_PROMPT: &str = "You evaluate how well a manufacturing company fits a list of \
required process steps. Respond with a JSON object of the form {\"boost\": number} where the \
number is between 0.0 and 1.0. Output nothing else.";

/// User prompt for one company.
pub fn build_prompt(company: &str, steps: &str) -> String {
    format!("Process steps: {steps}\nCompany: {company}")
}

/// Extracts the boost from an advisor's text response.
///
/// Accepts a bare JSON object, or the outermost `{ ... }` slice of a chattier
/// response. `boost` may be a number or a numeric string. Finite values are
/// clamped into [0, 1]; anything else is malformed.
pub fn parse_boost(text: &str) -> Result<f64, AdvisoryError> {
    let value: Value = match serde_json::from_str(text.trim()) {
        Ok(v) => v,
        Err(_) => {
            let start = text.find('{');
            let end = text.rfind('}');
            match (start, end) {
                (Some(s), Some(e)) if e > s => serde_json::from_str(&text[s..=e])
                    .map_err(|err| AdvisoryError::Malformed(err.to_string()))?,
                _ => return Err(AdvisoryError::Malformed("no JSON object".into())),
            }
        }
    };

    let boost = match value.get("boost") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| AdvisoryError::Malformed("missing numeric 'boost'".into()))?;

    if !boost.is_finite() {
        return Err(AdvisoryError::Malformed(format!("boost {boost}")));
    }
    Ok(boost.clamp(0.0, 1.0))
}
