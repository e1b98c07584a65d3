use crate::app::{InstallAck, JobStatus, PathInfo, Summary};
use crate::error::ApiError;

pub fn parse_summary(json: &str) -> Result<Summary, ApiError> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_job(json: &str) -> Result<JobStatus, ApiError> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_install_ack(json: &str) -> Result<InstallAck, ApiError> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_paths(json: &str) -> Result<PathInfo, ApiError> {
    Ok(serde_json::from_str(json)?)
}

/// Extract the `{error}` message from a non-2xx body, falling back to the
/// given transport-level description when the body is not structured.
pub fn error_message(body: &str, fallback: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.error.is_empty() => parsed.error,
        _ => fallback.to_string(),
    }
}

/// Re-serialize an arbitrary report payload with indentation for display.
pub fn pretty_report(json: &str) -> Result<String, ApiError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
