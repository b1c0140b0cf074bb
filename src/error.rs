//! Error types shared across the journal.
//!
//! None of these ever reach the user as a hard failure: collaborator errors
//! are folded into neutral defaults by [`crate::analysis::Analyst`], config
//! errors fall back to defaults, and capture errors just keep the form open.

use thiserror::Error;

/// Failure talking to the hosted language model.
#[derive(Debug, Error)]
pub enum AnalysisError {
	/// No credential configured; callers take the mock path instead.
	#[error("analysis service is not configured")]
	Unconfigured,
	/// The request never produced a response.
	#[error("request failed: {0}")]
	Transport(#[from] reqwest::Error),
	/// The service answered with a non-success status.
	#[error("service returned HTTP {0}")]
	Status(u16),
	/// The response carried no candidate text.
	#[error("service returned no text")]
	EmptyResponse,
	/// Candidate text was not the JSON shape we asked for.
	#[error("malformed response: {0}")]
	Malformed(#[from] serde_json::Error),
}

/// Failure reading the embedded application config.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid config JSON: {0}")]
	Parse(#[from] serde_json::Error),
}

/// A capture that cannot become an inspiration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
	#[error("nothing to capture: text is blank and no image was attached")]
	Empty,
}
