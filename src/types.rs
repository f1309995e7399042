use std::str::FromStr;
use serde::Deserialize;

/// Which local staleness policy a task file selects.
///
/// - `Timestamp`: make-style; out of date when any dependency is as new as
///   or newer than the oldest target (default). Needs no state between
///   invocations.
/// - `Signature`: compare each dependency's signature against the one
///   recorded the last time the task was confirmed up to date. The record
///   lives in memory, so a fresh process always sees a task with
///   dependencies as out of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Signature,
    #[default]
    Timestamp,
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "signature" => Ok(Policy::Signature),
            "timestamp" => Ok(Policy::Timestamp),
            other => Err(format!(
                "invalid policy: {other} (expected \"signature\" or \"timestamp\")"
            )),
        }
    }
}

/// When the signature policy records observed dependency signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureCommit {
    /// Record only once the task has been confirmed up to date or its
    /// actions have all succeeded. A staleness check never hides itself.
    #[default]
    OnSuccess,
    /// Record while checking, before the verdict is used. A second check
    /// without any rebuild in between reports the task as up to date.
    OnCheck,
}

impl FromStr for SignatureCommit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on-success" => Ok(SignatureCommit::OnSuccess),
            "on-check" => Ok(SignatureCommit::OnCheck),
            other => Err(format!(
                "invalid signature_commit: {other} (expected \"on-success\" or \"on-check\")"
            )),
        }
    }
}
