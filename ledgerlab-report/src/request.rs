//! Serializable report request configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::DisplayFilter;

/// Parameters for one report run, loadable from TOML.
///
/// `reference` pins the current-period rollup to an explicit instant so
/// the same request always produces the same report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Reference instant for the current-period rollup.
    pub reference: DateTime<Utc>,

    /// Display-side trade selection. Cosmetic; defaults to showing
    /// everything.
    #[serde(default)]
    pub filter: DisplayFilter,
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to parse report request: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize report request: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ReportRequest {
    pub fn from_toml(input: &str) -> Result<Self, RequestError> {
        Ok(toml::from_str(input)?)
    }

    pub fn to_toml(&self) -> Result<String, RequestError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_full_request() {
        let toml = r#"
            reference = "2024-06-15T12:00:00Z"
            filter = "SELLS"
        "#;
        let request = ReportRequest::from_toml(toml).unwrap();
        assert_eq!(
            request.reference,
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
        );
        assert_eq!(request.filter, DisplayFilter::Sells);
    }

    #[test]
    fn filter_defaults_to_all() {
        let toml = r#"reference = "2024-06-15T12:00:00Z""#;
        let request = ReportRequest::from_toml(toml).unwrap();
        assert_eq!(request.filter, DisplayFilter::All);
    }

    #[test]
    fn rejects_missing_reference() {
        let err = ReportRequest::from_toml(r#"filter = "ALL""#);
        assert!(matches!(err, Err(RequestError::Parse(_))));
    }

    #[test]
    fn toml_roundtrip() {
        let request = ReportRequest {
            reference: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
            filter: DisplayFilter::Buys,
        };
        let toml = request.to_toml().unwrap();
        let restored = ReportRequest::from_toml(&toml).unwrap();
        assert_eq!(request, restored);
    }
}
