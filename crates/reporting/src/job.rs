//! Report job descriptor and the context threaded through URL preparation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use vizkit_core::config::ServerConfig;

/// The parts of a queued report job that URL preparation reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingJob {
    /// Absolute URLs to capture (multi-page exports).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    /// Single URL relative to the console root (single-image exports).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_url: Option<String>,
    /// Timestamp the rendered page should treat as "now".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_now: Option<String>,
    /// Space prefix the job was queued under; the server's when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Anything else the job carries, kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ReportingJob {
    /// Pin "now" to `at`, formatted like `2020-01-01T00:00:00.000Z`.
    pub fn set_force_now(&mut self, at: DateTime<Utc>) {
        self.force_now = Some(at.to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    /// The forced timestamp, ignoring an empty string.
    pub fn force_now(&self) -> Option<&str> {
        self.force_now.as_deref().filter(|s| !s.is_empty())
    }
}

/// Where the headers a browser session must send apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConditions {
    pub protocol: String,
    pub hostname: String,
    pub port: u16,
    pub base_path: String,
}

/// Request headers replayed by the capturing browser, only against URLs
/// matching `conditions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionalHeaders {
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub conditions: HeaderConditions,
}

/// Input of URL preparation. Everything but `job` is passed through.
#[derive(Debug, Clone)]
pub struct ExecuteJobContext<'a> {
    pub job: ReportingJob,
    pub conditional_headers: Option<ConditionalHeaders>,
    pub logo: Option<String>,
    pub server: &'a ServerConfig,
}

impl<'a> ExecuteJobContext<'a> {
    pub fn new(job: ReportingJob, server: &'a ServerConfig) -> Self {
        Self {
            job,
            conditional_headers: None,
            logo: None,
            server,
        }
    }

    pub fn with_conditional_headers(mut self, headers: ConditionalHeaders) -> Self {
        self.conditional_headers = Some(headers);
        self
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }
}

/// Output of URL preparation: the context plus the URLs to capture.
#[derive(Debug, Clone)]
pub struct ForceNowOutput<'a> {
    pub job: ReportingJob,
    pub conditional_headers: Option<ConditionalHeaders>,
    pub logo: Option<String>,
    pub urls: Vec<String>,
    pub server: &'a ServerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_camel_case_job() {
        let job: ReportingJob = serde_json::from_str(
            r#"{
                "relativeUrl": "/app/kibana#/dashboard/abc",
                "forceNow": "2020-01-01T00:00:00Z",
                "basePath": "/s/marketing",
                "title": "Weekly"
            }"#,
        )
        .unwrap();
        assert!(job.urls.is_none());
        assert_eq!(job.relative_url.as_deref(), Some("/app/kibana#/dashboard/abc"));
        assert_eq!(job.force_now(), Some("2020-01-01T00:00:00Z"));
        assert_eq!(job.base_path.as_deref(), Some("/s/marketing"));
        assert_eq!(job.extra["title"], "Weekly");
    }

    #[test]
    fn empty_force_now_counts_as_absent() {
        let job = ReportingJob {
            force_now: Some(String::new()),
            ..ReportingJob::default()
        };
        assert_eq!(job.force_now(), None);
    }

    #[test]
    fn set_force_now_formats_with_millis() {
        let mut job = ReportingJob::default();
        job.set_force_now(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(job.force_now(), Some("2020-01-01T00:00:00.000Z"));
    }
}
