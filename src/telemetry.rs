// SPDX-FileCopyrightText: The pagemend authors
// SPDX-License-Identifier: MPL-2.0

//! Page-view reporting

use url::Url;

use crate::{config::TelemetryConfig, fetch::FetchError};

/// Reports page-view events to an external analytics collector.
///
/// The beacon is an opaque external collaborator: it fires at most
/// once per enhancement pass and nothing in the pass depends on its
/// outcome.
#[derive(Debug, Clone)]
pub struct Beacon {
    client: reqwest::Client,
    collector: Url,
    tracking_id: String,
    hostname: String,
}

impl Beacon {
    /// Create a beacon from the telemetry configuration.
    #[must_use]
    pub fn new(config: &TelemetryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            collector: config.collector.clone(),
            tracking_id: config.tracking_id.clone(),
            hostname: config.hostname.clone(),
        }
    }

    /// Report one page view for the given page path.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the collector is unreachable or
    /// answers with a non-success status. Callers are expected to log
    /// and discard the failure.
    pub async fn page_view(&self, path: &str) -> Result<(), FetchError> {
        let response = self
            .client
            .get(self.collector.clone())
            .query(&[
                ("v", "1"),
                ("t", "pageview"),
                ("tid", self.tracking_id.as_str()),
                ("dh", self.hostname.as_str()),
                ("dp", path),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }
        Ok(())
    }
}
