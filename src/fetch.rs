// SPDX-FileCopyrightText: The pagemend authors
// SPDX-License-Identifier: MPL-2.0

//! Branch-list retrieval

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// A failed branch-list retrieval.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body not read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("unexpected response status: {status}")]
    Status {
        /// The response status.
        status: reqwest::StatusCode,
    },

    /// A custom source failed in a source-specific way.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Supplier of the newline-delimited branch-list document.
///
/// Hosts that do not consume the list over plain HTTP implement this
/// trait themselves, e.g. for reading from a build artifact.
#[async_trait]
pub trait BranchListSource: Send + Sync {
    /// Retrieve the branch-list document.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the list cannot be retrieved. The
    /// caller decides whether the failure is worth surfacing.
    async fn fetch_branch_list(&self) -> Result<String, FetchError>;
}

/// Branch-list retrieval via a single HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpBranchListSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpBranchListSource {
    /// Resolve the endpoint against the site base URL.
    ///
    /// # Errors
    ///
    /// Returns a [`url::ParseError`] if the endpoint cannot be joined
    /// to the base URL.
    pub fn new(base: &Url, endpoint: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            client: reqwest::Client::new(),
            url: base.join(endpoint)?,
        })
    }

    /// The resolved endpoint URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl BranchListSource for HttpBranchListSource {
    async fn fetch_branch_list(&self) -> Result<String, FetchError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }
        Ok(response.text().await?)
    }
}
