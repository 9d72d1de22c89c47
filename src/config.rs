// SPDX-FileCopyrightText: The pagemend authors
// SPDX-License-Identifier: MPL-2.0

//! Configuration

use url::Url;

use crate::template;

/// Path of the page on which the branch report is expanded.
pub const DEFAULT_ACTIVATION_PATH: &str = "/build-report.html";

/// Endpoint serving the newline-delimited branch list.
pub const DEFAULT_BRANCH_LIST_ENDPOINT: &str = "/build-report/branch-list";

/// Where the navigation container lives in the host page.
///
/// The site's revisions disagree on this, so it is a configuration
/// variant rather than a fixed convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavConvention {
    /// Append entries to the `.toc > .nav` list.
    #[default]
    TocAppend,

    /// Insert a freshly created `ul.nav` immediately after the
    /// `.sidebar-nav-item.active` element.
    AfterActiveMarker,
}

/// Settings of the branch-report expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BranchReportConfig {
    /// The only page path on which the expansion runs.
    pub activation_path: String,

    /// The endpoint the branch list is fetched from, relative to the
    /// site base URL.
    pub endpoint: String,

    /// The placeholder token substituted in the captured template.
    pub placeholder: String,
}

impl Default for BranchReportConfig {
    fn default() -> Self {
        Self {
            activation_path: DEFAULT_ACTIVATION_PATH.to_owned(),
            endpoint: DEFAULT_BRANCH_LIST_ENDPOINT.to_owned(),
            placeholder: template::DEFAULT_PLACEHOLDER.to_owned(),
        }
    }
}

/// Settings of the page-view beacon.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetryConfig {
    /// The collector endpoint page views are reported to.
    pub collector: Url,

    /// The site's tracking identifier at the collector.
    pub tracking_id: String,

    /// The host name reported with each page view.
    pub hostname: String,
}

/// Settings of one enhancement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// The navigation-container convention of the host pages.
    pub navigation: NavConvention,

    /// Add the `table` presentation class to tables in the content
    /// region. Present in only one revision of the site.
    pub decorate_tables: bool,

    /// Branch-report settings.
    pub branch_report: BranchReportConfig,

    /// Page-view reporting; disabled when absent.
    pub telemetry: Option<TelemetryConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            navigation: NavConvention::default(),
            decorate_tables: true,
            branch_report: BranchReportConfig::default(),
            telemetry: None,
        }
    }
}
