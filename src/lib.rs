// SPDX-FileCopyrightText: The pagemend authors
// SPDX-License-Identifier: MPL-2.0

//! Post-processing enhancements for statically generated documentation pages.
//!
//! One [`Enhancer::enhance`] pass per page: it indexes the page's identified
//! headings into a navigation list, expands the branch report on the report
//! page, decorates content tables, and optionally reports a page view.
//!
//! Refer to [`docs`] for the host page contract.

pub mod docs;

pub mod branches;
pub mod config;
pub mod fetch;
pub mod heading;
pub mod nav;
pub mod report;
pub mod telemetry;
pub mod template;

mod markup;

#[cfg(test)]
mod tests;

use std::fmt;

use thiserror::Error;
use url::Url;

pub use self::{
    config::{BranchReportConfig, Config, NavConvention, TelemetryConfig},
    fetch::{BranchListSource, FetchError, HttpBranchListSource},
    heading::Heading,
    nav::NavigationEntry,
    report::BranchReportStatus,
    telemetry::Beacon,
    template::Template,
};

use self::markup::Edit;

/// A failed enhancement pass.
///
/// Selection misses, missing containers, and branch-list failures are
/// not errors; they are reported through [`Enhanced`] instead.
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// The document is not well-formed markup.
    #[error("malformed document markup: {0}")]
    Markup(#[from] roxmltree::Error),
}

/// The outcome of one enhancement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhanced {
    /// The enhanced document text.
    pub html: String,

    /// Number of navigation entries placed into the page.
    pub navigation_entries: usize,

    /// What happened to the branch-report container.
    pub branch_report: BranchReportStatus,
}

/// The one-shot page-enhancement pass, bound to its configuration.
///
/// Construct once per site, then invoke [`Enhancer::enhance`] once per
/// page. Re-running a pass over its own output is not guarded against
/// and would duplicate navigation entries.
pub struct Enhancer {
    config: Config,
    source: Box<dyn BranchListSource>,
    beacon: Option<Beacon>,
}

impl fmt::Debug for Enhancer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enhancer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Enhancer {
    /// Bind a configuration and a branch-list source.
    ///
    /// The page-view beacon is created iff telemetry is configured.
    #[must_use]
    pub fn new(config: Config, source: Box<dyn BranchListSource>) -> Self {
        let beacon = config.telemetry.as_ref().map(Beacon::new);
        Self {
            config,
            source,
            beacon,
        }
    }

    /// Bind a configuration with the branch list fetched over HTTP
    /// from the given site base URL.
    ///
    /// # Errors
    ///
    /// Returns a [`url::ParseError`] if the configured endpoint cannot
    /// be resolved against the base URL.
    pub fn over_http(config: Config, base: &Url) -> Result<Self, url::ParseError> {
        let source = HttpBranchListSource::new(base, &config.branch_report.endpoint)?;
        Ok(Self::new(config, Box::new(source)))
    }

    /// The bound configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Run one enhancement pass over a rendered page.
    ///
    /// `path` is the path under which the page is served; it gates the
    /// branch-report expansion and is reported with the page view.
    ///
    /// # Errors
    ///
    /// Returns an [`EnhanceError`] if the document is not well-formed
    /// markup. A failed branch-list fetch is not an error; it is
    /// reported as [`BranchReportStatus::Unavailable`].
    pub async fn enhance(&self, document: &str, path: &str) -> Result<Enhanced, EnhanceError> {
        if let Some(beacon) = &self.beacon {
            // Unconditional, at most once per pass.
            if let Err(err) = beacon.page_view(path).await {
                log::warn!("page-view beacon failed: {err}");
            }
        }

        let doc = markup::parse(document)?;
        let mut edits = Vec::new();

        if self.config.decorate_tables {
            edits.extend(decorate_tables(document, &doc));
        }

        let headings = heading::scan_tree(&doc);
        let entries: Vec<_> = headings.iter().map(NavigationEntry::from_heading).collect();
        let navigation_entries = if entries.is_empty() {
            0
        } else {
            match nav::inject_edit(document, &doc, &entries, self.config.navigation) {
                Some(edit) => {
                    edits.push(edit);
                    entries.len()
                }
                None => {
                    log::debug!("no navigation container, skipping {} entries", entries.len());
                    0
                }
            }
        };

        let branch_report = if path == self.config.branch_report.activation_path {
            self.expand_branch_report(document, &doc, &mut edits).await
        } else {
            BranchReportStatus::Skipped
        };

        Ok(Enhanced {
            html: markup::splice(document, edits),
            navigation_entries,
            branch_report,
        })
    }

    /// Capture the report template, clear the container, and populate
    /// it from the fetched branch list.
    ///
    /// The clearing edit is committed before the fetch result is
    /// known: an unreachable endpoint leaves the container empty.
    async fn expand_branch_report(
        &self,
        document: &str,
        doc: &roxmltree::Document<'_>,
        edits: &mut Vec<Edit>,
    ) -> BranchReportStatus {
        let placeholder = &self.config.branch_report.placeholder;
        let Some(container) = report::locate(document, doc, placeholder) else {
            log::debug!("no branch-report container on the report page");
            return BranchReportStatus::Skipped;
        };
        match self.source.fetch_branch_list().await {
            Ok(body) => {
                let names = branches::parse_list(&body);
                edits.push(Edit {
                    range: container.inner,
                    replacement: container.template.expand_prepending(&names),
                });
                BranchReportStatus::Populated(names.len())
            }
            Err(err) => {
                log::warn!("branch list unavailable: {err}");
                edits.push(Edit {
                    range: container.inner,
                    replacement: String::new(),
                });
                BranchReportStatus::Unavailable
            }
        }
    }
}

const TABLE_CLASS: &str = "table";

/// Plan the presentation-class edits for tables in the content region.
fn decorate_tables(source: &str, doc: &roxmltree::Document<'_>) -> Vec<Edit> {
    doc.descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "table")
        .filter(|node| {
            node.ancestors().any(|ancestor| {
                ancestor.is_element() && markup::has_class(ancestor, report::PAGE_CLASS)
            })
        })
        .filter_map(|node| markup::add_class_edit(source, node, TABLE_CLASS))
        .collect()
}
