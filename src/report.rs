// SPDX-FileCopyrightText: The pagemend authors
// SPDX-License-Identifier: MPL-2.0

//! Branch-report expansion

use std::ops::Range;

use crate::{markup, template::Template};

/// Class token of the main content region.
pub const PAGE_CLASS: &str = "page";

/// What the expansion pass did to the report container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchReportStatus {
    /// Not the report page, or the page has no report container;
    /// nothing was touched and no fetch was issued.
    Skipped,

    /// The branch list was fetched and the container holds the given
    /// number of expanded fragments (possibly zero).
    Populated(usize),

    /// The branch list could not be fetched; the container was
    /// cleared and left empty.
    Unavailable,
}

/// The located report container: its inner span and the template
/// captured from it before any mutation.
#[derive(Debug, Clone)]
pub(crate) struct ReportContainer {
    pub(crate) inner: Range<usize>,
    pub(crate) template: Template,
}

/// Locate the report container and capture its template.
///
/// The container is the first unordered list that is a direct child
/// of the main content region.
pub(crate) fn locate(
    source: &str,
    doc: &roxmltree::Document<'_>,
    placeholder: &str,
) -> Option<ReportContainer> {
    let page = doc
        .descendants()
        .find(|node| node.is_element() && markup::has_class(*node, PAGE_CLASS))?;
    let list = page
        .children()
        .find(|node| node.is_element() && node.tag_name().name() == "ul")?;
    let inner = markup::inner_range(source, list)?;
    let template = Template::capture(&source[inner.clone()], placeholder);
    Some(ReportContainer { inner, template })
}
