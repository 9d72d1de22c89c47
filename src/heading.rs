// SPDX-FileCopyrightText: The pagemend authors
// SPDX-License-Identifier: MPL-2.0

//! Headings

use crate::{EnhanceError, markup};

/// Lowest heading level that qualifies for the navigation index.
pub const MIN_LEVEL: u8 = 2;

/// Deepest heading level that qualifies for the navigation index.
pub const MAX_LEVEL: u8 = 6;

/// Check if the given level qualifies for the navigation index.
#[must_use]
pub const fn is_valid_level(level: u8) -> bool {
    matches!(level, MIN_LEVEL..=MAX_LEVEL)
}

/// Derive a qualifying heading level from a tag name.
///
/// Returns `None` for `h1`, for levels deeper than [`MAX_LEVEL`],
/// and for non-heading tags.
#[must_use]
pub fn try_level_from_tag_name(tag_name: &str) -> Option<u8> {
    let level = tag_name.strip_prefix('h')?.parse().ok()?;
    is_valid_level(level).then_some(level)
}

/// Check if the given identifier qualifies as a jump target.
///
/// Only headings with a non-empty identifier are indexed.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
}

/// One identified heading of the host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// The level derived from the tag name (`h2`..`h6`).
    pub level: u8,

    /// The jump target identifier, unique within the page.
    pub id: String,

    /// The trimmed text content.
    pub text: String,
}

impl Heading {
    /// Check if the heading qualifies for the navigation index.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_level(self.level) && is_valid_id(&self.id)
    }
}

/// Scan a document for identified headings, in document order.
///
/// Elements that are not `h2`..`h6` or lack a non-empty `id`
/// attribute are skipped silently.
///
/// # Errors
///
/// Returns an [`EnhanceError`] if the document is not well-formed markup.
pub fn scan(document: &str) -> Result<Vec<Heading>, EnhanceError> {
    let doc = markup::parse(document)?;
    Ok(scan_tree(&doc))
}

pub(crate) fn scan_tree(doc: &roxmltree::Document<'_>) -> Vec<Heading> {
    doc.descendants()
        .filter(|node| node.is_element())
        .filter_map(|node| {
            let level = try_level_from_tag_name(node.tag_name().name())?;
            let id = node.attribute("id").filter(|id| is_valid_id(id))?;
            Some(Heading {
                level,
                id: id.to_owned(),
                text: markup::text_content(node).trim().to_owned(),
            })
        })
        .collect()
}
