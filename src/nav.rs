// SPDX-FileCopyrightText: The pagemend authors
// SPDX-License-Identifier: MPL-2.0

//! Navigation entries

use percent_encoding::percent_encode;
use quick_xml::escape::escape;

use crate::{
    config::NavConvention,
    heading::Heading,
    markup::{self, Edit},
};

mod encoding {
    use percent_encoding::{AsciiSet, CONTROLS};

    /// <https://url.spec.whatwg.org/#fragment-percent-encode-set>
    pub(super) const FRAGMENT: &AsciiSet =
        &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');
}

/// Class token of the navigation list container.
pub const NAV_CLASS: &str = "nav";

/// Class token of the table-of-contents region wrapping the container.
pub const TOC_CLASS: &str = "toc";

/// Class token of the sidebar items used as insertion markers.
pub const MARKER_ITEM_CLASS: &str = "sidebar-nav-item";

/// Class token of the currently active sidebar item.
pub const MARKER_ACTIVE_CLASS: &str = "active";

/// One rendered item of the table-of-contents navigation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    /// The level copied from the source heading.
    pub level: u8,

    /// The link text, copied from the heading text.
    pub label: String,

    /// The identifier of the heading this entry jumps to.
    pub target_id: String,
}

impl NavigationEntry {
    /// Derive an entry from an identified heading.
    #[must_use]
    pub fn from_heading(heading: &Heading) -> Self {
        debug_assert!(heading.is_valid());
        Self {
            level: heading.level,
            label: heading.text.clone(),
            target_id: heading.id.clone(),
        }
    }

    /// The CSS class encoding the entry's level, e.g. `level-h2`.
    #[must_use]
    pub fn level_class(&self) -> String {
        format!("level-h{}", self.level)
    }

    /// The in-page anchor reference, e.g. `#usage`.
    ///
    /// The fragment is percent-encoded.
    #[must_use]
    pub fn anchor_href(&self) -> String {
        format!(
            "#{}",
            percent_encode(self.target_id.as_bytes(), encoding::FRAGMENT)
        )
    }

    /// Render the entry as a list item wrapping a link.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            r#"<li class="{}"><a href="{}">{}</a></li>"#,
            self.level_class(),
            escape(self.anchor_href().as_str()),
            escape(self.label.as_str()),
        )
    }
}

/// Render entries as a sequence of list items, in the given order.
#[must_use]
pub fn render_entries(entries: &[NavigationEntry]) -> String {
    itertools::join(entries.iter().map(NavigationEntry::render), "")
}

/// Render entries as a freshly created navigation list.
#[must_use]
pub fn render_list(entries: &[NavigationEntry]) -> String {
    format!(
        r#"<ul class="{NAV_CLASS}">{}</ul>"#,
        render_entries(entries)
    )
}

/// Plan the edit that places the entries into the host page.
///
/// Returns `None` if the page lacks the container/marker the
/// convention expects, or if there are no entries to place.
pub(crate) fn inject_edit(
    source: &str,
    doc: &roxmltree::Document<'_>,
    entries: &[NavigationEntry],
    convention: NavConvention,
) -> Option<Edit> {
    if entries.is_empty() {
        return None;
    }
    match convention {
        NavConvention::TocAppend => {
            let container = doc.descendants().find(|node| {
                node.is_element()
                    && markup::has_class(*node, NAV_CLASS)
                    && node
                        .parent()
                        .is_some_and(|parent| parent.is_element() && markup::has_class(parent, TOC_CLASS))
            })?;
            let inner = markup::inner_range(source, container)?;
            Some(Edit {
                range: inner.end..inner.end,
                replacement: render_entries(entries),
            })
        }
        NavConvention::AfterActiveMarker => {
            let marker = doc.descendants().find(|node| {
                node.is_element()
                    && markup::has_class(*node, MARKER_ITEM_CLASS)
                    && markup::has_class(*node, MARKER_ACTIVE_CLASS)
            })?;
            let after = marker.range().end;
            Some(Edit {
                range: after..after,
                replacement: render_list(entries),
            })
        }
    }
}
