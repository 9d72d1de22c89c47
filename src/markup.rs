// SPDX-FileCopyrightText: The pagemend authors
// SPDX-License-Identifier: MPL-2.0

//! Markup scanning and splicing

use std::ops::Range;

use quick_xml::escape::escape;
use roxmltree::{Document, Node, ParsingOptions};

/// Parse a host page into a read-only document tree.
pub(crate) fn parse(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    Document::parse_with_options(text, options)
}

/// Check if an element carries the given class token.
pub(crate) fn has_class(node: Node<'_, '_>, token: &str) -> bool {
    node.attribute("class")
        .is_some_and(|classes| classes.split_ascii_whitespace().any(|class| class == token))
}

/// Concatenated text of the node and all of its descendants.
pub(crate) fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|descendant| descendant.is_text())
        .filter_map(|descendant| descendant.text())
        .collect()
}

/// A single splice into the source document.
///
/// A zero-length range is an insertion at that position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
    pub(crate) range: Range<usize>,
    pub(crate) replacement: String,
}

/// Apply non-overlapping edits to the source document in one pass.
pub(crate) fn splice(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|edit| edit.range.start);
    debug_assert!(
        edits
            .windows(2)
            .all(|pair| pair[0].range.end <= pair[1].range.start)
    );
    let mut spliced = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in &edits {
        spliced.push_str(&source[cursor..edit.range.start]);
        spliced.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    spliced.push_str(&source[cursor..]);
    spliced
}

/// Position just after the `>` that closes the element's start tag.
pub(crate) fn start_tag_end(source: &str, node: Node<'_, '_>) -> Option<usize> {
    debug_assert!(node.is_element());
    let range = node.range();
    let bytes = source.as_bytes();
    let mut quote: Option<u8> = None;
    for position in range.start..range.end {
        match bytes[position] {
            byte @ (b'"' | b'\'') => match quote {
                Some(opening) if opening == byte => quote = None,
                None => quote = Some(byte),
                Some(_) => {}
            },
            b'>' if quote.is_none() => return Some(position + 1),
            _ => {}
        }
    }
    None
}

/// The byte range strictly between an element's start and end tags.
///
/// Returns `None` for self-closed elements, which have no inner span.
pub(crate) fn inner_range(source: &str, node: Node<'_, '_>) -> Option<Range<usize>> {
    debug_assert!(node.is_element());
    if let (Some(first), Some(last)) = (node.first_child(), node.last_child()) {
        return Some(first.range().start..last.range().end);
    }
    let range = node.range();
    let after_start = start_tag_end(source, node)?;
    if after_start >= range.end {
        // `<tag/>` only closes once.
        return None;
    }
    let end_tag = source[after_start..range.end].rfind("</")?;
    Some(after_start..after_start + end_tag)
}

/// Rebuild the element's start tag with the class token appended.
///
/// Returns `None` if the element already carries the token.
pub(crate) fn add_class_edit(source: &str, node: Node<'_, '_>, token: &str) -> Option<Edit> {
    debug_assert!(node.is_element());
    if has_class(node, token) {
        return None;
    }
    let after_start = start_tag_end(source, node)?;
    let self_closed = source[..after_start].ends_with("/>");
    let mut tag = String::new();
    tag.push('<');
    tag.push_str(node.tag_name().name());
    let mut wrote_class = false;
    for attribute in node.attributes() {
        tag.push(' ');
        tag.push_str(attribute.name());
        tag.push_str("=\"");
        tag.push_str(&escape(attribute.value()));
        if attribute.name() == "class" {
            if !attribute.value().is_empty() {
                tag.push(' ');
            }
            tag.push_str(token);
            wrote_class = true;
        }
        tag.push('"');
    }
    if !wrote_class {
        tag.push_str(" class=\"");
        tag.push_str(token);
        tag.push('"');
    }
    tag.push_str(if self_closed { "/>" } else { ">" });
    Some(Edit {
        range: node.range().start..after_start,
        replacement: tag,
    })
}
