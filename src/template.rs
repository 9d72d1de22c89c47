// SPDX-FileCopyrightText: The pagemend authors
// SPDX-License-Identifier: MPL-2.0

//! Template fragments

/// The placeholder token of the original report template.
pub const DEFAULT_PLACEHOLDER: &str = "BRANCH";

/// A markup fragment captured from the host page, expanded once per
/// branch name.
///
/// Substitution is literal: every occurrence of the placeholder token
/// is replaced by the branch name verbatim, exactly as the host page
/// authored the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    markup: String,
    placeholder: String,
}

impl Template {
    /// Capture a template fragment with its placeholder token.
    #[must_use]
    pub fn capture(markup: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            placeholder: placeholder.into(),
        }
    }

    /// The captured markup, verbatim.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Expand the template for a single branch name.
    #[must_use]
    pub fn expand(&self, branch_name: &str) -> String {
        self.markup.replace(&self.placeholder, branch_name)
    }

    /// Expand the template once per name and assemble the fragments
    /// with prepend semantics.
    ///
    /// Each fragment becomes the new first child of the container, so
    /// the assembled output holds the fragments in reverse input order.
    #[must_use]
    pub fn expand_prepending(&self, branch_names: &[&str]) -> String {
        itertools::join(branch_names.iter().rev().map(|name| self.expand(name)), "")
    }
}
