// SPDX-FileCopyrightText: The pagemend authors
// SPDX-License-Identifier: MPL-2.0

//! Branch names

use once_cell::sync::OnceCell;
use regex::Regex;

const LINE_SEPARATORS_REGEX_STR: &str = r"[\r\n]+";

static LINE_SEPARATORS_REGEX: OnceCell<Regex> = OnceCell::new();

fn line_separators_regex() -> &'static Regex {
    // One or more consecutive CR/LF characters count as a single separator.
    LINE_SEPARATORS_REGEX.get_or_init(|| LINE_SEPARATORS_REGEX_STR.parse().unwrap())
}

const WORD_RUN_REGEX_STR: &str = r"\w+";

static WORD_RUN_REGEX: OnceCell<Regex> = OnceCell::new();

fn word_run_regex() -> &'static Regex {
    WORD_RUN_REGEX.get_or_init(|| WORD_RUN_REGEX_STR.parse().unwrap())
}

/// Check if the given line qualifies as a branch name.
///
/// A line qualifies if it contains at least one word-character run.
#[must_use]
pub fn is_valid(name: &str) -> bool {
    word_run_regex().is_match(name)
}

/// Split a branch-list response body into qualifying branch names.
///
/// Lines are separated by runs of CR/LF characters. Empty and
/// whitespace-only lines are discarded. The order of surviving
/// names matches the response order.
#[must_use]
pub fn parse_list(body: &str) -> Vec<&str> {
    line_separators_regex()
        .split(body)
        .filter(|line| is_valid(line))
        .collect()
}
