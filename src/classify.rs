use crate::error::Result;
use regex::Regex;

/// Strict pull-request merge pattern: the phrase must be followed by a
/// `#<number>` reference, so "merge pull requests manually" does not count.
/// Case-insensitive to cover squash tooling that lowercases messages.
const PR_MERGE_PATTERN: &str = r"(?i)merge pull request #\d+";

pub struct PrMatcher {
    pattern: Regex,
}

impl PrMatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(PR_MERGE_PATTERN)?,
        })
    }

    pub fn is_pr(&self, message: &str) -> bool {
        self.pattern.is_match(message)
    }
}
