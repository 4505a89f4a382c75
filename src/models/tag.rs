use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::config::DEFAULT_MAX_TAGS;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Trims and lowercases a raw tag. Returns `None` when nothing is left or
/// the tag still contains whitespace.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || whitespace_re().is_match(trimmed) {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Tag entry for the ask form: at most `max_tags` unique, normalized tags in
/// the order they were entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInput {
    tags: Vec<String>,
    #[serde(skip)]
    max_tags: usize,
}

impl Default for TagInput {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TAGS)
    }
}

impl TagInput {
    /// `max_tags` is capped at [`DEFAULT_MAX_TAGS`].
    pub fn new(max_tags: usize) -> Self {
        Self {
            tags: Vec::new(),
            max_tags: max_tags.min(DEFAULT_MAX_TAGS),
        }
    }

    /// Builds an input from already-split tags, applying the same rules as `add`.
    pub fn from_tags<I, S>(max_tags: usize, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut input = Self::new(max_tags);
        for tag in tags {
            input.add(tag.as_ref());
        }
        input
    }

    /// Adds one tag. Returns false when it is empty, contains whitespace, is
    /// already present, or the cap has been reached.
    pub fn add(&mut self, raw: &str) -> bool {
        let Some(tag) = normalize_tag(raw) else {
            return false;
        };
        if self.is_full() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Adds every comma-separated entry of `raw`, returning how many were kept.
    pub fn add_many(&mut self, raw: &str) -> usize {
        raw.split(',').filter(|part| self.add(part)).count()
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<String> {
        self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tags.len() >= self.max_tags
    }
}
