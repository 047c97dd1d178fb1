//! Data models for breadcrumb navigation
//!
//! This module defines the navigation tree (segments and nodes) and the
//! breadcrumb trails produced from it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `[name]` or `:name`
static PARAMETER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\[([A-Za-z_][A-Za-z0-9_]*)\]|:([A-Za-z_][A-Za-z0-9_]*))$").unwrap());

/// `[...name]`, `[[...name]]` or `*name`
static CATCH_ALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\[\.\.\.([A-Za-z_][A-Za-z0-9_]*)\]|\[\[\.\.\.([A-Za-z_][A-Za-z0-9_]*)\]\]|\*([A-Za-z_][A-Za-z0-9_]*))$")
        .unwrap()
});

/// The part of a URL a navigation node matches
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Exact match on one path segment
    Literal(String),
    /// Any single path segment (record ids, slugs)
    Parameter(String),
    /// Every remaining path segment
    CatchAll(String),
}

impl Segment {
    /// Parse the configuration syntax for a segment.
    ///
    /// Returns `None` for text that cannot be a segment at all (empty, or
    /// containing a separator). Bracketed text that is not a valid
    /// placeholder is also rejected so typos don't silently become literals.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.contains(['/', '?', '#']) {
            return None;
        }

        if let Some(caps) = CATCH_ALL_RE.captures(raw) {
            let name = caps.get(1).or(caps.get(2)).or(caps.get(3))?;
            return Some(Segment::CatchAll(name.as_str().to_string()));
        }

        if let Some(caps) = PARAMETER_RE.captures(raw) {
            let name = caps.get(1).or(caps.get(2))?;
            return Some(Segment::Parameter(name.as_str().to_string()));
        }

        if raw.starts_with(['[', ':', '*']) {
            return None;
        }

        Some(Segment::Literal(raw.to_string()))
    }

    /// Whether this segment matches a variable value
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, Segment::Literal(_))
    }

    /// Literal text or placeholder name
    pub fn name(&self) -> &str {
        match self {
            Segment::Literal(s) | Segment::Parameter(s) | Segment::CatchAll(s) => s,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(s) => write!(f, "{}", s),
            Segment::Parameter(s) => write!(f, "[{}]", s),
            Segment::CatchAll(s) => write!(f, "[...{}]", s),
        }
    }
}

/// A node of the static navigation tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationNode {
    /// Segment this node matches
    pub segment: Segment,

    /// Display title; derived from the matched text when absent
    pub title: Option<String>,

    /// Child nodes, in configuration order
    pub children: Vec<NavigationNode>,
}

impl NavigationNode {
    /// Literal node with a title
    pub fn literal(segment: &str, title: &str) -> Self {
        Self {
            segment: Segment::Literal(segment.to_string()),
            title: Some(title.to_string()),
            children: Vec::new(),
        }
    }

    /// Parameter node; `title` replaces the bound value when given
    pub fn parameter(name: &str, title: Option<&str>) -> Self {
        Self {
            segment: Segment::Parameter(name.to_string()),
            title: title.map(str::to_string),
            children: Vec::new(),
        }
    }

    /// Catch-all node; `title` replaces the bound values when given
    pub fn catch_all(name: &str, title: Option<&str>) -> Self {
        Self {
            segment: Segment::CatchAll(name.to_string()),
            title: title.map(str::to_string),
            children: Vec::new(),
        }
    }

    /// Append a child (builder pattern)
    pub fn with_child(mut self, child: NavigationNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children (builder pattern)
    pub fn with_children(mut self, children: impl IntoIterator<Item = NavigationNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Find the child that should handle `value`.
    ///
    /// A literal match wins over a dynamic sibling.
    pub fn child_for(&self, value: &str) -> Option<&NavigationNode> {
        match_level(&self.children, value)
    }

    /// Title to show for a node bound to `value`
    pub fn display_title(&self, value: &str) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        match self.segment {
            Segment::Literal(ref s) => humanize(s),
            Segment::Parameter(_) | Segment::CatchAll(_) => decode_segment(value),
        }
    }

    /// Count nodes in this subtree
    pub fn total_nodes(&self) -> usize {
        1 + self.children.iter().map(|c| c.total_nodes()).sum::<usize>()
    }

    /// Depth of this subtree (a leaf is 1)
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Count dynamic nodes in this subtree
    pub fn dynamic_nodes(&self) -> usize {
        let own = usize::from(self.segment.is_dynamic());
        own + self.children.iter().map(|c| c.dynamic_nodes()).sum::<usize>()
    }
}

/// Pick the node among `nodes` that handles `value`, literal first.
///
/// Literals match the raw or the percent-decoded path text.
pub(crate) fn match_level<'a>(nodes: &'a [NavigationNode], value: &str) -> Option<&'a NavigationNode> {
    let decoded = decode_segment(value);
    nodes
        .iter()
        .find(|n| matches!(&n.segment, Segment::Literal(s) if s == value || *s == decoded))
        .or_else(|| nodes.iter().find(|n| n.segment.is_dynamic()))
}

/// `documentos-comerciales` -> `Documentos comerciales`
pub fn humanize(segment: &str) -> String {
    let spaced = decode_segment(segment).replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Percent-decode a path segment, falling back to the raw text
pub fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// A single entry of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbEntry {
    /// Text to display
    pub title: String,

    /// Absolute path of the matched prefix
    pub url: String,

    /// True only for the last entry
    pub is_current_page: bool,
}

/// A resolved breadcrumb trail for one path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbTrail {
    /// The path as it was requested
    pub path: String,

    /// Entries from the root to the current page
    pub entries: Vec<BreadcrumbEntry>,
}

impl BreadcrumbTrail {
    /// Whether the trail renders to nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The current page entry
    pub fn current(&self) -> Option<&BreadcrumbEntry> {
        self.entries.last().filter(|e| e.is_current_page)
    }

    /// Entries rendered as links (everything but the current page)
    pub fn links(&self) -> impl Iterator<Item = &BreadcrumbEntry> {
        self.entries.iter().filter(|e| !e.is_current_page)
    }

    /// Titles joined with ` > `
    pub fn display_path(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.title.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

/// Counts over a navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStats {
    /// Top-level nodes
    pub roots: usize,

    /// All nodes
    pub total_nodes: usize,

    /// Parameter and catch-all nodes
    pub dynamic_nodes: usize,

    /// Deepest chain of nodes
    pub max_depth: usize,
}

/// Summary statistics for a batch resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveStats {
    /// Paths resolved
    pub total_paths: usize,

    /// Paths whose every segment matched a node
    pub full_matches: usize,

    /// Paths with unmatched trailing segments
    pub partial_matches: usize,

    /// Paths that produced no breadcrumbs
    pub empty: usize,
}

/// Metadata about a batch resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveMetadata {
    /// Duration in milliseconds
    pub duration_ms: u64,

    /// Paths processed per second
    pub paths_per_second: f64,

    /// ISO timestamp
    pub timestamp: String,

    /// Tool version
    pub tool_version: String,
}

/// Result of resolving a batch of paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveReport {
    /// Landing page the trails were resolved against
    pub landing: String,

    /// One trail per input path, in input order
    pub trails: Vec<BreadcrumbTrail>,

    /// Summary statistics
    pub stats: ResolveStats,

    /// Run metadata
    pub metadata: ResolveMetadata,
}
