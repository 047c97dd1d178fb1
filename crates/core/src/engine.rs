//! Breadcrumb engine module
//!
//! This module resolves URL paths against the navigation tree, one path at
//! a time or as a parallel batch.

use crate::config::{split_path, NavigationConfig, ResolveOptions};
use crate::models::{
    decode_segment, match_level, BreadcrumbEntry, BreadcrumbTrail, ResolveMetadata, ResolveReport,
    ResolveStats, Segment,
};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, trace};

/// Resolver errors
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

/// How far a path got down the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchDepth {
    Full,
    Partial,
    None,
}

/// Resolve `path` into its breadcrumb trail.
///
/// Walks the tree one segment at a time, preferring a literal child over a
/// dynamic one. Unmatched trailing segments cut the trail short. The
/// landing page, and the root node that maps to it, produce no entries.
pub fn build_breadcrumbs(path: &str, config: &NavigationConfig) -> Vec<BreadcrumbEntry> {
    walk(path, config).0
}

fn walk(path: &str, config: &NavigationConfig) -> (Vec<BreadcrumbEntry>, MatchDepth) {
    let segments = split_path(path);
    let landing = config.landing();

    if segments.is_empty() || format!("/{}", segments.join("/")) == landing {
        return (Vec::new(), MatchDepth::None);
    }

    let mut entries = Vec::with_capacity(segments.len());
    let mut level = config.nodes();
    let mut url = String::new();
    let mut matched = 0;

    while matched < segments.len() {
        let value = segments[matched];
        let Some(node) = match_level(level, value) else {
            trace!(segment = value, "no node matches, truncating trail");
            break;
        };

        if let Segment::CatchAll(_) = node.segment {
            let rest = &segments[matched..];
            for part in rest {
                url.push('/');
                url.push_str(part);
            }
            let joined = rest.iter().map(|s| decode_segment(s)).collect::<Vec<_>>().join("/");
            let title = node.title.clone().unwrap_or(joined);
            trace!(segment = %node.segment, url = %url, "catch-all matched");
            entries.push(BreadcrumbEntry {
                title,
                url: url.clone(),
                is_current_page: false,
            });
            matched = segments.len();
            break;
        }

        let top_level = matched == 0;
        url.push('/');
        url.push_str(value);
        matched += 1;
        trace!(segment = %node.segment, url = %url, "segment matched");

        // Only a top-level node can be the implicit root.
        if !(top_level && url == landing) {
            entries.push(BreadcrumbEntry {
                title: node.display_title(value),
                url: url.clone(),
                is_current_page: false,
            });
        }

        level = node.children.as_slice();
    }

    if let Some(last) = entries.last_mut() {
        last.is_current_page = true;
    }

    let depth = if entries.is_empty() {
        MatchDepth::None
    } else if matched == segments.len() {
        MatchDepth::Full
    } else {
        MatchDepth::Partial
    };

    debug!(path, entries = entries.len(), ?depth, "resolved breadcrumbs");
    (entries, depth)
}

/// Resolver bound to a shared navigation configuration
#[derive(Debug, Clone)]
pub struct BreadcrumbResolver {
    config: Arc<NavigationConfig>,
    options: ResolveOptions,
}

impl BreadcrumbResolver {
    /// Create a resolver with default options
    pub fn new(config: NavigationConfig) -> Self {
        Self::with_options(config, ResolveOptions::default())
    }

    /// Create a resolver with the given options
    pub fn with_options(config: NavigationConfig, options: ResolveOptions) -> Self {
        Self {
            config: Arc::new(config),
            options,
        }
    }

    /// The configuration this resolver walks
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Resolve a single path
    pub fn resolve(&self, path: &str) -> BreadcrumbTrail {
        BreadcrumbTrail {
            path: path.to_string(),
            entries: build_breadcrumbs(path, &self.config),
        }
    }

    /// Resolve a batch of paths, keeping input order
    pub fn resolve_all<S>(&self, paths: &[S]) -> Result<ResolveReport, ResolveError>
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();

        let resolve_one = |path: &S| {
            let path = path.as_ref();
            let (entries, depth) = walk(path, &self.config);
            (
                BreadcrumbTrail {
                    path: path.to_string(),
                    entries,
                },
                depth,
            )
        };

        let results: Vec<(BreadcrumbTrail, MatchDepth)> = if self.options.threads == 1 {
            paths.iter().map(resolve_one).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.threads)
                .build()
                .map_err(|e| ResolveError::ThreadPoolError(e.to_string()))?;

            pool.install(|| paths.par_iter().map(resolve_one).collect())
        };

        let stats = calculate_stats(&results);
        let trails: Vec<BreadcrumbTrail> = results.into_iter().map(|(t, _)| t).collect();

        let duration = start.elapsed();
        let count = trails.len();
        let metadata = ResolveMetadata {
            duration_ms: duration.as_millis() as u64,
            paths_per_second: if duration.as_secs_f64() > 0.0 {
                count as f64 / duration.as_secs_f64()
            } else {
                count as f64
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Ok(ResolveReport {
            landing: self.config.landing().to_string(),
            trails,
            stats,
            metadata,
        })
    }
}

fn calculate_stats(results: &[(BreadcrumbTrail, MatchDepth)]) -> ResolveStats {
    let count = |wanted: MatchDepth| results.iter().filter(|(_, d)| *d == wanted).count();

    ResolveStats {
        total_paths: results.len(),
        full_matches: count(MatchDepth::Full),
        partial_matches: count(MatchDepth::Partial),
        empty: count(MatchDepth::None),
    }
}
