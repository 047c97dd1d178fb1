//! navcrumbs_core - Core library for admin dashboard breadcrumbs
//!
//! This crate resolves URL paths of the admin dashboard (members, companies,
//! opportunities, tasks, commercial documents) into breadcrumb trails,
//! using a static navigation tree loaded once at startup.
//!
//! # Features
//!
//! - **Tree Resolution**: Literal segments, `[id]` parameters and
//!   `[...slug]` catch-alls, literal first.
//! - **Graceful Degradation**: Unknown trailing segments shorten the trail,
//!   nothing ever fails at resolution time.
//! - **Validated Configuration**: TOML, YAML or JSON trees checked at load
//!   time, plus a built-in dashboard tree.
//! - **Multiple Output Formats**: JSON, YAML, ANSI, plain text and HTML.
//!
//! # Example
//!
//! ```rust
//! use navcrumbs_core::{build_breadcrumbs, NavigationConfig};
//!
//! let config = NavigationConfig::builtin().unwrap();
//! let entries = build_breadcrumbs("/admin/procesos/tareas", &config);
//!
//! assert_eq!(entries.len(), 2);
//! assert!(entries[1].is_current_page);
//! ```

pub mod config;
pub mod engine;
pub mod models;
pub mod output;

// Re-exports for convenience
pub use config::{split_path, ConfigError, ConfigSpec, NavigationConfig, NodeSpec, ResolveOptions};
pub use engine::{build_breadcrumbs, BreadcrumbResolver, ResolveError};
pub use models::{
    BreadcrumbEntry, BreadcrumbTrail, NavigationNode, NavigationStats, ResolveMetadata,
    ResolveReport, ResolveStats, Segment,
};
pub use output::{format_report, format_trail, format_tree, FormatError, OutputFormat};
