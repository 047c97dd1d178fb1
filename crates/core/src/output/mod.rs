//! Output formatting module
//!
//! This module provides formatters for JSON, YAML, ANSI, plain text and HTML
//! output of breadcrumb trails, batch reports and the navigation tree.

pub mod ansi;
pub mod html;
mod json;
mod yaml;

pub use ansi::{format_report_ansi, format_trail_ansi, format_tree_ansi};
pub use html::{format_report_html, format_trail_html, format_tree_html};
pub use json::format_json;
pub use yaml::format_yaml;

use crate::config::NavigationConfig;
use crate::models::{BreadcrumbTrail, NavigationNode, ResolveReport};
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format
    #[default]
    Json,
    /// YAML format
    Yaml,
    /// ANSI colored text
    Ansi,
    /// Plain text summary
    Summary,
    /// HTML breadcrumb markup
    Html,
}

/// Format a single trail in the specified format
pub fn format_trail(trail: &BreadcrumbTrail, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(&trail.entries),
        OutputFormat::Yaml => format_yaml(&trail.entries),
        OutputFormat::Ansi => Ok(format_trail_ansi(trail)),
        OutputFormat::Summary => Ok(trail.display_path()),
        OutputFormat::Html => Ok(format_trail_html(trail)),
    }
}

/// Format a batch report in the specified format
pub fn format_report(report: &ResolveReport, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(report),
        OutputFormat::Yaml => format_yaml(report),
        OutputFormat::Ansi => Ok(format_report_ansi(report)),
        OutputFormat::Summary => Ok(format_report_summary(report)),
        OutputFormat::Html => Ok(format_report_html(report)),
    }
}

/// Format the navigation tree in the specified format
pub fn format_tree(config: &NavigationConfig, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(&config.to_spec()),
        OutputFormat::Yaml => format_yaml(&config.to_spec()),
        OutputFormat::Ansi => Ok(format_tree_ansi(config)),
        OutputFormat::Summary => Ok(format_tree_summary(config)),
        OutputFormat::Html => Ok(format_tree_html(config)),
    }
}

/// Format a batch report as plain text
fn format_report_summary(report: &ResolveReport) -> String {
    let mut output = String::new();

    output.push_str("Breadcrumb Resolution Results\n");
    output.push_str("=============================\n\n");
    output.push_str(&format!("Landing: {}\n", report.landing));
    output.push_str(&format!("Total Paths: {}\n", report.stats.total_paths));
    output.push_str(&format!("Full Matches: {}\n", report.stats.full_matches));
    output.push_str(&format!("Partial Matches: {}\n", report.stats.partial_matches));
    output.push_str(&format!("Empty: {}\n\n", report.stats.empty));

    for trail in &report.trails {
        let crumbs = if trail.is_empty() {
            "(none)".to_string()
        } else {
            trail.display_path()
        };
        output.push_str(&format!("{}\n  {}\n", trail.path, crumbs));
    }

    output.push_str(&format!("\nDuration: {}ms\n", report.metadata.duration_ms));

    output
}

/// Format the navigation tree as an indented outline
fn format_tree_summary(config: &NavigationConfig) -> String {
    let stats = config.stats();
    let mut output = String::new();

    output.push_str(&format!("Landing: {}\n", config.landing()));
    output.push_str(&format!(
        "Nodes: {} ({} dynamic), depth {}\n\n",
        stats.total_nodes, stats.dynamic_nodes, stats.max_depth
    ));

    for node in config.nodes() {
        format_node_summary(node, "", 0, &mut output);
    }

    output
}

fn format_node_summary(node: &NavigationNode, parent: &str, indent: usize, output: &mut String) {
    let url = format!("{}/{}", parent, node.segment);
    let title = node.title.as_deref().unwrap_or("-");

    output.push_str(&format!("{}{}  {}\n", "  ".repeat(indent), title, url));

    for child in &node.children {
        format_node_summary(child, &url, indent + 1, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BreadcrumbResolver;

    fn resolver() -> BreadcrumbResolver {
        BreadcrumbResolver::new(NavigationConfig::builtin().unwrap())
    }

    #[test]
    fn test_trail_json_is_entry_list() {
        let trail = resolver().resolve("/admin/procesos/tareas");
        let json = format_trail(&trail, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["isCurrentPage"], true);
        assert_eq!(entries[1]["url"], "/admin/procesos/tareas");
    }

    #[test]
    fn test_trail_summary() {
        let trail = resolver().resolve("/admin/procesos/tareas");
        assert_eq!(format_trail(&trail, OutputFormat::Summary).unwrap(), "Procesos > Tareas");
    }

    #[test]
    fn test_report_summary_lists_paths() {
        let report = resolver()
            .resolve_all(&["/admin/empresas", "/admin"])
            .unwrap();
        let text = format_report(&report, OutputFormat::Summary).unwrap();

        assert!(text.contains("Total Paths: 2"));
        assert!(text.contains("/admin/empresas\n  Empresas"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn test_tree_summary_outline() {
        let config = NavigationConfig::builtin().unwrap();
        let text = format_tree(&config, OutputFormat::Summary).unwrap();

        assert!(text.starts_with("Landing: /admin"));
        assert!(text.contains("\n      Detalle de acción  /admin/procesos/acciones/[id]\n"));
    }

    #[test]
    fn test_tree_yaml_uses_file_syntax() {
        let config = NavigationConfig::builtin().unwrap();
        let yaml = format_tree(&config, OutputFormat::Yaml).unwrap();

        assert!(yaml.contains("landing: /admin"));
        assert!(yaml.contains("[id]"));
        assert!(yaml.contains("title: Detalle de tarea"));
    }
}
