//! ANSI colored output formatter
//!
//! This module provides colorful terminal output for breadcrumb trails and
//! the navigation tree.

use crate::config::NavigationConfig;
use crate::models::{BreadcrumbTrail, NavigationNode, ResolveReport, Segment};

// ANSI escape codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const UNDERLINE: &str = "\x1b[4m";

const BRIGHT_RED: &str = "\x1b[91m";
const BRIGHT_GREEN: &str = "\x1b[92m";
const BRIGHT_YELLOW: &str = "\x1b[93m";
const BRIGHT_CYAN: &str = "\x1b[96m";
const BRIGHT_WHITE: &str = "\x1b[97m";
const MAGENTA: &str = "\x1b[35m";

const BG_BLUE: &str = "\x1b[44m";

/// Color for a node's segment kind
fn segment_color(segment: &Segment) -> &'static str {
    match segment {
        Segment::Literal(_) => BRIGHT_CYAN,
        Segment::Parameter(_) => BRIGHT_YELLOW,
        Segment::CatchAll(_) => MAGENTA,
    }
}

/// Format a trail as `Link > Link > Current`.
///
/// Links are underlined, the current page is bold.
pub fn format_trail_ansi(trail: &BreadcrumbTrail) -> String {
    if trail.is_empty() {
        return format!("{}(no breadcrumbs){}", DIM, RESET);
    }

    trail
        .entries
        .iter()
        .map(|e| {
            if e.is_current_page {
                format!("{}{}{}", BOLD, e.title, RESET)
            } else {
                format!("{}{}{}{}", UNDERLINE, BRIGHT_CYAN, e.title, RESET)
            }
        })
        .collect::<Vec<_>>()
        .join(&format!(" {}>{} ", DIM, RESET))
}

/// Format a batch report
pub fn format_report_ansi(report: &ResolveReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}{}  Breadcrumb Resolution Results  {}\n\n",
        BOLD, BG_BLUE, RESET
    ));

    output.push_str(&format!(
        "{}Landing:{} {}\n",
        BOLD, RESET, report.landing
    ));
    output.push_str(&format!(
        "{}Paths:{} {}  {}{}Full:{} {}  {}Partial:{} {}  {}Empty:{} {}\n\n",
        BOLD,
        RESET,
        report.stats.total_paths,
        BRIGHT_GREEN,
        BOLD,
        RESET,
        report.stats.full_matches,
        BRIGHT_YELLOW,
        RESET,
        report.stats.partial_matches,
        BRIGHT_RED,
        RESET,
        report.stats.empty
    ));

    for trail in &report.trails {
        output.push_str(&format!("{}{}{}\n", BRIGHT_WHITE, trail.path, RESET));
        output.push_str(&format!("   {}\n", format_trail_ansi(trail)));
    }

    output.push_str(&format!(
        "\n{}Resolved in {}ms ({:.2} paths/sec){}\n",
        DIM, report.metadata.duration_ms, report.metadata.paths_per_second, RESET
    ));

    output
}

/// Format the navigation tree as a colored outline
pub fn format_tree_ansi(config: &NavigationConfig) -> String {
    let stats = config.stats();
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}{}  Navigation Tree  {}\n\n",
        BOLD, BG_BLUE, RESET
    ));
    output.push_str(&format!(
        "{}Landing:{} {}  {}Nodes:{} {}  {}Dynamic:{} {}  {}Depth:{} {}\n\n",
        BOLD,
        RESET,
        config.landing(),
        BOLD,
        RESET,
        stats.total_nodes,
        BOLD,
        RESET,
        stats.dynamic_nodes,
        BOLD,
        RESET,
        stats.max_depth
    ));

    for node in config.nodes() {
        output.push_str(&format_node_ansi(node, "", 0));
    }

    output
}

fn format_node_ansi(node: &NavigationNode, parent: &str, indent: usize) -> String {
    let mut output = String::new();
    let url = format!("{}/{}", parent, node.segment);

    output.push_str(&format!(
        "{}{}{}{} {}{}{} {}{}{}\n",
        "   ".repeat(indent),
        segment_color(&node.segment),
        node.segment,
        RESET,
        BOLD,
        node.title.as_deref().unwrap_or(""),
        RESET,
        DIM,
        url,
        RESET,
    ));

    for child in &node.children {
        output.push_str(&format_node_ansi(child, &url, indent + 1));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BreadcrumbEntry;

    #[test]
    fn test_trail_ansi() {
        let trail = BreadcrumbTrail {
            path: "/admin/empresas/nueva".to_string(),
            entries: vec![
                BreadcrumbEntry {
                    title: "Empresas".to_string(),
                    url: "/admin/empresas".to_string(),
                    is_current_page: false,
                },
                BreadcrumbEntry {
                    title: "Nueva empresa".to_string(),
                    url: "/admin/empresas/nueva".to_string(),
                    is_current_page: true,
                },
            ],
        };

        let output = format_trail_ansi(&trail);
        assert!(output.contains(&format!("{}{}Empresas", UNDERLINE, BRIGHT_CYAN)));
        assert!(output.contains(&format!("{}Nueva empresa", BOLD)));
    }

    #[test]
    fn test_empty_trail_ansi() {
        let trail = BreadcrumbTrail {
            path: "/admin".to_string(),
            entries: vec![],
        };
        assert!(format_trail_ansi(&trail).contains("no breadcrumbs"));
    }

    #[test]
    fn test_tree_ansi_colors_dynamic_segments() {
        let config = NavigationConfig::builtin().unwrap();
        let output = format_tree_ansi(&config);

        assert!(output.contains("Navigation Tree"));
        assert!(output.contains(&format!("{}[id]{}", BRIGHT_YELLOW, RESET)));
        assert!(output.contains(&format!("{}[...slug]{}", MAGENTA, RESET)));
    }
}
