//! HTML output formatter
//!
//! Renders trails the way the dashboard shows them: an ordered list of
//! links separated by `/`, with the current page as plain text. An empty
//! trail renders nothing.

use crate::config::NavigationConfig;
use crate::models::{BreadcrumbTrail, NavigationNode, ResolveReport};

const SEPARATOR: &str = "<li class=\"breadcrumb-separator\" aria-hidden=\"true\">/</li>";

/// Escape text for HTML element content and attribute values
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a trail as a `<nav>` breadcrumb list
pub fn format_trail_html(trail: &BreadcrumbTrail) -> String {
    if trail.is_empty() {
        return String::new();
    }

    let items = trail
        .entries
        .iter()
        .map(|e| {
            if e.is_current_page {
                format!(
                    "<li class=\"breadcrumb-item\"><span aria-current=\"page\">{}</span></li>",
                    escape(&e.title)
                )
            } else {
                format!(
                    "<li class=\"breadcrumb-item\"><a href=\"{}\">{}</a></li>",
                    escape(&e.url),
                    escape(&e.title)
                )
            }
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    format!("<nav aria-label=\"breadcrumb\"><ol class=\"breadcrumb\">{}</ol></nav>", items)
}

/// Render a batch report, one trail per path
pub fn format_report_html(report: &ResolveReport) -> String {
    report
        .trails
        .iter()
        .map(|t| {
            format!(
                "<!-- {} -->\n{}\n",
                escape(&t.path).replace("--", "&#45;&#45;"),
                format_trail_html(t)
            )
        })
        .collect()
}

/// Render the navigation tree as nested lists
pub fn format_tree_html(config: &NavigationConfig) -> String {
    let mut output = String::from("<ul class=\"nav-tree\">\n");
    for node in config.nodes() {
        format_node_html(node, "", 1, &mut output);
    }
    output.push_str("</ul>\n");
    output
}

fn format_node_html(node: &NavigationNode, parent: &str, indent: usize, output: &mut String) {
    let url = format!("{}/{}", parent, node.segment);
    let pad = "  ".repeat(indent);
    let title = node.title.as_deref().unwrap_or_else(|| node.segment.name());

    output.push_str(&format!(
        "{}<li data-path=\"{}\">{}",
        pad,
        escape(&url),
        escape(title)
    ));

    if node.children.is_empty() {
        output.push_str("</li>\n");
        return;
    }

    output.push_str(&format!("\n{}  <ul>\n", pad));
    for child in &node.children {
        format_node_html(child, &url, indent + 2, output);
    }
    output.push_str(&format!("{}  </ul>\n{}</li>\n", pad, pad));
}
