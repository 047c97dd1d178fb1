//! Configuration module for the navigation tree
//!
//! This module loads the navigation tree from TOML, YAML or JSON, validates
//! it once at load time and provides the built-in admin dashboard tree.

use crate::models::{NavigationNode, NavigationStats, Segment};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Deepest tree accepted at load time
pub const MAX_DEPTH: usize = 32;

const BUILTIN_NAVIGATION: &str = include_str!("../assets/navigation.toml");

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("Empty segment under {0}")]
    EmptySegment(String),

    #[error("Invalid segment {segment:?} under {parent}")]
    InvalidSegment { parent: String, segment: String },

    #[error("Duplicate segment {segment:?} under {parent}")]
    DuplicateSegment { parent: String, segment: String },

    #[error("More than one dynamic segment under {0}")]
    AmbiguousDynamic(String),

    #[error("Catch-all segment {0} cannot have children")]
    CatchAllChildren(String),

    #[error("Navigation tree deeper than {max} levels at {path}")]
    TooDeep { path: String, max: usize },

    #[error("Invalid landing page: {0:?}")]
    InvalidLanding(String),
}

/// Navigation node as written in a configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Segment syntax (`tareas`, `[id]`, `:id`, `[...slug]`)
    pub segment: String,

    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

/// Navigation configuration as written in a configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSpec {
    /// Landing page path
    #[serde(default = "default_landing")]
    pub landing: String,

    /// Top-level nodes
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
}

fn default_landing() -> String {
    "/".to_string()
}

/// Validated navigation tree plus the landing page it is resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationConfig {
    landing: String,
    nodes: Vec<NavigationNode>,
}

impl NavigationConfig {
    /// Build from already-constructed nodes, validating the tree
    pub fn new(nodes: Vec<NavigationNode>) -> Result<Self, ConfigError> {
        validate_level(&nodes, "", 1)?;
        Ok(Self {
            landing: default_landing(),
            nodes,
        })
    }

    /// Set the landing page (builder pattern)
    pub fn with_landing(mut self, landing: &str) -> Result<Self, ConfigError> {
        self.landing = normalize_landing(landing)?;
        Ok(self)
    }

    /// Build from a deserialized configuration file
    pub fn from_spec(spec: ConfigSpec) -> Result<Self, ConfigError> {
        let nodes = build_level(spec.nodes, "", 1)?;
        let config = Self::new(nodes)?.with_landing(&spec.landing)?;
        debug!(
            landing = %config.landing,
            nodes = config.stats().total_nodes,
            "navigation config loaded"
        );
        Ok(config)
    }

    /// Parse TOML configuration
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Self::from_spec(toml::from_str(source)?)
    }

    /// Parse YAML configuration
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Self::from_spec(serde_yaml::from_str(source)?)
    }

    /// Parse JSON configuration
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Self::from_spec(serde_json::from_str(source)?)
    }

    /// Load a configuration file, picking the format from its extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let source = fs::read_to_string(path)?;
        debug!(path = %path.display(), "reading navigation config");

        match ext.as_str() {
            "toml" => Self::from_toml_str(&source),
            "yaml" | "yml" => Self::from_yaml_str(&source),
            "json" => Self::from_json_str(&source),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    /// The admin dashboard navigation tree compiled into the library
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_NAVIGATION)
    }

    /// Normalized landing page
    pub fn landing(&self) -> &str {
        &self.landing
    }

    /// Top-level nodes
    pub fn nodes(&self) -> &[NavigationNode] {
        &self.nodes
    }

    /// Counts over the tree
    pub fn stats(&self) -> NavigationStats {
        NavigationStats {
            roots: self.nodes.len(),
            total_nodes: self.nodes.iter().map(|n| n.total_nodes()).sum(),
            dynamic_nodes: self.nodes.iter().map(|n| n.dynamic_nodes()).sum(),
            max_depth: self.nodes.iter().map(|n| n.depth()).max().unwrap_or(0),
        }
    }

    /// Find the node a URL ends on, following literal-first matching.
    ///
    /// Unlike resolution this requires every segment to match.
    pub fn find(&self, url: &str) -> Option<&NavigationNode> {
        let segments = split_path(url);
        let mut level = self.nodes.as_slice();
        let mut found = None;

        for (idx, value) in segments.iter().enumerate() {
            let node = crate::models::match_level(level, value)?;
            if matches!(node.segment, Segment::CatchAll(_)) {
                return Some(node);
            }
            found = Some(node);
            if idx + 1 < segments.len() {
                level = node.children.as_slice();
            }
        }

        found
    }

    /// Convert back to the file representation
    pub fn to_spec(&self) -> ConfigSpec {
        ConfigSpec {
            landing: self.landing.clone(),
            nodes: self.nodes.iter().map(node_to_spec).collect(),
        }
    }
}

/// Split a path into its non-empty segments, dropping query and fragment
pub fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty()).collect()
}

fn normalize_landing(landing: &str) -> Result<String, ConfigError> {
    let trimmed = landing.trim();
    if !trimmed.starts_with('/') {
        return Err(ConfigError::InvalidLanding(landing.to_string()));
    }
    Ok(format!("/{}", split_path(trimmed).join("/")))
}

fn child_path(parent: &str, segment: &str) -> String {
    format!("{}/{}", parent, segment)
}

fn display_parent(parent: &str) -> String {
    if parent.is_empty() {
        "/".to_string()
    } else {
        parent.to_string()
    }
}

fn build_level(specs: Vec<NodeSpec>, parent: &str, depth: usize) -> Result<Vec<NavigationNode>, ConfigError> {
    specs
        .into_iter()
        .map(|spec| build_node(spec, parent, depth))
        .collect()
}

fn build_node(spec: NodeSpec, parent: &str, depth: usize) -> Result<NavigationNode, ConfigError> {
    if spec.segment.trim().is_empty() {
        return Err(ConfigError::EmptySegment(display_parent(parent)));
    }

    let segment = Segment::parse(&spec.segment).ok_or_else(|| ConfigError::InvalidSegment {
        parent: display_parent(parent),
        segment: spec.segment.clone(),
    })?;

    let path = child_path(parent, &segment.to_string());
    if depth > MAX_DEPTH {
        return Err(ConfigError::TooDeep { path, max: MAX_DEPTH });
    }

    let title = spec
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let children = build_level(spec.children, &path, depth + 1)?;

    Ok(NavigationNode {
        segment,
        title,
        children,
    })
}

fn validate_level(nodes: &[NavigationNode], parent: &str, depth: usize) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    let mut dynamic = 0;

    for node in nodes {
        let path = child_path(parent, &node.segment.to_string());

        if depth > MAX_DEPTH {
            return Err(ConfigError::TooDeep { path, max: MAX_DEPTH });
        }

        if node.segment.name().is_empty() {
            return Err(ConfigError::EmptySegment(display_parent(parent)));
        }

        // Every segment must survive a trip through the file syntax.
        let syntax = node.segment.to_string();
        if Segment::parse(&syntax).as_ref() != Some(&node.segment) {
            return Err(ConfigError::InvalidSegment {
                parent: display_parent(parent),
                segment: syntax,
            });
        }

        if let Segment::Literal(ref text) = node.segment {
            if !seen.insert(text.as_str()) {
                return Err(ConfigError::DuplicateSegment {
                    parent: display_parent(parent),
                    segment: text.clone(),
                });
            }
        } else {
            dynamic += 1;
            if dynamic > 1 {
                return Err(ConfigError::AmbiguousDynamic(display_parent(parent)));
            }
        }

        if matches!(node.segment, Segment::CatchAll(_)) && !node.children.is_empty() {
            return Err(ConfigError::CatchAllChildren(path));
        }

        validate_level(&node.children, &path, depth + 1)?;
    }

    Ok(())
}

fn node_to_spec(node: &NavigationNode) -> NodeSpec {
    NodeSpec {
        segment: node.segment.to_string(),
        title: node.title.clone(),
        children: node.children.iter().map(node_to_spec).collect(),
    }
}

/// Options for batch resolution
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Number of threads for parallel resolution
    pub threads: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            threads: num_cpus(),
        }
    }
}

impl ResolveOptions {
    /// Set number of threads (builder pattern)
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }
}

/// Get number of available CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE_TOML: &str = r#"
landing = "/admin"

[[nodes]]
segment = "admin"
title = "Inicio"

[[nodes.children]]
segment = "procesos"
title = "Procesos"

[[nodes.children.children]]
segment = "tareas"
title = "Tareas"

[[nodes.children.children]]
segment = "acciones"
title = "Acciones"

[[nodes.children.children.children]]
segment = "[id]"
title = "Detalle de acción"
"#;

    #[test]
    fn test_from_toml() {
        let config = NavigationConfig::from_toml_str(SAMPLE_TOML).unwrap();
        assert_eq!(config.landing(), "/admin");

        let stats = config.stats();
        assert_eq!(stats.roots, 1);
        assert_eq!(stats.total_nodes, 5);
        assert_eq!(stats.dynamic_nodes, 1);
        assert_eq!(stats.max_depth, 4);
    }

    #[test]
    fn test_from_yaml_and_json() {
        let yaml = r#"
landing: /
nodes:
  - segment: asociados
    title: Asociados
    children:
      - segment: ":id"
"#;
        let config = NavigationConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.stats().total_nodes, 2);

        let json = r#"{"nodes":[{"segment":"empresas","children":[{"segment":"[id]"}]}]}"#;
        let config = NavigationConfig::from_json_str(json).unwrap();
        assert_eq!(config.landing(), "/");
        assert_eq!(config.stats().dynamic_nodes, 1);
    }

    #[test]
    fn test_from_path_picks_format() {
        let dir = TempDir::new().unwrap();

        let toml_path = dir.path().join("navigation.toml");
        let mut file = fs::File::create(&toml_path).unwrap();
        write!(file, "{}", SAMPLE_TOML).unwrap();
        assert!(NavigationConfig::from_path(&toml_path).is_ok());

        let ini_path = dir.path().join("navigation.ini");
        fs::write(&ini_path, "nodes = []").unwrap();
        assert!(matches!(
            NavigationConfig::from_path(&ini_path),
            Err(ConfigError::UnsupportedFormat(_))
        ));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(NavigationConfig::from_path(&missing), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_builtin_config_is_valid() {
        let config = NavigationConfig::builtin().unwrap();
        assert_eq!(config.landing(), "/admin");
        assert!(config.find("/admin/procesos/tareas").is_some());
        assert!(config.find("/admin/asociados/123").is_some());
    }

    #[test]
    fn test_duplicate_segment_rejected() {
        let nodes = vec![NavigationNode::literal("admin", "Inicio").with_children([
            NavigationNode::literal("empresas", "Empresas"),
            NavigationNode::literal("empresas", "Compañías"),
        ])];

        let err = NavigationConfig::new(nodes).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSegment { ref parent, .. } if parent == "/admin"));
    }

    #[test]
    fn test_two_dynamic_children_rejected() {
        let nodes = vec![NavigationNode::literal("asociados", "Asociados").with_children([
            NavigationNode::parameter("id", None),
            NavigationNode::catch_all("rest", None),
        ])];

        assert!(matches!(
            NavigationConfig::new(nodes),
            Err(ConfigError::AmbiguousDynamic(_))
        ));
    }

    #[test]
    fn test_catch_all_children_rejected() {
        let nodes = vec![NavigationNode::catch_all("slug", None)
            .with_child(NavigationNode::literal("x", "X"))];

        assert!(matches!(
            NavigationConfig::new(nodes),
            Err(ConfigError::CatchAllChildren(_))
        ));
    }

    #[test]
    fn test_invalid_segment_rejected() {
        let toml = r#"
[[nodes]]
segment = "admin/procesos"
"#;
        assert!(matches!(
            NavigationConfig::from_toml_str(toml),
            Err(ConfigError::InvalidSegment { .. })
        ));

        let toml = r#"
[[nodes]]
segment = "  "
"#;
        assert!(matches!(
            NavigationConfig::from_toml_str(toml),
            Err(ConfigError::EmptySegment(_))
        ));
    }

    #[test]
    fn test_dynamic_names_must_be_identifiers() {
        let nodes = vec![NavigationNode::literal("asociados", "Asociados")
            .with_child(NavigationNode::parameter("a b", None))];
        assert!(matches!(
            NavigationConfig::new(nodes),
            Err(ConfigError::InvalidSegment { ref segment, .. }) if segment == "[a b]"
        ));

        let nodes = vec![NavigationNode::catch_all("1slug", None)];
        assert!(matches!(
            NavigationConfig::new(nodes),
            Err(ConfigError::InvalidSegment { .. })
        ));

        let nodes = vec![NavigationNode::literal("asociados", "Asociados")
            .with_child(NavigationNode::parameter("asociado_id", None))];
        let config = NavigationConfig::new(nodes).unwrap();
        assert_eq!(NavigationConfig::from_spec(config.to_spec()).unwrap(), config);
    }

    #[test]
    fn test_too_deep_rejected() {
        let mut node = NavigationNode::literal("leaf", "Leaf");
        for i in 0..MAX_DEPTH {
            node = NavigationNode::literal(&format!("n{}", i), "Level").with_child(node);
        }

        assert!(matches!(
            NavigationConfig::new(vec![node]),
            Err(ConfigError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_landing_normalized() {
        let config = NavigationConfig::new(vec![])
            .unwrap()
            .with_landing("/admin/")
            .unwrap();
        assert_eq!(config.landing(), "/admin");

        let root = NavigationConfig::new(vec![]).unwrap().with_landing("//").unwrap();
        assert_eq!(root.landing(), "/");

        assert!(matches!(
            NavigationConfig::new(vec![]).unwrap().with_landing("admin"),
            Err(ConfigError::InvalidLanding(_))
        ));
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/admin//procesos/"), vec!["admin", "procesos"]);
        assert_eq!(split_path("/admin?tab=1#top"), vec!["admin"]);
        assert!(split_path("/").is_empty());
    }

    #[test]
    fn test_spec_round_trip_keeps_syntax() {
        let config = NavigationConfig::from_toml_str(SAMPLE_TOML).unwrap();
        let spec = config.to_spec();
        let reparsed = NavigationConfig::from_spec(spec).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_resolve_options() {
        assert_eq!(ResolveOptions::default().with_threads(0).threads, 1);
        assert_eq!(ResolveOptions::default().with_threads(3).threads, 3);
    }
}
