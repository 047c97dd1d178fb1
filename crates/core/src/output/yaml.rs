//! YAML output formatter

use crate::output::FormatError;
use serde::Serialize;

/// Format any serializable value as YAML
pub fn format_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, FormatError> {
    serde_yaml::to_string(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BreadcrumbTrail, ResolveMetadata, ResolveReport, ResolveStats};

    fn create_test_data() -> ResolveReport {
        ResolveReport {
            landing: "/admin".to_string(),
            trails: vec![BreadcrumbTrail {
                path: "/admin".to_string(),
                entries: vec![],
            }],
            stats: ResolveStats {
                total_paths: 1,
                empty: 1,
                ..Default::default()
            },
            metadata: ResolveMetadata {
                duration_ms: 1,
                paths_per_second: 1000.0,
                timestamp: "2024-01-01T00:00:00Z".to_string(),
                tool_version: "0.1.0".to_string(),
            },
        }
    }

    #[test]
    fn test_format_yaml() {
        let yaml = format_yaml(&create_test_data()).unwrap();
        assert!(yaml.contains("landing: /admin"));
        assert!(yaml.contains("trails:"));
        assert!(yaml.contains("total_paths: 1"));
    }
}
