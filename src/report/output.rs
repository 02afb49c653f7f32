// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for exported summaries and inspections

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }

    /// Format implied by a file extension, defaulting to JSON.
    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
            .unwrap_or(OutputFormat::Json)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::for_path(Path::new("s.yml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::for_path(Path::new("s.YAML")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::for_path(Path::new("s.json")), OutputFormat::Json);
        assert_eq!(OutputFormat::for_path(Path::new("summary")), OutputFormat::Json);
    }

    #[test]
    fn serializes_both_formats() {
        let mut value = BTreeMap::new();
        value.insert("rounds", 2);
        assert!(OutputFormat::Json.serialize(&value).unwrap().contains("\"rounds\": 2"));
        assert!(OutputFormat::Yaml.serialize(&value).unwrap().contains("rounds: 2"));
    }
}
