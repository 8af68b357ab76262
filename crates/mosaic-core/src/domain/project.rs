//! Project configuration model.
//!
//! These types round-trip through the per-project `project.json` manifest.
//! `root` is deliberately not serialized: it is implied by the manifest's
//! location in the tree and re-attached by the registry on read.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::DomainError;
use crate::domain::names::validate_project_name;

/// What a project is for: an app that ships, or a library it links against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Application,
    Library,
}

impl ProjectType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Library => "library",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named build/test/lint operation attached to a project.
///
/// The executor identifier is opaque to the core; the only rule is that it
/// must be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfiguration {
    pub executor: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub configurations: BTreeMap<String, Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<String>,
}

impl TargetConfiguration {
    pub fn new(executor: impl Into<String>) -> Self {
        Self {
            executor: executor.into(),
            ..Self::default()
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn with_configuration(
        mut self,
        name: impl Into<String>,
        options: Map<String, Value>,
    ) -> Self {
        self.configurations.insert(name.into(), options);
        self
    }

    pub fn with_outputs(mut self, outputs: &[&str]) -> Self {
        self.outputs = outputs.iter().map(|o| o.to_string()).collect();
        self
    }
}

/// Structured configuration of one project in the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfiguration {
    #[serde(default)]
    pub name: String,
    /// Workspace-relative project root. Implied by the manifest location,
    /// never written into the manifest itself.
    #[serde(skip)]
    pub root: Utf8PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<Utf8PathBuf>,
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: BTreeMap<String, TargetConfiguration>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl ProjectConfiguration {
    pub fn new(name: impl Into<String>, root: Utf8PathBuf, project_type: ProjectType) -> Self {
        let source_root = Some(root.join("src"));
        Self {
            name: name.into(),
            root,
            source_root,
            project_type,
            targets: BTreeMap::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn application(name: impl Into<String>, root: Utf8PathBuf) -> Self {
        Self::new(name, root, ProjectType::Application)
    }

    pub fn library(name: impl Into<String>, root: Utf8PathBuf) -> Self {
        Self::new(name, root, ProjectType::Library)
    }

    pub fn add_target(&mut self, name: impl Into<String>, target: TargetConfiguration) {
        self.targets.insert(name.into(), target);
    }

    /// Check the invariants the registry relies on: a valid name and a
    /// non-empty executor on every target.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_project_name(&self.name)?;
        for (target, config) in &self.targets {
            if config.executor.trim().is_empty() {
                return Err(DomainError::EmptyExecutor {
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> ProjectConfiguration {
        let mut config = ProjectConfiguration::application("shop", "apps/shop".into());
        config.add_target(
            "build",
            TargetConfiguration::new("@mosaic/webpack:webpack")
                .with_option("outputPath", json!("dist/apps/shop"))
                .with_outputs(&["{options.outputPath}"]),
        );
        config.tags.insert("scope:shop".into());
        config
    }

    #[test]
    fn serializes_without_root() {
        let raw = serde_json::to_string_pretty(&sample()).unwrap();
        assert!(!raw.contains("\"root\""));
        assert!(raw.contains("\"projectType\": \"application\""));
        assert!(raw.contains("\"sourceRoot\": \"apps/shop/src\""));
    }

    #[test]
    fn round_trips_through_json() {
        let config = sample();
        let raw = serde_json::to_string(&config).unwrap();
        let mut back: ProjectConfiguration = serde_json::from_str(&raw).unwrap();
        back.root = config.root.clone(); // re-attached by the registry on read
        assert_eq!(back, config);
    }

    #[test]
    fn empty_sections_are_omitted() {
        let config = ProjectConfiguration::library("util", "libs/util".into());
        let raw = serde_json::to_string(&config).unwrap();
        assert!(!raw.contains("targets"));
        assert!(!raw.contains("tags"));
    }

    #[test]
    fn validate_rejects_empty_executor() {
        let mut config = sample();
        config.add_target("lint", TargetConfiguration::new("  "));
        assert!(matches!(
            config.validate(),
            Err(DomainError::EmptyExecutor { .. })
        ));
    }

    #[test]
    fn validate_accepts_sample() {
        assert!(sample().validate().is_ok());
    }
}
