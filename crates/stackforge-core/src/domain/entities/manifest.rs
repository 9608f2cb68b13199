//! `package.json` descriptor shared by the backend and frontend sub-projects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, registry, value_objects::BackendLang};

pub const MIN_NODE_VERSION: &str = ">=16.0.0";

const VITEST_FAMILY: &[&str] = &["vitest", "@vitest/coverage-v8"];
const JEST_FAMILY: &[&str] = &["jest", "ts-jest", "@types/jest"];

/// Packages that only make sense in a TypeScript toolchain.
fn is_typescript_only(package: &str) -> bool {
    package == "typescript"
        || package == "ts-node"
        || package == "ts-jest"
        || package.starts_with("@types/")
        || package.starts_with("@typescript-eslint/")
}

/// One sub-project's manifest. Maps are `BTreeMap` so output is sorted and
/// byte-stable between runs. Both dependency maps and `keywords` are always
/// written, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDescriptor {
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub engines: BTreeMap<String, String>,
}

impl ManifestDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0.0".into(),
            description: description.into(),
            main: None,
            private: None,
            scripts: BTreeMap::new(),
            dependencies: BTreeMap::new(),
            dev_dependencies: BTreeMap::new(),
            keywords: Vec::new(),
            engines: BTreeMap::from([("node".to_string(), MIN_NODE_VERSION.to_string())]),
        }
    }

    pub fn with_main(mut self, main: impl Into<String>) -> Self {
        self.main = Some(main.into());
        self
    }

    pub fn with_private(mut self) -> Self {
        self.private = Some(true);
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Merge a partial script map. Later entries override earlier ones.
    pub fn merge_scripts(&mut self, scripts: BTreeMap<String, String>) {
        self.scripts.extend(scripts);
    }

    pub fn merge_dependencies(&mut self, deps: BTreeMap<String, String>) {
        self.dependencies.extend(deps);
    }

    pub fn merge_dev_dependencies(&mut self, deps: BTreeMap<String, String>) {
        self.dev_dependencies.extend(deps);
    }

    fn all_packages(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .map(String::as_str)
    }

    fn declares(&self, package: &str) -> bool {
        self.dependencies.contains_key(package) || self.dev_dependencies.contains_key(package)
    }

    /// Never both test-runner families, never more than one database driver,
    /// never the same package in both dependency maps.
    pub fn check_exclusivity(&self) -> Result<(), DomainError> {
        let conflict = |reason: String| DomainError::ManifestConflict {
            manifest: self.name.clone(),
            reason,
        };

        let has_vitest = VITEST_FAMILY.iter().any(|p| self.declares(p));
        let has_jest = JEST_FAMILY.iter().any(|p| self.declares(p));
        if has_vitest && has_jest {
            return Err(conflict("both vitest and jest families declared".into()));
        }

        let drivers: Vec<&str> = registry::all_driver_names()
            .filter(|d| self.declares(d))
            .collect();
        if drivers.len() > 1 {
            return Err(conflict(format!(
                "multiple database drivers: {}",
                drivers.join(", ")
            )));
        }

        if let Some(dup) = self
            .dependencies
            .keys()
            .find(|k| self.dev_dependencies.contains_key(*k))
        {
            return Err(conflict(format!(
                "'{dup}' is both a dependency and a devDependency"
            )));
        }

        Ok(())
    }

    /// A JavaScript sub-project must not pull in the TypeScript toolchain.
    pub fn check_dialect(&self, lang: BackendLang) -> Result<(), DomainError> {
        if lang.is_typescript() {
            return Ok(());
        }
        match self.all_packages().find(|p| is_typescript_only(p)) {
            Some(leak) => Err(DomainError::ManifestConflict {
                manifest: self.name.clone(),
                reason: format!("TypeScript-only package '{leak}' in a JavaScript project"),
            }),
            None => Ok(()),
        }
    }

    /// Pretty JSON with a trailing newline, the way npm writes it.
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| DomainError::InvalidStructure(format!("manifest serialization: {e}")))
    }
}
