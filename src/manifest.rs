use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::runtime::Runtime;

/// Parsed package manifest. Holds every field in original order so a save
/// after editing only the dependency tables leaves the rest of the file
/// structurally untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    #[tracing::instrument(skip(runtime, path))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime
            .read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest: Manifest = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as a JSON object", path.display()))?;
        Ok(manifest)
    }

    /// Writes the manifest back with two-space indentation, overwriting
    /// whatever is at `path`.
    #[tracing::instrument(skip(self, runtime, path))]
    pub fn save<R: Runtime>(&self, runtime: &R, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self)?;
        runtime
            .write(path, json.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Returns the named dependency table, or `None` if the manifest does
    /// not declare it.
    pub fn dependency_set(&self, field: &str) -> Result<Option<DependencySet>> {
        match self.fields.get(field) {
            Some(value) => {
                let set = DependencySet::from_value(value)
                    .with_context(|| format!("Invalid '{}' table", field))?;
                Ok(Some(set))
            }
            None => Ok(None),
        }
    }

    /// Replaces the named dependency table. An existing field keeps its
    /// position in the manifest.
    pub fn set_dependency_set(&mut self, field: &str, set: &DependencySet) {
        self.fields.insert(field.to_string(), set.to_value());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Ordered package name to version constraint table. An empty constraint
/// means the version has not been pinned yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DependencySet {
    entries: Vec<(String, String)>,
}

impl DependencySet {
    pub fn from_value(value: &Value) -> Result<Self> {
        let table = value
            .as_object()
            .context("Expected a JSON object of package names to version constraints")?;

        let mut entries = Vec::with_capacity(table.len());
        for (name, constraint) in table {
            let constraint = match constraint {
                Value::String(s) => s.clone(),
                // A null constraint reads the same as an empty one
                Value::Null => String::new(),
                other => anyhow::bail!(
                    "Version constraint for package '{}' must be a string, got {}",
                    name,
                    other
                ),
            };
            entries.push((name.clone(), constraint));
        }

        Ok(Self { entries })
    }

    pub fn to_value(&self) -> Value {
        let mut table = Map::new();
        for (name, constraint) in &self.entries {
            table.insert(name.clone(), Value::String(constraint.clone()));
        }
        Value::Object(table)
    }

    pub fn insert(&mut self, name: &str, constraint: impl Into<String>) {
        let constraint = constraint.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = constraint;
        } else {
            self.entries.push((name.to_string(), constraint));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
