use anyhow::{Context, Result};
use log::debug;

use crate::manifest::DependencySet;
use crate::registry::Registry;

/// Fills in every unpinned entry of a dependency table with the latest
/// registry version, caret-prefixed. Entries that already carry a constraint
/// pass through unchanged. Lookups run one at a time and the first failure
/// aborts the whole pass.
#[tracing::instrument(skip(registry, deps))]
pub async fn resolve_set<G: Registry>(registry: &G, deps: &DependencySet) -> Result<DependencySet> {
    let mut resolved = DependencySet::default();

    for (name, constraint) in deps.iter() {
        if !constraint.is_empty() {
            debug!("Keeping pinned constraint {} for {}", constraint, name);
            println!("     skipped {} {}", name, constraint);
            resolved.insert(name, constraint);
            continue;
        }

        let version = registry
            .latest_version(name)
            .await
            .with_context(|| format!("Failed to resolve latest version for package '{}'", name))?;
        let version = version.trim();
        if version.is_empty() {
            anyhow::bail!("Registry returned an empty version for package '{}'", name);
        }

        let constraint = format!("^{}", version);
        println!("    resolved {} {}", name, constraint);
        resolved.insert(name, constraint);
    }

    Ok(resolved)
}
