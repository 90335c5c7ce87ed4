use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::manifest::Manifest;
use crate::registry::{NpmCli, Registry};
use crate::resolver::resolve_set;
use crate::runtime::Runtime;

/// Dependency tables an update pass touches, in processing order.
const DEPENDENCY_FIELDS: [&str; 2] = ["dependencies", "devDependencies"];

pub struct Config<R: Runtime, G: Registry> {
    pub runtime: R,
    pub registry: G,
    pub manifest_path: PathBuf,
}

impl<R: Runtime> Config<R, NpmCli> {
    pub fn new(runtime: R, manifest_path: Option<PathBuf>, npm_bin: Option<String>) -> Self {
        let manifest_path = manifest_path.unwrap_or_else(|| PathBuf::from("package.json"));
        let registry = NpmCli::new(npm_bin);

        Self {
            runtime,
            registry,
            manifest_path,
        }
    }
}

#[tracing::instrument(skip(runtime, manifest_path, npm_bin))]
pub async fn update<R: Runtime + 'static>(
    runtime: R,
    manifest_path: Option<PathBuf>,
    npm_bin: Option<String>,
) -> Result<()> {
    let config = Config::new(runtime, manifest_path, npm_bin);
    let updater = Updater::new(config.runtime, config.registry);
    updater.run(&config.manifest_path).await
}

pub struct Updater<R: Runtime, G: Registry> {
    pub runtime: R,
    pub registry: G,
}

impl<R: Runtime + 'static, G: Registry> Updater<R, G> {
    #[tracing::instrument(skip(runtime, registry))]
    pub fn new(runtime: R, registry: G) -> Self {
        Self { runtime, registry }
    }

    /// Loads the manifest, resolves both dependency tables, and writes the
    /// manifest back. The save happens only after every lookup succeeded, so
    /// a failed run leaves the file as it was.
    #[tracing::instrument(skip(self, manifest_path))]
    pub async fn run(&self, manifest_path: &Path) -> Result<()> {
        if !self.runtime.exists(manifest_path) {
            anyhow::bail!(
                "No manifest found at {:?}. Run depin from a directory containing package.json.",
                manifest_path
            );
        }

        println!("   resolving {}", manifest_path.display());
        let mut manifest = Manifest::load(&self.runtime, manifest_path)?;

        for field in DEPENDENCY_FIELDS {
            let Some(deps) = manifest.dependency_set(field)? else {
                debug!("Manifest has no {} table", field);
                continue;
            };

            let resolved = resolve_set(&self.registry, &deps).await?;
            manifest.set_dependency_set(field, &resolved);
        }

        manifest.save(&self.runtime, manifest_path)?;
        println!("     updated {}", manifest_path.display());

        Ok(())
    }
}
