use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Registry: Send + Sync {
    async fn latest_version(&self, package: &str) -> Result<String>;
}

/// Registry lookups through the npm command line client. Each lookup spawns
/// `<program> view <package> version` and reads the version off stdout.
pub struct NpmCli {
    pub program: String,
}

impl NpmCli {
    #[tracing::instrument(skip(program))]
    pub fn new(program: Option<String>) -> Self {
        let program = program.unwrap_or_else(|| "npm".to_string());
        Self { program }
    }
}

#[async_trait]
impl Registry for NpmCli {
    #[tracing::instrument(skip(self))]
    async fn latest_version(&self, package: &str) -> Result<String> {
        debug!("Running {} view {} version", self.program, package);

        let output = Command::new(&self.program)
            .arg("view")
            .arg(package)
            .arg("version")
            .output()
            .await
            .with_context(|| {
                format!("Failed to run '{} view {} version'", self.program, package)
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "'{} view {} version' exited with {}: {}",
                self.program,
                package,
                output.status,
                stderr.trim()
            );
        }

        let version = String::from_utf8(output.stdout)
            .with_context(|| format!("Version reported for '{}' is not valid UTF-8", package))?
            .trim()
            .to_string();

        if version.is_empty() {
            anyhow::bail!(
                "'{} view {} version' printed no version",
                self.program,
                package
            );
        }

        Ok(version)
    }
}
