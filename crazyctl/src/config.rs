use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};
use tokio::{
    fs::{File, create_dir_all, read_to_string, set_permissions},
    io::AsyncWriteExt,
};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub(crate) struct Config {
    pub(crate) server: String,
}

/// The location of the saved configuration, creating its directory if needed
pub(crate) async fn config_file() -> Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("org", "crazypic", "crazyctl")
        .ok_or_else(|| anyhow!("Cannot find default project configuration directory"))?;
    let dir = project_dirs.config_dir();
    create_dir_all(dir)
        .await
        .with_context(|| format!("Unable to create config directory {}", dir.display()))?;
    Ok(dir.join("config.json"))
}

impl Config {
    fn parse(contents: String) -> Result<Self> {
        serde_json::from_str(&contents).with_context(|| "Couldn't parse json string")
    }

    fn format(&self) -> Result<String> {
        serde_json::to_string_pretty(self).with_context(|| "Couldn't convert config to json")
    }

    pub(crate) async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        debug!(?p, "Trying to load config");
        let contents = read_to_string(path).await?;
        Self::parse(contents)
    }

    pub(crate) async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!(?path, "Saving config");
        let mut file = File::create(path).await?;
        let serialized = self.format()?;
        let mut perms = file.metadata().await?.permissions();
        perms.set_mode(0o600);
        set_permissions(path, perms).await?;
        file.write_all(serialized.as_bytes())
            .await
            .with_context(|| "Failed to write config file")?;
        Ok(())
    }

    pub(crate) fn new(server: String) -> Self {
        Config { server }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test(tokio::test)]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.json");
        let cfg = Config::new("http://localhost:8080".to_string());
        cfg.save_to_file(&path).await.expect("failed to save");

        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let loaded = Config::load_from_file(&path).await.expect("failed to load");
        assert_eq!(loaded, cfg);
    }

    #[test(tokio::test)]
    async fn test_load_invalid() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "not json").await.expect("write");
        assert!(Config::load_from_file(&path).await.is_err());
        assert!(
            Config::load_from_file(dir.path().join("missing.json"))
                .await
                .is_err()
        );
    }
}
