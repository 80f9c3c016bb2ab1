use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Runs the binary with its own config dir, so a real user config never
/// leaks into the tests.
pub struct TestEnv {
    tmp: TempDir,
    config_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let config_home = tmp.path().join("config");
        fs::create_dir_all(&config_home).expect("create isolated config dir");

        Self { tmp, config_home }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("trivy-webhook");
        cmd.env("XDG_CONFIG_HOME", &self.config_home)
            .env_remove("TRIVY_WEBHOOK_URL")
            .env_remove("TRIVY_WEBHOOK_SCANNER");
        cmd
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.tmp.path().join("trivy-webhook.toml");
        fs::write(&path, contents).expect("write config file");
        path
    }
}
