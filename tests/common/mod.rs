//! Shared helpers for the integration suite
//!
//! [`TestSite`] wraps a [`SiteFixture`] and runs the `doctracks` binary against it.

#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::path::Path;

use doctracks::test_utils::{SiteFixture, SiteFixtureBuilder, init_test_logging, sample_site};

/// A site root on disk plus a way to run the CLI in it
pub struct TestSite {
    fixture: SiteFixture,
}

impl TestSite {
    /// The sample `actions` site
    pub fn sample() -> Result<Self> {
        init_test_logging(None);
        Ok(Self {
            fixture: sample_site()?,
        })
    }

    /// A site built from a custom fixture
    pub fn from_builder(builder: SiteFixtureBuilder) -> Result<Self> {
        init_test_logging(None);
        Ok(Self {
            fixture: builder.build()?,
        })
    }

    /// Site root directory
    pub fn root(&self) -> &Path {
        self.fixture.root()
    }

    /// Write (or overwrite) a file relative to the site root
    pub fn write(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// A `doctracks` command running in the site root, isolated from the
    /// caller's environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("doctracks").expect("doctracks binary is built");
        cmd.current_dir(self.root())
            .env("NO_COLOR", "1")
            .env_remove("DOCTRACKS_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// `doctracks resolve --product actions --version <version> <extra...>`
    pub fn resolve(&self, version: &str, extra: &[&str]) -> Command {
        let mut cmd = self.command();
        cmd.args(["resolve", "--product", "actions", "--version", version]).args(extra);
        cmd
    }

    /// Run `resolve` with `--format json` and parse stdout
    pub fn resolve_json(&self, version: &str, extra: &[&str]) -> Result<serde_json::Value> {
        let output = self.resolve(version, extra).arg("--format").arg("json").output()?;
        assert!(
            output.status.success(),
            "resolve failed\nstderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

/// Track names from a JSON `learningTracks` array
pub fn track_names(json: &serde_json::Value) -> Vec<String> {
    json["learningTracks"]
        .as_array()
        .map(|tracks| {
            tracks.iter().filter_map(|t| t["trackName"].as_str().map(str::to_string)).collect()
        })
        .unwrap_or_default()
}
