//! Tests for configuration discovery and overrides

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestSite;
use doctracks::test_utils::SiteFixture;

const TRACKS: &str = "intro:\n  title: Intro\n  guides: [/docs/intro]\n";

fn site() -> Result<TestSite> {
    TestSite::from_builder(
        SiteFixture::builder()?
            .with_tracks("docs", TRACKS)
            .with_page("docs/intro", "title: Introduction"),
    )
}

#[test]
fn test_defaults_without_config_file() -> Result<()> {
    let site = site()?;

    site.command()
        .args(["resolve", "--product", "docs", "--version", "enterprise-cloud@latest", "intro"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/en/enterprise-cloud@latest/docs/intro  Introduction"));
    Ok(())
}

#[test]
fn test_root_flag() -> Result<()> {
    let site = site()?;
    let root = site.root().to_string_lossy().to_string();

    site.command()
        .current_dir(std::env::temp_dir())
        .args(["--root", root.as_str(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docs/intro  Intro"));
    Ok(())
}

#[test]
fn test_config_env_override() -> Result<()> {
    let site = site()?;
    site.write(
        "alt.toml",
        "default_version = \"enterprise-server@3.9\"\n\n[[plans]]\nname = \"enterprise-server\"\nshort_name = \"ghes\"\nreleases = [\"3.9\"]\n",
    )?;

    // the default version has no version segment in hrefs
    site.command()
        .env("DOCTRACKS_CONFIG", site.root().join("alt.toml"))
        .args(["resolve", "--product", "docs", "--version", "enterprise-server@3.9", "intro"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/en/docs/intro  Introduction"));

    site.command()
        .env("DOCTRACKS_CONFIG", site.root().join("alt.toml"))
        .args(["resolve", "--product", "docs", "--version", "free-pro-team@latest", "intro"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown version"));
    Ok(())
}

#[test]
fn test_invalid_config_file() -> Result<()> {
    let site = site()?;
    site.write("doctracks.toml", "languages = \"en\"\n")?;

    site.command()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Site configuration error"));
    Ok(())
}

#[test]
fn test_unknown_language() -> Result<()> {
    let site = site()?;

    site.command()
        .args(["resolve", "--product", "docs", "--version", "free-pro-team@latest", "--language", "ja", "intro"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("language 'ja' is not configured"));
    Ok(())
}
