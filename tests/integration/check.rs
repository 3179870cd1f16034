//! Tests for `doctracks check`

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestSite;

#[test]
fn test_check_sample_site_passes_with_warnings() -> Result<()> {
    let site = TestSite::sample()?;

    site.command()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "actions (enterprise-server@3.10, en): 2 tracks are featured (getting_started, server_admin)",
        ))
        .stdout(predicate::str::contains("4 track(s) in 1 product(s)"));
    Ok(())
}

#[test]
fn test_check_reports_missing_guide_page() -> Result<()> {
    let site = TestSite::sample()?;
    std::fs::remove_file(site.root().join("content/actions/deploy/about-deployments.md"))?;

    site.command()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "error: actions/deployment (free-pro-team@latest, en): Guide page not found: /actions/deploy/about-deployments",
        ))
        .stderr(predicate::str::contains("error(s) in 4 track(s) checked"));
    Ok(())
}

#[test]
fn test_check_reports_bad_version_spec() -> Result<()> {
    let site = TestSite::sample()?;
    site.write(
        "data/learning-tracks/pages.yml",
        "publish:\n  title: Publish\n  versions: 'ghae'\n  guides: []\n",
    )?;

    site.command()
        .args(["check", "--product", "pages"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("pages/publish"))
        .stdout(predicate::str::contains("unknown plan 'ghae'"));
    Ok(())
}

#[test]
fn test_check_warns_about_tracks_without_guides() -> Result<()> {
    let site = TestSite::sample()?;
    site.write("data/learning-tracks/pages.yml", "publish:\n  title: Publish\n  guides: []\n")?;

    site.command()
        .args(["check", "--product", "pages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning: pages/publish: no guides in any version"));
    Ok(())
}

#[test]
fn test_check_reports_template_errors() -> Result<()> {
    let site = TestSite::sample()?;
    site.write(
        "data/learning-tracks/pages.yml",
        "publish:\n  title: '{% if ghes %}Publish'\n  guides: []\n",
    )?;

    site.command()
        .args(["check", "--product", "pages"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Template rendering failed"));
    Ok(())
}
