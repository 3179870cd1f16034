//! Tests for `doctracks resolve`

use anyhow::Result;
use predicates::prelude::*;

use crate::common::{TestSite, track_names};
use doctracks::test_utils::SiteFixture;

const LANDING: &str = "content/actions/index.md";

#[test]
fn test_resolve_landing_page_default_version() -> Result<()> {
    let site = TestSite::sample()?;

    let json = site.resolve_json("free-pro-team@latest", &["--page", LANDING])?;

    assert_eq!(json["featuredTrack"]["trackName"], "getting_started");
    assert_eq!(json["featuredTrack"]["trackProduct"], "actions");
    assert_eq!(json["featuredTrack"]["guides"][1]["href"], "/en/actions/learn/quickstart");
    assert_eq!(track_names(&json), vec!["deployment"]);
    assert_eq!(json["learningTracks"][0]["title"], "Deploy to the cloud");
    Ok(())
}

#[test]
fn test_resolve_landing_page_server_version() -> Result<()> {
    let site = TestSite::sample()?;

    let json = site.resolve_json("enterprise-server@3.10", &["--page", LANDING])?;
    assert_eq!(json["featuredTrack"]["trackName"], "server_admin");
    assert_eq!(track_names(&json), vec!["deployment", "self_hosted"]);

    // server_admin only applies from 3.10
    let json = site.resolve_json("enterprise-server@3.9", &["--page", LANDING])?;
    assert_eq!(json["featuredTrack"]["trackName"], "getting_started");
    assert_eq!(track_names(&json), vec!["deployment", "self_hosted"]);
    assert_eq!(
        json["learningTracks"][1]["guides"][0]["href"],
        "/en/enterprise-server@3.9/actions/hosting/about-self-hosted-runners"
    );
    Ok(())
}

#[test]
fn test_resolve_named_tracks_keeps_order() -> Result<()> {
    let site = TestSite::sample()?;

    let json = site.resolve_json("enterprise-server@3.9", &["self_hosted", "deployment"])?;
    assert!(json["featuredTrack"].is_null());
    assert_eq!(track_names(&json), vec!["self_hosted", "deployment"]);
    Ok(())
}

#[test]
fn test_resolve_translation() -> Result<()> {
    let site = TestSite::sample()?;

    let json = site.resolve_json("free-pro-team@latest", &["--language", "ja", "getting_started"])?;
    assert_eq!(json["featuredTrack"]["title"], "Actions を始める");
    assert_eq!(json["featuredTrack"]["guides"][1]["title"], "クイックスタート");
    assert_eq!(json["featuredTrack"]["guides"][1]["href"], "/ja/actions/learn/quickstart");
    Ok(())
}

#[test]
fn test_resolve_text_output() -> Result<()> {
    let site = TestSite::sample()?;

    site.resolve("free-pro-team@latest", &["--page", LANDING])
        .assert()
        .success()
        .stdout(predicate::str::contains("Featured: getting_started - Get started with Actions"))
        .stdout(predicate::str::contains("/en/actions/learn/understanding-actions  Understanding Actions"))
        .stdout(predicate::str::contains("Learning tracks:"))
        .stdout(predicate::str::contains("deployment - Deploy to the cloud"));
    Ok(())
}

#[test]
fn test_resolve_nothing_applies() -> Result<()> {
    let site = TestSite::sample()?;

    site.resolve("free-pro-team@latest", &["self_hosted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No learning tracks apply."));
    Ok(())
}

#[test]
fn test_resolve_unknown_track_suggests() -> Result<()> {
    let site = TestSite::sample()?;

    site.resolve("free-pro-team@latest", &["deploymnt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No learning track called 'deploymnt'"))
        .stderr(predicate::str::contains("deployment"));
    Ok(())
}

#[test]
fn test_resolve_dotted_name_fails() -> Result<()> {
    let site = TestSite::sample()?;

    site.resolve("free-pro-team@latest", &["getting.started"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("renderedTrackName can not contain a . (getting.started)"));
    Ok(())
}

#[test]
fn test_resolve_unknown_version() -> Result<()> {
    let site = TestSite::sample()?;

    site.resolve("enterprise-server@2.0", &["getting_started"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown version 'enterprise-server@2.0'"));
    Ok(())
}

#[test]
fn test_resolve_requires_track_names() -> Result<()> {
    let site = TestSite::sample()?;

    site.resolve("free-pro-team@latest", &[])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Give track names or --page"));
    Ok(())
}

#[test]
fn test_resolve_strict_missing_guide() -> Result<()> {
    let site = TestSite::sample()?;
    std::fs::remove_file(site.root().join("content/actions/learn/quickstart.md"))?;

    let json = site.resolve_json("free-pro-team@latest", &["getting_started"])?;
    assert_eq!(json["featuredTrack"]["guides"].as_array().map(Vec::len), Some(1));

    site.resolve("free-pro-team@latest", &["--strict", "getting_started"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Guide page not found: /actions/learn/quickstart"));
    Ok(())
}

#[test]
fn test_resolve_templated_names_and_titles() -> Result<()> {
    let builder = SiteFixture::builder()?
        .with_tracks(
            "pages",
            "publish:\n  title: '{% if currentLanguage == \"en\" %}Publish{% endif %} &amp; <b>share</b>'\n  guides: [/pages/publish]\n",
        )
        .with_page("pages/publish", "title: Publishing");
    let site = TestSite::from_builder(builder)?;

    let output = site
        .command()
        .args(["resolve", "--product", "pages", "--version", "free-pro-team@latest", "--format", "json"])
        .arg("{% if plan == 'fpt' %}publish{% endif %}")
        .output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(track_names(&json), vec!["publish"]);
    assert_eq!(json["learningTracks"][0]["title"], "Publish &amp; share");
    Ok(())
}
