//! Tests for `doctracks list`

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestSite;
use doctracks::test_utils::SiteFixture;

#[test]
fn test_list_product_text() -> Result<()> {
    let site = TestSite::sample()?;

    site.command()
        .args(["list", "--product", "actions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("actions/getting_started *  Get started with Actions (2 guides)"))
        .stdout(predicate::str::contains("actions/self_hosted  Self-hosted runners (1 guides)"))
        .stdout(predicate::str::contains("actions/server_admin *?  Administer Actions (1 guides)"));
    Ok(())
}

#[test]
fn test_list_json_is_sorted() -> Result<()> {
    let site = TestSite::sample()?;

    let output = site.command().args(["list", "--format", "json"]).output()?;
    assert!(output.status.success());

    let entries: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout)?;
    let names: Vec<_> = entries.iter().filter_map(|e| e["name"].as_str()).collect();
    assert_eq!(names, vec!["deployment", "getting_started", "self_hosted", "server_admin"]);
    assert_eq!(entries[1]["featured"], "always");
    assert_eq!(entries[0]["featured"], "never");
    // templated flag
    assert_eq!(entries[3]["featured"], "conditional");
    Ok(())
}

#[test]
fn test_list_empty_site() -> Result<()> {
    let site = TestSite::from_builder(SiteFixture::builder()?)?;

    site.command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No learning tracks found."));
    Ok(())
}

#[test]
fn test_list_malformed_data_file() -> Result<()> {
    let site = TestSite::sample()?;
    site.write("data/learning-tracks/actions.yml", "getting_started: [unclosed")?;

    site.command()
        .args(["list", "--product", "actions"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid content file"));
    Ok(())
}
