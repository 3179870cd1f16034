//! Sample site content shared by tests

use anyhow::Result;

use super::builder::SiteFixture;
use crate::config::{PlanConfig, SiteConfig};

/// Configuration with three plans and two languages.
///
/// Versions: `free-pro-team@latest`, `enterprise-cloud@latest`,
/// `enterprise-server@3.10`, `enterprise-server@3.9`.
pub fn sample_config() -> SiteConfig {
    SiteConfig {
        languages: vec!["ja".to_string()],
        plans: vec![
            PlanConfig {
                name: "free-pro-team".to_string(),
                short_name: "fpt".to_string(),
                releases: vec!["latest".to_string()],
            },
            PlanConfig {
                name: "enterprise-cloud".to_string(),
                short_name: "ghec".to_string(),
                releases: vec!["latest".to_string()],
            },
            PlanConfig {
                name: "enterprise-server".to_string(),
                short_name: "ghes".to_string(),
                releases: vec!["3.10".to_string(), "3.9".to_string()],
            },
        ],
        ..SiteConfig::default()
    }
}

/// Track data for the `actions` product.
///
/// - `getting_started`: featured, every version
/// - `deployment`: every version; its second guide exists on ghes only
/// - `self_hosted`: ghes and ghec only
/// - `server_admin`: ghes 3.10 only, featured there
pub const ACTIONS_TRACKS: &str = r#"
getting_started:
  title: Get started with Actions
  description: Learn the basics.
  featured_track: true
  guides:
    - /actions/learn/understanding-actions
    - /actions/learn/quickstart
deployment:
  title: '{% if ghes %}Deploy from your server{% else %}Deploy to the cloud{% endif %}'
  description: Ship code.
  guides:
    - /actions/deploy/about-deployments
    - /actions/deploy/server-environments
self_hosted:
  title: Self-hosted runners
  description: Run jobs on your own machines.
  versions: 'ghes or ghec'
  guides:
    - /actions/hosting/about-self-hosted-runners
server_admin:
  title: Administer Actions
  description: For site administrators.
  featured_track: '{% if ghes %}true{% endif %}'
  versions:
    ghes: '>=3.10'
  guides:
    - /actions/hosting/about-self-hosted-runners
"#;

/// Japanese translation of one `actions` track.
pub const ACTIONS_TRACKS_JA: &str = r#"
getting_started:
  title: Actions を始める
  description: 基本を学ぶ。
  featured_track: true
  guides:
    - /actions/learn/understanding-actions
    - /actions/learn/quickstart
"#;

/// A fully populated sample site: configuration, `actions` tracks, pages, and
/// a landing page at `content/actions/index.md`.
pub fn sample_site() -> Result<SiteFixture> {
    SiteFixture::builder()?
        .with_config(sample_config())
        .with_tracks("actions", ACTIONS_TRACKS)
        .with_translated_tracks("ja", "actions", ACTIONS_TRACKS_JA)
        .with_page("actions/learn/understanding-actions", "title: Understanding Actions\nintro: The <em>core</em> concepts.\nversions: '*'")
        .with_page("actions/learn/quickstart", "title: Quickstart\nversions: '*'")
        .with_translated_page("ja", "actions/learn/quickstart", "title: クイックスタート")
        .with_page("actions/deploy/about-deployments", "title: About deployments\nversions: '*'")
        .with_page("actions/deploy/server-environments", "title: Server environments\nversions: 'ghes'")
        .with_page("actions/hosting/about-self-hosted-runners", "title: About self-hosted runners\nversions:\n  ghes: '*'\n  ghec: '*'")
        .with_file(
            "content/actions/index.md",
            "---\ntitle: Actions\nlearningTracks:\n  - getting_started\n  - deployment\n  - '{% if ghes %}self_hosted{% endif %}'\n  - server_admin\n---\n",
        )
        .build()
}
