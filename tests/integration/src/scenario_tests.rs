//! Whole-resolution properties: fetch counts, precedence, repeatability,
//! concurrent use and serialized output

use std::sync::Arc;

use pretty_assertions::assert_eq;
use repo_config::{ConfigClient, ConfigRequest, Configuration, FileLocation, resolve_config};
use repo_test_utils::MockFetcher;
use serde_json::{Value, json};

const APP: &str = ".github/my-app.yml";

fn url(owner: &str, repo: &str, path: &str) -> String {
    MockFetcher::new().url_for(owner, repo, path)
}

fn config(value: Value) -> Configuration {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn three_file_chain() -> MockFetcher {
    MockFetcher::new()
        .respond(url("octocat", "hello-world", APP), "level: repo\nrepo: 1\n_extends: org")
        .respond(url("octocat", "org", APP), "level: org\norg: 1\n_extends: root")
        .respond(url("octocat", "root", APP), "level: root\nroot: 1")
}

#[tokio::test]
async fn test_files_count_matches_fetch_count() {
    let fetcher = three_file_chain();

    let resolved = resolve_config(&fetcher, ConfigRequest::new("octocat", "hello-world", APP))
        .await
        .unwrap();

    assert_eq!(resolved.files.len(), 3);
    assert_eq!(fetcher.call_count(), resolved.files.len());
    assert_eq!(
        fetcher.calls(),
        resolved.files.iter().map(|f| f.url.clone()).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_nearer_file_takes_precedence() {
    let fetcher = three_file_chain();

    let resolved = resolve_config(
        &fetcher,
        ConfigRequest::new("octocat", "hello-world", APP)
            .with_defaults(config(json!({"level": "default", "fallback": true}))),
    )
    .await
    .unwrap();

    assert_eq!(
        resolved.config,
        config(json!({
            "level": "repo",
            "repo": 1,
            "org": 1,
            "root": 1,
            "fallback": true
        }))
    );
}

#[tokio::test]
async fn test_resolution_is_repeatable() {
    let first = resolve_config(
        &three_file_chain(),
        ConfigRequest::new("octocat", "hello-world", APP),
    )
    .await
    .unwrap();
    let second = resolve_config(
        &three_file_chain(),
        ConfigRequest::new("octocat", "hello-world", APP),
    )
    .await
    .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_single_file_round_trip_with_empty_defaults() {
    let content = json!({
        "name": "app",
        "labels": ["bug", "feature"],
        "nested": {"enabled": true, "count": 3}
    });
    let fetcher = MockFetcher::new().respond(
        url("octocat", "hello-world", ".github/my-app.json"),
        content.to_string(),
    );

    let resolved = resolve_config(
        &fetcher,
        ConfigRequest::new("octocat", "hello-world", ".github/my-app.json"),
    )
    .await
    .unwrap();

    assert_eq!(resolved.config, config(content.clone()));
    assert_eq!(resolved.files[0].config, Some(config(content)));
}

#[tokio::test]
async fn test_extends_key_never_reaches_result() {
    let fetcher = three_file_chain();

    let resolved = resolve_config(
        &fetcher,
        ConfigRequest::new("octocat", "hello-world", APP)
            .with_defaults(config(json!({"_extends": "from-defaults"}))),
    )
    .await
    .unwrap();

    assert!(!resolved.config.contains_key("_extends"));
    for file in &resolved.files {
        assert!(!file.config.as_ref().unwrap().contains_key("_extends"));
    }
}

#[tokio::test]
async fn test_concurrent_resolutions_share_a_client() {
    let fetcher = MockFetcher::new()
        .respond(url("octocat", "one", APP), "name: one")
        .respond(url("octocat", "two", APP), "name: two\n_extends: one")
        .respond(url("octocat", "one", APP), "name: one");
    let client = ConfigClient::new(Arc::new(fetcher));

    let (one, two) = tokio::join!(
        client.get(ConfigRequest::new("octocat", "one", APP)),
        client.get(ConfigRequest::new("octocat", "two", APP)),
    );

    assert_eq!(one.unwrap().config, config(json!({"name": "one"})));
    let two = two.unwrap();
    assert_eq!(two.config, config(json!({"name": "two"})));
    assert_eq!(two.files.len(), 2);
    client.fetcher().assert_done();
}

#[tokio::test]
async fn test_legacy_filename_lives_in_github_directory() {
    let fetcher = MockFetcher::new().respond(url("octocat", "hello-world", APP), "legacy: true");

    let resolved = resolve_config(
        &fetcher,
        ConfigRequest::from_filename("octocat", "hello-world", "my-app.yml"),
    )
    .await
    .unwrap();

    assert_eq!(resolved.files[0].path, APP);
    assert_eq!(resolved.config, config(json!({"legacy": true})));
}

#[tokio::test]
async fn test_client_lists_files_without_merging() {
    let fetcher = MockFetcher::new()
        .not_found(url("octocat", "hello-world", APP))
        .respond(url("octocat", ".github", APP), "shared: true");
    let client = ConfigClient::new(fetcher);

    let files = client
        .files(FileLocation::new("octocat", "hello-world", APP))
        .await
        .unwrap();

    assert_eq!(files.len(), 2);
    assert!(!files[0].exists());
    assert!(files[1].exists());
}

#[tokio::test]
async fn test_serialized_result_shape() {
    let fetcher = MockFetcher::new()
        .not_found(format!("{}?ref=dev", url("octocat", "hello-world", APP)))
        .respond(url("octocat", ".github", APP), "shared: true");

    let resolved = resolve_config(
        &fetcher,
        ConfigRequest::new("octocat", "hello-world", APP).with_ref("dev"),
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(&resolved).unwrap(),
        json!({
            "config": {"shared": true},
            "files": [
                {
                    "owner": "octocat",
                    "repo": "hello-world",
                    "path": APP,
                    "ref": "dev",
                    "url": format!("{}?ref=dev", url("octocat", "hello-world", APP)),
                    "config": null
                },
                {
                    "owner": "octocat",
                    "repo": ".github",
                    "path": APP,
                    "url": url("octocat", ".github", APP),
                    "config": {"shared": true}
                }
            ]
        })
    );
}
