//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a paginated listing and detail records
//! and run the full discover, fetch, write cycle end-to-end.

use dex_harvest::config::{Config, HarvestConfig, OutputConfig, PoolStrategy, SourceConfig};
use dex_harvest::harvest::{harvest, Harvester};
use dex_harvest::{ConfigError, HarvestError, RemoteError};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_SIZE: u32 = 20;

/// Creates a test configuration pointed at the mock server
fn create_test_config(
    base_url: &str,
    item_count: usize,
    worker_count: usize,
    strategy: PoolStrategy,
    csv_path: &Path,
) -> Config {
    Config {
        source: SourceConfig {
            listing_url: format!("{}/api/v2/pokemon", base_url),
            user_agent: "TestHarvester/1.0".to_string(),
        },
        harvest: HarvestConfig {
            item_count,
            worker_count,
            strategy,
        },
        output: OutputConfig {
            csv_path: csv_path.to_string_lossy().into_owned(),
        },
    }
}

fn page_path(page: u32) -> String {
    if page == 1 {
        "/api/v2/pokemon".to_string()
    } else {
        format!("/api/v2/pokemon/page-{}", page)
    }
}

fn detail_body(id: u32) -> Value {
    match id {
        1 => json!({
            "id": 1,
            "name": "bulbasaur",
            "types": [
                {"slot": 1, "type": {"name": "grass"}},
                {"slot": 2, "type": {"name": "poison"}}
            ]
        }),
        25 => json!({
            "id": 25,
            "name": "pikachu",
            "types": [{"slot": 1, "type": {"name": "electric"}}]
        }),
        _ if id % 2 == 0 => json!({
            "id": id,
            "name": format!("mon-{}", id),
            "types": [{"type": {"name": "normal"}}, {"type": {"name": "flying"}}]
        }),
        _ => json!({
            "id": id,
            "name": format!("mon-{}", id),
            "types": [{"type": {"name": "normal"}}]
        }),
    }
}

/// Mounts `pages` listing pages of PAGE_SIZE items each
///
/// `expected` gives the exact number of calls each page must receive.
async fn mount_listing(server: &MockServer, expected: &[u64]) {
    let base = server.uri();
    let pages = expected.len() as u32;

    for (i, &calls) in expected.iter().enumerate() {
        let page = i as u32 + 1;
        let first = (page - 1) * PAGE_SIZE + 1;
        let results: Vec<Value> = (first..first + PAGE_SIZE)
            .map(|id| {
                json!({
                    "name": format!("mon-{}", id),
                    "url": format!("{}/api/v2/pokemon/{}/", base, id)
                })
            })
            .collect();
        let next = if page < pages {
            Some(format!("{}{}", base, page_path(page + 1)))
        } else {
            None
        };

        Mock::given(method("GET"))
            .and(path(page_path(page)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "next": next, "results": results })),
            )
            .expect(calls)
            .mount(server)
            .await;
    }
}

/// Mounts detail records for `ids`, each expected to be fetched `calls` times
async fn mount_details(server: &MockServer, ids: std::ops::RangeInclusive<u32>, calls: u64) {
    for id in ids {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/pokemon/{}/", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(id)))
            .expect(calls)
            .mount(server)
            .await;
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read output")
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_full_harvest_queue_strategy() {
    let mock_server = MockServer::start().await;

    // 30 items over 20-item pages: page 1 in full, half of page 2, never page 3
    mount_listing(&mock_server, &[1, 1, 0]).await;
    mount_details(&mock_server, 1..=30, 1).await;
    mount_details(&mock_server, 31..=60, 0).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("pokemon.csv");
    let config = create_test_config(&mock_server.uri(), 30, 3, PoolStrategy::Queue, &csv_path);

    let summary = harvest(config).await.expect("Harvest failed");
    assert_eq!(summary.urls_discovered, 30);
    assert_eq!(summary.records_written, 30);

    let lines = read_lines(&csv_path);
    assert_eq!(lines[0], "id,name,type_1,type_2");
    assert_eq!(lines.len(), 31);
    assert!(lines.contains(&"1,bulbasaur,grass,poison".to_string()));
    assert!(lines.contains(&"25,pikachu,electric,".to_string()));
    assert!(lines.contains(&"2,mon-2,normal,flying".to_string()));
    assert!(lines.contains(&"3,mon-3,normal,".to_string()));

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let ids: HashSet<i64> = reader
        .records()
        .map(|r| r.unwrap()[0].parse().unwrap())
        .collect();
    assert_eq!(ids, (1..=30).collect());
}

#[tokio::test]
async fn test_full_harvest_map_strategy_keeps_listing_order() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, &[1, 1, 0]).await;
    mount_details(&mock_server, 1..=30, 1).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("pokemon.csv");
    let config = create_test_config(&mock_server.uri(), 30, 4, PoolStrategy::Map, &csv_path);

    Harvester::new(config)
        .expect("Failed to create harvester")
        .run()
        .await
        .expect("Harvest failed");

    let lines = read_lines(&csv_path);
    assert_eq!(lines.len(), 31);
    assert_eq!(lines[1], "1,bulbasaur,grass,poison");
    assert_eq!(lines[25], "25,pikachu,electric,");

    let ids: Vec<i64> = lines[1..]
        .iter()
        .map(|line| line.split(',').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(ids, (1..=30).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_more_workers_than_items() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, &[1]).await;
    mount_details(&mock_server, 1..=2, 1).await;
    mount_details(&mock_server, 3..=20, 0).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("pokemon.csv");
    let config = create_test_config(&mock_server.uri(), 2, 10, PoolStrategy::Queue, &csv_path);

    let summary = harvest(config).await.expect("Harvest failed");
    assert_eq!(summary.records_written, 2);
    assert_eq!(read_lines(&csv_path).len(), 3);
}

#[tokio::test]
async fn test_listing_server_error_aborts_before_write() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("pokemon.csv");
    let config = create_test_config(&mock_server.uri(), 30, 3, PoolStrategy::Queue, &csv_path);

    let result = harvest(config).await;
    assert!(matches!(
        result,
        Err(HarvestError::Remote(RemoteError::Status { status: 500, .. }))
    ));
    assert!(!csv_path.exists(), "No output should be written");
}

#[tokio::test]
async fn test_detail_failure_aborts_before_write() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, &[1]).await;
    // Whether 1..=4 are fetched before the failure depends on scheduling
    for id in 1..=4 {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/pokemon/{}/", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(id)))
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/5/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("pokemon.csv");
    let config = create_test_config(&mock_server.uri(), 5, 2, PoolStrategy::Queue, &csv_path);

    let result = harvest(config).await;
    assert!(matches!(
        result,
        Err(HarvestError::Remote(RemoteError::Status { status: 500, .. }))
    ));
    assert!(!csv_path.exists(), "No output should be written");
}

#[tokio::test]
async fn test_malformed_detail_aborts() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, &[1]).await;

    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/1/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "name": "bulbasaur" })),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("pokemon.csv");
    let config = create_test_config(&mock_server.uri(), 1, 1, PoolStrategy::Map, &csv_path);

    let result = harvest(config).await;
    assert!(matches!(
        result,
        Err(HarvestError::Remote(RemoteError::Decode { .. }))
    ));
    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_unwritable_output_is_output_error() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, &[1]).await;
    mount_details(&mock_server, 1..=3, 1).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("no-such-dir").join("pokemon.csv");
    let config = create_test_config(&mock_server.uri(), 3, 3, PoolStrategy::Queue, &csv_path);

    let result = harvest(config).await;
    assert!(matches!(result, Err(HarvestError::Output(_))));
}

#[tokio::test]
async fn test_invalid_config_rejected_before_any_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("pokemon.csv");

    for (item_count, worker_count) in [(0, 3), (30, 0), (30, 500)] {
        let config = create_test_config(
            &mock_server.uri(),
            item_count,
            worker_count,
            PoolStrategy::Queue,
            &csv_path,
        );

        let result = harvest(config).await;
        assert!(
            matches!(
                result,
                Err(HarvestError::Config(ConfigError::Validation(_)))
            ),
            "item_count={} worker_count={} was accepted",
            item_count,
            worker_count
        );
    }

    assert!(!csv_path.exists(), "No output should be written");
}
