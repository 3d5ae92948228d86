use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use sale_tracker_storage::{SeriesStore, SqliteSeriesStore};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn page_with_heading(heading: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(format!("<html><h1>{heading}</h1></html>")),
        )
        .mount(&server)
        .await;
    server
}

fn local_run(server: &MockServer, objects: &Path, scratch: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sale-tracker").unwrap();
    cmd.env_clear()
        .env("TRACKER_DB_FILE", "sales.rrd")
        .env("TRACKER_LOG_FILE", "sales.csv")
        .env("TRACKER_SCRAPE_URL", format!("{}/search", server.uri()))
        .env("TRACKER_BOOTSTRAP_MISSING", "true")
        .env("TRACKER_SCRATCH_DIR", scratch)
        .args(["run", "--local-store"])
        .arg(objects);
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("sale-tracker").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tracks a scraped listing count"));
}

#[test]
fn test_cli_run_help() {
    let mut cmd = Command::cargo_bin("sale-tracker").unwrap();
    cmd.arg("run").arg("--help").assert().success().stdout(predicate::str::contains("local-store"));
}

#[test]
fn test_cli_tail_prints_last_records() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("sales.csv");
    std::fs::write(&log, "100|1\n200|2\n300|3\n").unwrap();

    let mut cmd = Command::cargo_bin("sale-tracker").unwrap();
    cmd.args(["tail", "--log"])
        .arg(&log)
        .args(["-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"timestamp\": 200"))
        .stdout(predicate::str::contains("\"value\": 3"))
        .stdout(predicate::str::contains("\"timestamp\": 100").not());
}

#[test]
fn test_cli_render_missing_db_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("sale-tracker").unwrap();
    cmd.args(["render", "--db"])
        .arg(temp_dir.path().join("absent.rrd"))
        .arg("--out")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("series database not found"));
}

#[test]
fn test_cli_run_without_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("sale-tracker").unwrap();
    cmd.env_clear()
        .args(["run", "--local-store"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("TRACKER_DB_FILE"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_local_run_succeeds_and_publishes() {
    let server = page_with_heading("57 results").await;
    let objects = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();

    local_run(&server, objects.path(), scratch.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"statusCode\": 200"))
        .stdout(predicate::str::contains("Skipping CDN cache invalidation"));

    assert!(objects.path().join("data/sales.rrd").is_file());
    assert_eq!(std::fs::read_to_string(objects.path().join("data/sales.csv")).unwrap().lines().count(), 1);
    for period in ["hour", "day", "week", "month", "year"] {
        assert!(objects.path().join(format!("site/images/{period}_graph.png")).is_file());
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_local_run_without_count_exits_nonzero() {
    let server = page_with_heading("No results").await;
    let objects = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();

    local_run(&server, objects.path(), scratch.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"statusCode\": 500"))
        .stdout(predicate::str::contains(server.uri()));

    assert!(!objects.path().join("data").exists());
}

#[test]
fn test_cli_render_lists_five_charts() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("sales.rrd");
    {
        let mut store = SqliteSeriesStore::open(&db).unwrap();
        store.update(1_700_000_000, 40).unwrap();
        store.update(1_700_000_600, 57).unwrap();
    }
    let out = temp_dir.path().join("charts");

    let mut cmd = Command::cargo_bin("sale-tracker").unwrap();
    let assert = cmd.args(["render", "--db"]).arg(&db).arg("--out").arg(&out).assert().success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let listed: Vec<&str> = stdout.lines().filter(|l| l.ends_with("_graph.png")).collect();
    assert_eq!(listed.len(), 5);
    for period in ["hour", "day", "week", "month", "year"] {
        assert!(out.join(format!("{period}_graph.png")).is_file());
    }
}
