use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Server, ServerGuard};
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

const RELEASES_PATH: &str = "/repos/Smaehtin/fenix/releases";

fn releases_body(url: &str) -> String {
    format!(
        r#"[{{"assets":[{{"id":42,"name":"beta.apk","browser_download_url":"{}/beta.apk"}}]}}]"#,
        url
    )
}

fn mock_releases(server: &mut ServerGuard) -> mockito::Mock {
    let body = releases_body(&server.url());
    server
        .mock("GET", RELEASES_PATH)
        .match_header("accept", "application/vnd.github.v3+json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

/// A fenix-fetch invocation isolated from the caller's environment.
fn fenix_fetch(home: &Path, api_url: &str) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("fenix-fetch"));
    cmd.env("HOME", home)
        .env("RUST_LOG", "info")
        .env_remove("FENIX_FETCH_REPO")
        .env_remove("FENIX_FETCH_DOWNLOAD_DIR")
        .env_remove("FENIX_FETCH_MARKER")
        .arg("--api-url")
        .arg(api_url);
    cmd
}

#[test]
fn test_download_then_skip() {
    let mut server = Server::new();
    let url = server.url();

    let _releases = mock_releases(&mut server);
    let download = server
        .mock("GET", "/beta.apk")
        .with_status(200)
        .with_body("apk bytes")
        .expect(1)
        .create();

    let home = tempdir().unwrap();

    // First run: nothing recorded yet
    fenix_fetch(home.path(), &url)
        .arg("download")
        .assert()
        .success()
        .stderr(predicates::str::contains("Found release asset, id=42, name=beta.apk"));

    let apk = home.path().join("storage/downloads/fenix/beta.apk");
    assert_eq!(std::fs::read(&apk).unwrap(), b"apk bytes");
    assert_eq!(
        std::fs::read_to_string(home.path().join(".last_fenix_download_id")).unwrap(),
        "42"
    );

    // Second run: same latest asset, nothing new
    fenix_fetch(home.path(), &url)
        .arg("download")
        .assert()
        .code(1)
        .stderr(predicates::str::contains("matches last downloaded asset"));

    download.assert();
}

#[test]
fn test_default_log_filter_hides_span_records() {
    let mut server = Server::new();
    let url = server.url();

    let _releases = mock_releases(&mut server);
    let _download = server
        .mock("GET", "/beta.apk")
        .with_status(200)
        .with_body("apk bytes")
        .create();

    let home = tempdir().unwrap();

    fenix_fetch(home.path(), &url)
        .env_remove("RUST_LOG")
        .arg("download")
        .assert()
        .success()
        .stderr(predicate::str::contains("Found release asset, id=42"))
        .stderr(predicate::str::contains("run; options=").not())
        .stderr(predicate::str::contains("tracing::span").not());
}

#[test]
fn test_existing_marker_skips_download() {
    let mut server = Server::new();
    let url = server.url();

    let _releases = mock_releases(&mut server);
    let download = server.mock("GET", "/beta.apk").expect(0).create();

    let home = tempdir().unwrap();
    std::fs::write(home.path().join(".last_fenix_download_id"), "42").unwrap();

    fenix_fetch(home.path(), &url)
        .arg("download")
        .assert()
        .code(1);

    download.assert();
    assert!(!home.path().join("storage").exists());
}

#[test]
fn test_stale_marker_downloads_and_updates() {
    let mut server = Server::new();
    let url = server.url();

    let _releases = mock_releases(&mut server);
    let _download = server
        .mock("GET", "/beta.apk")
        .with_status(200)
        .with_body("new build")
        .create();

    let home = tempdir().unwrap();
    let marker = home.path().join(".last_fenix_download_id");
    std::fs::write(&marker, "41").unwrap();

    fenix_fetch(home.path(), &url)
        .arg("download")
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&marker).unwrap(), "42");
}

#[test]
fn test_force_downloads_despite_marker() {
    let mut server = Server::new();
    let url = server.url();

    let _releases = mock_releases(&mut server);
    let download = server
        .mock("GET", "/beta.apk")
        .with_status(200)
        .with_body("apk")
        .expect(1)
        .create();

    let home = tempdir().unwrap();
    std::fs::write(home.path().join(".last_fenix_download_id"), "42").unwrap();

    fenix_fetch(home.path(), &url)
        .arg("download")
        .arg("--force")
        .assert()
        .success();

    download.assert();
    assert!(home.path().join("storage/downloads/fenix/beta.apk").exists());
}

#[test]
fn test_download_not_found() {
    let mut server = Server::new();
    let url = server.url();

    let _releases = mock_releases(&mut server);
    let _download = server.mock("GET", "/beta.apk").with_status(404).create();

    let home = tempdir().unwrap();

    fenix_fetch(home.path(), &url)
        .arg("download")
        .assert()
        .code(2)
        .stderr(predicates::str::contains(format!(
            "Unable to download {}/beta.apk, status code: 404",
            url
        )));

    assert!(!home.path().join("storage/downloads/fenix/beta.apk").exists());
    assert!(!home.path().join(".last_fenix_download_id").exists());
}

#[test]
fn test_empty_release_list_fails() {
    let mut server = Server::new();
    let url = server.url();

    let _releases = server
        .mock("GET", RELEASES_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let home = tempdir().unwrap();

    fenix_fetch(home.path(), &url)
        .arg("download")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("No releases found for Smaehtin/fenix"));

    assert!(!home.path().join(".last_fenix_download_id").exists());
}

#[test]
fn test_server_filename_and_custom_dir() {
    let mut server = Server::new();
    let url = server.url();

    let _releases = mock_releases(&mut server);
    let _download = server
        .mock("GET", "/beta.apk")
        .with_status(200)
        .with_header(
            "content-disposition",
            "attachment; filename=\"fenix-beta-120.apk\"",
        )
        .with_body("apk")
        .create();

    let home = tempdir().unwrap();
    let target = tempdir().unwrap();
    let download_dir = target.path().join("nested/dir");

    fenix_fetch(home.path(), &url)
        .arg("download")
        .arg("--server-filename")
        .arg("--download-dir")
        .arg(&download_dir)
        .assert()
        .success();

    assert!(download_dir.join("fenix-beta-120.apk").exists());
    assert!(!download_dir.join("beta.apk").exists());
}

#[test]
fn test_install_does_not_touch_marker() {
    let mut server = Server::new();
    let url = server.url();

    let _releases = mock_releases(&mut server);
    let download = server
        .mock("GET", "/beta.apk")
        .with_status(200)
        .with_body("apk")
        .expect(2)
        .create();

    let home = tempdir().unwrap();
    let marker = home.path().join(".last_fenix_download_id");
    std::fs::write(&marker, "42").unwrap();

    // No dedup: both runs download
    for _ in 0..2 {
        fenix_fetch(home.path(), &url)
            .arg("install")
            .arg("--no-share")
            .assert()
            .success();
    }

    download.assert();
    assert!(home.path().join("storage/downloads/fenix/beta.apk").exists());
    assert_eq!(std::fs::read_to_string(&marker).unwrap(), "42");
}

#[test]
fn test_custom_repo_is_queried() {
    let mut server = Server::new();
    let url = server.url();

    let releases = server
        .mock("GET", "/repos/someone/fork/releases")
        .match_header("user-agent", Matcher::Regex("fenix-fetch".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(releases_body(&url))
        .create();
    let _download = server
        .mock("GET", "/beta.apk")
        .with_status(200)
        .with_body("apk")
        .create();

    let home = tempdir().unwrap();

    fenix_fetch(home.path(), &url)
        .arg("--repo")
        .arg("someone/fork")
        .arg("download")
        .assert()
        .success();

    releases.assert();
}

#[test]
fn test_latest_release_metadata_is_logged() {
    let mut server = Server::new();
    let url = server.url();

    let body = format!(
        r#"[{{"tag_name":"v2.0-beta","prerelease":true,"published_at":"2024-05-01T10:00:00Z","assets":[{{"id":42,"name":"beta.apk","browser_download_url":"{}/beta.apk"}}]}}]"#,
        url
    );
    let _releases = server
        .mock("GET", RELEASES_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create();
    let _download = server
        .mock("GET", "/beta.apk")
        .with_status(200)
        .with_body("apk")
        .create();

    let home = tempdir().unwrap();

    fenix_fetch(home.path(), &url)
        .arg("download")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Latest release v2.0-beta (pre-release), published 2024-05-01T10:00:00Z",
        ));
}
