use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::Server;
use tempfile::tempdir;

fn latest_release_body(url: &str) -> String {
    format!(
        r#"{{
            "tag_name": "v1.2.3",
            "assets": [
                {{
                    "name": "app-1.2.3-arm64.dmg",
                    "size": 1048576,
                    "browser_download_url": "{url}/download/v1.2.3/app-1.2.3-arm64.dmg"
                }},
                {{
                    "name": "app-1.2.3-ia32-win.zip",
                    "size": 2097152,
                    "browser_download_url": "{url}/download/v1.2.3/app-1.2.3-ia32-win.zip"
                }},
                {{
                    "name": "app-1.2.3-arm64.AppImage",
                    "size": 3145728,
                    "browser_download_url": "{url}/download/v1.2.3/app-1.2.3-arm64.AppImage"
                }}
            ]
        }}"#
    )
}

fn ghrr() -> Command {
    Command::new(cargo::cargo_bin!("ghrr"))
}

#[test]
fn test_resolve_for_each_platform() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(latest_release_body(&url))
        .create();

    for (platform, label, asset) in [
        ("mac", "macOS", "app-1.2.3-arm64.dmg"),
        ("windows", "Windows", "app-1.2.3-ia32-win.zip"),
        ("linux", "Linux", "app-1.2.3-arm64.AppImage"),
    ] {
        ghrr()
            .arg("resolve")
            .arg("--platform")
            .arg(platform)
            .arg("--repo")
            .arg("owner/repo")
            .arg("--api-url")
            .arg(&url)
            .assert()
            .success()
            .stdout(predicates::str::contains(format!("Download for {}", label)))
            .stdout(predicates::str::contains(format!(
                "{}/download/v1.2.3/{}",
                url, asset
            )));
    }
}

#[test]
fn test_resolve_detects_platform_from_os_family() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(latest_release_body(&url))
        .create();

    ghrr()
        .arg("resolve")
        .arg("--os-family")
        .arg("Windows Server 2008 R2 / 7")
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicates::str::contains("Download for Windows"))
        .stdout(predicates::str::contains("app-1.2.3-ia32-win.zip"));
}

#[test]
fn test_resolve_unknown_family_uses_releases_page() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(latest_release_body(&url))
        .create();

    ghrr()
        .arg("resolve")
        .arg("--os-family")
        .arg("Haiku")
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicates::str::contains("Download for Download"))
        .stdout(predicates::str::contains(
            "https://github.com/owner/repo/releases",
        ));
}

#[test]
fn test_resolve_falls_back_to_release_list() {
    let mut server = Server::new();
    let url = server.url();

    // No release is tagged latest yet
    let mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(404)
        .expect(1)
        .create();

    let mock_releases = server
        .mock("GET", "/repos/owner/repo/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"[{}, {{"tag_name": "v1.0.0", "assets": []}}]"#,
            latest_release_body(&url)
        ))
        .expect(1)
        .create();

    ghrr()
        .arg("resolve")
        .arg("--platform")
        .arg("mac")
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicates::str::contains("app-1.2.3-arm64.dmg"));

    mock_latest.assert();
    mock_releases.assert();
}

#[test]
fn test_resolve_survives_api_outage() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(500)
        .create();

    let _mock_releases = server
        .mock("GET", "/repos/owner/repo/releases")
        .with_status(500)
        .create();

    // Both lookups fail; the command still succeeds with the static URL
    ghrr()
        .arg("resolve")
        .arg("--platform")
        .arg("linux")
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "https://github.com/owner/repo/releases",
        ));
}

#[test]
fn test_resolve_mobile_prints_notice_without_fetching() {
    ghrr()
        .arg("resolve")
        .arg("--os-family")
        .arg("Linux")
        .arg("--user-agent")
        .arg("Mozilla/5.0 (Linux; Android 14) Mobile Safari")
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg("http://127.0.0.1:1") // would fail if contacted
        .assert()
        .success()
        .stdout(predicates::str::contains("desktop application"))
        .stdout(predicates::str::contains("https://github.com/owner/repo"));
}

#[test]
fn test_latest_lists_assets() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(latest_release_body(&url))
        .create();

    ghrr()
        .arg("latest")
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicates::str::contains("Release: v1.2.3"))
        .stdout(predicates::str::contains("app-1.2.3-arm64.dmg (1.00 MB)"))
        .stdout(predicates::str::contains("app-1.2.3-arm64.AppImage"));
}

#[test]
fn test_latest_json_output() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(latest_release_body(&url))
        .create();

    ghrr()
        .arg("latest")
        .arg("--json")
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicates::str::contains("\"tag_name\": \"v1.2.3\""))
        .stdout(predicates::str::contains("browser_download_url"));
}

#[test]
fn test_check_passes_when_all_assets_reachable() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(latest_release_body(&url))
        .create();

    let _head_mocks: Vec<_> = [
        "/download/v1.2.3/app-1.2.3-arm64.dmg",
        "/download/v1.2.3/app-1.2.3-ia32-win.zip",
        "/download/v1.2.3/app-1.2.3-arm64.AppImage",
    ]
    .iter()
    .map(|path| server.mock("HEAD", *path).with_status(200).create())
    .collect();

    ghrr()
        .arg("check")
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicates::str::contains("All platform downloads are working"));
}

#[test]
fn test_check_fails_on_missing_platform_asset() {
    let mut server = Server::new();
    let url = server.url();

    // Only a mac asset was published
    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{
                "tag_name": "v1.2.3",
                "assets": [
                    {{
                        "name": "app-1.2.3-arm64.dmg",
                        "size": 1048576,
                        "browser_download_url": "{url}/download/v1.2.3/app-1.2.3-arm64.dmg"
                    }}
                ]
            }}"#
        ))
        .create();

    let _head_mock = server
        .mock("HEAD", "/download/v1.2.3/app-1.2.3-arm64.dmg")
        .with_status(200)
        .create();

    ghrr()
        .arg("check")
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .failure()
        .stdout(predicates::str::contains("no matching asset"))
        .stderr(predicates::str::contains("broken"));
}

#[test]
fn test_check_fails_on_unreachable_asset() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(latest_release_body(&url))
        .create();

    let _head_ok: Vec<_> = [
        "/download/v1.2.3/app-1.2.3-arm64.dmg",
        "/download/v1.2.3/app-1.2.3-ia32-win.zip",
    ]
    .iter()
    .map(|path| server.mock("HEAD", *path).with_status(200).create())
    .collect();

    let _head_gone = server
        .mock("HEAD", "/download/v1.2.3/app-1.2.3-arm64.AppImage")
        .with_status(404)
        .create();

    ghrr()
        .arg("check")
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .failure()
        .stdout(predicates::str::contains("not accessible (HTTP 404)"));
}

#[test]
fn test_download_writes_asset_to_disk() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(latest_release_body(&url))
        .create();

    let _mock_download = server
        .mock("GET", "/download/v1.2.3/app-1.2.3-arm64.AppImage")
        .with_status(200)
        .with_body("appimage bytes")
        .create();

    let out_dir = tempdir().unwrap();
    let dest = out_dir.path().join("app.AppImage");

    ghrr()
        .arg("download")
        .arg("--platform")
        .arg("linux")
        .arg("--output")
        .arg(&dest)
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicates::str::contains("Saved app-1.2.3-arm64.AppImage"));

    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "appimage bytes");
}

#[test]
fn test_download_mac_prints_gatekeeper_notice() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(latest_release_body(&url))
        .create();

    let _mock_download = server
        .mock("GET", "/download/v1.2.3/app-1.2.3-arm64.dmg")
        .with_status(200)
        .with_body("dmg bytes")
        .create();

    let out_dir = tempdir().unwrap();
    let dest = out_dir.path().join("app.dmg");

    // The quarantine notice is printed before the download, without blocking it
    ghrr()
        .arg("download")
        .arg("--platform")
        .arg("mac")
        .arg("--output")
        .arg(&dest)
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicates::str::contains("xattr -cr /Applications/repo.app"))
        .stdout(predicates::str::contains("Saved app-1.2.3-arm64.dmg"));

    assert!(dest.exists());
}

#[test]
fn test_download_rejects_unknown_platform() {
    ghrr()
        .arg("download")
        .arg("--platform")
        .arg("unknown")
        .arg("--repo")
        .arg("owner/repo")
        .assert()
        .failure()
        .stderr(predicates::str::contains("No download asset"));
}

#[test]
fn test_invalid_repo_format_fails() {
    ghrr()
        .arg("latest")
        .arg("--repo")
        .arg("not-a-repo")
        .assert()
        .failure()
        .stderr(predicates::str::contains("owner/repo"));
}
