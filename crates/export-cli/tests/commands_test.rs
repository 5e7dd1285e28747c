//! Commands driven through the parsed command line.

use clap::Parser;
use flate2::read::GzDecoder;
use rsocket_export_cli::cli::Cli;
use rsocket_export_cli::{execute, exit_code_for};
use rsocket_export_core::ExportConfig;
use rsocket_export_core::cli::{ExitCode, OutputFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/account_service.json")
}

fn run(args: &[&str]) -> anyhow::Result<ExitCode> {
    let cli = Cli::try_parse_from(args)?;
    execute(cli, &ExportConfig::default(), OutputFormat::Json)
}

#[test]
fn test_generate_directory() {
    let out = TempDir::new().unwrap();
    let fixture = fixture();

    let code = run(&[
        "rsocket-export",
        "generate",
        fixture.to_str().unwrap(),
        "--output",
        out.path().to_str().unwrap(),
        "--version",
        "2024.05.01",
    ])
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let dir = out.path().join("AccountService");
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("package.json")).unwrap()).unwrap();
    assert_eq!(manifest["name"], "@UserService/AccountService");
    assert_eq!(manifest["version"], "2024.05.01");
    assert_eq!(
        manifest["description"],
        "npm package to call RSocket AccountService from rsocket-app App"
    );
    assert!(dir.join("index.js").exists());
    assert!(dir.join("index.d.ts").exists());
}

#[test]
fn test_generate_archive_overrides() {
    let out = TempDir::new().unwrap();
    let tarball = out.path().join("account.tgz");
    let fixture = fixture();

    run(&[
        "rsocket-export",
        "generate",
        fixture.to_str().unwrap(),
        "--archive",
        tarball.to_str().unwrap(),
        "--package-name",
        "@demo/AccountService",
        "--description",
        "demo client",
        "--no-declarations",
    ])
    .unwrap();

    let mut archive = tar::Archive::new(GzDecoder::new(fs::File::open(&tarball).unwrap()));
    let names: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["AccountService/package.json", "AccountService/index.js"]);
}

#[test]
fn test_generate_alphabetical_orders_methods() {
    let out = TempDir::new().unwrap();
    let fixture = fixture();

    run(&[
        "rsocket-export",
        "generate",
        fixture.to_str().unwrap(),
        "--output",
        out.path().to_str().unwrap(),
        "--alphabetical",
    ])
    .unwrap();

    let js = fs::read_to_string(out.path().join("AccountService/index.js")).unwrap();
    let find_all = js.find("    findAll(").unwrap();
    let find_by_id = js.find("    findById(").unwrap();
    let touch = js.find("    touch(").unwrap();
    assert!(find_all < find_by_id);
    assert!(find_by_id < touch);
}

#[test]
fn test_inspect() {
    let fixture = fixture();
    let code = run(&["rsocket-export", "inspect", fixture.to_str().unwrap()]).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn test_service_without_methods_exits_not_found() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("idle.toml");
    fs::write(
        &doc,
        "type_name = \"org.demo.IdleServiceImpl\"\nroute = \"org.demo.IdleService\"\n",
    )
    .unwrap();

    let err = run(&[
        "rsocket-export",
        "generate",
        doc.to_str().unwrap(),
        "--output",
        dir.path().to_str().unwrap(),
    ])
    .unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::NOT_FOUND);
    assert!(!dir.path().join("IdleService").exists());
}

#[test]
fn test_invalid_package_name_exits_invalid_input() {
    let dir = TempDir::new().unwrap();
    let fixture = fixture();

    let err = run(&[
        "rsocket-export",
        "generate",
        fixture.to_str().unwrap(),
        "--output",
        dir.path().to_str().unwrap(),
        "--package-name",
        "not a name",
    ])
    .unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
}
