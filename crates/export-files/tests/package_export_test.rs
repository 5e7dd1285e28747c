//! Generated packages written to disk and packed as tarballs.

use flate2::read::GzDecoder;
use rsocket_export_codegen::{ExportGenerator, GeneratedCode, PackageSpec};
use rsocket_export_core::{PackageName, PackageVersion};
use rsocket_export_files::{ArchiveOptions, FilesBuilder, archive_generated_code};
use rsocket_export_introspector::{Introspector, ServiceReflection};
use std::io::Read;
use tempfile::TempDir;

const ACCOUNT_SERVICE: &str = include_str!("fixtures/account_service.json");

fn generate(declarations: bool) -> GeneratedCode {
    let doc = ServiceReflection::from_json_str(ACCOUNT_SERVICE).unwrap();
    let contract = Introspector::new().introspect(&doc).unwrap();
    let spec = PackageSpec::new(
        PackageName::new("@UserService/AccountService").unwrap(),
        PackageVersion::new("2024.05.01"),
    )
    .with_declarations(declarations);
    ExportGenerator::new().unwrap().generate(&contract, &spec).unwrap()
}

fn unpack(bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            (name, content)
        })
        .collect()
}

#[test]
fn test_archive_layout() {
    let code = generate(true);
    let bytes = archive_generated_code(code.clone(), &ArchiveOptions::default()).unwrap();
    let entries = unpack(&bytes);

    let names: Vec<_> = entries.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        [
            "AccountService/package.json",
            "AccountService/index.js",
            "AccountService/index.d.ts"
        ]
    );

    for ((_, content), file) in entries.iter().zip(code.files()) {
        assert_eq!(content, file.content());
    }
}

#[test]
fn test_archive_without_declarations() {
    let bytes = archive_generated_code(generate(false), &ArchiveOptions::default()).unwrap();
    let entries = unpack(&bytes);

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|(name, _)| !name.ends_with(".d.ts")));
    assert!(!entries[0].1.contains("\"types\""));
}

#[test]
fn test_archive_is_reproducible() {
    let options = ArchiveOptions::default();
    let first = archive_generated_code(generate(true), &options).unwrap();
    let second = archive_generated_code(generate(true), &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_export_to_directory() {
    let temp = TempDir::new().unwrap();
    let code = generate(true);

    let fs = FilesBuilder::from_generated_code(code.clone(), "/")
        .build_and_export(temp.path())
        .unwrap();
    assert_eq!(fs.file_count(), 3);

    for file in code.files() {
        let on_disk = std::fs::read_to_string(temp.path().join(file.path())).unwrap();
        assert_eq!(on_disk, file.content());
    }
}
