mod common;

use common::TestEnv;
use taxtracker_license::LicenseLoader;

// ── Nothing to load ──────────────────────────────────────────────

#[test]
fn empty_directory_yields_none() {
    let env = TestEnv::new();
    let loader = LicenseLoader::new(&env.config.license_dir);
    assert!(loader.load().is_none());
}

#[test]
fn nonexistent_directory_yields_none() {
    let env = TestEnv::new();
    let loader = LicenseLoader::new(env.config.license_dir.join("does-not-exist"));
    assert!(loader.load().is_none());
}

#[test]
fn non_matching_filenames_are_ignored() {
    let env = TestEnv::new();
    env.write_file("readme.txt", "not a license");
    env.write_file("license_2025-01-01.txt", "{}");
    env.write_file("old_license_backup.json.bak", "{}");
    let loader = LicenseLoader::new(&env.config.license_dir);
    assert!(loader.load().is_none());
}

#[test]
fn malformed_json_yields_none() {
    let env = TestEnv::new();
    env.write_file("license_2025-01-01.json", "{ this is not json");
    let loader = LicenseLoader::new(&env.config.license_dir);
    assert!(loader.load().is_none());
}

// ── Selection and parsing ────────────────────────────────────────

#[test]
fn parses_all_record_fields() {
    let env = TestEnv::new();
    let file_name = env.write_license("2025-01-01", "2025-06-30");

    let loader = LicenseLoader::new(&env.config.license_dir);
    let record = loader.load().expect("record should load");

    assert_eq!(record.app_id.as_deref(), Some(common::TEST_APP_ID));
    assert_eq!(record.file_name.as_deref(), Some(file_name.as_str()));
    assert_eq!(record.expires_at.as_deref(), Some("2025-06-30"));
    assert!(record.signature.is_some());
}

#[test]
fn picks_lexicographically_last_filename() {
    let env = TestEnv::new();
    env.write_license("2024-11-05", "2025-01-31");
    env.write_license("2025-03-20", "2025-09-30");
    env.write_license("2025-01-15", "2025-12-31");

    let loader = LicenseLoader::new(&env.config.license_dir);
    let record = loader.load().expect("record should load");

    // Latest issue date wins, even though an earlier file expires later.
    assert_eq!(
        record.file_name.as_deref(),
        Some("license_2025-03-20.json")
    );
}

#[test]
fn missing_keys_still_parse() {
    let env = TestEnv::new();
    env.write_file("license_2025-01-01.json", r#"{"app_id": "SOMETHING"}"#);

    let loader = LicenseLoader::new(&env.config.license_dir);
    let record = loader.load().expect("partial record should load");
    assert!(record.file_name.is_none());
    assert!(record.expires_at.is_none());
    assert!(record.signature.is_none());
}

#[test]
fn unknown_keys_are_ignored() {
    let env = TestEnv::new();
    env.write_file(
        "license_2025-01-01.json",
        r#"{"app_id": "X", "issued_to": "Someone", "seats": 3}"#,
    );

    let loader = LicenseLoader::new(&env.config.license_dir);
    assert!(loader.load().is_some());
}
