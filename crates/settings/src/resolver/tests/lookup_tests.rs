//! Lookup tests for `Settings::settings` and `Settings::get`.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use super::{SAMPLE_SETTINGS, write_settings};
use crate::resolver::{LookupSource, Resolved, Settings};

#[test]
#[serial]
fn test_sample_document_resolves_store_and_environment() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(temp_dir.path(), SAMPLE_SETTINGS);

    temp_env::with_vars(
        [("DB_PORT", Some("13306")), ("THIS_DOES_NOT_EXIST", None)],
        || {
            let settings = Settings::from_path(&path);

            let Resolved::All(all) = settings.settings(None).unwrap() else {
                panic!("expected full settings map");
            };
            assert_eq!(all.get("sys.users.0"), Some("foo"));

            assert_eq!(settings.get("db.port").unwrap(), "13306");
            assert_eq!(settings.get("sys.users.2").unwrap(), "test");
            assert_eq!(settings.get("db.user").unwrap(), "bar");
            assert_eq!(settings.get("this.does.not.exist").unwrap(), "");
        },
    );
}

#[test]
fn test_empty_path_returns_everything() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(temp_dir.path(), SAMPLE_SETTINGS);
    let settings = Settings::from_path(&path);

    let from_none = settings.settings(None).unwrap();
    let from_empty = settings.settings(Some("")).unwrap();

    assert_eq!(from_none, from_empty);
    let Resolved::All(all) = from_none else {
        panic!("expected full settings map");
    };
    assert_eq!(all.len(), 6);
}

#[test]
fn test_repeated_full_reads_are_identical() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(temp_dir.path(), SAMPLE_SETTINGS);
    let settings = Settings::from_path(&path);

    let first = settings.all().unwrap();
    fs::write(&path, "changed: yes\n").unwrap();
    let second = settings.all().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_reset_picks_up_new_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(temp_dir.path(), SAMPLE_SETTINGS);
    let settings = Settings::from_path(&path);
    assert_eq!(settings.get("db.user").unwrap(), "bar");

    fs::write(&path, "db:\n  user: replaced\n").unwrap();
    assert_eq!(settings.get("db.user").unwrap(), "bar");

    settings.store().reset().unwrap();
    assert_eq!(settings.get("db.user").unwrap(), "replaced");
    assert_eq!(settings.get("sys.users.0").unwrap(), "");
}

#[test]
fn test_reset_with_source_supplies_test_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(temp_dir.path(), SAMPLE_SETTINGS);
    let override_path = temp_dir.path().join("override.yaml");
    fs::write(&override_path, "db:\n  user: override\n").unwrap();

    let settings = Settings::from_path(&path);
    settings.store().reset_with_source(&override_path).unwrap();

    assert_eq!(settings.get("db.user").unwrap(), "override");
}

#[test]
#[serial]
fn test_nonexistent_source_is_empty_but_environment_still_works() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings::from_path(temp_dir.path().join("missing.yaml"));

    temp_env::with_vars([("FEED_LAG_SECONDS", Some("90"))], || {
        assert!(settings.all().unwrap().is_empty());
        assert_eq!(settings.get("feed.lag_seconds").unwrap(), "90");
    });
}

#[test]
#[serial]
fn test_store_wins_over_environment() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(temp_dir.path(), SAMPLE_SETTINGS);

    temp_env::with_vars([("DB_USER", Some("env-user"))], || {
        let settings = Settings::from_path(&path);
        assert_eq!(settings.chain(), LookupSource::DEFAULT_CHAIN.as_slice());
        assert_eq!(settings.get("db.user").unwrap(), "bar");

        let env_first =
            Settings::from_path(&path).with_chain([LookupSource::Environment, LookupSource::Store]);
        assert_eq!(
            env_first.chain(),
            [LookupSource::Environment, LookupSource::Store].as_slice()
        );
        assert_eq!(env_first.get("db.user").unwrap(), "env-user");
    });
}

#[test]
#[serial]
fn test_environment_is_read_on_every_lookup() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings::from_path(temp_dir.path().join("missing.yaml"));

    temp_env::with_vars([("ALERT_TOPIC", Some("first"))], || {
        assert_eq!(settings.get("alert.topic").unwrap(), "first");
    });
    temp_env::with_vars([("ALERT_TOPIC", Some("second"))], || {
        assert_eq!(settings.get("alert.topic").unwrap(), "second");
    });
}

#[test]
#[serial]
fn test_lookup_distinguishes_absent_from_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(temp_dir.path(), "feed:\n  label: ''\n");
    let settings = Settings::from_path(&path);

    temp_env::with_vars([("FEED_MISSING", None::<&str>)], || {
        assert_eq!(settings.lookup("feed.label").unwrap(), Some(String::new()));
        assert_eq!(settings.lookup("feed.missing").unwrap(), None);
    });
}
