//! Property tests for identifier views and file-based configuration loading.

use std::io::Write;

use proptest::prelude::*;
use sib_core::{AppId, BridgeConfig, ConfigError, SteamId};

proptest! {
    #[test]
    fn steam_id_fields_reassemble(raw in 1u64..=u64::MAX) {
        let id = SteamId::new(raw).unwrap();
        let rebuilt = u64::from(id.account_id())
            | (u64::from(id.instance()) << 32)
            | (((raw >> 52) & 0xF) << 52)
            | (u64::from(id.universe().as_raw()) << 56);
        prop_assert_eq!(rebuilt, raw);
    }

    #[test]
    fn steam_id_text_round_trips(raw in 1u64..=u64::MAX) {
        let id = SteamId::new(raw).unwrap();
        let parsed: SteamId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    #[test]
    fn any_positive_u32_is_an_app_id(raw in 1u32..=u32::MAX) {
        let parsed: AppId = raw.to_string().parse().unwrap();
        prop_assert_eq!(parsed.as_u32(), raw);
    }
}

#[test]
fn yaml_file_overrides_selected_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "app_id: 480\npoll_attempts: 3").unwrap();

    let cfg = BridgeConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(cfg.app_id.map(AppId::as_u32), Some(480));
    assert_eq!(cfg.poll_attempts, 3);
    assert_eq!(cfg.ticket_capacity, 2048);
}

#[test]
fn yaml_file_rejects_unknown_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "app_id: 480\nretries: 3").unwrap();

    let err = BridgeConfig::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml { .. }));
}

#[test]
fn yaml_file_rejects_zero_app_id() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "app_id: 0").unwrap();

    let err = BridgeConfig::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml { .. }));
}

#[test]
fn missing_yaml_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BridgeConfig::from_yaml_file(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
