//! Integration tests for chain parameter loading, validation and publication
//!
//! These tests go through the public API only: genesis files on disk, the
//! compatibility driver and the configuration store.

use std::io::Write;
use std::sync::Arc;

use chain_params::{
    ChainConfig, ConfigError, ConfigStore, Fork, ForkOrderError, IntervalSettings, SwapError,
};
use num_bigint::BigUint;
use serde_json::json;
use tempfile::NamedTempFile;

/// Write a genesis JSON document to a temporary file
fn write_genesis(value: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ============ Genesis Loading Tests ============

#[test]
fn test_load_genesis_fills_defaults() {
    let file = write_genesis(&json!({
        "chainId": 2019,
        "istanbulCompatibleBlock": 0,
        "londonCompatibleBlock": 0,
        "ethTxTypeCompatibleBlock": 0,
        "magmaCompatibleBlock": "0x10",
    }));

    let cfg = ChainConfig::load_genesis(file.path()).unwrap();

    assert_eq!(cfg.chain_id, Some(BigUint::from(2019u32)));
    assert_eq!(cfg.fork_block(Fork::Magma), Some(&BigUint::from(16u32)));
    assert!(cfg.istanbul.is_some());
    let governance = cfg.governance.as_ref().unwrap();
    assert!(governance.reward.is_some());
    assert!(governance.kip71.is_some());
    assert!(cfg.unit_price > 0);
    assert!(cfg.is_magma_fork_enabled(16));
    assert!(!cfg.is_magma_fork_enabled(15));
}

#[test]
fn test_load_genesis_rejects_bad_order() {
    let file = write_genesis(&json!({
        "chainId": 2019,
        "londonCompatibleBlock": 0,
    }));

    let err = ChainConfig::load_genesis(file.path()).unwrap_err();
    match err {
        ConfigError::Order(ForkOrderError::NotEnabled { earlier, later, .. }) => {
            assert_eq!(earlier, Fork::Istanbul);
            assert_eq!(later, Fork::London);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_load_rejects_deprecated_engines() {
    for field in ["clique", "gxhash"] {
        let file = write_genesis(&json!({
            "chainId": 1,
            field: { "period": 1, "epoch": 30000 },
        }));
        let err = ChainConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Deprecated { .. }));
        assert_eq!(err.to_string(), format!("{} is deprecated, use istanbul", field));
    }
}

#[test]
fn test_deprecated_engines_rejected_by_plain_serde() {
    let value = json!({ "chainId": 1, "clique": {} });
    let err = serde_json::from_value::<ChainConfig>(value).unwrap_err();
    assert!(err.to_string().contains("clique is deprecated"));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ChainConfig::load(dir.path().join("genesis.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_osaka_genesis_gets_blob_defaults() {
    let mut genesis = serde_json::to_value(ChainConfig::all_forks_enabled()).unwrap();
    genesis.as_object_mut().unwrap().remove("blobSchedule");
    let file = write_genesis(&genesis);

    let cfg = ChainConfig::load_genesis(file.path()).unwrap();
    assert_eq!(cfg.max_blobs_per_block(0), 9);
    assert_eq!(cfg.target_blobs_per_block(0), 6);
}

#[test]
fn test_huge_threshold_survives_round_trip() {
    let file = write_genesis(&json!({
        "chainId": 1,
        "istanbulCompatibleBlock": "340282366920938463463374607431768211456",
    }));
    let cfg = ChainConfig::load_genesis(file.path()).unwrap();
    assert!(!cfg.is_istanbul_fork_enabled(u64::MAX));

    let copy = cfg.copy_via_codec().unwrap();
    assert_eq!(copy, cfg);
    let json: serde_json::Value = serde_json::from_str(&cfg.to_json().unwrap()).unwrap();
    assert_eq!(json["istanbulCompatibleBlock"], "340282366920938463463374607431768211456");
}

// ============ Clone Tests ============

#[test]
fn test_deep_clone_is_independent() {
    let original = ChainConfig::mainnet();
    let mut copy = original.deep_clone();
    assert_eq!(copy, original);

    copy.set_fork_block(Fork::Kaia, None);
    copy.istanbul.as_mut().unwrap().epoch = 1;
    assert!(original.fork_block(Fork::Kaia).is_some());
    assert_ne!(original.istanbul.as_ref().unwrap().epoch, 1);
    assert_eq!(original.copy_via_codec().unwrap(), original);
}

// ============ Compatibility Tests ============

#[test]
fn test_adding_future_fork() {
    let stored = ChainConfig::new().with_fork(Fork::Istanbul, 100);
    let new = ChainConfig::new()
        .with_fork(Fork::Istanbul, 100)
        .with_fork(Fork::London, 200);

    assert!(stored.check_compatible(&new, 50).is_none());

    let err = stored.check_compatible(&new, 250).unwrap();
    assert_eq!(err.what, "London");
    assert_eq!(err.rewind_to, 199);
}

#[test]
fn test_rewind_then_swap() {
    let genesis = ChainConfig::testnet();
    let store = ConfigStore::new(genesis.clone()).unwrap();

    let mut upgraded = genesis.clone();
    upgraded.set_fork_block(Fork::Prague, Some(BigUint::from(180_000_000u64)));

    let err = match store.replace(upgraded.clone(), 185_000_000) {
        Err(SwapError::Incompatible(err)) => err,
        other => panic!("expected incompatibility, got {:?}", other.map(|_| ())),
    };
    assert_eq!(err.what, "Prague");
    assert_eq!(err.rewind_to, 179_999_999);

    // After rewinding, the new schedule no longer conflicts
    store.replace(upgraded, err.rewind_to).unwrap();
    assert!(store.current().is_prague_fork_enabled(180_000_000));
}

#[test]
fn test_snapshot_outlives_swap() {
    let store = ConfigStore::new(ChainConfig::all_forks_enabled()).unwrap();
    let snapshot: Arc<ChainConfig> = store.current();
    let rules = snapshot.rules(10);

    let mut next = ChainConfig::all_forks_enabled();
    next.set_fork_block(Fork::Bpo1, Some(BigUint::from(1_000u32)));
    next = next.with_blob_config(Fork::Bpo1, chain_params::BlobConfig::new(10, 15, 8_346_193));
    store.replace(next, 10).unwrap();

    assert!(rules.is_osaka());
    assert!(!rules.is_active(Fork::Bpo1));
    assert_eq!(snapshot.max_blobs_per_block(2_000), 9);
    assert_eq!(store.current().max_blobs_per_block(2_000), 15);
}

// ============ Interval Settings Tests ============

#[test]
fn test_default_intervals() {
    let settings = IntervalSettings::default();
    assert_eq!(settings.staking_update_interval(), 86_400);
    assert_eq!(settings.proposer_refresh_interval(), 3_600);
    assert_eq!(settings.staking_block_number(172_800), 0);
    assert_eq!(settings.staking_block_number(259_200), 86_400);
}
