//! Chain Configuration
//!
//! The versioned configuration record: chain identifier, one activation
//! threshold per catalog fork, and the engine/governance/registry/blob
//! sub-configs.
//!
//! # Wire Format
//!
//! JSON with camelCase field names. Every absent threshold and every absent
//! sub-config is omitted on output. Thresholds that do not fit in a `u64` are
//! written as decimal strings.
//!
//! The legacy engine selectors `clique` and `gxhash` are rejected on input.
//!
//! # Lifecycle
//!
//! A `ChainConfig` is built from genesis data or persisted state, filled with
//! defaults (`set_defaults`), validated once (`validate`) and then treated as
//! read-only. Replacements are published through [`crate::store::ConfigStore`].

pub mod address;
pub mod bigint;
pub mod governance;
pub mod istanbul;
mod presets;
pub mod registry;

pub use address::Address;
pub use governance::{GovernanceConfig, GovernanceMode, Kip71Config, RewardConfig};
pub use istanbul::{IstanbulConfig, ProposerPolicy};
pub use registry::RegistryConfig;

use num_bigint::BigUint;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

use crate::blob::{BlobConfig, BlobScheduleConfig};
use crate::catalog::{Fork, ForkPoint};
use crate::constants::DEFAULT_UNIT_PRICE;
use crate::error::{ConfigError, ConfigResult};
use crate::logging::{fields, operations};

/// Legacy consensus-engine selectors that must not appear in a config
pub const DEPRECATED_FIELDS: [&str; 2] = ["clique", "gxhash"];

/// State root derivation implementation, encoded as an integer on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum DeriveShaMode {
    #[default]
    Original,
    Simple,
    Concat,
}

impl TryFrom<u64> for DeriveShaMode {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Original),
            1 => Ok(Self::Simple),
            2 => Ok(Self::Concat),
            other => Err(format!("unknown deriveShaImpl {}", other)),
        }
    }
}

impl From<DeriveShaMode> for u64 {
    fn from(mode: DeriveShaMode) -> Self {
        match mode {
            DeriveShaMode::Original => 0,
            DeriveShaMode::Simple => 1,
            DeriveShaMode::Concat => 2,
        }
    }
}

/// Marker for a retired field; decoding one always fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Retired;

fn reject_clique<'de, D: Deserializer<'de>>(_: D) -> Result<Retired, D::Error> {
    Err(de::Error::custom("clique is deprecated, use istanbul"))
}

fn reject_gxhash<'de, D: Deserializer<'de>>(_: D) -> Result<Retired, D::Error> {
    Err(de::Error::custom("gxhash is deprecated, use istanbul"))
}

/// Versioned chain configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    #[serde(rename = "chainId", default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<BigUint>,

    #[serde(default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub istanbul_compatible_block: Option<BigUint>,
    #[serde(default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub london_compatible_block: Option<BigUint>,
    #[serde(default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub eth_tx_type_compatible_block: Option<BigUint>,
    #[serde(default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub magma_compatible_block: Option<BigUint>,
    #[serde(default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub kore_compatible_block: Option<BigUint>,
    #[serde(default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub shanghai_compatible_block: Option<BigUint>,
    #[serde(default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub cancun_compatible_block: Option<BigUint>,
    #[serde(default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub randao_compatible_block: Option<BigUint>,
    #[serde(default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub kaia_compatible_block: Option<BigUint>,
    #[serde(default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub prague_compatible_block: Option<BigUint>,
    #[serde(default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub osaka_compatible_block: Option<BigUint>,
    #[serde(rename = "bpo1Block", default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub bpo1_block: Option<BigUint>,
    #[serde(rename = "bpo2Block", default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub bpo2_block: Option<BigUint>,
    #[serde(rename = "bpo3Block", default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub bpo3_block: Option<BigUint>,
    #[serde(rename = "bpo4Block", default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub bpo4_block: Option<BigUint>,
    #[serde(rename = "bpo5Block", default, with = "bigint::opt", skip_serializing_if = "Option::is_none")]
    pub bpo5_block: Option<BigUint>,

    /// Consensus engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub istanbul: Option<IstanbulConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance: Option<GovernanceConfig>,
    /// Installed at the Randao fork block
    #[serde(rename = "randaoRegistry", default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<RegistryConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_schedule: Option<BlobScheduleConfig>,

    #[serde(default)]
    pub unit_price: u64,
    #[serde(default)]
    pub derive_sha_impl: DeriveShaMode,

    #[serde(default, skip_serializing, deserialize_with = "reject_clique")]
    clique: Retired,
    #[serde(default, skip_serializing, deserialize_with = "reject_gxhash")]
    gxhash: Retired,
}

impl ChainConfig {
    /// Empty configuration: no chain id, nothing scheduled
    pub fn new() -> Self {
        Self::default()
    }

    /// Threshold of a catalog fork
    pub fn fork_block(&self, fork: Fork) -> Option<&BigUint> {
        let block = match fork {
            Fork::Istanbul => &self.istanbul_compatible_block,
            Fork::London => &self.london_compatible_block,
            Fork::EthTxType => &self.eth_tx_type_compatible_block,
            Fork::Magma => &self.magma_compatible_block,
            Fork::Kore => &self.kore_compatible_block,
            Fork::Shanghai => &self.shanghai_compatible_block,
            Fork::Cancun => &self.cancun_compatible_block,
            Fork::Randao => &self.randao_compatible_block,
            Fork::Kaia => &self.kaia_compatible_block,
            Fork::Prague => &self.prague_compatible_block,
            Fork::Osaka => &self.osaka_compatible_block,
            Fork::Bpo1 => &self.bpo1_block,
            Fork::Bpo2 => &self.bpo2_block,
            Fork::Bpo3 => &self.bpo3_block,
            Fork::Bpo4 => &self.bpo4_block,
            Fork::Bpo5 => &self.bpo5_block,
        };
        block.as_ref()
    }

    fn fork_block_slot(&mut self, fork: Fork) -> &mut Option<BigUint> {
        match fork {
            Fork::Istanbul => &mut self.istanbul_compatible_block,
            Fork::London => &mut self.london_compatible_block,
            Fork::EthTxType => &mut self.eth_tx_type_compatible_block,
            Fork::Magma => &mut self.magma_compatible_block,
            Fork::Kore => &mut self.kore_compatible_block,
            Fork::Shanghai => &mut self.shanghai_compatible_block,
            Fork::Cancun => &mut self.cancun_compatible_block,
            Fork::Randao => &mut self.randao_compatible_block,
            Fork::Kaia => &mut self.kaia_compatible_block,
            Fork::Prague => &mut self.prague_compatible_block,
            Fork::Osaka => &mut self.osaka_compatible_block,
            Fork::Bpo1 => &mut self.bpo1_block,
            Fork::Bpo2 => &mut self.bpo2_block,
            Fork::Bpo3 => &mut self.bpo3_block,
            Fork::Bpo4 => &mut self.bpo4_block,
            Fork::Bpo5 => &mut self.bpo5_block,
        }
    }

    /// Schedule (or unschedule, with `None`) a fork
    pub fn set_fork_block(&mut self, fork: Fork, block: Option<BigUint>) {
        *self.fork_block_slot(fork) = block;
    }

    /// Builder-style `set_fork_block` for a `u64` height
    pub fn with_fork(mut self, fork: Fork, block: u64) -> Self {
        self.set_fork_block(fork, Some(BigUint::from(block)));
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(BigUint::from(chain_id));
        self
    }

    pub fn with_blob_config(mut self, fork: Fork, config: BlobConfig) -> Self {
        self.blob_schedule
            .get_or_insert_with(BlobScheduleConfig::default)
            .set(fork, Some(config));
        self
    }

    /// The catalog as seen through this configuration, in activation order
    pub fn fork_points(&self) -> impl Iterator<Item = ForkPoint<'_>> + '_ {
        Fork::ALL
            .iter()
            .map(move |&fork| ForkPoint::new(fork, self.fork_block(fork)))
    }

    /// Scheduled forks only
    pub fn scheduled_forks(&self) -> impl Iterator<Item = (Fork, &BigUint)> + '_ {
        self.fork_points()
            .filter_map(|point| point.threshold.map(|block| (point.fork, block)))
    }

    /// Fill absent sections with defaults, logging a warning for each one
    pub fn set_defaults(&mut self) {
        if self.istanbul.is_none() {
            warn!(
                { fields::SECTION } = "istanbul",
                { fields::OPERATION } = operations::SET_DEFAULTS,
                "No consensus-engine config given, using defaults"
            );
            self.istanbul = Some(IstanbulConfig::default());
        }

        let governance = self.governance.get_or_insert_with(|| {
            warn!(
                { fields::SECTION } = "governance",
                { fields::OPERATION } = operations::SET_DEFAULTS,
                "No governance config given, using defaults"
            );
            GovernanceConfig::default()
        });
        if governance.reward.is_none() {
            warn!(
                { fields::SECTION } = "governance.reward",
                { fields::OPERATION } = operations::SET_DEFAULTS,
                "No reward config given, using defaults"
            );
            governance.reward = Some(RewardConfig::default());
        }
        if governance.kip71.is_none() {
            warn!(
                { fields::SECTION } = "governance.kip71",
                { fields::OPERATION } = operations::SET_DEFAULTS,
                "No KIP-71 config given, using defaults"
            );
            governance.kip71 = Some(Kip71Config::default());
        }

        if self.unit_price == 0 {
            warn!(
                { fields::SECTION } = "unitPrice",
                { fields::OPERATION } = operations::SET_DEFAULTS,
                default = DEFAULT_UNIT_PRICE,
                "No unit price given, using default"
            );
            self.unit_price = DEFAULT_UNIT_PRICE;
        }

        if self.osaka_compatible_block.is_some() {
            let schedule = self.blob_schedule.get_or_insert_with(BlobScheduleConfig::default);
            if schedule.osaka.is_none() {
                warn!(
                    { fields::SECTION } = "blobSchedule.osaka",
                    { fields::OPERATION } = operations::SET_DEFAULTS,
                    "No Osaka blob config given, using defaults"
                );
                schedule.osaka = Some(BlobConfig::osaka_default());
            }
        }
    }

    /// Structural deep copy; the clone shares nothing with `self`
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }

    /// Copy through the wire codec, for callers that need a wire-exact copy
    pub fn copy_via_codec(&self) -> ConfigResult<Self> {
        let bytes = serde_json::to_vec(self)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Decode from JSON, rejecting retired engine selectors
    pub fn from_json(s: &str) -> ConfigResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> ConfigResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| ConfigError::invalid_value("config", "expected a JSON object"))?;
        if let Some(field) = DEPRECATED_FIELDS.iter().find(|f| object.contains_key(**f)) {
            return Err(ConfigError::Deprecated {
                field: (*field).to_string(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a configuration file without defaulting or validation
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        debug!(
            { fields::PATH } = %path.display(),
            { fields::OPERATION } = operations::LOAD,
            "Loading chain config"
        );
        Self::from_json(&contents)
    }

    /// Read a genesis configuration: decode, fill defaults, validate
    pub fn load_genesis(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let mut config = Self::load(path)?;
        config.set_defaults();
        config.validate()?;
        Ok(config)
    }
}

impl fmt::Display for ChainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.chain_id {
            Some(id) => write!(f, "{{ChainID: {}", id)?,
            None => write!(f, "{{ChainID: <nil>")?,
        }
        for (fork, block) in self.scheduled_forks() {
            write!(f, " {}: {}", fork, block)?;
        }
        match &self.istanbul {
            Some(engine) => write!(
                f,
                " Engine: istanbul(epoch: {}, policy: {}, size: {})",
                engine.epoch, engine.policy, engine.sub_group_size
            )?,
            None => write!(f, " Engine: unknown")?,
        }
        write!(
            f,
            " UnitPrice: {} DeriveShaImpl: {}}}",
            self.unit_price,
            u64::from(self.derive_sha_impl)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fork_block_accessors_cover_catalog() {
        let mut cfg = ChainConfig::new();
        for (i, fork) in Fork::ALL.iter().enumerate() {
            cfg.set_fork_block(*fork, Some(BigUint::from(i as u64 * 10)));
        }
        for (i, point) in cfg.fork_points().enumerate() {
            assert_eq!(point.fork, Fork::ALL[i]);
            assert_eq!(point.threshold, Some(&BigUint::from(i as u64 * 10)));
        }
    }

    #[test]
    fn test_wire_omits_absent_thresholds() {
        let cfg = ChainConfig::new()
            .with_chain_id(1)
            .with_fork(Fork::Istanbul, 100);
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["chainId"], 1);
        assert_eq!(json["istanbulCompatibleBlock"], 100);
        assert!(json.get("londonCompatibleBlock").is_none());
        assert!(json.get("istanbul").is_none());
        assert!(json.get("clique").is_none());
    }

    #[test]
    fn test_json_keys_match_catalog() {
        let mut cfg = ChainConfig::new();
        for fork in Fork::ALL {
            cfg.set_fork_block(fork, Some(BigUint::from(1u32)));
        }
        let json = serde_json::to_value(&cfg).unwrap();
        for fork in Fork::ALL {
            assert_eq!(json[fork.json_key()], 1, "missing key for {}", fork);
        }
    }

    #[test]
    fn test_deprecated_fields_rejected() {
        let err = ChainConfig::from_json(r#"{"chainId":1,"clique":{"period":1}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Deprecated { ref field } if field == "clique"));
        assert_eq!(err.to_string(), "clique is deprecated, use istanbul");

        let err = ChainConfig::from_json(r#"{"gxhash":{}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Deprecated { ref field } if field == "gxhash"));
    }

    #[test]
    fn test_deprecated_fields_rejected_by_plain_serde() {
        let err = serde_json::from_str::<ChainConfig>(r#"{"clique":null}"#).unwrap_err();
        assert!(err.to_string().contains("clique is deprecated"));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = ChainConfig::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "config"));
    }

    #[test]
    fn test_partial_governance_sections_load() {
        let cfg = ChainConfig::from_json(
            r#"{"chainId":1,"governance":{"reward":{"useGiniCoeff":true},"kip71":{"gasTarget":1}}}"#,
        )
        .unwrap();
        let gov = cfg.governance.as_ref().unwrap();
        let reward = gov.reward.as_ref().unwrap();
        assert!(reward.use_gini_coeff);
        assert_eq!(reward.ratio, RewardConfig::default().ratio);
        assert_eq!(reward.minting_amount, RewardConfig::default().minting_amount);
        let kip71 = gov.kip71.as_ref().unwrap();
        assert_eq!(kip71.gas_target, 1);
        assert_eq!(kip71.base_fee_denominator, Kip71Config::default().base_fee_denominator);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let cfg = ChainConfig::from_json(r#"{"chainId":5,"somethingNew":true}"#).unwrap();
        assert_eq!(cfg.chain_id, Some(BigUint::from(5u32)));
    }

    #[test]
    fn test_set_defaults_fills_sections() {
        let mut cfg = ChainConfig::new().with_fork(Fork::Osaka, 10);
        cfg.set_defaults();
        assert_eq!(cfg.istanbul, Some(IstanbulConfig::default()));
        let gov = cfg.governance.as_ref().unwrap();
        assert_eq!(gov.reward, Some(RewardConfig::default()));
        assert_eq!(gov.kip71, Some(Kip71Config::default()));
        assert_eq!(cfg.unit_price, DEFAULT_UNIT_PRICE);
        assert_eq!(
            cfg.blob_schedule.as_ref().and_then(|s| s.osaka),
            Some(BlobConfig::osaka_default())
        );
    }

    #[test]
    fn test_set_defaults_keeps_given_values() {
        let mut cfg = ChainConfig::new();
        cfg.unit_price = 1;
        cfg.istanbul = Some(IstanbulConfig {
            epoch: 30,
            policy: ProposerPolicy::Sticky,
            sub_group_size: 4,
        });
        cfg.set_defaults();
        assert_eq!(cfg.unit_price, 1);
        assert_eq!(cfg.istanbul.as_ref().unwrap().epoch, 30);
        assert!(cfg.blob_schedule.is_none());
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let mut original = ChainConfig::mainnet();
        original.set_defaults();
        let mut expected = ChainConfig::mainnet();
        expected.set_defaults();

        let mut copy = original.deep_clone();
        assert_eq!(copy, original);

        copy.istanbul.as_mut().unwrap().sub_group_size = 7;
        copy.governance.as_mut().unwrap().governance_mode = GovernanceMode::Ballot;
        copy.registry
            .get_or_insert_with(RegistryConfig::default)
            .records
            .insert("KIP113".to_string(), Address::ZERO);
        assert_ne!(copy, original);
        assert_eq!(original, expected);
    }

    #[test]
    fn test_copy_via_codec_matches_clone() {
        let mut cfg = ChainConfig::all_forks_enabled();
        cfg.set_defaults();
        assert_eq!(cfg.copy_via_codec().unwrap(), cfg.deep_clone());
    }

    #[test]
    fn test_display_lists_scheduled_forks() {
        let cfg = ChainConfig::new()
            .with_chain_id(1001)
            .with_fork(Fork::Istanbul, 5)
            .with_fork(Fork::Kore, 9);
        let s = cfg.to_string();
        assert!(s.starts_with("{ChainID: 1001"));
        assert!(s.contains("Istanbul: 5"));
        assert!(s.contains("Kore: 9"));
        assert!(!s.contains("London"));
    }
}
