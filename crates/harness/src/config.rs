//! Configuration system for the co-simulation harness.
//!
//! This module defines the configuration structures used to parameterize the harness. It
//! provides:
//! 1. **Defaults:** Baseline values for the time bound, sanity grace period, and the
//!    numeric instruction id table of the reference design.
//! 2. **Structures:** `GeneralConfig` for the clock driver and checkers, `EncodingConfig`
//!    for adapters that read raw instruction ids out of a model.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field is optional in JSON; omitted fields take their default.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::{HarnessError, Result};

/// Default configuration constants for the harness.
mod defaults {
    /// Half edges that must elapse before the sanity checker may report a fault.
    ///
    /// Bubbles during pipeline fill carry the illegal encoding, so early writeback
    /// contents are ignored.
    pub const SANITY_GRACE_EDGES: u64 = 10;

    /// Writeback id of a slot that holds no instruction after reset.
    pub const ID_INVALID: u8 = 0;

    /// Id of the indirect jump (`jalr`).
    pub const ID_JALR: u8 = 4;

    /// Id of the environment call (`ecall`).
    pub const ID_ECALL: u8 = 49;

    /// Id of the machine trap return (`mret`).
    pub const ID_MRET: u8 = 60;

    /// Id of a bubble inserted on a stall or flush.
    pub const ID_BUBBLE: u8 = 62;

    /// Id the decoder assigns to an encoding it does not recognise.
    pub const ID_ILLEGAL: u8 = 63;
}

/// Top-level harness configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Clock driver and checker settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Numeric instruction id table of the DUT.
    #[serde(default)]
    pub encoding: EncodingConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] if the JSON is malformed or has wrongly typed
    /// fields.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(HarnessError::Config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] if the file cannot be read and
    /// [`HarnessError::Config`] if its contents do not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| HarnessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// Clock driver and checker settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Upper bound on half edges driven by `step`. `None` runs until a commit is seen.
    #[serde(default)]
    pub max_sim_time: Option<u64>,

    /// Half edges that must elapse before an illegal instruction counts as a fault.
    #[serde(default = "GeneralConfig::default_sanity_grace_edges")]
    pub sanity_grace_edges: u64,

    /// Emit per-stage signal dumps at `debug` level on every rising edge.
    #[serde(default)]
    pub trace_stages: bool,
}

impl GeneralConfig {
    /// Returns the default sanity grace period.
    const fn default_sanity_grace_edges() -> u64 {
        defaults::SANITY_GRACE_EDGES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_sim_time: None,
            sanity_grace_edges: defaults::SANITY_GRACE_EDGES,
            trace_stages: false,
        }
    }
}

/// Numeric instruction ids produced by the DUT's decoder.
///
/// Only the ids the harness interprets are listed; every other id is an ordinary
/// instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EncodingConfig {
    /// Empty slot after reset.
    #[serde(default = "EncodingConfig::default_invalid")]
    pub invalid: u8,
    /// Stall or flush bubble.
    #[serde(default = "EncodingConfig::default_bubble")]
    pub bubble: u8,
    /// Unrecognised encoding.
    #[serde(default = "EncodingConfig::default_illegal")]
    pub illegal: u8,
    /// Indirect jump.
    #[serde(default = "EncodingConfig::default_jalr")]
    pub jalr: u8,
    /// Environment call.
    #[serde(default = "EncodingConfig::default_ecall")]
    pub ecall: u8,
    /// Machine trap return.
    #[serde(default = "EncodingConfig::default_mret")]
    pub mret: u8,
}

impl EncodingConfig {
    const fn default_invalid() -> u8 {
        defaults::ID_INVALID
    }

    const fn default_bubble() -> u8 {
        defaults::ID_BUBBLE
    }

    const fn default_illegal() -> u8 {
        defaults::ID_ILLEGAL
    }

    const fn default_jalr() -> u8 {
        defaults::ID_JALR
    }

    const fn default_ecall() -> u8 {
        defaults::ID_ECALL
    }

    const fn default_mret() -> u8 {
        defaults::ID_MRET
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            invalid: defaults::ID_INVALID,
            bubble: defaults::ID_BUBBLE,
            illegal: defaults::ID_ILLEGAL,
            jalr: defaults::ID_JALR,
            ecall: defaults::ID_ECALL,
            mret: defaults::ID_MRET,
        }
    }
}
