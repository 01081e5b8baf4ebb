use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize};

use crate::params::DEFAULT_ZKP_ITERATIONS;
use crate::{AccumulatorParams, Error, IntegerGroupParams, Params, Result};

/// Parameter configuration as read from files and the environment.
///
/// Big integers are written as decimal strings, or hexadecimal with a `0x` prefix.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsConfig {
    /// Commitment group settings.
    pub group: GroupSettings,
    /// Accumulator admission bounds.
    pub accumulator: AccumulatorSettings,
    /// Miller-Rabin rounds applied to commitment values.
    #[serde(default = "default_zkp_iterations")]
    pub zkp_iterations: u32,
}

/// Commitment group settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupSettings {
    /// Modulus of the commitment group.
    #[serde(deserialize_with = "integer_text")]
    pub modulus: String,
    /// Order of the subgroup generated by `g` and `h`.
    #[serde(deserialize_with = "integer_text")]
    pub group_order: String,
    /// Serial number generator.
    #[serde(deserialize_with = "integer_text")]
    pub g: String,
    /// Randomness generator.
    #[serde(deserialize_with = "integer_text")]
    pub h: String,
}

/// Accumulator admission bounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccumulatorSettings {
    /// Exclusive lower bound on commitment values.
    #[serde(deserialize_with = "integer_text")]
    pub min_coin_value: String,
    /// Inclusive upper bound on commitment values.
    #[serde(deserialize_with = "integer_text")]
    pub max_coin_value: String,
}

/// Prefix of every configuration environment variable.
const ENV_PREFIX: &str = "ZEROCOIN_";

/// Variable naming the TOML configuration file.
const CONFIG_PATH_VAR: &str = "ZEROCOIN_CONFIG_PATH";

fn default_zkp_iterations() -> u32 {
    DEFAULT_ZKP_ITERATIONS
}

impl ParamsConfig {
    /// Loads configuration from `.env` file, TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `ZEROCOIN_` prefix, nested with `__`
    ///    (e.g., `ZEROCOIN_GROUP__MODULUS=0x...`)
    /// 2. TOML configuration file (if exists)
    /// 3. `.env` file (if exists)
    ///
    /// The TOML file path can be set via `ZEROCOIN_CONFIG_PATH`. If not set, defaults to
    /// `./config/zerocoin.toml`. A missing file is skipped.
    ///
    /// # Errors
    /// Returns an error if a required value is missing or has the wrong type.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> figment::error::Result<Self> {
        use figment::providers::{Env, Format, Serialized, Toml};
        use figment::value::Value;
        use figment::Figment;

        // `.env` entries are read without touching the process environment so that they
        // stay below the TOML file.
        let dotenv: Vec<(String, String)> = dotenvy::dotenv_iter()
            .map(|iter| iter.filter_map(|entry| entry.ok()).collect())
            .unwrap_or_default();

        let config_path = std::env::var(CONFIG_PATH_VAR)
            .ok()
            .or_else(|| {
                dotenv
                    .iter()
                    .find(|(key, _)| key == CONFIG_PATH_VAR)
                    .map(|(_, value)| value.clone())
            })
            .unwrap_or_else(|| "config/zerocoin.toml".to_string());

        let mut figment = Figment::new();
        for (key, raw) in &dotenv {
            if let Some(path) = dotenv_key_path(key) {
                let value: Value = raw.parse().unwrap_or_else(|never| match never {});
                figment = figment.merge(Serialized::default(&path, value));
            }
        }

        figment
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG_PATH"]).split("__"))
            .extract()
    }

    /// Parses the configured values into initialized parameters.
    ///
    /// # Errors
    /// Returns an error if a number cannot be parsed or the parameters are inconsistent.
    pub fn into_params(&self) -> Result<Params> {
        let group = IntegerGroupParams::new(
            parse_biguint("group.g", &self.group.g)?,
            parse_biguint("group.h", &self.group.h)?,
            parse_biguint("group.modulus", &self.group.modulus)?,
            parse_biguint("group.group_order", &self.group.group_order)?,
        )?;

        let accumulator = AccumulatorParams::new(
            parse_biguint("accumulator.min_coin_value", &self.accumulator.min_coin_value)?,
            parse_biguint("accumulator.max_coin_value", &self.accumulator.max_coin_value)?,
        )?;

        Params::new(group, accumulator, self.zkp_iterations)
    }
}

/// Accepts an integer written as text or, from the environment, already parsed as a number.
fn integer_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u128),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Maps `ZEROCOIN_GROUP__MODULUS` to `group.modulus`, the way the `Env` provider nests keys.
fn dotenv_key_path(key: &str) -> Option<String> {
    let stripped = key.strip_prefix(ENV_PREFIX)?;
    if stripped.is_empty() || key == CONFIG_PATH_VAR {
        return None;
    }
    Some(stripped.to_lowercase().replace("__", "."))
}

fn parse_biguint(field: &str, raw: &str) -> Result<BigUint> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(digits) => BigUint::parse_bytes(digits.as_bytes(), 16),
        None => BigUint::parse_bytes(raw.as_bytes(), 10),
    };

    parsed.ok_or_else(|| Error::Config(format!("{field} is not a valid integer: {raw:?}")))
}
