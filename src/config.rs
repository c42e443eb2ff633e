use crate::error::{Error, Result};
use crate::schnorr::DEFAULT_SCHNORR_DST;
use serde::{Deserialize, Serialize};

/// Registry settings. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Most addresses (for and against together) one submission may list.
    /// The pairing work per batch is constant, this only bounds the key sums.
    pub max_batch_size: usize,
    /// Domain tag mixed into every Schnorr challenge.
    pub schnorr_dst: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_batch_size: 1024,
            schnorr_dst: DEFAULT_SCHNORR_DST.to_string(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn check_batch_size(&self, size: usize) -> Result<()> {
        if size > self.max_batch_size {
            return Err(Error::BatchTooLarge {
                size,
                max: self.max_batch_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() -> Result<()> {
        let config = Config::from_json(r#"{ "max_batch_size": 16 }"#)?;
        assert_eq!(config.max_batch_size, 16);
        assert_eq!(config.schnorr_dst, DEFAULT_SCHNORR_DST);
        assert_eq!(Config::from_json("{}")?, Config::default());
        Ok(())
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(Config::from_json("{"), Err(Error::Config(_))));
    }

    #[test]
    fn batch_limit_is_inclusive() {
        let config = Config {
            max_batch_size: 2,
            ..Config::default()
        };
        assert!(config.check_batch_size(2).is_ok());
        assert!(matches!(
            config.check_batch_size(3),
            Err(Error::BatchTooLarge { size: 3, max: 2 })
        ));
    }
}
