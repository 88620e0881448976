use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, CoreResult};
use crate::random::{OsRandom, RandomSource, SeededRandom};

pub const CONFIG_FILE: &str = "transform-engine.toml";
pub const ENV_PREFIX: &str = "TRANSFORM_";

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default)]
    pub random_source: RandomSourceConfig,

    /// [`Api::transform`](crate::Api::transform) refuses values already at
    /// this many hops. Unbounded if unset. The free [`transform`](crate::transform)
    /// function takes no config and never applies this limit.
    #[serde(default)]
    pub max_hops: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RandomSourceConfig {
    #[default]
    Os,
    /// Reproducible ChaCha20 stream for test vectors only.
    Seeded { seed: u64 },
}

impl EngineConfig {
    /// `transform-engine.toml` (optional) overlaid with `TRANSFORM_*`
    /// variables, e.g. `TRANSFORM_MAX_HOPS=4` or
    /// `TRANSFORM_RANDOM_SOURCE__KIND=seeded`.
    pub fn load() -> CoreResult<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> CoreResult<Self> {
        figment
            .extract()
            .map_err(|e| CoreError::Config(e.to_string()))
    }

    pub fn random_source(&self) -> Box<dyn RandomSource> {
        match self.random_source {
            RandomSourceConfig::Os => Box::new(OsRandom),
            RandomSourceConfig::Seeded { seed } => {
                warn!("Using seeded random source - NOT FOR PRODUCTION USE");
                Box::new(SeededRandom::from_seed(seed))
            }
        }
    }

    /// Rejects another hop on a value already at `level`.
    pub fn check_hop_limit(&self, level: usize) -> CoreResult<()> {
        match self.max_hops {
            Some(max) if level >= max => Err(CoreError::Validation(format!(
                "value already has {level} transform blocks (max_hops = {max})"
            ))),
            _ => Ok(()),
        }
    }
}
