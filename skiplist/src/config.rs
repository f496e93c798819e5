use crate::error::{Error, Result};

pub const DEFAULT_MAX_LAYERS: usize = 10;
/// The layer draw consumes one `u64`, so no node can climb past 64 layers.
pub const LAYER_LIMIT: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub max_layers: usize,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_layers: DEFAULT_MAX_LAYERS,
            seed: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_layers(mut self, max_layers: usize) -> Self {
        self.max_layers = max_layers;
        self
    }

    /// Fixes the layer draws, e.g. for reproducible tests. Without a seed the
    /// generator is seeded from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_layers == 0 {
            return Err(Error::ZeroLayers);
        }
        if self.max_layers > LAYER_LIMIT {
            return Err(Error::TooManyLayers {
                requested: self.max_layers,
                max: LAYER_LIMIT,
            });
        }
        Ok(())
    }
}
