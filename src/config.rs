use std::time::Duration;

use rand::rngs::StdRng;

use crate::import::{DEFAULT_IMPORT_DELAY, IMPORT_BASE_SIZE};
use crate::random::RngSource;

/// Session settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub roster_size: usize,
    pub import_delay: Duration,
    /// Fixed seed for reproducible rosters; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster_size: IMPORT_BASE_SIZE,
            import_delay: DEFAULT_IMPORT_DELAY,
            seed: None,
        }
    }
}

impl Config {
    pub fn random_source(&self) -> RngSource<StdRng> {
        match self.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomSource;

    #[test]
    fn defaults_match_dashboard() {
        let config = Config::default();
        assert_eq!(config.roster_size, 150);
        assert_eq!(config.import_delay, Duration::from_secs(2));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn seeded_config_is_reproducible() {
        let config = Config {
            seed: Some(5),
            ..Config::default()
        };
        assert_eq!(
            config.random_source().bytes(),
            config.random_source().bytes()
        );
    }
}
