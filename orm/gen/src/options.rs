//! Global toggles consumed read-only during synthesis.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::errors::GeneratorError;
use crate::primes::{FixedPrimes, PrimeSource, RandomPrimes, SharedPerRun};

/// How `hashCode` primes are chosen across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HashPolicy {
    /// A fresh seed and multiplier for every class.
    #[default]
    PerClass,
    /// The first pair drawn is reused for every class of the run.
    SharedPerRun,
    /// Always seed 7, multiplier 31.
    Fixed,
}

/// Options for one generation run.
///
/// ## Examples
///
/// ```
/// use orm_gen::options::{GenerationOptions, HashPolicy};
///
/// let options: GenerationOptions =
///     serde_json::from_str(r#"{ "generate_default_values": true, "hash_seed": 11 }"#).unwrap();
/// assert!(options.generate_default_values);
/// assert!(!options.java_se_support);
/// assert_eq!(options.hash_policy, HashPolicy::PerClass);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Write optional annotation arguments even when they equal their defaults.
    pub generate_default_values: bool,
    /// Give fields property/vetoable change support where the attribute asks for it.
    pub java_se_support: bool,
    pub hash_policy: HashPolicy,
    /// Seeds the prime RNG for reproducible output.
    pub hash_seed: Option<u64>,
}

impl GenerationOptions {
    /// Reads options from a JSON file.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ConfigError`] when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, GeneratorError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GeneratorError::ConfigError(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| GeneratorError::ConfigError(format!("invalid options in {}: {}", path.display(), e)))
    }

    /// Builds the prime source for one run according to [`HashPolicy`].
    pub fn prime_source(&self) -> Box<dyn PrimeSource> {
        let random = || match self.hash_seed {
            Some(seed) => RandomPrimes::seeded(seed),
            None => RandomPrimes::from_entropy(),
        };
        match self.hash_policy {
            HashPolicy::PerClass => Box::new(random()),
            HashPolicy::SharedPerRun => Box::new(SharedPerRun::new(random())),
            HashPolicy::Fixed => Box::new(FixedPrimes::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primes::HashPrimes;
    use std::str::FromStr;

    #[test]
    fn defaults_are_all_off() {
        let options = GenerationOptions::default();
        assert!(!options.generate_default_values);
        assert!(!options.java_se_support);
        assert_eq!(options.hash_seed, None);
    }

    #[test]
    fn policy_parses_from_snake_case() {
        assert_eq!(HashPolicy::from_str("shared_per_run").unwrap(), HashPolicy::SharedPerRun);
        assert!(HashPolicy::from_str("per-class").is_err());
    }

    #[test]
    fn seeded_policies_are_reproducible() {
        let options = GenerationOptions {
            hash_seed: Some(3),
            ..Default::default()
        };
        let mut a = options.prime_source();
        let mut b = options.prime_source();
        assert_eq!(a.next_primes(), b.next_primes());
    }

    #[test]
    fn fixed_policy_returns_constant_pair() {
        let options = GenerationOptions {
            hash_policy: HashPolicy::Fixed,
            ..Default::default()
        };
        let mut source = options.prime_source();
        assert_eq!(source.next_primes(), HashPrimes { seed: 7, multiplier: 31 });
    }

    #[test]
    fn unreadable_options_file_is_config_error() {
        let err = GenerationOptions::from_file(Path::new("/nonexistent/options.json")).unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigError(_)));
    }

    #[test]
    fn malformed_options_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = GenerationOptions::from_file(&path).unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigError(_)));
    }
}
