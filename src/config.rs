use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::mutants::Mutation;
use crate::operators::{self, Mutator};

/// Mutator selection as written in a config file.
///
/// ```json
/// { "mutators": { "@default": true, "arith": false, "bool_flip": { "ignore": ["src/legacy"] } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MutatorConfig {
    #[serde(default)]
    pub mutators: BTreeMap<String, MutatorSetting>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MutatorSetting {
    Enabled(bool),
    Detailed(MutatorOptions),
}

/// Object form of a mutator entry. Enables the mutator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MutatorOptions {
    /// Path prefixes where this mutator's mutants are ignored.
    #[serde(default)]
    pub ignore: Vec<Utf8PathBuf>,
}

/// The set of mutators a run applies, with per-mutator ignored paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedProfile {
    enabled: BTreeSet<Mutator>,
    ignore: BTreeMap<Mutator, Vec<Utf8PathBuf>>,
}

impl MutatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&data)
    }

    /// Profiles are applied before single mutators so `{"@all": true, "arith": false}`
    /// disables `arith`. An empty config resolves to `@default`.
    pub fn resolve(&self) -> Result<ResolvedProfile, ConfigError> {
        if self.mutators.is_empty() {
            let enabled = operators::profile(operators::PROFILE_DEFAULT)
                .unwrap_or_default()
                .into_iter()
                .collect();
            return Ok(ResolvedProfile {
                enabled,
                ignore: BTreeMap::new(),
            });
        }

        let mut resolved = ResolvedProfile::default();
        let (profiles, singles): (Vec<_>, Vec<_>) = self
            .mutators
            .iter()
            .partition(|(name, _)| name.starts_with('@'));

        for (name, setting) in profiles {
            let members = operators::profile(name)
                .ok_or_else(|| ConfigError::UnknownEntry(name.clone()))?;
            for mutator in members {
                resolved.apply(mutator, setting);
            }
        }
        for (name, setting) in singles {
            let mutator: Mutator = name
                .parse()
                .map_err(|_| ConfigError::UnknownEntry(name.clone()))?;
            resolved.apply(mutator, setting);
        }

        debug!(enabled = resolved.enabled.len(), "resolved mutator profile");
        Ok(resolved)
    }
}

impl ResolvedProfile {
    fn apply(&mut self, mutator: Mutator, setting: &MutatorSetting) {
        match setting {
            MutatorSetting::Enabled(true) => {
                self.enabled.insert(mutator);
            }
            MutatorSetting::Enabled(false) => {
                self.enabled.remove(&mutator);
                self.ignore.remove(&mutator);
            }
            MutatorSetting::Detailed(options) => {
                self.enabled.insert(mutator);
                self.ignore
                    .entry(mutator)
                    .or_default()
                    .extend(options.ignore.iter().cloned());
            }
        }
    }

    pub fn is_enabled(&self, mutator: Mutator) -> bool {
        self.enabled.contains(&mutator)
    }

    pub fn enabled(&self) -> impl Iterator<Item = Mutator> + '_ {
        self.enabled.iter().copied()
    }

    /// Whether a mutation should be reported as ignored instead of executed.
    pub fn is_ignored(&self, mutation: &Mutation) -> bool {
        if !self.is_enabled(mutation.mutator) {
            return true;
        }
        self.ignore.get(&mutation.mutator).is_some_and(|prefixes| {
            prefixes
                .iter()
                .any(|prefix| mutation.original_file_path.starts_with(prefix))
        })
    }
}
