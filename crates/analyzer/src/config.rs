//! `harmonize.toml`: worker threads, per-rule severities and suggestion
//! limits.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::diagnostics::{Rule, Severity};
use crate::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = "harmonize.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSetting {
    Error,
    Warning,
    Info,
    Off,
}

impl RuleSetting {
    /// `None` when the rule is turned off.
    pub fn severity(self) -> Option<Severity> {
        match self {
            RuleSetting::Error => Some(Severity::Error),
            RuleSetting::Warning => Some(Severity::Warning),
            RuleSetting::Info => Some(Severity::Info),
            RuleSetting::Off => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSettings {
    /// 0 means one worker per CPU.
    pub worker_threads: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuggestionSettings {
    pub enabled: bool,
    /// 0 means unlimited.
    pub max_per_diagnostic: usize,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_per_diagnostic: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub analysis: AnalysisSettings,
    /// Rule id -> setting. Ids are checked by [`AnalyzerConfig::validate`].
    pub rules: BTreeMap<String, RuleSetting>,
    pub suggestions: SuggestionSettings,
}

impl AnalyzerConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = content.parse()?;
        debug!(path = %path.display(), rules = config.rules.len(), "Loaded configuration");
        Ok(config)
    }

    /// Rejects rule ids that name no rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.rules.keys().find(|id| Rule::from_id(id).is_none()) {
            Some(unknown) => Err(ConfigError::UnknownRule(unknown.clone())),
            None => Ok(()),
        }
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.analysis.worker_threads = threads;
        self
    }

    pub fn effective_threads(&self) -> usize {
        Self::get_effective_threads(self.analysis.worker_threads)
    }

    pub fn get_effective_threads(threads: usize) -> usize {
        if threads == 0 {
            num_cpus::get()
        } else {
            threads
        }
    }

    /// The configured severity of `rule`, its default when unset, `None` when off.
    pub fn severity_for(&self, rule: Rule) -> Option<Severity> {
        match self.rules.get(rule.id()) {
            Some(setting) => setting.severity(),
            None => Some(rule.descriptor().default_severity),
        }
    }

    pub fn is_enabled(&self, rule: Rule) -> bool {
        self.severity_for(rule).is_some()
    }
}

impl FromStr for AnalyzerConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_file_gives_defaults() {
        let config: AnalyzerConfig = "".parse().unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert!(config.suggestions.enabled);
        assert_eq!(
            config.severity_for(Rule::AmbiguousTarget),
            Some(Severity::Error)
        );
        assert!(config.effective_threads() > 0);
    }

    #[test]
    fn rules_override_severity_or_turn_off() {
        let config: AnalyzerConfig = r#"
            [analysis]
            worker_threads = 3

            [rules]
            HARMONIZE003 = "off"
            HARMONIZE004 = "error"

            [suggestions]
            max_per_diagnostic = 2
        "#
        .parse()
        .unwrap();

        assert_eq!(config.effective_threads(), 3);
        assert!(!config.is_enabled(Rule::MissingClassPatch));
        assert_eq!(
            config.severity_for(Rule::UnspecifiedPatchType),
            Some(Severity::Error)
        );
        assert_eq!(
            config.severity_for(Rule::AmbiguousData),
            Some(Severity::Warning)
        );
        assert_eq!(config.suggestions.max_per_diagnostic, 2);
        assert!(config.suggestions.enabled);
    }

    #[test]
    fn unknown_rule_ids_are_rejected() {
        let err = "[rules]\nHARMONIZE042 = \"off\"\n"
            .parse::<AnalyzerConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRule(id) if id == "HARMONIZE042"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = "[analysis]\nthreads = 2\n"
            .parse::<AnalyzerConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));

        let err = "[rules]\nHARMONIZE001 = \"fatal\"\n"
            .parse::<AnalyzerConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn loads_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[suggestions]\nenabled = false\n").unwrap();

        let config = AnalyzerConfig::from_path(&path).unwrap();
        assert!(!config.suggestions.enabled);

        let missing = AnalyzerConfig::from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn cli_threads_override_the_file() {
        let config: AnalyzerConfig = "[analysis]\nworker_threads = 8\n".parse().unwrap();
        assert_eq!(config.with_worker_threads(2).effective_threads(), 2);
    }
}
