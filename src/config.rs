//! Timeline configuration.
//!
//! Loaded from `~/.pr-timeline/config.toml` unless a path is given. The
//! default file is optional: when it is absent the built-in sources are used.
//! A path given explicitly must exist.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::{fs, io};

use jiff::tz::TimeZone;
use serde::Deserialize;
use tracing::debug;

use crate::filter::{DEFAULT_BOT_TOKEN, FilterRules};
use crate::label::TimestampLabeler;
use crate::merge::MergeEngine;
use crate::timeline::{CallToAction, Timeline};

/// Errors that can occur while loading or applying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {error}", path.display())]
    Read { path: PathBuf, error: io::Error },

    #[error("invalid config at {}: {error}", path.display())]
    Parse {
        path: PathBuf,
        error: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("unknown time zone '{name}': {error}")]
    TimeZone { name: String, error: jiff::Error },
}

pub type Result<T> = core::result::Result<T, ConfigError>;

/// One repository whose pull requests feed the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceConfig {
    /// Display name, as in "merged a Pull Request into {name}!".
    pub name: String,

    /// `owner/repo` on GitHub.
    pub repo: String,
}

impl SourceConfig {
    fn new(name: &str, repo: &str) -> Self {
        Self {
            name: name.to_string(),
            repo: repo.to_string(),
        }
    }
}

/// Timeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// IANA zone for timestamp labels, or `UTC`. The system zone when unset.
    pub timezone: Option<String>,

    /// Logins containing any of these (case-insensitive) are treated as bots.
    pub bot_tokens: Vec<String>,

    /// Pull requests requested per source.
    pub per_page: u32,

    pub call_to_action: CallToAction,

    /// Repository the contributor list is read from.
    pub contributors_repo: String,

    pub sources: Vec<SourceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: None,
            bot_tokens: vec![DEFAULT_BOT_TOKEN.to_string()],
            per_page: 30,
            call_to_action: CallToAction::default(),
            contributors_repo: "BUGS-NYU/bugs-nyu.github.io".to_string(),
            sources: vec![
                SourceConfig::new("the BUGS Website", "BUGS-NYU/bugs-nyu.github.io"),
                SourceConfig::new("Schedge", "BUGS-NYU/schedge"),
                SourceConfig::new("Alberta", "BUGS-NYU/freshman-schedge-generator"),
            ],
        }
    }
}

impl Config {
    /// Load config from `explicit`, or from the default path if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        match Self::path() {
            Some(path) if path.exists() => Self::read(&path),
            path => {
                debug!(path = ?path, "no config file; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The default config file path: `~/.pr-timeline/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".pr-timeline").join("config.toml"))
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse and validate config text. `path` is only used in error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            return Err(ConfigError::Invalid("per-page must be at least 1".into()));
        }
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "source for '{}' has an empty name",
                    source.repo
                )));
            }
            if !is_repo_slug(&source.repo) {
                return Err(ConfigError::Invalid(format!(
                    "source '{}' repo must be owner/repo, got '{}'",
                    source.name, source.repo
                )));
            }
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.sources.iter().find(|s| !seen.insert(s.name.as_str())) {
            return Err(ConfigError::Invalid(format!(
                "source name '{}' is used more than once",
                dup.name
            )));
        }
        Ok(())
    }

    /// The zone timestamp labels are rendered in.
    pub fn time_zone(&self) -> Result<TimeZone> {
        match &self.timezone {
            None => Ok(TimeZone::system()),
            Some(name) if name.eq_ignore_ascii_case("UTC") => Ok(TimeZone::UTC),
            Some(name) => TimeZone::get(name).map_err(|error| ConfigError::TimeZone {
                name: name.clone(),
                error,
            }),
        }
    }

    pub fn filter_rules(&self) -> FilterRules {
        FilterRules::new(&self.bot_tokens)
    }

    /// A timeline wired with this config's rules, zone and call to action.
    pub fn timeline(&self) -> Result<Timeline> {
        let engine = MergeEngine::new(
            self.filter_rules(),
            TimestampLabeler::new(self.time_zone()?),
        );
        Ok(Timeline::new(engine, self.call_to_action.clone()))
    }
}

fn is_repo_slug(repo: &str) -> bool {
    matches!(
        repo.split_once('/'),
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<Config> {
        Config::parse(contents, Path::new("test.toml"))
    }

    #[test]
    fn defaults_list_the_three_projects() {
        let config = Config::default();
        let names: Vec<&str> = config.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["the BUGS Website", "Schedge", "Alberta"]);
        assert_eq!(config.bot_tokens, vec!["dependabot"]);
        assert_eq!(config.call_to_action.label, "NOW");
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn parses_full_config() {
        let config = parse(
            r#"
            bot-tokens = ["dependabot", "renovate"]
            per-page = 50
            contributors-repo = "acme/site"

            [call-to-action]
            text = "Your PR here"
            url = "https://github.com/acme"

            [[sources]]
            name = "Widgets"
            repo = "acme/widgets"
            "#,
        )
        .unwrap();

        assert_eq!(config.per_page, 50);
        assert_eq!(config.sources, vec![SourceConfig::new("Widgets", "acme/widgets")]);
        assert_eq!(config.call_to_action.text, "Your PR here");
        // Unset keys in a table fall back to their defaults.
        assert_eq!(config.call_to_action.label, "NOW");
        assert!(config.filter_rules().is_bot("renovate[bot]"));
        assert!(config.timeline().is_ok());
    }

    #[test]
    fn rejects_bad_repo_slug() {
        let err = parse("[[sources]]\nname = \"X\"\nrepo = \"just-a-name\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_duplicate_source_names() {
        let err = parse(
            "[[sources]]\nname = \"X\"\nrepo = \"a/b\"\n[[sources]]\nname = \"X\"\nrepo = \"a/c\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn rejects_zero_per_page() {
        assert!(matches!(parse("per-page = 0"), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_unparseable_toml() {
        assert!(matches!(parse("per-page = ["), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn unknown_time_zone_is_an_error() {
        let config = parse("timezone = \"Mars/Olympus_Mons\"").unwrap();
        assert!(matches!(config.time_zone(), Err(ConfigError::TimeZone { .. })));
    }

    #[test]
    fn utc_needs_no_zone_database() {
        let config = parse("timezone = \"utc\"").unwrap();
        let labeler = TimestampLabeler::new(config.time_zone().unwrap());
        let ts = "2020-10-05T14:07:33Z".parse().unwrap();
        assert_eq!(labeler.label(ts), "10/5/2020 2:07 PM");
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("missing.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn loads_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "per-page = 5\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.per_page, 5);
    }
}
