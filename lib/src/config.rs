use crate::error::{ChromemarkError, Result, Warning, WarningSink};
use crate::finder::DEFAULT_SEARCH_DEPTH;
use crate::profile::ProfileFilter;
use crate::utils;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Escaped form of the default indent, as typed on the command line
pub const DEFAULT_INDENT_ESCAPED: &str = "\\t";

/// Settings that may come from a config file or from command-line flags.
/// Every field is optional; see [`Config::merge`] for precedence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory searched for `Bookmarks` files
    pub input: Option<PathBuf>,
    /// Output file, stdout when unset
    pub output: Option<PathBuf>,
    /// Profile names to include, every profile when unset or empty
    pub profiles: Option<Vec<String>>,
    /// Indent unit, escapes like `\t` allowed
    pub indent: Option<String>,
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ChromemarkError::io(path, e))?;
        if contents
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'))
        {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Default config file location (~/.config/chromemark/config.yml)
    pub fn default_path() -> PathBuf {
        utils::get_config_dir().join("config.yml")
    }

    /// Load configuration from the default location.
    /// Falls back to the default config if the file is missing or broken.
    pub fn load(warnings: &mut dyn WarningSink) -> Self {
        let config_path = Self::default_path();

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from_path(&config_path) {
            Ok(config) => {
                log::debug!("Loaded config from {}", config_path.display());
                config
            }
            Err(e) => {
                warnings.warn(Warning::BrokenConfig {
                    path: config_path,
                    message: e.to_string(),
                });
                Self::default()
            }
        }
    }

    /// Fill every unset field of `self` from `fallback`
    pub fn merge(self, fallback: Config) -> Config {
        Config {
            input: self.input.or(fallback.input),
            output: self.output.or(fallback.output),
            profiles: self.profiles.or(fallback.profiles),
            indent: self.indent.or(fallback.indent),
        }
    }

    /// Resolve into the immutable options a run works from.
    ///
    /// `default_input` is used when no input directory was configured; if
    /// that is missing too the caller has to supply one.
    pub fn into_options(self, default_input: Option<PathBuf>) -> Result<Options> {
        let input = self.input.or(default_input).ok_or_else(|| {
            ChromemarkError::InvalidInput(
                "no default Chrome location on this system, specify the input directory"
                    .to_string(),
            )
        })?;

        let indent = utils::unescape_indent(
            self.indent
                .as_deref()
                .unwrap_or(DEFAULT_INDENT_ESCAPED),
        );

        Ok(Options {
            input: utils::clean_path(&input),
            output: self.output,
            profiles: self
                .profiles
                .map(ProfileFilter::from_names)
                .unwrap_or_default(),
            indent,
            max_depth: DEFAULT_SEARCH_DEPTH,
        })
    }
}

/// Everything a conversion run needs, fixed before the run starts
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub profiles: ProfileFilter,
    pub indent: String,
    pub max_depth: usize,
}

impl Options {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: utils::clean_path(&input.into()),
            output: None,
            profiles: ProfileFilter::All,
            indent: crate::render::DEFAULT_INDENT.to_string(),
            max_depth: DEFAULT_SEARCH_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(
            temp_file.path(),
            "input: /data/chrome\noutput: out.md\nprofiles:\n  - Default\n  - Profile 1\nindent: \"  \"\n",
        )
        .unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.input, Some(PathBuf::from("/data/chrome")));
        assert_eq!(config.output, Some(PathBuf::from("out.md")));
        assert_eq!(
            config.profiles,
            Some(vec!["Default".to_string(), "Profile 1".to_string()])
        );
        assert_eq!(config.indent.as_deref(), Some("  "));
    }

    #[test]
    fn test_load_partial_config() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "# Empty config\n").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "invalid: yaml: content:").unwrap();

        let result = Config::load_from_path(temp_file.path());
        assert!(matches!(result, Err(ChromemarkError::Yaml(_))));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "inptu: /typo\n").unwrap();

        assert!(Config::load_from_path(temp_file.path()).is_err());
    }

    #[test]
    fn test_flags_take_precedence() {
        let flags = Config {
            indent: Some("  ".to_string()),
            ..Default::default()
        };
        let file = Config {
            input: Some(PathBuf::from("/from/file")),
            indent: Some("\\t".to_string()),
            ..Default::default()
        };

        let merged = flags.merge(file);
        assert_eq!(merged.input, Some(PathBuf::from("/from/file")));
        assert_eq!(merged.indent.as_deref(), Some("  "));
    }

    #[test]
    fn test_into_options_defaults() {
        let options = Config::default()
            .into_options(Some(PathBuf::from("/chrome/")))
            .unwrap();

        assert_eq!(options.input, PathBuf::from("/chrome"));
        assert_eq!(options.output, None);
        assert_eq!(options.profiles, ProfileFilter::All);
        assert_eq!(options.indent, "\t");
        assert_eq!(options.max_depth, DEFAULT_SEARCH_DEPTH);
    }

    #[test]
    fn test_into_options_requires_input() {
        let result = Config::default().into_options(None);
        assert!(matches!(result, Err(ChromemarkError::InvalidInput(_))));
    }

    #[test]
    fn test_into_options_unescapes_indent() {
        let config = Config {
            indent: Some("\\t\\t".to_string()),
            ..Default::default()
        };
        let options = config.into_options(Some(PathBuf::from("/chrome"))).unwrap();
        assert_eq!(options.indent, "\t\t");
    }

    #[test]
    fn test_profiles_become_filter() {
        let config = Config {
            profiles: Some(vec!["Profile 1/".to_string()]),
            ..Default::default()
        };
        let options = config.into_options(Some(PathBuf::from("/c"))).unwrap();
        assert!(options.profiles.matches("Profile 1"));
        assert!(!options.profiles.matches("Default"));
    }
}
