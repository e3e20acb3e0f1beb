//! Run configuration from `CLVECADD_*` environment variables.
//!
//! There is no configuration file. Every field starts from its default and
//! is overridden by the matching variable when it is set:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `CLVECADD_ELEMENT_COUNT` | [`RunConfig::element_count`] |
//! | `CLVECADD_KERNEL_PATH` | [`RunConfig::kernel_path`] |
//! | `CLVECADD_WORK_GROUP_SIZE` | [`RunConfig::work_group_size`] |
//! | `CLVECADD_LOG_LEVEL` | [`RunConfig::log_level`] |
//! | `CLVECADD_LOG_FORMAT` | [`RunConfig::log_format`] |

use std::path::PathBuf;

/// Default vector length: 32 Mi elements.
pub const DEFAULT_ELEMENT_COUNT: usize = 32 * 1024 * 1024;

/// Longest ramp workload whose sums `i + 2 * i` still fit in `i32`.
pub const MAX_ELEMENT_COUNT: usize = (i32::MAX as usize) / 3 + 1;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => {
                Err(format!("unknown log format '{other}'. Expected one of: compact, pretty, json"))
            }
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Settings for one run of the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of elements in each vector.
    /// Override: `CLVECADD_ELEMENT_COUNT`
    pub element_count: usize,

    /// External kernel source; `None` uses the embedded `add` kernel.
    /// Override: `CLVECADD_KERNEL_PATH`
    pub kernel_path: Option<PathBuf>,

    /// Cap on the local work size; `None` uses the device maximum.
    /// Override: `CLVECADD_WORK_GROUP_SIZE`
    pub work_group_size: Option<usize>,

    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    /// Override: `CLVECADD_LOG_LEVEL`
    pub log_level: String,

    /// Override: `CLVECADD_LOG_FORMAT`
    pub log_format: LogFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            element_count: DEFAULT_ELEMENT_COUNT,
            kernel_path: None,
            work_group_size: None,
            log_level: "warn".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

/// Errors from loading or validating a [`RunConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid environment override {key}={value}: {reason}")]
    EnvOverride { key: String, value: String, reason: String },
}

impl RunConfig {
    /// Defaults with environment overrides applied, then validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.element_count > MAX_ELEMENT_COUNT {
            return Err(ConfigError::Validation(format!(
                "element_count must be <= {MAX_ELEMENT_COUNT}, got {}",
                self.element_count
            )));
        }
        if self.work_group_size == Some(0) {
            return Err(ConfigError::Validation("work_group_size must be > 0".into()));
        }
        if self.kernel_path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Validation("kernel_path must not be empty".into()));
        }
        Ok(())
    }

    /// Apply `CLVECADD_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("CLVECADD_ELEMENT_COUNT") {
            self.element_count = parse_override("CLVECADD_ELEMENT_COUNT", &val)?;
        }

        if let Some(val) = std::env::var_os("CLVECADD_KERNEL_PATH") {
            self.kernel_path = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("CLVECADD_WORK_GROUP_SIZE") {
            self.work_group_size = Some(parse_override("CLVECADD_WORK_GROUP_SIZE", &val)?);
        }

        if let Ok(val) = std::env::var("CLVECADD_LOG_LEVEL") {
            self.log_level = val;
        }

        if let Ok(val) = std::env::var("CLVECADD_LOG_FORMAT") {
            self.log_format = val.parse().map_err(|reason| ConfigError::EnvOverride {
                key: "CLVECADD_LOG_FORMAT".into(),
                value: val.clone(),
                reason,
            })?;
        }

        Ok(())
    }
}

fn parse_override(key: &str, val: &str) -> Result<usize, ConfigError> {
    val.trim().parse::<usize>().map_err(|e| ConfigError::EnvOverride {
        key: key.into(),
        value: val.into(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use temp_env::{with_var, with_vars};

    const ALL_VARS: [&str; 5] = [
        "CLVECADD_ELEMENT_COUNT",
        "CLVECADD_KERNEL_PATH",
        "CLVECADD_WORK_GROUP_SIZE",
        "CLVECADD_LOG_LEVEL",
        "CLVECADD_LOG_FORMAT",
    ];

    fn with_clean_env<F: FnOnce()>(f: F) {
        temp_env::with_vars_unset(ALL_VARS, f);
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = RunConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.element_count, 33_554_432);
        assert!(cfg.kernel_path.is_none());
    }

    #[test]
    fn max_element_count_sums_fit_in_i32() {
        let last = (MAX_ELEMENT_COUNT - 1) as i64;
        assert!(3 * last <= i64::from(i32::MAX));
        assert!(3 * (last + 1) > i64::from(i32::MAX));
    }

    #[test]
    #[serial(clvecadd_env)]
    fn from_env_without_overrides_is_default() {
        with_clean_env(|| {
            assert_eq!(RunConfig::from_env().unwrap(), RunConfig::default());
        });
    }

    #[test]
    #[serial(clvecadd_env)]
    fn overrides_are_applied() {
        with_clean_env(|| {
            with_vars(
                [
                    ("CLVECADD_ELEMENT_COUNT", Some("1024")),
                    ("CLVECADD_KERNEL_PATH", Some("/tmp/add.cl")),
                    ("CLVECADD_WORK_GROUP_SIZE", Some("64")),
                    ("CLVECADD_LOG_LEVEL", Some("debug")),
                    ("CLVECADD_LOG_FORMAT", Some("JSON")),
                ],
                || {
                    let cfg = RunConfig::from_env().unwrap();
                    assert_eq!(cfg.element_count, 1024);
                    assert_eq!(cfg.kernel_path, Some(PathBuf::from("/tmp/add.cl")));
                    assert_eq!(cfg.work_group_size, Some(64));
                    assert_eq!(cfg.log_level, "debug");
                    assert_eq!(cfg.log_format, LogFormat::Json);
                },
            );
        });
    }

    #[test]
    #[serial(clvecadd_env)]
    fn zero_elements_is_allowed() {
        with_clean_env(|| {
            with_var("CLVECADD_ELEMENT_COUNT", Some("0"), || {
                assert_eq!(RunConfig::from_env().unwrap().element_count, 0);
            });
        });
    }

    #[test]
    #[serial(clvecadd_env)]
    fn non_numeric_count_is_an_env_override_error() {
        with_clean_env(|| {
            with_var("CLVECADD_ELEMENT_COUNT", Some("lots"), || {
                let err = RunConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::EnvOverride { ref key, .. } if key == "CLVECADD_ELEMENT_COUNT"));
                assert!(err.to_string().contains("CLVECADD_ELEMENT_COUNT=lots"));
            });
        });
    }

    #[test]
    #[serial(clvecadd_env)]
    fn oversized_count_fails_validation() {
        with_clean_env(|| {
            with_var("CLVECADD_ELEMENT_COUNT", Some("1000000000"), || {
                let err = RunConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("element_count must be <="));
            });
        });
    }

    #[test]
    #[serial(clvecadd_env)]
    fn zero_work_group_size_fails_validation() {
        with_clean_env(|| {
            with_var("CLVECADD_WORK_GROUP_SIZE", Some("0"), || {
                let err = RunConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("work_group_size must be > 0"));
            });
        });
    }

    #[test]
    #[serial(clvecadd_env)]
    fn unknown_log_format_is_rejected() {
        with_clean_env(|| {
            with_var("CLVECADD_LOG_FORMAT", Some("xml"), || {
                let err = RunConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("unknown log format 'xml'"));
            });
        });
    }

    #[test]
    fn empty_kernel_path_fails_validation() {
        let cfg = RunConfig { kernel_path: Some(PathBuf::new()), ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn log_format_display_parses_back() {
        for format in [LogFormat::Compact, LogFormat::Pretty, LogFormat::Json] {
            assert_eq!(format.to_string().parse::<LogFormat>(), Ok(format));
        }
    }
}
