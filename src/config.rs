use std::path::PathBuf;

use crate::data::stats::DEFAULT_BINS;

pub const DATA_VAR: &str = "TEXAS_DASHBOARD_DATA";
pub const BINS_VAR: &str = "TEXAS_DASHBOARD_BINS";
pub const TOP_N_VAR: &str = "TEXAS_DASHBOARD_TOP_N";

pub const DEFAULT_DATA_PATH: &str = "data/real_estate_texas_500_2024.csv";
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a whole number")]
    InvalidNumber { var: &'static str, value: String },
    #[error("TEXAS_DASHBOARD_BINS must be at least 1")]
    ZeroBins,
}

/// Startup settings, read once from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub histogram_bins: usize,
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            histogram_bins: DEFAULT_BINS,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_VAR).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(bins) = parse_count(&lookup, BINS_VAR)? {
            if bins == 0 {
                return Err(ConfigError::ZeroBins);
            }
            config.histogram_bins = bins;
        }
        if let Some(top_n) = parse_count(&lookup, TOP_N_VAR)? {
            config.top_n = top_n;
        }
        Ok(config)
    }
}

fn parse_count(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<usize>, ConfigError> {
    lookup(var)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { var, value })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = DashboardConfig::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.histogram_bins, 50);
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn variables_override_defaults() {
        let config = DashboardConfig::from_lookup(lookup_in(&[
            (DATA_VAR, "/tmp/listings.csv"),
            (BINS_VAR, " 20 "),
            (TOP_N_VAR, "5"),
        ]))
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/tmp/listings.csv"));
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = DashboardConfig::from_lookup(lookup_in(&[(TOP_N_VAR, "ten")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: TOP_N_VAR,
                value: "ten".to_string()
            }
        );
        let err = DashboardConfig::from_lookup(lookup_in(&[(BINS_VAR, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroBins);
    }
}
