use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use crowdcore::prelude::AreaId;
use serde::{Deserialize, Serialize};

/// Which dashboard surface the driver emulates.
///
/// Admin polls every configured area; user polls only the areas the
/// backend reports as assigned to the session's account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Admin,
    User,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub surface: Surface,
    pub areas: Vec<AreaId>,
    pub live_interval_ms: u64,
    pub history_interval_ms: u64,
    pub zones_interval_ms: u64,
    pub violations_interval_ms: u64,
    pub zone_cache_ttl_ms: u64,
    pub alert_dismiss_ms: u64,
    pub history_limit: u32,
    pub history_hours: u32,
    pub watch_zones: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            token: None,
            surface: Surface::Admin,
            areas: AreaId::ALL.to_vec(),
            live_interval_ms: 1_500,
            history_interval_ms: 10_000,
            zones_interval_ms: 5_000,
            violations_interval_ms: 30_000,
            zone_cache_ttl_ms: 10_000,
            alert_dismiss_ms: 10_000,
            history_limit: 50,
            history_hours: 1,
            watch_zones: false,
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dashboard config {}", path_ref.display()))?;
        let config: DashboardConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing dashboard config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Fold command-line overrides into a loaded or default config.
    pub fn apply_cli(
        &mut self,
        base_url: Option<String>,
        token: Option<String>,
        surface: Option<Surface>,
        watch_zones: bool,
    ) {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(token) = token {
            self.token = Some(token);
        }
        if let Some(surface) = surface {
            self.surface = surface;
        }
        self.watch_zones |= watch_zones;
    }

    pub fn live_interval(&self) -> Duration {
        Duration::from_millis(self.live_interval_ms)
    }

    pub fn history_interval(&self) -> Duration {
        Duration::from_millis(self.history_interval_ms)
    }

    pub fn zones_interval(&self) -> Duration {
        Duration::from_millis(self.zones_interval_ms)
    }

    pub fn violations_interval(&self) -> Duration {
        Duration::from_millis(self.violations_interval_ms)
    }

    pub fn zone_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.zone_cache_ttl_ms)
    }

    pub fn alert_dismiss(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_the_polling_bands() {
        let config = DashboardConfig::default();
        assert_eq!(config.live_interval(), Duration::from_millis(1_500));
        assert_eq!(config.history_interval(), Duration::from_secs(10));
        assert_eq!(config.zones_interval(), Duration::from_secs(5));
        assert_eq!(config.zone_cache_ttl(), Duration::from_secs(10));
        assert_eq!(config.areas, AreaId::ALL.to_vec());
        assert!(!config.watch_zones);
    }

    #[test]
    fn config_load_reads_partial_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"base_url: http://10.0.0.4:5000\nsurface: user\nareas: [entrance, retail]\nlive_interval_ms: 2000\n",
        )
        .unwrap();
        let path = temp.into_temp_path();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.4:5000");
        assert_eq!(config.surface, Surface::User);
        assert_eq!(config.areas, vec![AreaId::Entrance, AreaId::Retail]);
        assert_eq!(config.live_interval_ms, 2_000);
        // Untouched fields keep their defaults.
        assert_eq!(config.history_interval_ms, 10_000);
    }

    #[test]
    fn cli_overrides_win_without_clobbering_the_rest() {
        let mut config = DashboardConfig::default();
        config.token = Some("from-config".into());

        config.apply_cli(
            Some("http://127.0.0.1:8080".into()),
            Some("from-cli".into()),
            None,
            true,
        );

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.token.as_deref(), Some("from-cli"));
        assert_eq!(config.surface, Surface::Admin);
        assert!(config.watch_zones);
    }
}
