use std::time::Duration;

use crate::chart::{ChartId, MountRegistry};
use crate::export::DEFAULT_EXPORT_FILE;
use crate::refresh::{Perturbation, RefreshConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub refresh_secs: u64,
    pub perturb_amplitude: f64,
    pub rng_seed: Option<u64>,
    pub export_path: String,
    /// Mount points present on the page.
    pub mounts: Vec<String>,
    /// Stop the refresh loop after this many ticks instead of waiting for Ctrl-C.
    pub run_ticks: Option<u64>,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            refresh_secs: get("REFRESH_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(30),
            perturb_amplitude: get("PERTURB_AMPLITUDE")
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| (0.0..=Perturbation::MAX_AMPLITUDE).contains(v))
                .unwrap_or(1.0),
            rng_seed: get("RNG_SEED").and_then(|v| v.parse().ok()),
            export_path: get("EXPORT_PATH").unwrap_or_else(|| DEFAULT_EXPORT_FILE.to_string()),
            mounts: get("MOUNTS")
                .map(|v| {
                    v.split(',')
                        .map(|m| m.trim().to_string())
                        .filter(|m| !m.is_empty())
                        .collect()
                })
                .unwrap_or_else(|| ChartId::ALL.iter().map(|id| id.mount_point()).collect()),
            run_ticks: get("RUN_TICKS").and_then(|v| v.parse().ok()),
        }
    }

    pub fn mount_registry(&self) -> MountRegistry {
        MountRegistry::from_names(self.mounts.iter().cloned())
    }

    pub fn refresh_config(&self) -> RefreshConfig {
        RefreshConfig {
            interval: Duration::from_secs(self.refresh_secs),
            perturbation: Perturbation::new(self.perturb_amplitude),
            seed: self.rng_seed,
            max_ticks: self.run_ticks,
        }
    }
}
