use crate::{
    money::Rupees,
    profile::JobSubscriptionPlan,
};
use anyhow::{
    Context,
    anyhow,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};

pub const DEFAULT_DATA_DIR_NAME: &str = ".earnhub";
const SETTINGS_FILE: &str = "settings.json";
const STORAGE_DIR: &str = "storage";
const LOGS_DIR: &str = "logs";

/// Amounts and durations that drive the ledger flows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardRules {
    pub joining_fee: Rupees,
    pub level1_referral_bonus: Rupees,
    pub level2_referral_bonus: Rupees,
    pub spin_costs: Vec<Rupees>,
    /// Prizes below this are announced as "so close".
    pub low_prize_threshold: Rupees,
    pub subscription_days: i64,
    pub subscription_plans: Vec<PlanOffer>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanOffer {
    pub plan: JobSubscriptionPlan,
    pub cost: Rupees,
}

impl Default for RewardRules {
    fn default() -> Self {
        Self {
            joining_fee: Rupees::whole(50),
            level1_referral_bonus: Rupees::whole(20),
            level2_referral_bonus: Rupees::whole(5),
            spin_costs: vec![Rupees::whole(1), Rupees::whole(5), Rupees::whole(10)],
            low_prize_threshold: Rupees::whole(1),
            subscription_days: 30,
            subscription_plans: vec![
                PlanOffer {
                    plan: JobSubscriptionPlan::Basic,
                    cost: Rupees::whole(200),
                },
                PlanOffer {
                    plan: JobSubscriptionPlan::Standard,
                    cost: Rupees::whole(350),
                },
                PlanOffer {
                    plan: JobSubscriptionPlan::Premium,
                    cost: Rupees::whole(500),
                },
            ],
        }
    }
}

impl RewardRules {
    pub fn plan_cost(&self, plan: JobSubscriptionPlan) -> Option<Rupees> {
        self.subscription_plans
            .iter()
            .find(|offer| offer.plan == plan)
            .map(|offer| offer.cost)
    }

    pub fn is_spin_cost(&self, cost: Rupees) -> bool {
        self.spin_costs.contains(&cost)
    }
}

/// Delays of the simulated asynchronous flows, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub verification_delay_ms: u64,
    pub spin_duration_ms: u64,
    pub spin_tick_ms: u64,
    pub win_display_ms: u64,
    pub landing_counter_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            verification_delay_ms: 5_000,
            spin_duration_ms: 5_000,
            spin_tick_ms: 120,
            win_display_ms: 3_000,
            landing_counter_ms: 2_000,
        }
    }
}

impl Timings {
    pub fn verification_delay(&self) -> Duration {
        Duration::from_millis(self.verification_delay_ms)
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    pub fn spin_tick(&self) -> Duration {
        Duration::from_millis(self.spin_tick_ms.max(1))
    }

    pub fn win_display(&self) -> Duration {
        Duration::from_millis(self.win_display_ms)
    }

    pub fn landing_counter(&self) -> Duration {
        Duration::from_millis(self.landing_counter_ms.max(1))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rules: RewardRules,
    pub timings: Timings,
}

impl Settings {
    /// Reads `settings.json` from the data directory, writing the defaults first
    /// when the file is missing or empty.
    pub fn load_or_create(data_dir: &Path) -> anyhow::Result<Self> {
        let path = data_dir.join(SETTINGS_FILE);
        if path.exists() {
            let data = fs::read(&path)
                .with_context(|| format!("Failed to read settings at {}", path.display()))?;
            if !data.iter().all(u8::is_ascii_whitespace) {
                return serde_json::from_slice(&data).with_context(|| {
                    format!("Failed to parse settings JSON at {}", path.display())
                });
            }
        }
        let settings = Settings::default();
        settings.save(data_dir)?;
        Ok(settings)
    }

    pub fn save(&self, data_dir: &Path) -> anyhow::Result<()> {
        let path = data_dir.join(SETTINGS_FILE);
        let json =
            serde_json::to_vec_pretty(self).context("Failed to serialize settings")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        Ok(())
    }
}

pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(DEFAULT_DATA_DIR_NAME))
}

pub fn resolve_data_dir(dir: Option<&str>) -> anyhow::Result<PathBuf> {
    match dir {
        Some(raw) => {
            let expanded = shellexpand::tilde(raw);
            Ok(PathBuf::from(expanded.into_owned()))
        }
        None => default_data_dir(),
    }
}

pub fn storage_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(STORAGE_DIR)
}

pub fn logs_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(LOGS_DIR)
}

/// Creates the data directory layout if it does not exist yet.
pub fn ensure_structure(data_dir: &Path) -> anyhow::Result<()> {
    for dir in [data_dir.to_path_buf(), logs_dir(data_dir)] {
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        if !dir.is_dir() {
            return Err(anyhow!("{} exists but is not a directory", dir.display()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn load_or_create__writes_defaults_when_missing() {
        // given
        let dir = TempDir::new("earnhub_settings").unwrap();

        // when
        let settings = Settings::load_or_create(dir.path()).unwrap();

        // then
        assert_eq!(settings, Settings::default());
        assert!(dir.path().join(SETTINGS_FILE).exists());
    }

    #[test]
    fn load_or_create__fills_missing_fields_with_defaults() {
        // given
        let dir = TempDir::new("earnhub_settings_partial").unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            br#"{"rules":{"joining_fee":75},"timings":{"verification_delay_ms":10}}"#,
        )
        .unwrap();

        // when
        let settings = Settings::load_or_create(dir.path()).unwrap();

        // then
        assert_eq!(settings.rules.joining_fee, Rupees::whole(75));
        assert_eq!(settings.rules.level1_referral_bonus, Rupees::whole(20));
        assert_eq!(settings.timings.verification_delay_ms, 10);
        assert_eq!(settings.timings.spin_duration_ms, 5_000);
    }

    #[test]
    fn load_or_create__rejects_malformed_json() {
        // given
        let dir = TempDir::new("earnhub_settings_bad").unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), b"{not json").unwrap();

        // when
        let result = Settings::load_or_create(dir.path());

        // then
        assert!(result.is_err());
    }

    #[test]
    fn ensure_structure__creates_logs_dir() {
        // given
        let dir = TempDir::new("earnhub_structure").unwrap();
        let data_dir = dir.path().join("nested");

        // when
        ensure_structure(&data_dir).unwrap();

        // then
        assert!(logs_dir(&data_dir).is_dir());
    }

    #[test]
    fn resolve_data_dir__keeps_explicit_paths() {
        let resolved = resolve_data_dir(Some("/tmp/earnhub-data")).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/earnhub-data"));
    }
}
