use crate::{
    config::RewardRules,
    money::Rupees,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralCounters {
    #[serde(default)]
    pub level1: u32,
    #[serde(default)]
    pub level2: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferralLevel {
    Direct,
    Indirect,
}

impl ReferralLevel {
    pub fn number(self) -> u8 {
        match self {
            ReferralLevel::Direct => 1,
            ReferralLevel::Indirect => 2,
        }
    }

    pub fn bonus(self, rules: &RewardRules) -> Rupees {
        match self {
            ReferralLevel::Direct => rules.level1_referral_bonus,
            ReferralLevel::Indirect => rules.level2_referral_bonus,
        }
    }
}

impl fmt::Display for ReferralLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}", self.number())
    }
}

impl ReferralCounters {
    pub fn record(&mut self, level: ReferralLevel) {
        match level {
            ReferralLevel::Direct => self.level1 = self.level1.saturating_add(1),
            ReferralLevel::Indirect => self.level2 = self.level2.saturating_add(1),
        }
    }

    pub fn total(&self) -> u32 {
        self.level1.saturating_add(self.level2)
    }
}

/// Display name for a simulated referral.
pub fn simulated_referee() -> String {
    fakeit::name::full()
}
