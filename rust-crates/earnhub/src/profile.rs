use crate::Error;
use chrono::NaiveDate;
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;

const MAX_USERNAME_LEN: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    PendingVerification,
    Verified,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobSubscriptionPlan {
    Basic,
    Standard,
    Premium,
}

impl JobSubscriptionPlan {
    pub const ALL: [JobSubscriptionPlan; 3] = [
        JobSubscriptionPlan::Basic,
        JobSubscriptionPlan::Standard,
        JobSubscriptionPlan::Premium,
    ];
}

impl fmt::Display for JobSubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobSubscriptionPlan::Basic => "Basic",
            JobSubscriptionPlan::Standard => "Standard",
            JobSubscriptionPlan::Premium => "Premium",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSubscription {
    pub plan: JobSubscriptionPlan,
    pub expiry_date: NaiveDate,
}

impl JobSubscription {
    /// Active through the expiry date inclusive.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        day <= self.expiry_date
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub job_subscription: Option<JobSubscription>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            payment_status: PaymentStatus::Unpaid,
            job_subscription: None,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.payment_status == PaymentStatus::Verified
    }

    pub fn has_active_subscription(&self, today: NaiveDate) -> bool {
        self.job_subscription
            .as_ref()
            .is_some_and(|sub| sub.is_active_on(today))
    }
}

/// Trims the raw input and checks it is usable inside storage keys.
pub fn normalize_username(raw: &str) -> crate::Result<String> {
    let name = raw.trim();
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if name.is_empty() || name.len() > MAX_USERNAME_LEN || !valid_chars {
        return Err(Error::InvalidUsername(raw.to_string()));
    }
    Ok(name.to_string())
}
