use crate::{
    catalog::UserCreatedTask,
    ledger::{
        Ledger,
        Transaction,
        WithdrawalDetails,
    },
    money::Rupees,
    pin::WalletPin,
    profile::UserProfile,
    referrals::ReferralCounters,
    storage::LocalStorage,
};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{
    Serialize,
    de::DeserializeOwned,
};
use tracing::warn;

pub const CURRENT_PROFILE_KEY: &str = "userProfile";

/// Legacy `Date.toDateString()` layout, e.g. `Sun Oct 18 2026`.
const LEGACY_DATE_FORMAT: &str = "%a %b %d %Y";

pub fn profile_key(username: &str) -> String {
    format!("profile_{username}")
}

pub fn balance_key(username: &str) -> String {
    format!("balance_{username}")
}

pub fn transactions_key(username: &str) -> String {
    format!("transactions_{username}")
}

pub fn user_tasks_key(username: &str) -> String {
    format!("userTasks_{username}")
}

pub fn referrals_key(username: &str) -> String {
    format!("referrals_{username}")
}

pub fn wallet_pin_key(username: &str) -> String {
    format!("walletPin_{username}")
}

pub fn saved_withdrawal_details_key(username: &str) -> String {
    format!("savedWithdrawalDetails_{username}")
}

pub fn last_spin_date_key(username: &str) -> String {
    format!("lastSpinDate_{username}")
}

/// Everything stored under one user's namespace apart from the profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserData {
    pub ledger: Ledger,
    pub user_tasks: Vec<UserCreatedTask>,
    pub referrals: ReferralCounters,
    pub wallet_pin: WalletPin,
    pub saved_withdrawal_details: Option<WithdrawalDetails>,
    pub last_spin_date: Option<NaiveDate>,
}

/// Maps profiles and user data onto namespaced local-storage keys.
///
/// Reads never fail on bad data: a missing or malformed value falls back to
/// its default and is logged. Only backend failures surface as errors.
pub struct UserDataStore<S> {
    storage: S,
}

impl<S: LocalStorage> UserDataStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn current_profile(&self) -> crate::Result<Option<UserProfile>> {
        self.read_json(CURRENT_PROFILE_KEY)
    }

    pub fn stored_profile(&self, username: &str) -> crate::Result<Option<UserProfile>> {
        self.read_json(&profile_key(username))
    }

    pub fn user_exists(&self, username: &str) -> crate::Result<bool> {
        self.storage.contains_key(&profile_key(username))
    }

    /// Marks `profile` as the signed-in user and keeps a per-user copy for
    /// later logins.
    pub fn save_profile(&mut self, profile: &UserProfile) -> crate::Result<()> {
        self.write_json(CURRENT_PROFILE_KEY, profile)?;
        self.write_json(&profile_key(&profile.username), profile)
    }

    pub fn clear_current_profile(&mut self) -> crate::Result<()> {
        self.storage.remove_item(CURRENT_PROFILE_KEY)
    }

    pub fn load_user_data(&self, username: &str) -> crate::Result<UserData> {
        let balance = match self.storage.get_item(&balance_key(username))? {
            Some(raw) => parse_balance(&raw).unwrap_or_else(|| {
                warn!(username, raw = %raw, "unreadable balance, using zero");
                Rupees::ZERO
            }),
            None => Rupees::ZERO,
        };
        let transactions: Vec<Transaction> = self
            .read_json(&transactions_key(username))?
            .unwrap_or_default();
        let user_tasks = self
            .read_json(&user_tasks_key(username))?
            .unwrap_or_default();
        let referrals = self.read_json(&referrals_key(username))?.unwrap_or_default();
        let wallet_pin = WalletPin::from_stored(
            username,
            self.storage.get_item(&wallet_pin_key(username))?.as_deref(),
        );
        let saved_withdrawal_details = self
            .read_json::<Option<WithdrawalDetails>>(&saved_withdrawal_details_key(username))?
            .flatten();
        let last_spin_date = self
            .storage
            .get_item(&last_spin_date_key(username))?
            .and_then(|raw| parse_spin_date(&raw));

        let ledger = Ledger::from_parts(balance, transactions);
        if !ledger.is_consistent() {
            warn!(
                username,
                stored = %ledger.balance(),
                recomputed = %ledger.recomputed_balance(),
                "stored balance differs from transaction history"
            );
        }

        Ok(UserData {
            ledger,
            user_tasks,
            referrals,
            wallet_pin,
            saved_withdrawal_details,
            last_spin_date,
        })
    }

    /// Writes the full namespace for `profile`. The PIN and saved withdrawal
    /// details are only written when present.
    pub fn save_user_data(
        &mut self,
        profile: &UserProfile,
        data: &UserData,
    ) -> crate::Result<()> {
        let username = profile.username.as_str();
        self.save_profile(profile)?;
        self.storage
            .set_item(&balance_key(username), &data.ledger.balance().to_string())?;
        self.write_json(&transactions_key(username), data.ledger.transactions())?;
        self.write_json(&user_tasks_key(username), &data.user_tasks)?;
        self.write_json(&referrals_key(username), &data.referrals)?;
        self.save_pin(username, &data.wallet_pin)?;
        if let Some(details) = &data.saved_withdrawal_details {
            self.write_json(&saved_withdrawal_details_key(username), details)?;
        }
        if let Some(day) = data.last_spin_date {
            self.save_last_spin_date(username, day)?;
        }
        Ok(())
    }

    pub fn save_pin(&mut self, username: &str, pin: &WalletPin) -> crate::Result<()> {
        match pin.to_stored() {
            Some(marker) => self.storage.set_item(&wallet_pin_key(username), &marker),
            None => Ok(()),
        }
    }

    pub fn save_last_spin_date(
        &mut self,
        username: &str,
        day: NaiveDate,
    ) -> crate::Result<()> {
        self.storage
            .set_item(&last_spin_date_key(username), &day.to_string())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> crate::Result<Option<T>> {
        let Some(raw) = self.storage.get_item(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "malformed local storage value, using default");
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> crate::Result<()> {
        let json =
            serde_json::to_string(value).with_context(|| format!("serialize {key}"))?;
        self.storage.set_item(key, &json)
    }
}

fn parse_balance(raw: &str) -> Option<Rupees> {
    raw.parse::<Rupees>().ok().or_else(|| {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Rupees::from_decimal)
    })
}

fn parse_spin_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    raw.parse::<NaiveDate>()
        .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_DATE_FORMAT))
        .ok()
}
