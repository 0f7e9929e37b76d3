//! Shared fixtures for the end-to-end journeys under `tests/`.

use chrono::{
    TimeZone,
    Utc,
};
use earnhub::{
    Session,
    clock::FixedClock,
    config::RewardRules,
    referrals::ReferralLevel,
    storage::{
        InMemoryStorage,
        LocalStorage,
    },
};

pub type TestSession<S = InMemoryStorage> = Session<S, FixedClock>;

/// 2026-10-18 09:00 UTC.
pub fn start_clock() -> FixedClock {
    FixedClock::new(
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0)
            .single()
            .unwrap_or_default(),
    )
}

pub struct TestContext<S = InMemoryStorage> {
    pub storage: S,
    pub clock: FixedClock,
    pub session: TestSession<S>,
}

impl TestContext<InMemoryStorage> {
    pub fn new() -> Self {
        Self::with_storage(InMemoryStorage::new())
    }
}

impl Default for TestContext<InMemoryStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LocalStorage + Clone> TestContext<S> {
    pub fn with_storage(storage: S) -> Self {
        let clock = start_clock();
        let mut session =
            Session::with_clock(storage.clone(), RewardRules::default(), clock.clone());
        session.seed_rng(7);
        Self {
            storage,
            clock,
            session,
        }
    }

    /// A new session over the same storage and clock, as after a restart.
    pub fn reopen(&self) -> TestSession<S> {
        let mut session = Session::with_clock(
            self.storage.clone(),
            RewardRules::default(),
            self.clock.clone(),
        );
        session.seed_rng(7);
        session
    }

    /// Signs `username` up and runs payment verification to completion.
    pub fn verified_user(&mut self, username: &str) -> earnhub::Result<()> {
        self.session.get_started();
        self.session.signup(username)?;
        self.session.submit_payment()?;
        self.session.complete_verification(username)?;
        Ok(())
    }

    /// Adds `count` direct referrals, 20 Rs each with the default rules.
    pub fn refer(&mut self, count: usize) -> earnhub::Result<()> {
        for _ in 0..count {
            self.session.simulate_referral(ReferralLevel::Direct)?;
        }
        Ok(())
    }
}
