use crate::{
    Error,
    catalog::{
        self,
        Job,
        Task,
        TaskDraft,
        UserCreatedTask,
    },
    clock::{
        Clock,
        SystemClock,
    },
    config::RewardRules,
    ledger::{
        Ledger,
        Transaction,
        TransactionKind,
        WithdrawalDetails,
    },
    money::Rupees,
    persistence::{
        UserData,
        UserDataStore,
    },
    pin::WalletPin,
    profile::{
        JobSubscription,
        JobSubscriptionPlan,
        PaymentStatus,
        UserProfile,
        normalize_username,
    },
    referrals::{
        ReferralCounters,
        ReferralLevel,
    },
    router::{
        Navigation,
        Router,
        Screen,
        View,
        screen_for,
    },
    storage::LocalStorage,
    wheel::{
        SpinOutcome,
        WheelKind,
        WheelRandomizer,
        daily_spin_available,
        wheel_for,
    },
};
use chrono::Duration;
use rand::{
    SeedableRng,
    rngs::StdRng,
};
use tracing::info;

const RECENT_TRANSACTIONS: usize = 5;

/// Figures shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardStats {
    pub balance: Rupees,
    pub tasks_completed: usize,
    pub direct_referrals: u32,
    pub referral_earnings: Rupees,
    pub recent: Vec<Transaction>,
}

/// The signed-in user's state and every action the app offers.
///
/// All mutations are written through to storage before they return.
pub struct Session<S, C = SystemClock> {
    store: UserDataStore<S>,
    rules: RewardRules,
    clock: C,
    rng: StdRng,
    wheel: WheelRandomizer,
    router: Router,
    show_landing: bool,
    profile: Option<UserProfile>,
    data: UserData,
    wallet_locked: bool,
    pending_spin: Option<SpinOutcome>,
    tasks: Vec<Task>,
    jobs: Vec<Job>,
}

impl<S: LocalStorage> Session<S> {
    pub fn new(storage: S, rules: RewardRules) -> Self {
        Self::with_clock(storage, rules, SystemClock)
    }
}

impl<S: LocalStorage, C: Clock> Session<S, C> {
    pub fn with_clock(storage: S, rules: RewardRules, clock: C) -> Self {
        Self {
            store: UserDataStore::new(storage),
            rules,
            clock,
            rng: StdRng::from_os_rng(),
            wheel: WheelRandomizer::new(),
            router: Router::new(),
            show_landing: true,
            profile: None,
            data: UserData::default(),
            wallet_locked: true,
            pending_spin: None,
            tasks: catalog::available_tasks(),
            jobs: catalog::job_board(),
        }
    }

    /// Makes wheel results reproducible.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Picks up the profile left signed in by a previous run.
    pub fn restore(&mut self) -> crate::Result<()> {
        let Some(profile) = self.store.current_profile()? else {
            return Ok(());
        };
        self.data = self.store.load_user_data(&profile.username)?;
        info!(username = %profile.username, "restored signed-in profile");
        self.profile = Some(profile);
        self.show_landing = false;
        self.wallet_locked = true;
        Ok(())
    }

    // --- accessors ---

    pub fn screen(&self) -> Screen {
        screen_for(self.show_landing, self.profile.as_ref())
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn rules(&self) -> &RewardRules {
        &self.rules
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn ledger(&self) -> &Ledger {
        &self.data.ledger
    }

    pub fn balance(&self) -> Rupees {
        self.data.ledger.balance()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.data.ledger.transactions()
    }

    pub fn user_tasks(&self) -> &[UserCreatedTask] {
        &self.data.user_tasks
    }

    pub fn referrals(&self) -> ReferralCounters {
        self.data.referrals
    }

    pub fn saved_withdrawal_details(&self) -> Option<&WithdrawalDetails> {
        self.data.saved_withdrawal_details.as_ref()
    }

    pub fn wallet_pin(&self) -> &WalletPin {
        &self.data.wallet_pin
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn current_view(&self) -> View {
        self.router.current()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn pending_spin(&self) -> Option<&SpinOutcome> {
        self.pending_spin.as_ref()
    }

    pub fn referral_earnings(&self) -> Rupees {
        self.data.ledger.sum_of(TransactionKind::Referral)
    }

    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats {
            balance: self.balance(),
            tasks_completed: self.data.ledger.count_of(TransactionKind::Earning),
            direct_referrals: self.data.referrals.level1,
            referral_earnings: self.referral_earnings(),
            recent: self
                .data
                .ledger
                .recent(RECENT_TRANSACTIONS)
                .cloned()
                .collect(),
        }
    }

    // --- onboarding ---

    pub fn get_started(&mut self) {
        self.show_landing = false;
    }

    pub fn signup(&mut self, username: &str) -> crate::Result<&UserProfile> {
        let username = normalize_username(username)?;
        if self.store.user_exists(&username)? {
            return Err(Error::UsernameTaken(username));
        }
        let profile = UserProfile::new(username);
        self.store.save_profile(&profile)?;
        info!(username = %profile.username, "signed up");
        self.data = UserData::default();
        self.show_landing = false;
        self.wallet_locked = true;
        self.pending_spin = None;
        self.router.reset();
        Ok(self.profile.insert(profile))
    }

    pub fn login(&mut self, username: &str) -> crate::Result<&UserProfile> {
        let username = normalize_username(username)?;
        let profile = self
            .store
            .stored_profile(&username)?
            .ok_or_else(|| Error::UnknownUser(username.clone()))?;
        self.data = self.store.load_user_data(&username)?;
        self.store.save_profile(&profile)?;
        info!(username = %username, status = ?profile.payment_status, "logged in");
        self.show_landing = false;
        self.wallet_locked = true;
        self.pending_spin = None;
        self.router.reset();
        Ok(self.profile.insert(profile))
    }

    /// Forgets the signed-in user; their namespaced data stays in storage.
    pub fn logout(&mut self) -> crate::Result<()> {
        if let Some(profile) = self.profile.take() {
            info!(username = %profile.username, "logged out");
        }
        self.data = UserData::default();
        self.wallet_locked = true;
        self.pending_spin = None;
        self.router.reset();
        self.show_landing = true;
        self.store.clear_current_profile()
    }

    pub fn submit_payment(&mut self) -> crate::Result<()> {
        let profile = self.profile.as_mut().ok_or(Error::NotSignedIn)?;
        if profile.payment_status != PaymentStatus::Unpaid {
            return Ok(());
        }
        profile.payment_status = PaymentStatus::PendingVerification;
        info!(username = %profile.username, "joining fee submitted for verification");
        self.store.save_profile(profile)
    }

    /// Finishes the simulated payment check for `username`.
    ///
    /// Does nothing unless that user is still the signed-in one and is waiting
    /// for verification. Returns whether the profile was verified.
    pub fn complete_verification(&mut self, username: &str) -> crate::Result<bool> {
        let stored_is_user = self
            .store
            .current_profile()?
            .is_some_and(|p| p.username == username);
        let Some(profile) = self.profile.as_mut() else {
            return Ok(false);
        };
        if !stored_is_user
            || profile.username != username
            || profile.payment_status != PaymentStatus::PendingVerification
        {
            return Ok(false);
        }
        profile.payment_status = PaymentStatus::Verified;
        let fee = self.rules.joining_fee;
        self.data.ledger.append(
            TransactionKind::JoiningFee,
            "One-time joining fee",
            -fee,
            None,
            self.clock.now(),
        );
        self.persist()?;
        info!(username, fee = %fee, "payment verified");
        Ok(true)
    }

    // --- navigation & wallet lock ---

    pub fn navigate(&mut self, view: View) -> Navigation {
        let locked = self.is_wallet_locked();
        self.router.navigate(view, locked)
    }

    pub fn back(&mut self) -> View {
        self.router.back()
    }

    pub fn is_wallet_locked(&self) -> bool {
        self.wallet_locked && self.data.wallet_pin.guards_wallet()
    }

    pub fn unlock_wallet(&mut self, pin: &str) -> crate::Result<Navigation> {
        let username = self.username()?.to_string();
        self.data.wallet_pin.verify(&username, pin)?;
        self.wallet_locked = false;
        Ok(self.navigate(View::Wallet))
    }

    pub fn set_pin(&mut self, pin: &str) -> crate::Result<()> {
        let username = self.username()?.to_string();
        let wallet_pin = WalletPin::new(&username, pin)?;
        self.store.save_pin(&username, &wallet_pin)?;
        self.data.wallet_pin = wallet_pin;
        info!(username = %username, "wallet PIN set");
        Ok(())
    }

    pub fn skip_pin(&mut self) -> crate::Result<()> {
        let username = self.username()?.to_string();
        self.store.save_pin(&username, &WalletPin::Skipped)?;
        self.data.wallet_pin = WalletPin::Skipped;
        Ok(())
    }

    // --- earning ---

    pub fn complete_task(&mut self, task_id: &str) -> crate::Result<Transaction> {
        self.require_verified()?;
        let task = self
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| Error::UnknownTask(task_id.to_string()))?;
        let tx = self.record(
            TransactionKind::Earning,
            format!("Completed: {}", task.title),
            task.reward,
            None,
        )?;
        info!(task = %task.id, reward = %task.reward, "task completed");
        Ok(tx)
    }

    pub fn simulate_referral(&mut self, level: ReferralLevel) -> crate::Result<Transaction> {
        self.require_verified()?;
        self.data.referrals.record(level);
        let bonus = level.bonus(&self.rules);
        let tx = self.record(
            TransactionKind::Referral,
            format!("{level} Referral Bonus"),
            bonus,
            None,
        )?;
        info!(level = level.number(), bonus = %bonus, "referral recorded");
        Ok(tx)
    }

    // --- spending ---

    pub fn create_task(
        &mut self,
        draft: TaskDraft,
        quantity: u32,
    ) -> crate::Result<UserCreatedTask> {
        self.require_verified()?;
        if draft.title.trim().is_empty() {
            return Err(Error::MissingField("campaign title"));
        }
        if !draft.reward.is_positive() {
            return Err(Error::InvalidAmount(draft.reward));
        }
        if quantity == 0 {
            return Err(Error::InvalidQuantity(quantity));
        }
        let total_cost = draft.reward.times(quantity);
        self.ensure_funds(total_cost)?;
        let base_id = format!("utask_{}", self.clock.now().timestamp_millis());
        let id = if self.data.user_tasks.iter().any(|t| t.id == base_id) {
            format!("{base_id}_{}", self.data.user_tasks.len())
        } else {
            base_id
        };
        let task = UserCreatedTask {
            id,
            title: draft.title.trim().to_string(),
            task_type: draft.task_type,
            reward: draft.reward,
            quantity,
            completions: 0,
            views: 0,
        };
        self.data.user_tasks.push(task.clone());
        self.record(
            TransactionKind::TaskCreation,
            format!("Campaign: {}", task.title),
            -total_cost,
            None,
        )?;
        info!(campaign = %task.id, cost = %total_cost, "campaign created");
        Ok(task)
    }

    pub fn withdraw(
        &mut self,
        amount: Rupees,
        details: WithdrawalDetails,
    ) -> crate::Result<Transaction> {
        self.require_verified()?;
        if !amount.is_positive() {
            return Err(Error::InvalidAmount(amount));
        }
        if details.account_title.trim().is_empty() {
            return Err(Error::MissingField("account title"));
        }
        if details.account_number.trim().is_empty() {
            return Err(Error::MissingField("account number"));
        }
        self.ensure_funds(amount)?;
        self.data.saved_withdrawal_details = Some(details.clone());
        let description = format!("Withdrawal via {}", details.method);
        let tx = self.record(
            TransactionKind::Withdrawal,
            description,
            -amount,
            Some(details),
        )?;
        info!(amount = %amount, "withdrawal requested");
        Ok(tx)
    }

    /// Records the deposit as pending; the balance does not change.
    pub fn deposit(&mut self, amount: Rupees, txid: &str) -> crate::Result<Transaction> {
        self.require_verified()?;
        if !amount.is_positive() {
            return Err(Error::InvalidAmount(amount));
        }
        let txid = txid.trim();
        if txid.is_empty() {
            return Err(Error::MissingField("transaction id"));
        }
        let tx = self.record(
            TransactionKind::PendingDeposit,
            format!("Deposit via TXID: {txid}"),
            amount,
            None,
        )?;
        info!(amount = %amount, txid, "deposit submitted");
        Ok(tx)
    }

    pub fn subscribe_to_jobs(
        &mut self,
        plan: JobSubscriptionPlan,
    ) -> crate::Result<JobSubscription> {
        self.require_verified()?;
        let cost = self
            .rules
            .plan_cost(plan)
            .ok_or(Error::InvalidAmount(Rupees::ZERO))?;
        self.ensure_funds(cost)?;
        let subscription = JobSubscription {
            plan,
            expiry_date: self.clock.today() + Duration::days(self.rules.subscription_days),
        };
        if let Some(profile) = self.profile.as_mut() {
            profile.job_subscription = Some(subscription.clone());
        }
        self.record(
            TransactionKind::JobSubscription,
            format!("Subscribed to {plan} plan"),
            -cost,
            None,
        )?;
        info!(%plan, expiry = %subscription.expiry_date, "job subscription bought");
        Ok(subscription)
    }

    /// Premium listings stay locked until a subscription is active.
    pub fn is_job_locked(&self, job: &Job) -> bool {
        job.is_premium
            && !self
                .profile
                .as_ref()
                .is_some_and(|p| p.has_active_subscription(self.clock.today()))
    }

    // --- wheel ---

    pub fn wheel_kind(&self) -> WheelKind {
        wheel_for(self.data.last_spin_date, self.clock.today())
    }

    pub fn daily_spin_available(&self) -> bool {
        daily_spin_available(self.data.last_spin_date, self.clock.today())
    }

    /// Uses today's free spin. The prize is credited by [`Self::settle_spin`].
    pub fn spin_daily(&mut self) -> crate::Result<SpinOutcome> {
        self.require_verified()?;
        self.ensure_wheel_idle()?;
        let today = self.clock.today();
        if !daily_spin_available(self.data.last_spin_date, today) {
            return Err(Error::DailySpinUsed);
        }
        let username = self.username()?.to_string();
        self.data.last_spin_date = Some(today);
        self.store.save_last_spin_date(&username, today)?;
        let outcome = self.wheel.spin(WheelKind::Daily, &mut self.rng);
        self.pending_spin = Some(outcome);
        info!(username = %username, prize = %outcome.prize, "daily spin");
        Ok(outcome)
    }

    /// Charges `cost` and spins the bought wheel.
    pub fn buy_spin(&mut self, cost: Rupees) -> crate::Result<SpinOutcome> {
        self.require_verified()?;
        self.ensure_wheel_idle()?;
        if !self.rules.is_spin_cost(cost) {
            return Err(Error::InvalidSpinCost(cost));
        }
        self.ensure_funds(cost)?;
        self.record(
            TransactionKind::SpinPurchase,
            format!("Spin purchase ({} Rs)", cost.compact()),
            -cost,
            None,
        )?;
        let outcome = self.wheel.spin(WheelKind::Bought, &mut self.rng);
        self.pending_spin = Some(outcome);
        info!(cost = %cost, prize = %outcome.prize, "bought spin");
        Ok(outcome)
    }

    /// Credits the pending spin's prize, if any. Zero prizes credit nothing.
    pub fn settle_spin(&mut self) -> crate::Result<Option<Transaction>> {
        let Some(outcome) = self.pending_spin.take() else {
            return Ok(None);
        };
        if !outcome.credits() {
            return Ok(None);
        }
        let tx = self.record(
            TransactionKind::Earning,
            "Spin Wheel Prize",
            outcome.prize,
            None,
        )?;
        Ok(Some(tx))
    }

    pub fn wheel_rotation(&self) -> f64 {
        self.wheel.rotation()
    }

    // --- internals ---

    fn username(&self) -> crate::Result<&str> {
        self.profile
            .as_ref()
            .map(|p| p.username.as_str())
            .ok_or(Error::NotSignedIn)
    }

    fn require_verified(&self) -> crate::Result<()> {
        match &self.profile {
            None => Err(Error::NotSignedIn),
            Some(p) if !p.is_verified() => Err(Error::NotVerified),
            Some(_) => Ok(()),
        }
    }

    fn ensure_funds(&self, required: Rupees) -> crate::Result<()> {
        let available = self.balance();
        if available < required {
            return Err(Error::InsufficientBalance {
                required,
                available,
            });
        }
        Ok(())
    }

    fn ensure_wheel_idle(&self) -> crate::Result<()> {
        if self.pending_spin.is_some() {
            return Err(Error::SpinInProgress);
        }
        Ok(())
    }

    fn record(
        &mut self,
        kind: TransactionKind,
        description: impl Into<String>,
        amount: Rupees,
        withdrawal_details: Option<WithdrawalDetails>,
    ) -> crate::Result<Transaction> {
        let tx = self
            .data
            .ledger
            .append(kind, description, amount, withdrawal_details, self.clock.now())
            .clone();
        self.persist()?;
        Ok(tx)
    }

    fn persist(&mut self) -> crate::Result<()> {
        let Some(profile) = &self.profile else {
            return Err(Error::NotSignedIn);
        };
        self.store.save_user_data(profile, &self.data)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;
    use crate::{
        catalog::TaskType,
        clock::FixedClock,
        ledger::WithdrawalMethod,
        storage::InMemoryStorage,
    };
    use chrono::{
        NaiveDate,
        TimeZone,
        Utc,
    };

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap())
    }

    fn session() -> (Session<InMemoryStorage, FixedClock>, InMemoryStorage, FixedClock) {
        let storage = InMemoryStorage::new();
        let clock = clock();
        let mut session =
            Session::with_clock(storage.clone(), RewardRules::default(), clock.clone());
        session.seed_rng(11);
        (session, storage, clock)
    }

    fn verified_session() -> (Session<InMemoryStorage, FixedClock>, InMemoryStorage, FixedClock)
    {
        let (mut session, storage, clock) = session();
        session.get_started();
        session.signup("ayesha").unwrap();
        session.submit_payment().unwrap();
        assert!(session.complete_verification("ayesha").unwrap());
        (session, storage, clock)
    }

    fn fund(session: &mut Session<InMemoryStorage, FixedClock>, referrals: usize) {
        for _ in 0..referrals {
            session.simulate_referral(ReferralLevel::Direct).unwrap();
        }
    }

    fn details() -> WithdrawalDetails {
        WithdrawalDetails {
            method: WithdrawalMethod::EasyPaisa,
            account_title: "Ayesha Malik".to_string(),
            account_number: "03111234567".to_string(),
        }
    }

    #[test]
    fn signup__gates_through_payment_and_verification() {
        // given
        let (mut session, _, _) = session();
        assert_eq!(session.screen(), Screen::Landing);

        // when
        session.get_started();
        let auth = session.screen();
        session.signup(" ayesha ").unwrap();
        let payment = session.screen();
        session.submit_payment().unwrap();
        let pending = session.screen();
        session.complete_verification("ayesha").unwrap();

        // then
        assert_eq!(auth, Screen::Auth);
        assert_eq!(payment, Screen::Payment);
        assert_eq!(pending, Screen::PendingVerification);
        assert_eq!(session.screen(), Screen::App);
        assert_eq!(session.balance(), -Rupees::whole(50));
        assert_eq!(
            session.transactions()[0].kind,
            TransactionKind::JoiningFee
        );
    }

    #[test]
    fn signup__rejects_taken_username() {
        // given
        let (mut session, _, _) = session();
        session.signup("ayesha").unwrap();
        session.logout().unwrap();

        // when
        let result = session.signup("ayesha");

        // then
        assert!(matches!(result, Err(Error::UsernameTaken(name)) if name == "ayesha"));
    }

    #[test]
    fn complete_verification__ignores_other_users_and_repeats() {
        // given
        let (mut session, _, _) = session();
        session.signup("ayesha").unwrap();
        session.submit_payment().unwrap();

        // when
        let other = session.complete_verification("bilal").unwrap();
        let first = session.complete_verification("ayesha").unwrap();
        let again = session.complete_verification("ayesha").unwrap();

        // then
        assert!(!other);
        assert!(first);
        assert!(!again);
        assert_eq!(session.transactions().len(), 1);
    }

    #[test]
    fn complete_verification__after_logout_does_nothing() {
        // given
        let (mut session, _, _) = session();
        session.signup("ayesha").unwrap();
        session.submit_payment().unwrap();
        session.logout().unwrap();

        // when
        let applied = session.complete_verification("ayesha").unwrap();

        // then
        assert!(!applied);
    }

    #[test]
    fn actions__require_a_verified_profile() {
        // given
        let (mut session, _, _) = session();

        // then
        assert!(matches!(session.complete_task("task1"), Err(Error::NotSignedIn)));
        session.signup("ayesha").unwrap();
        assert!(matches!(session.complete_task("task1"), Err(Error::NotVerified)));
    }

    #[test]
    fn complete_task__credits_reward_every_time() {
        // given
        let (mut session, _, _) = verified_session();

        // when
        let tx = session.complete_task("task1").unwrap();
        session.complete_task("task1").unwrap();

        // then
        assert_eq!(tx.description, "Completed: Visit TechCrunch Homepage");
        assert_eq!(tx.amount, Rupees::from_paisa(550));
        assert_eq!(session.dashboard().tasks_completed, 2);
        assert_eq!(session.balance(), Rupees::from_paisa(1100 - 5000));
        assert!(matches!(
            session.complete_task("nope"),
            Err(Error::UnknownTask(_))
        ));
    }

    #[test]
    fn simulate_referral__bumps_counters_and_balance() {
        // given
        let (mut session, _, _) = verified_session();

        // when
        session.simulate_referral(ReferralLevel::Direct).unwrap();
        let tx = session.simulate_referral(ReferralLevel::Indirect).unwrap();

        // then
        assert_eq!(tx.description, "Level 2 Referral Bonus");
        assert_eq!(session.referrals(), ReferralCounters { level1: 1, level2: 1 });
        assert_eq!(session.referral_earnings(), Rupees::whole(25));
        assert_eq!(session.dashboard().direct_referrals, 1);
    }

    #[test]
    fn withdraw__rejects_overdraft_and_saves_details() {
        // given
        let (mut session, _, _) = verified_session();
        fund(&mut session, 5); // -50 + 100

        // when
        let overdraft = session.withdraw(Rupees::whole(51), details());
        let tx = session.withdraw(Rupees::whole(30), details()).unwrap();

        // then
        assert!(matches!(
            overdraft,
            Err(Error::InsufficientBalance { required, available })
                if required == Rupees::whole(51) && available == Rupees::whole(50)
        ));
        assert_eq!(tx.description, "Withdrawal via EasyPaisa");
        assert_eq!(tx.amount, -Rupees::whole(30));
        assert_eq!(tx.withdrawal_details, Some(details()));
        assert_eq!(session.saved_withdrawal_details(), Some(&details()));
        assert_eq!(session.balance(), Rupees::whole(20));
    }

    #[test]
    fn withdraw__validates_amount_and_details() {
        // given
        let (mut session, _, _) = verified_session();
        fund(&mut session, 5);
        let mut blank = details();
        blank.account_number = "  ".to_string();

        // then
        assert!(matches!(
            session.withdraw(Rupees::ZERO, details()),
            Err(Error::InvalidAmount(_))
        ));
        assert!(matches!(
            session.withdraw(Rupees::whole(1), blank),
            Err(Error::MissingField("account number"))
        ));
    }

    #[test]
    fn deposit__is_pending_and_keeps_balance() {
        // given
        let (mut session, _, _) = verified_session();
        let before = session.balance();

        // when
        let tx = session.deposit(Rupees::whole(500), " TX-991 ").unwrap();

        // then
        assert_eq!(tx.kind, TransactionKind::PendingDeposit);
        assert_eq!(tx.description, "Deposit via TXID: TX-991");
        assert_eq!(session.balance(), before);
    }

    #[test]
    fn create_task__charges_reward_times_quantity() {
        // given
        let (mut session, _, _) = verified_session();
        fund(&mut session, 5);
        let draft = TaskDraft {
            task_type: TaskType::YoutubeSubscribe,
            title: "Subscribe to my channel".to_string(),
            url: "https://youtube.com/@me".to_string(),
            reward: Rupees::whole(2),
        };

        // when
        let too_many = session.create_task(draft.clone(), 26);
        let task = session.create_task(draft, 10).unwrap();

        // then
        assert!(matches!(too_many, Err(Error::InsufficientBalance { .. })));
        assert_eq!(task.quantity, 10);
        assert_eq!(task.completions, 0);
        assert_eq!(session.user_tasks(), &[task]);
        assert_eq!(session.balance(), Rupees::whole(30));
        let last = session.transactions().last().unwrap();
        assert_eq!(last.kind, TransactionKind::TaskCreation);
        assert_eq!(last.description, "Campaign: Subscribe to my channel");
    }

    #[test]
    fn subscribe_to_jobs__sets_expiry_and_unlocks_premium_jobs() {
        // given
        let (mut session, _, clock) = verified_session();
        fund(&mut session, 15); // 250
        let premium = session.jobs().iter().find(|j| j.is_premium).cloned().unwrap();
        assert!(session.is_job_locked(&premium));

        // when
        let subscription = session
            .subscribe_to_jobs(JobSubscriptionPlan::Basic)
            .unwrap();

        // then
        assert_eq!(
            subscription.expiry_date,
            NaiveDate::from_ymd_opt(2026, 11, 17).unwrap()
        );
        assert!(!session.is_job_locked(&premium));
        assert_eq!(session.balance(), Rupees::whole(50));
        clock.advance(Duration::days(31));
        assert!(session.is_job_locked(&premium));
    }

    #[test]
    fn spin_daily__once_per_day_and_credits_on_settle() {
        // given
        let (mut session, storage, clock) = verified_session();
        assert_eq!(session.wheel_kind(), WheelKind::Daily);

        // when
        let outcome = session.spin_daily().unwrap();
        let during = session.buy_spin(Rupees::whole(1));
        let credited = session.settle_spin().unwrap().unwrap();

        // then
        assert!(matches!(during, Err(Error::SpinInProgress)));
        assert_eq!(outcome.prize, Rupees::from_paisa(1));
        assert_eq!(credited.description, "Spin Wheel Prize");
        assert_eq!(session.wheel_kind(), WheelKind::Bought);
        assert!(matches!(session.spin_daily(), Err(Error::DailySpinUsed)));
        assert_eq!(
            storage.get_item("lastSpinDate_ayesha").unwrap().as_deref(),
            Some("2026-10-18")
        );
        clock.advance(Duration::days(1));
        assert!(session.daily_spin_available());
    }

    #[test]
    fn buy_spin__charges_cost_and_rejects_unknown_prices() {
        // given
        let (mut session, _, _) = verified_session();
        fund(&mut session, 3); // 10

        // when
        let odd_price = session.buy_spin(Rupees::whole(3));
        let outcome = session.buy_spin(Rupees::whole(10)).unwrap();
        let purchase = session.transactions().last().cloned().unwrap();
        session.settle_spin().unwrap();
        let broke = session.buy_spin(Rupees::whole(10));

        // then
        assert!(matches!(odd_price, Err(Error::InvalidSpinCost(_))));
        assert_eq!(purchase.description, "Spin purchase (10 Rs)");
        assert_eq!(purchase.amount, -Rupees::whole(10));
        assert_eq!(session.balance(), outcome.prize);
        if outcome.prize < Rupees::whole(10) {
            assert!(matches!(broke, Err(Error::InsufficientBalance { .. })));
        }
    }

    #[test]
    fn wallet_pin__gates_wallet_until_unlocked() {
        // given
        let (mut session, _, _) = verified_session();
        assert_eq!(session.navigate(View::Wallet), Navigation::Shown(View::Wallet));
        session.back();

        // when
        session.set_pin("2468").unwrap();
        session.logout().unwrap();
        session.login("ayesha").unwrap();

        // then
        assert_eq!(session.navigate(View::Wallet), Navigation::PinRequired);
        assert!(matches!(session.unlock_wallet("1111"), Err(Error::WrongPin)));
        assert_eq!(
            session.unlock_wallet("2468").unwrap(),
            Navigation::Shown(View::Wallet)
        );
        assert_eq!(session.current_view(), View::Wallet);
    }

    #[test]
    fn skip_pin__never_locks_wallet() {
        // given
        let (mut session, storage, _) = verified_session();

        // when
        session.skip_pin().unwrap();

        // then
        assert!(!session.is_wallet_locked());
        assert_eq!(
            storage.get_item("walletPin_ayesha").unwrap().as_deref(),
            Some("SKIPPED")
        );
    }

    #[test]
    fn logout__keeps_ledger_for_next_login() {
        // given
        let (mut session, storage, _) = verified_session();
        fund(&mut session, 2);
        session.navigate(View::Invite);

        // when
        session.logout().unwrap();

        // then
        assert_eq!(session.screen(), Screen::Landing);
        assert_eq!(session.balance(), Rupees::ZERO);
        assert!(storage.get_item("userProfile").unwrap().is_none());

        // when
        session.login("ayesha").unwrap();

        // then
        assert_eq!(session.screen(), Screen::App);
        assert_eq!(session.balance(), Rupees::whole(-10));
        assert_eq!(session.referrals().level1, 2);
        assert_eq!(session.router().history(), &[View::Dashboard]);
    }

    #[test]
    fn restore__resumes_signed_in_profile() {
        // given
        let (mut session, storage, clock) = verified_session();
        fund(&mut session, 1);
        drop(session);

        // when
        let mut restored =
            Session::with_clock(storage, RewardRules::default(), clock);
        restored.restore().unwrap();

        // then
        assert_eq!(restored.screen(), Screen::App);
        assert_eq!(restored.profile().unwrap().username, "ayesha");
        assert_eq!(restored.balance(), Rupees::whole(-30));
    }

    #[test]
    fn login__unknown_user_fails() {
        let (mut session, _, _) = session();
        assert!(matches!(session.login("ghost"), Err(Error::UnknownUser(_))));
    }
}
