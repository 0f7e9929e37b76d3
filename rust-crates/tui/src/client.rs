use crate::ui::{
    self,
    FormSubmission,
    PinPurpose,
    UserEvent,
};
use color_eyre::eyre::{
    Result,
    WrapErr,
};
use earnhub::{
    Rupees,
    Session,
    catalog::{
        Job,
        Task,
        TaskDraft,
        UserCreatedTask,
    },
    clock::Clock,
    config::{
        self,
        PlanOffer,
        Settings,
        Timings,
    },
    ledger::{
        Transaction,
        WithdrawalDetails,
    },
    profile::{
        JobSubscription,
        PaymentStatus,
    },
    referrals::{
        self,
        ReferralCounters,
    },
    router::{
        Navigation,
        Screen,
        View,
    },
    session::DashboardStats,
    storage::{
        InMemoryStorage,
        LocalStorage,
        SledStorage,
    },
    wheel::{
        Segment,
        SpinOutcome,
        WheelKind,
        segment_at,
    },
};
use std::{
    path::PathBuf,
    time::{
        Duration,
        Instant,
    },
};
use tokio::{
    sync::mpsc,
    time,
};
use tracing::{
    error,
    info,
    warn,
};

const STARTING_VISITORS: u64 = 12_480;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub ephemeral: bool,
    pub settings: Settings,
}

/// Storage backend picked at start-up.
pub enum AppStorage {
    Memory(InMemoryStorage),
    Disk(SledStorage),
}

impl LocalStorage for AppStorage {
    fn get_item(&self, key: &str) -> earnhub::Result<Option<String>> {
        match self {
            AppStorage::Memory(s) => s.get_item(key),
            AppStorage::Disk(s) => s.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> earnhub::Result<()> {
        match self {
            AppStorage::Memory(s) => s.set_item(key, value),
            AppStorage::Disk(s) => s.set_item(key, value),
        }
    }

    fn remove_item(&mut self, key: &str) -> earnhub::Result<()> {
        match self {
            AppStorage::Memory(s) => s.remove_item(key),
            AppStorage::Disk(s) => s.remove_item(key),
        }
    }

    fn keys(&self) -> earnhub::Result<Vec<String>> {
        match self {
            AppStorage::Memory(s) => s.keys(),
            AppStorage::Disk(s) => s.keys(),
        }
    }
}

/// Delayed events posted back to the main loop by spawned timer tasks.
///
/// Spin events carry the number of the spin that armed them; events from an
/// older spin are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    VerificationDue { username: String },
    SpinTick,
    SpinFinished { spin: u64 },
    WinBannerExpired { spin: u64 },
    VisitorTick,
}

/// What the UI should do after an action was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    None,
    Alert(String),
    PinPrompt(PinPurpose),
}

#[derive(Clone, Debug, PartialEq)]
pub struct WheelSnapshot {
    pub kind: WheelKind,
    pub segments: &'static [Segment],
    pub pointer: usize,
    pub rotation: f64,
    pub spinning: bool,
    pub daily_available: bool,
    pub spin_costs: Vec<Rupees>,
    pub win: Option<SpinOutcome>,
    pub low_prize_threshold: Rupees,
}

/// Everything a frame needs, copied out of the session.
#[derive(Clone, Debug)]
pub struct AppSnapshot {
    pub screen: Screen,
    pub view: View,
    pub can_go_back: bool,
    pub username: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub joining_fee: Rupees,
    pub visitors: u64,
    pub stats: DashboardStats,
    pub transactions: Vec<Transaction>,
    pub tasks: Vec<Task>,
    pub jobs: Vec<(Job, bool)>,
    pub subscription: Option<JobSubscription>,
    pub plans: Vec<PlanOffer>,
    pub user_tasks: Vec<UserCreatedTask>,
    pub referrals: ReferralCounters,
    pub level1_bonus: Rupees,
    pub level2_bonus: Rupees,
    pub wheel: WheelSnapshot,
    pub pin_configured: bool,
    pub wallet_locked: bool,
    pub saved_withdrawal: Option<WithdrawalDetails>,
    pub status: String,
}

#[derive(Clone, Copy, Debug)]
struct SpinAnimation {
    id: u64,
    kind: WheelKind,
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl SpinAnimation {
    fn rotation_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        eased_rotation(self.from, self.to, progress)
    }
}

/// Cubic ease-out between two rotations; `progress` is clamped to `0..=1`.
fn eased_rotation(from: f64, to: f64, progress: f64) -> f64 {
    let t = progress.clamp(0.0, 1.0);
    let eased = 1.0 - (1.0 - t).powi(3);
    from + (to - from) * eased
}

pub struct AppController {
    session: Session<AppStorage>,
    timings: Timings,
    timer_tx: mpsc::UnboundedSender<TimerEvent>,
    status: String,
    visitors: u64,
    wheel_rotation: f64,
    spins_started: u64,
    spin: Option<SpinAnimation>,
    win_banner: Option<SpinOutcome>,
}

impl AppController {
    pub fn new(
        config: AppConfig,
        timer_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Result<Self> {
        let storage = if config.ephemeral {
            AppStorage::Memory(InMemoryStorage::new())
        } else {
            let path = config::storage_dir(&config.data_dir);
            AppStorage::Disk(
                SledStorage::open(&path)
                    .wrap_err_with(|| format!("opening storage at {}", path.display()))?,
            )
        };
        let mut session = Session::new(storage, config.settings.rules.clone());
        session.restore().wrap_err("restoring the signed-in profile")?;
        let controller = Self::with_session(session, config.settings.timings, timer_tx);
        controller.resume_pending_verification();
        Ok(controller)
    }

    pub fn with_session(
        session: Session<AppStorage>,
        timings: Timings,
        timer_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            session,
            timings,
            timer_tx,
            status: String::new(),
            visitors: STARTING_VISITORS,
            wheel_rotation: 0.0,
            spins_started: 0,
            spin: None,
            win_banner: None,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    /// Applies one user action. Domain failures come back as errors so the
    /// caller can show them in the alert dialog.
    pub fn apply(&mut self, event: UserEvent) -> earnhub::Result<Feedback> {
        match event {
            UserEvent::Quit | UserEvent::Redraw => Ok(Feedback::None),
            UserEvent::GetStarted => {
                self.session.get_started();
                Ok(Feedback::None)
            }
            UserEvent::Signup(username) => {
                let name = self.session.signup(&username)?.username.clone();
                self.set_status(format!("Welcome, {name}! Pay the joining fee to continue."));
                Ok(Feedback::None)
            }
            UserEvent::Login(username) => {
                let profile = self.session.login(&username)?.clone();
                self.reset_wheel();
                self.set_status(format!("Welcome back, {}", profile.username));
                self.resume_pending_verification();
                Ok(Feedback::None)
            }
            UserEvent::Logout => {
                self.session.logout()?;
                self.reset_wheel();
                self.set_status("Logged out");
                Ok(Feedback::None)
            }
            UserEvent::SubmitPayment => {
                self.session.submit_payment()?;
                self.resume_pending_verification();
                self.set_status("Payment submitted. Verifying...");
                Ok(Feedback::None)
            }
            UserEvent::Navigate(view) => Ok(self.navigate(view)),
            UserEvent::Back => {
                self.session.back();
                Ok(Feedback::None)
            }
            UserEvent::CompleteTask(index) => {
                let Some(task) = self.session.tasks().get(index).cloned() else {
                    return Ok(Feedback::None);
                };
                let tx = self.session.complete_task(&task.id)?;
                self.set_status(format!("{} (+{} Rs)", tx.description, tx.amount));
                Ok(Feedback::Alert(format!(
                    "Task \"{}\" completed! You earned {} Rs.",
                    task.title, tx.amount
                )))
            }
            UserEvent::SimulateReferral(level) => {
                let tx = self.session.simulate_referral(level)?;
                self.set_status(format!(
                    "{} joined through your link: {} (+{} Rs)",
                    referrals::simulated_referee(),
                    tx.description,
                    tx.amount
                ));
                Ok(Feedback::None)
            }
            UserEvent::Subscribe(plan) => {
                let subscription = self.session.subscribe_to_jobs(plan)?;
                Ok(Feedback::Alert(format!(
                    "Subscribed to the {} plan until {}",
                    subscription.plan,
                    subscription.expiry_date.format("%d %b %Y")
                )))
            }
            UserEvent::SpinDaily => {
                let outcome = self.session.spin_daily()?;
                self.start_spin(outcome);
                Ok(Feedback::None)
            }
            UserEvent::BuySpin(cost) => {
                let outcome = self.session.buy_spin(cost)?;
                self.start_spin(outcome);
                Ok(Feedback::None)
            }
            UserEvent::SubmitPin { purpose, pin } => match purpose {
                PinPurpose::Unlock => {
                    self.session.unlock_wallet(&pin)?;
                    self.set_status("Wallet unlocked");
                    Ok(Feedback::None)
                }
                PinPurpose::Setup => {
                    self.session.set_pin(&pin)?;
                    self.set_status("Wallet PIN saved");
                    Ok(Feedback::None)
                }
            },
            UserEvent::SkipPin => {
                self.session.skip_pin()?;
                self.set_status("Wallet PIN skipped");
                Ok(Feedback::None)
            }
            UserEvent::Submit(form) => self.submit_form(form),
        }
    }

    pub fn apply_timer(&mut self, event: TimerEvent) -> earnhub::Result<Feedback> {
        match event {
            TimerEvent::VerificationDue { username } => {
                if self.session.complete_verification(&username)? {
                    self.set_status(format!(
                        "Payment verified. Joining fee of {} Rs deducted.",
                        self.session.rules().joining_fee
                    ));
                }
                Ok(Feedback::None)
            }
            TimerEvent::SpinTick => Ok(Feedback::None),
            TimerEvent::SpinFinished { spin } => self.finish_spin(spin),
            TimerEvent::WinBannerExpired { spin } => {
                if spin == self.spins_started {
                    self.win_banner = None;
                }
                Ok(Feedback::None)
            }
            TimerEvent::VisitorTick => {
                if self.session.screen() == Screen::Landing {
                    self.visitors += rand::random_range(1..=3u64);
                }
                Ok(Feedback::None)
            }
        }
    }

    pub fn build_snapshot(&self) -> AppSnapshot {
        let session = &self.session;
        let profile = session.profile();
        let today = session.clock().today();
        let rules = session.rules();

        let (kind, rotation) = match &self.spin {
            Some(anim) => (anim.kind, anim.rotation_at(Instant::now())),
            None => (session.wheel_kind(), self.wheel_rotation),
        };
        let segments = kind.segments();

        AppSnapshot {
            screen: session.screen(),
            view: session.current_view(),
            can_go_back: session.router().can_go_back(),
            username: profile.map(|p| p.username.clone()),
            payment_status: profile.map(|p| p.payment_status),
            joining_fee: rules.joining_fee,
            visitors: self.visitors,
            stats: session.dashboard(),
            transactions: session.transactions().iter().rev().cloned().collect(),
            tasks: session.tasks().to_vec(),
            jobs: session
                .jobs()
                .iter()
                .map(|job| (job.clone(), session.is_job_locked(job)))
                .collect(),
            subscription: profile
                .and_then(|p| p.job_subscription.clone())
                .filter(|s| s.is_active_on(today)),
            plans: rules.subscription_plans.clone(),
            user_tasks: session.user_tasks().to_vec(),
            referrals: session.referrals(),
            level1_bonus: rules.level1_referral_bonus,
            level2_bonus: rules.level2_referral_bonus,
            wheel: WheelSnapshot {
                kind,
                segments,
                pointer: segment_at(rotation, segments.len()),
                rotation,
                spinning: self.spin.is_some(),
                daily_available: session.daily_spin_available(),
                spin_costs: rules.spin_costs.clone(),
                win: self.win_banner,
                low_prize_threshold: rules.low_prize_threshold,
            },
            pin_configured: session.wallet_pin().is_configured(),
            wallet_locked: session.is_wallet_locked(),
            saved_withdrawal: session.saved_withdrawal_details().cloned(),
            status: self.status.clone(),
        }
    }

    fn navigate(&mut self, view: View) -> Feedback {
        match self.session.navigate(view) {
            Navigation::PinRequired => Feedback::PinPrompt(PinPurpose::Unlock),
            Navigation::Shown(View::Wallet) if !self.session.wallet_pin().is_configured() => {
                Feedback::PinPrompt(PinPurpose::Setup)
            }
            Navigation::Shown(_) => Feedback::None,
        }
    }

    fn submit_form(&mut self, form: FormSubmission) -> earnhub::Result<Feedback> {
        match form {
            FormSubmission::Withdraw {
                method,
                account_title,
                account_number,
                amount,
            } => {
                let Some(amount) = parse_amount(&amount) else {
                    return Ok(Feedback::Alert(format!("'{amount}' is not a valid amount")));
                };
                let details = WithdrawalDetails {
                    method,
                    account_title: account_title.trim().to_string(),
                    account_number: account_number.trim().to_string(),
                };
                let tx = self.session.withdraw(amount, details)?;
                Ok(Feedback::Alert(format!(
                    "Withdrawal request of {amount} Rs submitted. {}",
                    tx.description
                )))
            }
            FormSubmission::Deposit { amount, txid } => {
                let Some(amount) = parse_amount(&amount) else {
                    return Ok(Feedback::Alert(format!("'{amount}' is not a valid amount")));
                };
                self.session.deposit(amount, &txid)?;
                Ok(Feedback::Alert(format!(
                    "Deposit of {amount} Rs submitted. It will be credited after review."
                )))
            }
            FormSubmission::CreateTask {
                task_type,
                title,
                url,
                reward,
                quantity,
            } => {
                let Some(reward) = parse_amount(&reward) else {
                    return Ok(Feedback::Alert(format!("'{reward}' is not a valid reward")));
                };
                let Ok(quantity) = quantity.trim().parse::<u32>() else {
                    return Ok(Feedback::Alert(format!(
                        "'{quantity}' is not a valid quantity"
                    )));
                };
                let draft = TaskDraft {
                    task_type,
                    title,
                    url: url.trim().to_string(),
                    reward,
                };
                let task = self.session.create_task(draft, quantity)?;
                Ok(Feedback::Alert(format!(
                    "Campaign '{}' created for {} Rs",
                    task.title,
                    task.reward.times(task.quantity)
                )))
            }
        }
    }

    fn start_spin(&mut self, outcome: SpinOutcome) {
        let duration = self.timings.spin_duration();
        self.spins_started += 1;
        let id = self.spins_started;
        self.win_banner = None;
        self.spin = Some(SpinAnimation {
            id,
            kind: outcome.kind,
            from: self.wheel_rotation,
            to: outcome.rotation,
            started: Instant::now(),
            duration,
        });
        self.set_status("Spinning...");

        let tx = self.timer_tx.clone();
        let tick = self.timings.spin_tick();
        tokio::spawn(async move {
            let deadline = time::Instant::now() + duration;
            let mut interval = time::interval(tick);
            loop {
                interval.tick().await;
                if time::Instant::now() >= deadline {
                    break;
                }
                if tx.send(TimerEvent::SpinTick).is_err() {
                    return;
                }
            }
            let _ = tx.send(TimerEvent::SpinFinished { spin: id });
        });
    }

    fn finish_spin(&mut self, spin: u64) -> earnhub::Result<Feedback> {
        let Some(anim) = self.spin.filter(|anim| anim.id == spin) else {
            return Ok(Feedback::None);
        };
        self.spin = None;
        self.wheel_rotation = anim.to;
        let Some(outcome) = self.session.pending_spin().copied() else {
            return Ok(Feedback::None);
        };
        self.session.settle_spin()?;
        let threshold = self.session.rules().low_prize_threshold;
        let message = if outcome.is_low_prize(threshold) {
            format!(
                "{}! Better luck next time.",
                outcome.segment().label
            )
        } else {
            format!("You won {} Rs!", outcome.prize)
        };
        info!(prize = %outcome.prize, kind = ?outcome.kind, "spin settled");
        self.set_status(message);
        self.win_banner = Some(outcome);
        self.schedule(
            self.timings.win_display(),
            TimerEvent::WinBannerExpired { spin: anim.id },
        );
        Ok(Feedback::None)
    }

    fn reset_wheel(&mut self) {
        self.spin = None;
        self.win_banner = None;
        self.wheel_rotation = self.session.wheel_rotation();
    }

    fn resume_pending_verification(&self) {
        let Some(profile) = self.session.profile() else {
            return;
        };
        if profile.payment_status == PaymentStatus::PendingVerification {
            self.schedule(
                self.timings.verification_delay(),
                TimerEvent::VerificationDue {
                    username: profile.username.clone(),
                },
            );
        }
    }

    fn schedule(&self, delay: Duration, event: TimerEvent) {
        let tx = self.timer_tx.clone();
        tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(event);
        });
    }
}

/// Amounts typed into forms: up to two decimals, e.g. `250` or `12.50`.
fn parse_amount(raw: &str) -> Option<Rupees> {
    raw.trim().parse::<Rupees>().ok()
}

pub async fn run_app(config: AppConfig) -> Result<()> {
    let (timer_tx, timer_rx) = mpsc::unbounded_channel();
    let visitor_interval = config.settings.timings.landing_counter();
    let controller = AppController::new(config, timer_tx.clone())?;
    spawn_visitor_counter(visitor_interval, timer_tx);

    let mut ui_state = ui::UiState::default();
    let mut input_events = ui::input_event_stream();

    tracing::info!("Starting UI");
    ui::terminal_enter(&mut ui_state)?;
    let res = run_loop(controller, &mut ui_state, &mut input_events, timer_rx).await;
    ui::terminal_exit()?;
    res
}

fn spawn_visitor_counter(every: Duration, tx: mpsc::UnboundedSender<TimerEvent>) {
    tokio::spawn(async move {
        let mut interval = time::interval(every);
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(TimerEvent::VisitorTick).is_err() {
                break;
            }
        }
    });
}

fn report(ui_state: &mut ui::UiState, outcome: earnhub::Result<Feedback>) {
    match outcome {
        Ok(Feedback::None) => {}
        Ok(Feedback::Alert(message)) => ui_state.show_alert(message),
        Ok(Feedback::PinPrompt(purpose)) => ui_state.prompt_pin(purpose),
        Err(e) => {
            error!(error = %e, "action failed");
            ui_state.show_alert(e.to_string());
        }
    }
}

async fn run_loop(
    mut controller: AppController,
    ui_state: &mut ui::UiState,
    input_events: &mut ui::InputEventReceiver,
    mut timer_rx: mpsc::UnboundedReceiver<TimerEvent>,
) -> Result<()> {
    tracing::info!("Running app loop");
    ui::draw(ui_state, &controller.build_snapshot()).wrap_err("initial draw failed")?;

    loop {
        tokio::select! {
            maybe_timer = timer_rx.recv() => {
                let Some(event) = maybe_timer else {
                    warn!("timer channel closed");
                    break;
                };
                let outcome = controller.apply_timer(event);
                report(ui_state, outcome);
                ui::draw(ui_state, &controller.build_snapshot())
                    .wrap_err("draw after timer event failed")?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
            raw_ev = ui::next_raw_event(input_events) => {
                let event = raw_ev?;
                let Some(ev) = ui::interpret_event(ui_state, event) else {
                    continue;
                };
                if matches!(ev, UserEvent::Quit) {
                    break;
                }
                let outcome = controller.apply(ev);
                report(ui_state, outcome);
                ui::draw(ui_state, &controller.build_snapshot())
                    .wrap_err("draw after user event failed")?;
            }
        }
    }
    if controller.is_spinning() {
        warn!("exited while the wheel was spinning; the prize was not credited");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;
    use earnhub::{
        config::RewardRules,
        ledger::{
            TransactionKind,
            WithdrawalMethod,
        },
        referrals::ReferralLevel,
    };

    fn instant_timings() -> Timings {
        Timings {
            verification_delay_ms: 0,
            spin_duration_ms: 0,
            spin_tick_ms: 1,
            win_display_ms: 0,
            landing_counter_ms: 1,
        }
    }

    fn controller() -> (AppController, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut session = Session::new(
            AppStorage::Memory(InMemoryStorage::new()),
            RewardRules::default(),
        );
        session.seed_rng(5);
        (AppController::with_session(session, instant_timings(), tx), rx)
    }

    async fn verified_controller() -> (AppController, mpsc::UnboundedReceiver<TimerEvent>) {
        let (mut controller, mut rx) = controller();
        controller.apply(UserEvent::GetStarted).unwrap();
        controller.apply(UserEvent::Signup("kamran".into())).unwrap();
        controller.apply(UserEvent::SubmitPayment).unwrap();
        let due = rx.recv().await.unwrap();
        controller.apply_timer(due).unwrap();
        (controller, rx)
    }

    #[test]
    fn eased_rotation__starts_fast_and_settles_on_target() {
        assert_eq!(eased_rotation(0.0, 100.0, 0.0), 0.0);
        assert_eq!(eased_rotation(0.0, 100.0, 1.0), 100.0);
        assert_eq!(eased_rotation(0.0, 100.0, 3.0), 100.0);
        assert!(eased_rotation(0.0, 100.0, 0.5) > 50.0);
    }

    #[test]
    fn parse_amount__accepts_two_decimals_only() {
        assert_eq!(parse_amount(" 12.50 "), Some(Rupees::from_paisa(1250)));
        assert_eq!(parse_amount("1.005"), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[tokio::test]
    async fn submit_payment__verifies_after_timer_fires() {
        // given
        let (mut controller, mut rx) = controller();
        controller.apply(UserEvent::GetStarted).unwrap();
        controller.apply(UserEvent::Signup("kamran".into())).unwrap();

        // when
        controller.apply(UserEvent::SubmitPayment).unwrap();
        let pending = controller.build_snapshot().screen;
        let due = rx.recv().await.unwrap();
        controller.apply_timer(due).unwrap();

        // then
        assert_eq!(pending, Screen::PendingVerification);
        let snapshot = controller.build_snapshot();
        assert_eq!(snapshot.screen, Screen::App);
        assert_eq!(snapshot.stats.balance, -Rupees::whole(50));
    }

    #[tokio::test]
    async fn navigate__wallet_without_pin_prompts_setup() {
        // given
        let (mut controller, _rx) = verified_controller().await;

        // when
        let feedback = controller.apply(UserEvent::Navigate(View::Wallet)).unwrap();

        // then
        assert_eq!(feedback, Feedback::PinPrompt(PinPurpose::Setup));
        assert_eq!(controller.build_snapshot().view, View::Wallet);
    }

    #[tokio::test]
    async fn navigate__locked_wallet_prompts_unlock() {
        // given
        let (mut controller, _rx) = verified_controller().await;
        controller
            .apply(UserEvent::SubmitPin {
                purpose: PinPurpose::Setup,
                pin: "1357".into(),
            })
            .unwrap();
        controller.apply(UserEvent::Logout).unwrap();
        controller.apply(UserEvent::GetStarted).unwrap();
        controller.apply(UserEvent::Login("kamran".into())).unwrap();

        // when
        let feedback = controller.apply(UserEvent::Navigate(View::Wallet)).unwrap();
        let unlocked = controller.apply(UserEvent::SubmitPin {
            purpose: PinPurpose::Unlock,
            pin: "1357".into(),
        });

        // then
        assert_eq!(feedback, Feedback::PinPrompt(PinPurpose::Unlock));
        assert!(unlocked.is_ok());
        assert_eq!(controller.build_snapshot().view, View::Wallet);
    }

    #[tokio::test]
    async fn spin_daily__credits_prize_when_animation_ends() {
        // given
        let (mut controller, mut rx) = verified_controller().await;
        controller.apply(UserEvent::Navigate(View::SpinWheel)).unwrap();

        // when
        controller.apply(UserEvent::SpinDaily).unwrap();
        let spinning = controller.build_snapshot().wheel.spinning;
        loop {
            let event = rx.recv().await.unwrap();
            let finished = matches!(event, TimerEvent::SpinFinished { .. });
            controller.apply_timer(event).unwrap();
            if finished {
                break;
            }
        }

        // then
        assert!(spinning);
        let snapshot = controller.build_snapshot();
        assert!(!snapshot.wheel.spinning);
        assert_eq!(snapshot.wheel.kind, WheelKind::Bought);
        assert_eq!(
            snapshot.wheel.win.map(|w| w.prize),
            Some(Rupees::from_paisa(1))
        );
        assert_eq!(snapshot.transactions[0].description, "Spin Wheel Prize");
    }

    fn fund(controller: &mut AppController, referrals: usize) {
        for _ in 0..referrals {
            controller
                .apply(UserEvent::SimulateReferral(ReferralLevel::Direct))
                .unwrap();
        }
    }

    fn finish_current_spin(controller: &mut AppController) {
        let spin = controller.spins_started;
        controller
            .apply_timer(TimerEvent::SpinFinished { spin })
            .unwrap();
    }

    #[tokio::test]
    async fn buy_spin__pointer_rests_on_every_winner() {
        // given
        let (mut controller, _rx) = verified_controller().await;
        fund(&mut controller, 3);

        for round in 0..6 {
            // when
            controller.apply(UserEvent::BuySpin(Rupees::whole(1))).unwrap();
            finish_current_spin(&mut controller);

            // then
            let wheel = controller.build_snapshot().wheel;
            let win = wheel.win.unwrap();
            assert_eq!(wheel.pointer, win.index, "round {round}");
        }
    }

    #[tokio::test]
    async fn spin_finished__from_an_abandoned_spin_is_ignored() {
        // given
        let (mut controller, _rx) = verified_controller().await;
        controller.apply(UserEvent::SpinDaily).unwrap();
        let abandoned = controller.spins_started;
        controller.apply(UserEvent::Logout).unwrap();
        controller.apply(UserEvent::GetStarted).unwrap();
        controller.apply(UserEvent::Login("kamran".into())).unwrap();
        fund(&mut controller, 3);
        controller.apply(UserEvent::BuySpin(Rupees::whole(5))).unwrap();
        let transactions = controller.build_snapshot().transactions.len();

        // when
        controller
            .apply_timer(TimerEvent::SpinFinished { spin: abandoned })
            .unwrap();

        // then
        assert!(controller.is_spinning());
        assert_eq!(controller.build_snapshot().transactions.len(), transactions);

        // when
        finish_current_spin(&mut controller);

        // then
        assert!(!controller.is_spinning());
        assert!(controller.build_snapshot().wheel.win.is_some());
    }

    #[tokio::test]
    async fn win_banner_expired__only_clears_its_own_spin() {
        // given
        let (mut controller, _rx) = verified_controller().await;
        fund(&mut controller, 3);
        controller.apply(UserEvent::BuySpin(Rupees::whole(1))).unwrap();
        finish_current_spin(&mut controller);
        let first = controller.spins_started;
        controller.apply(UserEvent::BuySpin(Rupees::whole(1))).unwrap();
        finish_current_spin(&mut controller);

        // when
        controller
            .apply_timer(TimerEvent::WinBannerExpired { spin: first })
            .unwrap();
        let after_stale = controller.build_snapshot().wheel.win;
        let current = controller.spins_started;
        controller
            .apply_timer(TimerEvent::WinBannerExpired { spin: current })
            .unwrap();

        // then
        assert!(after_stale.is_some());
        assert!(controller.build_snapshot().wheel.win.is_none());
    }

    #[tokio::test]
    async fn complete_task__announces_reward_in_alert() {
        // given
        let (mut controller, _rx) = verified_controller().await;
        let task = controller.build_snapshot().tasks[0].clone();

        // when
        let feedback = controller.apply(UserEvent::CompleteTask(0)).unwrap();

        // then
        assert_eq!(
            feedback,
            Feedback::Alert(format!(
                "Task \"{}\" completed! You earned {} Rs.",
                task.title, task.reward
            ))
        );
    }

    #[tokio::test]
    async fn withdraw_form__bad_amount_alerts_without_touching_ledger() {
        // given
        let (mut controller, _rx) = verified_controller().await;
        controller
            .apply(UserEvent::SimulateReferral(ReferralLevel::Direct))
            .unwrap();
        let before = controller.build_snapshot().transactions.len();

        // when
        let feedback = controller
            .apply(UserEvent::Submit(FormSubmission::Withdraw {
                method: WithdrawalMethod::JazzCash,
                account_title: "Kamran".into(),
                account_number: "0300".into(),
                amount: "lots".into(),
            }))
            .unwrap();

        // then
        assert!(matches!(feedback, Feedback::Alert(_)));
        assert_eq!(controller.build_snapshot().transactions.len(), before);
    }

    #[tokio::test]
    async fn deposit_form__records_pending_entry() {
        // given
        let (mut controller, _rx) = verified_controller().await;

        // when
        controller
            .apply(UserEvent::Submit(FormSubmission::Deposit {
                amount: "100".into(),
                txid: "TX42".into(),
            }))
            .unwrap();

        // then
        let snapshot = controller.build_snapshot();
        assert_eq!(snapshot.transactions[0].kind, TransactionKind::PendingDeposit);
        assert_eq!(snapshot.stats.balance, -Rupees::whole(50));
    }

    #[tokio::test]
    async fn buy_spin__short_balance_is_an_error() {
        // given
        let (mut controller, _rx) = verified_controller().await;

        // when
        let result = controller.apply(UserEvent::BuySpin(Rupees::whole(5)));

        // then
        assert!(matches!(
            result,
            Err(earnhub::Error::InsufficientBalance { .. })
        ));
        assert!(!controller.is_spinning());
    }

    #[tokio::test]
    async fn visitor_tick__only_counts_on_landing() {
        // given
        let (mut controller, _rx) = controller();
        let start = controller.build_snapshot().visitors;

        // when
        controller.apply_timer(TimerEvent::VisitorTick).unwrap();
        let on_landing = controller.build_snapshot().visitors;
        controller.apply(UserEvent::GetStarted).unwrap();
        controller.apply_timer(TimerEvent::VisitorTick).unwrap();

        // then
        assert!((start + 1..=start + 3).contains(&on_landing));
        assert_eq!(controller.build_snapshot().visitors, on_landing);
    }
}
