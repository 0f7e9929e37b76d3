use crate::client::{
    AppSnapshot,
    WheelSnapshot,
};
use color_eyre::eyre::{
    Result,
    eyre,
};
use crossterm::{
    event::{
        Event,
        EventStream,
        KeyCode,
        KeyEvent,
        KeyEventKind,
        KeyModifiers,
    },
    terminal::{
        disable_raw_mode,
        enable_raw_mode,
    },
};
use earnhub::{
    Rupees,
    catalog::TaskType,
    ledger::{
        Transaction,
        WithdrawalDetails,
        WithdrawalMethod,
    },
    profile::{
        JobSubscriptionPlan,
        PaymentStatus,
    },
    referrals::ReferralLevel,
    router::{
        Screen,
        View,
    },
};
use futures::StreamExt;
use itertools::Itertools;
use ratatui::{
    prelude::*,
    widgets::*,
};
use std::io::stdout;
use unicode_width::UnicodeWidthStr;

const PIN_LEN: usize = 4;
const MAX_USERNAME_INPUT: usize = 32;
const MAX_FIELD_INPUT: usize = 64;

pub type InputEventReceiver = EventStream;

pub fn input_event_stream() -> InputEventReceiver {
    EventStream::new()
}

pub async fn next_raw_event(stream: &mut InputEventReceiver) -> Result<Event> {
    match stream.next().await {
        Some(event) => Ok(event?),
        None => Err(eyre!("terminal input stream closed")),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinPurpose {
    Unlock,
    Setup,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormSubmission {
    Withdraw {
        method: WithdrawalMethod,
        account_title: String,
        account_number: String,
        amount: String,
    },
    Deposit {
        amount: String,
        txid: String,
    },
    CreateTask {
        task_type: TaskType,
        title: String,
        url: String,
        reward: String,
        quantity: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserEvent {
    Quit,
    Redraw,
    GetStarted,
    Signup(String),
    Login(String),
    SubmitPayment,
    Logout,
    Navigate(View),
    Back,
    CompleteTask(usize),
    SimulateReferral(ReferralLevel),
    Subscribe(JobSubscriptionPlan),
    SpinDaily,
    BuySpin(Rupees),
    SubmitPin { purpose: PinPurpose, pin: String },
    SkipPin,
    Submit(FormSubmission),
}

pub struct UiState {
    mode: Mode,
    terminal: Option<Terminal<CrosstermBackend<std::io::Stdout>>>,
    menu_idx: usize,
    auth: AuthState,
    // copied from the last snapshot for key handling
    screen: Screen,
    view: View,
    task_count: usize,
    plans: Vec<JobSubscriptionPlan>,
    spin_costs: Vec<Rupees>,
    daily_available: bool,
    saved_withdrawal: Option<WithdrawalDetails>,
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            mode: Mode::Normal,
            terminal: None,
            menu_idx: 0,
            auth: AuthState::default(),
            screen: Screen::Landing,
            view: View::Dashboard,
            task_count: 0,
            plans: Vec::new(),
            spin_costs: Vec::new(),
            daily_available: false,
            saved_withdrawal: None,
        }
    }
}

impl UiState {
    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.mode = Mode::Alert(message.into());
    }

    pub fn prompt_pin(&mut self, purpose: PinPurpose) {
        self.mode = Mode::Pin(PinState {
            purpose,
            digits: String::new(),
        });
    }

    fn remember(&mut self, snap: &AppSnapshot) {
        if self.screen != snap.screen {
            self.auth = AuthState::default();
            self.menu_idx = 0;
        }
        self.screen = snap.screen;
        self.view = snap.view;
        self.task_count = snap.tasks.len();
        self.plans = snap.plans.iter().map(|p| p.plan).collect();
        self.spin_costs = snap.wheel.spin_costs.clone();
        self.daily_available = snap.wheel.daily_available && !snap.wheel.spinning;
        self.saved_withdrawal = snap.saved_withdrawal.clone();
    }
}

#[derive(Clone, Debug, Default)]
enum Mode {
    #[default]
    Normal,
    Alert(String),
    Pin(PinState),
    Form(FormState),
    QuitModal,
}

#[derive(Clone, Debug, Default)]
struct AuthState {
    username: String,
    login: bool,
}

#[derive(Clone, Debug)]
struct PinState {
    purpose: PinPurpose,
    digits: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormKind {
    Withdraw,
    Deposit,
    CreateTask,
}

#[derive(Clone, Debug)]
struct Field {
    label: &'static str,
    value: String,
    choices: Vec<String>,
    choice: usize,
}

impl Field {
    fn text(label: &'static str, value: impl Into<String>) -> Self {
        Field {
            label,
            value: value.into(),
            choices: Vec::new(),
            choice: 0,
        }
    }

    fn picker(label: &'static str, choices: Vec<String>, choice: usize) -> Self {
        Field {
            label,
            value: String::new(),
            choices,
            choice,
        }
    }

    fn is_picker(&self) -> bool {
        !self.choices.is_empty()
    }

    fn shown(&self) -> String {
        if self.is_picker() {
            let current = self.choices.get(self.choice).map_or("", String::as_str);
            format!("< {current} >")
        } else {
            self.value.clone()
        }
    }
}

#[derive(Clone, Debug)]
struct FormState {
    kind: FormKind,
    fields: Vec<Field>,
    focus: usize,
}

impl FormState {
    fn withdraw(saved: Option<&WithdrawalDetails>) -> Self {
        let method = saved
            .and_then(|d| WithdrawalMethod::ALL.iter().position(|m| *m == d.method))
            .unwrap_or_default();
        FormState {
            kind: FormKind::Withdraw,
            fields: vec![
                Field::picker(
                    "Method",
                    WithdrawalMethod::ALL.iter().map(ToString::to_string).collect(),
                    method,
                ),
                Field::text(
                    "Account title",
                    saved.map(|d| d.account_title.clone()).unwrap_or_default(),
                ),
                Field::text(
                    "Account number",
                    saved.map(|d| d.account_number.clone()).unwrap_or_default(),
                ),
                Field::text("Amount (Rs)", ""),
            ],
            focus: 0,
        }
    }

    fn deposit() -> Self {
        FormState {
            kind: FormKind::Deposit,
            fields: vec![
                Field::text("Amount (Rs)", ""),
                Field::text("Transaction ID", ""),
            ],
            focus: 0,
        }
    }

    fn create_task() -> Self {
        FormState {
            kind: FormKind::CreateTask,
            fields: vec![
                Field::picker(
                    "Type",
                    TaskType::ALL.iter().map(ToString::to_string).collect(),
                    0,
                ),
                Field::text("Title", ""),
                Field::text("Link", ""),
                Field::text("Reward per user (Rs)", ""),
                Field::text("Quantity", ""),
            ],
            focus: 0,
        }
    }

    fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Withdraw => "Withdraw",
            FormKind::Deposit => "Deposit",
            FormKind::CreateTask => "New Campaign",
        }
    }

    fn value(&self, idx: usize) -> String {
        self.fields
            .get(idx)
            .map(|f| f.value.clone())
            .unwrap_or_default()
    }

    fn choice(&self, idx: usize) -> usize {
        self.fields.get(idx).map_or(0, |f| f.choice)
    }

    fn submission(&self) -> FormSubmission {
        match self.kind {
            FormKind::Withdraw => FormSubmission::Withdraw {
                method: WithdrawalMethod::ALL[self.choice(0) % WithdrawalMethod::ALL.len()],
                account_title: self.value(1),
                account_number: self.value(2),
                amount: self.value(3),
            },
            FormKind::Deposit => FormSubmission::Deposit {
                amount: self.value(0),
                txid: self.value(1),
            },
            FormKind::CreateTask => FormSubmission::CreateTask {
                task_type: TaskType::ALL[self.choice(0) % TaskType::ALL.len()],
                title: self.value(1),
                url: self.value(2),
                reward: self.value(3),
                quantity: self.value(4),
            },
        }
    }

    /// Returns the submission once Enter is pressed on the last field.
    fn handle_key(&mut self, code: KeyCode) -> Option<FormSubmission> {
        let last = self.fields.len().saturating_sub(1);
        let field = self.fields.get_mut(self.focus)?;
        match code {
            KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1).min(last),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.saturating_sub(1),
            KeyCode::Left if field.is_picker() => {
                field.choice = (field.choice + field.choices.len() - 1) % field.choices.len();
            }
            KeyCode::Right if field.is_picker() => {
                field.choice = (field.choice + 1) % field.choices.len();
            }
            KeyCode::Backspace if !field.is_picker() => {
                field.value.pop();
            }
            KeyCode::Char(c) if !field.is_picker() && !c.is_control() => {
                if field.value.chars().count() < MAX_FIELD_INPUT {
                    field.value.push(c);
                }
            }
            KeyCode::Enter if self.focus >= last => return Some(self.submission()),
            KeyCode::Enter => self.focus += 1,
            _ => {}
        }
        None
    }
}

pub fn terminal_enter(state: &mut UiState) -> Result<()> {
    enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    state.terminal = Some(terminal);
    Ok(())
}

pub fn terminal_exit() -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn draw(state: &mut UiState, snap: &AppSnapshot) -> Result<()> {
    state.remember(snap);
    if let Some(mut term) = state.terminal.take() {
        term.draw(|f| ui(f, state, snap))?;
        state.terminal = Some(term);
    }
    Ok(())
}

/// Maps a terminal event to an action, updating modal state on the way.
pub fn interpret_event(state: &mut UiState, event: Event) -> Option<UserEvent> {
    let key = match event {
        Event::Key(k) if k.kind == KeyEventKind::Press => k,
        Event::Resize(..) => return Some(UserEvent::Redraw),
        _ => return None,
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UserEvent::Quit);
    }

    match &mut state.mode {
        Mode::Alert(_) => {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                    state.mode = Mode::Normal;
                    Some(UserEvent::Redraw)
                }
                _ => None,
            };
        }
        Mode::QuitModal => {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Some(UserEvent::Quit),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    state.mode = Mode::Normal;
                    Some(UserEvent::Redraw)
                }
                _ => None,
            };
        }
        Mode::Pin(ps) => {
            return match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if ps.digits.len() < PIN_LEN {
                        ps.digits.push(c);
                    }
                    Some(UserEvent::Redraw)
                }
                KeyCode::Backspace => {
                    ps.digits.pop();
                    Some(UserEvent::Redraw)
                }
                KeyCode::Enter if ps.digits.len() == PIN_LEN => {
                    let event = UserEvent::SubmitPin {
                        purpose: ps.purpose,
                        pin: ps.digits.clone(),
                    };
                    state.mode = Mode::Normal;
                    Some(event)
                }
                KeyCode::Char('s') if ps.purpose == PinPurpose::Setup => {
                    state.mode = Mode::Normal;
                    Some(UserEvent::SkipPin)
                }
                KeyCode::Esc => {
                    state.mode = Mode::Normal;
                    Some(UserEvent::Redraw)
                }
                _ => None,
            };
        }
        Mode::Form(fs) => {
            if key.code == KeyCode::Esc {
                state.mode = Mode::Normal;
                return Some(UserEvent::Redraw);
            }
            return match fs.handle_key(key.code) {
                Some(submission) => {
                    state.mode = Mode::Normal;
                    Some(UserEvent::Submit(submission))
                }
                None => Some(UserEvent::Redraw),
            };
        }
        Mode::Normal => {}
    }

    match state.screen {
        Screen::Landing => landing_key(state, key),
        Screen::Auth => auth_key(state, key),
        Screen::Payment => match key.code {
            KeyCode::Enter | KeyCode::Char('p') => Some(UserEvent::SubmitPayment),
            KeyCode::Char('o') => Some(UserEvent::Logout),
            KeyCode::Char('q') | KeyCode::Esc => open_quit(state),
            _ => None,
        },
        Screen::PendingVerification => match key.code {
            KeyCode::Char('o') => Some(UserEvent::Logout),
            KeyCode::Char('q') | KeyCode::Esc => open_quit(state),
            _ => None,
        },
        Screen::App => app_key(state, key),
    }
}

fn open_quit(state: &mut UiState) -> Option<UserEvent> {
    state.mode = Mode::QuitModal;
    Some(UserEvent::Redraw)
}

fn landing_key(state: &mut UiState, key: KeyEvent) -> Option<UserEvent> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('g') => Some(UserEvent::GetStarted),
        KeyCode::Char('q') | KeyCode::Esc => open_quit(state),
        _ => None,
    }
}

fn auth_key(state: &mut UiState, key: KeyEvent) -> Option<UserEvent> {
    let auth = &mut state.auth;
    match key.code {
        KeyCode::Tab => {
            auth.login = !auth.login;
            Some(UserEvent::Redraw)
        }
        KeyCode::Backspace => {
            auth.username.pop();
            Some(UserEvent::Redraw)
        }
        KeyCode::Enter => {
            let username = auth.username.trim().to_string();
            Some(if auth.login {
                UserEvent::Login(username)
            } else {
                UserEvent::Signup(username)
            })
        }
        KeyCode::Char(c) if !c.is_control() => {
            if auth.username.chars().count() < MAX_USERNAME_INPUT {
                auth.username.push(c);
            }
            Some(UserEvent::Redraw)
        }
        KeyCode::Esc => open_quit(state),
        _ => None,
    }
}

fn digit_index(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

fn app_key(state: &mut UiState, key: KeyEvent) -> Option<UserEvent> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.menu_idx = state.menu_idx.saturating_sub(1);
            return Some(UserEvent::Redraw);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.menu_idx = (state.menu_idx + 1).min(View::MENU.len() - 1);
            return Some(UserEvent::Redraw);
        }
        KeyCode::Enter => {
            return View::MENU.get(state.menu_idx).copied().map(UserEvent::Navigate);
        }
        KeyCode::Backspace | KeyCode::Char('b') => return Some(UserEvent::Back),
        KeyCode::Char('o') => return Some(UserEvent::Logout),
        KeyCode::Char('q') | KeyCode::Esc => return open_quit(state),
        _ => {}
    }

    let picked = digit_index(key.code);
    match (state.view, key.code) {
        (View::Earn, _) => picked
            .filter(|i| *i < state.task_count)
            .map(UserEvent::CompleteTask),
        (View::SpinWheel, KeyCode::Char('s')) if state.daily_available => {
            Some(UserEvent::SpinDaily)
        }
        (View::SpinWheel, _) => picked
            .and_then(|i| state.spin_costs.get(i).copied())
            .map(UserEvent::BuySpin),
        (View::Wallet, KeyCode::Char('w')) => {
            state.mode = Mode::Form(FormState::withdraw(state.saved_withdrawal.as_ref()));
            Some(UserEvent::Redraw)
        }
        (View::Deposit, KeyCode::Char('d')) => {
            state.mode = Mode::Form(FormState::deposit());
            Some(UserEvent::Redraw)
        }
        (View::CreateTask, KeyCode::Char('n')) => {
            state.mode = Mode::Form(FormState::create_task());
            Some(UserEvent::Redraw)
        }
        (View::Invite, KeyCode::Char('1')) => {
            Some(UserEvent::SimulateReferral(ReferralLevel::Direct))
        }
        (View::Invite, KeyCode::Char('2')) => {
            Some(UserEvent::SimulateReferral(ReferralLevel::Indirect))
        }
        (View::Jobs, _) => picked
            .and_then(|i| state.plans.get(i).copied())
            .map(UserEvent::Subscribe),
        (View::ProfileSettings, KeyCode::Char('p')) => {
            state.prompt_pin(PinPurpose::Setup);
            Some(UserEvent::Redraw)
        }
        (View::ProfileSettings, KeyCode::Char('x')) => Some(UserEvent::SkipPin),
        _ => None,
    }
}

fn ui(f: &mut Frame, state: &UiState, snap: &AppSnapshot) {
    f.render_widget(Clear, f.area());
    match snap.screen {
        Screen::Landing => draw_landing(f, f.area(), snap),
        Screen::Auth => draw_auth(f, f.area(), state),
        Screen::Payment => draw_payment(f, f.area(), snap),
        Screen::PendingVerification => draw_pending(f, f.area(), snap),
        Screen::App => draw_app(f, state, snap),
    }
    draw_modals(f, state);
}

fn draw_landing(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let lines = vec![
        Line::from(Span::styled(
            "EarnHub",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Complete simple tasks, spin the wheel every day and invite friends."),
        Line::from("Withdraw your earnings to EasyPaisa, JazzCash or your bank."),
        Line::from(""),
        Line::from(format!("{} people have joined so far", snap.visitors)),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to get started",
            Style::default().fg(Color::Green),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Welcome"));
    f.render_widget(p, centered_rect(70, 50, area));
}

fn draw_auth(f: &mut Frame, area: Rect, state: &UiState) {
    let (title, action, other) = if state.auth.login {
        ("Log In", "log in", "create an account")
    } else {
        ("Sign Up", "create your account", "log in instead")
    };
    let lines = vec![
        Line::from(format!("Username: {}_", state.auth.username)),
        Line::from(""),
        Line::from(format!("Enter to {action} | Tab to {other} | Esc quit")),
    ];
    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(p, centered_rect(50, 30, area));
}

fn draw_payment(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let lines = vec![
        Line::from(format!(
            "Hi {}, activate your account with a one-time joining fee of {} Rs.",
            snap.username.as_deref().unwrap_or_default(),
            snap.joining_fee
        )),
        Line::from(""),
        Line::from("Send the fee to EasyPaisa 0300-1234567 (EarnHub), then confirm below."),
        Line::from("The fee is deducted from your balance once verified."),
        Line::from(""),
        Line::from("Enter confirm payment | o log out | q quit"),
    ];
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Joining Fee"));
    f.render_widget(p, centered_rect(70, 40, area));
}

fn draw_pending(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let lines = vec![
        Line::from("Your payment is being verified. This only takes a moment."),
        Line::from(""),
        Line::from(snap.status.clone()),
        Line::from(""),
        Line::from("o log out | q quit"),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Verifying"));
    f.render_widget(p, centered_rect(60, 30, area));
}

fn draw_app(f: &mut Frame, state: &UiState, snap: &AppSnapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, rows[0], snap);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(40)])
        .split(rows[1]);
    draw_menu(f, body[0], state, snap);
    let content = Block::default()
        .borders(Borders::ALL)
        .title(snap.view.title());
    let inner = content.inner(body[1]);
    f.render_widget(content, body[1]);
    draw_view(f, inner, snap);

    let status = if snap.status.trim().is_empty() {
        "Ready".to_string()
    } else {
        snap.status.clone()
    };
    let status = Paragraph::new(status)
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, rows[2]);

    let mut hints = vec!["↑/↓ menu", "Enter open", "b back", "o log out", "q quit"];
    hints.extend(view_hints(snap.view));
    let help = Paragraph::new(hints.iter().join(" | "))
        .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, rows[3]);
}

fn view_hints(view: View) -> Vec<&'static str> {
    match view {
        View::Earn => vec!["1-9 complete task"],
        View::SpinWheel => vec!["s free spin", "1-3 buy spin"],
        View::Wallet => vec!["w withdraw"],
        View::Deposit => vec!["d deposit"],
        View::CreateTask => vec!["n new campaign"],
        View::Invite => vec!["1/2 simulate referral"],
        View::Jobs => vec!["1-3 subscribe"],
        View::ProfileSettings => vec!["p set PIN", "x skip PIN"],
        _ => Vec::new(),
    }
}

fn draw_header(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let user = snap.username.as_deref().unwrap_or_default();
    let lock = if snap.wallet_locked { " [locked]" } else { "" };
    let text = Line::from(vec![
        Span::styled("EarnHub", Style::default().fg(Color::Yellow).bold()),
        Span::raw(format!(" | {user} | Balance: ")),
        Span::styled(format!("{} Rs", snap.stats.balance), amount_style(snap.stats.balance)),
        Span::raw(lock),
    ]);
    f.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_menu(f: &mut Frame, area: Rect, state: &UiState, snap: &AppSnapshot) {
    let items: Vec<ListItem> = View::MENU
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let cursor = if i == state.menu_idx { ">" } else { " " };
            let style = if *view == snap.view {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::styled(format!("{cursor} {}", view.title()), style))
        })
        .collect();
    let title = if snap.can_go_back { "Menu (b back)" } else { "Menu" };
    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

fn draw_view(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    match snap.view {
        View::Dashboard => draw_dashboard(f, area, snap),
        View::Earn => draw_earn(f, area, snap),
        View::SpinWheel => draw_wheel(f, area, &snap.wheel),
        View::Wallet => draw_wallet(f, area, snap),
        View::Deposit => draw_text(f, area, DEPOSIT_TEXT),
        View::CreateTask => draw_text(f, area, CREATE_TASK_TEXT),
        View::TaskHistory => draw_campaigns(f, area, snap),
        View::Invite => draw_invite(f, area, snap),
        View::ProfileSettings => draw_profile(f, area, snap),
        View::HowItWorks => draw_text(f, area, HOW_IT_WORKS_TEXT),
        View::AboutUs => draw_text(f, area, ABOUT_US_TEXT),
        View::ContactUs => draw_text(f, area, CONTACT_US_TEXT),
        View::PrivacyPolicy => draw_text(f, area, PRIVACY_POLICY_TEXT),
        View::TermsConditions => draw_text(f, area, TERMS_TEXT),
        View::Jobs => draw_jobs(f, area, snap),
    }
}

fn draw_text(f: &mut Frame, area: Rect, text: &'static str) {
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
}

fn draw_dashboard(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);
    let stats = &snap.stats;
    let lines = vec![
        Line::from(vec![
            Span::raw("Balance: "),
            Span::styled(format!("{} Rs", stats.balance), amount_style(stats.balance)),
        ]),
        Line::from(format!("Tasks completed: {}", stats.tasks_completed)),
        Line::from(format!("Direct referrals: {}", stats.direct_referrals)),
        Line::from(format!("Referral earnings: {} Rs", stats.referral_earnings)),
    ];
    f.render_widget(Paragraph::new(lines), chunks[0]);
    draw_transactions(f, chunks[1], &stats.recent, "Recent activity");
}

fn draw_transactions(f: &mut Frame, area: Rect, txs: &[Transaction], title: &str) {
    let block = Block::default().borders(Borders::TOP).title(title.to_string());
    if txs.is_empty() {
        f.render_widget(Paragraph::new("No transactions yet").block(block), area);
        return;
    }
    let rows: Vec<Row> = txs
        .iter()
        .map(|tx| {
            let style = if tx.kind.settles() {
                amount_style(tx.amount)
            } else {
                Style::default().fg(Color::Yellow)
            };
            let date = tx.date.with_timezone(&chrono::Local);
            Row::new(vec![
                Cell::from(date.format("%d %b %H:%M").to_string()),
                Cell::from(tx.kind.to_string()),
                Cell::from(tx.description.clone()),
                Cell::from(format!("{} Rs", tx.amount)).style(style),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(13),
            Constraint::Length(16),
            Constraint::Min(20),
            Constraint::Length(14),
        ],
    )
    .header(Row::new(vec!["Date", "Type", "Description", "Amount"]).style(header_style()))
    .block(block);
    f.render_widget(table, area);
}

fn header_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn draw_earn(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let mut lines = Vec::new();
    for (i, task) in snap.tasks.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", i + 1), Style::default().bold()),
            Span::styled(format!("[{}] ", task.task_type), Style::default().fg(Color::Cyan)),
            Span::raw(task.title.clone()),
            Span::styled(format!("  +{} Rs", task.reward), Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(format!("   {}", task.description)));
        lines.push(Line::from(Span::styled(
            format!("   {}", task.url),
            Style::default().fg(Color::DarkGray),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Pads or truncates `label` to exactly `width` terminal columns.
fn fit(label: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in label.chars() {
        let w = c.to_string().width();
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    let pad = width - used;
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), out, " ".repeat(pad - left))
}

fn draw_wheel(f: &mut Frame, area: Rect, wheel: &WheelSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(area);

    let cell = (usize::from(area.width) / wheel.segments.len().max(1)).clamp(4, 10);
    let spans: Vec<Span> = wheel
        .segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let style = if i == wheel.pointer {
                Style::default().fg(Color::Black).bg(Color::Yellow).bold()
            } else if i % 2 == 0 {
                Style::default().bg(Color::Blue)
            } else {
                Style::default().bg(Color::Magenta)
            };
            Span::styled(fit(segment.label, cell), style)
        })
        .collect();
    let pointer_line = format!("{}▼", " ".repeat(wheel.pointer * cell + cell / 2));
    f.render_widget(
        Paragraph::new(vec![Line::from(pointer_line), Line::from(spans)]),
        chunks[0],
    );

    let banner = match (&wheel.win, wheel.spinning) {
        (_, true) => Line::styled("Spinning...", Style::default().fg(Color::Yellow)),
        (Some(win), false) if win.is_low_prize(wheel.low_prize_threshold) => Line::styled(
            format!("{}! Better luck next time.", win.segment().label),
            Style::default().fg(Color::Red),
        ),
        (Some(win), false) => Line::styled(
            format!("You won {} Rs!", win.prize),
            Style::default().fg(Color::Green).bold(),
        ),
        (None, false) => Line::from(""),
    };
    f.render_widget(Paragraph::new(banner), chunks[1]);

    let mut lines = Vec::new();
    if wheel.daily_available {
        lines.push(Line::from("Your free daily spin is ready. Press s to spin."));
    } else {
        lines.push(Line::from("Free spin used for today. Buy extra spins:"));
    }
    for (i, cost) in wheel.spin_costs.iter().enumerate() {
        lines.push(Line::from(format!("  {}. Spin for {} Rs", i + 1, cost.compact())));
    }
    f.render_widget(Paragraph::new(lines), chunks[2]);
}

fn draw_wallet(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);
    let saved = match &snap.saved_withdrawal {
        Some(d) => format!(
            "Saved account: {} | {} | {}",
            d.method, d.account_title, d.account_number
        ),
        None => "No saved withdrawal account".to_string(),
    };
    let pin = if snap.pin_configured {
        "PIN: configured"
    } else {
        "PIN: not set"
    };
    let lines = vec![
        Line::from(vec![
            Span::raw("Available: "),
            Span::styled(
                format!("{} Rs", snap.stats.balance),
                amount_style(snap.stats.balance),
            ),
        ]),
        Line::from(saved),
        Line::from(format!("{pin} | w to withdraw")),
    ];
    f.render_widget(Paragraph::new(lines), chunks[0]);
    draw_transactions(f, chunks[1], &snap.transactions, "History");
}

fn draw_campaigns(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    if snap.user_tasks.is_empty() {
        draw_text(f, area, "No campaigns yet. Create one from Create Task.");
        return;
    }
    let rows: Vec<Row> = snap
        .user_tasks
        .iter()
        .map(|t| {
            Row::new(vec![
                t.title.clone(),
                t.task_type.to_string(),
                format!("{} Rs", t.reward),
                format!("{}/{}", t.completions, t.quantity),
                t.views.to_string(),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(6),
        ],
    )
    .header(Row::new(vec!["Title", "Type", "Reward", "Done", "Views"]).style(header_style()));
    f.render_widget(table, area);
}

fn draw_invite(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let user = snap.username.as_deref().unwrap_or_default();
    let lines = vec![
        Line::from(format!("Your invite link: https://earnhub.pk/join?ref={user}")),
        Line::from(""),
        Line::from(format!(
            "Level 1 referrals: {} (+{} Rs each)",
            snap.referrals.level1, snap.level1_bonus
        )),
        Line::from(format!(
            "Level 2 referrals: {} (+{} Rs each)",
            snap.referrals.level2, snap.level2_bonus
        )),
        Line::from(format!(
            "Referral earnings: {} Rs",
            snap.stats.referral_earnings
        )),
        Line::from(""),
        Line::from("Press 1 or 2 to simulate a referral at that level."),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_profile(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let status = match snap.payment_status {
        Some(PaymentStatus::Verified) => "Verified",
        Some(PaymentStatus::PendingVerification) => "Pending verification",
        Some(PaymentStatus::Unpaid) | None => "Unpaid",
    };
    let subscription = match &snap.subscription {
        Some(s) => format!("{} plan until {}", s.plan, s.expiry_date.format("%d %b %Y")),
        None => "None".to_string(),
    };
    let pin = if snap.wallet_locked {
        "Set (wallet locked)"
    } else if snap.pin_configured {
        "Configured"
    } else {
        "Not set"
    };
    let lines = vec![
        Line::from(format!(
            "Username: {}",
            snap.username.as_deref().unwrap_or_default()
        )),
        Line::from(format!("Account: {status}")),
        Line::from(format!("Job subscription: {subscription}")),
        Line::from(format!("Wallet PIN: {pin}")),
        Line::from(""),
        Line::from("p set a new PIN | x skip PIN"),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_jobs(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let mut lines = Vec::new();
    match &snap.subscription {
        Some(s) => lines.push(Line::styled(
            format!(
                "{} plan active until {}",
                s.plan,
                s.expiry_date.format("%d %b %Y")
            ),
            Style::default().fg(Color::Green),
        )),
        None => {
            lines.push(Line::from("Subscribe to unlock premium listings:"));
            for (i, offer) in snap.plans.iter().enumerate() {
                lines.push(Line::from(format!(
                    "  {}. {} plan | {} Rs",
                    i + 1,
                    offer.plan,
                    offer.cost
                )));
            }
        }
    }
    lines.push(Line::from(""));
    for (job, locked) in &snap.jobs {
        let marker = if *locked { "[locked] " } else { "" };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Red)),
            Span::styled(job.title.clone(), Style::default().bold()),
            Span::raw(format!(" | {} | {}", job.employment, job.salary)),
        ]));
        if !*locked {
            lines.push(Line::from(format!("  {}", job.description)));
        }
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn amount_style(amount: Rupees) -> Style {
    if amount < Rupees::ZERO {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    }
}

fn draw_modals(f: &mut Frame, state: &UiState) {
    match &state.mode {
        Mode::Normal => {}
        Mode::Alert(message) => {
            let area = centered_rect(50, 25, f.area());
            let block = Block::default()
                .borders(Borders::ALL)
                .title("Notice")
                .border_style(Style::default().fg(Color::Yellow));
            let p = Paragraph::new(vec![
                Line::from(message.clone()),
                Line::from(""),
                Line::from("Enter to dismiss"),
            ])
            .wrap(Wrap { trim: false });
            f.render_widget(Clear, area);
            f.render_widget(block.clone(), area);
            f.render_widget(p, block.inner(area));
        }
        Mode::QuitModal => {
            let area = centered_rect(30, 20, f.area());
            let block = Block::default().borders(Borders::ALL).title("Quit");
            f.render_widget(Clear, area);
            f.render_widget(block.clone(), area);
            f.render_widget(Paragraph::new("Quit EarnHub? (y/n)"), block.inner(area));
        }
        Mode::Pin(ps) => {
            let area = centered_rect(40, 25, f.area());
            let (title, hint) = match ps.purpose {
                PinPurpose::Unlock => ("Enter Wallet PIN", "Enter unlock | Esc cancel"),
                PinPurpose::Setup => (
                    "Protect your wallet",
                    "Enter save PIN | s skip | Esc later",
                ),
            };
            let masked: String = (0..PIN_LEN)
                .map(|i| if i < ps.digits.len() { '●' } else { '_' })
                .join(" ");
            let block = Block::default().borders(Borders::ALL).title(title);
            f.render_widget(Clear, area);
            f.render_widget(block.clone(), area);
            f.render_widget(
                Paragraph::new(vec![Line::from(masked), Line::from(""), Line::from(hint)])
                    .alignment(Alignment::Center),
                block.inner(area),
            );
        }
        Mode::Form(fs) => {
            let area = centered_rect(60, 50, f.area());
            let block = Block::default().borders(Borders::ALL).title(fs.title());
            let mut lines: Vec<Line> = fs
                .fields
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let cursor = if i == fs.focus { ">" } else { " " };
                    let style = if i == fs.focus {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    };
                    Line::styled(format!("{cursor} {}: {}", field.label, field.shown()), style)
                })
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::from(
                "Tab/↓ next | ←/→ choose | Enter on last field submits | Esc cancel",
            ));
            f.render_widget(Clear, area);
            f.render_widget(block.clone(), area);
            f.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: false }),
                block.inner(area),
            );
        }
    }
}

fn centered_rect(w_percent: u16, h_percent: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h_percent) / 2),
            Constraint::Percentage(h_percent),
            Constraint::Percentage((100 - h_percent) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w_percent) / 2),
            Constraint::Percentage(w_percent),
            Constraint::Percentage((100 - w_percent) / 2),
        ])
        .split(popup_layout[1])[1]
}

const DEPOSIT_TEXT: &str = "Add funds to your balance.\n\n\
Send the amount to EasyPaisa 0300-1234567 (EarnHub) and note the transaction ID.\n\
Press d to submit the amount and transaction ID. Deposits stay pending until our \
team confirms them; your balance does not change until then.";

const CREATE_TASK_TEXT: &str = "Promote your website, channel or page.\n\n\
Pick a task type, the link, the reward each user receives and how many users you \
want. The full cost (reward x quantity) is deducted from your balance right away.\n\n\
Press n to start a new campaign.";

const HOW_IT_WORKS_TEXT: &str = "1. Sign up and pay the one-time joining fee.\n\
2. Complete tasks from the Earn page to collect rewards.\n\
3. Spin the wheel once a day for free, or buy extra spins.\n\
4. Invite friends: earn a bonus for every direct and indirect referral.\n\
5. Withdraw your balance to EasyPaisa, JazzCash or a bank account.";

const ABOUT_US_TEXT: &str = "EarnHub connects advertisers with people who want to \
earn from simple online tasks. Advertisers create campaigns, members complete them \
and get paid straight to their wallet.";

const CONTACT_US_TEXT: &str = "Email: support@earnhub.pk\n\
WhatsApp: +92 300 1234567\n\
Support hours: 10am to 6pm PKT, Monday to Saturday.";

const PRIVACY_POLICY_TEXT: &str = "We store your username, balance, transactions and \
withdrawal details only to run your account. We never sell your data. Withdrawal \
account details are kept so you do not have to type them again.";

const TERMS_TEXT: &str = "The joining fee is non-refundable. Rewards are credited \
only for genuinely completed tasks. Multiple accounts per person are not allowed. \
Withdrawals are processed within 24 to 48 hours.";

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;
    use crate::client::{
        AppController,
        AppStorage,
    };
    use earnhub::{
        Session,
        config::{
            RewardRules,
            Timings,
        },
        storage::InMemoryStorage,
    };
    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(state: &mut UiState, text: &str) {
        for c in text.chars() {
            interpret_event(state, key(KeyCode::Char(c)));
        }
    }

    fn app_state(view: View) -> UiState {
        UiState {
            screen: Screen::App,
            view,
            task_count: 3,
            plans: JobSubscriptionPlan::ALL.to_vec(),
            spin_costs: vec![Rupees::whole(1), Rupees::whole(5), Rupees::whole(10)],
            daily_available: true,
            ..UiState::default()
        }
    }

    fn render(snap: &AppSnapshot, state: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| ui(f, state, snap)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn interpret_event__auth_types_username_and_toggles_login() {
        // given
        let mut state = UiState {
            screen: Screen::Auth,
            ..UiState::default()
        };

        // when
        type_text(&mut state, "sara");
        let signup = interpret_event(&mut state, key(KeyCode::Enter));
        interpret_event(&mut state, key(KeyCode::Tab));
        let login = interpret_event(&mut state, key(KeyCode::Enter));

        // then
        assert_eq!(signup, Some(UserEvent::Signup("sara".into())));
        assert_eq!(login, Some(UserEvent::Login("sara".into())));
    }

    #[test]
    fn interpret_event__menu_enter_navigates_to_highlighted_view() {
        // given
        let mut state = app_state(View::Dashboard);

        // when
        interpret_event(&mut state, key(KeyCode::Down));
        interpret_event(&mut state, key(KeyCode::Down));
        let event = interpret_event(&mut state, key(KeyCode::Enter));

        // then
        assert_eq!(event, Some(UserEvent::Navigate(View::MENU[2])));
    }

    #[test]
    fn interpret_event__digits_pick_items_of_the_current_view() {
        let mut earn = app_state(View::Earn);
        assert_eq!(
            interpret_event(&mut earn, key(KeyCode::Char('2'))),
            Some(UserEvent::CompleteTask(1))
        );
        assert_eq!(interpret_event(&mut earn, key(KeyCode::Char('9'))), None);

        let mut wheel = app_state(View::SpinWheel);
        assert_eq!(
            interpret_event(&mut wheel, key(KeyCode::Char('3'))),
            Some(UserEvent::BuySpin(Rupees::whole(10)))
        );
        assert_eq!(
            interpret_event(&mut wheel, key(KeyCode::Char('s'))),
            Some(UserEvent::SpinDaily)
        );

        let mut jobs = app_state(View::Jobs);
        assert_eq!(
            interpret_event(&mut jobs, key(KeyCode::Char('1'))),
            Some(UserEvent::Subscribe(JobSubscriptionPlan::Basic))
        );
    }

    #[test]
    fn interpret_event__pin_modal_submits_four_digits() {
        // given
        let mut state = app_state(View::Dashboard);
        state.prompt_pin(PinPurpose::Unlock);

        // when
        type_text(&mut state, "12");
        let early = interpret_event(&mut state, key(KeyCode::Enter));
        type_text(&mut state, "345");
        let submitted = interpret_event(&mut state, key(KeyCode::Enter));

        // then
        assert_eq!(early, None);
        assert_eq!(
            submitted,
            Some(UserEvent::SubmitPin {
                purpose: PinPurpose::Unlock,
                pin: "1234".into(),
            })
        );
        assert!(matches!(state.mode, Mode::Normal));
    }

    #[test]
    fn interpret_event__withdraw_form_prefills_saved_account() {
        // given
        let mut state = app_state(View::Wallet);
        state.saved_withdrawal = Some(WithdrawalDetails {
            method: WithdrawalMethod::BankTransfer,
            account_title: "Sara Ahmed".into(),
            account_number: "PK00".into(),
        });

        // when
        interpret_event(&mut state, key(KeyCode::Char('w')));
        for _ in 0..3 {
            interpret_event(&mut state, key(KeyCode::Tab));
        }
        type_text(&mut state, "75.5");
        let submitted = interpret_event(&mut state, key(KeyCode::Enter));

        // then
        assert_eq!(
            submitted,
            Some(UserEvent::Submit(FormSubmission::Withdraw {
                method: WithdrawalMethod::BankTransfer,
                account_title: "Sara Ahmed".into(),
                account_number: "PK00".into(),
                amount: "75.5".into(),
            }))
        );
    }

    #[test]
    fn interpret_event__create_task_picker_cycles_types() {
        // given
        let mut state = app_state(View::CreateTask);
        interpret_event(&mut state, key(KeyCode::Char('n')));

        // when
        interpret_event(&mut state, key(KeyCode::Left));
        interpret_event(&mut state, key(KeyCode::Enter));
        type_text(&mut state, "Like us");
        interpret_event(&mut state, key(KeyCode::Enter));
        type_text(&mut state, "fb.com/us");
        interpret_event(&mut state, key(KeyCode::Enter));
        type_text(&mut state, "2");
        interpret_event(&mut state, key(KeyCode::Enter));
        type_text(&mut state, "10");
        let submitted = interpret_event(&mut state, key(KeyCode::Enter));

        // then
        assert_eq!(
            submitted,
            Some(UserEvent::Submit(FormSubmission::CreateTask {
                task_type: TaskType::FacebookLike,
                title: "Like us".into(),
                url: "fb.com/us".into(),
                reward: "2".into(),
                quantity: "10".into(),
            }))
        );
    }

    #[test]
    fn interpret_event__alert_swallows_keys_until_dismissed() {
        // given
        let mut state = app_state(View::Earn);
        state.show_alert("Insufficient balance");

        // when
        let ignored = interpret_event(&mut state, key(KeyCode::Char('1')));
        let dismissed = interpret_event(&mut state, key(KeyCode::Enter));

        // then
        assert_eq!(ignored, None);
        assert_eq!(dismissed, Some(UserEvent::Redraw));
        assert!(matches!(state.mode, Mode::Normal));
    }

    #[test]
    fn interpret_event__quit_needs_confirmation() {
        let mut state = UiState::default();
        assert_eq!(
            interpret_event(&mut state, key(KeyCode::Char('q'))),
            Some(UserEvent::Redraw)
        );
        assert_eq!(
            interpret_event(&mut state, key(KeyCode::Char('y'))),
            Some(UserEvent::Quit)
        );
    }

    #[test]
    fn fit__pads_and_truncates_by_display_width() {
        assert_eq!(fit("10", 6), "  10  ");
        assert_eq!(fit("Oops!", 4), "Oops");
        assert_eq!(fit("0.01", 5).width(), 5);
    }

    #[test]
    fn ui__landing_shows_visitor_counter() {
        // given
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = Session::new(
            AppStorage::Memory(InMemoryStorage::new()),
            RewardRules::default(),
        );
        let controller = AppController::with_session(session, Timings::default(), tx);
        let snap = controller.build_snapshot();

        // when
        let screen = render(&snap, &UiState::default());

        // then
        assert!(screen.contains("EarnHub"));
        assert!(screen.contains("12480 people have joined"));
    }

    #[test]
    fn ui__app_shows_balance_and_menu() {
        // given
        let (tx, _rx) = mpsc::unbounded_channel();
        let storage = InMemoryStorage::with_items([
            (
                "userProfile",
                r#"{"username":"sara","paymentStatus":"VERIFIED"}"#,
            ),
            ("balance_sara", "42.50"),
        ]);
        let mut session = Session::new(AppStorage::Memory(storage), RewardRules::default());
        session.restore().unwrap();
        let controller = AppController::with_session(session, Timings::default(), tx);
        let snap = controller.build_snapshot();
        let mut state = UiState::default();
        state.remember(&snap);

        // when
        let screen = render(&snap, &state);

        // then
        assert!(screen.contains("Balance: 42.50 Rs"));
        assert!(screen.contains("Spin & Win"));
        assert!(screen.contains("No transactions yet"));
    }
}
