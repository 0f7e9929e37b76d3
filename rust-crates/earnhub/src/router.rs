use crate::profile::{
    PaymentStatus,
    UserProfile,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    Dashboard,
    Earn,
    SpinWheel,
    Wallet,
    Deposit,
    CreateTask,
    TaskHistory,
    Invite,
    ProfileSettings,
    HowItWorks,
    AboutUs,
    ContactUs,
    PrivacyPolicy,
    TermsConditions,
    Jobs,
}

impl View {
    /// Order of the sidebar.
    pub const MENU: [View; 15] = [
        View::Dashboard,
        View::Earn,
        View::SpinWheel,
        View::Wallet,
        View::Deposit,
        View::CreateTask,
        View::TaskHistory,
        View::Jobs,
        View::Invite,
        View::ProfileSettings,
        View::HowItWorks,
        View::AboutUs,
        View::ContactUs,
        View::PrivacyPolicy,
        View::TermsConditions,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Earn => "Earn",
            View::SpinWheel => "Spin & Win",
            View::Wallet => "Wallet",
            View::Deposit => "Deposit",
            View::CreateTask => "Create Task",
            View::TaskHistory => "My Campaigns",
            View::Invite => "Invite & Earn",
            View::ProfileSettings => "Profile Settings",
            View::HowItWorks => "How It Works",
            View::AboutUs => "About Us",
            View::ContactUs => "Contact Us",
            View::PrivacyPolicy => "Privacy Policy",
            View::TermsConditions => "Terms & Conditions",
            View::Jobs => "Jobs",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Top-level screen chosen from the session state before any view renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Auth,
    Payment,
    PendingVerification,
    App,
}

pub fn screen_for(show_landing: bool, profile: Option<&UserProfile>) -> Screen {
    if show_landing {
        return Screen::Landing;
    }
    match profile.map(|p| p.payment_status) {
        None => Screen::Auth,
        Some(PaymentStatus::Unpaid) => Screen::Payment,
        Some(PaymentStatus::PendingVerification) => Screen::PendingVerification,
        Some(PaymentStatus::Verified) => Screen::App,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// The router now shows this view.
    Shown(View),
    /// Opening the wallet needs the PIN first; the view did not change.
    PinRequired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Router {
    history: Vec<View>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            history: vec![View::Dashboard],
        }
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.history.last().copied().unwrap_or(View::Dashboard)
    }

    pub fn history(&self) -> &[View] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// `wallet_locked` is whether a PIN guards the wallet and it is still locked.
    pub fn navigate(&mut self, view: View, wallet_locked: bool) -> Navigation {
        if view == View::Wallet && wallet_locked {
            return Navigation::PinRequired;
        }
        if view != self.current() {
            self.history.push(view);
        }
        Navigation::Shown(view)
    }

    pub fn back(&mut self) -> View {
        if self.can_go_back() {
            self.history.pop();
        }
        self.current()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.history.push(View::Dashboard);
    }
}
