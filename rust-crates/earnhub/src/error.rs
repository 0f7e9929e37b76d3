use crate::money::Rupees;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// An action needs a signed-in profile.
    NotSignedIn,
    /// The profile has not passed payment verification yet.
    NotVerified,
    InvalidUsername(String),
    UsernameTaken(String),
    UnknownUser(String),
    InsufficientBalance {
        required: Rupees,
        available: Rupees,
    },
    InvalidAmount(Rupees),
    InvalidQuantity(u32),
    InvalidSpinCost(Rupees),
    DailySpinUsed,
    /// The previous spin has not been settled yet.
    SpinInProgress,
    UnknownTask(String),
    InvalidPin,
    WrongPin,
    /// A required text field was left blank.
    MissingField(&'static str),
    Storage(anyhow::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotSignedIn => write!(f, "no user is signed in"),
            Error::NotVerified => write!(f, "account payment is not verified yet"),
            Error::InvalidUsername(name) => write!(f, "invalid username {name:?}"),
            Error::UsernameTaken(name) => write!(f, "username '{name}' is already taken"),
            Error::UnknownUser(name) => write!(f, "no account found for '{name}'"),
            Error::InsufficientBalance {
                required,
                available,
            } => write!(
                f,
                "insufficient balance: {required} Rs required, {available} Rs available"
            ),
            Error::InvalidAmount(amount) => write!(f, "invalid amount {amount} Rs"),
            Error::InvalidQuantity(quantity) => write!(f, "invalid quantity {quantity}"),
            Error::InvalidSpinCost(cost) => write!(f, "no spin is sold for {cost} Rs"),
            Error::DailySpinUsed => write!(f, "the free spin is already used for today"),
            Error::SpinInProgress => write!(f, "the wheel is still spinning"),
            Error::UnknownTask(id) => write!(f, "unknown task '{id}'"),
            Error::InvalidPin => write!(f, "PIN must be exactly 4 digits"),
            Error::WrongPin => write!(f, "incorrect PIN"),
            Error::MissingField(field) => write!(f, "{field} must not be empty"),
            Error::Storage(e) => write!(f, "storage failure: {e:#}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Storage(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Storage(e)
    }
}
