pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod money;
pub mod persistence;
pub mod pin;
pub mod profile;
pub mod referrals;
pub mod router;
pub mod session;
pub mod storage;
pub mod wheel;

pub use error::Error;
pub use money::Rupees;
pub use session::Session;

pub type Result<T, E = Error> = std::result::Result<T, E>;
