use crate::Error;
use sha2::{
    Digest,
    Sha256,
};

const SKIPPED_MARKER: &str = "SKIPPED";
const DIGEST_PREFIX: &str = "sha256:";
const PIN_LEN: usize = 4;

/// Wallet lock configuration for one user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WalletPin {
    #[default]
    NotSet,
    Skipped,
    Set { digest: String },
}

impl WalletPin {
    pub fn new(username: &str, pin: &str) -> crate::Result<Self> {
        validate(pin)?;
        Ok(WalletPin::Set {
            digest: digest(username, pin),
        })
    }

    /// Decodes the stored marker. A bare 4-digit value is treated as an
    /// unhashed PIN and hashed on the way in.
    pub fn from_stored(username: &str, stored: Option<&str>) -> Self {
        match stored.map(str::trim) {
            None | Some("") => WalletPin::NotSet,
            Some(SKIPPED_MARKER) => WalletPin::Skipped,
            Some(value) => match value.strip_prefix(DIGEST_PREFIX) {
                Some(hex_digest) => WalletPin::Set {
                    digest: hex_digest.to_string(),
                },
                None if validate(value).is_ok() => WalletPin::Set {
                    digest: digest(username, value),
                },
                None => {
                    tracing::warn!(username, "ignoring unreadable wallet PIN entry");
                    WalletPin::NotSet
                }
            },
        }
    }

    pub fn to_stored(&self) -> Option<String> {
        match self {
            WalletPin::NotSet => None,
            WalletPin::Skipped => Some(SKIPPED_MARKER.to_string()),
            WalletPin::Set { digest } => Some(format!("{DIGEST_PREFIX}{digest}")),
        }
    }

    /// True when opening the wallet must ask for the PIN.
    pub fn guards_wallet(&self) -> bool {
        matches!(self, WalletPin::Set { .. })
    }

    /// True once the user has either chosen a PIN or skipped the prompt.
    pub fn is_configured(&self) -> bool {
        !matches!(self, WalletPin::NotSet)
    }

    pub fn verify(&self, username: &str, pin: &str) -> crate::Result<()> {
        match self {
            WalletPin::Set { digest: expected } => {
                if digest(username, pin) == *expected {
                    Ok(())
                } else {
                    Err(Error::WrongPin)
                }
            }
            WalletPin::NotSet | WalletPin::Skipped => Ok(()),
        }
    }
}

fn validate(pin: &str) -> crate::Result<()> {
    if pin.len() == PIN_LEN && pin.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(Error::InvalidPin)
    }
}

fn digest(username: &str, pin: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(pin.as_bytes());
    hex::encode(hasher.finalize())
}
