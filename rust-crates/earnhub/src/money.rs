use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use std::{
    fmt,
    iter::Sum,
    ops::{
        Add,
        AddAssign,
        Neg,
        Sub,
    },
    str::FromStr,
};

const PAISA_PER_RUPEE: i64 = 100;

/// Signed amount of money held as whole paisa.
///
/// Persisted as a decimal rupee number (`12.5`), shown with two decimals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rupees(i64);

impl Rupees {
    pub const ZERO: Rupees = Rupees(0);

    pub const fn from_paisa(paisa: i64) -> Self {
        Rupees(paisa)
    }

    pub const fn whole(rupees: i64) -> Self {
        Rupees(rupees * PAISA_PER_RUPEE)
    }

    /// Rounds to the nearest paisa.
    pub fn from_decimal(rupees: f64) -> Self {
        Rupees((rupees * PAISA_PER_RUPEE as f64).round() as i64)
    }

    pub const fn paisa(self) -> i64 {
        self.0
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / PAISA_PER_RUPEE as f64
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn times(self, quantity: u32) -> Self {
        Rupees(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Like `Display` but without trailing zero decimals: `5`, `0.5`, `0.01`.
    pub fn compact(self) -> String {
        let full = self.to_string();
        full.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = PAISA_PER_RUPEE as u64;
        write!(f, "{sign}{}.{:02}", abs / per, abs % per)
    }
}

impl FromStr for Rupees {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(format!("'{s}' is not an amount"));
        }
        if fraction.len() > 2 {
            return Err(format!("'{s}' has more than two decimal places"));
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(format!("'{s}' is not an amount"));
        }
        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| format!("'{s}' is out of range"))?
        };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|e| e.to_string())? * 10,
            _ => fraction.parse::<i64>().map_err(|e| e.to_string())?,
        };
        let paisa = whole
            .checked_mul(PAISA_PER_RUPEE)
            .and_then(|p| p.checked_add(fraction))
            .ok_or_else(|| format!("'{s}' is out of range"))?;
        Ok(Rupees(if negative { -paisa } else { paisa }))
    }
}

impl Add for Rupees {
    type Output = Rupees;

    fn add(self, rhs: Rupees) -> Rupees {
        Rupees(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Rupees {
    fn add_assign(&mut self, rhs: Rupees) {
        *self = *self + rhs;
    }
}

impl Sub for Rupees {
    type Output = Rupees;

    fn sub(self, rhs: Rupees) -> Rupees {
        Rupees(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Rupees {
    type Output = Rupees;

    fn neg(self) -> Rupees {
        Rupees(self.0.saturating_neg())
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Rupees>>(iter: I) -> Rupees {
        iter.fold(Rupees::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Rupees> for Rupees {
    fn sum<I: Iterator<Item = &'a Rupees>>(iter: I) -> Rupees {
        iter.copied().sum()
    }
}

impl Serialize for Rupees {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Rupees {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("amount must be finite"));
        }
        Ok(Rupees::from_decimal(value))
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;

    #[test]
    fn display__pads_paisa_and_keeps_sign() {
        assert_eq!(Rupees::from_paisa(550).to_string(), "5.50");
        assert_eq!(Rupees::from_paisa(1).to_string(), "0.01");
        assert_eq!(Rupees::from_paisa(-50).to_string(), "-0.50");
        assert_eq!(Rupees::whole(-50).to_string(), "-50.00");
    }

    #[test]
    fn compact__drops_trailing_zero_decimals() {
        assert_eq!(Rupees::whole(5).compact(), "5");
        assert_eq!(Rupees::whole(10).compact(), "10");
        assert_eq!(Rupees::from_paisa(50).compact(), "0.5");
        assert_eq!(Rupees::from_paisa(1).compact(), "0.01");
        assert_eq!(Rupees::ZERO.compact(), "0");
    }

    #[test]
    fn from_str__accepts_up_to_two_decimals() {
        assert_eq!("12".parse::<Rupees>().unwrap(), Rupees::whole(12));
        assert_eq!("12.5".parse::<Rupees>().unwrap(), Rupees::from_paisa(1250));
        assert_eq!(".25".parse::<Rupees>().unwrap(), Rupees::from_paisa(25));
        assert_eq!("-3.25".parse::<Rupees>().unwrap(), Rupees::from_paisa(-325));
    }

    #[test]
    fn from_str__rejects_garbage() {
        assert!("".parse::<Rupees>().is_err());
        assert!("1.234".parse::<Rupees>().is_err());
        assert!("abc".parse::<Rupees>().is_err());
        assert!("1.2.3".parse::<Rupees>().is_err());
    }

    #[test]
    fn serde__uses_decimal_rupees() {
        // given
        let amount = Rupees::from_paisa(325);

        // when
        let json = serde_json::to_string(&amount).unwrap();
        let back: Rupees = serde_json::from_str("0.1").unwrap();

        // then
        assert_eq!(json, "3.25");
        assert_eq!(back, Rupees::from_paisa(10));
    }
}
