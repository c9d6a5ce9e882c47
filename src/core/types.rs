use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PricingError;

/// Storage action direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Buy gas and put it into storage.
    Inject,
    /// Take gas out of storage and sell it.
    Withdraw,
}

impl ActionKind {
    /// Returns -1 for injections (cash out) and +1 for withdrawals (cash in).
    pub fn cash_sign(self) -> Decimal {
        match self {
            Self::Inject => Decimal::NEGATIVE_ONE,
            Self::Withdraw => Decimal::ONE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inject => "inject",
            Self::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Order in which injection and withdrawal legs are turned into events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOrdering {
    /// Every injection in caller order, then every withdrawal in caller order.
    #[default]
    LegSequential,
    /// Stable merge by calendar date; injections go first on a shared date.
    Chronological,
}

impl FromStr for EventOrdering {
    type Err = PricingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "leg" | "leg_sequential" | "leg-sequential" => Ok(Self::LegSequential),
            "chronological" | "calendar" => Ok(Self::Chronological),
            other => Err(PricingError::invalid(format!(
                "unknown event ordering `{other}`; expected `leg` or `chronological`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_parses_cli_spellings() {
        assert_eq!(
            "leg".parse::<EventOrdering>().unwrap(),
            EventOrdering::LegSequential
        );
        assert_eq!(
            " Chronological ".parse::<EventOrdering>().unwrap(),
            EventOrdering::Chronological
        );
        assert!("random".parse::<EventOrdering>().is_err());
    }

    #[test]
    fn cash_sign_follows_direction() {
        assert!(ActionKind::Inject.cash_sign().is_sign_negative());
        assert!(ActionKind::Withdraw.cash_sign().is_sign_positive());
    }
}
