use serde::{Deserialize, Serialize};

/// Number of decimal places in one ADA.
pub const SCALE: u32 = 6;

/// Lovelace per ADA (10^[`SCALE`]).
pub const LOVELACE_PER_ADA: u64 = 1_000_000;

/// Maximum possible supply, in Lovelace (45 billion ADA).
pub const MAX_LOVELACE: u64 = 45_000_000_000_000_000;

/// Lowest valid account index (first hardened derivation index).
pub const MIN_ACCOUNT_INDEX: u32 = 2_147_483_648;

/// Highest valid account index.
pub const MAX_ACCOUNT_INDEX: u32 = 4_294_967_295;

/// v1 wallet assurance level, trading confirmation confidence for speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssuranceLevel {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "strict")]
    Strict,
}

impl AssuranceLevel {
    /// Wire form of the assurance level.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssuranceLevel::Normal => "normal",
            AssuranceLevel::Strict => "strict",
        }
    }

    pub(crate) fn from_wire(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(AssuranceLevel::Normal),
            "strict" => Some(AssuranceLevel::Strict),
            _ => None,
        }
    }
}

/// v1 input-selection hint for outgoing transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupingPolicy {
    OptimizeForSecurity,
    OptimizeForHighThroughput,
}

impl GroupingPolicy {
    /// Wire form of the grouping policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingPolicy::OptimizeForSecurity => "OptimizeForSecurity",
            GroupingPolicy::OptimizeForHighThroughput => "OptimizeForHighThroughput",
        }
    }
}
