// Registered mutation operators and the named profiles that group them.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidArgument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mutator {
    /// `>` to `>=` and friends
    #[serde(rename = "boundary")]
    Boundary,
    #[serde(rename = "negate_cmp")]
    NegateComparison,
    #[serde(rename = "negate_eq")]
    NegateEquality,
    #[serde(rename = "negate_is")]
    NegateIdentity,
    #[serde(rename = "negate_in")]
    NegateMembership,
    #[serde(rename = "bool_flip")]
    BoolFlip,
    #[serde(rename = "logic_flip")]
    LogicFlip,
    #[serde(rename = "negate_remove")]
    NegateRemove,
    #[serde(rename = "return_val")]
    ReturnValue,
    #[serde(rename = "arith")]
    Arithmetic,
    #[serde(rename = "string_mut")]
    StringLiteral,
    /// Conditional body replaced with a no-op
    #[serde(rename = "block_remove")]
    BlockRemove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// High-value operators (catch real bugs)
    One,
    Two,
}

pub const PROFILE_TIER1: &str = "@tier1";
pub const PROFILE_TIER2: &str = "@tier2";
pub const PROFILE_DEFAULT: &str = "@default";
pub const PROFILE_ALL: &str = "@all";

impl Mutator {
    pub const ALL: [Mutator; 12] = [
        Mutator::Boundary,
        Mutator::NegateComparison,
        Mutator::NegateEquality,
        Mutator::NegateIdentity,
        Mutator::NegateMembership,
        Mutator::BoolFlip,
        Mutator::LogicFlip,
        Mutator::NegateRemove,
        Mutator::ReturnValue,
        Mutator::Arithmetic,
        Mutator::StringLiteral,
        Mutator::BlockRemove,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mutator::Boundary => "boundary",
            Mutator::NegateComparison => "negate_cmp",
            Mutator::NegateEquality => "negate_eq",
            Mutator::NegateIdentity => "negate_is",
            Mutator::NegateMembership => "negate_in",
            Mutator::BoolFlip => "bool_flip",
            Mutator::LogicFlip => "logic_flip",
            Mutator::NegateRemove => "negate_remove",
            Mutator::ReturnValue => "return_val",
            Mutator::Arithmetic => "arith",
            Mutator::StringLiteral => "string_mut",
            Mutator::BlockRemove => "block_remove",
        }
    }

    pub fn tier(self) -> Tier {
        match self {
            Mutator::Arithmetic | Mutator::StringLiteral => Tier::Two,
            _ => Tier::One,
        }
    }
}

impl fmt::Display for Mutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mutator {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mutator::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| InvalidArgument::UnknownMutator(s.to_string()))
    }
}

/// Mutators belonging to a named profile, or `None` for an unknown profile.
pub fn profile(name: &str) -> Option<Vec<Mutator>> {
    let members = match name {
        PROFILE_TIER1 => Mutator::ALL
            .into_iter()
            .filter(|m| m.tier() == Tier::One)
            .collect(),
        PROFILE_TIER2 => Mutator::ALL
            .into_iter()
            .filter(|m| m.tier() == Tier::Two)
            .collect(),
        // String mutations mostly test formatting, not business logic.
        PROFILE_DEFAULT => Mutator::ALL
            .into_iter()
            .filter(|m| *m != Mutator::StringLiteral)
            .collect(),
        PROFILE_ALL => Mutator::ALL.to_vec(),
        _ => return None,
    };
    Some(members)
}
