use crate::error::AggregationError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// AggregationKind
///
/// How the declared elements are packaged by the generator.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum AggregationKind {
    /// Ordered container over all elements.
    Array,

    /// Keyed container; supports aliases.
    Map,

    /// Elements are emitted individually.
    #[default]
    None,
}

impl AggregationKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::Array, Self::Map, Self::None];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Map => "map",
            Self::None => "none",
        }
    }

    /// Whether the kind produces a named container.
    #[must_use]
    pub const fn is_container(self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub const fn is_map(self) -> bool {
        matches!(self, Self::Map)
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Matching is exact; "Map" or " map" are rejected.
impl FromStr for AggregationKind {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AggregationError::invalid_kind(s))
    }
}

///
/// TESTS
///
