use crate::kind::AggregationKind;
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// AggregationError
///
/// Malformed aggregation declaration. Resolution stops at the first one.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum AggregationError {
    /// An alias points at a name that is not a declared element.
    #[error("aliased element `{target}` does not exist")]
    DanglingAliasTarget { alias: String, target: String },

    /// An alias reuses the name of an element or of an earlier alias.
    #[error("alias `{alias}` already defined as {existing}")]
    DuplicateAlias { alias: String, existing: DefinedAs },

    /// The `type` text does not name a known aggregation kind.
    #[error("'{kind}' is not a valid aggregation kind")]
    InvalidAggregationKind { kind: String },

    /// An array or map declaration has no usable `name`.
    #[error("{kind} aggregation container needs a `name`")]
    MissingContainerName { kind: AggregationKind },
}

impl AggregationError {
    pub(crate) fn invalid_kind(kind: impl Into<String>) -> Self {
        Self::InvalidAggregationKind { kind: kind.into() }
    }

    pub(crate) const fn missing_name(kind: AggregationKind) -> Self {
        Self::MissingContainerName { kind }
    }

    pub(crate) fn duplicate_alias(alias: impl Into<String>, existing: DefinedAs) -> Self {
        Self::DuplicateAlias {
            alias: alias.into(),
            existing,
        }
    }

    pub(crate) fn dangling_target(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self::DanglingAliasTarget {
            alias: alias.into(),
            target: target.into(),
        }
    }
}

///
/// DefinedAs
/// What an alias collided with.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum DefinedAs {
    #[display("element")]
    Element,

    #[display("alias")]
    Alias,
}
