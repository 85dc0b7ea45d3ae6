//! Aggregation descriptor resolution for JSON-described generated structs.
//!
//! A description declares a set of named elements plus an optional
//! `aggregation` block. Resolution turns that block into an immutable
//! [`AggregationDescriptor`] telling a generator whether the elements are
//! packaged as nothing, an array, or a keyed map (with optional aliases).

pub mod description;
pub mod descriptor;
pub mod error;
pub mod kind;
pub mod resolve;

pub use description::{AggregationDecl, Description, MapAliases};
pub use descriptor::AggregationDescriptor;
pub use error::{AggregationError, DefinedAs};
pub use kind::AggregationKind;
pub use resolve::{Resolver, resolve};

/// Key type used for map containers that do not declare `map_key_type`.
pub const DEFAULT_MAP_KEY_TYPE: &str = "std::string_view";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        AggregationDecl, AggregationDescriptor, AggregationError, AggregationKind, Description,
        Resolver, resolve,
    };
}
