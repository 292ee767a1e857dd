//! Pure view derivation over the profile collection: filter, search, sort,
//! and dashboard statistics. No I/O, no mutation — safe to recompute on
//! every refresh, and identical inputs always produce identical output.

pub mod engine;
pub mod stats;

pub use engine::{
    run_query, DateRange, ProfileQuery, SortDirection, SortKey, StatusFilter,
};
pub use stats::{collection_stats, CollectionStats};
