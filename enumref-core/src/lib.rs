//! enumref-core: build-once reflection tables for integer-backed enums.
//!
//! A reflection table maps between an enumerator's declaration position,
//! its underlying value and its name. It is built once per enum type from
//! two inputs: the resolved values (one per enumerator, in declaration
//! order) and the raw declaration text, from which the names are scanned.
//!
//! # Features
//!
//! - **Value resolution**: auto-increment with explicit overrides, exact over
//!   the full range of every primitive integer repr
//! - **Name tokenizing**: single-pass scan that skips initializers, nested
//!   parentheses included
//! - **Three views**: positional, by value (first-declared wins on aliases),
//!   by name (unique)
//! - **Total lookups**: a miss is `None`, never a panic
//! - **Bidirectional iteration** in declaration order
//! - **Lazy per-type tables** through [`reflect_enum!`]
//! - **Manifest catalog**: tables for declarations listed in `enumref.toml`
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use enumref_core::prelude::*;
//!
//! reflect_enum! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     pub enum Color: i16 {
//!         Transparent = -1,
//!         Red = 1,
//!         Green,
//!         Blue,
//!     }
//! }
//!
//! let table = Color::reflector();
//! assert_eq!(table.name_of(2), Some("Green"));
//! assert_eq!(table.value_of("Blue"), Some(3));
//! for e in table.iter().rev() {
//!     println!("{}) {} - {}", e.index(), e.value(), e.name());
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`resolve`]: slot sequence to values
//! - [`tokenize`]: declaration text to names
//! - [`table`]: the reflection table and its queries
//! - [`iter`]: enumerator views and iteration
//! - [`reflect`]: the `Reflect` trait and `reflect_enum!`
//! - [`config`] / [`catalog`]: manifest-driven tables
//! - [`report`]: text and JSON output
//! - [`error`]: typed error handling
//!
//! # Cargo Features
//!
//! - `catalog` (default): manifest loading, parallel catalog build, reporting

// Core modules (always available)
pub mod discriminant;
pub mod error;
pub mod iter;
pub mod logging;
pub mod prelude;
pub mod reflect;
pub mod resolve;
pub mod table;
pub mod tokenize;

// Feature-gated modules
#[cfg(feature = "catalog")]
pub mod catalog;
#[cfg(feature = "catalog")]
pub mod config;
#[cfg(feature = "catalog")]
pub mod report;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{ReflectError, ReflectResult};

// Value representation
pub use discriminant::{parse_integer_literal, Discriminant};

// Resolution and tokenizing
pub use resolve::{resolve_values, slots_from_clauses, EnumeratorSlot};
pub use tokenize::{scan_clauses, tokenize_names, Clause};

// Tables and queries
pub use iter::{Enumerator, Enumerators};
pub use table::ReflectionTable;

// Typed facade
pub use reflect::{reflector_for, Reflect};

// Logging
pub use logging::{
    init_structured_logging, log_error, log_event, log_info, log_warn,
    try_init_structured_logging,
};

// Feature-gated re-exports
#[cfg(feature = "catalog")]
pub use catalog::{build_entry, Catalog, CatalogEntry, ReprKind};

#[cfg(feature = "catalog")]
pub use config::{
    load_manifest, load_manifest_file, parse_manifest, EnumSpec, Manifest, OutputConfig,
    SlotSpec, MANIFEST_FILE,
};

#[cfg(feature = "catalog")]
pub use report::{
    entry_json, entry_plain, lookup_json, print_json, print_plain, render_plain, table_json,
    Direction,
};
