//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use enumref_core::prelude::*;
//! ```
//!
//! Brings in the declaration macro, the typed facade and the table types,
//! which is all most callers need.

// Declaration and typed facade
pub use crate::reflect::{reflector_for, Reflect};
pub use crate::reflect_enum;

// Tables and iteration
pub use crate::iter::{Enumerator, Enumerators};
pub use crate::table::ReflectionTable;

// Building blocks
pub use crate::discriminant::Discriminant;
pub use crate::resolve::{resolve_values, EnumeratorSlot};
pub use crate::tokenize::tokenize_names;

// Errors
pub use crate::error::{ReflectError, ReflectResult};
