//! Typed access to an enum's reflection table.
//!
//! [`reflect_enum!`](crate::reflect_enum) declares a fieldless enum with an
//! integer representation and implements [`Reflect`] for it. The table is
//! built from the declaration on first use, in a per-type `OnceLock`, and
//! lives for the rest of the process. Racing first callers block until the
//! single build finishes; later reads take no lock.
//!
//! Rust rejects two variants with the same discriminant, so an alias is
//! declared with `alias Name = Variant`. It takes its own position and name
//! in the table and becomes an associated constant on the enum.
//!
//! ```rust,ignore
//! use enumref_core::{reflect_enum, Reflect};
//!
//! reflect_enum! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     pub enum Ports: i32 {
//!         Http = 80,
//!         Https = 443,
//!         SecureShell = 22,
//!         alias Ssh = SecureShell,
//!     }
//! }
//!
//! assert_eq!(Ports::reflector().name_of(22), Some("SecureShell"));
//! assert_eq!(Ports::reflector().index_of_name("Ssh"), Some(3));
//! assert_eq!(Ports::from_name("Ssh"), Some(&Ports::SecureShell));
//! ```

use crate::discriminant::Discriminant;
use crate::iter::Enumerator;
use crate::table::ReflectionTable;

/// An enum with a reflection table.
///
/// Implemented by [`reflect_enum!`](crate::reflect_enum); the provided
/// methods are lookups against [`Reflect::reflector`].
pub trait Reflect: Sized + 'static {
    /// The enum's `#[repr]` integer type.
    type Repr: Discriminant;

    /// The table for this type, built on first call.
    fn reflector() -> &'static ReflectionTable<Self::Repr>;

    /// Every variant in declaration order.
    fn variants() -> &'static [Self];

    /// One variant per table position; an alias position holds the variant
    /// it names.
    fn positions() -> &'static [Self];

    /// Declared name of this variant.
    fn name(&self) -> &'static str;

    /// Underlying value of this variant.
    fn value(&self) -> Self::Repr;

    /// Declaration position of this variant.
    fn index(&self) -> usize;

    /// Declared name of the enum type.
    fn enum_name() -> &'static str {
        Self::reflector().type_name()
    }

    /// This variant's entry in the table.
    fn enumerator(&self) -> Enumerator<'static, Self::Repr> {
        Enumerator::new(Self::reflector(), self.index())
    }

    /// Variant declared with exactly this name.
    fn from_name(name: &str) -> Option<&'static Self> {
        Self::reflector()
            .index_of_name(name)
            .and_then(Self::from_index)
    }

    /// First-declared variant with this value.
    fn from_value(value: Self::Repr) -> Option<&'static Self> {
        Self::reflector()
            .index_of_value(value)
            .and_then(Self::from_index)
    }

    /// Variant at a declaration position.
    fn from_index(index: usize) -> Option<&'static Self> {
        Self::positions().get(index)
    }
}

/// The table of the enum type `value` belongs to.
pub fn reflector_for<E: Reflect>(_value: &E) -> &'static ReflectionTable<E::Repr> {
    E::reflector()
}

/// Declare a fieldless enum together with its [`Reflect`] implementation.
///
/// The syntax is an ordinary enum declaration with the representation
/// written after the name (`enum Name: u16 { .. }`). Initializers are any
/// constant expressions Rust accepts as discriminants; the compiler
/// evaluates them and the declaration text only supplies the names.
///
/// A clause `alias Name = Variant` declares a second name for an existing
/// variant. It occupies the next table position, and `Enum::Name` is an
/// associated constant equal to `Enum::Variant`.
///
/// A malformed declaration panics on first use of the table.
#[macro_export]
macro_rules! reflect_enum {
    (@text (variant $variant:ident)) => {
        stringify!($variant)
    };
    (@text (variant $variant:ident = $init:expr)) => {
        stringify!($variant = $init)
    };
    (@text (alias $alias:ident = $target:ident)) => {
        stringify!($alias = $target)
    };

    (@target $name:ident, (variant $variant:ident $(= $init:expr)?)) => {
        $name::$variant
    };
    (@target $name:ident, (alias $alias:ident = $target:ident)) => {
        $name::$target
    };

    // Clause muncher: splits the body into real variants, alias constants,
    // every clause in declaration order, and every position name.
    (@munch $head:tt [$($variants:tt)*] [$($aliases:tt)*] [$($clauses:tt)*] [$($positions:tt)*]) => {
        $crate::reflect_enum!(@emit $head [$($variants)*] [$($aliases)*] [$($clauses)*] [$($positions)*]);
    };
    (@munch $head:tt [$($variants:tt)*] [$($aliases:tt)*] [$($clauses:tt)*] [$($positions:tt)*]
        $(#[$alias_meta:meta])* alias $alias:ident = $target:ident $(, $($rest:tt)*)?
    ) => {
        $crate::reflect_enum!(@munch $head
            [$($variants)*]
            [$($aliases)* $(#[$alias_meta])* $alias = $target;]
            [$($clauses)* (alias $alias = $target)]
            [$($positions)* $alias]
            $($($rest)*)?
        );
    };
    (@munch $head:tt [$($variants:tt)*] [$($aliases:tt)*] [$($clauses:tt)*] [$($positions:tt)*]
        $(#[$variant_meta:meta])* $variant:ident = $init:expr $(, $($rest:tt)*)?
    ) => {
        $crate::reflect_enum!(@munch $head
            [$($variants)* $(#[$variant_meta])* $variant = $init,]
            [$($aliases)*]
            [$($clauses)* (variant $variant = $init)]
            [$($positions)* $variant]
            $($($rest)*)?
        );
    };
    (@munch $head:tt [$($variants:tt)*] [$($aliases:tt)*] [$($clauses:tt)*] [$($positions:tt)*]
        $(#[$variant_meta:meta])* $variant:ident $(, $($rest:tt)*)?
    ) => {
        $crate::reflect_enum!(@munch $head
            [$($variants)* $(#[$variant_meta])* $variant,]
            [$($aliases)*]
            [$($clauses)* (variant $variant)]
            [$($positions)* $variant]
            $($($rest)*)?
        );
    };

    (@emit { [$(#[$meta:meta])*] [$vis:vis] $name:ident $repr:ident }
        [$( $(#[$variant_meta:meta])* $variant:ident $(= $init:expr)? , )+]
        [$( $(#[$alias_meta:meta])* $alias:ident = $target:ident ; )*]
        [$( $clause:tt )+]
        [$( $position:ident )+]
    ) => {
        $(#[$meta])*
        #[repr($repr)]
        $vis enum $name {
            $( $(#[$variant_meta])* $variant $(= $init)? ),+
        }

        #[allow(non_upper_case_globals, dead_code)]
        impl $name {
            $( $(#[$alias_meta])* $vis const $alias: $name = $name::$target; )*
        }

        impl $crate::Reflect for $name {
            type Repr = $repr;

            fn reflector() -> &'static $crate::ReflectionTable<$repr> {
                static TABLE: ::std::sync::OnceLock<$crate::ReflectionTable<$repr>> =
                    ::std::sync::OnceLock::new();
                TABLE.get_or_init(|| {
                    // Values come from the compiler, so an alias never shifts
                    // the count of the variants after it.
                    let slots: &[$crate::EnumeratorSlot<$repr>] = &[
                        $( $crate::EnumeratorSlot::Explicit(
                            $crate::reflect_enum!(@target $name, $clause) as $repr
                        ) ),+
                    ];
                    let declaration = [$( $crate::reflect_enum!(@text $clause) ),+].join(", ");
                    match $crate::ReflectionTable::from_slots(stringify!($name), slots, &declaration) {
                        Ok(table) => table,
                        Err(err) => panic!("malformed reflect_enum! declaration: {}", err),
                    }
                })
            }

            fn variants() -> &'static [Self] {
                const VARIANTS: &[$name] = &[$( $name::$variant ),+];
                VARIANTS
            }

            fn positions() -> &'static [Self] {
                const POSITIONS: &[$name] = &[$( $crate::reflect_enum!(@target $name, $clause) ),+];
                POSITIONS
            }

            fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant), )+
                }
            }

            fn value(&self) -> $repr {
                match self {
                    $( $name::$variant => $name::$variant as $repr, )+
                }
            }

            fn index(&self) -> usize {
                // Implicit discriminants of a mirror enum count declaration positions.
                #[allow(non_camel_case_types, dead_code, clippy::enum_variant_names)]
                enum Position {
                    $( $position ),+
                }
                match self {
                    $( $name::$variant => Position::$variant as usize, )+
                }
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $($body:tt)+
        }
    ) => {
        $crate::reflect_enum!(@munch { [$(#[$meta])*] [$vis] $name $repr } [] [] [] [] $($body)+);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::reflect_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Level: u8 {
            Trace,
            Debug,
            Info = 10,
            Warn,
            /// Second name for `Warn`.
            alias Warning = Warn,
            Error,
        }
    }

    crate::reflect_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Service: i32 {
            Http = 80,
            Https = 443,
            SecureShell = 22,
            alias SSH = SecureShell,
        }
    }

    crate::reflect_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Menu: u8 {
            Café,
            Tea,
        }
    }

    crate::reflect_enum! {
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Keyword: u8 {
            r#type,
            r#match,
        }
    }

    #[test]
    fn test_variant_accessors() {
        assert_eq!(Level::Info.name(), "Info");
        assert_eq!(Level::Info.value(), 10);
        assert_eq!(Level::Info.index(), 2);
        assert_eq!(Level::Error.index(), 5);
        assert_eq!(Level::variants().len(), 5);
        assert_eq!(Level::positions().len(), 6);
        assert_eq!(Level::reflector().len(), 6);
        assert_eq!(Level::enum_name(), "Level");
    }

    #[test]
    fn test_alias_does_not_shift_later_values() {
        assert_eq!(Level::Error.value(), 12);
        assert_eq!(Level::reflector().value_of("Error"), Some(12));
        assert_eq!(Level::reflector().value_of("Warning"), Some(11));
    }

    #[test]
    fn test_alias_constant_is_target_variant() {
        assert_eq!(Level::Warning, Level::Warn);
        assert_eq!(Level::Warning.name(), "Warn");
        assert_eq!(Level::reflector().index_of_name("Warning"), Some(4));
        assert_eq!(Level::reflector().name_at(4), Some("Warning"));
    }

    #[test]
    fn test_typed_lookups() {
        assert_eq!(Level::from_name("Warn"), Some(&Level::Warn));
        assert_eq!(Level::from_name("Warning"), Some(&Level::Warn));
        assert_eq!(Level::from_name("Fatal"), None);
        assert_eq!(Level::from_value(11), Some(&Level::Warn));
        assert_eq!(Level::from_value(1), Some(&Level::Debug));
        assert_eq!(Level::from_index(4), Some(&Level::Warn));
        assert_eq!(Level::from_index(5), Some(&Level::Error));
        assert_eq!(Level::from_index(6), None);
    }

    #[test]
    fn test_alias_first_declared_wins() {
        let table = Service::reflector();
        assert_eq!(Service::from_value(22), Some(&Service::SecureShell));
        assert_eq!(table.index_of_name("SSH"), Some(3));
        assert_eq!(table.index_of_value(22), Some(2));
        assert_eq!(table.name_of(22), Some("SecureShell"));
        assert_eq!(table.value_of("SSH"), Some(22));
        assert!(!table.get(3).unwrap().is_first_of_value());
        assert_eq!(Service::SSH, Service::SecureShell);
    }

    #[test]
    fn test_enumerator_matches_variant() {
        for variant in Level::variants() {
            let e = variant.enumerator();
            assert_eq!(e.name(), variant.name());
            assert_eq!(e.value(), variant.value());
            assert_eq!(e.index(), variant.index());
        }
    }

    #[test]
    fn test_reflector_for_value() {
        let table = reflector_for(&Level::Trace);
        assert!(std::ptr::eq(table, Level::reflector()));
        assert_eq!(table.name_of(11), Some("Warn"));
    }

    #[test]
    #[should_panic(expected = "Unexpected `é` in `Menu`")]
    fn test_non_ascii_variant_is_not_truncated() {
        assert_eq!(Menu::Tea.name(), "Tea");
        Menu::reflector();
    }

    #[test]
    #[should_panic(expected = "Unexpected `#type` in `Keyword`")]
    fn test_raw_identifier_variant_is_rejected() {
        Keyword::reflector();
    }
}
