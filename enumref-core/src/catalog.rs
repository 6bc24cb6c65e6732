//! Reflection tables for manifest entries.
//!
//! Each `[[enum]]` entry is resolved and tokenized in its own
//! representation (so range checks are exact), then widened to `i128` so
//! tables of different reprs can be stored and queried side by side.
//! Entries are independent and built in parallel with rayon.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use tracing::info;

use crate::config::{EnumSpec, Manifest};
use crate::discriminant::Discriminant;
use crate::error::{ReflectError, ReflectResult};
use crate::logging::log_event;
use crate::table::ReflectionTable;

/// Integer representation named in a manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReprKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl ReprKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I8 => i8::REPR,
            Self::I16 => i16::REPR,
            Self::I32 => i32::REPR,
            Self::I64 => i64::REPR,
            Self::I128 => i128::REPR,
            Self::Isize => isize::REPR,
            Self::U8 => u8::REPR,
            Self::U16 => u16::REPR,
            Self::U32 => u32::REPR,
            Self::U64 => u64::REPR,
            Self::Usize => usize::REPR,
        }
    }
}

impl FromStr for ReprKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "isize" => Self::Isize,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "usize" => Self::Usize,
            other => return Err(format!("unsupported repr `{}`", other)),
        })
    }
}

impl fmt::Display for ReprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A manifest entry's table together with its declared representation.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub repr: ReprKind,
    pub table: ReflectionTable<i128>,
}

/// Every table described by a manifest, in manifest order.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build one table per manifest entry.
    ///
    /// All entries are attempted; the error reported is the first one in
    /// manifest order. Enum names must be unique within a manifest.
    pub fn from_manifest(manifest: &Manifest) -> ReflectResult<Self> {
        let mut seen = HashSet::new();
        if let Some(dup) = manifest.enums.iter().find(|spec| !seen.insert(spec.name.as_str())) {
            return Err(ReflectError::manifest(&dup.name, "enum declared more than once"));
        }

        let results: Vec<ReflectResult<CatalogEntry>> =
            manifest.enums.par_iter().map(build_entry).collect();
        let entries = results.into_iter().collect::<ReflectResult<Vec<_>>>()?;

        info!(enums = entries.len(), "catalog built");
        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.table.type_name() == name)
    }

    /// Like [`Catalog::get`], but a miss is an [`ReflectError::UnknownEnum`].
    pub fn require(&self, name: &str) -> ReflectResult<&CatalogEntry> {
        self.get(name).ok_or_else(|| ReflectError::UnknownEnum {
            name: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the table for a single manifest entry.
pub fn build_entry(spec: &EnumSpec) -> ReflectResult<CatalogEntry> {
    let repr: ReprKind = spec
        .repr()
        .parse()
        .map_err(|message: String| ReflectError::manifest(&spec.name, message))?;

    let table = match repr {
        ReprKind::I8 => build_typed::<i8>(spec),
        ReprKind::I16 => build_typed::<i16>(spec),
        ReprKind::I32 => build_typed::<i32>(spec),
        ReprKind::I64 => build_typed::<i64>(spec),
        ReprKind::I128 => build_typed::<i128>(spec),
        ReprKind::Isize => build_typed::<isize>(spec),
        ReprKind::U8 => build_typed::<u8>(spec),
        ReprKind::U16 => build_typed::<u16>(spec),
        ReprKind::U32 => build_typed::<u32>(spec),
        ReprKind::U64 => build_typed::<u64>(spec),
        ReprKind::Usize => build_typed::<usize>(spec),
    };

    match table {
        Ok(table) => Ok(CatalogEntry { repr, table }),
        Err(e) => {
            log_event("ERROR", &spec.name, &e.to_string());
            Err(e)
        }
    }
}

fn build_typed<V: Discriminant>(spec: &EnumSpec) -> ReflectResult<ReflectionTable<i128>> {
    let table = match &spec.values {
        Some(values) => {
            let slots = values
                .iter()
                .map(|value| value.to_slot::<V>())
                .collect::<ReflectResult<Vec<_>>>()?;
            ReflectionTable::<V>::from_slots(&spec.name, &slots, &spec.declaration)?
        }
        None => ReflectionTable::<V>::from_declaration(&spec.name, &spec.declaration)?,
    };
    Ok(table.widened())
}
