//! Manifest loading from enumref.toml.
//!
//! A manifest lists enum declarations to inspect without compiling them:
//!
//! ```toml
//! [output]
//! format = "json"
//!
//! [[enum]]
//! name = "Ports"
//! repr = "i32"
//! declaration = "HTTP = 80, HTTPS = 443, SecureShell = 22, SSH = 22"
//!
//! [[enum]]
//! name = "TasteFlags"
//! repr = "u64"
//! declaration = "None = 0, Salted = 1 << 0, SourSweet = (Sour | Sweet)"
//! values = [0, 1, 6]
//! ```

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::discriminant::Discriminant;
use crate::error::{ReflectError, ReflectResult};
use crate::resolve::EnumeratorSlot;

/// File name looked up by [`load_manifest`].
pub const MANIFEST_FILE: &str = "enumref.toml";

/// Representation used when an entry has no `repr`.
pub const DEFAULT_REPR: &str = "i32";

/// Top-level structure of enumref.toml.
#[derive(Debug, Deserialize, Default)]
pub struct Manifest {
    /// Enum declarations, in file order.
    #[serde(default, rename = "enum")]
    pub enums: Vec<EnumSpec>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// One `[[enum]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EnumSpec {
    pub name: String,
    /// Integer representation, e.g. "u64". Defaults to [`DEFAULT_REPR`].
    pub repr: Option<String>,
    /// Raw enumerator list as written in source.
    pub declaration: String,
    /// One slot per enumerator. When absent, slots come from literal
    /// initializers in `declaration`.
    pub values: Option<Vec<SlotSpec>>,
}

impl EnumSpec {
    pub fn repr(&self) -> &str {
        self.repr.as_deref().unwrap_or(DEFAULT_REPR)
    }
}

/// A value slot as written in the manifest.
///
/// Integers are taken as-is. Strings are either `"auto"` / `"_"` for an
/// implicit slot or an integer literal, which is how values outside the
/// TOML integer range (`"18446744073709551615"`, `"0xFFFF_FFFF"`) are
/// written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SlotSpec {
    Number(i64),
    Text(String),
}

impl SlotSpec {
    /// Convert into a slot of representation `V`.
    pub fn to_slot<V: Discriminant>(&self) -> ReflectResult<EnumeratorSlot<V>> {
        match self {
            Self::Number(n) => V::from_i128(i128::from(*n))
                .map(EnumeratorSlot::Explicit)
                .ok_or_else(|| {
                    ReflectError::invalid_literal(n.to_string(), V::REPR, "value out of range")
                }),
            Self::Text(text) if matches!(text.trim(), "auto" | "_") => Ok(EnumeratorSlot::Implicit),
            Self::Text(text) => V::parse_literal(text).map(EnumeratorSlot::Explicit),
        }
    }
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

impl Manifest {
    /// True when the manifest asks for JSON output.
    pub fn wants_json(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Parse manifest text. `path` only labels errors.
pub fn parse_manifest(path: &Path, content: &str) -> ReflectResult<Manifest> {
    toml::from_str(content).map_err(|e| ReflectError::config(path, e.to_string()))
}

/// Load a manifest from an explicit file path.
pub fn load_manifest_file(path: &Path) -> ReflectResult<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| ReflectError::io(path, e))?;
    parse_manifest(path, &content)
}

/// Loads `enumref.toml` from `root` if it exists.
pub fn load_manifest(root: &Path) -> ReflectResult<Option<Manifest>> {
    let path: PathBuf = root.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(None);
    }
    load_manifest_file(&path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir()
            .join("enumref_config_tests")
            .join(format!("{}_{}", std::process::id(), id));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_full_manifest() {
        let text = r#"
[output]
format = "JSON"

[[enum]]
name = "Ports"
declaration = "HTTP = 80, HTTPS = 443"

[[enum]]
name = "TasteFlags"
repr = "u64"
declaration = "None = 0, Salted = 1 << 0, Last = 18446744073709551615"
values = [0, 1, "18446744073709551615"]
"#;
        let manifest = parse_manifest(Path::new("enumref.toml"), text).unwrap();
        assert!(manifest.wants_json());
        assert_eq!(manifest.enums.len(), 2);
        assert_eq!(manifest.enums[0].repr(), "i32");
        assert_eq!(manifest.enums[1].repr(), "u64");
        let values = manifest.enums[1].values.as_ref().unwrap();
        assert_eq!(values[2], SlotSpec::Text("18446744073709551615".into()));
    }

    #[test]
    fn test_slot_spec_conversion() {
        assert_eq!(SlotSpec::Number(-1).to_slot::<i16>().unwrap(), EnumeratorSlot::Explicit(-1));
        assert_eq!(SlotSpec::Text("auto".into()).to_slot::<u8>().unwrap(), EnumeratorSlot::Implicit);
        assert_eq!(SlotSpec::Text("_".into()).to_slot::<u8>().unwrap(), EnumeratorSlot::Implicit);
        assert_eq!(
            SlotSpec::Text("18446744073709551615".into()).to_slot::<u64>().unwrap(),
            EnumeratorSlot::Explicit(u64::MAX)
        );
        assert!(SlotSpec::Number(-1).to_slot::<u32>().is_err());
        assert!(SlotSpec::Text("1 << 2".into()).to_slot::<u32>().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_manifest(Path::new("bad.toml"), "[[enum]\nname = ").unwrap_err();
        assert!(matches!(err, ReflectError::Config { .. }));
    }

    #[test]
    fn test_missing_manifest_is_none() {
        let dir = temp_dir();
        assert!(load_manifest(&dir).unwrap().is_none());
    }

    #[test]
    fn test_load_manifest_from_disk() {
        let dir = temp_dir();
        fs::write(
            dir.join(MANIFEST_FILE),
            "[[enum]]\nname = \"CardSuit\"\nrepr = \"i8\"\ndeclaration = \"Spades, Hearts\"\n",
        )
        .unwrap();
        let manifest = load_manifest(&dir).unwrap().unwrap();
        assert_eq!(manifest.enums[0].name, "CardSuit");
        assert!(!manifest.wants_json());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_manifest_file(Path::new("/nonexistent/enumref.toml")).unwrap_err();
        assert!(matches!(err, ReflectError::Io { .. }));
    }
}
