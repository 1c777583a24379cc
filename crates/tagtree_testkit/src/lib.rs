//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Environment for the address-book demo user.
pub const REBECCA_ENV: &[(&str, &str)] = &[
	("USER_NAME", "Rebecca"),
	("USER_ADDRESS_STREET", "16 St Mary's Close"),
	("USER_ADDRESS_CITY", "St Albans"),
	("USER_ADDRESS_POSTCODE", "AL3"),
	("USER_AGE", "45"),
];

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read and parse a JSON fixture, panicking with the fixture name on failure.
pub fn json_fixture(name: &str) -> serde_json::Value {
	let path = fixture_path(name);
	let text = std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("fixture {} reads: {err}", path.display()));
	serde_json::from_str(&text).unwrap_or_else(|err| panic!("fixture {} parses: {err}", path.display()))
}

/// Owned copy of `pairs`, minus any key listed in `without`.
pub fn env_pairs(pairs: &[(&str, &str)], without: &[&str]) -> Vec<(String, String)> {
	pairs
		.iter()
		.filter(|(key, _)| !without.contains(key))
		.map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
		.collect()
}
