use std::collections::HashMap;

/// Immutable copy of a key-value environment taken at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
	vars: HashMap<String, String>,
}

impl Environment {
	/// Snapshot the current process environment.
	///
	/// Variables whose key or value is not valid UTF-8 are left out.
	pub fn capture() -> Self {
		let mut vars = HashMap::new();
		let mut skipped = 0_usize;
		for (key, value) in std::env::vars_os() {
			match (key.into_string(), value.into_string()) {
				(Ok(key), Ok(value)) => {
					vars.insert(key, value);
				}
				_ => skipped += 1,
			}
		}
		tracing::debug!(vars = vars.len(), skipped, "captured environment snapshot");
		Self { vars }
	}

	/// Value bound to `key`, if any.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.vars.get(key).map(String::as_str)
	}

	/// Whether `key` is present, including with an empty value.
	pub fn contains(&self, key: &str) -> bool {
		self.vars.contains_key(key)
	}

	/// Number of captured variables.
	pub fn len(&self) -> usize {
		self.vars.len()
	}

	/// Whether the snapshot holds no variables.
	pub fn is_empty(&self) -> bool {
		self.vars.is_empty()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			vars: iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
		}
	}
}
