//! Annotation grammar: `key:"value"` lookup and the env/representation parsers.

use serde::Serialize;

use crate::codec::FieldDescriptor;

/// Parsed environment binding for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvTag {
	/// Environment key; empty when the field has no source binding.
	pub key: String,
	/// Missing environment value is a hard failure.
	pub required: bool,
	/// Literal used when the environment has no value.
	pub default: Option<String>,
}

/// Parsed representation binding for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldTag {
	/// Output key; empty means the field is unaddressable.
	pub key: String,
	/// Field is never written (`"-"`).
	pub omit: bool,
	/// Field carried the `omitempty` option.
	pub omit_empty: bool,
}

/// Look up `key` in a `key:"value" key:"value"` annotation string.
///
/// Scanning stops at the first malformed pair, so keys after it are not
/// reachable.
pub fn lookup(tag: &str, key: &str) -> Option<String> {
	let mut rest = tag;
	while !rest.is_empty() {
		rest = rest.trim_start_matches(' ');
		let bytes = rest.as_bytes();

		let name_len = bytes
			.iter()
			.position(|byte| *byte <= b' ' || *byte == b':' || *byte == b'"' || *byte == 0x7f)
			.unwrap_or(bytes.len());
		if name_len == 0 || name_len + 1 >= bytes.len() || bytes[name_len] != b':' || bytes[name_len + 1] != b'"' {
			return None;
		}
		let name = &rest[..name_len];
		rest = &rest[name_len + 1..];

		let bytes = rest.as_bytes();
		let mut end = 1;
		while end < bytes.len() && bytes[end] != b'"' {
			if bytes[end] == b'\\' {
				end += 1;
			}
			end += 1;
		}
		if end >= bytes.len() {
			return None;
		}
		let quoted = &rest[..=end];
		rest = &rest[end + 1..];

		if name == key {
			return unquote(quoted);
		}
	}
	None
}

fn unquote(quoted: &str) -> Option<String> {
	let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
	let mut out = String::with_capacity(inner.len());
	let mut chars = inner.chars();
	while let Some(ch) = chars.next() {
		if ch != '\\' {
			out.push(ch);
			continue;
		}
		match chars.next()? {
			'n' => out.push('\n'),
			't' => out.push('\t'),
			'r' => out.push('\r'),
			'0' => out.push('\0'),
			'\\' => out.push('\\'),
			'"' => out.push('"'),
			'\'' => out.push('\''),
			'u' => {
				let hex: String = chars.by_ref().take(4).collect();
				if hex.len() != 4 {
					return None;
				}
				let code = u32::from_str_radix(&hex, 16).ok()?;
				out.push(char::from_u32(code)?);
			}
			_ => return None,
		}
	}
	Some(out)
}

/// Parse the environment binding of `field`.
///
/// `tag_key` names the binding annotation (`env`), `default_key` the
/// separate default-value annotation (`envDefault`). A `KEY,required`
/// binding never reads the default annotation.
pub fn parse_env_tag(field: &FieldDescriptor, tag_key: &str, default_key: &str) -> EnvTag {
	let mut info = EnvTag::default();

	if let Some(binding) = field.lookup(tag_key) {
		let parts: Vec<&str> = binding.split(',').collect();
		info.key = parts[0].to_owned();
		if parts.len() == 2 && parts[1] == "required" {
			info.required = true;
			return info;
		}
	}

	info.default = field.lookup(default_key);
	info
}

/// Parse the representation binding of `field` under annotation `tag_key`.
///
/// With `name_fallback` an empty key segment resolves to the declared field
/// name; without it, `""` and `",omitempty"` leave the key empty.
pub fn parse_field_tag(field: &FieldDescriptor, tag_key: &str, name_fallback: bool) -> FieldTag {
	let Some(annotation) = field.lookup(tag_key) else {
		return FieldTag {
			key: field.name.to_owned(),
			..FieldTag::default()
		};
	};

	if annotation == "-" {
		return FieldTag {
			omit: true,
			..FieldTag::default()
		};
	}

	let (segment, option) = match annotation.split_once(',') {
		Some((segment, option)) => (segment, Some(option)),
		None => (annotation.as_str(), None),
	};

	let key = if segment.is_empty() && name_fallback {
		field.name.to_owned()
	} else {
		segment.to_owned()
	};

	FieldTag {
		key,
		omit: false,
		omit_empty: option == Some("omitempty"),
	}
}
