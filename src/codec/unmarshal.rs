use std::collections::{BTreeSet, HashSet};

use serde_json::Value as JsonValue;

use crate::codec::structural::{decode_object, json_kind};
use crate::codec::tag::parse_field_tag;
use crate::codec::{CodecError, FieldDescriptor, KeyValueObject, MarshalOptions, Record, Result, Shape};

/// Populate `dst` from a key-value object produced by [`encode`](crate::codec::encode).
///
/// String values under character-sequence keys are expanded into code-point
/// arrays first; the structural decoder then binds entries to fields through
/// the representation tag.
pub fn decode(raw: KeyValueObject, dst: &mut dyn Record, opt: &MarshalOptions) -> Result<()> {
	let keys = match &opt.char_sequence_keys {
		Some(keys) => keys.iter().cloned().collect(),
		None => {
			let mut keys = BTreeSet::new();
			collect_char_keys(dst.fields(), opt, 0, &mut HashSet::new(), &mut keys);
			keys
		}
	};
	tracing::debug!(record = dst.type_name(), keys = ?keys, "decode character-sequence keys");

	let mut raw = raw;
	expand_char_sequences(&mut raw, &keys);
	decode_object(&raw, dst, &opt.binding())
}

/// Parse JSON text and decode its top-level object into `dst`.
pub fn decode_str(text: &str, dst: &mut dyn Record, opt: &MarshalOptions) -> Result<()> {
	match serde_json::from_str::<JsonValue>(text).map_err(CodecError::Json)? {
		JsonValue::Object(raw) => decode(raw, dst, opt),
		other => Err(CodecError::StructuralDecode {
			path: "$".to_owned(),
			expected: Shape::Record,
			got: json_kind(&other),
		}),
	}
}

/// Replace string values under `keys` with arrays of code points, at every
/// nesting level.
pub fn expand_char_sequences(raw: &mut KeyValueObject, keys: &BTreeSet<String>) {
	for (key, value) in raw.iter_mut() {
		match value {
			JsonValue::Object(nested) => expand_char_sequences(nested, keys),
			JsonValue::String(text) if keys.contains(key) => {
				let codes = text.chars().map(|ch| JsonValue::from(u32::from(ch))).collect();
				*value = JsonValue::Array(codes);
			}
			_ => {}
		}
	}
}

/// Each schema is walked once, so recursive record types stay linear.
fn collect_char_keys(
	fields: &'static [FieldDescriptor],
	opt: &MarshalOptions,
	depth: u32,
	seen: &mut HashSet<*const FieldDescriptor>,
	out: &mut BTreeSet<String>,
) {
	if depth >= opt.max_depth || !seen.insert(fields.as_ptr()) {
		return;
	}
	for field in fields.iter().filter(|field| field.exported) {
		match field.shape {
			Shape::Chars => {
				let tag = parse_field_tag(field, opt.tag, opt.name_fallback);
				if !tag.omit && !tag.key.is_empty() {
					out.insert(tag.key);
				}
			}
			shape if !shape.is_leaf() => collect_char_keys(field.nested_fields(), opt, depth + 1, seen, out),
			_ => {}
		}
	}
}
