use serde_json::{Map, Number, Value as JsonValue};

use crate::codec::record::read_field;
use crate::codec::structural::Binding;
use crate::codec::tag::parse_field_tag;
use crate::codec::{CodecError, FieldDescriptor, FieldRef, Record, Result, Value};

/// Generic serialized form of a record: an ordered string-keyed object.
pub type KeyValueObject = Map<String, JsonValue>;

/// How fields tagged `omitempty` are treated on encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OmitEmpty {
	/// Never write the field.
	#[default]
	Always,
	/// Skip the field only when it holds its zero or empty value.
	WhenEmpty,
}

/// Representation-tag behaviour for encoding and decoding key-value objects.
#[derive(Debug, Clone)]
pub struct MarshalOptions {
	/// Annotation key holding the representation binding.
	pub tag: &'static str,
	/// Treatment of `omitempty` fields.
	pub omit_empty: OmitEmpty,
	/// Finish the current record right after its first nested record field.
	pub stop_after_nested: bool,
	/// Use the declared field name when the key segment is empty.
	pub name_fallback: bool,
	/// Declared names of character fields rendered as code-point arrays.
	pub raw_sequence_fields: Vec<String>,
	/// Keys whose string values are expanded into code-point arrays before
	/// decoding. `None` collects the keys of the destination's character
	/// fields.
	pub char_sequence_keys: Option<Vec<String>>,
	/// Maximum record nesting depth.
	pub max_depth: u32,
}

impl Default for MarshalOptions {
	fn default() -> Self {
		Self {
			tag: "json",
			omit_empty: OmitEmpty::Always,
			stop_after_nested: false,
			name_fallback: true,
			raw_sequence_fields: vec!["NI".to_owned()],
			char_sequence_keys: None,
			max_depth: 64,
		}
	}
}

impl MarshalOptions {
	/// Preset reproducing the first-generation walker: the walk of a record
	/// ends at its first nested record field, and an empty key segment is
	/// never replaced by the declared name.
	pub fn legacy() -> Self {
		Self {
			stop_after_nested: true,
			name_fallback: false,
			..Self::default()
		}
	}

	/// Preset that writes `omitempty` fields whenever they hold a value.
	pub fn when_empty() -> Self {
		Self {
			omit_empty: OmitEmpty::WhenEmpty,
			..Self::default()
		}
	}

	/// Binding rules handed to the structural decoder.
	pub fn binding(&self) -> Binding<'_> {
		Binding {
			tag: self.tag,
			name_fallback: self.name_fallback,
			max_depth: self.max_depth,
		}
	}

	fn renders_raw(&self, field: &FieldDescriptor) -> bool {
		self.raw_sequence_fields.iter().any(|name| name.eq_ignore_ascii_case(field.name))
	}
}

/// Render `src` into a key-value object keyed by representation tags.
pub fn encode(src: &dyn Record, opt: &MarshalOptions) -> Result<KeyValueObject> {
	encode_record(src, opt, 0)
}

/// Render `src` and serialize it as compact JSON text.
pub fn encode_to_string(src: &dyn Record, opt: &MarshalOptions) -> Result<String> {
	let object = JsonValue::Object(encode(src, opt)?);
	serde_json::to_string(&object).map_err(CodecError::Encode)
}

/// Render `src` and serialize it as indented JSON text.
pub fn encode_to_string_pretty(src: &dyn Record, opt: &MarshalOptions) -> Result<String> {
	let object = JsonValue::Object(encode(src, opt)?);
	serde_json::to_string_pretty(&object).map_err(CodecError::Encode)
}

fn encode_record(record: &dyn Record, opt: &MarshalOptions, depth: u32) -> Result<KeyValueObject> {
	let type_name = record.type_name();
	if depth >= opt.max_depth {
		return Err(CodecError::DepthExceeded {
			type_name,
			max_depth: opt.max_depth,
		});
	}
	tracing::debug!(record = type_name, depth, "encode enter");

	let mut out = KeyValueObject::new();
	for (index, field) in record.fields().iter().enumerate() {
		if !field.exported {
			tracing::trace!(record = type_name, field = field.name, "skip unexported field");
			continue;
		}

		let tag = parse_field_tag(field, opt.tag, opt.name_fallback);
		if tag.key.is_empty() || tag.omit {
			tracing::trace!(record = type_name, field = field.name, "skip omitted field");
			continue;
		}

		let view = read_field(record, index)?;
		if tag.omit_empty && (opt.omit_empty == OmitEmpty::Always || is_empty(&view)) {
			tracing::trace!(record = type_name, field = field.name, "skip omitempty field");
			continue;
		}

		match view {
			FieldRef::Record(inner) => {
				let nested = encode_record(inner, opt, depth + 1)?;
				out.insert(tag.key, JsonValue::Object(nested));
				if opt.stop_after_nested {
					tracing::debug!(record = type_name, field = field.name, "walk ends at nested record");
					return Ok(out);
				}
			}
			FieldRef::Pointer(Some(inner)) => {
				let nested = encode_record(inner, opt, depth + 1)?;
				out.insert(tag.key, JsonValue::Object(nested));
			}
			FieldRef::Pointer(None) => {
				out.insert(tag.key, JsonValue::Null);
			}
			FieldRef::Leaf(leaf) => {
				let rendered = render_leaf(field, leaf.value(), opt)?;
				out.insert(tag.key, rendered);
			}
		}
	}

	Ok(out)
}

fn is_empty(view: &FieldRef<'_>) -> bool {
	match view {
		FieldRef::Leaf(leaf) => leaf.value().is_empty(),
		FieldRef::Pointer(inner) => inner.is_none(),
		FieldRef::Record(_) => false,
	}
}

fn render_leaf(field: &FieldDescriptor, value: Value, opt: &MarshalOptions) -> Result<JsonValue> {
	let rendered = match value {
		Value::Text(v) => JsonValue::String(v),
		Value::Bool(v) => JsonValue::Bool(v),
		Value::F32(v) => float(field, widen_f32(v))?,
		Value::F64(v) => float(field, v)?,
		Value::Int(v) => JsonValue::from(v as i64),
		Value::I8(v) => JsonValue::from(v),
		Value::I32(v) => JsonValue::from(v),
		Value::I64(v) => JsonValue::from(v),
		Value::U32(v) => JsonValue::from(v),
		Value::U64(v) => JsonValue::from(v),
		Value::Chars(v) if opt.renders_raw(field) => JsonValue::Array(v.into_iter().map(|ch| JsonValue::from(u32::from(ch))).collect()),
		Value::Chars(v) => JsonValue::String(v.into_iter().collect()),
		Value::Ints(v) => JsonValue::Array(v.into_iter().map(JsonValue::from).collect()),
	};
	Ok(rendered)
}

fn float(field: &FieldDescriptor, value: f64) -> Result<JsonValue> {
	Number::from_f64(value).map(JsonValue::Number).ok_or_else(|| {
		CodecError::Encode(serde::ser::Error::custom(format!(
			"field {}: unsupported float value {value}",
			field.name
		)))
	})
}

/// Widen through the shortest decimal form so `0.1f32` renders as `0.1`.
fn widen_f32(value: f32) -> f64 {
	value.to_string().parse::<f64>().unwrap_or(f64::from(value))
}
