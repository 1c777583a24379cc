//! Generic object-to-record decoder bound through a representation tag.

use serde_json::Value as JsonValue;

use crate::codec::record::{assign_leaf, write_field};
use crate::codec::tag::parse_field_tag;
use crate::codec::{CodecError, FieldMut, KeyValueObject, Record, Result, Shape, Value};

/// Field-binding convention for the structural decoder.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
	/// Annotation key whose value names each field's object key.
	pub tag: &'a str,
	/// Use the declared field name when the key segment is empty.
	pub name_fallback: bool,
	/// Maximum record nesting depth.
	pub max_depth: u32,
}

impl<'a> Binding<'a> {
	/// Bind fields through annotation `tag` with default limits.
	pub fn new(tag: &'a str) -> Self {
		Self {
			tag,
			name_fallback: true,
			max_depth: 64,
		}
	}
}

/// Map the entries of `object` onto the fields of `dst`.
///
/// Keys without a matching field are ignored and fields without a matching
/// key keep their value. Nested objects fill embedded records, and pointer
/// fields are allocated for an object and cleared for `null`.
pub fn decode_object(object: &KeyValueObject, dst: &mut dyn Record, binding: &Binding<'_>) -> Result<()> {
	decode_into(object, dst, binding, "$", 0)
}

fn decode_into(object: &KeyValueObject, record: &mut dyn Record, binding: &Binding<'_>, path: &str, depth: u32) -> Result<()> {
	let type_name = record.type_name();
	if depth >= binding.max_depth {
		return Err(CodecError::DepthExceeded {
			type_name,
			max_depth: binding.max_depth,
		});
	}
	tracing::debug!(record = type_name, path, "structural decode enter");

	for (index, field) in record.fields().iter().enumerate() {
		if !field.exported {
			continue;
		}

		let tag = parse_field_tag(field, binding.tag, binding.name_fallback);
		if tag.omit || tag.key.is_empty() {
			continue;
		}
		let Some(entry) = object.get(&tag.key) else {
			continue;
		};
		let here = format!("{path}.{}", tag.key);

		match write_field(record, index)? {
			FieldMut::Record(inner) => match entry {
				JsonValue::Object(nested) => decode_into(nested, inner, binding, &here, depth + 1)?,
				JsonValue::Null => {}
				other => return Err(mismatch(here, Shape::Record, other)),
			},
			FieldMut::Pointer(slot) => match entry {
				JsonValue::Object(nested) => decode_into(nested, slot.get_or_insert(), binding, &here, depth + 1)?,
				JsonValue::Null => slot.clear(),
				other => return Err(mismatch(here, Shape::Pointer, other)),
			},
			FieldMut::Leaf(leaf) => {
				if entry.is_null() {
					continue;
				}
				let value = leaf_value(field.shape, entry).ok_or_else(|| mismatch(here, field.shape, entry))?;
				assign_leaf(type_name, field, leaf, value)?;
			}
		}
	}

	Ok(())
}

fn leaf_value(shape: Shape, entry: &JsonValue) -> Option<Value> {
	let value = match shape {
		Shape::Text => Value::Text(entry.as_str()?.to_owned()),
		Shape::Bool => Value::Bool(entry.as_bool()?),
		Shape::F32 => {
			let wide = entry.as_f64()?;
			let narrow = wide as f32;
			if narrow.is_infinite() {
				return None;
			}
			Value::F32(narrow)
		}
		Shape::F64 => Value::F64(entry.as_f64()?),
		Shape::Int => Value::Int(isize::try_from(whole_number(entry)?).ok()?),
		Shape::I8 => Value::I8(i8::try_from(whole_number(entry)?).ok()?),
		Shape::I32 => Value::I32(i32::try_from(whole_number(entry)?).ok()?),
		Shape::I64 => Value::I64(whole_number(entry)?),
		Shape::U32 => Value::U32(u32::try_from(entry.as_u64()?).ok()?),
		Shape::U64 => Value::U64(entry.as_u64()?),
		Shape::Chars => {
			let items = entry.as_array()?;
			let chars = items
				.iter()
				.map(|item| item.as_u64().and_then(|code| u32::try_from(code).ok()).and_then(char::from_u32))
				.collect::<Option<Vec<char>>>()?;
			Value::Chars(chars)
		}
		Shape::Ints => {
			let items = entry.as_array()?;
			let ints = items
				.iter()
				.map(|item| whole_number(item).and_then(|value| i32::try_from(value).ok()))
				.collect::<Option<Vec<i32>>>()?;
			Value::Ints(ints)
		}
		Shape::Record | Shape::Pointer => return None,
	};
	Some(value)
}

/// Integer value of a JSON number, accepting floats without a fraction.
fn whole_number(entry: &JsonValue) -> Option<i64> {
	if let Some(value) = entry.as_i64() {
		return Some(value);
	}
	let value = entry.as_f64()?;
	if value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
		return None;
	}
	Some(value as i64)
}

fn mismatch(path: String, expected: Shape, got: &JsonValue) -> CodecError {
	CodecError::StructuralDecode {
		path,
		expected,
		got: json_kind(got),
	}
}

pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
	match value {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "bool",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "array",
		JsonValue::Object(_) => "object",
	}
}
