use std::collections::HashMap;

use crate::codec::{CodecError, Result, Shape, Value};

/// Parse function converting a raw source string into a typed value.
pub type ParseFn = fn(&str) -> Result<Value>;

/// Table from leaf shape to its parse function.
#[derive(Debug, Clone)]
pub struct ConversionRegistry {
	entries: HashMap<Shape, ParseFn>,
}

impl Default for ConversionRegistry {
	fn default() -> Self {
		Self::standard()
	}
}

impl ConversionRegistry {
	/// Registry without any entries.
	pub fn empty() -> Self {
		Self { entries: HashMap::new() }
	}

	/// Registry with text, boolean, float and signed integer entries.
	pub fn standard() -> Self {
		let mut registry = Self::empty();
		registry.register(Shape::Text, parse_text);
		registry.register(Shape::Bool, parse_bool);
		registry.register(Shape::F32, parse_f32);
		registry.register(Shape::F64, parse_f64);
		registry.register(Shape::Int, parse_int);
		registry.register(Shape::I8, parse_i8);
		registry.register(Shape::I32, parse_i32);
		registry.register(Shape::I64, parse_i64);
		registry
	}

	/// Add or replace the entry for `shape`.
	pub fn register(&mut self, shape: Shape, parse: ParseFn) -> &mut Self {
		self.entries.insert(shape, parse);
		self
	}

	/// Whether `shape` has an entry.
	pub fn supports(&self, shape: Shape) -> bool {
		self.entries.contains_key(&shape)
	}

	/// Convert `raw` into a value of `shape`.
	pub fn convert(&self, shape: Shape, raw: &str) -> Result<Value> {
		let parse = self.entries.get(&shape).ok_or(CodecError::UnsupportedShape { shape })?;
		parse(raw)
	}
}

fn conversion_error(shape: Shape, raw: &str) -> CodecError {
	CodecError::Conversion { shape, raw: raw.to_owned() }
}

fn parse_text(raw: &str) -> Result<Value> {
	Ok(Value::Text(raw.to_owned()))
}

fn parse_bool(raw: &str) -> Result<Value> {
	match raw {
		"1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Value::Bool(true)),
		"0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Value::Bool(false)),
		_ => Err(conversion_error(Shape::Bool, raw)),
	}
}

fn parse_f32(raw: &str) -> Result<Value> {
	let value = raw.parse::<f32>().map_err(|_| conversion_error(Shape::F32, raw))?;
	if value.is_infinite() && !names_infinity(raw) {
		return Err(conversion_error(Shape::F32, raw));
	}
	Ok(Value::F32(value))
}

fn parse_f64(raw: &str) -> Result<Value> {
	let value = raw.parse::<f64>().map_err(|_| conversion_error(Shape::F64, raw))?;
	if value.is_infinite() && !names_infinity(raw) {
		return Err(conversion_error(Shape::F64, raw));
	}
	Ok(Value::F64(value))
}

fn names_infinity(raw: &str) -> bool {
	let unsigned = raw.trim_start_matches(['+', '-']);
	unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn parse_int(raw: &str) -> Result<Value> {
	let wide = parse_prefixed(raw).ok_or_else(|| conversion_error(Shape::Int, raw))?;
	let value = isize::try_from(wide).map_err(|_| conversion_error(Shape::Int, raw))?;
	Ok(Value::Int(value))
}

fn parse_i8(raw: &str) -> Result<Value> {
	let wide = parse_prefixed(raw).ok_or_else(|| conversion_error(Shape::I8, raw))?;
	let value = i8::try_from(wide).map_err(|_| conversion_error(Shape::I8, raw))?;
	Ok(Value::I8(value))
}

fn parse_i32(raw: &str) -> Result<Value> {
	let wide = parse_prefixed(raw).ok_or_else(|| conversion_error(Shape::I32, raw))?;
	let value = i32::try_from(wide).map_err(|_| conversion_error(Shape::I32, raw))?;
	Ok(Value::I32(value))
}

fn parse_i64(raw: &str) -> Result<Value> {
	let wide = parse_prefixed(raw).ok_or_else(|| conversion_error(Shape::I64, raw))?;
	let value = i64::try_from(wide).map_err(|_| conversion_error(Shape::I64, raw))?;
	Ok(Value::I64(value))
}

/// Signed integer with optional `0x`/`0o`/`0b` or leading-zero octal prefix.
fn parse_prefixed(raw: &str) -> Option<i128> {
	let (negative, unsigned) = match raw.as_bytes().first()? {
		b'-' => (true, &raw[1..]),
		b'+' => (false, &raw[1..]),
		_ => (false, raw),
	};

	let (radix, digits) = if let Some(rest) = unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
		(16, rest)
	} else if let Some(rest) = unsigned.strip_prefix("0o").or_else(|| unsigned.strip_prefix("0O")) {
		(8, rest)
	} else if let Some(rest) = unsigned.strip_prefix("0b").or_else(|| unsigned.strip_prefix("0B")) {
		(2, rest)
	} else if unsigned.len() > 1 && unsigned.starts_with('0') {
		(8, &unsigned[1..])
	} else {
		(10, unsigned)
	};

	if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
		return None;
	}

	let magnitude = i128::from_str_radix(digits, radix).ok()?;
	Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests;
