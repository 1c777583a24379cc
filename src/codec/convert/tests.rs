use super::ConversionRegistry;
use crate::codec::{CodecError, Result, Shape, Value};

#[test]
fn text_is_identity() {
	let registry = ConversionRegistry::standard();
	assert_eq!(registry.convert(Shape::Text, " St Albans ").expect("text converts"), Value::Text(" St Albans ".to_owned()));
}

#[test]
fn bool_accepts_canonical_forms() {
	let registry = ConversionRegistry::standard();
	for raw in ["1", "t", "T", "TRUE", "true", "True"] {
		assert_eq!(registry.convert(Shape::Bool, raw).expect("true form"), Value::Bool(true), "{raw}");
	}
	for raw in ["0", "f", "F", "FALSE", "false", "False"] {
		assert_eq!(registry.convert(Shape::Bool, raw).expect("false form"), Value::Bool(false), "{raw}");
	}
	assert!(matches!(registry.convert(Shape::Bool, "yes"), Err(CodecError::Conversion { shape: Shape::Bool, .. })));
}

#[test]
fn floats_parse_by_width() {
	let registry = ConversionRegistry::standard();
	assert_eq!(registry.convert(Shape::F32, "23.5").expect("f32"), Value::F32(23.5));
	assert_eq!(registry.convert(Shape::F64, "-115.1111").expect("f64"), Value::F64(-115.1111));
	assert_eq!(registry.convert(Shape::F64, "1e3").expect("exponent"), Value::F64(1000.0));
	assert_eq!(registry.convert(Shape::F64, "-Inf").expect("infinity"), Value::F64(f64::NEG_INFINITY));
}

#[test]
fn float_overflow_is_rejected() {
	let registry = ConversionRegistry::standard();
	assert!(matches!(registry.convert(Shape::F32, "1e39"), Err(CodecError::Conversion { shape: Shape::F32, .. })));
	assert!(registry.convert(Shape::F64, "1e39").is_ok());
	assert!(registry.convert(Shape::F64, "forty").is_err());
}

#[test]
fn integers_honour_prefixes() {
	let registry = ConversionRegistry::standard();
	assert_eq!(registry.convert(Shape::I64, "0x1F").expect("hex"), Value::I64(31));
	assert_eq!(registry.convert(Shape::I64, "-0b101").expect("binary"), Value::I64(-5));
	assert_eq!(registry.convert(Shape::I64, "0o17").expect("octal"), Value::I64(15));
	assert_eq!(registry.convert(Shape::I64, "017").expect("legacy octal"), Value::I64(15));
	assert_eq!(registry.convert(Shape::I64, "0").expect("zero"), Value::I64(0));
	assert_eq!(registry.convert(Shape::Int, "+42").expect("signed"), Value::Int(42));
}

#[test]
fn integers_reject_out_of_range_and_garbage() {
	let registry = ConversionRegistry::standard();
	assert_eq!(registry.convert(Shape::I8, "-128").expect("min i8"), Value::I8(-128));
	assert!(matches!(registry.convert(Shape::I8, "128"), Err(CodecError::Conversion { shape: Shape::I8, .. })));
	assert!(registry.convert(Shape::I32, "2147483648").is_err());
	assert!(registry.convert(Shape::I32, "12abc").is_err());
	assert!(registry.convert(Shape::I32, "09").is_err());
	assert!(registry.convert(Shape::I64, "").is_err());
	assert!(registry.convert(Shape::I64, "-").is_err());
	assert!(registry.convert(Shape::I64, "0x").is_err());
}

#[test]
fn conversion_error_carries_raw_value() {
	let registry = ConversionRegistry::standard();
	let err = registry.convert(Shape::I32, "abc").expect_err("not an integer");
	let CodecError::Conversion { shape, raw } = err else {
		panic!("expected conversion error, got {err:?}");
	};
	assert_eq!(shape, Shape::I32);
	assert_eq!(raw, "abc");
}

#[test]
fn shapes_without_entry_are_unsupported() {
	let registry = ConversionRegistry::standard();
	for shape in [Shape::U32, Shape::U64, Shape::Chars, Shape::Ints, Shape::Record, Shape::Pointer] {
		assert!(!registry.supports(shape));
		assert!(matches!(registry.convert(shape, "1"), Err(CodecError::UnsupportedShape { shape: got }) if got == shape));
	}
}

#[test]
fn registered_entries_extend_the_table() {
	fn parse_u32(raw: &str) -> Result<Value> {
		raw.parse().map(Value::U32).map_err(|_| CodecError::Conversion {
			shape: Shape::U32,
			raw: raw.to_owned(),
		})
	}

	let mut registry = ConversionRegistry::standard();
	registry.register(Shape::U32, parse_u32);
	assert_eq!(registry.convert(Shape::U32, "7").expect("registered"), Value::U32(7));
	assert!(ConversionRegistry::empty().convert(Shape::Text, "x").is_err());
}
