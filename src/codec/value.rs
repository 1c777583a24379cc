use std::fmt;

use serde::Serialize;

use crate::codec::record::{FieldMut, FieldRef, FieldSlot};

/// Declared kind of a field's value domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
	/// UTF-8 text (`String`).
	Text,
	/// Boolean.
	Bool,
	/// 32-bit float.
	F32,
	/// 64-bit float.
	F64,
	/// Platform-width signed integer (`isize`).
	Int,
	/// 8-bit signed integer.
	I8,
	/// 32-bit signed integer.
	I32,
	/// 64-bit signed integer.
	I64,
	/// 32-bit unsigned integer.
	U32,
	/// 64-bit unsigned integer.
	U64,
	/// Character sequence (`Vec<char>`).
	Chars,
	/// Integer sequence (`Vec<i32>`).
	Ints,
	/// Embedded record.
	Record,
	/// Optional owned pointer to a record.
	Pointer,
}

impl Shape {
	/// Stable lowercase label used in messages and listings.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Text => "string",
			Self::Bool => "bool",
			Self::F32 => "float32",
			Self::F64 => "float64",
			Self::Int => "int",
			Self::I8 => "int8",
			Self::I32 => "int32",
			Self::I64 => "int64",
			Self::U32 => "uint32",
			Self::U64 => "uint64",
			Self::Chars => "chars",
			Self::Ints => "ints",
			Self::Record => "record",
			Self::Pointer => "pointer",
		}
	}

	/// Whether values of this shape are stored directly in a leaf field.
	pub fn is_leaf(self) -> bool {
		!matches!(self, Self::Record | Self::Pointer)
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Typed leaf value produced by conversion or read back from a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Text scalar.
	Text(String),
	/// Boolean scalar.
	Bool(bool),
	/// 32-bit float scalar.
	F32(f32),
	/// 64-bit float scalar.
	F64(f64),
	/// Platform-width signed integer scalar.
	Int(isize),
	/// 8-bit signed integer scalar.
	I8(i8),
	/// 32-bit signed integer scalar.
	I32(i32),
	/// 64-bit signed integer scalar.
	I64(i64),
	/// 32-bit unsigned integer scalar.
	U32(u32),
	/// 64-bit unsigned integer scalar.
	U64(u64),
	/// Character sequence.
	Chars(Vec<char>),
	/// Integer sequence.
	Ints(Vec<i32>),
}

impl Value {
	/// Shape this value belongs to.
	pub fn shape(&self) -> Shape {
		match self {
			Self::Text(_) => Shape::Text,
			Self::Bool(_) => Shape::Bool,
			Self::F32(_) => Shape::F32,
			Self::F64(_) => Shape::F64,
			Self::Int(_) => Shape::Int,
			Self::I8(_) => Shape::I8,
			Self::I32(_) => Shape::I32,
			Self::I64(_) => Shape::I64,
			Self::U32(_) => Shape::U32,
			Self::U64(_) => Shape::U64,
			Self::Chars(_) => Shape::Chars,
			Self::Ints(_) => Shape::Ints,
		}
	}

	/// Zero or empty value of its shape (`false`, `0`, `""`, empty sequence).
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Text(v) => v.is_empty(),
			Self::Bool(v) => !v,
			Self::F32(v) => *v == 0.0,
			Self::F64(v) => *v == 0.0,
			Self::Int(v) => *v == 0,
			Self::I8(v) => *v == 0,
			Self::I32(v) => *v == 0,
			Self::I64(v) => *v == 0,
			Self::U32(v) => *v == 0,
			Self::U64(v) => *v == 0,
			Self::Chars(v) => v.is_empty(),
			Self::Ints(v) => v.is_empty(),
		}
	}
}

/// Storage for one scalar or sequence field.
pub trait Leaf {
	/// Copy of the current field value.
	fn value(&self) -> Value;
	/// Overwrite the field; hands the value back when its shape does not match.
	fn assign(&mut self, value: Value) -> Result<(), Value>;
}

macro_rules! leaf_impls {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl Leaf for $ty {
				fn value(&self) -> Value {
					Value::$variant(Clone::clone(self))
				}

				fn assign(&mut self, value: Value) -> Result<(), Value> {
					match value {
						Value::$variant(inner) => {
							*self = inner;
							Ok(())
						}
						other => Err(other),
					}
				}
			}

			impl FieldSlot for $ty {
				const SHAPE: Shape = Shape::$variant;

				fn field_ref(&self) -> FieldRef<'_> {
					FieldRef::Leaf(self)
				}

				fn field_mut(&mut self) -> FieldMut<'_> {
					FieldMut::Leaf(self)
				}
			}
		)*
	};
}

leaf_impls! {
	String => Text,
	bool => Bool,
	f32 => F32,
	f64 => F64,
	isize => Int,
	i8 => I8,
	i32 => I32,
	i64 => I64,
	u32 => U32,
	u64 => U64,
	Vec<char> => Chars,
	Vec<i32> => Ints,
}
