use thiserror::Error;

use crate::codec::Shape;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors produced while decoding records from the environment or encoding
/// and decoding them through key-value objects.
#[derive(Debug, Error)]
pub enum CodecError {
	/// Record accessors disagree with the record's descriptor table.
	#[error("invalid target {type_name}: {reason}")]
	InvalidTarget {
		/// Record type name.
		type_name: &'static str,
		/// What was wrong with the target.
		reason: String,
	},
	/// Required environment variable was absent from the snapshot.
	#[error("{field} requires environment variable {key} to be set")]
	MissingRequiredEnv {
		/// Declared field name.
		field: &'static str,
		/// Environment key bound by the field's tag.
		key: String,
	},
	/// No conversion entry exists for the shape.
	#[error("unsupported shape {shape}")]
	UnsupportedShape {
		/// Shape without a registry entry.
		shape: Shape,
	},
	/// Raw string is not a valid lexical form for the shape.
	#[error("cannot convert {raw:?} to {shape}")]
	Conversion {
		/// Target shape.
		shape: Shape,
		/// Offending raw string.
		raw: String,
	},
	/// Conversion failed while decoding a specific field.
	#[error("field {field}: cannot convert {raw:?} to {shape}")]
	FieldConversion {
		/// Declared field name.
		field: &'static str,
		/// Offending raw string.
		raw: String,
		/// Field shape.
		shape: Shape,
	},
	/// Key-value entry does not fit the destination field.
	#[error("structural decode at {path}: expected {expected}, got {got}")]
	StructuralDecode {
		/// Dotted key path of the entry.
		path: String,
		/// Expected value kind for the field.
		expected: Shape,
		/// Kind of the value that was found.
		got: &'static str,
	},
	/// Serializing a key-value object failed.
	#[error("encode: {0}")]
	Encode(#[source] serde_json::Error),
	/// Input text was not valid JSON.
	#[error("json: {0}")]
	Json(#[source] serde_json::Error),
	/// Record nesting exceeded the configured limit.
	#[error("nesting depth exceeded at {type_name} (max={max_depth})")]
	DepthExceeded {
		/// Record type at which the limit was reached.
		type_name: &'static str,
		/// Configured depth ceiling.
		max_depth: u32,
	},
}
