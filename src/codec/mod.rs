mod convert;
mod decode;
mod env;
mod error;
mod marshal;
mod record;
pub mod structural;
pub mod tag;
mod unmarshal;
mod value;

/// Shape-keyed parse function table.
pub use convert::{ConversionRegistry, ParseFn};
/// Environment-driven decoding entry points and options.
pub use decode::{EnvOptions, decode_env, decode_env_with};
/// Environment snapshot.
pub use env::Environment;
/// Error and result aliases.
pub use error::{CodecError, Result};
/// Key-value encoding entry points and options.
pub use marshal::{KeyValueObject, MarshalOptions, OmitEmpty, encode, encode_to_string, encode_to_string_pretty};
/// Record model implemented by every walkable struct.
pub use record::{FieldDescriptor, FieldMut, FieldRef, FieldSlot, PointerSlot, Record, RecordSchema};
/// Structural decoder binding rules.
pub use structural::Binding;
/// Parsed annotation types.
pub use tag::{EnvTag, FieldTag};
/// Key-value decoding entry points.
pub use unmarshal::{decode, decode_str, expand_char_sequences};
/// Leaf shapes and typed values.
pub use value::{Leaf, Shape, Value};
