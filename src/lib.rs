//! Tag-driven decoding of nested records from the process environment, and
//! encoding/decoding of the same records through JSON key-value objects.

/// Record model, tag grammar, conversion registry, and the tree walkers.
pub mod codec;
