use serde::Serialize;

use crate::codec::tag;
use crate::codec::value::{Leaf, Shape, Value};
use crate::codec::{CodecError, Result};

/// Definition-time metadata for one record field.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldDescriptor {
	/// Declared field name.
	pub name: &'static str,
	/// Declared value shape.
	pub shape: Shape,
	/// Whether walkers may read and write the field.
	pub exported: bool,
	/// Raw annotation string in `key:"value" key:"value"` form.
	pub tag: &'static str,
	/// Descriptors of the nested record type, for record and pointer fields.
	#[serde(skip)]
	pub nested: Option<fn() -> &'static [FieldDescriptor]>,
}

impl FieldDescriptor {
	/// Look up one annotation concern by key.
	pub fn lookup(&self, key: &str) -> Option<String> {
		tag::lookup(self.tag, key)
	}

	/// Descriptors of the nested record type, empty for leaves.
	pub fn nested_fields(&self) -> &'static [FieldDescriptor] {
		self.nested.map(|schema| schema()).unwrap_or(&[])
	}
}

/// A structured value exposing its ordered fields to the walkers.
///
/// Implement it with the [`record!`](crate::record) macro; hand-written
/// implementations must keep `field`/`field_mut` indices aligned with
/// `fields`.
pub trait Record {
	/// Declared type name.
	fn type_name(&self) -> &'static str;
	/// Field descriptors in declaration order.
	fn fields(&self) -> &'static [FieldDescriptor];
	/// Read access to the field at `index`.
	fn field(&self, index: usize) -> Option<FieldRef<'_>>;
	/// Write access to the field at `index`.
	fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

/// Borrowed view of one field.
pub enum FieldRef<'a> {
	/// Scalar or sequence storage.
	Leaf(&'a dyn Leaf),
	/// Embedded record.
	Record(&'a dyn Record),
	/// Pointer to a record, `None` when null.
	Pointer(Option<&'a dyn Record>),
}

/// Mutable view of one field.
pub enum FieldMut<'a> {
	/// Scalar or sequence storage.
	Leaf(&'a mut dyn Leaf),
	/// Embedded record.
	Record(&'a mut dyn Record),
	/// Pointer slot that may be null.
	Pointer(&'a mut dyn PointerSlot),
}

/// Owned, nullable pointer to a record.
pub trait PointerSlot {
	/// Pointee, if the pointer is non-null.
	fn get_mut(&mut self) -> Option<&mut dyn Record>;
	/// Pointee, allocating a default record when null.
	fn get_or_insert(&mut self) -> &mut dyn Record;
	/// Reset the pointer to null.
	fn clear(&mut self);
}

/// Field storage types usable inside [`record!`](crate::record) declarations.
pub trait FieldSlot {
	/// Shape recorded in the field's descriptor.
	const SHAPE: Shape;
	/// Schema of the nested record type, `None` for leaves.
	const NESTED: Option<fn() -> &'static [FieldDescriptor]> = None;
	/// Borrow as a walker view.
	fn field_ref(&self) -> FieldRef<'_>;
	/// Mutably borrow as a walker view.
	fn field_mut(&mut self) -> FieldMut<'_>;
}

/// Type-level access to a record's descriptors, without an instance.
pub trait RecordSchema {
	/// Field descriptors in declaration order.
	fn schema() -> &'static [FieldDescriptor];
}

impl<R: Record + Default> PointerSlot for Option<Box<R>> {
	fn get_mut(&mut self) -> Option<&mut dyn Record> {
		match self {
			Some(inner) => Some(&mut **inner),
			None => None,
		}
	}

	fn get_or_insert(&mut self) -> &mut dyn Record {
		&mut **self.get_or_insert_with(Box::default)
	}

	fn clear(&mut self) {
		*self = None;
	}
}

impl<R: Record + RecordSchema + Default> FieldSlot for Option<Box<R>> {
	const SHAPE: Shape = Shape::Pointer;
	const NESTED: Option<fn() -> &'static [FieldDescriptor]> = Some(R::schema);

	fn field_ref(&self) -> FieldRef<'_> {
		match self {
			Some(inner) => FieldRef::Pointer(Some(&**inner)),
			None => FieldRef::Pointer(None),
		}
	}

	fn field_mut(&mut self) -> FieldMut<'_> {
		FieldMut::Pointer(self)
	}
}

pub(crate) fn read_field(record: &dyn Record, index: usize) -> Result<FieldRef<'_>> {
	record.field(index).ok_or_else(|| CodecError::InvalidTarget {
		type_name: record.type_name(),
		reason: format!("no accessor for field index {index}"),
	})
}

pub(crate) fn write_field(record: &mut dyn Record, index: usize) -> Result<FieldMut<'_>> {
	let type_name = record.type_name();
	record.field_mut(index).ok_or_else(|| CodecError::InvalidTarget {
		type_name,
		reason: format!("no accessor for field index {index}"),
	})
}

pub(crate) fn assign_leaf(type_name: &'static str, field: &FieldDescriptor, leaf: &mut dyn Leaf, value: Value) -> Result<()> {
	leaf.assign(value).map_err(|rejected| CodecError::InvalidTarget {
		type_name,
		reason: format!("field {} declared as {} does not store {}", field.name, field.shape, rejected.shape()),
	})
}

/// Declare a struct and implement [`Record`] for it.
///
/// Each field may carry an annotation string after `=>`, written as
/// space-separated `key:"value"` pairs. Fields declared without a visibility
/// qualifier are not exported and every walker skips them.
///
/// ```
/// tagtree::record! {
/// 	#[derive(Debug, Default)]
/// 	pub struct LatLng {
/// 		pub lat: f64 => r#"env:"USER_ADDRESS_LAT" envDefault:"40.0000" json:"lat""#,
/// 		pub lng: f64 => r#"env:"USER_ADDRESS_LNG" envDefault:"-115.1111" json:"lng""#,
/// 	}
/// }
/// ```
#[macro_export]
macro_rules! record {
	(@tag) => {
		""
	};
	(@tag $tag:literal) => {
		$tag
	};
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[$fmeta:meta])*
				$fvis:vis $field:ident : $ty:ty $(=> $tag:literal)?
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis struct $name {
			$(
				$(#[$fmeta])*
				$fvis $field: $ty,
			)*
		}

		impl $crate::codec::RecordSchema for $name {
			fn schema() -> &'static [$crate::codec::FieldDescriptor] {
				const FIELDS: &[$crate::codec::FieldDescriptor] = &[
					$(
						$crate::codec::FieldDescriptor {
							name: stringify!($field),
							shape: <$ty as $crate::codec::FieldSlot>::SHAPE,
							exported: !stringify!($fvis).is_empty(),
							tag: $crate::record!(@tag $($tag)?),
							nested: <$ty as $crate::codec::FieldSlot>::NESTED,
						},
					)*
				];
				FIELDS
			}
		}

		impl $crate::codec::Record for $name {
			fn type_name(&self) -> &'static str {
				stringify!($name)
			}

			fn fields(&self) -> &'static [$crate::codec::FieldDescriptor] {
				<$name as $crate::codec::RecordSchema>::schema()
			}

			#[allow(unused_assignments, unused_mut, unused_variables)]
			fn field(&self, index: usize) -> Option<$crate::codec::FieldRef<'_>> {
				let mut at = 0_usize;
				$(
					if index == at {
						return Some($crate::codec::FieldSlot::field_ref(&self.$field));
					}
					at += 1;
				)*
				None
			}

			#[allow(unused_assignments, unused_mut, unused_variables)]
			fn field_mut(&mut self, index: usize) -> Option<$crate::codec::FieldMut<'_>> {
				let mut at = 0_usize;
				$(
					if index == at {
						return Some($crate::codec::FieldSlot::field_mut(&mut self.$field));
					}
					at += 1;
				)*
				None
			}
		}

		impl $crate::codec::FieldSlot for $name {
			const SHAPE: $crate::codec::Shape = $crate::codec::Shape::Record;
			const NESTED: Option<fn() -> &'static [$crate::codec::FieldDescriptor]> =
				Some(<$name as $crate::codec::RecordSchema>::schema);

			fn field_ref(&self) -> $crate::codec::FieldRef<'_> {
				$crate::codec::FieldRef::Record(self)
			}

			fn field_mut(&mut self) -> $crate::codec::FieldMut<'_> {
				$crate::codec::FieldMut::Record(self)
			}
		}
	};
}
