use crate::codec::record::{assign_leaf, write_field};
use crate::codec::tag::parse_env_tag;
use crate::codec::{CodecError, ConversionRegistry, Environment, FieldDescriptor, FieldMut, Record, Result};

/// Annotation names and limits for environment decoding.
#[derive(Debug, Clone)]
pub struct EnvOptions {
	/// Annotation key holding the `KEY` or `KEY,required` binding.
	pub tag: &'static str,
	/// Annotation key holding the default literal.
	pub default_tag: &'static str,
	/// Maximum record nesting depth.
	pub max_depth: u32,
}

impl Default for EnvOptions {
	fn default() -> Self {
		Self {
			tag: "env",
			default_tag: "envDefault",
			max_depth: 64,
		}
	}
}

/// Populate `target` from a fresh snapshot of the process environment.
pub fn decode_env(target: &mut dyn Record) -> Result<()> {
	let env = Environment::capture();
	decode_env_with(target, &env, &ConversionRegistry::standard(), &EnvOptions::default())
}

/// Populate `target` from `env`, converting values through `registry`.
///
/// Fields are visited depth-first in declaration order. The first failure
/// aborts the walk; fields written before it keep their new values.
pub fn decode_env_with(target: &mut dyn Record, env: &Environment, registry: &ConversionRegistry, opt: &EnvOptions) -> Result<()> {
	let walker = EnvWalker { env, registry, opt };
	walker.walk(target, 0)
}

struct EnvWalker<'a> {
	env: &'a Environment,
	registry: &'a ConversionRegistry,
	opt: &'a EnvOptions,
}

impl EnvWalker<'_> {
	fn walk(&self, record: &mut dyn Record, depth: u32) -> Result<()> {
		let type_name = record.type_name();
		if depth >= self.opt.max_depth {
			return Err(CodecError::DepthExceeded {
				type_name,
				max_depth: self.opt.max_depth,
			});
		}
		tracing::debug!(record = type_name, depth, "env decode enter");

		for (index, field) in record.fields().iter().enumerate() {
			if !field.exported {
				tracing::trace!(record = type_name, field = field.name, "skip unexported field");
				continue;
			}

			match write_field(record, index)? {
				FieldMut::Pointer(slot) => match slot.get_mut() {
					Some(inner) => self.walk(inner, depth + 1)?,
					None => tracing::trace!(record = type_name, field = field.name, "skip null pointer"),
				},
				FieldMut::Record(inner) => self.walk(inner, depth + 1)?,
				FieldMut::Leaf(leaf) => {
					let Some(raw) = self.resolve(field)? else {
						tracing::trace!(record = type_name, field = field.name, "no value or default, left unchanged");
						continue;
					};
					let value = self.registry.convert(field.shape, &raw).map_err(|err| match err {
						CodecError::Conversion { raw, shape } => CodecError::FieldConversion {
							field: field.name,
							raw,
							shape,
						},
						other => other,
					})?;
					assign_leaf(type_name, field, leaf, value)?;
				}
			}
		}

		Ok(())
	}

	/// Raw string for a leaf: environment value, else default, else nothing.
	fn resolve(&self, field: &FieldDescriptor) -> Result<Option<String>> {
		let tag = parse_env_tag(field, self.opt.tag, self.opt.default_tag);

		if !tag.key.is_empty() {
			if let Some(value) = self.env.get(&tag.key) {
				tracing::trace!(field = field.name, key = %tag.key, "value from environment");
				return Ok(Some(value.to_owned()));
			}
			if tag.required {
				return Err(CodecError::MissingRequiredEnv {
					field: field.name,
					key: tag.key,
				});
			}
		}

		if tag.default.is_some() {
			tracing::trace!(field = field.name, "value from default");
		}
		Ok(tag.default)
	}
}

#[cfg(test)]
mod tests;
