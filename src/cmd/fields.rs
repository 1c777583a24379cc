use std::collections::HashSet;

use serde::Serialize;
use tagtree::codec::tag::{parse_env_tag, parse_field_tag};
use tagtree::codec::{EnvOptions, EnvTag, FieldDescriptor, FieldTag, MarshalOptions, RecordSchema, Shape};

use crate::cmd::Result;
use crate::cmd::records::{Address, LatLng, PostalAddress, Profile, User};

const MAX_LISTING_DEPTH: u32 = 16;

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum RecordName {
	User,
	Address,
	LatLng,
	Profile,
	PostalAddress,
}

#[derive(clap::Args)]
pub struct Args {
	/// Demo record to describe.
	#[arg(value_enum)]
	pub record: RecordName,
	/// Print descriptors as JSON.
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct FieldRow {
	name: &'static str,
	shape: Shape,
	exported: bool,
	env: EnvTag,
	repr: FieldTag,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	fields: Vec<FieldRow>,
}

/// List a demo record's descriptors with their parsed annotations.
pub fn run(args: Args) -> Result<()> {
	let (type_name, schema) = match args.record {
		RecordName::User => ("User", User::schema()),
		RecordName::Address => ("Address", Address::schema()),
		RecordName::LatLng => ("LatLng", LatLng::schema()),
		RecordName::Profile => ("Profile", Profile::schema()),
		RecordName::PostalAddress => ("PostalAddress", PostalAddress::schema()),
	};

	let rows = describe(schema, &EnvOptions::default(), &MarshalOptions::default(), 0);
	if args.json {
		let text = serde_json::to_string_pretty(&rows).map_err(tagtree::codec::CodecError::Encode)?;
		println!("{text}");
		return Ok(());
	}

	println!("record: {type_name}");
	println!("field_count: {}", schema.len());
	print_rows(&rows, 1);
	Ok(())
}

fn describe(fields: &'static [FieldDescriptor], env: &EnvOptions, repr: &MarshalOptions, depth: u32) -> Vec<FieldRow> {
	describe_within(fields, env, repr, depth, &mut HashSet::new())
}

/// Rows for `fields`; a schema already open on the current path is listed
/// without its children, so recursive records stay finite.
fn describe_within(
	fields: &'static [FieldDescriptor],
	env: &EnvOptions,
	repr: &MarshalOptions,
	depth: u32,
	open: &mut HashSet<*const FieldDescriptor>,
) -> Vec<FieldRow> {
	open.insert(fields.as_ptr());
	let rows = fields
		.iter()
		.map(|field| {
			let nested = field.nested_fields();
			let expand = !field.shape.is_leaf() && depth + 1 < MAX_LISTING_DEPTH && !open.contains(&nested.as_ptr());
			FieldRow {
				name: field.name,
				shape: field.shape,
				exported: field.exported,
				env: parse_env_tag(field, env.tag, env.default_tag),
				repr: parse_field_tag(field, repr.tag, repr.name_fallback),
				fields: if expand { describe_within(nested, env, repr, depth + 1, open) } else { Vec::new() },
			}
		})
		.collect();
	open.remove(&fields.as_ptr());
	rows
}

fn print_rows(rows: &[FieldRow], indent: usize) {
	let pad = "  ".repeat(indent);
	for row in rows {
		let mut line = format!("{pad}{} {}", row.name, row.shape);
		if !row.exported {
			line.push_str(" unexported");
		}
		if !row.env.key.is_empty() {
			line.push_str(&format!(" env={}", row.env.key));
		}
		if row.env.required {
			line.push_str(" required");
		}
		if let Some(default) = &row.env.default {
			line.push_str(&format!(" default={default:?}"));
		}
		if row.repr.omit {
			line.push_str(" json=-");
		} else {
			line.push_str(&format!(" json={}", row.repr.key));
		}
		if row.repr.omit_empty {
			line.push_str(" omitempty");
		}
		println!("{line}");
		print_rows(&row.fields, indent + 1);
	}
}
