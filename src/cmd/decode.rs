use std::io::Read;
use std::path::{Path, PathBuf};

use tagtree::codec::{MarshalOptions, decode_str};

use crate::cmd::records::Profile;
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	/// JSON document path, `-` for stdin.
	pub path: PathBuf,
	/// Bind empty key segments literally instead of falling back to field names.
	#[arg(long)]
	pub legacy: bool,
}

/// Decode a JSON document into a `Profile` and print its debug form.
pub fn run(args: Args) -> Result<()> {
	let Args { path, legacy } = args;
	let text = read_input(&path)?;

	let opt = if legacy { MarshalOptions::legacy() } else { MarshalOptions::default() };
	let mut profile = Profile::default();
	decode_str(&text, &mut profile, &opt)?;

	println!("{profile:#?}");
	Ok(())
}

fn read_input(path: &Path) -> Result<String> {
	let result = if path.as_os_str() == "-" {
		let mut text = String::new();
		std::io::stdin().read_to_string(&mut text).map(|_| text)
	} else {
		std::fs::read_to_string(path)
	};
	result.map_err(|source| CliError::Read {
		path: path.to_owned(),
		source,
	})
}
