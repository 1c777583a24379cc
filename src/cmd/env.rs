use tagtree::codec::{MarshalOptions, decode_env, encode_to_string, encode_to_string_pretty};

use crate::cmd::Result;
use crate::cmd::records::User;

#[derive(clap::Args)]
pub struct Args {
	/// Indent the JSON output.
	#[arg(long)]
	pub pretty: bool,
}

/// Decode a `User` from the process environment and print it as JSON.
pub fn run(args: Args) -> Result<()> {
	let mut user = User::default();
	decode_env(&mut user)?;

	let opt = MarshalOptions::default();
	let text = if args.pretty {
		encode_to_string_pretty(&user, &opt)?
	} else {
		encode_to_string(&user, &opt)?
	};
	println!("{text}");
	Ok(())
}
