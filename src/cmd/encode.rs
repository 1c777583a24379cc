use tagtree::codec::{MarshalOptions, OmitEmpty, encode_to_string, encode_to_string_pretty};

use crate::cmd::Result;
use crate::cmd::records::Profile;

#[derive(clap::Args)]
pub struct Args {
	/// End each record's walk at its first nested record field.
	#[arg(long)]
	pub legacy: bool,
	/// Write `omitempty` fields unless they are empty.
	#[arg(long)]
	pub when_empty: bool,
	/// Indent the JSON output.
	#[arg(long)]
	pub pretty: bool,
}

/// Encode the sample profile and print it as JSON.
pub fn run(args: Args) -> Result<()> {
	let opt = options(&args);
	let profile = Profile::sample();
	let text = if args.pretty {
		encode_to_string_pretty(&profile, &opt)?
	} else {
		encode_to_string(&profile, &opt)?
	};
	println!("{text}");
	Ok(())
}

fn options(args: &Args) -> MarshalOptions {
	let mut opt = if args.legacy { MarshalOptions::legacy() } else { MarshalOptions::default() };
	if args.when_empty {
		opt.omit_empty = OmitEmpty::WhenEmpty;
	}
	opt
}
