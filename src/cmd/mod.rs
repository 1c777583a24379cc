use std::path::PathBuf;

use tagtree::codec::CodecError;
use thiserror::Error;

/// Environment decode command.
pub mod env;
/// Sample record encode command.
pub mod encode;
/// JSON document decode command.
pub mod decode;
/// Descriptor listing command.
pub mod fields;
/// Demo record types.
pub mod records;

/// Command-level result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Codec failure.
	#[error(transparent)]
	Codec(#[from] CodecError),
	/// Input file could not be read.
	#[error("read {}: {source}", path.display())]
	Read {
		/// Input path, `-` for stdin.
		path: PathBuf,
		/// Underlying IO error.
		#[source]
		source: std::io::Error,
	},
}
