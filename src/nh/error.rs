// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: error.rs
// Author: nichash maintainers

//! Error kinds shared by hashing, walking, manifest IO and verification.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NichashError>;

#[derive(Debug, Error)]
pub enum NichashError {
	/// Flag combination or value the CLI cannot act on.
	#[error("{0}")]
	Usage(String),

	#[error("unsupported hash type: {0}")]
	UnsupportedAlgorithm(String),

	#[error("failed to open file {}: {source}", .path.display())]
	FileOpen {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to read file {}: {source}", .path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("cannot access directory {}: {reason}", .path.display())]
	DirectoryAccess { path: PathBuf, reason: String },

	#[error("unsupported format: {0}")]
	UnsupportedFormat(String),

	#[error("failed to parse {}: {reason}", .path.display())]
	Parse { path: PathBuf, reason: String },

	#[error("I/O error on {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("no files were successfully processed in {}", .root.display())]
	NoFilesProcessed { root: PathBuf },

	#[error("hash does not match. Expected: {expected}, Result: {actual}")]
	HashMismatch {
		path: PathBuf,
		expected: String,
		actual: String,
	},
}

impl NichashError {
	pub(crate) fn parse(
		path: impl Into<PathBuf>,
		reason: impl ToString,
	) -> Self {
		Self::Parse {
			path: path.into(),
			reason: reason.to_string(),
		}
	}

	pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}

	/// Whether this error stops the CLI before any work is attempted,
	/// which the binary reports with the usage exit code.
	pub fn is_validation(&self) -> bool {
		matches!(
			self,
			Self::Usage(_)
				| Self::UnsupportedAlgorithm(_)
				| Self::UnsupportedFormat(_)
		)
	}
}
