// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: mod.rs
// Author: nichash maintainers

//! Manifest formats shared by the result writer and the reference
//! loader. The format is resolved once from a name or file extension;
//! everything past that boundary works on [`ManifestFormat`].

pub mod reader;
pub mod writer;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use strum::{EnumIter, IntoEnumIterator};

use crate::nh::error::NichashError;

/// Separator between the hash type and the path in the text format.
pub const TXT_TYPE_SEPARATOR: &str = " hash of file ";
/// Separator between the path and the digest in the text format.
pub const TXT_HASH_SEPARATOR: &str = ": ";
/// Header row written to CSV manifests.
pub const CSV_HEADER: [&str; 3] = ["File Path", "Hash Type", "Hash"];

#[derive(Copy, Clone, Debug, Eq, PartialEq, EnumIter)]
pub enum ManifestFormat {
	Json,
	Csv,
	Txt,
}

impl ManifestFormat {
	pub fn extension(self) -> &'static str {
		match self {
			Self::Json => "json",
			Self::Csv => "csv",
			Self::Txt => "txt",
		}
	}

	/// Resolve the format from a file extension, ignoring case.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NichashError> {
		let extension = path
			.as_ref()
			.extension()
			.and_then(|ext| ext.to_str())
			.unwrap_or_default();
		extension.parse().map_err(|_| {
			let shown = if extension.is_empty() {
				String::from("(none)")
			} else {
				format!(".{extension}")
			};
			NichashError::UnsupportedFormat(shown)
		})
	}

	pub fn supported() -> String {
		Self::iter()
			.map(|format| format!(".{}", format.extension()))
			.collect::<Vec<_>>()
			.join(", ")
	}
}

impl FromStr for ManifestFormat {
	type Err = NichashError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let normalized = value.trim().trim_start_matches('.');
		Self::iter()
			.find(|format| {
				format.extension().eq_ignore_ascii_case(normalized)
			})
			.ok_or_else(|| NichashError::UnsupportedFormat(value.to_string()))
	}
}

impl fmt::Display for ManifestFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Self::Json => "JSON",
			Self::Csv => "CSV",
			Self::Txt => "Text",
		};
		write!(f, "{}", label)
	}
}
