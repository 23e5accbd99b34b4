// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: lib.rs
// Author: nichash maintainers

pub mod nh {
	pub mod app;
	pub mod compare;
	pub mod digest;
	pub mod error;
	pub mod file;
	pub mod manifest;
	pub mod output;
	pub mod weak;
}

pub use nh::compare::{compare, ComparisonSummary};
pub use nh::digest::{resolve_algorithm, DigestAlgorithm};
pub use nh::error::{NichashError, Result};
pub use nh::file::walker::{hash_directory, DirectoryOutcome};
pub use nh::file::{hash_file, verify_file_hash, HashResult};
pub use nh::manifest::reader::load_reference;
pub use nh::manifest::writer::write_results;
pub use nh::manifest::ManifestFormat;
