// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: mod.rs
// Author: nichash maintainers

pub mod walker;

use std::fmt;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::nh::digest::{parse_algorithm, DigestAlgorithm};
use crate::nh::error::{NichashError, Result};

pub use walker::{
	hash_directory, DirectoryOutcome, ThreadStrategy, WalkFailure,
	WalkItem, Walker,
};

/// Digest of one file, as written to and read back from manifests.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HashResult {
	pub file_path: String,
	pub hash_type: String,
	pub hash: String,
}

impl HashResult {
	pub fn new(
		file_path: impl Into<String>,
		hash_type: impl Into<String>,
		hash: impl Into<String>,
	) -> Self {
		Self {
			file_path: file_path.into(),
			hash_type: hash_type.into(),
			hash: hash.into(),
		}
	}

	/// Case-insensitive digest comparison. Whitespace is significant.
	pub fn hash_matches(&self, other: &str) -> bool {
		self.hash.eq_ignore_ascii_case(other)
	}
}

impl fmt::Display for HashResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} hash of file {}: {}",
			self.hash_type, self.file_path, self.hash
		)
	}
}

/// Hash the full contents of `path`. The path is recorded exactly as
/// given, without normalization.
pub fn hash_file(
	path: impl AsRef<Path>,
	algorithm: &str,
) -> Result<HashResult> {
	let path = path.as_ref();
	let file = open(path)?;
	let algorithm = parse_algorithm(algorithm)?;
	digest_open_file(path, file, algorithm)
}

/// Same as [`hash_file`] for an algorithm that is already resolved.
pub fn hash_path(
	path: &Path,
	algorithm: DigestAlgorithm,
) -> Result<HashResult> {
	let file = open(path)?;
	digest_open_file(path, file, algorithm)
}

fn open(path: &Path) -> Result<File> {
	File::open(path).map_err(|source| NichashError::FileOpen {
		path: path.to_path_buf(),
		source,
	})
}

fn digest_open_file(
	path: &Path,
	mut file: File,
	algorithm: DigestAlgorithm,
) -> Result<HashResult> {
	let mut stream = algorithm.stream();
	let bytes = stream.consume(&mut file).map_err(|source| {
		NichashError::Read {
			path: path.to_path_buf(),
			source,
		}
	})?;
	let hash = stream.finalize_hex();
	tracing::debug!(
		path = %path.display(),
		algorithm = algorithm.id(),
		bytes,
		"hashed file"
	);
	Ok(HashResult::new(
		path.to_string_lossy(),
		algorithm.label(),
		hash,
	))
}

/// Hash `path` and compare against `expected`, ignoring case.
pub fn verify_file_hash(
	path: impl AsRef<Path>,
	algorithm: &str,
	expected: &str,
) -> Result<HashResult> {
	let path = path.as_ref();
	let result = hash_file(path, algorithm)?;
	if result.hash_matches(expected) {
		Ok(result)
	} else {
		Err(NichashError::HashMismatch {
			path: path.to_path_buf(),
			expected: expected.to_string(),
			actual: result.hash,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	const HELLO_SHA256: &str =
		"b94d27b9934d3e08a52e52d7da7dacefe69c7d46d54d4d3f79d42d3a4b6bda2c";

	#[test]
	fn hashes_known_vector() {
		let tmp = tempdir().unwrap();
		let path = tmp.path().join("test.txt");
		std::fs::write(&path, "hello world").unwrap();

		let result = hash_file(&path, "sha256").unwrap();
		assert_eq!(result.hash, HELLO_SHA256);
		assert_eq!(result.hash_type, "SHA256");
		assert_eq!(result.file_path, path.to_string_lossy());
	}

	#[test]
	fn hashing_is_deterministic() {
		let tmp = tempdir().unwrap();
		let path = tmp.path().join("data.bin");
		std::fs::write(&path, b"some bytes").unwrap();

		let first = hash_file(&path, "SHA3-256").unwrap();
		let second = hash_file(&path, "sha3-256").unwrap();
		assert_eq!(first, second);
		assert_eq!(first.hash_type, "SHA3-256");
	}

	#[test]
	fn missing_file_is_open_error() {
		let tmp = tempdir().unwrap();
		let err =
			hash_file(tmp.path().join("absent"), "sha256").unwrap_err();
		assert!(matches!(err, NichashError::FileOpen { .. }));
	}

	#[test]
	fn unknown_algorithm_propagates() {
		let tmp = tempdir().unwrap();
		let path = tmp.path().join("a.txt");
		std::fs::write(&path, "a").unwrap();
		let err = hash_file(&path, "whirlpool").unwrap_err();
		assert!(matches!(err, NichashError::UnsupportedAlgorithm(_)));
	}

	#[test]
	fn verify_accepts_uppercase_and_rejects_wrong() {
		let tmp = tempdir().unwrap();
		let path = tmp.path().join("verify.txt");
		std::fs::write(&path, "hello world").unwrap();

		let ok = verify_file_hash(
			&path,
			"sha256",
			&HELLO_SHA256.to_uppercase(),
		)
		.unwrap();
		assert_eq!(ok.hash, HELLO_SHA256);

		let padded = format!(" {HELLO_SHA256} ");
		assert!(matches!(
			verify_file_hash(&path, "sha256", &padded),
			Err(NichashError::HashMismatch { .. })
		));

		let err = verify_file_hash(&path, "sha256", "1234567890abcdef")
			.unwrap_err();
		match err {
			NichashError::HashMismatch { expected, actual, .. } => {
				assert_eq!(expected, "1234567890abcdef");
				assert_eq!(actual, HELLO_SHA256);
			}
			other => panic!("unexpected error {other:?}"),
		}
	}

	#[test]
	fn display_uses_text_line_format() {
		let result = HashResult::new("/tmp/a", "MD5", "abc");
		assert_eq!(result.to_string(), "MD5 hash of file /tmp/a: abc");
	}
}
