// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: src/nh/digest/mod.rs
// Author: nichash maintainers
//
// Digest engine: algorithm registry and streaming digest state. The
// CLI handlers built on top of it live in `commands`.

pub mod commands;

use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

use digest::{Digest, DynDigest};
use strum::{EnumIter, EnumString, IntoEnumIterator};

use crate::nh::error::{NichashError, Result};

/// Size of the read buffer used when streaming input into a digest.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Algorithms accepted by `--hash`. Parsing ignores ASCII case.
#[derive(
	Copy, Clone, Debug, Default, Eq, PartialEq, Hash, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum DigestAlgorithm {
	#[default]
	#[strum(serialize = "sha256")]
	Sha256,
	#[strum(serialize = "sha512")]
	Sha512,
	#[strum(serialize = "sha1")]
	Sha1,
	#[strum(serialize = "md5")]
	Md5,
	#[strum(serialize = "sha3-256")]
	Sha3_256,
}

impl DigestAlgorithm {
	/// Lowercase identifier as typed on the command line.
	pub fn id(self) -> &'static str {
		match self {
			Self::Sha256 => "sha256",
			Self::Sha512 => "sha512",
			Self::Sha1 => "sha1",
			Self::Md5 => "md5",
			Self::Sha3_256 => "sha3-256",
		}
	}

	/// Uppercase name stored in `HashResult::hash_type`.
	pub fn label(self) -> &'static str {
		match self {
			Self::Sha256 => "SHA256",
			Self::Sha512 => "SHA512",
			Self::Sha1 => "SHA1",
			Self::Md5 => "MD5",
			Self::Sha3_256 => "SHA3-256",
		}
	}

	/// Length of the lowercase hex digest.
	pub fn hex_len(self) -> usize {
		match self {
			Self::Md5 => 32,
			Self::Sha1 => 40,
			Self::Sha256 | Self::Sha3_256 => 64,
			Self::Sha512 => 128,
		}
	}

	pub fn ids() -> Vec<&'static str> {
		Self::iter().map(Self::id).collect()
	}

	pub fn stream(self) -> DigestStream {
		let inner: Box<dyn DynDigest> = match self {
			Self::Sha256 => Box::new(sha2::Sha256::new()),
			Self::Sha512 => Box::new(sha2::Sha512::new()),
			Self::Sha1 => Box::new(sha1::Sha1::new()),
			Self::Md5 => Box::new(md5::Md5::new()),
			Self::Sha3_256 => Box::new(sha3::Sha3_256::new()),
		};
		DigestStream {
			algorithm: self,
			inner,
		}
	}
}

impl fmt::Display for DigestAlgorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.id())
	}
}

/// Resolve an algorithm name to a fresh digest stream.
pub fn resolve_algorithm(name: &str) -> Result<DigestStream> {
	parse_algorithm(name).map(DigestAlgorithm::stream)
}

pub fn parse_algorithm(name: &str) -> Result<DigestAlgorithm> {
	DigestAlgorithm::from_str(name).map_err(|_| {
		NichashError::UnsupportedAlgorithm(name.to_string())
	})
}

/// Single-pass digest state fed with sequential byte chunks.
pub struct DigestStream {
	algorithm: DigestAlgorithm,
	inner: Box<dyn DynDigest>,
}

impl DigestStream {
	pub fn update(&mut self, chunk: &[u8]) {
		self.inner.update(chunk);
	}

	/// Drain `reader` into the digest in `CHUNK_SIZE` pieces and return
	/// the number of bytes consumed.
	pub fn consume<R: Read>(&mut self, reader: &mut R) -> io::Result<u64> {
		let mut buffer = vec![0u8; CHUNK_SIZE];
		let mut total = 0u64;
		loop {
			let count = match reader.read(&mut buffer) {
				Ok(0) => break,
				Ok(count) => count,
				Err(err) if err.kind() == io::ErrorKind::Interrupted => {
					continue
				}
				Err(err) => return Err(err),
			};
			self.inner.update(&buffer[..count]);
			total += count as u64;
		}
		Ok(total)
	}

	pub fn finalize(self) -> Vec<u8> {
		self.inner.finalize().to_vec()
	}

	pub fn finalize_hex(self) -> String {
		hex::encode(self.finalize())
	}
}

impl fmt::Debug for DigestStream {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DigestStream")
			.field("algorithm", &self.algorithm)
			.finish_non_exhaustive()
	}
}
