// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// Module: weak algorithm notices
// Author: nichash maintainers

//! Flags digest algorithms with known collision attacks so the CLI can
//! print a notice before hashing with them.

use colored::Colorize;

use crate::nh::digest::DigestAlgorithm;

const NIST_REFERENCE: &str = "https://doi.org/10.6028/NIST.SP.800-131Ar2";

#[derive(Debug, Clone)]
pub struct WeakAlgorithmMetadata {
	pub algorithm: DigestAlgorithm,
	pub display_name: &'static str,
	pub replacement_hint: &'static str,
}

const WEAK_ALGORITHMS: &[WeakAlgorithmMetadata] = &[
	WeakAlgorithmMetadata {
		algorithm: DigestAlgorithm::Md5,
		display_name: "MD5",
		replacement_hint: "Use SHA-256 or SHA3-256 for integrity checks",
	},
	WeakAlgorithmMetadata {
		algorithm: DigestAlgorithm::Sha1,
		display_name: "SHA-1",
		replacement_hint: "Use SHA-256 or SHA-512",
	},
];

pub fn metadata_for(
	algorithm: DigestAlgorithm,
) -> Option<&'static WeakAlgorithmMetadata> {
	WEAK_ALGORITHMS
		.iter()
		.find(|entry| entry.algorithm == algorithm)
}

/// One-line notice for weak algorithms, `None` otherwise.
pub fn warning_for(algorithm: DigestAlgorithm) -> Option<String> {
	let metadata = metadata_for(algorithm)?;
	Some(format!(
		"{} is a weak algorithm (collisions known). {}. See {}",
		metadata.display_name, metadata.replacement_hint, NIST_REFERENCE
	))
}

pub fn emit_warning(algorithm: DigestAlgorithm) {
	if let Some(message) = warning_for(algorithm) {
		eprintln!("{} {}", "warning:".yellow().bold(), message);
	}
}
