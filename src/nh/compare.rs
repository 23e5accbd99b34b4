// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: compare.rs
// Author: nichash maintainers

//! Reconcile freshly computed results against a reference manifest.

use std::collections::HashMap;
use std::fmt;

use crate::nh::file::HashResult;

/// Classification counts plus the offending paths, in the order of the
/// actual results.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ComparisonSummary {
	pub matched: usize,
	pub mismatched: usize,
	pub not_found: usize,
	pub mismatched_paths: Vec<String>,
	pub not_found_paths: Vec<String>,
}

impl ComparisonSummary {
	pub fn is_clean(&self) -> bool {
		self.mismatched == 0 && self.not_found == 0
	}
}

impl fmt::Display for ComparisonSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Matched: {}, Mismatched: {}, Not found: {}",
			self.matched, self.mismatched, self.not_found
		)
	}
}

/// Classify each actual result as matched, mismatched or not found.
///
/// Reference entries are keyed by trimmed path and a later duplicate
/// replaces an earlier one. Hash types are not compared; a disagreement
/// counts as a mismatch and is logged.
pub fn compare(
	actual: &[HashResult],
	reference: &[HashResult],
) -> ComparisonSummary {
	let lookup: HashMap<&str, &HashResult> = reference
		.iter()
		.map(|entry| (entry.file_path.trim(), entry))
		.collect();

	let mut summary = ComparisonSummary::default();
	for result in actual {
		let key = result.file_path.trim();
		let Some(expected) = lookup.get(key) else {
			summary.not_found += 1;
			summary.not_found_paths.push(result.file_path.clone());
			continue;
		};
		if result.hash_matches(&expected.hash) {
			summary.matched += 1;
			continue;
		}
		if !result.hash_type.eq_ignore_ascii_case(expected.hash_type.trim())
		{
			tracing::warn!(
				path = key,
				actual = %result.hash_type,
				reference = %expected.hash_type,
				"hash types differ; reporting as mismatch"
			);
		}
		summary.mismatched += 1;
		summary.mismatched_paths.push(result.file_path.clone());
	}
	summary
}
