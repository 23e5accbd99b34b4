// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: writer.rs
// Author: nichash maintainers

use std::fs;
use std::path::Path;

use super::ManifestFormat;
use crate::nh::error::{NichashError, Result};
use crate::nh::file::HashResult;
use crate::nh::output::serialize_results;

/// Write `results` to `path` in `format`, returning serializer warnings.
///
/// The document is rendered before the destination is touched, so a
/// serialization failure leaves an existing file intact.
pub fn write_results(
	results: &[HashResult],
	path: impl AsRef<Path>,
	format: ManifestFormat,
) -> Result<Vec<String>> {
	let path = path.as_ref();
	let serialized = serialize_results(results, format)?;
	let warnings = serialized.warnings.clone();
	fs::write(path, serialized.into_document())
		.map_err(|source| NichashError::io(path, source))?;
	tracing::debug!(
		path = %path.display(),
		%format,
		entries = results.len(),
		"wrote results"
	);
	Ok(warnings)
}
