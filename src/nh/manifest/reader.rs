// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: reader.rs
// Author: nichash maintainers

use std::fs;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};

use super::{ManifestFormat, TXT_HASH_SEPARATOR, TXT_TYPE_SEPARATOR};
use crate::nh::error::{NichashError, Result};
use crate::nh::file::HashResult;

/// Load a previously written manifest; the format follows the file
/// extension.
pub fn load_reference(path: impl AsRef<Path>) -> Result<Vec<HashResult>> {
	let path = path.as_ref();
	let format = ManifestFormat::from_path(path)?;
	let contents =
		fs::read(path).map_err(|source| NichashError::io(path, source))?;
	let entries = parse_reference(&contents, format, path)?;
	tracing::debug!(
		path = %path.display(),
		%format,
		entries = entries.len(),
		"loaded reference manifest"
	);
	Ok(entries)
}

/// Parse manifest bytes already in memory. `origin` only labels errors
/// and log events.
///
/// CSV rows and text lines that are not valid UTF-8 are skipped like any
/// other malformed entry; a JSON document must decode as a whole.
pub fn parse_reference(
	contents: &[u8],
	format: ManifestFormat,
	origin: &Path,
) -> Result<Vec<HashResult>> {
	match format {
		ManifestFormat::Json => parse_json(contents, origin),
		ManifestFormat::Csv => parse_csv(contents, origin),
		ManifestFormat::Txt => Ok(parse_txt(contents, origin)),
	}
}

fn parse_json(contents: &[u8], origin: &Path) -> Result<Vec<HashResult>> {
	serde_json::from_slice(contents)
		.map_err(|err| NichashError::parse(origin, err))
}

fn parse_csv(contents: &[u8], origin: &Path) -> Result<Vec<HashResult>> {
	let mut reader = ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.from_reader(contents);

	let mut rows = Vec::new();
	for record in reader.byte_records() {
		rows.push(record.map_err(|err| NichashError::parse(origin, err))?);
	}
	if rows.len() < 2 {
		return Err(NichashError::parse(origin, "no data"));
	}

	let mut results = Vec::with_capacity(rows.len() - 1);
	// The first row is a header whatever it contains.
	for (index, row) in rows.iter().enumerate().skip(1) {
		match csv_entry(row) {
			Some(result) => results.push(result),
			None => tracing::warn!(
				path = %origin.display(),
				row = index + 1,
				"skipping CSV row with fewer than 3 UTF-8 columns"
			),
		}
	}
	Ok(results)
}

fn csv_entry(row: &ByteRecord) -> Option<HashResult> {
	let field = |index: usize| {
		row.get(index)
			.and_then(|bytes| std::str::from_utf8(bytes).ok())
			.map(str::trim)
	};
	Some(HashResult::new(field(0)?, field(1)?, field(2)?))
}

fn parse_txt(contents: &[u8], origin: &Path) -> Vec<HashResult> {
	let mut results = Vec::new();
	for (index, raw) in contents.split(|&byte| byte == b'\n').enumerate() {
		let Ok(line) = std::str::from_utf8(raw) else {
			tracing::warn!(
				path = %origin.display(),
				line = index + 1,
				"skipping text manifest line that is not valid UTF-8"
			);
			continue;
		};
		let line = line.trim();
		if line.is_empty() {
			continue;
		}
		match parse_txt_line(line) {
			Some(result) => results.push(result),
			None => tracing::warn!(
				path = %origin.display(),
				line = index + 1,
				"skipping malformed text manifest line"
			),
		}
	}
	results
}

fn parse_txt_line(line: &str) -> Option<HashResult> {
	let (hash_type, rest) = line.split_once(TXT_TYPE_SEPARATOR)?;
	let (file_path, hash) = rest.split_once(TXT_HASH_SEPARATOR)?;
	Some(HashResult::new(
		file_path.trim(),
		hash_type.trim(),
		hash.trim(),
	))
}
