// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// Module: output
// Purpose: Render hash results into the manifest formats.

use csv::WriterBuilder;

use crate::nh::error::{NichashError, Result};
use crate::nh::file::HashResult;
use crate::nh::manifest::{
	ManifestFormat, CSV_HEADER, TXT_HASH_SEPARATOR, TXT_TYPE_SEPARATOR,
};

/// Rendered output plus any notes about entries that will not read
/// back cleanly.
#[derive(Debug, Default)]
pub struct SerializationResult {
	pub lines: Vec<String>,
	pub warnings: Vec<String>,
}

impl SerializationResult {
	fn new() -> Self {
		Self::default()
	}

	/// Newline-terminated document, ready to be written out.
	pub fn into_document(self) -> String {
		let mut document = self.lines.join("\n");
		if !document.is_empty() {
			document.push('\n');
		}
		document
	}
}

/// Serialize `results` in order according to `format`.
pub fn serialize_results(
	results: &[HashResult],
	format: ManifestFormat,
) -> Result<SerializationResult> {
	let mut output = SerializationResult::new();
	match format {
		ManifestFormat::Json => serialize_json(results, &mut output)?,
		ManifestFormat::Csv => serialize_csv(results, &mut output)?,
		ManifestFormat::Txt => serialize_txt(results, &mut output),
	}
	Ok(output)
}

/// The single-line text form, also used for console output.
pub fn render_line(result: &HashResult) -> String {
	format!(
		"{}{}{}{}{}",
		result.hash_type,
		TXT_TYPE_SEPARATOR,
		result.file_path,
		TXT_HASH_SEPARATOR,
		result.hash
	)
}

fn serialize_json(
	results: &[HashResult],
	output: &mut SerializationResult,
) -> Result<()> {
	let serialized = serde_json::to_string_pretty(results)
		.map_err(|err| NichashError::parse("<json output>", err))?;
	output.lines.push(serialized);
	Ok(())
}

fn serialize_csv(
	results: &[HashResult],
	output: &mut SerializationResult,
) -> Result<()> {
	let csv_error =
		|err: csv::Error| NichashError::parse("<csv output>", err);
	let mut buffer = Vec::new();
	{
		let mut writer = WriterBuilder::new()
			.flexible(false)
			.has_headers(false)
			.from_writer(&mut buffer);

		writer.write_record(CSV_HEADER).map_err(csv_error)?;
		for result in results {
			writer
				.write_record([
					result.file_path.as_str(),
					result.hash_type.as_str(),
					result.hash.as_str(),
				])
				.map_err(csv_error)?;
		}
		writer
			.flush()
			.map_err(|err| NichashError::io("<csv output>", err))?;
	}

	let csv_output = String::from_utf8(buffer)
		.map_err(|err| NichashError::parse("<csv output>", err))?;
	output
		.lines
		.push(csv_output.trim_end_matches('\n').to_string());
	Ok(())
}

fn serialize_txt(results: &[HashResult], output: &mut SerializationResult) {
	for result in results {
		if !round_trips_as_text(&result.file_path) {
			output.warnings.push(format!(
				"path `{}` will not read back from the text format",
				result.file_path
			));
		}
		output.lines.push(render_line(result));
	}
}

fn round_trips_as_text(path: &str) -> bool {
	!path.contains(TXT_TYPE_SEPARATOR)
		&& !path.contains(TXT_HASH_SEPARATOR)
		&& !path.contains('\n')
		&& path.trim() == path
}
