// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// Digest command handlers (file/directory/verify/reference)

use std::fmt;
use std::path::Path;

use colored::Colorize;

use crate::nh::app::{
	RunConfig, EXIT_FAILURE, EXIT_SUCCESS, USAGE_HINT,
};
use crate::nh::compare::{compare, ComparisonSummary};
use crate::nh::digest::DigestAlgorithm;
use crate::nh::error::Result;
use crate::nh::file::{hash_path, verify_file_hash, HashResult, Walker};
use crate::nh::manifest::reader::load_reference;
use crate::nh::manifest::writer::write_results;
use crate::nh::output::render_line;

pub fn report_error(err: impl fmt::Display) {
	eprintln!("{} {}", "error:".red().bold(), err);
}

fn report_warning(message: impl fmt::Display) {
	eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Hash one file and compare it against a literal digest.
pub fn verify_file(
	path: &Path,
	algorithm: DigestAlgorithm,
	expected: &str,
) -> i32 {
	let outcome = verify_file_hash(path, algorithm.id(), expected);
	match outcome {
		Ok(_) => {
			println!("File {}: hash matches!", path.display());
			EXIT_SUCCESS
		}
		Err(err) => {
			report_error(err);
			EXIT_FAILURE
		}
	}
}

/// Hash `--file` and/or `--dir`, then reconcile, save or print.
pub fn hash_targets(config: &RunConfig) -> i32 {
	let mut results = Vec::new();
	let mut had_error = false;

	if let Some(file) = &config.file {
		match hash_path(file, config.algorithm) {
			Ok(result) => results.push(result),
			Err(err) => {
				report_error(err);
				had_error = true;
			}
		}
	}

	if let Some(dir) = &config.dir {
		match hash_tree(dir, config) {
			Ok(mut found) => {
				if found.is_empty() {
					report_warning(format!(
						"no files found under {}",
						dir.display()
					));
				}
				results.append(&mut found);
			}
			Err(err) => {
				report_error(err);
				had_error = true;
			}
		}
	}

	if had_error {
		eprintln!("{USAGE_HINT}");
		return EXIT_FAILURE;
	}

	if results.is_empty() {
		if config.file.is_none() && config.dir.is_none() {
			report_error(
				"please provide a file path (--file) or directory path (--dir).",
			);
			eprintln!("{USAGE_HINT}");
		}
		return EXIT_SUCCESS;
	}

	let mut exit_code = EXIT_SUCCESS;
	if let Some(reference) = &config.reference {
		exit_code = reconcile(&results, reference);
	}

	match &config.output {
		Some((path, format)) => {
			match write_results(&results, path, *format) {
				Ok(warnings) => warnings.iter().for_each(report_warning),
				Err(err) => {
					report_error(err);
					exit_code = EXIT_FAILURE;
				}
			}
		}
		None if config.reference.is_none() => print_results(&results),
		None => {}
	}
	exit_code
}

fn hash_tree(dir: &Path, config: &RunConfig) -> Result<Vec<HashResult>> {
	let walker = Walker::new(dir, config.algorithm.id())?
		.with_threads(config.threads);
	walker
		.run(
			|_| {},
			|path, err| {
				report_error(format!(
					"hashing file {}: {}",
					path.display(),
					err
				))
			},
		)
		.into_results()
}

fn reconcile(results: &[HashResult], reference: &Path) -> i32 {
	let expected = match load_reference(reference) {
		Ok(expected) => expected,
		Err(err) => {
			report_error(err);
			return EXIT_FAILURE;
		}
	};
	let summary = compare(results, &expected);
	print_summary(&summary);
	if summary.is_clean() {
		EXIT_SUCCESS
	} else {
		EXIT_FAILURE
	}
}

fn print_summary(summary: &ComparisonSummary) {
	println!("{}", summary);
	for path in &summary.mismatched_paths {
		println!("MISMATCH {}", path);
	}
	for path in &summary.not_found_paths {
		println!("NOT FOUND {}", path);
	}
}

fn print_results(results: &[HashResult]) {
	for result in results {
		println!("{}", render_line(result));
	}
}
