// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: app.rs
// Author: nichash maintainers

use std::error::Error;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{crate_name, Arg, ArgAction, ArgMatches};
use tracing_subscriber::EnvFilter;

use crate::nh::digest::commands as digest_commands;
use crate::nh::digest::{parse_algorithm, DigestAlgorithm};
use crate::nh::error::NichashError;
use crate::nh::file::ThreadStrategy;
use crate::nh::manifest::ManifestFormat;
use crate::nh::weak;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_FAILURE: i32 = 2;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "NICHASH_LOG";

pub const USAGE_HINT: &str = "Run 'nichash --help' for usage.";

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

const AFTER_HELP: &str = "Examples:
  nichash --file test.txt --hash sha256 -o hash.txt
  nichash --dir ./myfolder --hash sha512 -o hash.json
  nichash --file test.txt --verify <HASH>
  nichash --dir ./myfolder --reference hash.json";

/// Everything one invocation asked for, validated.
#[derive(Clone, Debug)]
pub struct RunConfig {
	pub file: Option<PathBuf>,
	pub dir: Option<PathBuf>,
	pub algorithm: DigestAlgorithm,
	pub output: Option<(PathBuf, ManifestFormat)>,
	pub verify: Option<String>,
	pub reference: Option<PathBuf>,
	pub threads: ThreadStrategy,
}

impl RunConfig {
	/// Checks in the order the CLI reports them: output extension,
	/// algorithm, then `--verify` without `--file`.
	pub fn from_matches(matches: &ArgMatches) -> Result<Self, NichashError> {
		let output = match matches.get_one::<PathBuf>("output") {
			Some(path) => {
				let format =
					ManifestFormat::from_path(path).map_err(|_| {
						NichashError::Usage(format!(
							"output format not supported. Please use {}.",
							ManifestFormat::supported()
						))
					})?;
				Some((path.clone(), format))
			}
			None => None,
		};

		let algorithm = matches
			.get_one::<String>("hash")
			.map(String::as_str)
			.unwrap_or("sha256");
		let algorithm = parse_algorithm(algorithm)?;

		let file = matches.get_one::<PathBuf>("file").cloned();
		let verify = matches.get_one::<String>("verify").cloned();
		if verify.is_some() && file.is_none() {
			return Err(NichashError::Usage(
				"--verify can only be used with --file, not with --dir"
					.to_string(),
			));
		}

		Ok(Self {
			file,
			dir: matches.get_one::<PathBuf>("dir").cloned(),
			algorithm,
			output,
			verify,
			reference: matches.get_one::<PathBuf>("reference").cloned(),
			threads: matches
				.get_one::<ThreadStrategy>("threads")
				.copied()
				.unwrap_or_default(),
		})
	}
}

pub fn build_cli() -> clap::Command {
	clap::Command::new(crate_name!())
		.color(clap::ColorChoice::Never)
		.help_template(HELP_TEMPLATE)
		.bin_name(crate_name!())
		.version(clap::crate_version!())
		.about("Secure, fast and flexible file hash generator")
		.after_help(AFTER_HELP)
		.arg_required_else_help(true)
		.arg(
			Arg::new("file")
				.short('f')
				.long("file")
				.value_name("PATH")
				.value_parser(clap::value_parser!(PathBuf))
				.help("Path of the file to hash"),
		)
		.arg(
			Arg::new("dir")
				.short('d')
				.long("dir")
				.value_name("PATH")
				.value_parser(clap::value_parser!(PathBuf))
				.help("Path of the directory to hash recursively"),
		)
		.arg(
			Arg::new("hash")
				.short('a')
				.long("hash")
				.visible_alias("algorithm")
				.value_name("ALGORITHM")
				.default_value("sha256")
				.help(format!(
					"Hash type: {}",
					DigestAlgorithm::ids().join(", ")
				)),
		)
		.arg(
			Arg::new("output")
				.short('o')
				.long("output")
				.value_name("PATH")
				.value_parser(clap::value_parser!(PathBuf))
				.help("Output file (supports .txt, .json, .csv)"),
		)
		.arg(
			Arg::new("verify")
				.long("verify")
				.value_name("HASH")
				.help("Hash to verify the --file digest against"),
		)
		.arg(
			Arg::new("reference")
				.short('r')
				.long("reference")
				.value_name("MANIFEST")
				.value_parser(clap::value_parser!(PathBuf))
				.help("Compare results against a saved .json, .csv or .txt manifest"),
		)
		.arg(
			Arg::new("threads")
				.short('j')
				.long("threads")
				.value_name("N|auto")
				.value_parser(ThreadStrategy::parse)
				.default_value("1")
				.help("Worker threads used for --dir hashing"),
		)
		.arg(
			Arg::new("quiet-warnings")
				.long("no-weak-warning")
				.help("Do not warn when hashing with MD5 or SHA-1")
				.action(ArgAction::SetTrue),
		)
}

/// Install the stderr log subscriber. Safe to call more than once.
pub fn init_logging() {
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}

pub fn run() -> Result<i32, Box<dyn Error>> {
	init_logging();
	run_from(std::env::args_os())
}

/// Parse `args` and execute the requested mode, returning the process
/// exit code.
pub fn run_from<I, T>(args: I) -> Result<i32, Box<dyn Error>>
where
	I: IntoIterator<Item = T>,
	T: Into<OsString> + Clone,
{
	let matches = match build_cli().try_get_matches_from(args) {
		Ok(matches) => matches,
		Err(err) => {
			err.print()?;
			return Ok(match err.kind() {
				ErrorKind::DisplayHelp
				| ErrorKind::DisplayVersion
				| ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
					EXIT_SUCCESS
				}
				_ => {
					eprintln!("{USAGE_HINT}");
					EXIT_USAGE
				}
			});
		}
	};

	let config = match RunConfig::from_matches(&matches) {
		Ok(config) => config,
		Err(err) => {
			digest_commands::report_error(&err);
			eprintln!("{USAGE_HINT}");
			return Ok(if err.is_validation() {
				EXIT_USAGE
			} else {
				EXIT_FAILURE
			});
		}
	};
	tracing::debug!(?config, "resolved run configuration");

	if !matches.get_flag("quiet-warnings") {
		weak::emit_warning(config.algorithm);
	}

	if let (Some(file), Some(expected)) = (&config.file, &config.verify) {
		return Ok(digest_commands::verify_file(
			file,
			config.algorithm,
			expected,
		));
	}
	Ok(digest_commands::hash_targets(&config))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config_for(args: &[&str]) -> Result<RunConfig, NichashError> {
		let matches = build_cli()
			.try_get_matches_from(
				std::iter::once("nichash").chain(args.iter().copied()),
			)
			.unwrap();
		RunConfig::from_matches(&matches)
	}

	#[test]
	fn cli_definition_is_consistent() {
		build_cli().debug_assert();
	}

	#[test]
	fn defaults_to_sha256_single_thread() {
		let config = config_for(&["--file", "a.txt"]).unwrap();
		assert_eq!(config.algorithm, DigestAlgorithm::Sha256);
		assert_eq!(config.threads, ThreadStrategy::Single);
		assert!(config.output.is_none());
	}

	#[test]
	fn infers_output_format_from_extension() {
		let config =
			config_for(&["-d", ".", "-a", "SHA512", "-o", "out.CSV"])
				.unwrap();
		let (path, format) = config.output.unwrap();
		assert_eq!(path, PathBuf::from("out.CSV"));
		assert_eq!(format, ManifestFormat::Csv);
		assert_eq!(config.algorithm, DigestAlgorithm::Sha512);
	}

	#[test]
	fn rejects_bad_output_algorithm_and_verify_combo() {
		let err = config_for(&["-f", "a", "-o", "out.xml"]).unwrap_err();
		assert!(err.to_string().contains("output format not supported"));

		let err = config_for(&["-f", "a", "-a", "crc32"]).unwrap_err();
		assert_eq!(err.to_string(), "unsupported hash type: crc32");

		let err = config_for(&["-d", ".", "--verify", "abc"]).unwrap_err();
		assert!(err.to_string().contains("--verify"));
		assert!(err.is_validation());
	}

	#[test]
	fn parses_thread_counts() {
		let config = config_for(&["-d", ".", "-j", "auto"]).unwrap();
		assert_eq!(config.threads, ThreadStrategy::Auto);
		let config = config_for(&["-d", ".", "--threads", "4"]).unwrap();
		assert_eq!(config.threads, ThreadStrategy::Fixed(4));
	}

	#[test]
	fn exit_codes_for_usage_errors() {
		assert_eq!(run_from(["nichash", "--bogus"]).unwrap(), EXIT_USAGE);
		assert_eq!(
			run_from(["nichash", "-f", "x", "-a", "nope"]).unwrap(),
			EXIT_USAGE
		);
		assert_eq!(run_from(["nichash", "--version"]).unwrap(), EXIT_SUCCESS);
	}
}
