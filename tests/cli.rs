// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: cli.rs
// Author: nichash maintainers

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::path::Path;
use tempfile::tempdir;

const HELLO_SHA256: &str =
	"b94d27b9934d3e08a52e52d7da7dacefe69c7d46d54d4d3f79d42d3a4b6bda2c";

fn nichash() -> Command {
	let mut cmd = cargo_bin_cmd!("nichash");
	cmd.env("NO_COLOR", "1").env_remove("NICHASH_LOG");
	cmd
}

fn stdout_of(cmd: &mut Command) -> String {
	let output = cmd.output().expect("command runs");
	String::from_utf8(output.stdout).expect("stdout should be UTF-8")
}

fn write(path: &Path, contents: &str) {
	std::fs::create_dir_all(path.parent().unwrap()).unwrap();
	std::fs::write(path, contents).unwrap();
}

#[test]
fn no_arguments_prints_usage_and_succeeds() {
	nichash().assert().success();
}

#[test]
fn hashes_single_file_to_stdout() {
	let tmp = tempdir().unwrap();
	let file = tmp.path().join("hello.txt");
	write(&file, "hello world");

	let assert = nichash().arg("--file").arg(&file).assert().success();
	let stdout =
		String::from_utf8(assert.get_output().stdout.clone()).unwrap();
	assert_eq!(
		stdout.trim_end(),
		format!("SHA256 hash of file {}: {}", file.display(), HELLO_SHA256)
	);
}

#[test]
fn unsupported_algorithm_exits_with_one() {
	let tmp = tempdir().unwrap();
	let file = tmp.path().join("a.txt");
	write(&file, "a");
	nichash()
		.arg("-f")
		.arg(&file)
		.args(["--hash", "crc32"])
		.assert()
		.code(1);
}

#[test]
fn unknown_flag_exits_with_one() {
	nichash().arg("--definitely-not-a-flag").assert().code(1);
}

#[test]
fn verify_requires_file() {
	let tmp = tempdir().unwrap();
	nichash()
		.arg("--dir")
		.arg(tmp.path())
		.args(["--verify", HELLO_SHA256])
		.assert()
		.code(1);
}

#[test]
fn verify_reports_match_and_mismatch() {
	let tmp = tempdir().unwrap();
	let file = tmp.path().join("v.txt");
	write(&file, "hello world");

	let stdout = stdout_of(
		nichash()
			.arg("--file")
			.arg(&file)
			.args(["--verify", &HELLO_SHA256.to_uppercase()]),
	);
	assert!(stdout.contains("hash matches!"));

	let output = nichash()
		.arg("--file")
		.arg(&file)
		.args(["--verify", "1234567890abcdef"])
		.output()
		.unwrap();
	assert_eq!(output.status.code(), Some(2));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("hash does not match"));
}

#[test]
fn directory_output_is_saved_in_requested_format() {
	let tmp = tempdir().unwrap();
	let root = tmp.path().join("tree");
	write(&root.join("b.txt"), "data B");
	write(&root.join("a.txt"), "data A");
	let out = tmp.path().join("hash.json");

	nichash()
		.arg("--dir")
		.arg(&root)
		.args(["-a", "sha1", "-o"])
		.arg(&out)
		.assert()
		.success();

	let saved: Vec<nichash::HashResult> =
		serde_json::from_str(&std::fs::read_to_string(&out).unwrap())
			.unwrap();
	assert_eq!(saved.len(), 2);
	assert!(saved[0].file_path.ends_with("a.txt"));
	assert!(saved.iter().all(|r| r.hash_type == "SHA1"));
}

#[test]
fn unsupported_output_extension_is_rejected() {
	let tmp = tempdir().unwrap();
	let file = tmp.path().join("a.txt");
	write(&file, "a");
	let out = tmp.path().join("hash.xml");
	nichash()
		.arg("-f")
		.arg(&file)
		.arg("-o")
		.arg(&out)
		.assert()
		.code(1);
	assert!(!out.exists());

	let existing = tmp.path().join("keep.md");
	write(&existing, "untouched");
	nichash()
		.arg("-f")
		.arg(&file)
		.arg("-o")
		.arg(&existing)
		.assert()
		.code(1);
	assert_eq!(std::fs::read_to_string(&existing).unwrap(), "untouched");
}

#[test]
fn reference_reconciliation_reports_changes() {
	let tmp = tempdir().unwrap();
	let root = tmp.path().join("tree");
	write(&root.join("a.txt"), "data A");
	write(&root.join("b.txt"), "data B");
	let manifest = tmp.path().join("baseline.csv");

	nichash()
		.arg("-d")
		.arg(&root)
		.arg("-o")
		.arg(&manifest)
		.assert()
		.success();

	let clean = stdout_of(nichash().arg("-d").arg(&root).arg("-r").arg(&manifest));
	assert!(clean.contains("Matched: 2, Mismatched: 0, Not found: 0"));

	write(&root.join("b.txt"), "changed");
	let output = nichash()
		.arg("-d")
		.arg(&root)
		.arg("--reference")
		.arg(&manifest)
		.output()
		.unwrap();
	assert_eq!(output.status.code(), Some(2));
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("Matched: 1, Mismatched: 1, Not found: 0"));
	assert!(stdout.contains("MISMATCH"));
}

#[test]
fn weak_algorithm_emits_single_warning() {
	let tmp = tempdir().unwrap();
	let file = tmp.path().join("a.txt");
	write(&file, "a");
	let output = nichash()
		.arg("-f")
		.arg(&file)
		.args(["-a", "md5"])
		.output()
		.unwrap();
	assert!(output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	let warnings: Vec<_> = stderr
		.lines()
		.filter(|line| line.contains("weak algorithm"))
		.collect();
	assert_eq!(warnings.len(), 1, "stderr was `{stderr}`");
}

#[test]
fn missing_file_fails_without_output() {
	let tmp = tempdir().unwrap();
	let output = nichash()
		.arg("--file")
		.arg(tmp.path().join("absent.txt"))
		.output()
		.unwrap();
	assert_eq!(output.status.code(), Some(2));
	assert!(output.stdout.is_empty());
	assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}
