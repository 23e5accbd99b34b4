// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: walker.rs
// Author: nichash maintainers

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use super::{hash_path, HashResult};
use crate::nh::digest::{parse_algorithm, DigestAlgorithm};
use crate::nh::error::{NichashError, Result};

/// Worker pool sizing for directory hashing. Output order does not
/// depend on the choice.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ThreadStrategy {
	#[default]
	Single,
	Auto,
	Fixed(u16),
}

impl ThreadStrategy {
	/// Parses `auto` or a positive thread count.
	pub fn parse(value: &str) -> std::result::Result<Self, String> {
		let value = value.trim();
		if value.eq_ignore_ascii_case("auto") {
			return Ok(Self::Auto);
		}
		match value.parse::<u16>() {
			Ok(0) => Err("thread count must be at least 1".to_string()),
			Ok(1) => Ok(Self::Single),
			Ok(count) => Ok(Self::Fixed(count)),
			Err(_) => Err(format!(
				"invalid thread count `{value}` (expected a number or `auto`)"
			)),
		}
	}
}

/// A file that could not be hashed, or a directory entry that could not
/// be visited.
#[derive(Debug)]
pub struct WalkFailure {
	pub path: PathBuf,
	pub error: NichashError,
}

pub type WalkItem = std::result::Result<HashResult, WalkFailure>;

/// Everything one directory run produced, in traversal order.
#[derive(Debug)]
pub struct DirectoryOutcome {
	pub root: PathBuf,
	pub results: Vec<HashResult>,
	pub failures: Vec<WalkFailure>,
}

impl DirectoryOutcome {
	/// Successful results, or `NoFilesProcessed` when every visited file
	/// failed.
	pub fn into_results(self) -> Result<Vec<HashResult>> {
		if self.results.is_empty() && !self.failures.is_empty() {
			return Err(NichashError::NoFilesProcessed { root: self.root });
		}
		Ok(self.results)
	}
}

pub struct Walker {
	root: PathBuf,
	algorithm: DigestAlgorithm,
	threads: ThreadStrategy,
}

impl Walker {
	/// Validates the algorithm and that `root` is an accessible
	/// directory.
	pub fn new(root: impl AsRef<Path>, algorithm: &str) -> Result<Self> {
		let root = root.as_ref();
		let algorithm = parse_algorithm(algorithm)?;
		let metadata = fs::metadata(root).map_err(|err| {
			NichashError::DirectoryAccess {
				path: root.to_path_buf(),
				reason: err.to_string(),
			}
		})?;
		if !metadata.is_dir() {
			return Err(NichashError::DirectoryAccess {
				path: root.to_path_buf(),
				reason: "path is not a directory".to_string(),
			});
		}
		Ok(Self {
			root: root.to_path_buf(),
			algorithm,
			threads: ThreadStrategy::Single,
		})
	}

	pub fn with_threads(mut self, threads: ThreadStrategy) -> Self {
		self.threads = threads;
		self
	}

	/// Lazily hash every file under the root, depth-first with entries
	/// sorted by name at each level. Always sequential.
	pub fn iter(&self) -> impl Iterator<Item = WalkItem> + '_ {
		self.files().map(move |entry| {
			entry.and_then(|path| self.hash_one(path))
		})
	}

	/// Hash the tree, reporting each item through the callbacks in
	/// traversal order. Per-file failures never abort the walk.
	pub fn run<R, E>(
		&self,
		mut on_result: R,
		mut on_error: E,
	) -> DirectoryOutcome
	where
		R: FnMut(&HashResult),
		E: FnMut(&Path, &NichashError),
	{
		let mut outcome = DirectoryOutcome {
			root: self.root.clone(),
			results: Vec::new(),
			failures: Vec::new(),
		};
		let mut collect = |item: WalkItem| match item {
			Ok(result) => {
				on_result(&result);
				outcome.results.push(result);
			}
			Err(failure) => {
				on_error(&failure.path, &failure.error);
				outcome.failures.push(failure);
			}
		};

		match self.pool_size() {
			None => self.iter().for_each(&mut collect),
			Some(threads) => {
				self.hash_parallel(threads).into_iter().for_each(&mut collect)
			}
		}

		tracing::debug!(
			root = %self.root.display(),
			hashed = outcome.results.len(),
			failed = outcome.failures.len(),
			"directory walk finished"
		);
		outcome
	}

	fn pool_size(&self) -> Option<usize> {
		match self.threads {
			ThreadStrategy::Single => None,
			ThreadStrategy::Auto => Some(0),
			ThreadStrategy::Fixed(count) if count <= 1 => None,
			ThreadStrategy::Fixed(count) => Some(count as usize),
		}
	}

	// Paths are enumerated up front so results can be collected back in
	// traversal order no matter which worker finishes first.
	fn hash_parallel(&self, threads: usize) -> Vec<WalkItem> {
		let entries: Vec<_> = self.files().collect();
		let pool = match rayon::ThreadPoolBuilder::new()
			.num_threads(threads)
			.build()
		{
			Ok(pool) => pool,
			Err(err) => {
				tracing::warn!(
					"falling back to sequential hashing: {}",
					err
				);
				return entries
					.into_iter()
					.map(|entry| entry.and_then(|path| self.hash_one(path)))
					.collect();
			}
		};
		pool.install(|| {
			entries
				.into_par_iter()
				.map(|entry| entry.and_then(|path| self.hash_one(path)))
				.collect()
		})
	}

	fn hash_one(&self, path: PathBuf) -> WalkItem {
		hash_path(&path, self.algorithm)
			.map_err(|error| WalkFailure { path, error })
	}

	fn files(
		&self,
	) -> impl Iterator<Item = std::result::Result<PathBuf, WalkFailure>> + '_
	{
		WalkDir::new(&self.root)
			.follow_links(false)
			.sort_by(|a, b| a.file_name().cmp(b.file_name()))
			.into_iter()
			.filter_map(move |entry| match entry {
				Ok(entry) => hashable(entry).map(Ok),
				Err(err) => Some(Err(self.walk_failure(err))),
			})
	}

	fn walk_failure(&self, err: walkdir::Error) -> WalkFailure {
		let path = err
			.path()
			.map(Path::to_path_buf)
			.unwrap_or_else(|| self.root.clone());
		let reason = match err.io_error() {
			Some(inner) => inner.to_string(),
			None => err.to_string(),
		};
		WalkFailure {
			error: NichashError::DirectoryAccess {
				path: path.clone(),
				reason,
			},
			path,
		}
	}
}

/// Regular files, plus symlinks that do not resolve to a directory. A
/// dangling link is kept so opening it reports the failure.
fn hashable(entry: DirEntry) -> Option<PathBuf> {
	let file_type = entry.file_type();
	if file_type.is_dir() {
		return None;
	}
	if file_type.is_file() {
		return Some(entry.into_path());
	}
	if file_type.is_symlink() {
		return match fs::metadata(entry.path()) {
			Ok(target) if target.is_dir() => None,
			Ok(target) if !target.is_file() => None,
			_ => Some(entry.into_path()),
		};
	}
	tracing::debug!(path = %entry.path().display(), "skipping special file");
	None
}

/// Hash every file under `root`, invoking `on_result` for each success
/// and `on_error` for each failure. Only an invalid algorithm or an
/// inaccessible root fails the call.
pub fn hash_directory<R, E>(
	root: impl AsRef<Path>,
	algorithm: &str,
	on_result: R,
	on_error: E,
) -> Result<Vec<HashResult>>
where
	R: FnMut(&HashResult),
	E: FnMut(&Path, &NichashError),
{
	let walker = Walker::new(root, algorithm)?;
	Ok(walker.run(on_result, on_error).results)
}
