// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: nichash
// File: main.rs
// Author: nichash maintainers

use nichash::nh::app;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let code = app::run()?;
	std::process::exit(code);
}
