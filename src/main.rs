//! `fsck` checks a file-system image for internal consistency. It never
//! writes to the image; it either exits silently or reports the first
//! violation it finds.

use fsck::error::CheckError;
use fsck::image::Image;
use std::env;
use std::path::PathBuf;
use std::process::exit;

fn main() {
	let mut args = env::args();
	let prog = args.next().unwrap_or_else(|| "fsck".to_owned());

	let rest: Vec<String> = args.collect();
	if rest.len() != 1 {
		eprintln!("Usage: {prog} <file_system_image>");
		exit(1);
	}
	let image_path = PathBuf::from(&rest[0]);

	let image = Image::open(&image_path).unwrap_or_else(|e| {
		eprintln!("{prog}: {}: {e}", image_path.display());
		exit(1);
	});

	if let Err(e) = fsck::check(image.as_bytes()) {
		match e {
			CheckError::Io(e) => eprintln!("{prog}: {}: {e}", image_path.display()),
			other => eprintln!("{other}"),
		}
		exit(1);
	}
}
