//! Maps a file-system image into memory, read-only, for the lifetime of a
//! check run.

use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;

/// A read-only mapping of a file-system image.
///
/// Dropping an `Image` unmaps the file and closes its descriptor; there is no
/// explicit teardown function to forget to call.
pub struct Image {
	mmap: Mmap,
	_file: File,
}

impl Image {
	/// Opens and maps the image at `path`.
	pub fn open(path: &Path) -> io::Result<Self> {
		let file = File::open(path)?;
		let mmap = unsafe { Mmap::map(&file)? };

		Ok(Self { mmap, _file: file })
	}

	/// Returns the mapped bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.mmap
	}

	/// Returns the length of the image, in bytes.
	pub fn len(&self) -> usize {
		self.mmap.len()
	}

	/// Returns whether the mapped image is empty.
	pub fn is_empty(&self) -> bool {
		self.mmap.is_empty()
	}
}
