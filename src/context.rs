//! The geometry decoder and the single context value threaded through the
//! scanner, walkers, and cross-checker.

use crate::error::{CheckError, Result};
use crate::fs::{bblock, Superblock, BSIZE};
use crate::shadow::ShadowTables;

/// Derived region extents plus the mapped bytes and shadow tables: everything
/// the scan needs, in one place.
pub struct Context<'a> {
	pub image: &'a [u8],
	pub sb: Superblock,
	/// First valid data-block number.
	pub db_start: u32,
	/// Last valid data-block number (inclusive).
	pub db_end: u32,
	pub tables: ShadowTables,
}

impl<'a> Context<'a> {
	/// Decodes the superblock and derives the data-region extents.
	pub fn new(image: &'a [u8]) -> Result<Self> {
		let sb = Superblock::read(image).ok_or(CheckError::BadImage)?;

		let db_start = bblock(sb.size, sb.ninodes) + 1;
		if sb.size == 0 || db_start > sb.size - 1 {
			return Err(CheckError::BadImage);
		}
		let db_end = sb.size - 1;

		if image.len() < sb.size as usize * BSIZE {
			return Err(CheckError::BadImage);
		}

		let tables = ShadowTables::new(sb.ninodes as usize, sb.size as usize);

		Ok(Self {
			image,
			sb,
			db_start,
			db_end,
			tables,
		})
	}

	/// Whether `b` is a valid (in-range) data-block address. `0` is handled
	/// separately by callers as "absent", not as a valid address.
	pub fn is_valid_addr(&self, b: u32) -> bool {
		b >= self.db_start && b <= self.db_end
	}

	/// Returns the bytes of data block `b`.
	pub fn block(&self, b: u32) -> &[u8] {
		let off = b as usize * BSIZE;
		&self.image[off..off + BSIZE]
	}
}
