//! Core of the file-system image consistency checker: decodes the
//! superblock, scans every inode, and cross-checks the resulting shadow
//! tables against the on-disk bitmap.
//!
//! The image is never mutated; a clean image produces `Ok(())`, any
//! inconsistency produces the first `CheckError` detected, in the order
//! described by the inode scanner and cross-checker.

pub mod block;
pub mod context;
pub mod cross;
pub mod dir;
pub mod error;
pub mod fs;
pub mod image;
pub mod scan;
pub mod shadow;

use error::Result;

/// Runs the full check over already-mapped image bytes.
pub fn check(image: &[u8]) -> Result<()> {
	let mut ctx = context::Context::new(image)?;
	scan::scan_inodes(&mut ctx)?;
	cross::cross_check(&ctx)?;
	Ok(())
}
