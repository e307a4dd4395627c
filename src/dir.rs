//! The directory walker: a superset of the block walker that additionally
//! reinterprets each reached data block as an array of directory entries and
//! feeds `inodes_seen`.

use crate::block::walk_blocks;
use crate::context::Context;
use crate::error::{CheckError, Result};
use crate::fs::{dpb, DInode, Dirent, ROOTINO, T_DIR, T_FILE, T_UNUSED};
use crate::shadow::ShadowType;

/// Walks a directory inode: marks its data blocks used (via the block
/// walker), checks the `.`/`..` format of its first block, and records every
/// inode it references into `inodes_seen`.
pub fn walk_dir(ctx: &mut Context, inode: &DInode, inum: u32) -> Result<()> {
	let reached = walk_blocks(ctx, inode)?;

	// Only a direct block at index 0 carries the `./..` format obligation,
	// and only when that slot is actually populated.
	let first_direct = inode.addrs[0];
	let mut entry_start = 0;
	if first_direct != 0 {
		check_dot_entries(ctx, first_direct, inum)?;
		entry_start = 2;
	}

	for (i, &block_addr) in reached.iter().enumerate() {
		let skip = if i == 0 && first_direct != 0 { entry_start } else { 0 };
		visit_entries(ctx, block_addr, skip)?;
	}

	Ok(())
}

/// Checks that directory block `block_addr`'s first two entries are a valid
/// `.`/`..` pair for the directory numbered `inum`.
fn check_dot_entries(ctx: &Context, block_addr: u32, inum: u32) -> Result<()> {
	let block = ctx.block(block_addr);
	let dot = Dirent::read(block, 0);
	if dot.name_str() != "." || dot.inum as u32 != inum {
		if inum == ROOTINO {
			return Err(CheckError::RootMissing);
		}
		return Err(CheckError::MalformedDirectory);
	}

	let dotdot = Dirent::read(block, 1);
	if inum == ROOTINO {
		if dotdot.name_str() != ".." || dotdot.inum as u32 != ROOTINO {
			return Err(CheckError::RootMissing);
		}
	} else if dotdot.name_str() != ".." {
		return Err(CheckError::MalformedDirectory);
	}

	Ok(())
}

/// Visits every directory entry in block `block_addr` starting at slot
/// `skip`, recording referenced inodes into `inodes_seen`.
fn visit_entries(ctx: &mut Context, block_addr: u32, skip: usize) -> Result<()> {
	for i in skip..dpb() {
		let entry = {
			let block = ctx.block(block_addr);
			Dirent::read(block, i)
		};
		if entry.inum == 0 {
			continue;
		}
		record_reference(ctx, entry.inum as u32)?;
	}
	Ok(())
}

/// Records a directory-entry reference to inode `inum`, enforcing the
/// directory/file/free-inode rules.
fn record_reference(ctx: &mut Context, inum: u32) -> Result<()> {
	let referenced = DInode::read(ctx.image, inum).ok_or(CheckError::BadImage)?;

	match referenced.ty {
		T_DIR => {
			let seen = &mut ctx.tables.seen[inum as usize];
			if inum != ROOTINO && seen.in_use {
				return Err(CheckError::DirectoryReferencedTwice);
			}
			seen.in_use = true;
			seen.ty = Some(ShadowType::Dir);
			seen.ref_count += 1;
		}
		T_FILE => {
			let seen = &mut ctx.tables.seen[inum as usize];
			seen.in_use = true;
			seen.ty = Some(ShadowType::File);
			seen.ref_count += 1;
		}
		T_UNUSED => return Err(CheckError::DirectoryReferencesFreeInode),
		// Device inodes referenced from directories are tolerated silently.
		_ => {}
	}

	Ok(())
}
