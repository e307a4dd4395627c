//! The cross-checker: reconciles the shadow tables built during the scan
//! against each other and against the on-disk bitmap. Runs once, after the
//! scan completes, in three ordered passes.

use crate::context::Context;
use crate::error::{CheckError, Result};
use crate::fs::{bblock, bpb};
use crate::shadow::BlockState;

/// Runs all three reconciliation passes in order.
pub fn cross_check(ctx: &Context) -> Result<()> {
	check_presence(ctx)?;
	check_link_counts(ctx)?;
	check_bitmap(ctx)?;
	Ok(())
}

/// Pass 1: every inode's on-disk `in_use` must match whether any directory
/// entry actually reaches it.
fn check_presence(ctx: &Context) -> Result<()> {
	for inum in 2..ctx.sb.ninodes as usize {
		let stored = &ctx.tables.stored[inum];
		let seen = &ctx.tables.seen[inum];
		if stored.in_use && !seen.in_use {
			return Err(CheckError::UnreferencedInode);
		}
		if !stored.in_use && seen.in_use {
			return Err(CheckError::DirectoryReferencesFreeInode);
		}
	}
	Ok(())
}

/// Pass 2: an inode's stored `nlink` must match the number of directory
/// entries that referenced it.
fn check_link_counts(ctx: &Context) -> Result<()> {
	for inum in 2..ctx.sb.ninodes as usize {
		let stored = &ctx.tables.stored[inum];
		let seen = &ctx.tables.seen[inum];
		if stored.in_use && stored.nlink != seen.ref_count {
			return Err(CheckError::BadReferenceCount);
		}
	}
	Ok(())
}

/// Pass 3: every data block's bitmap bit must match whether the scan
/// actually reached it.
fn check_bitmap(ctx: &Context) -> Result<()> {
	for b in ctx.db_start..=ctx.db_end {
		let bitmap_block = bblock(b, ctx.sb.ninodes);
		let block = ctx.block(bitmap_block);
		let byte = block[(b as usize % bpb()) / 8];
		let bit_num = (b as usize % bpb()) % 8;
		let bit_set = byte & (1 << bit_num) != 0;

		let used = ctx.tables.blocks[b as usize] == BlockState::Used;
		if bit_set && !used {
			return Err(CheckError::BitmapMarksFreeBlockInUse);
		}
		if !bit_set && used {
			return Err(CheckError::InodeUsesFreeBlock);
		}
	}
	Ok(())
}
