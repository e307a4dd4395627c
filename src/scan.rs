//! The inode scanner: the single linear pass over inode slots that
//! establishes the root invariant and dispatches each in-use inode to the
//! appropriate walker.

use crate::context::Context;
use crate::dir::walk_dir;
use crate::block::walk_blocks;
use crate::error::{CheckError, Result};
use crate::fs::{DInode, ROOTINO, T_DEV, T_DIR, T_FILE, T_UNUSED};
use crate::shadow::ShadowType;

/// Scans every inode slot `0..ninodes`, populating `inodes_stored` and
/// invoking the block/directory walkers along the way.
pub fn scan_inodes(ctx: &mut Context) -> Result<()> {
	if ctx.sb.ninodes <= ROOTINO {
		return Err(CheckError::RootMissing);
	}

	for inum in 0..ctx.sb.ninodes {
		let inode = DInode::read(ctx.image, inum).ok_or(CheckError::BadImage)?;

		if inum == ROOTINO && inode.ty != T_DIR {
			return Err(CheckError::RootMissing);
		}

		match inode.ty {
			T_UNUSED => {}

			T_DIR => {
				if inum != ROOTINO && inode.nlink > 1 {
					return Err(CheckError::DirectoryReferencedTwice);
				}
				if inode.nlink < 1 {
					return Err(CheckError::UnreferencedInode);
				}

				ctx.tables.stored[inum as usize] = crate::shadow::StoredInode {
					in_use: true,
					ty: Some(ShadowType::Dir),
					nlink: inode.nlink,
				};
				walk_dir(ctx, &inode, inum)?;
			}

			T_FILE => {
				if inode.nlink < 1 {
					return Err(CheckError::UnreferencedInode);
				}

				ctx.tables.stored[inum as usize] = crate::shadow::StoredInode {
					in_use: true,
					ty: Some(ShadowType::File),
					nlink: inode.nlink,
				};
				walk_blocks(ctx, &inode)?;
			}

			T_DEV => {
				walk_blocks(ctx, &inode)?;
			}

			_ => return Err(CheckError::BadInode),
		}
	}

	Ok(())
}
