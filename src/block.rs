//! The block walker: for a regular-file or device inode, visits every data
//! block it claims to own and marks it used. Never interprets block content.

use crate::context::Context;
use crate::error::{CheckError, Result};
use crate::fs::{apb, DInode, NDIRECT};
use crate::shadow::BlockState;

/// Validates `addr` and marks it used in `ctx.tables.blocks`.
///
/// `on_bad` and `on_reused` select which of the direct/indirect error
/// variants to raise, since the same address-marking logic backs both.
fn mark_used(ctx: &mut Context, addr: u32, on_bad: CheckError, on_reused: CheckError) -> Result<()> {
	if !ctx.is_valid_addr(addr) {
		return Err(on_bad);
	}
	if ctx.tables.blocks[addr as usize] == BlockState::Used {
		return Err(on_reused);
	}
	ctx.tables.blocks[addr as usize] = BlockState::Used;
	Ok(())
}

/// Walks a regular-file or device inode's direct and indirect block
/// pointers, marking each reached data block as used.
///
/// Returns the list of data-block numbers reached, in traversal order,
/// direct blocks before the indirect block's own address before the blocks
/// it references. Directory walking (`dir.rs`) reuses this list to then
/// reinterpret each block as a directory-entry array.
pub fn walk_blocks(ctx: &mut Context, inode: &DInode) -> Result<Vec<u32>> {
	let mut reached = Vec::new();

	for &addr in &inode.addrs[..NDIRECT] {
		if addr == 0 {
			continue;
		}
		mark_used(ctx, addr, CheckError::BadDirectAddress, CheckError::DirectAddressReused)?;
		reached.push(addr);
	}

	let indirect = inode.addrs[NDIRECT];
	if indirect != 0 {
		mark_used(
			ctx,
			indirect,
			CheckError::BadIndirectAddress,
			CheckError::IndirectAddressReused,
		)?;

		let block = ctx.block(indirect);
		for i in 0..apb() {
			let off = i * 4;
			let addr = u32::from_ne_bytes(block[off..off + 4].try_into().unwrap());
			if addr == 0 {
				continue;
			}
			mark_used(
				ctx,
				addr,
				CheckError::BadIndirectAddress,
				CheckError::IndirectAddressReused,
			)?;
			reached.push(addr);
		}
	}

	Ok(reached)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::fs::BSIZE;

	fn ctx_with(ninodes: u32, size: u32) -> (Vec<u8>, u32, u32) {
		let mut img = vec![0u8; size as usize * BSIZE];
		img[BSIZE..BSIZE + 4].copy_from_slice(&size.to_ne_bytes());
		img[BSIZE + 8..BSIZE + 12].copy_from_slice(&ninodes.to_ne_bytes());
		(img, ninodes, size)
	}

	fn inode_with_addrs(addrs: [u32; NDIRECT + 1]) -> DInode {
		DInode {
			ty: 2,
			major: 0,
			minor: 0,
			nlink: 1,
			size: 0,
			addrs,
		}
	}

	#[test]
	fn accepts_all_direct_slots_with_zero_indirect() {
		let (img, ninodes, size) = ctx_with(16, 40);
		let mut ctx = Context::new(&img).unwrap();
		let _ = (ninodes, size);
		let db = ctx.db_start;
		let mut addrs = [0u32; NDIRECT + 1];
		for (i, a) in addrs[..NDIRECT].iter_mut().enumerate() {
			*a = db + i as u32;
		}
		let inode = inode_with_addrs(addrs);
		let reached = walk_blocks(&mut ctx, &inode).unwrap();
		assert_eq!(reached.len(), NDIRECT);
	}

	#[test]
	fn zero_entries_in_indirect_block_are_accepted() {
		let (img, _, _) = ctx_with(16, 40);
		let mut ctx = Context::new(&img).unwrap();
		let indirect_addr = ctx.db_start;
		let mut addrs = [0u32; NDIRECT + 1];
		addrs[NDIRECT] = indirect_addr;
		let inode = inode_with_addrs(addrs);
		let reached = walk_blocks(&mut ctx, &inode).unwrap();
		// indirect block itself counts as used, but it has no nonzero entries
		assert_eq!(reached, vec![indirect_addr]);
		assert_eq!(ctx.tables.blocks[indirect_addr as usize], BlockState::Used);
	}

	#[test]
	fn bad_direct_address_is_rejected() {
		let (img, _, _) = ctx_with(16, 40);
		let mut ctx = Context::new(&img).unwrap();
		let mut addrs = [0u32; NDIRECT + 1];
		addrs[0] = ctx.db_start - 1;
		let inode = inode_with_addrs(addrs);
		let err = walk_blocks(&mut ctx, &inode).unwrap_err();
		assert!(matches!(err, CheckError::BadDirectAddress));
	}

	#[test]
	fn reused_direct_address_is_rejected() {
		let (img, _, _) = ctx_with(16, 40);
		let mut ctx = Context::new(&img).unwrap();
		let db = ctx.db_start;
		let mut addrs = [0u32; NDIRECT + 1];
		addrs[0] = db;
		let inode = inode_with_addrs(addrs);
		walk_blocks(&mut ctx, &inode).unwrap();

		let mut addrs2 = [0u32; NDIRECT + 1];
		addrs2[0] = db;
		let inode2 = inode_with_addrs(addrs2);
		let err = walk_blocks(&mut ctx, &inode2).unwrap_err();
		assert!(matches!(err, CheckError::DirectAddressReused));
	}
}
