//! Shared fixture builder for the scenario tests: assembles a minimal,
//! byte-exact xv6-style image in memory so the scenarios in the concrete
//! examples can be reproduced without a real disk device.

use fsck::fs::{bblock, BSIZE, T_DIR};

/// A hand-assembled image under construction.
pub struct Fixture {
	pub img: Vec<u8>,
	pub ninodes: u32,
	pub size: u32,
	pub db_start: u32,
}

impl Fixture {
	/// Allocates a zeroed image of `size` blocks with `ninodes` inode slots
	/// and fills in the superblock.
	pub fn new(ninodes: u32, size: u32) -> Self {
		let mut img = vec![0u8; size as usize * BSIZE];
		img[BSIZE..BSIZE + 4].copy_from_slice(&size.to_ne_bytes());
		img[BSIZE + 8..BSIZE + 12].copy_from_slice(&ninodes.to_ne_bytes());
		let db_start = bblock(size, ninodes) + 1;

		Self {
			img,
			ninodes,
			size,
			db_start,
		}
	}

	/// Sets inode `inum`'s type, link count, and direct block 0 (the common
	/// case for these fixtures; the remaining address slots stay zero unless
	/// set with `set_addr`).
	pub fn set_inode(&mut self, inum: u32, ty: i16, nlink: i16, addr0: u32) {
		let off = 2 * BSIZE + inum as usize * 64;
		self.img[off..off + 2].copy_from_slice(&ty.to_ne_bytes());
		self.img[off + 6..off + 8].copy_from_slice(&nlink.to_ne_bytes());
		self.img[off + 12..off + 16].copy_from_slice(&addr0.to_ne_bytes());
	}

	/// Sets the `i`th address slot (0-indexed, `NDIRECT` is the indirect
	/// slot) of inode `inum`.
	pub fn set_addr(&mut self, inum: u32, i: usize, addr: u32) {
		let off = 2 * BSIZE + inum as usize * 64 + 12 + i * 4;
		self.img[off..off + 4].copy_from_slice(&addr.to_ne_bytes());
	}

	/// Writes a directory entry into block `block_addr` at slot `slot`.
	pub fn write_dirent(&mut self, block_addr: u32, slot: usize, inum: u16, name: &str) {
		let off = block_addr as usize * BSIZE + slot * 16;
		self.img[off..off + 2].copy_from_slice(&inum.to_ne_bytes());
		let bytes = name.as_bytes();
		self.img[off + 2..off + 2 + bytes.len()].copy_from_slice(bytes);
	}

	/// Sets the bitmap bit for data block `b`.
	pub fn set_bitmap_bit(&mut self, b: u32, val: bool) {
		let bitmap_blk = bblock(b, self.ninodes);
		let off = bitmap_blk as usize * BSIZE + (b as usize % (BSIZE * 8)) / 8;
		let bit = (b as usize % (BSIZE * 8)) % 8;
		if val {
			self.img[off] |= 1 << bit;
		} else {
			self.img[off] &= !(1 << bit);
		}
	}

	/// Builds a minimal valid root directory at inode 1, occupying data
	/// block `root_block`, and marks that block used in the bitmap.
	pub fn with_root(mut self, root_block: u32) -> Self {
		self.set_inode(1, T_DIR, 1, root_block);
		self.write_dirent(root_block, 0, 1, ".");
		self.write_dirent(root_block, 1, 1, "..");
		self.set_bitmap_bit(root_block, true);
		self
	}
}
