//! Error taxonomy for the consistency checker.
//!
//! Every variant corresponds to exactly one of the literal `ERROR: ...` lines
//! the tool may print, plus an `Io` variant for failures that happen before a
//! single byte of the image has been interpreted.

use std::fmt;
use std::io;

/// A detected file-system inconsistency, or a failure to even load the image.
#[derive(Debug)]
pub enum CheckError {
	/// The image could not be opened, stat'd, or mapped.
	Io(io::Error),
	/// The image is too short to hold a superblock, or the derived data
	/// region is empty/negative.
	BadImage,
	/// Inode `ROOTINO` does not exist or isn't a directory.
	RootMissing,
	/// A non-root directory inode has `nlink > 1`.
	DirectoryReferencedTwice,
	/// An in-use inode has no directory entry pointing to it (or `nlink < 1`).
	UnreferencedInode,
	/// An inode slot has a type outside `{unused, dir, file, dev}`.
	BadInode,
	/// A direct block address is outside `[db_start, db_end]`.
	BadDirectAddress,
	/// An indirect block address, or an address inside an indirect block, is
	/// outside `[db_start, db_end]`.
	BadIndirectAddress,
	/// A direct block address was already claimed by another inode.
	DirectAddressReused,
	/// An indirect block, or an address inside one, was already claimed.
	IndirectAddressReused,
	/// A directory's first block doesn't start with a valid `.`/`..` pair.
	MalformedDirectory,
	/// A directory entry points at an inode marked free.
	DirectoryReferencesFreeInode,
	/// A file's `nlink` doesn't match the number of directory entries seen.
	BadReferenceCount,
	/// The bitmap marks a block in use, but no inode reaches it.
	BitmapMarksFreeBlockInUse,
	/// An inode reaches a block the bitmap marks free.
	InodeUsesFreeBlock,
}

impl fmt::Display for CheckError {
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Io(e) => write!(fmt, "{e}"),
			Self::BadImage => write!(fmt, "ERROR: bad image."),
			Self::RootMissing => write!(fmt, "ERROR: root directory does not exist."),
			Self::DirectoryReferencedTwice => {
				write!(fmt, "ERROR: directory appears more than once in file system.")
			}
			Self::UnreferencedInode => {
				write!(fmt, "ERROR: inode marked use but not found in a directory.")
			}
			Self::BadInode => write!(fmt, "ERROR: bad inode."),
			Self::BadDirectAddress => write!(fmt, "ERROR: bad direct address in inode."),
			Self::BadIndirectAddress => write!(fmt, "ERROR: bad indirect address in inode."),
			Self::DirectAddressReused => write!(fmt, "ERROR: direct address used more than once."),
			Self::IndirectAddressReused => {
				write!(fmt, "ERROR: indirect address used more than once.")
			}
			Self::MalformedDirectory => write!(fmt, "ERROR: directory not properly formatted."),
			Self::DirectoryReferencesFreeInode => {
				write!(fmt, "ERROR: inode referred to in directory but marked free.")
			}
			Self::BadReferenceCount => write!(fmt, "ERROR: bad reference count for file."),
			Self::BitmapMarksFreeBlockInUse => {
				write!(fmt, "ERROR: bitmap marks block in use but it is not in use.")
			}
			Self::InodeUsesFreeBlock => {
				write!(fmt, "ERROR: address used by inode but marked free in bitmap.")
			}
		}
	}
}

impl std::error::Error for CheckError {}

impl From<io::Error> for CheckError {
	fn from(e: io::Error) -> Self {
		Self::Io(e)
	}
}

pub type Result<T> = std::result::Result<T, CheckError>;
