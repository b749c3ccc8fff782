use thiserror::Error;

/// Errors surfaced by octree and voxel grid operations.
/// Every failure is detected eagerly and reported to the caller;
/// there is no local recovery.
#[derive(Debug, Error)]
pub enum Error {
	#[error("octree header has {found} tokens, expected at least {expected}")]
	TruncatedHeader { found: usize, expected: usize },

	#[error("octree data has an unpaired key/label token")]
	UnpairedTokens,

	#[error("invalid integer token '{0}'")]
	BadToken(String),

	#[error("occupancy label {0} is not 0 or 1")]
	BadLabel(u32),

	#[error("key {0:#010x} has no valid level marker")]
	InvalidKey(u32),

	#[error("coordinate ({x}, {y}, {z}) out of range for level {level}")]
	CoordOutOfRange { x: u32, y: u32, z: u32, level: u32 },

	#[error("level {0} exceeds the maximum octree depth")]
	LevelOutOfRange(u32),

	#[error("resolution {0} is not a power of two in the supported range")]
	BadResolution(usize),

	#[error("grid shapes differ: {0}x{1}x{2} vs {3}x{4}x{5}")]
	ShapeMismatch(usize, usize, usize, usize, usize, usize),

	#[error("grid of {0}x{1}x{2} is not cubic")]
	NotCubic(usize, usize, usize),

	#[error("both grids are empty, intersection over union is undefined")]
	EmptyUnion,

	#[error("binvox: {0}")]
	BadBinvox(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
