use bitvec::vec::BitVec;

/// Dense 3D occupancy grid with bit-packed storage
#[derive(Clone, Debug)]
pub struct VoxelGrid {
	pub len_i: usize,  // Number of voxels along I
	pub len_j: usize,  // Number of voxels along J
	pub len_k: usize,  // Number of voxels along K
	pub total_voxels: usize, // Total number of voxels IxJxK
	pub data: BitVec,  // 1-bit per voxel storage
}

impl VoxelGrid {
	/// Create a new voxel grid, fully allocated with all voxels set to `false`
	pub fn new(len_i: usize, len_j: usize, len_k: usize) -> Self {
		let total_voxels = len_i * len_j * len_k;

		Self {
			len_i,
			len_j,
			len_k,
			total_voxels,
			data: BitVec::repeat(false, total_voxels), // Pre-allocate full grid
		}
	}

	/// Create a cubic grid with edge length `resolution`
	pub fn cube(resolution: usize) -> Self {
		Self::new(resolution, resolution, resolution)
	}

	/// Whether another grid has identical dimensions
	pub fn same_shape(&self, other: &VoxelGrid) -> bool {
		self.len_i == other.len_i && self.len_j == other.len_j && self.len_k == other.len_k
	}
}
