use crate::voxel_grid::grid::VoxelGrid;

impl VoxelGrid {
	/// Convert (i, j, k) to a linear index.
	/// K varies fastest so that memory order matches the binvox byte stream.
	#[inline]
	pub fn ijk_to_index(&self, i: usize, j: usize, k: usize) -> usize {
		i * self.len_j * self.len_k + j * self.len_k + k
	}

	/// Convert a linear index back to (i, j, k)
	#[inline]
	pub fn index_to_ijk(&self, index: usize) -> (usize, usize, usize) {
		let i = index / (self.len_j * self.len_k);
		let j = (index % (self.len_j * self.len_k)) / self.len_k;
		let k = index % self.len_k;
		(i, j, k)
	}

	/// Get a voxel value by linear index (panics if out of bounds)
	#[inline]
	pub fn get_voxel_index(&self, index: usize) -> bool {
		self.data[index]
	}

	/// Get a voxel value using (i, j, k) coordinates
	#[inline]
	pub fn get_voxel_ijk(&self, i: usize, j: usize, k: usize) -> bool {
		let index = self.ijk_to_index(i, j, k);
		self.get_voxel_index(index)
	}

	/// Set a voxel value by linear index (panics if out of bounds)
	#[inline]
	pub fn set_voxel_index(&mut self, index: usize, value: bool) {
		self.data.set(index, value);
	}

	/// Set a voxel value using (i, j, k) coordinates (assumes valid bounds)
	#[inline]
	pub fn set_voxel_ijk(&mut self, i: usize, j: usize, k: usize, value: bool) {
		let index = self.ijk_to_index(i, j, k);
		self.set_voxel_index(index, value);
	}

	/// Set a voxel to `true`
	#[inline]
	pub fn fill_voxel_ijk(&mut self, i: usize, j: usize, k: usize) {
		self.set_voxel_ijk(i, j, k, true);
	}

	/// Fill the axis-aligned cube [i, i+side) x [j, j+side) x [k, k+side).
	/// Each (i, j) row is one contiguous bit run, filled as a slice.
	pub fn fill_box(&mut self, i: usize, j: usize, k: usize, side: usize) {
		for di in 0..side {
			for dj in 0..side {
				let start = self.ijk_to_index(i + di, j + dj, k);
				self.data[start..start + side].fill(true);
			}
		}
	}

	/// Zero out the entire grid (sets all voxels to `false`)
	pub fn zero_grid(&mut self) {
		self.data.fill(false);
	}

	/// Count the number of filled voxels
	pub fn count_filled(&self) -> usize {
		self.data.count_ones()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn index_round_trip() {
		let grid = VoxelGrid::new(2, 3, 4);
		for index in 0..grid.total_voxels {
			let (i, j, k) = grid.index_to_ijk(index);
			assert_eq!(grid.ijk_to_index(i, j, k), index);
		}
	}

	#[test]
	fn k_varies_fastest() {
		let grid = VoxelGrid::cube(4);
		assert_eq!(grid.ijk_to_index(0, 0, 1), 1);
		assert_eq!(grid.ijk_to_index(0, 1, 0), 4);
		assert_eq!(grid.ijk_to_index(1, 0, 0), 16);
	}

	#[test]
	fn fill_box_covers_exactly_the_cube() {
		let mut grid = VoxelGrid::cube(8);
		grid.fill_box(2, 4, 6, 2);
		assert_eq!(grid.count_filled(), 8);
		for i in 0..8 {
			for j in 0..8 {
				for k in 0..8 {
					let inside = (2..4).contains(&i) && (4..6).contains(&j) && (6..8).contains(&k);
					assert_eq!(grid.get_voxel_ijk(i, j, k), inside);
				}
			}
		}
	}

	#[test]
	fn zero_grid_clears_everything() {
		let mut grid = VoxelGrid::cube(4);
		grid.fill_box(0, 0, 0, 4);
		assert_eq!(grid.count_filled(), 64);
		grid.zero_grid();
		assert_eq!(grid.count_filled(), 0);
	}
}
