use crate::error::{Error, Result};
use crate::octree::expand::grid_level;
use crate::octree::key::OctreeKey;
use crate::octree::model::{Occupancy, SparseOctree};
use crate::voxel_grid::grid::VoxelGrid;

impl SparseOctree {
	/// Condense a cubic power-of-two grid into a sparse octree.
	/// Uniform cubes collapse into single nodes; `min_level` bounds how
	/// coarse a node may get, so the result never contains a node above it.
	pub fn from_voxel_grid(grid: &VoxelGrid, min_level: u32) -> Result<SparseOctree> {
		if grid.len_i != grid.len_j || grid.len_j != grid.len_k {
			return Err(Error::NotCubic(grid.len_i, grid.len_j, grid.len_k));
		}
		let max_level = grid_level(grid.len_i)?;
		if min_level > max_level {
			return Err(Error::LevelOutOfRange(min_level));
		}

		let mut octree = SparseOctree::new();
		let coarse = 1u32 << min_level;
		for x in 0..coarse {
			for y in 0..coarse {
				for z in 0..coarse {
					condense(grid, &mut octree, x, y, z, min_level, max_level)?;
				}
			}
		}
		Ok(octree)
	}
}

/// Emit one node for the cube at (x, y, z, level) when it is uniform,
/// otherwise descend into its 8 children.
fn condense(
	grid: &VoxelGrid,
	octree: &mut SparseOctree,
	x: u32,
	y: u32,
	z: u32,
	level: u32,
	max_level: u32,
) -> Result<()> {
	let shift = max_level - level;
	let side = 1usize << shift;
	let (ci, cj, ck) = (
		(x as usize) << shift,
		(y as usize) << shift,
		(z as usize) << shift,
	);

	if let Some(filled) = uniform_value(grid, ci, cj, ck, side) {
		let occupancy = if filled {
			Occupancy::Filled
		} else {
			Occupancy::Empty
		};
		octree.insert(OctreeKey::new(x, y, z, level)?, occupancy);
		return Ok(());
	}

	for dx in 0..2 {
		for dy in 0..2 {
			for dz in 0..2 {
				condense(
					grid,
					octree,
					2 * x + dx,
					2 * y + dy,
					2 * z + dz,
					level + 1,
					max_level,
				)?;
			}
		}
	}
	Ok(())
}

/// The cube's shared occupancy value, or None when it is mixed.
/// Scans one contiguous bit run per (i, j) row.
fn uniform_value(grid: &VoxelGrid, i: usize, j: usize, k: usize, side: usize) -> Option<bool> {
	let first = grid.get_voxel_ijk(i, j, k);
	for di in 0..side {
		for dj in 0..side {
			let start = grid.ijk_to_index(i + di, j + dj, k);
			let row = &grid.data[start..start + side];
			let matches = if first { row.all() } else { row.not_any() };
			if !matches {
				return None;
			}
		}
	}
	Some(first)
}
