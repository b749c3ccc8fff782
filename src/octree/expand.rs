use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};
use crate::octree::key::{MAX_LEVEL, OctreeKey};
use crate::octree::model::{Occupancy, SparseOctree};
use crate::octree::morton::inverse_morton3d;
use crate::voxel_grid::grid::VoxelGrid;

/// Geometry of one octree node in grid units, for placing proxy geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeParams {
	pub cx: f64,  // Cube center
	pub cy: f64,
	pub cz: f64,
	pub side_len: u32,  // Cube edge length in voxels
}

/// Depth of the octree level whose cells are single voxels at `resolution`.
pub(crate) fn grid_level(resolution: usize) -> Result<u32> {
	if !resolution.is_power_of_two() || resolution > 1 << MAX_LEVEL {
		return Err(Error::BadResolution(resolution));
	}
	Ok(resolution.trailing_zeros())
}

impl SparseOctree {
	/// Expand into a dense cubic grid of edge `resolution`.
	/// Cells covered only by Empty nodes, or by no node at all, stay unset;
	/// the expanded grid carries no unknown state.
	pub fn to_voxel_grid(&self, resolution: usize) -> Result<VoxelGrid> {
		let max_level = grid_level(resolution)?;
		let mut grid = VoxelGrid::cube(resolution);
		for (key, occupancy) in self.iter() {
			fill_node(&mut grid, key, occupancy, max_level)?;
		}
		Ok(grid)
	}

	/// Same as `to_voxel_grid`, with a progress bar over nodes.
	pub fn to_voxel_grid_with_progress(&self, resolution: usize) -> Result<VoxelGrid> {
		let max_level = grid_level(resolution)?;
		let mut grid = VoxelGrid::cube(resolution);

		let pb = ProgressBar::new(self.len() as u64);
		pb.set_style(
			ProgressStyle::default_bar()
			.template("Expanding octree: [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
			.unwrap()
			.progress_chars("#>-"),
		);

		for (key, occupancy) in self.iter() {
			fill_node(&mut grid, key, occupancy, max_level)?;
			pb.inc(1);
		}

		pb.finish_with_message("Octree expansion complete!");
		Ok(grid)
	}
}

/// Mark the node's cube in the grid when it is filled.
/// The position bits are shifted up to full resolution before decoding, so
/// the decoded coordinate is the base corner of the cube in voxel units.
fn fill_node(
	grid: &mut VoxelGrid,
	key: OctreeKey,
	occupancy: Occupancy,
	max_level: u32,
) -> Result<()> {
	let level = key.level();
	if level > max_level {
		return Err(Error::LevelOutOfRange(level));
	}
	if occupancy == Occupancy::Empty {
		return Ok(());
	}

	let code = key.position_bits() << (3 * (max_level - level));
	let (x, y, z) = inverse_morton3d(code);
	let side = 1usize << (max_level - level);
	grid.fill_box(x as usize, y as usize, z as usize, side);
	Ok(())
}

/// Center coordinate and side length of a node's cube at `resolution`.
pub fn cube_params(key: OctreeKey, resolution: usize) -> Result<CubeParams> {
	let max_level = grid_level(resolution)?;
	let level = key.level();
	if level > max_level {
		return Err(Error::LevelOutOfRange(level));
	}

	let code = key.position_bits() << (3 * (max_level - level));
	let (x, y, z) = inverse_morton3d(code);
	let side_len = 1u32 << (max_level - level);
	let half = f64::from(side_len) / 2.0;

	Ok(CubeParams {
		cx: f64::from(x) + half,
		cy: f64::from(y) + half,
		cz: f64::from(z) + half,
		side_len,
	})
}
