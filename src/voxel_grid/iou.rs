use crate::error::{Error, Result};
use crate::voxel_grid::grid::VoxelGrid;

/// Intersection over union of two occupancy grids of identical shape:
/// cells set in both over cells set in either, with the union taken as a
/// logical OR. Two entirely empty grids have no defined score and are
/// reported as an error.
pub fn iou(ground_truth: &VoxelGrid, prediction: &VoxelGrid) -> Result<f64> {
	if !ground_truth.same_shape(prediction) {
		return Err(Error::ShapeMismatch(
			ground_truth.len_i,
			ground_truth.len_j,
			ground_truth.len_k,
			prediction.len_i,
			prediction.len_j,
			prediction.len_k,
		));
	}

	let mut intersection = 0usize;
	let mut union_count = 0usize;
	for (gt, pr) in ground_truth
		.data
		.iter()
		.by_vals()
		.zip(prediction.data.iter().by_vals())
	{
		intersection += (gt && pr) as usize;
		union_count += (gt || pr) as usize;
	}

	if union_count == 0 {
		return Err(Error::EmptyUnion);
	}
	Ok(intersection as f64 / union_count as f64)
}
