use std::fs;
use std::io::Write;
use std::process::Command;

use tempfile::tempdir;

use otvox::octree::key::OctreeKey;
use otvox::octree::model::{Occupancy, SparseOctree};
use otvox::octree::ot_file;
use otvox::voxel_grid::binvox;
use otvox::voxel_grid::grid::VoxelGrid;
use otvox::voxel_grid::iou::iou;

#[test]
fn ot_file_expands_and_scores_against_itself() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("model.ot");

	// Two filled level-1 octants and one filled level-2 leaf.
	let k1 = OctreeKey::new(0, 0, 0, 1).unwrap();
	let k2 = OctreeKey::new(1, 1, 1, 1).unwrap();
	let k3 = OctreeKey::new(3, 0, 0, 2).unwrap();
	let mut file = fs::File::create(&path).unwrap();
	writeln!(
		file,
		"22 serialization::archive 17 0 0 3 0 0 0 {} 1 {} 1 {} 1",
		k1.raw(),
		k2.raw(),
		k3.raw()
	)
	.unwrap();
	drop(file);

	let octree = ot_file::load_ot_path(&path).unwrap();
	assert_eq!(octree.resolution(), 4);

	let grid = octree.to_voxel_grid(octree.resolution()).unwrap();
	assert_eq!(grid.count_filled(), 8 + 8 + 1);
	assert_eq!(iou(&grid, &grid).unwrap(), 1.0);
}

#[test]
fn ot_to_binvox_to_ot_preserves_the_model() {
	let dir = tempdir().unwrap();
	let binvox_path = dir.path().join("model.binvox");
	let ot_path = dir.path().join("model.ot");

	let mut octree = SparseOctree::new();
	octree.insert(OctreeKey::new(0, 0, 0, 1).unwrap(), Occupancy::Filled);
	octree.insert(OctreeKey::new(1, 0, 1, 1).unwrap(), Occupancy::Filled);
	octree.insert(OctreeKey::new(2, 3, 1, 2).unwrap(), Occupancy::Filled);

	let grid = octree.to_voxel_grid(octree.resolution()).unwrap();
	binvox::write_binvox_path(&grid, &binvox_path).unwrap();

	let reloaded_grid = binvox::read_binvox_path(&binvox_path).unwrap();
	assert_eq!(reloaded_grid.data, grid.data);

	let condensed = SparseOctree::from_voxel_grid(&reloaded_grid, 0).unwrap();
	ot_file::write_ot_path(&condensed, &ot_path).unwrap();

	let final_octree = ot_file::load_ot_path(&ot_path).unwrap();
	let final_grid = final_octree
		.to_voxel_grid(final_octree.resolution())
		.unwrap();
	assert_eq!(iou(&grid, &final_grid).unwrap(), 1.0);
}

#[test]
fn disjoint_models_score_zero() {
	let mut a = SparseOctree::new();
	a.insert(OctreeKey::new(0, 0, 0, 1).unwrap(), Occupancy::Filled);
	let mut b = SparseOctree::new();
	b.insert(OctreeKey::new(1, 1, 1, 1).unwrap(), Occupancy::Filled);

	let grid_a = a.to_voxel_grid(2).unwrap();
	let grid_b = b.to_voxel_grid(2).unwrap();
	assert_eq!(iou(&grid_a, &grid_b).unwrap(), 0.0);
}

#[test]
fn malformed_ot_file_is_rejected() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("broken.ot");
	fs::write(&path, "too short header\n").unwrap();
	assert!(ot_file::load_ot_path(&path).is_err());
}

#[test]
fn partial_overlap_scores_the_expected_ratio() {
	// Prediction covers one octant, reference covers the whole volume:
	// intersection 8, union 64.
	let mut prediction = SparseOctree::new();
	prediction.insert(OctreeKey::new(0, 0, 0, 1).unwrap(), Occupancy::Filled);
	let mut reference = SparseOctree::new();
	reference.insert(OctreeKey::new(0, 0, 0, 0).unwrap(), Occupancy::Filled);

	let pr = prediction.to_voxel_grid(4).unwrap();
	let gt = reference.to_voxel_grid(4).unwrap();
	let score = iou(&gt, &pr).unwrap();
	assert!((score - 8.0 / 64.0).abs() < 1e-12);
}

#[test]
fn eval_command_scores_a_model_against_itself() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("model.ot");

	let mut octree = SparseOctree::new();
	octree.insert(OctreeKey::new(0, 0, 0, 1).unwrap(), Occupancy::Filled);
	octree.insert(OctreeKey::new(1, 1, 1, 1).unwrap(), Occupancy::Filled);
	ot_file::write_ot_path(&octree, &path).unwrap();

	let output = Command::new(env!("CARGO_BIN_EXE_otvox"))
		.arg("eval")
		.arg("--prediction")
		.arg(&path)
		.arg("--reference")
		.arg(&path)
		.output()
		.unwrap();

	assert!(output.status.success());
	assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1.000");
}

#[test]
fn grids_with_different_dims_mismatch() {
	let a = VoxelGrid::cube(2);
	let b = VoxelGrid::cube(4);
	assert!(iou(&a, &b).is_err());
}
