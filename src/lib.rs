pub mod error;

pub mod octree {
	pub mod morton;
	pub mod key;
	pub mod model;
	pub mod ot_file;
	pub mod expand;
	pub mod from_grid;
}

pub mod voxel_grid {
	pub mod grid;
	pub mod manip;
	pub mod utils;
	pub mod binvox;
	pub mod iou;
}
