use std::mem::size_of;
use bitvec::prelude::BitVec;
use crate::voxel_grid::grid::VoxelGrid;

/// Format byte counts with KB, MB, GB suffixes
fn format_bytes(bytes: usize) -> String {
	const KB: usize = 1024;
	const MB: usize = KB * 1024;
	const GB: usize = MB * 1024;

	if bytes >= GB {
		format!("{:.2} GB", bytes as f64 / GB as f64)
	} else if bytes >= MB {
		format!("{:.2} MB", bytes as f64 / MB as f64)
	} else if bytes >= KB {
		format!("{:.2} KB", bytes as f64 / KB as f64)
	} else {
		format!("{} bytes", bytes)
	}
}

impl VoxelGrid {
	/// Report memory usage and occupancy on stderr
	pub fn report_memory(&self) {
		let struct_overhead = size_of::<Self>() - size_of::<BitVec>(); // Exclude dynamic storage
		let bitvec_bytes = self.data.capacity() / 8; // Bits allocated, as bytes
		let total_memory = struct_overhead + bitvec_bytes;

		eprintln!("VoxelGrid Memory Report:");
		eprintln!("-------------------------");
		eprintln!("  Dimensions: {} x {} x {}", self.len_i, self.len_j, self.len_k);
		eprintln!("  Total Voxels: {:e}", self.total_voxels as f64);
		eprintln!("  Filled Voxels: {}", self.count_filled());
		eprintln!("  Struct Overhead: {}", format_bytes(struct_overhead));
		eprintln!("  BitVec Capacity: {}", format_bytes(bitvec_bytes));
		eprintln!("  Total Memory Used: {}", format_bytes(total_memory));
		eprintln!("-------------------------");
	}
}
