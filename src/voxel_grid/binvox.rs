use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::voxel_grid::grid::VoxelGrid;

/// Longest run a single (value, count) byte pair can encode.
const MAX_RUN: usize = 255;

static DIM_LINE: OnceLock<Regex> = OnceLock::new();

fn dim_line() -> &'static Regex {
	DIM_LINE.get_or_init(|| Regex::new(r"^dim\s+(\d+)\s+(\d+)\s+(\d+)\s*$").unwrap())
}

/// Read a binvox file into a voxel grid.
pub fn read_binvox_path<P: AsRef<Path>>(path: P) -> Result<VoxelGrid> {
	let bytes = fs::read(path)?;
	read_binvox_bytes(&bytes)
}

/// Decode binvox data: ASCII header lines up to `data`, then byte-pair
/// run-length encoded occupancy. Any nonzero run value counts as filled.
pub fn read_binvox_bytes(bytes: &[u8]) -> Result<VoxelGrid> {
	let mut dims: Option<(usize, usize, usize)> = None;
	let mut offset = 0usize;
	let mut seen_magic = false;
	let mut seen_data = false;

	while offset < bytes.len() {
		let rest = &bytes[offset..];
		let line_end = rest
			.iter()
			.position(|&b| b == b'\n')
			.ok_or_else(|| Error::BadBinvox("header ends before data section".into()))?;
		let line = std::str::from_utf8(&rest[..line_end])
			.map_err(|_| Error::BadBinvox("header is not ASCII".into()))?
			.trim_end_matches('\r');
		offset += line_end + 1;

		if !seen_magic {
			if !line.starts_with("#binvox") {
				return Err(Error::BadBinvox(format!(
					"first line reads '{}' instead of '#binvox'",
					line
				)));
			}
			seen_magic = true;
			continue;
		}
		if line == "data" {
			seen_data = true;
			break;
		}
		if let Some(caps) = dim_line().captures(line) {
			let parse = |idx: usize| -> Result<usize> {
				caps[idx]
					.parse::<usize>()
					.map_err(|_| Error::BadBinvox(format!("bad dim line '{}'", line)))
			};
			dims = Some((parse(1)?, parse(2)?, parse(3)?));
		}
		// translate and scale lines carry no grid information, skip them
	}

	if !seen_data {
		return Err(Error::BadBinvox("missing data section".into()));
	}
	let (len_i, len_j, len_k) =
		dims.ok_or_else(|| Error::BadBinvox("missing dimensions in header".into()))?;

	let mut grid = VoxelGrid::new(len_i, len_j, len_k);
	let payload = &bytes[offset..];
	if payload.len() % 2 != 0 {
		return Err(Error::BadBinvox("unpaired value/count byte".into()));
	}

	let mut index = 0usize;
	for pair in payload.chunks_exact(2) {
		let value = pair[0] != 0;
		let count = pair[1] as usize;
		let end = index + count;
		if end > grid.total_voxels {
			return Err(Error::BadBinvox("run exceeds grid size".into()));
		}
		if value {
			grid.data[index..end].fill(true);
		}
		index = end;
	}
	if index != grid.total_voxels {
		return Err(Error::BadBinvox(format!(
			"voxel data covers {} of {} cells",
			index, grid.total_voxels
		)));
	}
	Ok(grid)
}

/// Write a voxel grid as a binvox file.
pub fn write_binvox_path<P: AsRef<Path>>(grid: &VoxelGrid, path: P) -> Result<()> {
	let file = File::create(path)?;
	write_binvox_to_writer(grid, BufWriter::new(file))
}

/// Encode the grid as binvox: header, then (value, count) byte pairs with
/// runs capped at 255. The final run is flushed.
pub fn write_binvox_to_writer(grid: &VoxelGrid, mut w: impl Write) -> Result<()> {
	write!(
		w,
		"#binvox 1\ndim {} {} {}\ntranslate 0 0 0\nscale 1\ndata\n",
		grid.len_i, grid.len_j, grid.len_k
	)?;

	let mut run_value = false;
	let mut run_len = 0usize;
	for bit in grid.data.iter().by_vals() {
		if bit == run_value && run_len < MAX_RUN {
			run_len += 1;
		} else {
			if run_len > 0 {
				w.write_all(&[run_value as u8, run_len as u8])?;
			}
			run_value = bit;
			run_len = 1;
		}
	}
	if run_len > 0 {
		w.write_all(&[run_value as u8, run_len as u8])?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn round_trip(grid: &VoxelGrid) -> VoxelGrid {
		let mut buf = Vec::new();
		write_binvox_to_writer(grid, &mut buf).unwrap();
		read_binvox_bytes(&buf).unwrap()
	}

	#[test]
	fn round_trips_dims_and_occupancy() {
		let mut grid = VoxelGrid::new(4, 2, 8);
		grid.fill_voxel_ijk(0, 0, 0);
		grid.fill_voxel_ijk(3, 1, 7);
		grid.fill_voxel_ijk(2, 0, 5);

		let back = round_trip(&grid);
		assert!(back.same_shape(&grid));
		assert_eq!(back.data, grid.data);
	}

	#[test]
	fn long_runs_split_at_255() {
		// 16^3 = 4096 voxels, all filled: forces many max-length runs.
		let mut grid = VoxelGrid::cube(16);
		grid.fill_box(0, 0, 0, 16);
		let back = round_trip(&grid);
		assert_eq!(back.count_filled(), grid.total_voxels);
	}

	#[test]
	fn rejects_bad_magic() {
		let err = read_binvox_bytes(b"#notvox 1\ndim 2 2 2\ndata\n").unwrap_err();
		assert!(matches!(err, Error::BadBinvox(_)));
	}

	#[test]
	fn rejects_missing_dims() {
		let err = read_binvox_bytes(b"#binvox 1\ntranslate 0 0 0\ndata\n").unwrap_err();
		assert!(matches!(err, Error::BadBinvox(_)));
	}

	#[test]
	fn rejects_truncated_payload() {
		// Header promises 8 voxels but the payload only covers 4.
		let mut bytes = b"#binvox 1\ndim 2 2 2\ndata\n".to_vec();
		bytes.extend_from_slice(&[1u8, 4u8]);
		let err = read_binvox_bytes(&bytes).unwrap_err();
		assert!(matches!(err, Error::BadBinvox(_)));
	}

	#[test]
	fn rejects_overlong_run() {
		let mut bytes = b"#binvox 1\ndim 2 2 2\ndata\n".to_vec();
		bytes.extend_from_slice(&[1u8, 9u8]);
		let err = read_binvox_bytes(&bytes).unwrap_err();
		assert!(matches!(err, Error::BadBinvox(_)));
	}
}
