use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use otvox::octree::model::SparseOctree;
use otvox::octree::ot_file;
use otvox::voxel_grid::binvox;
use otvox::voxel_grid::grid::VoxelGrid;
use otvox::voxel_grid::iou::iou;

/// Convert and score linear octree models and dense voxel grids
#[derive(Parser)]
#[command(name = "otvox", version, about)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Score a predicted model against a reference with intersection over union
	Eval {
		/// Predicted model file (.ot or .binvox)
		#[arg(short, long)]
		prediction: PathBuf,

		/// Reference model file (.ot or .binvox)
		#[arg(short, long)]
		reference: PathBuf,
	},
	/// Convert between .ot octree models and .binvox voxel grids
	Convert {
		/// Input file name for conversion
		#[arg(short, long)]
		input: PathBuf,

		/// Output file name for conversion
		#[arg(short, long)]
		output: PathBuf,

		/// Coarsest octree level produced when condensing a grid
		#[arg(short = 'l', long, default_value_t = 0)]
		min_level: u32,
	},
}

fn main() -> Result<()> {
	match Cli::parse().command {
		Command::Eval {
			prediction,
			reference,
		} => eval(&prediction, &reference),
		Command::Convert {
			input,
			output,
			min_level,
		} => convert(&input, &output, min_level),
	}
}

fn eval(prediction: &Path, reference: &Path) -> Result<()> {
	let pr = load_grid(prediction)?;
	let gt = load_grid(reference)?;
	let score = iou(&gt, &pr)?;
	println!("{:.3}", score);
	Ok(())
}

fn convert(input: &Path, output: &Path, min_level: u32) -> Result<()> {
	eprintln!("Input file: {}", input.display());
	eprintln!("Output file: {}", output.display());

	match (extension(input), extension(output)) {
		("ot", "binvox") => {
			let octree = ot_file::load_ot_path(input)
				.with_context(|| format!("reading {}", input.display()))?;
			let grid = octree.to_voxel_grid_with_progress(octree.resolution())?;
			grid.report_memory();
			binvox::write_binvox_path(&grid, output)
				.with_context(|| format!("writing {}", output.display()))?;
		}
		("binvox", "ot") => {
			let grid = binvox::read_binvox_path(input)
				.with_context(|| format!("reading {}", input.display()))?;
			eprintln!("Minimum level: {}", min_level);
			let octree = SparseOctree::from_voxel_grid(&grid, min_level)?;
			eprintln!("Octree nodes: {}", octree.len());
			ot_file::write_ot_path(&octree, output)
				.with_context(|| format!("writing {}", output.display()))?;
		}
		(from, to) => bail!("unsupported conversion from .{} to .{}", from, to),
	}
	Ok(())
}

fn load_grid(path: &Path) -> Result<VoxelGrid> {
	let grid = match extension(path) {
		"ot" => {
			let octree = ot_file::load_ot_path(path)
				.with_context(|| format!("reading {}", path.display()))?;
			octree.to_voxel_grid(octree.resolution())?
		}
		"binvox" => binvox::read_binvox_path(path)
			.with_context(|| format!("reading {}", path.display()))?,
		other => bail!("unsupported model format '.{}'", other),
	};
	Ok(grid)
}

fn extension(path: &Path) -> &str {
	path.extension().and_then(|ext| ext.to_str()).unwrap_or("")
}
