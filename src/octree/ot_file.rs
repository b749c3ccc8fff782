use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::octree::key::OctreeKey;
use crate::octree::model::{Occupancy, SparseOctree};

/// Token count of the archive preamble on the first line of an .ot file.
/// The preamble is ignored on load; key/label pairs start right after it.
pub const HEADER_TOKENS: usize = 9;

/// Archive version emitted by the writer, third token of the preamble.
const ARCHIVE_VERSION: u32 = 17;

/// Load a sparse octree from an .ot file.
pub fn load_ot_path<P: AsRef<Path>>(path: P) -> Result<SparseOctree> {
	let file = File::open(path)?;
	load_ot_from_reader(BufReader::new(file))
}

/// Parse the first line of an .ot stream: an archive preamble of
/// `HEADER_TOKENS` tokens followed by flat `key label` pairs, all decimal.
/// Duplicate keys overwrite silently; the last occurrence wins.
pub fn load_ot_from_reader<R: BufRead>(reader: R) -> Result<SparseOctree> {
	let mut lines = reader.lines();
	let line = match lines.next() {
		Some(line) => line?,
		None => String::new(),
	};

	let tokens: Vec<&str> = line.split_whitespace().collect();
	if tokens.len() < HEADER_TOKENS {
		return Err(Error::TruncatedHeader {
			found: tokens.len(),
			expected: HEADER_TOKENS,
		});
	}

	let pairs = &tokens[HEADER_TOKENS..];
	if pairs.len() % 2 != 0 {
		return Err(Error::UnpairedTokens);
	}

	let mut octree = SparseOctree::new();
	for pair in pairs.chunks_exact(2) {
		let raw_key = parse_token(pair[0])?;
		let label = parse_token(pair[1])?;
		let key = OctreeKey::from_raw(raw_key)?;
		octree.insert(key, Occupancy::from_label(label)?);
	}
	Ok(octree)
}

/// Write a sparse octree to an .ot file.
pub fn write_ot_path<P: AsRef<Path>>(octree: &SparseOctree, path: P) -> Result<()> {
	let file = File::create(path)?;
	write_ot_to_writer(octree, BufWriter::new(file))
}

/// Emit the single-line .ot form: archive preamble, then `key label` pairs
/// in ascending key order.
pub fn write_ot_to_writer(octree: &SparseOctree, mut w: impl Write) -> Result<()> {
	write!(
		w,
		"22 serialization::archive {} 0 0 {} 0 0 0",
		ARCHIVE_VERSION,
		octree.len()
	)?;

	let mut nodes: Vec<_> = octree.iter().collect();
	nodes.sort_by_key(|&(key, _)| key);
	for (key, occupancy) in nodes {
		write!(w, " {} {}", key, occupancy.label())?;
	}
	writeln!(w)?;
	Ok(())
}

fn parse_token(token: &str) -> Result<u32> {
	token
		.parse::<u32>()
		.map_err(|_| Error::BadToken(token.to_string()))
}
