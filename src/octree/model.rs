use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::octree::key::OctreeKey;

/// Occupancy label carried by each octree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
	Empty,
	Filled,
}

impl Occupancy {
	/// Map a numeric label to an occupancy value. Only 0 and 1 are defined.
	pub fn from_label(label: u32) -> Result<Self> {
		match label {
			0 => Ok(Occupancy::Empty),
			1 => Ok(Occupancy::Filled),
			other => Err(Error::BadLabel(other)),
		}
	}

	pub fn label(self) -> u32 {
		match self {
			Occupancy::Empty => 0,
			Occupancy::Filled => 1,
		}
	}
}

/// Sparse linear octree: occupancy labels addressed by key, no node pointers.
/// Keys absent from the map are unknown, not empty.
#[derive(Debug, Clone, Default)]
pub struct SparseOctree {
	nodes: HashMap<OctreeKey, Occupancy>,
	max_level: u32,
}

impl SparseOctree {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or overwrite a node. The last write for a key wins.
	pub fn insert(&mut self, key: OctreeKey, occupancy: Occupancy) {
		let level = key.level();
		if level > self.max_level {
			self.max_level = level;
		}
		self.nodes.insert(key, occupancy);
	}

	pub fn get(&self, key: OctreeKey) -> Option<Occupancy> {
		self.nodes.get(&key).copied()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (OctreeKey, Occupancy)> + '_ {
		self.nodes.iter().map(|(&key, &occupancy)| (key, occupancy))
	}

	/// Deepest level present among the stored nodes.
	pub fn max_level(&self) -> u32 {
		self.max_level
	}

	/// Voxel grid edge length implied by the deepest node, always a power of two.
	pub fn resolution(&self) -> usize {
		1 << self.max_level
	}
}
