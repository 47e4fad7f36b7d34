pub mod snapshot;
pub mod sock;

use serde::{Deserialize, Serialize};

use snapshot::Snapshot;

pub const DEFAULT_SOCK: &str = "mfs2d.socket";

#[derive(Debug, Serialize, Deserialize)]
pub enum Message {
	Ready { id: u64 },
	PositionUpdate { id: u64, pos: [f32; 2] },
	Snapshot(Snapshot),
}

impl Message {
	pub fn to_bytes(&self) -> Vec<u8> {
		bincode::serialize(&self).unwrap()
	}

	pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
		bincode::deserialize(bytes).ok()
	}
}
