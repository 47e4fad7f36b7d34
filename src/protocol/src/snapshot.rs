// snapshot: full simulation state as sent to every particle window

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapParticle {
	pub id: u64,
	pub charge: f32,
	pub pos: [f32; 2],
	pub vel: [f32; 2],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
	pub timestamp: u64,
	pub particles: Vec<SnapParticle>,
}

impl Snapshot {
	pub fn find(&self, id: u64) -> Option<&SnapParticle> {
		self.particles.iter().find(|p| p.id == id)
	}
}
