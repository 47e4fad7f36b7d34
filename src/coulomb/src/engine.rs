use fnv::{FnvHashMap, FnvHashSet};

use crate::control::ControlMessage;
use crate::forces::net_forces;
use crate::params::PhysicsParams;
use crate::registry::Registry;
use crate::V2;

// single write authority over the registry, stepped at the tick cadence
pub struct Engine {
	params: PhysicsParams,
	// held drags, kept across ticks until released
	held: FnvHashMap<u64, V2>,
	// one-shot wire moves, drained every step, last write wins
	pending: FnvHashMap<u64, V2>,
}

impl Engine {
	pub fn new(params: PhysicsParams) -> Self {
		Self {
			params,
			held: FnvHashMap::default(),
			pending: FnvHashMap::default(),
		}
	}

	pub fn params(&self) -> &PhysicsParams {
		&self.params
	}

	pub fn apply(&mut self, msg: ControlMessage) {
		match msg {
			ControlMessage::ControlParticle(id, pos) => {
				self.held.insert(id, V2::new(pos[0], pos[1]));
			}
			ControlMessage::UncontrolParticle(id) => {
				self.held.remove(&id);
			}
			ControlMessage::MoveTo(id, pos) => {
				self.pending.insert(id, V2::new(pos[0], pos[1]));
			}
		}
	}

	pub fn step(&mut self, reg: &mut Registry) {
		// dragged particles take their position from input, not the field
		let mut dragged = FnvHashSet::default();
		for (&id, &pos) in
			self.held.iter().chain(self.pending.iter())
		{
			if let Some(p) = reg.find_mut(id) {
				p.pos = pos;
				p.vel = V2::zeros();
				dragged.insert(id);
			}
		}
		self.pending.clear();
		self.held.retain(|&id, _| dragged.contains(&id));

		let forces = net_forces(reg.all(), &self.params);
		for (p, f) in reg.all_mut().iter_mut().zip(forces) {
			if dragged.contains(&p.id) {
				continue;
			}
			p.vel += f / p.mass * self.params.force_scale;
			p.vel *= self.params.damping;
			if let Some(vmax) = self.params.max_velocity {
				let v = p.vel.magnitude();
				if v > vmax {
					p.vel *= vmax / v;
				}
			}
			p.pos += p.vel;
		}
	}
}
