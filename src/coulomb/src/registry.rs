use log::info;
use protocol::snapshot::Snapshot;

use crate::particle::{Charge, Particle};
use crate::V2;

// authoritative particle collection, insertion order = z order
#[derive(Default)]
pub struct Registry {
	particles: Vec<Particle>,
	// monotonic, never reused, survives reset
	next_id: u64,
}

impl Registry {
	pub fn create(&mut self, charge: Charge, pos: V2) -> &Particle {
		let id = self.next_id;
		self.next_id += 1;
		self.particles.push(Particle::new(id, charge, pos));
		info!("created {} particle {}", charge.name(), id);
		self.particles.last().unwrap()
	}

	pub fn remove(&mut self, id: u64) -> bool {
		let before = self.particles.len();
		self.particles.retain(|p| p.id != id);
		let removed = self.particles.len() != before;
		if removed {
			info!("removed particle {}", id);
		}
		removed
	}

	pub fn clear(&mut self) {
		self.particles.clear();
	}

	pub fn find(&self, id: u64) -> Option<&Particle> {
		self.particles.iter().find(|p| p.id == id)
	}

	pub fn find_mut(&mut self, id: u64) -> Option<&mut Particle> {
		self.particles.iter_mut().find(|p| p.id == id)
	}

	pub fn all(&self) -> &[Particle] {
		&self.particles
	}

	pub fn all_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn count(&self, charge: Charge) -> usize {
		self.particles.iter().filter(|p| p.charge == charge).count()
	}

	pub fn snapshot(&self, timestamp: u64) -> Snapshot {
		Snapshot {
			timestamp,
			particles: self.particles.iter().map(Particle::snap).collect(),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn test_unique_ids() {
		let mut reg = Registry::default();
		let mut seen = HashSet::new();
		for n in 0..10_000 {
			let charge = if n % 2 == 0 {
				Charge::Positive
			} else {
				Charge::Negative
			};
			let id = reg.create(charge, V2::new(0., 0.)).id;
			assert!(seen.insert(id));
		}
		assert_eq!(reg.len(), 10_000);
	}

	#[test]
	fn test_ids_not_reused() {
		let mut reg = Registry::default();
		let a = reg.create(Charge::Positive, V2::zeros()).id;
		reg.remove(a);
		let b = reg.create(Charge::Positive, V2::zeros()).id;
		assert_ne!(a, b);
	}

	#[test]
	fn test_remove_idempotent() {
		let mut reg = Registry::default();
		let id = reg.create(Charge::Negative, V2::new(1., 2.)).id;
		reg.create(Charge::Positive, V2::new(3., 4.));
		assert!(reg.remove(id));
		let after_once: Vec<u64> = reg.all().iter().map(|p| p.id).collect();
		assert!(!reg.remove(id));
		let after_twice: Vec<u64> = reg.all().iter().map(|p| p.id).collect();
		assert_eq!(after_once, after_twice);
		assert_eq!(reg.len(), 1);
	}

	#[test]
	fn test_insertion_order() {
		let mut reg = Registry::default();
		let a = reg.create(Charge::Positive, V2::zeros()).id;
		let b = reg.create(Charge::Negative, V2::zeros()).id;
		let c = reg.create(Charge::Positive, V2::zeros()).id;
		reg.remove(b);
		let order: Vec<u64> = reg.all().iter().map(|p| p.id).collect();
		assert_eq!(order, vec![a, c]);
	}

	#[test]
	fn test_counts() {
		let mut reg = Registry::default();
		reg.create(Charge::Positive, V2::zeros());
		reg.create(Charge::Positive, V2::zeros());
		reg.create(Charge::Negative, V2::zeros());
		assert_eq!(reg.count(Charge::Positive), 2);
		assert_eq!(reg.count(Charge::Negative), 1);
	}

	#[test]
	fn test_snapshot_roundtrip() {
		let mut reg = Registry::default();
		reg.create(Charge::Positive, V2::new(100., 100.));
		let p = reg.create(Charge::Negative, V2::new(300., 100.)).id;
		reg.find_mut(p).unwrap().vel = V2::new(0.5, -0.25);
		let snap = reg.snapshot(17);
		assert_eq!(snap.timestamp, 17);
		assert_eq!(snap.particles.len(), 2);
		for (orig, sp) in reg.all().iter().zip(snap.particles.iter()) {
			assert_eq!(orig.id, sp.id);
			assert_eq!(orig.charge.value(), sp.charge);
			assert_eq!([orig.pos[0], orig.pos[1]], sp.pos);
			assert_eq!([orig.vel[0], orig.vel[1]], sp.vel);
		}
	}
}
