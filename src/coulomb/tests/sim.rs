use rand::prelude::*;

use coulomb::control::ControlMessage;
use coulomb::engine::Engine;
use coulomb::forces::net_forces;
use coulomb::params::PhysicsParams;
use coulomb::particle::Charge;
use coulomb::registry::Registry;
use coulomb::V2;
use protocol::Message;

// +1 at (100,100) and -1 at (300,100): raw pair force 1000/200^2 = 0.025,
// directed together
#[test]
fn test_two_charge_scenario() {
	let mut reg = Registry::default();
	let a = reg.create(Charge::Positive, V2::new(100., 100.)).id;
	let b = reg.create(Charge::Negative, V2::new(300., 100.)).id;
	let params = PhysicsParams::default();

	let fs = net_forces(reg.all(), &params);
	assert!((fs[0][0] - 0.025).abs() < 1e-6);
	assert!((fs[1][0] + 0.025).abs() < 1e-6);

	let mut engine = Engine::new(params);
	engine.step(&mut reg);
	let pa = reg.find(a).unwrap();
	// first-step velocity: force * force_scale, then damping
	assert!((pa.vel[0] - 0.025 * 0.01 * 0.99).abs() < 1e-7);
	assert!(pa.pos[0] > 100.);
	assert!(reg.find(b).unwrap().pos[0] < 300.);
}

#[test]
fn test_snapshot_wire_roundtrip() {
	let mut reg = Registry::default();
	reg.create(Charge::Positive, V2::new(100., 100.));
	reg.create(Charge::Negative, V2::new(300., 100.));
	let mut engine = Engine::new(PhysicsParams::default());
	engine.step(&mut reg);

	let snap = reg.snapshot(5);
	match Message::from_bytes(&Message::Snapshot(snap.clone()).to_bytes()) {
		Some(Message::Snapshot(back)) => {
			assert_eq!(back, snap);
			for (p, sp) in reg.all().iter().zip(back.particles.iter()) {
				assert_eq!(p.id, sp.id);
				assert_eq!(p.charge.value(), sp.charge);
				assert_eq!([p.pos[0], p.pos[1]], sp.pos);
				assert_eq!([p.vel[0], p.vel[1]], sp.vel);
			}
		}
		_ => panic!("snapshot lost on the wire"),
	}
}

#[test]
fn test_wire_position_update_applies_next_tick() {
	let mut reg = Registry::default();
	let a = reg.create(Charge::Positive, V2::new(100., 100.)).id;
	reg.create(Charge::Negative, V2::new(300., 100.));
	let mut engine = Engine::new(PhysicsParams::default());

	let wire = Message::PositionUpdate {
		id: a,
		pos: [500., 400.],
	};
	match Message::from_bytes(&wire.to_bytes()) {
		Some(Message::PositionUpdate { id, pos }) => {
			engine.apply(ControlMessage::MoveTo(id, pos))
		}
		_ => panic!("position update lost on the wire"),
	}
	engine.step(&mut reg);
	let p = reg.find(a).unwrap();
	assert_eq!(p.pos, V2::new(500., 400.));
	assert_eq!(p.vel, V2::zeros());
}

#[test]
fn test_crowded_field_stays_finite() {
	let mut rng = StdRng::seed_from_u64(42);
	let mut reg = Registry::default();
	for n in 0..100 {
		let charge = if n % 2 == 0 {
			Charge::Positive
		} else {
			Charge::Negative
		};
		let pos = V2::new(
			rng.gen_range(0.0..1600.),
			rng.gen_range(0.0..1000.),
		);
		reg.create(charge, pos);
	}
	let mut engine = Engine::new(PhysicsParams::default());
	for _ in 0..1000 {
		engine.step(&mut reg);
	}
	for p in reg.all() {
		assert!(p.pos[0].is_finite());
		assert!(p.pos[1].is_finite());
		assert!(p.vel.magnitude().is_finite());
	}
}
