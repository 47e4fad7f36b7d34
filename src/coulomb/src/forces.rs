use crate::params::PhysicsParams;
use crate::particle::Particle;
use crate::V2;

// net coulomb force on each particle, equal and opposite per pair
pub fn net_forces(particles: &[Particle], params: &PhysicsParams) -> Vec<V2> {
	let n = particles.len();
	let mut out = vec![V2::zeros(); n];
	for i in 0..n {
		let pi = &particles[i];
		for j in (i + 1)..n {
			let pj = &particles[j];
			let d = pj.pos - pi.pos;
			let r = d.magnitude();
			// clamp, not a physical law: coincident particles exert nothing
			if r < params.min_distance {
				continue;
			}
			let mag = params.coulomb_k
				* pi.charge.value()
				* pj.charge.value()
				/ (r * r);
			// mag > 0 pushes the pair apart, mag < 0 pulls it together
			let f = d / r * mag;
			out[i] -= f;
			out[j] += f;
		}
	}
	out
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::particle::Charge;

	fn pair(a: Charge, b: Charge, dist: f32) -> Vec<Particle> {
		vec![
			Particle::new(0, a, V2::new(100., 100.)),
			Particle::new(1, b, V2::new(100. + dist, 100.)),
		]
	}

	#[test]
	fn test_like_charges_repel() {
		let params = PhysicsParams::default();
		for charge in [Charge::Positive, Charge::Negative] {
			let fs = net_forces(&pair(charge, charge, 200.), &params);
			assert!(fs[0][0] < 0.);
			assert!(fs[1][0] > 0.);
			assert_eq!(fs[0], -fs[1]);
		}
	}

	#[test]
	fn test_opposite_charges_attract() {
		let params = PhysicsParams::default();
		let fs = net_forces(
			&pair(Charge::Positive, Charge::Negative, 200.),
			&params,
		);
		assert!(fs[0][0] > 0.);
		assert!(fs[1][0] < 0.);
		assert_eq!(fs[0], -fs[1]);
	}

	#[test]
	fn test_attraction_magnitude() {
		// k q1 q2 / r^2 = 1000 * 1 * -1 / 200^2 = -0.025
		let params = PhysicsParams::default();
		let fs = net_forces(
			&pair(Charge::Positive, Charge::Negative, 200.),
			&params,
		);
		assert!((fs[0][0] - 0.025).abs() < 1e-6);
		assert!(fs[0][1].abs() < 1e-6);
	}

	#[test]
	fn test_below_min_distance_is_zero() {
		let params = PhysicsParams::default();
		let fs = net_forces(
			&pair(Charge::Positive, Charge::Positive, 49.9),
			&params,
		);
		assert_eq!(fs[0], V2::zeros());
		assert_eq!(fs[1], V2::zeros());
	}

	#[test]
	fn test_superposition() {
		// middle particle between two equal charges feels nothing
		let params = PhysicsParams::default();
		let ps = vec![
			Particle::new(0, Charge::Positive, V2::new(0., 0.)),
			Particle::new(1, Charge::Negative, V2::new(200., 0.)),
			Particle::new(2, Charge::Positive, V2::new(400., 0.)),
		];
		let fs = net_forces(&ps, &params);
		assert!(fs[1].magnitude() < 1e-6);
	}

	#[test]
	fn test_empty_and_single() {
		let params = PhysicsParams::default();
		assert!(net_forces(&[], &params).is_empty());
		let one = vec![Particle::new(0, Charge::Positive, V2::zeros())];
		assert_eq!(net_forces(&one, &params), vec![V2::zeros()]);
	}
}
