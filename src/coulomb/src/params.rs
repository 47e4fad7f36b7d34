// tuned for visual stability, not physical correctness

#[derive(Clone, Debug)]
pub struct PhysicsParams {
	pub coulomb_k: f32,
	pub damping: f32,
	pub force_scale: f32,
	pub min_distance: f32,
	// off by default; damping alone bounds the default setup
	pub max_velocity: Option<f32>,
}

impl Default for PhysicsParams {
	fn default() -> Self {
		Self {
			coulomb_k: 1000.,
			damping: 0.99,
			force_scale: 0.01,
			min_distance: 50.,
			max_velocity: None,
		}
	}
}

impl PhysicsParams {
	pub fn with_coulomb_k(mut self, k: f32) -> Self {
		self.coulomb_k = k;
		self
	}

	pub fn with_damping(mut self, damping: f32) -> Self {
		self.damping = damping;
		self
	}

	pub fn with_force_scale(mut self, scale: f32) -> Self {
		self.force_scale = scale;
		self
	}

	pub fn with_min_distance(mut self, dist: f32) -> Self {
		self.min_distance = dist;
		self
	}

	pub fn with_max_velocity(mut self, vmax: f32) -> Self {
		self.max_velocity = Some(vmax);
		self
	}
}
