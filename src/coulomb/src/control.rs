// intents applied by the engine on its next step

#[derive(Clone, Debug)]
pub enum ControlMessage {
	// sustained drag, held until UncontrolParticle
	ControlParticle(u64, [f32; 2]),
	UncontrolParticle(u64),
	// one-shot move from a particle window, lasts a single tick
	MoveTo(u64, [f32; 2]),
}
