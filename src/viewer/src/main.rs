mod renderer;

use std::time::{Duration, SystemTime};

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;

use coulomb::control::ControlMessage;
use coulomb::engine::Engine;
use coulomb::params::PhysicsParams;
use coulomb::particle::Charge;
use coulomb::registry::Registry;
use coulomb::V2;

use renderer::Renderer;

const WIN_W: u32 = 1600;
const WIN_H: u32 = 1000;
const TICK_US: u64 = 16_000;
const PICK_RADIUS: f32 = 30.;

// nearest particle within the pick radius
fn select_particle(registry: &Registry, c: V2) -> Option<u64> {
	let mut min_dist = f32::INFINITY;
	let mut min_id = 0;
	for p in registry.all() {
		let dist = (c - p.pos).magnitude();
		if dist < min_dist {
			min_id = p.id;
			min_dist = dist;
		}
	}
	if min_dist < PICK_RADIUS {
		Some(min_id)
	} else {
		None
	}
}

fn main() {
	env_logger::init();
	let mut registry = Registry::default();
	let mut engine = Engine::new(PhysicsParams::default());

	let sdl_context = sdl2::init().unwrap();
	let video_subsystem = sdl_context.video().unwrap();
	let window = video_subsystem
		.window("mfs2d viewer", WIN_W, WIN_H)
		.position_centered()
		.build()
		.unwrap();
	let canvas = window.into_canvas().build().unwrap();
	let mut event_pump = sdl_context.event_pump().unwrap();
	let mut renderer = Renderer::new(canvas);

	let mut drag_id: Option<u64> = None;
	let mut last_cursor = V2::new(0., 0.);
	info!("single-surface mode, P/N add particles at the cursor");
	'running: loop {
		let tick_start = SystemTime::now();

		for event in event_pump.poll_iter() {
			match event {
				Event::Quit { .. }
				| Event::KeyDown {
					keycode: Some(Keycode::Q),
					..
				} => break 'running,
				Event::KeyDown {
					keycode: Some(Keycode::P),
					..
				} => {
					registry.create(Charge::Positive, last_cursor);
				}
				Event::KeyDown {
					keycode: Some(Keycode::N),
					..
				} => {
					registry.create(Charge::Negative, last_cursor);
				}
				Event::KeyDown {
					keycode: Some(Keycode::R),
					..
				} => {
					info!("simulation reset");
					registry.clear();
				}
				Event::MouseButtonDown {
					mouse_btn: MouseButton::Left,
					x,
					y,
					..
				} => {
					let c = V2::new(x as f32, y as f32);
					if let Some(id) = select_particle(&registry, c) {
						drag_id = Some(id);
						engine.apply(ControlMessage::ControlParticle(
							id,
							[c[0], c[1]],
						));
					}
				}
				Event::MouseButtonUp {
					mouse_btn: MouseButton::Left,
					..
				} => {
					if let Some(id) = drag_id.take() {
						engine.apply(ControlMessage::UncontrolParticle(id));
					}
				}
				Event::MouseButtonDown {
					mouse_btn: MouseButton::Right,
					x,
					y,
					..
				} => {
					let c = V2::new(x as f32, y as f32);
					if let Some(id) = select_particle(&registry, c) {
						registry.remove(id);
					}
				}
				Event::MouseMotion { x, y, .. } => {
					last_cursor = V2::new(x as f32, y as f32);
					if let Some(id) = drag_id {
						engine.apply(ControlMessage::ControlParticle(
							id,
							[x as f32, y as f32],
						));
					}
				}
				_ => {}
			}
		}

		engine.step(&mut registry);
		renderer.draw(registry.all());
		renderer.set_title(&format!(
			"mfs2d viewer | {} particles (+{} / -{})",
			registry.len(),
			registry.count(Charge::Positive),
			registry.count(Charge::Negative),
		));

		let elapsed = SystemTime::now()
			.duration_since(tick_start)
			.unwrap()
			.as_micros() as u64;
		if elapsed < TICK_US {
			std::thread::sleep(Duration::from_micros(TICK_US - elapsed));
		}
	}
}
