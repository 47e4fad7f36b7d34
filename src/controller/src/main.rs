mod broadcast;
mod window;

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use log::{error, info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;

use coulomb::control::ControlMessage;
use coulomb::engine::Engine;
use coulomb::params::PhysicsParams;
use coulomb::particle::Charge;
use coulomb::registry::Registry;
use protocol::sock::SockServer;
use protocol::Message;

use window::WindowManager;

const TICK_US: u64 = 16_000;
// window liveness poll, coarser than the tick
const POLL_TICKS: u64 = 60;
const PANEL_W: u32 = 480;
const PANEL_H: u32 = 160;
// panel mini-map scale, desktop space to panel space
const PANEL_SCALE: f32 = 0.125;

fn main() {
	env_logger::init();
	let sock_path = std::env::args()
		.nth(1)
		.unwrap_or_else(|| protocol::DEFAULT_SOCK.to_string());
	if let Err(e) = run(Path::new(&sock_path)) {
		error!("controller failed: {}", e);
		std::process::exit(1);
	}
}

fn create_particle(
	charge: Charge,
	registry: &mut Registry,
	windows: &mut WindowManager,
) {
	let origin = windows.next_origin();
	let id = registry.create(charge, WindowManager::center_of(origin)).id;
	if let Err(e) = windows.spawn(id, charge, origin) {
		warn!("failed to open particle window: {}", e);
		registry.remove(id);
	}
}

fn run(sock_path: &Path) -> std::io::Result<()> {
	let mut server = SockServer::bind(sock_path)?;
	let mut windows = WindowManager::new(PathBuf::from(sock_path))?;
	let mut registry = Registry::default();
	let mut engine = Engine::new(PhysicsParams::default());

	let sdl_context = sdl2::init().unwrap();
	let video_subsystem = sdl_context.video().unwrap();
	let sdl_window = video_subsystem
		.window("mfs2d", PANEL_W, PANEL_H)
		.position(20, 20)
		.build()
		.unwrap();
	let mut canvas = sdl_window.into_canvas().build().unwrap();
	let mut event_pump = sdl_context.event_pump().unwrap();

	info!("controller listening on {:?}", sock_path);
	let epoch = SystemTime::now();
	let mut tick: u64 = 0;
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
				} => create_particle(
					Charge::Positive,
					&mut registry,
					&mut windows,
				),
				Event::KeyDown {
					keycode: Some(Keycode::N),
					..
				} => create_particle(
					Charge::Negative,
					&mut registry,
					&mut windows,
				),
				Event::KeyDown {
					keycode: Some(Keycode::R),
					..
				} => {
					info!("simulation reset");
					windows.reset();
					registry.clear();
				}
				_ => {}
			}
		}

		windows.absorb(&mut server);
		let (msgs, mut dead) = windows.poll_messages();
		for msg in msgs {
			match msg {
				Message::PositionUpdate { id, pos } => {
					engine.apply(ControlMessage::MoveTo(id, pos))
				}
				other => warn!("ignoring unexpected message: {:?}", other),
			}
		}

		tick += 1;
		if tick % POLL_TICKS == 0 {
			dead.extend(windows.poll_children());
		}
		for id in dead {
			windows.close(id);
			registry.remove(id);
		}

		engine.step(&mut registry);

		let timestamp = SystemTime::now()
			.duration_since(epoch)
			.unwrap()
			.as_millis() as u64;
		let failed =
			broadcast::broadcast(registry.snapshot(timestamp), &mut windows);
		for id in failed {
			windows.close(id);
			registry.remove(id);
		}

		draw_panel(&mut canvas, &registry);

		let elapsed = SystemTime::now()
			.duration_since(tick_start)
			.unwrap()
			.as_micros() as u64;
		if elapsed < TICK_US {
			std::thread::sleep(Duration::from_micros(TICK_US - elapsed));
		}
	}
	windows.reset();
	Ok(())
}

// mini-map of the desktop-space field plus counters in the title
fn draw_panel(
	canvas: &mut sdl2::render::Canvas<sdl2::video::Window>,
	registry: &Registry,
) {
	canvas.set_draw_color(Color::RGB(102, 126, 234));
	canvas.clear();
	for p in registry.all() {
		let color = match p.charge {
			Charge::Positive => Color::RGB(255, 107, 107),
			Charge::Negative => Color::RGB(78, 205, 196),
		};
		canvas.set_draw_color(color);
		let x = (p.pos[0] * PANEL_SCALE) as i32 - 3;
		let y = (p.pos[1] * PANEL_SCALE) as i32 - 3;
		let _ = canvas.fill_rect(Rect::new(x, y, 6, 6));
	}
	canvas.present();
	let title = format!(
		"mfs2d | {} particles (+{} / -{}) | P/N add, R reset, Q quit",
		registry.len(),
		registry.count(Charge::Positive),
		registry.count(Charge::Negative),
	);
	let _ = canvas.window_mut().set_title(&title);
}
