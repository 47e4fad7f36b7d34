mod renderer;

use std::path::PathBuf;
use std::time::Duration;

use log::{error, info, warn};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;

use protocol::snapshot::Snapshot;
use protocol::sock::{connect_retry, SockStream};
use protocol::Message;

use renderer::Renderer;

const WIN_W: u32 = 300;
const WIN_H: u32 = 300;
const CONNECT_ATTEMPTS: u32 = 100;

struct Args {
	sock: PathBuf,
	id: u64,
	charge: f32,
	origin: [i32; 2],
}

fn parse_args() -> Option<Args> {
	let args: Vec<String> = std::env::args().collect();
	if args.len() != 6 {
		return None;
	}
	let charge = match args[3].as_str() {
		"positive" => 1.,
		"negative" => -1.,
		_ => return None,
	};
	Some(Args {
		sock: PathBuf::from(&args[1]),
		id: args[2].parse().ok()?,
		charge,
		origin: [args[4].parse().ok()?, args[5].parse().ok()?],
	})
}

fn report(sock: &mut SockStream, id: u64, pos: [f32; 2]) -> bool {
	if let Err(e) = sock.send(&Message::PositionUpdate { id, pos }) {
		info!("controller unreachable: {}", e);
		return false;
	}
	true
}

fn main() {
	env_logger::init();
	let args = match parse_args() {
		Some(a) => a,
		None => {
			error!("usage: pwin <socket> <id> <positive|negative> <x> <y>");
			std::process::exit(1);
		}
	};
	let mut sock = match connect_retry(&args.sock, CONNECT_ATTEMPTS) {
		Ok(s) => s,
		Err(e) => {
			error!("cannot reach controller at {:?}: {}", args.sock, e);
			std::process::exit(1);
		}
	};
	if sock.send(&Message::Ready { id: args.id }).is_err() {
		error!("controller hung up before ready");
		std::process::exit(1);
	}

	let sdl_context = sdl2::init().unwrap();
	let video_subsystem = sdl_context.video().unwrap();
	let window = video_subsystem
		.window("mfs2d particle", WIN_W, WIN_H)
		.position(args.origin[0], args.origin[1])
		.build()
		.unwrap();
	let canvas = window.into_canvas().build().unwrap();
	let mut event_pump = sdl_context.event_pump().unwrap();
	let mut renderer = Renderer::new(canvas, args.id, args.charge);
	let mut latest: Option<Snapshot> = None;
	let mut dragging = false;

	'running: loop {
		for event in event_pump.poll_iter() {
			match event {
				Event::Quit { .. }
				| Event::KeyDown {
					keycode: Some(Keycode::Q),
					..
				} => break 'running,
				Event::MouseButtonDown {
					mouse_btn: MouseButton::Left,
					..
				} => dragging = true,
				Event::MouseButtonUp {
					mouse_btn: MouseButton::Left,
					..
				} => dragging = false,
				Event::MouseMotion { x, y, .. } => {
					if dragging {
						// shared space is the desktop itself
						let origin = renderer.origin();
						let pos = [
							(origin[0] + x) as f32,
							(origin[1] + y) as f32,
						];
						if !report(&mut sock, args.id, pos) {
							break 'running;
						}
					}
				}
				Event::Window {
					win_event: WindowEvent::Moved(x, y),
					..
				} => {
					let pos = [
						x as f32 + WIN_W as f32 / 2.,
						y as f32 + WIN_H as f32 / 2.,
					];
					if !report(&mut sock, args.id, pos) {
						break 'running;
					}
				}
				_ => {}
			}
		}

		// keep only the newest snapshot, older ones are stale
		match sock.recv() {
			Ok(msgs) => {
				for msg in msgs {
					match msg {
						Message::Snapshot(snap) => latest = Some(snap),
						other => {
							warn!("ignoring unexpected message: {:?}", other)
						}
					}
				}
			}
			Err(e) => {
				info!("controller gone: {}", e);
				break 'running;
			}
		}

		if let Some(snap) = &latest {
			renderer.draw(snap);
		}
		std::thread::sleep(Duration::from_millis(10));
	}
}
