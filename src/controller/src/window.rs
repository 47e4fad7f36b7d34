use std::path::PathBuf;
use std::process::{Child, Command};

use fnv::FnvHashMap;
use log::{info, warn};

use coulomb::particle::Charge;
use coulomb::V2;
use protocol::sock::{SockServer, SockStream};
use protocol::Message;

pub const WIN_W: u32 = 300;
pub const WIN_H: u32 = 300;
const GRID_OFFSET: i32 = 100;
const GRID_SPACING: i32 = 350;
const GRID_COLUMNS: i32 = 3;

struct WindowHandle {
	child: Child,
	// bound once the window reports ready
	stream: Option<SockStream>,
}

// one detached rendering context per particle
pub struct WindowManager {
	handles: FnvHashMap<u64, WindowHandle>,
	// connected but not yet ready
	pending: Vec<SockStream>,
	slot: i32,
	pwin_exe: PathBuf,
	sock_path: PathBuf,
}

impl WindowManager {
	pub fn new(sock_path: PathBuf) -> std::io::Result<Self> {
		// the window client is installed next to the controller
		let mut pwin_exe = std::env::current_exe()?;
		pwin_exe.set_file_name("pwin");
		Ok(Self {
			handles: FnvHashMap::default(),
			pending: Vec::new(),
			slot: 0,
			pwin_exe,
			sock_path,
		})
	}

	// window origin on the fixed grid, advancing the cursor
	pub fn next_origin(&mut self) -> [i32; 2] {
		let x = GRID_OFFSET + (self.slot % GRID_COLUMNS) * GRID_SPACING;
		let y = GRID_OFFSET + (self.slot / GRID_COLUMNS) * GRID_SPACING;
		self.slot += 1;
		[x, y]
	}

	pub fn center_of(origin: [i32; 2]) -> V2 {
		V2::new(
			origin[0] as f32 + WIN_W as f32 / 2.,
			origin[1] as f32 + WIN_H as f32 / 2.,
		)
	}

	pub fn spawn(
		&mut self,
		id: u64,
		charge: Charge,
		origin: [i32; 2],
	) -> std::io::Result<()> {
		let child = Command::new(&self.pwin_exe)
			.arg(&self.sock_path)
			.arg(id.to_string())
			.arg(charge.name())
			.arg(origin[0].to_string())
			.arg(origin[1].to_string())
			.spawn()?;
		info!("opened window for particle {} at {:?}", id, origin);
		self.handles.insert(
			id,
			WindowHandle {
				child,
				stream: None,
			},
		);
		Ok(())
	}

	pub fn absorb(&mut self, server: &mut SockServer) {
		self.pending.extend(server.accept());
	}

	// drain every connection; returns inbound messages and the ids of
	// windows whose channel died (liveness signal, same path as polling)
	pub fn poll_messages(&mut self) -> (Vec<Message>, Vec<u64>) {
		let mut msgs = Vec::new();
		let mut dead = Vec::new();

		let mut still_pending = Vec::new();
		for mut stream in std::mem::take(&mut self.pending) {
			let inbound = match stream.recv() {
				Ok(m) => m,
				Err(e) => {
					warn!("unbound window connection dropped: {}", e);
					continue;
				}
			};
			let mut ready_id = None;
			for msg in inbound {
				match msg {
					Message::Ready { id } if ready_id.is_none() => {
						ready_id = Some(id)
					}
					msg => msgs.push(msg),
				}
			}
			match ready_id {
				Some(id) => match self.handles.get_mut(&id) {
					Some(handle) if handle.stream.is_none() => {
						info!("particle window {} ready", id);
						handle.stream = Some(stream);
					}
					Some(_) => warn!("duplicate ready from window {}", id),
					None => warn!("ready from unknown window {}", id),
				},
				None => still_pending.push(stream),
			}
		}
		self.pending = still_pending;

		for (&id, handle) in self.handles.iter_mut() {
			if let Some(stream) = handle.stream.as_mut() {
				match stream.recv() {
					Ok(inbound) => msgs.extend(inbound),
					Err(e) => {
						warn!("window {} channel closed: {}", id, e);
						dead.push(id);
					}
				}
			}
		}
		(msgs, dead)
	}

	// coarse liveness fallback for windows that never connected
	pub fn poll_children(&mut self) -> Vec<u64> {
		let mut exited = Vec::new();
		for (&id, handle) in self.handles.iter_mut() {
			match handle.child.try_wait() {
				Ok(Some(_)) => exited.push(id),
				Ok(None) => {}
				Err(e) => {
					warn!("liveness check for window {} failed: {}", id, e);
					exited.push(id);
				}
			}
		}
		exited
	}

	// idempotent; also the proactive close used by explicit removal
	pub fn close(&mut self, id: u64) {
		if let Some(mut handle) = self.handles.remove(&id) {
			let _ = handle.child.kill();
			let _ = handle.child.wait();
			info!("closed window for particle {}", id);
		}
	}

	pub fn reset(&mut self) {
		let ids: Vec<u64> = self.handles.keys().copied().collect();
		for id in ids {
			self.close(id);
		}
		self.pending.clear();
		self.slot = 0;
	}

	pub fn bound_streams(
		&mut self,
	) -> impl Iterator<Item = (u64, &mut SockStream)> {
		self.handles
			.iter_mut()
			.filter_map(|(&id, h)| h.stream.as_mut().map(|s| (id, s)))
	}
}
