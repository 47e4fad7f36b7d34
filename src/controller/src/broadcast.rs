use log::warn;

use protocol::snapshot::Snapshot;
use protocol::Message;

use crate::window::WindowManager;

// at most one send per live window per tick, no queuing, no retry;
// a failed send is a liveness signal for the caller to act on
pub fn broadcast(snap: Snapshot, windows: &mut WindowManager) -> Vec<u64> {
	let msg = Message::Snapshot(snap);
	let mut dead = Vec::new();
	for (id, stream) in windows.bound_streams() {
		if let Err(e) = stream.send(&msg) {
			warn!("snapshot send to window {} failed: {}", id, e);
			dead.push(id);
		}
	}
	dead
}
