use std::io::{ErrorKind, Read, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;

use crate::Message;

// u32 le length prefix + bincode payload
#[derive(Default)]
pub struct FrameBuf {
	buf: Vec<u8>,
}

impl FrameBuf {
	pub fn push(&mut self, bytes: &[u8]) {
		self.buf.extend_from_slice(bytes);
	}

	pub fn next_frame(&mut self) -> Option<Vec<u8>> {
		if self.buf.len() < 4 {
			return None;
		}
		let len =
			u32::from_le_bytes(self.buf[..4].try_into().unwrap()) as usize;
		if self.buf.len() < 4 + len {
			return None;
		}
		let frame = self.buf[4..4 + len].to_vec();
		self.buf.drain(..4 + len);
		Some(frame)
	}
}

pub struct SockStream {
	stream: UnixStream,
	frames: FrameBuf,
	rbuf: Vec<u8>,
}

impl SockStream {
	pub fn new(stream: UnixStream) -> std::io::Result<Self> {
		stream.set_nonblocking(true)?;
		Ok(Self {
			stream,
			frames: FrameBuf::default(),
			rbuf: vec![0u8; 65536],
		})
	}

	pub fn connect(path: &Path) -> std::io::Result<Self> {
		Self::new(UnixStream::connect(path)?)
	}

	pub fn send(&mut self, msg: &Message) -> std::io::Result<()> {
		let payload = msg.to_bytes();
		self.stream.write_all(&(payload.len() as u32).to_le_bytes())?;
		self.stream.write_all(&payload)
	}

	// drain everything currently readable; Err means the peer is gone
	pub fn recv(&mut self) -> std::io::Result<Vec<Message>> {
		loop {
			match self.stream.read(&mut self.rbuf) {
				Ok(0) => {
					return Err(ErrorKind::ConnectionAborted.into());
				}
				Ok(n) => self.frames.push(&self.rbuf[..n]),
				Err(e) if e.kind() == ErrorKind::WouldBlock => break,
				Err(e) => return Err(e),
			}
		}
		let mut msgs = Vec::new();
		while let Some(frame) = self.frames.next_frame() {
			match Message::from_bytes(&frame) {
				Some(msg) => msgs.push(msg),
				None => {
					warn!("dropping undecodable frame ({} bytes)", frame.len())
				}
			}
		}
		Ok(msgs)
	}
}

pub fn connect_retry(
	path: &Path,
	attempts: u32,
) -> std::io::Result<SockStream> {
	let mut last = ErrorKind::NotFound.into();
	for _ in 0..attempts {
		match SockStream::connect(path) {
			Ok(s) => return Ok(s),
			Err(e) => last = e,
		}
		std::thread::sleep(Duration::from_millis(50));
	}
	Err(last)
}

pub struct SockServer {
	listener: UnixListener,
	path: PathBuf,
}

impl SockServer {
	pub fn bind(path: &Path) -> std::io::Result<Self> {
		// stale socket from a previous run
		let _ = std::fs::remove_file(path);
		let listener = UnixListener::bind(path)?;
		listener.set_nonblocking(true)?;
		Ok(Self {
			listener,
			path: path.to_path_buf(),
		})
	}

	// all connections that arrived since the last call
	pub fn accept(&mut self) -> Vec<SockStream> {
		let mut streams = Vec::new();
		loop {
			match self.listener.accept() {
				Ok((stream, _)) => match SockStream::new(stream) {
					Ok(s) => streams.push(s),
					Err(e) => warn!("client stream setup failed: {}", e),
				},
				Err(e) if e.kind() == ErrorKind::WouldBlock => break,
				Err(e) => {
					warn!("accept failed: {}", e);
					break;
				}
			}
		}
		streams
	}
}

impl Drop for SockServer {
	fn drop(&mut self) {
		let _ = std::fs::remove_file(&self.path);
	}
}
