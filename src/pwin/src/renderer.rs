use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use protocol::snapshot::{SnapParticle, Snapshot};

const RADIUS: i16 = 30;
const GLOW_RADIUS: i16 = 35;
const ARROW_SIZE: f32 = 8.;
// fraction of the window a field line may span
const LINE_CAP: f32 = 0.4;

const POSITIVE: Color = Color::RGB(255, 107, 107);
const NEGATIVE: Color = Color::RGB(78, 205, 196);
const BACKGROUND: Color = Color::RGB(30, 60, 114);

fn charge_color(charge: f32) -> Color {
	if charge > 0. {
		POSITIVE
	} else {
		NEGATIVE
	}
}

pub struct Renderer {
	canvas: Canvas<Window>,
	id: u64,
	charge: f32,
	last_count: usize,
}

impl Renderer {
	pub fn new(mut canvas: Canvas<Window>, id: u64, charge: f32) -> Self {
		canvas.set_draw_color(BACKGROUND);
		canvas.clear();
		canvas.present();
		Self {
			canvas,
			id,
			charge,
			last_count: 0,
		}
	}

	pub fn origin(&self) -> [i32; 2] {
		let (x, y) = self.canvas.window().position();
		[x, y]
	}

	pub fn size(&self) -> [u32; 2] {
		let (w, h) = self.canvas.window().size();
		[w, h]
	}

	pub fn draw(&mut self, snap: &Snapshot) {
		self.canvas.set_draw_color(BACKGROUND);
		self.canvas.clear();
		let [w, h] = self.size();
		let cx = w as f32 / 2.;
		let cy = h as f32 / 2.;

		if let Some(own) = snap.find(self.id) {
			for other in &snap.particles {
				if other.id != self.id {
					self.field_line(cx, cy, own, other, w.min(h));
				}
			}
		}

		let color = charge_color(self.charge);
		let glow = Color::RGBA(color.r, color.g, color.b, 80);
		let _ = self
			.canvas
			.filled_circle(cx as i16, cy as i16, GLOW_RADIUS, glow);
		let _ = self
			.canvas
			.filled_circle(cx as i16, cy as i16, RADIUS, color);
		let symbol = if self.charge > 0. { "+" } else { "-" };
		let _ = self.canvas.string(
			cx as i16 - 4,
			cy as i16 - 4,
			symbol,
			Color::RGB(255, 255, 255),
		);
		self.canvas.present();

		if snap.particles.len() != self.last_count {
			self.last_count = snap.particles.len();
			let title = format!(
				"mfs2d particle {} | {} particles | drag to move",
				symbol, self.last_count,
			);
			let _ = self.canvas.window_mut().set_title(&title);
		}
	}

	fn field_line(
		&mut self,
		cx: f32,
		cy: f32,
		own: &SnapParticle,
		other: &SnapParticle,
		span: u32,
	) {
		let dx = other.pos[0] - own.pos[0];
		let dy = other.pos[1] - own.pos[1];
		let dist = (dx * dx + dy * dy).sqrt();
		if dist <= 0. {
			return;
		}
		// attraction teal, repulsion red
		let base = if other.charge * own.charge < 0. {
			NEGATIVE
		} else {
			POSITIVE
		};
		let alpha = (1000. / dist).clamp(0.1, 0.8);
		let color = Color::RGBA(base.r, base.g, base.b, (alpha * 255.) as u8);

		let len = dist.min(span as f32 * LINE_CAP);
		let ex = cx + dx / dist * len;
		let ey = cy + dy / dist * len;
		let _ = self.canvas.aa_line(
			cx as i16,
			cy as i16,
			ex as i16,
			ey as i16,
			color,
		);
		let angle = dy.atan2(dx);
		for da in [-std::f32::consts::FRAC_PI_6, std::f32::consts::FRAC_PI_6]
		{
			let ax = ex - ARROW_SIZE * (angle + da).cos();
			let ay = ey - ARROW_SIZE * (angle + da).sin();
			let _ = self.canvas.aa_line(
				ex as i16,
				ey as i16,
				ax as i16,
				ay as i16,
				color,
			);
		}
	}
}
