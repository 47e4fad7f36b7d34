use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use coulomb::particle::{Charge, Particle};

const RADIUS: i16 = 30;
const GLOW_RADIUS: i16 = 35;

const POSITIVE: Color = Color::RGB(255, 107, 107);
const NEGATIVE: Color = Color::RGB(78, 205, 196);
const BACKGROUND: Color = Color::RGB(30, 60, 114);

fn charge_color(charge: Charge) -> Color {
	match charge {
		Charge::Positive => POSITIVE,
		Charge::Negative => NEGATIVE,
	}
}

pub struct Renderer {
	canvas: Canvas<Window>,
}

impl Renderer {
	pub fn new(mut canvas: Canvas<Window>) -> Self {
		canvas.set_draw_color(BACKGROUND);
		canvas.clear();
		canvas.present();
		Self { canvas }
	}

	pub fn set_title(&mut self, title: &str) {
		let _ = self.canvas.window_mut().set_title(title);
	}

	pub fn draw(&mut self, particles: &[Particle]) {
		self.canvas.set_draw_color(BACKGROUND);
		self.canvas.clear();
		for (i, p) in particles.iter().enumerate() {
			for q in particles.iter().skip(i + 1) {
				self.field_line(p, q);
			}
		}
		for p in particles {
			let color = charge_color(p.charge);
			let x = p.pos[0] as i16;
			let y = p.pos[1] as i16;
			let glow = Color::RGBA(color.r, color.g, color.b, 80);
			let _ = self.canvas.filled_circle(x, y, GLOW_RADIUS, glow);
			let _ = self.canvas.filled_circle(x, y, RADIUS, color);
			let symbol = match p.charge {
				Charge::Positive => "+",
				Charge::Negative => "-",
			};
			let _ = self.canvas.string(
				x - 4,
				y - 4,
				symbol,
				Color::RGB(255, 255, 255),
			);
		}
		self.canvas.present();
	}

	fn field_line(&mut self, p: &Particle, q: &Particle) {
		let d = q.pos - p.pos;
		let dist = d.magnitude();
		if dist <= 0. {
			return;
		}
		// attraction teal, repulsion red
		let base = if p.charge != q.charge {
			NEGATIVE
		} else {
			POSITIVE
		};
		let alpha = (1000. / dist).clamp(0.1, 0.8);
		let color = Color::RGBA(base.r, base.g, base.b, (alpha * 255.) as u8);
		let _ = self.canvas.aa_line(
			p.pos[0] as i16,
			p.pos[1] as i16,
			q.pos[0] as i16,
			q.pos[1] as i16,
			color,
		);
	}
}
