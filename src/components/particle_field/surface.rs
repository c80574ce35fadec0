//! Render targets the particle field can paint onto.
//!
//! All coordinates handed to a [`RenderTarget`] are CSS pixels; mapping onto
//! the device pixel grid is the target's business.

use std::f64::consts::PI;

use log::warn;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::FieldError;
use super::theme::Color;

/// Viewport measurements supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
	/// Device pixels per CSS pixel.
	pub device_pixel_ratio: f64,
}

impl Viewport {
	pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
		let device_pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
			device_pixel_ratio
		} else {
			1.0
		};
		Self {
			width: width.max(0.0),
			height: height.max(0.0),
			device_pixel_ratio,
		}
	}

	/// Backing store size in device pixels.
	pub fn device_size(&self) -> (u32, u32) {
		(
			(self.width * self.device_pixel_ratio).round() as u32,
			(self.height * self.device_pixel_ratio).round() as u32,
		)
	}
}

/// A 2D drawable surface.
pub trait RenderTarget {
	/// Resize the surface to cover `viewport`, scaling for its device pixel ratio.
	fn resize(&mut self, viewport: Viewport) -> Result<(), FieldError>;

	/// Wipe the whole surface.
	fn clear(&mut self);

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<(), FieldError>;

	fn stroke_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		width: f64,
		color: Color,
	) -> Result<(), FieldError>;
}

/// An HTML canvas with its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
		Self { canvas, ctx }
	}
}

impl RenderTarget for CanvasSurface {
	fn resize(&mut self, viewport: Viewport) -> Result<(), FieldError> {
		let (w, h) = viewport.device_size();
		// Setting the size resets the context transform, so scale afterwards.
		self.canvas.set_width(w);
		self.canvas.set_height(h);

		let style = self.canvas.style();
		style
			.set_property("width", &format!("{}px", viewport.width))
			.map_err(FieldError::surface)?;
		style
			.set_property("height", &format!("{}px", viewport.height))
			.map_err(FieldError::surface)?;

		let dpr = viewport.device_pixel_ratio;
		self.ctx
			.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
			.map_err(FieldError::surface)
	}

	fn clear(&mut self) {
		// Clear in device pixels regardless of the current transform. If the
		// reset fails the dpr scale (>= 1) still stretches the rect over the canvas.
		self.ctx.save();
		if let Err(e) = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0) {
			warn!("particle field: {}", FieldError::surface(e));
		}
		self.ctx.clear_rect(
			0.0,
			0.0,
			self.canvas.width() as f64,
			self.canvas.height() as f64,
		);
		self.ctx.restore();
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<(), FieldError> {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.begin_path();
		self.ctx
			.arc(x, y, radius, 0.0, PI * 2.0)
			.map_err(FieldError::draw)?;
		self.ctx.fill();
		Ok(())
	}

	fn stroke_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		width: f64,
		color: Color,
	) -> Result<(), FieldError> {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn viewport_sanitizes_pixel_ratio() {
		assert_eq!(Viewport::new(800.0, 600.0, 0.0).device_pixel_ratio, 1.0);
		assert_eq!(Viewport::new(800.0, 600.0, f64::NAN).device_pixel_ratio, 1.0);
		assert_eq!(Viewport::new(800.0, 600.0, 2.0).device_size(), (1600, 1200));
		assert_eq!(Viewport::new(375.0, 667.0, 3.0).device_size(), (1125, 2001));
	}
}
