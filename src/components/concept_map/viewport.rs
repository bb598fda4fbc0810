use super::layout::Position;

pub const ZOOM_MIN: f64 = 0.3;
pub const ZOOM_MAX: f64 = 2.0;
/// Wheel ticks nudge zoom by this much.
pub const WHEEL_ZOOM_STEP: f64 = 0.1;
/// Toolbar buttons take bigger steps.
pub const BUTTON_ZOOM_STEP: f64 = 0.2;

const DEFAULT_ZOOM: f64 = 0.8;
const DEFAULT_PAN: (f64, f64) = (50.0, 100.0);

/// Pan offset and zoom factor mapping layout space onto the canvas.
///
/// screen = pan + zoom * layout, origin at the canvas top-left. Pan is
/// unconstrained; zoom is clamped to `[ZOOM_MIN, ZOOM_MAX]`. Drag deltas
/// are only honored between `begin_drag` and `end_drag`, so stale move
/// events arriving afterward are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	pub pan_x: f64,
	pub pan_y: f64,
	pub zoom: f64,
	drag_anchor: Option<(f64, f64)>,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			pan_x: DEFAULT_PAN.0,
			pan_y: DEFAULT_PAN.1,
			zoom: DEFAULT_ZOOM,
			drag_anchor: None,
		}
	}
}

impl Viewport {
	pub fn is_dragging(&self) -> bool {
		self.drag_anchor.is_some()
	}

	/// Starts a background drag. A second press while already dragging
	/// keeps the original anchor.
	pub fn begin_drag(&mut self, pointer_x: f64, pointer_y: f64) {
		if self.drag_anchor.is_none() {
			self.drag_anchor = Some((pointer_x - self.pan_x, pointer_y - self.pan_y));
		}
	}

	/// Applies a pointer move to the pan. No-op while idle.
	pub fn continue_drag(&mut self, pointer_x: f64, pointer_y: f64) {
		if let Some((ax, ay)) = self.drag_anchor {
			self.pan_x = pointer_x - ax;
			self.pan_y = pointer_y - ay;
		}
	}

	/// Back to idle, unconditionally. Also called when the pointer leaves
	/// the canvas so the drag cannot stick.
	pub fn end_drag(&mut self) {
		self.drag_anchor = None;
	}

	/// Additive zoom, clamped. Callable at any time, dragging or not.
	pub fn zoom_by(&mut self, delta: f64) {
		self.zoom = (self.zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);
	}

	/// Default pan/zoom; cancels an in-progress drag.
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	/// Inverse of the view transform, for hit testing.
	pub fn screen_to_layout(&self, screen_x: f64, screen_y: f64) -> Position {
		Position {
			x: (screen_x - self.pan_x) / self.zoom,
			y: (screen_y - self.pan_y) / self.zoom,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn drag_applies_delta_and_ignores_stale_moves() {
		let mut vp = Viewport::default();
		let (px, py) = (vp.pan_x, vp.pan_y);
		vp.begin_drag(100.0, 100.0);
		vp.continue_drag(150.0, 120.0);
		vp.end_drag();
		assert_eq!((vp.pan_x, vp.pan_y), (px + 50.0, py + 20.0));
		// Stale event after end_drag must not move the pan.
		vp.continue_drag(999.0, 999.0);
		assert_eq!((vp.pan_x, vp.pan_y), (px + 50.0, py + 20.0));
	}

	#[test]
	fn continue_without_begin_is_a_no_op() {
		let mut vp = Viewport::default();
		let before = vp.clone();
		vp.continue_drag(500.0, 500.0);
		assert_eq!(vp, before);
	}

	#[test]
	fn second_begin_keeps_the_anchor() {
		let mut vp = Viewport::default();
		vp.begin_drag(10.0, 10.0);
		vp.begin_drag(400.0, 400.0);
		vp.continue_drag(20.0, 10.0);
		assert_eq!(vp.pan_x, Viewport::default().pan_x + 10.0);
	}

	#[test]
	fn zoom_converges_to_the_clamp_bounds() {
		let mut vp = Viewport::default();
		for _ in 0..50 {
			vp.zoom_by(BUTTON_ZOOM_STEP);
		}
		assert_eq!(vp.zoom, ZOOM_MAX);
		for _ in 0..50 {
			vp.zoom_by(-BUTTON_ZOOM_STEP);
		}
		assert_eq!(vp.zoom, ZOOM_MIN);
	}

	#[test]
	fn zoom_works_mid_drag() {
		let mut vp = Viewport::default();
		vp.begin_drag(0.0, 0.0);
		vp.zoom_by(WHEEL_ZOOM_STEP);
		assert!(vp.is_dragging());
		assert_eq!(vp.zoom, 0.9);
	}

	#[test]
	fn reset_restores_defaults_and_cancels_drag() {
		let mut vp = Viewport::default();
		vp.begin_drag(0.0, 0.0);
		vp.continue_drag(300.0, 300.0);
		vp.zoom_by(1.0);
		vp.reset();
		assert_eq!(vp, Viewport::default());
		assert!(!vp.is_dragging());
	}

	#[test]
	fn screen_to_layout_inverts_the_transform() {
		let mut vp = Viewport::default();
		vp.begin_drag(0.0, 0.0);
		vp.continue_drag(30.0, 40.0);
		vp.end_drag();
		let p = vp.screen_to_layout(vp.pan_x + vp.zoom * 200.0, vp.pan_y + vp.zoom * 120.0);
		assert!((p.x - 200.0).abs() < 1e-9);
		assert!((p.y - 120.0).abs() < 1e-9);
	}
}
