//! Pan/zoom transform between screen and simulation space.

/// Zoom range enforced after every camera mutation.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;

/// The transform applied to graph space before drawing:
/// `screen = graph * zoom + pan`.
#[derive(Clone, Debug)]
pub struct Camera {
	pub x: f64,
	pub y: f64,
	pub zoom: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			zoom: 1.0,
		}
	}
}

impl Camera {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.zoom, (sy - self.y) / self.zoom)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.zoom + self.x, gy * self.zoom + self.y)
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	/// Multiply the zoom by `factor`, keeping the graph point under the
	/// screen position (sx, sy) fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_zoom / self.zoom;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.zoom = new_zoom;
	}

	/// Frame the given bounds inside a canvas of the given size, with
	/// `padding` pixels of slack on every side. Never zooms in past 1.0.
	pub fn fit_bounds(&mut self, bounds: &Bounds, width: f64, height: f64, padding: f64) {
		if bounds.is_empty() {
			return;
		}
		let (avail_w, avail_h) = (
			(width - 2.0 * padding).max(1.0),
			(height - 2.0 * padding).max(1.0),
		);
		let fit = (avail_w / bounds.width()).min(avail_h / bounds.height());
		self.zoom = fit.min(1.0).clamp(MIN_ZOOM, MAX_ZOOM);
		self.x = width / 2.0 - bounds.center_x() * self.zoom;
		self.y = height / 2.0 - bounds.center_y() * self.zoom;
	}
}

/// Axis-aligned bounding box in graph space.
#[derive(Clone, Copy, Debug)]
pub struct Bounds {
	pub min_x: f64,
	pub max_x: f64,
	pub min_y: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn empty() -> Self {
		Self {
			min_x: f64::INFINITY,
			max_x: f64::NEG_INFINITY,
			min_y: f64::INFINITY,
			max_y: f64::NEG_INFINITY,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.min_x > self.max_x || self.min_y > self.max_y
	}

	pub fn include_circle(&mut self, x: f64, y: f64, radius: f64) {
		self.min_x = self.min_x.min(x - radius);
		self.max_x = self.max_x.max(x + radius);
		self.min_y = self.min_y.min(y - radius);
		self.max_y = self.max_y.max(y + radius);
	}

	pub fn width(&self) -> f64 {
		(self.max_x - self.min_x).max(1.0)
	}

	pub fn height(&self) -> f64 {
		(self.max_y - self.min_y).max(1.0)
	}

	pub fn center_x(&self) -> f64 {
		(self.min_x + self.max_x) / 2.0
	}

	pub fn center_y(&self) -> f64 {
		(self.min_y + self.max_y) / 2.0
	}
}
