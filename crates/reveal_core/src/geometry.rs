//! Page geometry
//!
//! All coordinates are document coordinates in logical pixels: `y` grows
//! downward from the top of the page, independent of the scroll position.

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Leading (top) edge in document coordinates
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Trailing (bottom) edge in document coordinates
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Check whether this rectangle overlaps the horizontal band `[from, to)`
    pub fn intersects_x(&self, from: f32, to: f32) -> bool {
        self.right() > from && self.left() < to
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Rect::new(self.origin.x + dx, self.origin.y + dy, self.width(), self.height())
    }
}
