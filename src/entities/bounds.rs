/// Axis-aligned rectangle in arena units.
///
/// `x`/`y` is the top-left corner; `y` grows downwards like the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Returns `true` if `self` lies entirely inside `outer` (edges may touch).
    pub fn is_within(&self, outer: &Bounds) -> bool {
        self.left() >= outer.left()
            && self.right() <= outer.right()
            && self.top() >= outer.top()
            && self.bottom() <= outer.bottom()
    }

    /// Moves the rectangle back inside `outer`, one edge at a time.
    ///
    /// The right/bottom edges are pulled in first and the left/top edges win
    /// afterwards, so a rectangle larger than `outer` ends up flush with its
    /// top-left corner. Size is never changed.
    pub fn clamp_within(&self, outer: &Bounds) -> Bounds {
        let mut clamped = *self;
        if clamped.right() > outer.right() {
            clamped.x = outer.right() - clamped.width;
        }
        if clamped.left() < outer.left() {
            clamped.x = outer.left();
        }
        if clamped.top() < outer.top() {
            clamped.y = outer.top();
        }
        if clamped.bottom() > outer.bottom() {
            clamped.y = outer.bottom() - clamped.height;
        }
        clamped
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Bounds {
        Bounds {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
