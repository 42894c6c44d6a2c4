use glam::Vec2;

/// Integer pixel rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const EMPTY: Self = Self { x: 0, y: 0, width: 0, height: 0 };

    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rect containing the device-space box `[min, max]`.
    pub fn enclosing(min: Vec2, max: Vec2) -> Self {
        let x0 = min.x.floor() as i32;
        let y0 = min.y.floor() as i32;
        let x1 = max.x.ceil() as i32;
        let y1 = max.y.ceil() as i32;
        Self::from_edges(x0, y0, x1, y1)
    }

    fn from_edges(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        if x1 <= x0 || y1 <= y0 {
            return Self::EMPTY;
        }
        Self::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    pub fn intersect(&self, other: &PixelRect) -> PixelRect {
        Self::from_edges(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Row-major index of `(x, y)` inside this rect.
    pub(crate) fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| (y - self.y) as usize * self.width as usize + (x - self.x) as usize)
    }
}

/// Alpha buffer read back from a raster surface.
///
/// Owned and immutable: the surface that produced it is gone by the time
/// a mask is queried.
#[derive(Debug, Clone, PartialEq)]
pub struct HitMask {
    rect: PixelRect,
    /// Device pixels per canvas unit.
    scale: f32,
    threshold: u8,
    alpha: Vec<u8>,
    target_pixel_count: usize,
}

impl HitMask {
    /// `alpha` is row-major over `rect`.
    pub fn new(rect: PixelRect, scale: f32, threshold: u8, alpha: Vec<u8>) -> Self {
        debug_assert_eq!(alpha.len(), rect.area());
        let target_pixel_count = alpha.iter().filter(|&&a| a > threshold).count();
        Self {
            rect,
            scale,
            threshold,
            alpha,
            target_pixel_count,
        }
    }

    pub fn empty(scale: f32, threshold: u8) -> Self {
        Self::new(PixelRect::EMPTY, scale, threshold, Vec::new())
    }

    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Number of set pixels.
    pub fn target_pixel_count(&self) -> usize {
        self.target_pixel_count
    }

    /// Whether device pixel `(x, y)` is set. `None` outside the raster.
    pub fn is_set(&self, x: i32, y: i32) -> Option<bool> {
        self.rect.index_of(x, y).map(|i| self.alpha[i] > self.threshold)
    }

    /// Whether a canvas-space point falls on a set pixel. `None` outside the raster.
    pub fn sample(&self, canvas: Vec2) -> Option<bool> {
        if !canvas.is_finite() {
            return None;
        }
        let device = canvas * self.scale;
        self.is_set(device.x.floor() as i32, device.y.floor() as i32)
    }
}
