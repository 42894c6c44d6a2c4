//! Off-screen rasterization of letter hit areas.

pub mod hit_area;
pub mod mask;
pub mod pixmap;
pub mod surface;

pub use hit_area::{CoverageSample, Rasterizer};
pub use mask::{HitMask, PixelRect};
pub use pixmap::PixmapSurface;
pub use surface::RasterSurface;
