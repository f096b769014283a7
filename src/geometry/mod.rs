pub mod hit_testing;
pub mod transform;

pub use transform::{Frame, FrameLayout, pixel_extent, to_pixels};
