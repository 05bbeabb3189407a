//! Screen size resource.
//!
//! Stores the logical screen dimensions in pixels. The render pass reads
//! this to resolve screen-anchored object positions.

/// Current logical screen size in pixels.
#[derive(Clone, Copy, Debug)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
