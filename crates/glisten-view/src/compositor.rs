use glisten_core::coords::Rect;
use glisten_core::paint::LinearGradient;
use image::RgbaImage;

use crate::mask::AlphaMask;

/// Seam to the host rendering/compositing engine.
///
/// The view never draws pixels itself; it describes what to draw and the
/// host's implementation of this trait turns that into GPU or CPU work.
/// Implementations can assume single-threaded main-loop calls, in paint
/// order, within one frame.
pub trait Compositor {
    /// Display the view's image filling `rect`.
    fn draw_image(&mut self, rect: Rect, image: &RgbaImage);

    /// Composite `gradient` over `rect`, restricted to the pixels `mask`
    /// marks as visible. `mask` covers `rect` edge to edge (scaled if the
    /// resolutions differ).
    ///
    /// The gradient's endpoints may lie outside `rect`; that is how the
    /// sweep band enters and leaves the view cleanly.
    fn draw_masked_gradient(&mut self, rect: Rect, gradient: &LinearGradient, mask: &AlphaMask);
}
