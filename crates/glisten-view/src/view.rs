use std::time::Instant;

use glisten_core::anim::{GlistenConfig, GlistenDriver, GlistenEvent};
use glisten_core::coords::{Rect, Vec2};
use glisten_core::paint::LinearGradient;
use image::RgbaImage;

use crate::compositor::Compositor;
use crate::mask::AlphaMask;

/// Width of the sweep band along its travel direction, as a fraction of the
/// view's smaller dimension.
const SWEEP_BAND_FRACTION: f32 = 0.35;

/// Fired once per completed repetition, with a read-only view of the
/// component that played it.
pub type CompletionCallback = Box<dyn FnMut(&GlisteningImage)>;

/// An image view that repeatedly plays a light-sweep highlight across the
/// visible pixels of its image.
///
/// The host drives it explicitly: call [`on_attached`] / [`on_detached`] when
/// the view enters or leaves the visible hierarchy (highlighting starts and
/// stops automatically with those), [`tick`] once per frame or at
/// [`next_deadline`], and [`paint`] during the frame's draw pass. All calls
/// happen on the host's main loop; the component neither blocks nor spawns.
///
/// None of the operations can fail: out-of-range configuration degrades to a
/// degenerate visual, never an error.
///
/// [`on_attached`]: Self::on_attached
/// [`on_detached`]: Self::on_detached
/// [`tick`]: Self::tick
/// [`next_deadline`]: Self::next_deadline
/// [`paint`]: Self::paint
pub struct GlisteningImage {
    image: Option<RgbaImage>,
    mask: Option<AlphaMask>,
    driver: GlistenDriver,
    completion: Option<CompletionCallback>,
    attached: bool,
}

impl GlisteningImage {
    pub fn new() -> Self {
        Self::with_config(GlistenConfig::new())
    }

    pub fn with_config(config: GlistenConfig) -> Self {
        Self {
            image: None,
            mask: None,
            driver: GlistenDriver::new(config),
            completion: None,
            attached: false,
        }
    }

    // ── image ─────────────────────────────────────────────────────────────

    /// Sets the displayed image and derives its opacity mask.
    pub fn set_image(&mut self, image: RgbaImage) {
        log::debug!("glisten view: image set ({}×{})", image.width(), image.height());
        self.mask = Some(AlphaMask::from_rgba(&image));
        self.image = Some(image);
    }

    /// Decodes `bytes` (PNG/JPEG) and displays the result.
    pub fn load_from_memory(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        self.set_image(image);
        Ok(())
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn mask(&self) -> Option<&AlphaMask> {
        self.mask.as_ref()
    }

    /// Natural size: the image's pixel dimensions, zero without an image.
    pub fn desired_size(&self) -> Vec2 {
        match &self.image {
            Some(img) => Vec2::new(img.width() as f32, img.height() as f32),
            None => Vec2::zero(),
        }
    }

    // ── configuration ─────────────────────────────────────────────────────

    pub fn config(&self) -> &GlistenConfig {
        self.driver.config()
    }

    /// Mutable access to delay, repeat count, interval, duration, angle
    /// (radians or degrees), and color. Changes apply from the next
    /// scheduling decision.
    pub fn config_mut(&mut self) -> &mut GlistenConfig {
        self.driver.config_mut()
    }

    /// Called after each completed repetition. Replaces any previous
    /// callback; dropped with the view.
    pub fn set_completion(&mut self, f: impl FnMut(&GlisteningImage) + 'static) {
        self.completion = Some(Box::new(f));
    }

    pub fn clear_completion(&mut self) {
        self.completion = None;
    }

    // ── animation lifecycle ───────────────────────────────────────────────

    /// True between a start request and the matching stop (or budget
    /// exhaustion, or detach), including the initial-delay window.
    pub fn is_highlighting(&self) -> bool {
        self.driver.is_highlighting()
    }

    /// Starts (or restarts) highlight playback at `now`.
    ///
    /// Restarting mid-cycle cancels the pending schedule and begins again
    /// from the configured initial delay with a fresh repeat budget.
    pub fn start_highlight(&mut self, now: Instant) {
        let events = self.driver.start(now);
        self.dispatch(events);
    }

    /// Stops playback and removes any in-flight sweep. No repetition
    /// scheduled before this call will fire afterwards. No-op when idle.
    pub fn stop_highlight(&mut self) {
        self.driver.stop();
    }

    /// Advances the animation to `now`, firing completion callbacks for any
    /// repetitions that finished since the last call.
    pub fn tick(&mut self, now: Instant) {
        let events = self.driver.tick(now);
        self.dispatch(events);
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do; a
    /// power-friendly host sleeps until then instead of polling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.driver.next_deadline()
    }

    // ── hierarchy lifecycle ───────────────────────────────────────────────

    /// The host added the view to a visible surface. Starts highlighting,
    /// mirroring the detach side. Hosts with implicit hierarchy hooks call
    /// this from their attach notification.
    pub fn on_attached(&mut self, now: Instant) {
        self.attached = true;
        self.start_highlight(now);
    }

    /// The host removed the view from its visible surface. Stops
    /// highlighting and drops the pending schedule.
    pub fn on_detached(&mut self) {
        self.attached = false;
        self.stop_highlight();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // ── painting ──────────────────────────────────────────────────────────

    /// Draws the image and, while a sweep is in flight, the masked gradient
    /// band at its position for `now`.
    pub fn paint(&self, compositor: &mut dyn Compositor, rect: Rect, now: Instant) {
        if rect.is_empty() {
            return;
        }
        let Some(image) = &self.image else { return };
        compositor.draw_image(rect, image);

        let (Some(progress), Some(mask)) = (self.driver.progress(now), &self.mask) else {
            return;
        };
        let config = self.driver.config();
        let band = SWEEP_BAND_FRACTION * rect.size.x.min(rect.size.y);
        let gradient =
            LinearGradient::sweep_band(rect, config.angle(), progress, config.color(), band);
        if gradient.is_valid() {
            compositor.draw_masked_gradient(rect, &gradient, mask);
        }
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn dispatch(&mut self, events: Vec<GlistenEvent>) {
        for event in events {
            if let GlistenEvent::SweepCompleted { index } = event {
                log::trace!("glisten view: repetition {index} completed");
                // Take the callback out so it can borrow the view; a callback
                // that installs a replacement wins over the put-back.
                if let Some(mut callback) = self.completion.take() {
                    callback(self);
                    if self.completion.is_none() {
                        self.completion = Some(callback);
                    }
                }
            }
        }
    }
}

impl Default for GlisteningImage {
    fn default() -> Self {
        Self::new()
    }
}
