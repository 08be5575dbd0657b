//! Two-layer image crossfade.
//!
//! Runs on its own wall-clock, decoupled from the engine's fixed tick: the
//! caller supplies a monotonic millisecond timestamp to `trigger` and
//! `update`. At most one fade is in flight; a trigger during a fade
//! overwrites the fade target and restarts the fade clock.

/// One of the two image buffers a renderer blends between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLayer {
    A,
    B,
}

impl ImageLayer {
    pub fn other(self) -> Self {
        match self {
            ImageLayer::A => ImageLayer::B,
            ImageLayer::B => ImageLayer::A,
        }
    }
}

/// Instruction for the image collaborator: load `image_index` into `layer`
/// so the running fade can blend toward it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLoad {
    pub layer: ImageLayer,
    pub image_index: u32,
}

/// Blend state for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeFrame {
    pub opacity_a: f64,
    pub opacity_b: f64,
    /// Step number to show on screen. Advances slightly before the blend
    /// finishes so the counter never visibly lags the image.
    pub displayed_step: u32,
}

#[derive(Debug, Clone)]
pub struct Crossfade {
    fade_secs: f64,
    active_layer: ImageLayer,
    last_image_index: u32,
    fade_started_ms: Option<u64>,
    displayed_step: u32,
}

/// Fraction of the fade after which the step counter flips.
const STEP_FLIP_PROGRESS: f64 = 0.75;

impl Crossfade {
    /// `step_interval_secs` comes from the workout plan; the fade runs for
    /// a quarter of it.
    pub fn new(step_interval_secs: f64) -> Self {
        Self {
            fade_secs: step_interval_secs / 4.0,
            active_layer: ImageLayer::A,
            last_image_index: 0,
            fade_started_ms: None,
            displayed_step: 0,
        }
    }

    pub fn active_layer(&self) -> ImageLayer {
        self.active_layer
    }

    pub fn displayed_step(&self) -> u32 {
        self.displayed_step
    }

    /// Begin fading toward a new image. Returns where the collaborator
    /// should load it, or `None` when the image is already current.
    /// Re-triggering mid-fade keeps the not-yet-swapped back layer, so the
    /// running blend simply retargets onto the newer image.
    pub fn trigger(&mut self, image_index: u32, now_ms: u64) -> Option<ImageLoad> {
        if image_index == self.last_image_index {
            return None;
        }
        self.last_image_index = image_index;
        self.fade_started_ms = Some(now_ms);
        Some(ImageLoad {
            layer: self.active_layer.other(),
            image_index,
        })
    }

    /// Hard cut to a step's image with no fade, for rep boundaries.
    pub fn reset_to(&mut self, step: u32, image_index: u32) {
        self.active_layer = ImageLayer::A;
        self.last_image_index = image_index;
        self.fade_started_ms = None;
        self.displayed_step = step;
    }

    /// Advance the blend to `now_ms` and produce the frame to render.
    pub fn update(&mut self, current_step: u32, now_ms: u64) -> FadeFrame {
        let Some(started_ms) = self.fade_started_ms else {
            return self.steady_frame();
        };

        let elapsed_secs = now_ms.saturating_sub(started_ms) as f64 / 1000.0;
        let progress = (elapsed_secs / self.fade_secs).min(1.0);

        if progress >= STEP_FLIP_PROGRESS && self.displayed_step != current_step {
            self.displayed_step = current_step;
        }

        if progress >= 1.0 {
            self.active_layer = self.active_layer.other();
            self.fade_started_ms = None;
            return self.steady_frame();
        }

        let (opacity_a, opacity_b) = match self.active_layer {
            ImageLayer::A => (1.0 - progress, progress),
            ImageLayer::B => (progress, 1.0 - progress),
        };
        FadeFrame {
            opacity_a,
            opacity_b,
            displayed_step: self.displayed_step,
        }
    }

    fn steady_frame(&self) -> FadeFrame {
        let (opacity_a, opacity_b) = match self.active_layer {
            ImageLayer::A => (1.0, 0.0),
            ImageLayer::B => (0.0, 1.0),
        };
        FadeFrame {
            opacity_a,
            opacity_b,
            displayed_step: self.displayed_step,
        }
    }
}
