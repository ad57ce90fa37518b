//! Render context which draws into the log.

use ultraviolet::Vec2;

use kestrel_core::components::RenderContext;

/// Writes every draw call into the log, one line per call.
#[derive(Debug, Default)]
pub struct LogRenderContext {
    calls: usize,
}

impl LogRenderContext {
    /// Creates new context without draw calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of draw calls made so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl RenderContext for LogRenderContext {
    fn draw_rect(&mut self, center: Vec2, size: Vec2, rotation: f32, opacity: f32) {
        self.calls += 1;
        log::debug!(
            "rect at ({:.1}, {:.1}) size {:.1}x{:.1} rotation {:.2} opacity {:.2}",
            center.x,
            center.y,
            size.x,
            size.y,
            rotation,
            opacity,
        );
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, opacity: f32) {
        self.calls += 1;
        log::debug!(
            "text {:?} at ({:.1}, {:.1}) opacity {:.2}",
            text,
            pos.x,
            pos.y,
            opacity,
        );
    }
}
