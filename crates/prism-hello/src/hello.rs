use anyhow::{Context, Result};

use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::input::{InputFrame, Key};
use prism_engine::render::{TriangleConfig, TriangleRenderer};

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Frames between fps log lines.
const FPS_LOG_INTERVAL: u64 = 600;

/// Draws the triangle every frame; command+Q quits.
pub struct HelloTriangle {
    renderer: TriangleRenderer,
    dt_sum: f32,
}

impl HelloTriangle {
    pub fn new(config: TriangleConfig) -> Self {
        Self {
            renderer: TriangleRenderer::new(config),
            dt_sum: 0.0,
        }
    }
}

fn quit_requested(frame: &InputFrame) -> bool {
    frame.command_shortcut(Key::Q)
}

impl App for HelloTriangle {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        if quit_requested(ctx.input_frame) {
            log::info!("quit requested");
            return Ok(AppControl::Exit);
        }

        self.dt_sum += ctx.time.dt;
        if ctx.time.frame_index > 0 && ctx.time.frame_index % FPS_LOG_INTERVAL == 0 {
            log::debug!("{:.1} fps", FPS_LOG_INTERVAL as f32 / self.dt_sum);
            self.dt_sum = 0.0;
        }

        let renderer = &mut self.renderer;
        ctx.render(CLEAR, |rctx, target| Ok(renderer.render(rctx, target)?))
            .context("renderer cannot be initialized")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_engine::input::{InputEvent, InputState, KeyState, Modifiers};

    fn press(state: &mut InputState, frame: &mut InputFrame, key: Key, modifiers: Modifiers) {
        state.apply_event(frame, InputEvent::ModifiersChanged(modifiers));
        state.apply_event(
            frame,
            InputEvent::Key { key, state: KeyState::Pressed, modifiers, repeat: false },
        );
    }

    #[test]
    fn command_q_quits() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        press(&mut state, &mut frame, Key::Q, Modifiers::command());
        assert!(quit_requested(&frame));
    }

    #[test]
    fn plain_q_does_not_quit() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        press(&mut state, &mut frame, Key::Q, Modifiers::NONE);
        assert!(!quit_requested(&frame));
    }

    #[test]
    fn command_other_key_does_not_quit() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        press(&mut state, &mut frame, Key::W, Modifiers::command());
        assert!(!quit_requested(&frame));
    }
}
