//! A canvas that records calls instead of drawing, for tests and headless runs

use crate::canvas::{Canvas, PixelFormat};
use kindle_core::{Color, KindleError, Rect, Result};

/// Handle to a texture created by a [`RecordingCanvas`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTexture {
    pub id: u32,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

/// One recorded canvas call. Textures are referred to by id.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCall {
    CreateTexture {
        id: u32,
        format: PixelFormat,
        width: u32,
        height: u32,
    },
    SetRenderTarget(Option<u32>),
    SetDrawColor(Color),
    Clear,
    SetViewport(Option<Rect>),
    CopyRotated {
        texture: u32,
        src: Rect,
        dst: Rect,
        angle: f64,
    },
    Present,
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<CanvasCall>,
    next_id: u32,
    fail_textures: bool,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following texture creation fail with `RenderError`
    pub fn fail_texture_creation(&mut self, fail: bool) {
        self.fail_textures = fail;
    }

    pub fn calls(&self) -> &[CanvasCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the log empty
    pub fn drain(&mut self) -> Vec<CanvasCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn textures_created(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, CanvasCall::CreateTexture { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    type Texture = RecordedTexture;

    fn create_target_texture(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<RecordedTexture> {
        if self.fail_textures {
            return Err(KindleError::RenderError(format!(
                "texture creation disabled ({width}x{height})"
            )));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.calls.push(CanvasCall::CreateTexture {
            id,
            format,
            width,
            height,
        });
        Ok(RecordedTexture {
            id,
            width,
            height,
            format,
        })
    }

    fn set_render_target(&mut self, target: Option<&RecordedTexture>) -> Result<()> {
        self.calls
            .push(CanvasCall::SetRenderTarget(target.map(|t| t.id)));
        Ok(())
    }

    fn set_draw_color(&mut self, color: Color) {
        self.calls.push(CanvasCall::SetDrawColor(color));
    }

    fn clear(&mut self) -> Result<()> {
        self.calls.push(CanvasCall::Clear);
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Option<Rect>) -> Result<()> {
        self.calls.push(CanvasCall::SetViewport(viewport));
        Ok(())
    }

    fn copy_rotated(
        &mut self,
        texture: &RecordedTexture,
        src: Rect,
        dst: Rect,
        angle: f64,
    ) -> Result<()> {
        self.calls.push(CanvasCall::CopyRotated {
            texture: texture.id,
            src,
            dst,
            angle,
        });
        Ok(())
    }

    fn present(&mut self) {
        self.calls.push(CanvasCall::Present);
    }
}
