// gfx/renderer.rs
use super::WindowlessContext;
use crate::error::ReplayError;
use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct RendererFlags: u32 {
        /// Offload draw submission to a background execution context.
        const BACKGROUND_RENDERER = 1 << 0;
        /// After a background render, leave the GPU context bound to the
        /// background thread instead of reclaiming it.
        const LEAVE_CONTEXT_WITH_BACKGROUND_RENDERER = 1 << 1;
    }
}

/// The shared draw backend. Draw-call submission itself lives behind the
/// sensor observation pipeline; this type owns the context binding and
/// the background-rendering capability flags.
pub struct Renderer {
    context: WindowlessContext,
    flags: RendererFlags,
}

pub(crate) fn validate_flags(flags: RendererFlags) -> Result<(), ReplayError> {
    if flags.contains(RendererFlags::LEAVE_CONTEXT_WITH_BACKGROUND_RENDERER)
        && !flags.contains(RendererFlags::BACKGROUND_RENDERER)
    {
        return Err(ReplayError::Gpu(
            "LEAVE_CONTEXT_WITH_BACKGROUND_RENDERER requires BACKGROUND_RENDERER".to_string(),
        ));
    }
    Ok(())
}

impl Renderer {
    pub fn new(context: WindowlessContext, flags: RendererFlags) -> Result<Self, ReplayError> {
        validate_flags(flags)?;
        Ok(Self { context, flags })
    }

    /// Ensure the GPU context is bound to the calling thread. With wgpu
    /// the device is internally synchronized, so this only polls
    /// outstanding background work back onto the caller.
    pub fn acquire_gpu_context(&self) {
        let _ = self.context.device().poll(wgpu::PollType::Poll);
    }

    pub fn background_renderer_enabled(&self) -> bool {
        self.flags.contains(RendererFlags::BACKGROUND_RENDERER)
    }

    pub fn flags(&self) -> RendererFlags {
        self.flags
    }

    pub fn context(&self) -> &WindowlessContext {
        &self.context
    }
}
