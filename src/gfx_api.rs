use {
    crate::ifs::{swc_screen::SwcScreenGlobal, wl_buffer::WlBuffer},
    std::{
        any::Any,
        error::Error,
        fmt::{Debug, Display, Formatter},
        rc::Rc,
    },
};

/// A client buffer that the renderer can draw into.
pub trait GfxFramebuffer: Debug {
    fn size(&self) -> (i32, i32);
    fn as_any(&self) -> &dyn Any;
}

/// The part of the renderer used by the screenshot manager.
pub trait GfxContext {
    /// Translates a client buffer into a render target.
    fn resolve_buffer(&self, buffer: &WlBuffer) -> Result<Rc<dyn GfxFramebuffer>, GfxError>;

    /// Renders the composited contents of `screen` into `fb`.
    ///
    /// Returns once every pixel of `fb` has been written.
    fn render_screen(
        &self,
        screen: &SwcScreenGlobal,
        fb: &Rc<dyn GfxFramebuffer>,
    ) -> Result<(), GfxError>;
}

pub struct GfxError(pub Box<dyn Error>);

impl Debug for GfxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for GfxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Error for GfxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}
