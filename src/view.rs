use {
    crate::ifs::wl_surface::WlSurface,
    std::{
        error::Error,
        fmt::{Debug, Display, Formatter},
        rc::Rc,
    },
};

/// The compositor's stacking and placement state.
pub trait ViewSystem {
    fn create_view(&self, surface: &Rc<WlSurface>) -> Result<Rc<dyn View>, ViewError>;
}

/// A placement record for the contents of a surface.
///
/// A view is invisible until `show` is called. After `destroy` the view no longer
/// references its surface.
pub trait View {
    /// Background views are stacked beneath all other views.
    fn set_background(&self, background: bool);
    fn set_position(&self, x: i32, y: i32);
    fn set_size(&self, width: i32, height: i32);
    fn show(&self);
    fn destroy(&self);
}

pub struct ViewError(pub Box<dyn Error>);

impl Debug for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Error for ViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}
