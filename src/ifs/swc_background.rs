use {
    crate::{
        client::{Client, ClientError},
        ifs::wl_surface::{SurfaceDestroyListener, WlSurface},
        leaks::Tracker,
        object::{Object, Version},
        utils::{clonecell::CloneCell, event_listener::EventListener},
        view::View,
        wire::{SwcBackgroundId, swc_background::*},
    },
    std::rc::{Rc, Weak},
    thiserror::Error,
};

/// A surface shown beneath all other views on one screen.
///
/// The binding owns its view and observes the destruction of its surface.
pub struct SwcBackground {
    pub id: SwcBackgroundId,
    pub client: Rc<Client>,
    pub surface: Rc<WlSurface>,
    view: CloneCell<Option<Rc<dyn View>>>,
    destroy_listener: EventListener<dyn SurfaceDestroyListener>,
    pub version: Version,
    pub tracker: Tracker<Self>,
}

impl SwcBackground {
    pub fn new(
        id: SwcBackgroundId,
        client: &Rc<Client>,
        surface: &Rc<WlSurface>,
        view: Rc<dyn View>,
        version: Version,
    ) -> Rc<Self> {
        Rc::new_cyclic(|slf: &Weak<Self>| Self {
            id,
            client: client.clone(),
            surface: surface.clone(),
            view: CloneCell::new(Some(view)),
            destroy_listener: EventListener::new(slf.clone()),
            version,
            tracker: Default::default(),
        })
    }

    /// Starts observing the surface. Space for the listener must have been reserved.
    pub fn install(&self) {
        self.surface.add_destroy_listener(&self.destroy_listener);
    }

    pub fn view(&self) -> Option<Rc<dyn View>> {
        self.view.get()
    }

    /// Destroys the view and stops observing the surface.
    pub fn detach(&self) {
        if let Some(view) = self.view.take() {
            view.destroy();
        }
        self.destroy_listener.detach();
    }

    fn destroy_binding(&self) -> Result<(), ClientError> {
        self.detach();
        self.client.remove_obj(self)
    }
}

impl SurfaceDestroyListener for SwcBackground {
    fn surface_destroyed(&self, surface: &WlSurface) {
        log::debug!(
            "Surface {} of background {} was destroyed",
            surface.id,
            self.id
        );
        if let Err(e) = self.destroy_binding() {
            self.client.error(SwcBackgroundError::ClientError(Box::new(e)));
        }
    }
}

impl SwcBackgroundRequestHandler for SwcBackground {
    type Error = SwcBackgroundError;

    fn destroy(&self, _req: Destroy, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.destroy_binding()?;
        Ok(())
    }
}

object_base! {
    self = SwcBackground;
    version = self.version;
}

impl Object for SwcBackground {
    fn break_loops(&self) {
        self.detach();
    }
}

dedicated_add_obj!(SwcBackground, SwcBackgroundId, backgrounds);

#[derive(Debug, Error)]
pub enum SwcBackgroundError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(SwcBackgroundError, ClientError);
