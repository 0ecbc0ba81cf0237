use {
    crate::{
        client::{Client, ClientError},
        leaks::Tracker,
        object::{Object, Version},
        utils::event_listener::{EventListener, EventSource},
        wire::{WlSurfaceId, wl_surface::*},
    },
    std::{cell::Cell, rc::Rc},
    thiserror::Error,
};

/// Receives a notification when a surface is destroyed by its client.
pub trait SurfaceDestroyListener {
    fn surface_destroyed(&self, surface: &WlSurface);
}

pub struct WlSurface {
    pub id: WlSurfaceId,
    pub client: Rc<Client>,
    destroy_listeners: EventSource<dyn SurfaceDestroyListener>,
    destroyed: Cell<bool>,
    pub tracker: Tracker<Self>,
}

impl WlSurface {
    pub fn new(id: WlSurfaceId, client: &Rc<Client>) -> Self {
        Self {
            id,
            client: client.clone(),
            destroy_listeners: Default::default(),
            destroyed: Cell::new(false),
            tracker: Default::default(),
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub fn reserve_destroy_listener(&self) -> Result<(), ClientError> {
        self.destroy_listeners
            .reserve()
            .map_err(|_| ClientError::OutOfMemory)
    }

    pub fn add_destroy_listener(&self, listener: &EventListener<dyn SurfaceDestroyListener>) {
        listener.attach(&self.destroy_listeners);
    }

    fn destroy_node(&self) {
        self.destroyed.set(true);
        for listener in self.destroy_listeners.iter() {
            listener.surface_destroyed(self);
        }
        self.destroy_listeners.clear();
    }
}

impl WlSurfaceRequestHandler for WlSurface {
    type Error = WlSurfaceError;

    fn destroy(&self, _req: Destroy, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.destroy_node();
        self.client.remove_obj(self)?;
        Ok(())
    }
}

object_base! {
    self = WlSurface;
    version = Version(1);
}

impl Object for WlSurface {
    fn break_loops(&self) {
        self.destroyed.set(true);
        self.destroy_listeners.clear();
    }
}

dedicated_add_obj!(WlSurface, WlSurfaceId, surfaces);

#[derive(Debug, Error)]
pub enum WlSurfaceError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(WlSurfaceError, ClientError);
