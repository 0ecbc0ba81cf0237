use {
    crate::{
        client::ClientError,
        ifs::{
            swc_background::SwcBackground, swc_screen::SwcScreen, wl_buffer::WlBuffer,
            wl_display::WlDisplay, wl_registry::WlRegistry, wl_surface::WlSurface,
        },
        object::{Object, ObjectId},
        utils::{clonecell::CloneCell, copyhashmap::CopyHashMap},
        wire::{SwcBackgroundId, SwcScreenId, WlBufferId, WlRegistryId, WlSurfaceId},
    },
    std::rc::Rc,
};

pub struct Objects {
    pub display: CloneCell<Option<Rc<WlDisplay>>>,
    registry: CopyHashMap<ObjectId, Rc<dyn Object>>,
    pub registries: CopyHashMap<WlRegistryId, Rc<WlRegistry>>,
    pub surfaces: CopyHashMap<WlSurfaceId, Rc<WlSurface>>,
    pub buffers: CopyHashMap<WlBufferId, Rc<WlBuffer>>,
    pub screens: CopyHashMap<SwcScreenId, Rc<SwcScreen>>,
    pub backgrounds: CopyHashMap<SwcBackgroundId, Rc<SwcBackground>>,
}

pub const MIN_SERVER_ID: u32 = 0xff000000;

impl Objects {
    pub fn new() -> Self {
        Self {
            display: Default::default(),
            registry: Default::default(),
            registries: Default::default(),
            surfaces: Default::default(),
            buffers: Default::default(),
            screens: Default::default(),
            backgrounds: Default::default(),
        }
    }

    pub fn destroy(&self) {
        let objects: Vec<_> = self.registry.lock().drain().map(|(_, o)| o).collect();
        for obj in &objects {
            obj.break_loops();
        }
        self.display.set(None);
        self.registries.clear();
        self.backgrounds.clear();
        self.screens.clear();
        self.buffers.clear();
        self.surfaces.clear();
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn get_obj(&self, id: ObjectId) -> Result<Rc<dyn Object>, ClientError> {
        match self.registry.get(&id) {
            Some(o) => Ok(o),
            _ => Err(ClientError::UnknownId),
        }
    }

    /// Checks that `id` can be used for a new client-allocated object.
    pub fn check_client_id(&self, id: ObjectId) -> Result<(), ClientError> {
        let res = if id.raw() == 0 || id.raw() >= MIN_SERVER_ID {
            Err(ClientError::ClientIdOutOfBounds)
        } else if self.registry.contains(&id) {
            Err(ClientError::IdAlreadyInUse)
        } else {
            Ok(())
        };
        res.map_err(|e| ClientError::AddObjectError(id, Box::new(e)))
    }

    /// Ensures that one more object fits into the table without exceeding `limit` and
    /// without allocating.
    pub fn reserve(&self, limit: usize) -> Result<(), ClientError> {
        if self.registry.len() >= limit {
            return Err(ClientError::TooManyObjects(limit));
        }
        self.registry
            .reserve_one()
            .map_err(|_| ClientError::OutOfMemory)
    }

    pub fn add_client_object(&self, obj: Rc<dyn Object>, limit: usize) -> Result<(), ClientError> {
        let id = obj.id();
        self.check_client_id(id)?;
        if self.registry.len() >= limit {
            return Err(ClientError::AddObjectError(
                id,
                Box::new(ClientError::TooManyObjects(limit)),
            ));
        }
        self.registry.set(id, obj);
        Ok(())
    }

    pub fn remove_obj(&self, id: ObjectId) -> Result<(), ClientError> {
        match self.registry.remove(&id) {
            Some(_) => Ok(()),
            _ => Err(ClientError::UnknownId),
        }
    }
}
