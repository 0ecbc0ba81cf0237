use {
    crate::{
        client::{Client, ClientError, ClientId},
        globals::{Global, GlobalName},
        leaks::Tracker,
        object::{Object, Version},
        rect::Rect,
        wire::{SwcScreenId, swc_screen::*},
    },
    ahash::AHashMap,
    std::{
        cell::{Cell, RefCell},
        collections::hash_map::Entry,
        rc::Rc,
    },
    thiserror::Error,
};

/// An output as seen by clients of the two managers.
pub struct SwcScreenGlobal {
    pub name: GlobalName,
    rect: Cell<Rect>,
    pub bindings: RefCell<AHashMap<ClientId, AHashMap<SwcScreenId, Rc<SwcScreen>>>>,
}

impl SwcScreenGlobal {
    pub fn new(name: GlobalName, rect: Rect) -> Self {
        Self {
            name,
            rect: Cell::new(rect),
            bindings: Default::default(),
        }
    }

    pub fn geometry(&self) -> Rect {
        self.rect.get()
    }

    /// Updates the geometry and announces it to every bound `swc_screen`.
    ///
    /// Views that were positioned with the old geometry keep their placement.
    pub fn set_geometry(&self, rect: Rect) {
        log::info!("Screen {} changed geometry to {:?}", self.name, rect);
        self.rect.set(rect);
        let bindings: Vec<_> = self
            .bindings
            .borrow()
            .values()
            .flat_map(|b| b.values().cloned())
            .collect();
        for binding in bindings {
            binding.send_geometry(rect);
        }
    }

    fn bind_(
        self: Rc<Self>,
        id: SwcScreenId,
        client: &Rc<Client>,
        version: Version,
    ) -> Result<(), SwcScreenError> {
        let obj = Rc::new(SwcScreen {
            id,
            client: client.clone(),
            global: self.clone(),
            version,
            tracker: Default::default(),
        });
        track!(client, obj);
        client.add_client_obj(&obj)?;
        self.bindings
            .borrow_mut()
            .entry(client.id)
            .or_default()
            .insert(id, obj.clone());
        obj.send_geometry(self.rect.get());
        Ok(())
    }
}

global_base!(SwcScreenGlobal, SwcScreen, SwcScreenError);

impl Global for SwcScreenGlobal {
    fn singleton(&self) -> bool {
        false
    }

    fn version(&self) -> u32 {
        1
    }
}

dedicated_add_global!(SwcScreenGlobal, screens);

pub struct SwcScreen {
    pub id: SwcScreenId,
    pub client: Rc<Client>,
    pub global: Rc<SwcScreenGlobal>,
    version: Version,
    pub tracker: Tracker<Self>,
}

impl SwcScreen {
    fn send_geometry(&self, rect: Rect) {
        self.client.event(Geometry {
            self_id: self.id,
            x: rect.x1(),
            y: rect.y1(),
            width: rect.width() as u32,
            height: rect.height() as u32,
        });
    }

    fn remove_binding(&self) {
        if let Entry::Occupied(mut e) = self.global.bindings.borrow_mut().entry(self.client.id) {
            e.get_mut().remove(&self.id);
            if e.get().is_empty() {
                e.remove();
            }
        }
    }
}

impl SwcScreenRequestHandler for SwcScreen {
    type Error = SwcScreenError;

    fn destroy(&self, _req: Destroy, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.remove_binding();
        self.client.remove_obj(self)?;
        Ok(())
    }
}

object_base! {
    self = SwcScreen;
    version = self.version;
}

impl Object for SwcScreen {
    fn break_loops(&self) {
        self.remove_binding();
    }
}

dedicated_add_obj!(SwcScreen, SwcScreenId, screens);

#[derive(Debug, Error)]
pub enum SwcScreenError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(SwcScreenError, ClientError);
