use {
    crate::{
        client::Client,
        globals::{Global, GlobalName, GlobalsError},
        leaks::Tracker,
        object::{Object, Version},
        wire::{
            WlRegistryId,
            wl_registry::{self, WlRegistryRequestHandler},
        },
    },
    std::rc::Rc,
    thiserror::Error,
};

pub struct WlRegistry {
    id: WlRegistryId,
    pub client: Rc<Client>,
    pub tracker: Tracker<Self>,
}

impl WlRegistry {
    pub fn new(id: WlRegistryId, client: &Rc<Client>) -> Self {
        Self {
            id,
            client: client.clone(),
            tracker: Default::default(),
        }
    }

    pub fn send_global(&self, global: &Rc<dyn Global>) {
        self.client.event(wl_registry::Global {
            self_id: self.id,
            name: global.name().raw(),
            interface: global.interface().name(),
            version: global.version(),
        })
    }

    pub fn send_global_remove(&self, name: GlobalName) {
        self.client.event(wl_registry::GlobalRemove {
            self_id: self.id,
            name: name.raw(),
        })
    }
}

impl WlRegistryRequestHandler for WlRegistry {
    type Error = WlRegistryError;

    fn bind(&self, req: wl_registry::Bind, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        let global = self
            .client
            .state
            .globals
            .get(GlobalName::from_raw(req.name))?;
        let interface = global.interface().name();
        if interface != req.interface {
            return Err(WlRegistryError::InterfaceMismatch {
                name: global.name(),
                expected: interface,
                requested: req.interface.to_string(),
            });
        }
        let max = global.version();
        if !(1..=max).contains(&req.version) {
            return Err(WlRegistryError::UnsupportedVersion {
                name: global.name(),
                interface,
                max,
                requested: req.version,
            });
        }
        global.bind(&self.client, req.id, Version(req.version))?;
        Ok(())
    }
}

object_base! {
    self = WlRegistry;
    version = Version(1);
}

impl Object for WlRegistry {}

dedicated_add_obj!(WlRegistry, WlRegistryId, registries);

#[derive(Debug, Error)]
pub enum WlRegistryError {
    #[error(transparent)]
    GlobalsError(Box<GlobalsError>),
    #[error("Global {name} has interface {expected} but the client requested {requested}")]
    InterfaceMismatch {
        name: GlobalName,
        expected: &'static str,
        requested: String,
    },
    #[error("Global {name} ({interface}) supports versions 1 to {max} but the client requested {requested}")]
    UnsupportedVersion {
        name: GlobalName,
        interface: &'static str,
        max: u32,
        requested: u32,
    },
}
efrom!(WlRegistryError, GlobalsError);
