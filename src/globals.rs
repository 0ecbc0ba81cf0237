use {
    crate::{
        client::Client,
        config::Config,
        ifs::{
            swc_background_manager::SwcBackgroundManagerGlobal, swc_screen::SwcScreenGlobal,
            swc_screenshot_manager::SwcScreenshotManagerGlobal,
            wl_compositor::WlCompositorGlobal, wl_registry::WlRegistry,
        },
        object::{Interface, ObjectId, Version},
        state::State,
        utils::{copyhashmap::CopyHashMap, numcell::NumCell},
    },
    std::{
        error::Error,
        fmt::{Display, Formatter},
        rc::Rc,
    },
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum GlobalsError {
    #[error("The requested global {0} does not exist")]
    GlobalDoesNotExist(GlobalName),
    #[error(transparent)]
    GlobalError(GlobalError),
}

#[derive(Debug, Error)]
#[error("An error occurred in a `{}` global", .interface.name())]
pub struct GlobalError {
    pub interface: Interface,
    #[source]
    pub error: Box<dyn Error>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GlobalName(u32);

impl GlobalName {
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl Display for GlobalName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

pub trait GlobalBase {
    fn name(&self) -> GlobalName;
    fn bind<'a>(
        self: Rc<Self>,
        client: &'a Rc<Client>,
        id: ObjectId,
        version: Version,
    ) -> Result<(), GlobalsError>;
    fn interface(&self) -> Interface;
}

pub trait Global: GlobalBase {
    fn singleton(&self) -> bool;
    fn version(&self) -> u32;
}

/// The globals advertised through `wl_registry`.
pub struct Globals {
    next_name: NumCell<u32>,
    registry: CopyHashMap<GlobalName, Rc<dyn Global>>,
    pub screens: CopyHashMap<GlobalName, Rc<SwcScreenGlobal>>,
}

impl Globals {
    pub fn new() -> Self {
        Self {
            next_name: NumCell::new(1),
            registry: Default::default(),
            screens: Default::default(),
        }
    }

    pub fn clear(&self) {
        self.registry.clear();
        self.screens.clear();
    }

    /// Registers the globals that exist for the whole lifetime of the server.
    ///
    /// This runs before any client can connect, so nothing is broadcast.
    pub fn add_singletons(&self, config: &Config) {
        self.register(Rc::new(WlCompositorGlobal::new(self.name())));
        if config.background_manager {
            self.register(Rc::new(SwcBackgroundManagerGlobal::new(self.name())));
        }
        if config.screenshot_manager {
            self.register(Rc::new(SwcScreenshotManagerGlobal::new(self.name())));
        }
    }

    /// Allocates a fresh global name. Names are never reused.
    pub fn name(&self) -> GlobalName {
        let name = self.next_name.fetch_add(1);
        assert_ne!(name, 0, "global names exhausted");
        GlobalName(name)
    }

    pub fn get(&self, name: GlobalName) -> Result<Rc<dyn Global>, GlobalsError> {
        self.registry
            .get(&name)
            .ok_or(GlobalsError::GlobalDoesNotExist(name))
    }

    fn register<T: WaylandGlobal>(&self, global: Rc<T>) {
        self.registry.set(global.name(), global.clone());
        global.add(self);
    }

    pub fn add_global<T: WaylandGlobal>(&self, state: &State, global: &Rc<T>) {
        self.register(global.clone());
        let global: Rc<dyn Global> = global.clone();
        self.for_each_registry(state, |r| r.send_global(&global));
    }

    pub fn remove<T: WaylandGlobal>(&self, state: &State, global: &T) -> Result<(), GlobalsError> {
        let name = global.name();
        if self.registry.remove(&name).is_none() {
            return Err(GlobalsError::GlobalDoesNotExist(name));
        }
        global.remove(self);
        self.for_each_registry(state, |r| r.send_global_remove(name));
        Ok(())
    }

    /// Sends every global to a newly created registry. Singletons come first.
    pub fn notify_all(&self, registry: &Rc<WlRegistry>) {
        let mut globals: Vec<_> = self.registry.lock().values().cloned().collect();
        globals.sort_by_key(|g| (!g.singleton(), g.name().raw()));
        globals.iter().for_each(|g| registry.send_global(g));
    }

    fn for_each_registry(&self, state: &State, f: impl Fn(&Rc<WlRegistry>)) {
        state.clients.broadcast(|c| {
            let registries: Vec<_> = c.objects.registries.lock().values().cloned().collect();
            registries.iter().for_each(&f);
        });
    }
}

pub trait WaylandGlobal: Global + 'static {
    fn add(self: Rc<Self>, globals: &Globals) {
        let _ = globals;
    }
    fn remove(&self, globals: &Globals) {
        let _ = globals;
    }
}
