use {
    crate::{
        client::Clients,
        config::Config,
        gfx_api::GfxContext,
        globals::{Globals, GlobalsError, WaylandGlobal},
        ifs::swc_screen::SwcScreenGlobal,
        rect::Rect,
        view::ViewSystem,
    },
    std::rc::Rc,
};

pub struct State {
    pub config: Config,
    pub clients: Clients,
    pub globals: Globals,
    pub views: Rc<dyn ViewSystem>,
    pub gfx: Rc<dyn GfxContext>,
}

impl State {
    pub fn new(config: Config, views: Rc<dyn ViewSystem>, gfx: Rc<dyn GfxContext>) -> Rc<Self> {
        let state = Rc::new(Self {
            config,
            clients: Clients::new(),
            globals: Globals::new(),
            views,
            gfx,
        });
        state.globals.add_singletons(&state.config);
        state
    }

    pub fn add_global<T: WaylandGlobal>(&self, global: &Rc<T>) {
        self.globals.add_global(self, global)
    }

    pub fn remove_global<T: WaylandGlobal>(&self, global: &T) -> Result<(), GlobalsError> {
        self.globals.remove(self, global)
    }

    /// Creates a screen with the given geometry and advertises it to all clients.
    pub fn add_screen(&self, rect: Rect) -> Rc<SwcScreenGlobal> {
        let screen = Rc::new(SwcScreenGlobal::new(self.globals.name(), rect));
        log::info!("Adding screen {} with geometry {:?}", screen.name, rect);
        self.add_global(&screen);
        screen
    }

    pub fn remove_screen(&self, screen: &SwcScreenGlobal) -> Result<(), GlobalsError> {
        log::info!("Removing screen {}", screen.name);
        self.remove_global(screen)
    }

    pub fn clear(&self) {
        self.clients.clear();
        self.globals.clear();
    }
}
