use {
    crate::{
        client::{Client, ClientError},
        globals::{Global, GlobalName},
        ifs::{swc_background::SwcBackground, swc_screen::SwcScreen, wl_surface::WlSurface},
        leaks::Tracker,
        object::{Object, Version},
        utils::errorfmt::ErrorFmt,
        view::ViewError,
        wire::{SwcBackgroundManagerId, swc_background_manager::*},
    },
    std::rc::Rc,
    thiserror::Error,
};

pub struct SwcBackgroundManagerGlobal {
    name: GlobalName,
}

impl SwcBackgroundManagerGlobal {
    pub fn new(name: GlobalName) -> Self {
        Self { name }
    }

    fn bind_(
        self: Rc<Self>,
        id: SwcBackgroundManagerId,
        client: &Rc<Client>,
        version: Version,
    ) -> Result<(), SwcBackgroundManagerError> {
        let obj = Rc::new(SwcBackgroundManager {
            id,
            client: client.clone(),
            version,
            tracker: Default::default(),
        });
        track!(client, obj);
        client.add_client_obj(&obj)?;
        Ok(())
    }
}

global_base!(
    SwcBackgroundManagerGlobal,
    SwcBackgroundManager,
    SwcBackgroundManagerError
);

impl Global for SwcBackgroundManagerGlobal {
    fn singleton(&self) -> bool {
        true
    }

    fn version(&self) -> u32 {
        1
    }
}

simple_add_global!(SwcBackgroundManagerGlobal);

pub struct SwcBackgroundManager {
    pub id: SwcBackgroundManagerId,
    pub client: Rc<Client>,
    pub version: Version,
    pub tracker: Tracker<Self>,
}

impl SwcBackgroundManager {
    /// Makes sure that every allocation needed to publish a new background is
    /// available before anything becomes visible.
    fn reserve(&self, surface: &WlSurface) -> Result<(), ReserveError> {
        let limit = self.client.max_backgrounds.get();
        if self.client.objects.backgrounds.len() >= limit {
            return Err(ReserveError::TooManyBackgrounds(limit));
        }
        self.client
            .objects
            .backgrounds
            .reserve_one()
            .map_err(|_| ReserveError::Binding(ClientError::OutOfMemory))?;
        surface
            .reserve_destroy_listener()
            .map_err(ReserveError::Binding)?;
        self.client
            .reserve_client_obj()
            .map_err(ReserveError::Resource)?;
        Ok(())
    }

    fn no_memory(&self, e: impl std::error::Error) {
        log::warn!(
            "Client {}: Could not create a background: {}",
            self.client.id,
            ErrorFmt(e),
        );
        self.client.post_no_memory();
    }
}

impl SwcBackgroundManagerRequestHandler for SwcBackgroundManager {
    type Error = SwcBackgroundManagerError;

    fn get_background(&self, req: GetBackground, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        let surface = self.client.lookup(req.surface)?;
        let screen: Rc<SwcScreen> = self.client.lookup(req.screen)?;
        self.client.objects.check_client_id(req.id.into())?;
        let rect = screen.global.geometry();
        if let Err(e) = self.reserve(&surface) {
            self.no_memory(e);
            return Ok(());
        }
        let view = match self.client.state.views.create_view(&surface) {
            Ok(v) => v,
            Err(e) => {
                self.no_memory(SwcBackgroundManagerError::CreateView(e));
                return Ok(());
            }
        };
        view.set_background(true);
        view.set_position(rect.x1(), rect.y1());
        view.set_size(rect.width(), rect.height());
        let background = SwcBackground::new(req.id, &self.client, &surface, view, self.version);
        track!(self.client, background);
        if let Err(e) = self.client.add_client_obj(&background) {
            background.detach();
            return Err(e.into());
        }
        background.install();
        if let Some(view) = background.view() {
            view.show();
        }
        log::debug!(
            "Client {}: Background {} shows surface {} on screen {} at {:?}",
            self.client.id,
            background.id,
            surface.id,
            screen.global.name,
            rect,
        );
        Ok(())
    }
}

object_base! {
    self = SwcBackgroundManager;
    version = self.version;
}

impl Object for SwcBackgroundManager {}

simple_add_obj!(SwcBackgroundManager);

#[derive(Debug, Error)]
pub enum SwcBackgroundManagerError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("Could not create a view")]
    CreateView(#[source] ViewError),
}
efrom!(SwcBackgroundManagerError, ClientError);

#[derive(Debug, Error)]
enum ReserveError {
    #[error("The client has reached its limit of {0} backgrounds")]
    TooManyBackgrounds(usize),
    #[error("Could not reserve memory for the binding")]
    Binding(#[source] ClientError),
    #[error("Could not reserve the protocol object")]
    Resource(#[source] ClientError),
}
