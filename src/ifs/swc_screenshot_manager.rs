use {
    crate::{
        client::{Client, ClientError},
        gfx_api::GfxError,
        globals::{Global, GlobalName},
        leaks::Tracker,
        object::{Object, Version},
        utils::errorfmt::ErrorFmt,
        wire::{SwcScreenshotManagerId, swc_screenshot_manager::*},
    },
    std::rc::Rc,
    thiserror::Error,
};

pub const INVALID_BUFFER: u32 = 0;

pub struct SwcScreenshotManagerGlobal {
    name: GlobalName,
}

impl SwcScreenshotManagerGlobal {
    pub fn new(name: GlobalName) -> Self {
        Self { name }
    }

    fn bind_(
        self: Rc<Self>,
        id: SwcScreenshotManagerId,
        client: &Rc<Client>,
        version: Version,
    ) -> Result<(), SwcScreenshotManagerError> {
        let obj = Rc::new(SwcScreenshotManager {
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
    SwcScreenshotManagerGlobal,
    SwcScreenshotManager,
    SwcScreenshotManagerError
);

impl Global for SwcScreenshotManagerGlobal {
    fn singleton(&self) -> bool {
        true
    }

    fn version(&self) -> u32 {
        1
    }
}

simple_add_global!(SwcScreenshotManagerGlobal);

pub struct SwcScreenshotManager {
    pub id: SwcScreenshotManagerId,
    pub client: Rc<Client>,
    pub version: Version,
    pub tracker: Tracker<Self>,
}

impl SwcScreenshotManager {
    fn send_done(&self) {
        self.client.event(Done { self_id: self.id });
    }
}

impl SwcScreenshotManagerRequestHandler for SwcScreenshotManager {
    type Error = SwcScreenshotManagerError;

    fn capture(&self, req: Capture, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        let screen = self.client.lookup(req.screen)?;
        let buffer = self.client.lookup(req.buffer)?;
        let gfx = &self.client.state.gfx;
        let fb = match gfx.resolve_buffer(&buffer) {
            Ok(fb) => fb,
            Err(e) => {
                let msg = format!("invalid buffer: {}", ErrorFmt(e));
                self.client.protocol_error(self, INVALID_BUFFER, &msg);
                return Ok(());
            }
        };
        log::debug!(
            "Client {}: Capturing screen {} into a {:?} buffer",
            self.client.id,
            screen.global.name,
            fb.size(),
        );
        gfx.render_screen(&screen.global, &fb)
            .map_err(SwcScreenshotManagerError::RenderFailed)?;
        self.send_done();
        Ok(())
    }
}

object_base! {
    self = SwcScreenshotManager;
    version = self.version;
}

impl Object for SwcScreenshotManager {}

simple_add_obj!(SwcScreenshotManager);

#[derive(Debug, Error)]
pub enum SwcScreenshotManagerError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("Could not render the screen")]
    RenderFailed(#[source] GfxError),
}
efrom!(SwcScreenshotManagerError, ClientError);
