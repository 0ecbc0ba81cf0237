use {
    crate::{
        client::{Client, ClientError},
        leaks::Tracker,
        object::{Object, Version},
        rect::Rect,
        wire::{WlBufferId, wl_buffer::*},
    },
    std::{any::Any, rc::Rc},
    thiserror::Error,
};

/// A client buffer registered by the buffer layer.
///
/// `storage` is opaque to the protocol objects. The renderer decides whether it can
/// draw into it.
pub struct WlBuffer {
    pub id: WlBufferId,
    pub client: Rc<Client>,
    pub rect: Rect,
    pub storage: Rc<dyn Any>,
    pub tracker: Tracker<Self>,
}

impl WlBuffer {
    pub fn new(
        id: WlBufferId,
        client: &Rc<Client>,
        width: i32,
        height: i32,
        storage: Rc<dyn Any>,
    ) -> Result<Self, WlBufferError> {
        let Some(rect) = Rect::new_sized(0, 0, width, height) else {
            return Err(WlBufferError::InvalidSize(width, height));
        };
        Ok(Self {
            id,
            client: client.clone(),
            rect,
            storage,
            tracker: Default::default(),
        })
    }

    /// Creates a buffer object with the client-chosen `id` and adds it to the client.
    pub fn register(
        client: &Rc<Client>,
        id: WlBufferId,
        width: i32,
        height: i32,
        storage: Rc<dyn Any>,
    ) -> Result<Rc<Self>, WlBufferError> {
        let buffer = Rc::new(Self::new(id, client, width, height, storage)?);
        track!(client, buffer);
        client.add_client_obj(&buffer)?;
        Ok(buffer)
    }
}

impl WlBufferRequestHandler for WlBuffer {
    type Error = WlBufferError;

    fn destroy(&self, _req: Destroy, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.client.remove_obj(self)?;
        Ok(())
    }
}

object_base! {
    self = WlBuffer;
    version = Version(1);
}

impl Object for WlBuffer {}

dedicated_add_obj!(WlBuffer, WlBufferId, buffers);

#[derive(Debug, Error)]
pub enum WlBufferError {
    #[error("Buffer size {0}x{1} is invalid")]
    InvalidSize(i32, i32),
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(WlBufferError, ClientError);
