pub use error::{ClientError, LookupError, ParserError};
use {
    crate::{
        client::objects::Objects,
        ifs::wl_display::WlDisplay,
        leaks::Tracker,
        object::{Interface, Object, ObjectId, WL_DISPLAY_ID},
        state::State,
        utils::{
            buffd::{MsgFormatter, MsgParser, MsgParserError},
            errorfmt::ErrorFmt,
            numcell::NumCell,
        },
    },
    ahash::AHashMap,
    std::{
        cell::{Cell, RefCell},
        error::Error,
        fmt::{Debug, Display, Formatter},
        mem,
        rc::Rc,
    },
};

mod error;
pub mod objects;
mod tasks;

#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct ClientId(u64);

impl ClientId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The set of connected clients.
///
/// A client that has been shut down stays in the set until it is killed so that
/// the events describing its fatal error can still be read.
pub struct Clients {
    next_client_id: NumCell<u64>,
    clients: RefCell<AHashMap<ClientId, ClientHolder>>,
}

impl Clients {
    pub fn new() -> Self {
        Self {
            next_client_id: NumCell::new(1),
            clients: Default::default(),
        }
    }

    pub fn clear(&self) {
        let clients = mem::take(&mut *self.clients.borrow_mut());
        drop(clients);
    }

    pub fn get(&self, id: ClientId) -> Option<Rc<Client>> {
        self.clients.borrow().get(&id).map(|c| c.data.clone())
    }

    pub fn len(&self) -> usize {
        self.clients.borrow().len()
    }

    /// Registers a new connection. The returned client already owns its `wl_display`.
    pub fn spawn(&self, state: &Rc<State>) -> Result<Rc<Client>, ClientError> {
        let id = ClientId(self.next_client_id.fetch_add(1));
        let client = Rc::new(Client {
            id,
            state: state.clone(),
            objects: Objects::new(),
            out: Default::default(),
            shutdown: Cell::new(false),
            killed: Cell::new(false),
            max_objects: Cell::new(state.config.max_objects_per_client),
            max_backgrounds: Cell::new(state.config.max_backgrounds_per_client),
            tracker: Default::default(),
        });
        track!(client, client);
        let display = Rc::new(WlDisplay::new(&client));
        track!(client, display);
        client.objects.display.set(Some(display.clone()));
        client.add_client_obj(&display)?;
        log::info!("Client {} connected", id);
        self.clients.borrow_mut().insert(
            id,
            ClientHolder {
                data: client.clone(),
            },
        );
        Ok(client)
    }

    /// Drops the connection and all of its objects.
    pub fn kill(&self, id: ClientId) {
        let holder = self.clients.borrow_mut().remove(&id);
        if let Some(holder) = holder {
            log::info!("Removing client {}", id);
            holder.data.shutdown.set(true);
        }
    }

    /// Stops processing requests of the client. Events that are already queued can
    /// still be read before the client is killed.
    pub fn shutdown(&self, id: ClientId) {
        if let Some(client) = self.get(id)
            && !client.shutdown.replace(true)
        {
            log::info!("Shutting down client {}", id);
        }
    }

    /// Calls `f` for every client that still processes requests.
    pub fn broadcast(&self, mut f: impl FnMut(&Rc<Client>)) {
        let clients: Vec<_> = self
            .clients
            .borrow()
            .values()
            .map(|c| c.data.clone())
            .filter(|c| !c.is_shut_down())
            .collect();
        clients.iter().for_each(|c| f(c));
    }
}

impl Drop for Clients {
    fn drop(&mut self) {
        self.clear();
    }
}

pub struct ClientHolder {
    pub data: Rc<Client>,
}

impl Drop for ClientHolder {
    fn drop(&mut self) {
        self.data.killed.set(true);
        self.data.objects.destroy();
        self.data.out.borrow_mut().clear();
    }
}

pub trait EventFormatter: Debug {
    fn format(self, fmt: &mut MsgFormatter<'_>);
    fn id(&self) -> ObjectId;
    fn interface(&self) -> Interface;
}

pub trait RequestParser<'a>: Debug + Sized {
    fn parse(parser: &mut MsgParser<'a>) -> Result<Self, MsgParserError>;
}

pub struct Client {
    pub id: ClientId,
    pub state: Rc<State>,
    pub objects: Objects,
    out: RefCell<Vec<u8>>,
    shutdown: Cell<bool>,
    killed: Cell<bool>,
    pub max_objects: Cell<usize>,
    pub max_backgrounds: Cell<usize>,
    pub tracker: Tracker<Client>,
}

impl Client {
    /// Handles a batch of complete request messages.
    pub fn dispatch(self: &Rc<Self>, data: &[u8]) {
        tasks::dispatch(self, data);
    }

    /// Takes the events that have been queued since the last call.
    pub fn take_pending(&self) -> Vec<u8> {
        mem::take(&mut *self.out.borrow_mut())
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.get()
    }

    /// Runs `f` with the client's display and shuts the client down afterwards.
    fn fatal(&self, f: impl FnOnce(&WlDisplay)) {
        match self.display() {
            Ok(d) => {
                f(&d);
                self.state.clients.shutdown(self.id);
            }
            Err(e) => {
                log::error!("Client {} has no display: {}", self.id, ErrorFmt(e));
                self.state.clients.kill(self.id);
            }
        }
    }

    pub fn invalid_object(&self, id: ObjectId) {
        log::error!("Client {} used the unknown object {}", self.id, id);
        self.fatal(|d| d.send_invalid_object(id));
    }

    pub fn invalid_request(&self, obj: &dyn Object, request: u32) {
        log::error!(
            "Client {} sent the unknown request {} to {}@{}",
            self.id,
            request,
            obj.interface().name(),
            obj.id(),
        );
        self.fatal(|d| d.send_invalid_request(obj, request));
    }

    pub fn display(&self) -> Result<Rc<WlDisplay>, ClientError> {
        self.objects
            .display
            .get()
            .ok_or(ClientError::NotADisplay(WL_DISPLAY_ID))
    }

    pub fn parse<'a, R: RequestParser<'a>>(
        &self,
        obj: &impl Object,
        mut parser: MsgParser<'a>,
    ) -> Result<R, MsgParserError> {
        let res = R::parse(&mut parser)?;
        parser.eof()?;
        log::trace!(
            "Client {} -> {}@{}.{:?}",
            self.id,
            obj.interface().name(),
            obj.id(),
            res
        );
        Ok(res)
    }

    pub fn error(&self, message: impl Error) {
        let msg = ErrorFmt(message).to_string();
        log::error!("Client {}: {}", self.id, msg);
        self.fatal(|d| d.send_implementation_error(msg));
    }

    pub fn protocol_error(&self, obj: &dyn Object, code: u32, message: &str) {
        log::warn!(
            "Client {}: Protocol error {} on {}@{}: {}",
            self.id,
            code,
            obj.interface().name(),
            obj.id(),
            message,
        );
        self.fatal(|d| d.send_error(obj.id(), code, message));
    }

    /// Informs the client that the server ran out of resources while serving it.
    pub fn post_no_memory(&self) {
        self.fatal(|d| d.send_no_memory());
    }

    pub fn event<T: EventFormatter>(&self, event: T) {
        if self.killed.get() {
            return;
        }
        log::trace!(
            "Client {} <= {}@{}.{:?}",
            self.id,
            event.interface().name(),
            event.id(),
            event,
        );
        let mut out = self.out.borrow_mut();
        let mut fmt = MsgFormatter::new(&mut out);
        event.format(&mut fmt);
        fmt.write_len();
    }

    /// Checks that one more object can be added to the client without exceeding its
    /// quota and without allocating.
    pub fn reserve_client_obj(&self) -> Result<(), ClientError> {
        self.objects.reserve(self.max_objects.get())
    }

    pub fn add_client_obj<T: WaylandObject>(&self, obj: &Rc<T>) -> Result<(), ClientError> {
        self.objects
            .add_client_object(obj.clone(), self.max_objects.get())?;
        obj.clone().add(self);
        Ok(())
    }

    pub fn remove_obj<T: WaylandObject>(&self, obj: &T) -> Result<(), ClientError> {
        obj.remove(self);
        let id = obj.id();
        self.objects.remove_obj(id)?;
        self.display()?.send_delete_id(id);
        Ok(())
    }

    pub fn lookup<Id: WaylandObjectLookup>(&self, id: Id) -> Result<Rc<Id::Object>, ClientError> {
        Id::lookup(self, id).ok_or_else(|| {
            ClientError::LookupError(LookupError {
                interface: Id::INTERFACE,
                id: id.into(),
            })
        })
    }
}

pub trait WaylandObject: Object {
    fn add(self: Rc<Self>, client: &Client) {
        let _ = client;
    }
    fn remove(&self, client: &Client) {
        let _ = client;
    }
}

pub trait WaylandObjectLookup: Copy + Into<ObjectId> {
    type Object;
    const INTERFACE: Interface;

    fn lookup(client: &Client, id: Self) -> Option<Rc<Self::Object>>;
}
