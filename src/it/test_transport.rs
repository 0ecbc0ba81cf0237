use {
    crate::{
        client::{Client, EventFormatter},
        it::{
            test_error::TestResult,
            test_ifs::{test_callback::TestCallback, test_registry::TestRegistry},
            test_object::TestObject,
            testrun::TestRun,
        },
        object::{ObjectId, WL_DISPLAY_ID},
        utils::{
            buffd::{HEADER_SIZE, MsgFormatter, MsgParser, read_header},
            copyhashmap::CopyHashMap,
            numcell::NumCell,
        },
        wire::wl_display,
    },
    std::{
        cell::{Cell, RefCell},
        rc::Rc,
    },
};

/// A `wl_display.error` event received by a test client.
#[derive(Clone, Debug)]
pub struct TestProtocolError {
    pub object_id: ObjectId,
    pub code: u32,
    pub message: String,
}

/// The client end of an in-memory connection.
///
/// Every request is handed to the server immediately and the events it queues are
/// routed to the test objects before `send` returns.
pub struct TestTransport {
    pub run: Rc<TestRun>,
    pub server: Rc<Client>,
    pub objects: CopyHashMap<ObjectId, Rc<dyn TestObject>>,
    pub next_id: NumCell<u32>,
    pub killed: Cell<bool>,
    pub expect_errors: Cell<bool>,
    pub errors: RefCell<Vec<TestProtocolError>>,
    /// Ids from `wl_display.delete_id` in the order they arrived.
    pub deleted_ids: RefCell<Vec<ObjectId>>,
}

impl TestTransport {
    pub fn get_registry(self: &Rc<Self>) -> TestResult<Rc<TestRegistry>> {
        let reg = Rc::new(TestRegistry {
            id: self.id(),
            tran: self.clone(),
            globals: Default::default(),
        });
        self.add_obj(reg.clone())?;
        self.send(wl_display::GetRegistry {
            self_id: WL_DISPLAY_ID,
            registry: reg.id,
        })?;
        Ok(reg)
    }

    pub fn add_obj(&self, obj: Rc<dyn TestObject>) -> TestResult {
        tassert!(!self.killed.get());
        let id = obj.id();
        if let Some(old) = self.objects.set(id, obj) {
            bail!("Id {} is already used by a {}", id, old.interface().name());
        }
        Ok(())
    }

    /// Disconnects the client.
    pub fn kill(&self) {
        if self.killed.replace(true) {
            return;
        }
        self.run.state.clients.kill(self.server.id);
        let objects: Vec<_> = self.objects.lock().drain().map(|(_, o)| o).collect();
        for object in objects {
            object.on_remove(self);
        }
    }

    /// Performs a round trip and returns whether the compositor answered.
    pub fn sync(self: &Rc<Self>) -> TestResult<bool> {
        let cb = Rc::new(TestCallback {
            id: self.id(),
            tran: self.clone(),
            done: Cell::new(false),
        });
        self.add_obj(cb.clone())?;
        self.send(wl_display::Sync {
            self_id: WL_DISPLAY_ID,
            callback: cb.id,
        })?;
        Ok(cb.done.get())
    }

    pub fn id<T: From<ObjectId>>(&self) -> T {
        ObjectId::from_raw(self.next_id.fetch_add(1)).into()
    }

    pub fn error(&self, msg: &str) {
        let msg = format!("In client {}: {}", self.server.id, msg);
        log::error!("{}", msg);
        self.run.errors.borrow_mut().push(msg);
    }

    /// Hands a request to the compositor and processes its response.
    pub fn send<M: EventFormatter>(&self, msg: M) -> TestResult {
        if self.killed.get() {
            return Ok(());
        }
        let (id, interface) = (msg.id(), msg.interface().name());
        let Some(obj) = self.objects.get(&id) else {
            bail!("Cannot send {}@{}: the object is gone", interface, id);
        };
        tassert_eq!(obj.interface().name(), interface);
        let mut buf = vec![];
        let mut fmt = MsgFormatter::new(&mut buf);
        msg.format(&mut fmt);
        fmt.write_len();
        self.server.dispatch(&buf);
        self.dispatch()
    }

    /// Routes the events that the compositor has queued for this client.
    pub fn dispatch(&self) -> TestResult {
        let data = self.server.take_pending();
        let mut rest = &data[..];
        while !rest.is_empty() {
            let Some((obj_id, len, event)) = read_header(rest) else {
                bail!("Event header is truncated");
            };
            tassert!(len >= HEADER_SIZE && len % 4 == 0);
            let Some(body) = rest.get(HEADER_SIZE..len) else {
                bail!("Event body is truncated");
            };
            let obj_id = ObjectId::from_raw(obj_id);
            let Some(object) = self.objects.get(&obj_id) else {
                bail!("Event {} targets the unknown object {}", event, obj_id);
            };
            object.handle_event(event, MsgParser::new(body))?;
            rest = &rest[len..];
        }
        Ok(())
    }

    /// Returns whether the compositor still knows an object with this id.
    pub fn server_has_obj<I: Into<ObjectId>>(&self, id: I) -> bool {
        self.server.objects.get_obj(id.into()).is_ok()
    }
}
