use {
    crate::{
        it::{
            test_error::{TestError, TestResult},
            test_ifs::{
                test_background_manager::TestBackgroundManager,
                test_compositor::TestCompositor, test_screen::TestScreen,
                test_screenshot_manager::TestScreenshotManager,
            },
            test_object::{ParseFull, TestObject},
            test_transport::TestTransport,
        },
        utils::{buffd::MsgParser, copyhashmap::CopyHashMap},
        wire::{WlRegistryId, wl_registry::*},
    },
    std::rc::Rc,
};

pub struct TestGlobal {
    pub name: u32,
    pub interface: String,
    pub version: u32,
}

pub struct TestRegistry {
    pub id: WlRegistryId,
    pub tran: Rc<TestTransport>,
    pub globals: CopyHashMap<u32, Rc<TestGlobal>>,
}

impl TestRegistry {
    /// Returns the advertised globals with this interface ordered by name.
    pub fn find_all(&self, interface: &str) -> Vec<Rc<TestGlobal>> {
        let mut res: Vec<_> = self
            .globals
            .lock()
            .values()
            .filter(|g| g.interface == interface)
            .cloned()
            .collect();
        res.sort_by_key(|g| g.name);
        res
    }

    pub fn find(&self, interface: &str) -> TestResult<Rc<TestGlobal>> {
        match self.find_all(interface).into_iter().next() {
            Some(g) => Ok(g),
            _ => bail!("Compositor did not advertise a {} global", interface),
        }
    }

    pub fn bind<O: TestObject>(&self, obj: &Rc<O>, name: u32, version: u32) -> TestResult {
        self.tran.add_obj(obj.clone())?;
        self.tran.send(Bind {
            self_id: self.id,
            name,
            interface: obj.interface().name(),
            version,
            id: obj.id(),
        })
    }

    pub fn get_compositor(&self) -> TestResult<Rc<TestCompositor>> {
        let global = self.find("wl_compositor")?;
        let obj = Rc::new(TestCompositor {
            id: self.tran.id(),
            tran: self.tran.clone(),
        });
        self.bind(&obj, global.name, 1)?;
        Ok(obj)
    }

    pub fn get_background_manager(&self) -> TestResult<Rc<TestBackgroundManager>> {
        let global = self.find("swc_background_manager")?;
        let obj = Rc::new(TestBackgroundManager {
            id: self.tran.id(),
            tran: self.tran.clone(),
        });
        self.bind(&obj, global.name, 1)?;
        Ok(obj)
    }

    pub fn get_screenshot_manager(&self) -> TestResult<Rc<TestScreenshotManager>> {
        let global = self.find("swc_screenshot_manager")?;
        let obj = Rc::new(TestScreenshotManager {
            id: self.tran.id(),
            tran: self.tran.clone(),
            done: Default::default(),
        });
        self.bind(&obj, global.name, 1)?;
        Ok(obj)
    }

    pub fn bind_screen(&self, name: u32) -> TestResult<Rc<TestScreen>> {
        let obj = Rc::new(TestScreen {
            id: self.tran.id(),
            tran: self.tran.clone(),
            geometry: Default::default(),
            geometry_events: Default::default(),
        });
        self.bind(&obj, name, 1)?;
        Ok(obj)
    }

    fn handle_global(&self, parser: MsgParser<'_>) -> Result<(), TestError> {
        let ev = Global::parse_full(parser)?;
        let global = Rc::new(TestGlobal {
            name: ev.name,
            interface: ev.interface.to_string(),
            version: ev.version,
        });
        if self.globals.set(ev.name, global).is_some() {
            bail!("Compositor sent global {} multiple times", ev.name);
        }
        Ok(())
    }

    fn handle_global_remove(&self, parser: MsgParser<'_>) -> Result<(), TestError> {
        let ev = GlobalRemove::parse_full(parser)?;
        if self.globals.remove(&ev.name).is_none() {
            bail!(
                "Compositor sent global_remove for {} which does not exist",
                ev.name
            );
        }
        Ok(())
    }
}

test_object! {
    TestRegistry, WlRegistry;

    GLOBAL => handle_global,
    GLOBAL_REMOVE => handle_global_remove,
}

impl TestObject for TestRegistry {}
