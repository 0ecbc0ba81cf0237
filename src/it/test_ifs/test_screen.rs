use {
    crate::{
        it::{
            test_error::{TestError, TestResult},
            test_object::{ParseFull, TestObject},
            test_transport::TestTransport,
        },
        rect::Rect,
        utils::{buffd::MsgParser, numcell::NumCell},
        wire::{SwcScreenId, swc_screen::*},
    },
    std::{cell::Cell, rc::Rc},
};

pub struct TestScreen {
    pub id: SwcScreenId,
    pub tran: Rc<TestTransport>,
    pub geometry: Cell<Option<Rect>>,
    pub geometry_events: NumCell<u32>,
}

impl TestScreen {
    pub fn destroy(&self) -> TestResult {
        self.tran.send(Destroy { self_id: self.id })
    }

    pub fn geometry(&self) -> TestResult<Rect> {
        match self.geometry.get() {
            Some(g) => Ok(g),
            _ => bail!("Screen {} has not received its geometry", self.id),
        }
    }

    fn handle_geometry(&self, parser: MsgParser<'_>) -> Result<(), TestError> {
        let ev = Geometry::parse_full(parser)?;
        let Some(rect) = Rect::new_sized(ev.x, ev.y, ev.width as i32, ev.height as i32) else {
            bail!("Compositor sent an invalid screen geometry: {:?}", ev);
        };
        self.geometry.set(Some(rect));
        self.geometry_events.fetch_add(1);
        Ok(())
    }
}

test_object! {
    TestScreen, SwcScreen;

    GEOMETRY => handle_geometry,
}

impl TestObject for TestScreen {}
