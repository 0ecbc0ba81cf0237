use {
    crate::{
        ifs::wl_surface::WlSurface,
        it::{test_error::TestResult, test_object::TestObject, test_transport::TestTransport},
        wire::{WlSurfaceId, wl_surface::*},
    },
    std::{cell::Cell, rc::Rc},
};

pub struct TestSurface {
    pub id: WlSurfaceId,
    pub tran: Rc<TestTransport>,
    pub destroyed: Cell<bool>,
}

impl TestSurface {
    pub fn destroy(&self) -> TestResult {
        if !self.destroyed.replace(true) {
            self.tran.send(Destroy { self_id: self.id })?;
        }
        Ok(())
    }

    /// Returns the compositor's object for this surface.
    pub fn server(&self) -> TestResult<Rc<WlSurface>> {
        match self.tran.server.objects.surfaces.get(&self.id) {
            Some(s) => Ok(s),
            _ => bail!("Compositor has no surface {}", self.id),
        }
    }
}

test_object! {
    TestSurface, WlSurface;
}

impl TestObject for TestSurface {
    fn on_remove(&self, _transport: &TestTransport) {
        self.destroyed.set(true);
    }
}
