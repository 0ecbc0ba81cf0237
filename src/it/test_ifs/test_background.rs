use {
    crate::{
        it::{test_error::TestResult, test_object::TestObject, test_transport::TestTransport},
        wire::{SwcBackgroundId, swc_background::*},
    },
    std::{cell::Cell, rc::Rc},
};

pub struct TestBackground {
    pub id: SwcBackgroundId,
    pub tran: Rc<TestTransport>,
    pub deleted: Cell<bool>,
}

impl TestBackground {
    pub fn destroy(&self) -> TestResult {
        self.tran.send(Destroy { self_id: self.id })
    }
}

test_object! {
    TestBackground, SwcBackground;
}

impl TestObject for TestBackground {
    fn on_remove(&self, _transport: &TestTransport) {
        self.deleted.set(true);
    }
}
