use {
    crate::{
        it::{
            test_error::TestResult,
            test_ifs::{
                test_background::TestBackground, test_screen::TestScreen,
                test_surface::TestSurface,
            },
            test_object::TestObject,
            test_transport::TestTransport,
        },
        wire::{SwcBackgroundManagerId, swc_background_manager::*},
    },
    std::rc::Rc,
};

pub struct TestBackgroundManager {
    pub id: SwcBackgroundManagerId,
    pub tran: Rc<TestTransport>,
}

impl TestBackgroundManager {
    pub fn get_background(
        &self,
        surface: &TestSurface,
        screen: &TestScreen,
    ) -> TestResult<Rc<TestBackground>> {
        let background = Rc::new(TestBackground {
            id: self.tran.id(),
            tran: self.tran.clone(),
            deleted: Default::default(),
        });
        self.tran.add_obj(background.clone())?;
        self.tran.send(GetBackground {
            self_id: self.id,
            id: background.id,
            surface: surface.id,
            screen: screen.id,
        })?;
        Ok(background)
    }
}

test_object! {
    TestBackgroundManager, SwcBackgroundManager;
}

impl TestObject for TestBackgroundManager {}
