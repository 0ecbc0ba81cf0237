use {
    crate::{
        it::{
            test_error::{TestError, TestResult},
            test_object::{ParseFull, TestObject},
            test_transport::TestTransport,
        },
        utils::buffd::MsgParser,
        wire::{WlBufferId, wl_buffer::*},
    },
    std::rc::Rc,
};

pub struct TestBuffer {
    pub id: WlBufferId,
    pub tran: Rc<TestTransport>,
}

impl TestBuffer {
    pub fn destroy(&self) -> TestResult {
        self.tran.send(Destroy { self_id: self.id })
    }

    fn handle_release(&self, parser: MsgParser<'_>) -> Result<(), TestError> {
        let _ev = Release::parse_full(parser)?;
        bail!("Compositor released buffer {} which it never used", self.id)
    }
}

test_object! {
    TestBuffer, WlBuffer;

    RELEASE => handle_release,
}

impl TestObject for TestBuffer {}
