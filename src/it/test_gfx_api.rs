use {
    crate::{
        gfx_api::{GfxContext, GfxError, GfxFramebuffer},
        ifs::{swc_screen::SwcScreenGlobal, wl_buffer::WlBuffer},
        it::test_views::TestViews,
        rect::Rect,
        utils::numcell::NumCell,
    },
    std::{
        any::Any,
        cell::{Cell, RefCell},
        fmt::{Debug, Formatter},
        rc::Rc,
    },
    thiserror::Error,
};

/// The color of screen areas that no view covers.
pub const CLEAR_COLOR: u32 = 0xff000000;

#[derive(Debug, Error)]
enum TestGfxError {
    #[error("The buffer is not backed by renderable memory")]
    UnsupportedBuffer,
    #[error("The framebuffer was not created by this renderer")]
    ForeignFramebuffer,
    #[error("Rendering was configured to fail")]
    Injected,
}

/// Client memory that the test renderer can draw into. One `u32` per pixel.
pub struct TestBufferStorage {
    pub width: i32,
    pub height: i32,
    pub pixels: RefCell<Vec<u32>>,
}

impl TestBufferStorage {
    pub fn new(width: i32, height: i32) -> Self {
        let len = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            pixels: RefCell::new(vec![0; len]),
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .borrow()
            .get((y * self.width + x) as usize)
            .copied()
    }
}

pub struct TestFramebuffer {
    storage: Rc<TestBufferStorage>,
}

impl Debug for TestFramebuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestFramebuffer")
            .field("width", &self.storage.width)
            .field("height", &self.storage.height)
            .finish()
    }
}

impl GfxFramebuffer for TestFramebuffer {
    fn size(&self) -> (i32, i32) {
        (self.storage.width, self.storage.height)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A software renderer that fills every visible view with a solid color.
pub struct TestGfx {
    views: Rc<TestViews>,
    pub renders: NumCell<u32>,
    pub fail_next_render: Cell<bool>,
}

impl TestGfx {
    pub fn new(views: &Rc<TestViews>) -> Self {
        Self {
            views: views.clone(),
            renders: NumCell::new(0),
            fail_next_render: Cell::new(false),
        }
    }
}

impl GfxContext for TestGfx {
    fn resolve_buffer(&self, buffer: &WlBuffer) -> Result<Rc<dyn GfxFramebuffer>, GfxError> {
        match buffer.storage.clone().downcast::<TestBufferStorage>() {
            Ok(storage) => Ok(Rc::new(TestFramebuffer { storage })),
            Err(_) => Err(GfxError(Box::new(TestGfxError::UnsupportedBuffer))),
        }
    }

    fn render_screen(
        &self,
        screen: &SwcScreenGlobal,
        fb: &Rc<dyn GfxFramebuffer>,
    ) -> Result<(), GfxError> {
        if self.fail_next_render.take() {
            return Err(GfxError(Box::new(TestGfxError::Injected)));
        }
        let Some(fb) = fb.as_any().downcast_ref::<TestFramebuffer>() else {
            return Err(GfxError(Box::new(TestGfxError::ForeignFramebuffer)));
        };
        let storage = &fb.storage;
        let screen_rect = screen.geometry();
        let target = Rect::new_sized(0, 0, storage.width, storage.height).unwrap_or_default();
        let mut pixels = storage.pixels.borrow_mut();
        pixels.fill(CLEAR_COLOR);
        for view in self.views.visible() {
            let Some(rect) = view.rect() else {
                continue;
            };
            let rect = rect
                .move_(-screen_rect.x1(), -screen_rect.y1())
                .intersect(target);
            if rect.is_empty() {
                continue;
            }
            for y in rect.y1()..rect.y2() {
                let row = (y * storage.width) as usize;
                pixels[row + rect.x1() as usize..row + rect.x2() as usize].fill(view.color);
            }
        }
        self.renders.fetch_add(1);
        Ok(())
    }
}
