pub mod swc_background;
pub mod swc_background_manager;
pub mod swc_screen;
pub mod swc_screenshot_manager;
pub mod wl_buffer;
pub mod wl_callback;
pub mod wl_compositor;
pub mod wl_display;
pub mod wl_registry;
pub mod wl_surface;
