#![allow(
    clippy::len_zero,
    clippy::needless_lifetimes,
    clippy::enum_variant_names,
    clippy::new_without_default
)]

#[macro_use]
mod macros;
#[macro_use]
pub mod leaks;

pub mod client;
pub mod config;
pub mod gfx_api;
pub mod globals;
pub mod ifs;
pub mod logger;
pub mod object;
pub mod rect;
pub mod state;
pub mod utils;
pub mod view;
pub mod wire;

#[cfg(test)]
mod it;
