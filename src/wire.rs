#![allow(non_upper_case_globals, clippy::all)]

include!(concat!(env!("OUT_DIR"), "/wire.rs"));
