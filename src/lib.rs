#![allow(clippy::derive_partial_eq_without_eq)]

pub mod config;
pub mod error;
pub mod exerciser;
pub mod greeter;
pub mod logging;

pub mod proto {
    // Normally `tonic::include_proto!("helloworld")`, pulling in the module
    // emitted by build.rs. When `protoc` is unavailable at build time, the
    // equivalent generated module is checked in at src/proto_gen.rs instead.
    include!("proto_gen.rs");
}

#[macro_use]
extern crate log;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
