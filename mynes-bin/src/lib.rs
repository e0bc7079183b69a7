#[macro_use]
extern crate tracing;

#[allow(unused)]
use mynes_common::mem;

pub mod logging;

pub mod cli;
mod err;
mod palette;
