#![allow(dead_code)]

pub mod faulty_store;
pub mod test_engine;

pub use faulty_store::*;
pub use test_engine::*;
