pub use ssa_core::prelude::*;

// vim: ts=4
