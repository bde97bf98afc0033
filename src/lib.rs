//! TetrECS (workspace facade crate).
//!
//! Re-exports the member crates under one name: `tetrecs::{core,input,net,types}`.
//! The implementation lives in dedicated crates under `crates/`.

pub use tetrecs_core as core;
pub use tetrecs_input as input;
pub use tetrecs_net as net;
pub use tetrecs_types as types;
