pub mod init;
pub mod replay;
pub mod script;

pub use init::{init, InitArgs};
pub use replay::{replay, ReplayArgs};
