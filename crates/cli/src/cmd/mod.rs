mod custom;

pub use custom::{CustomArgs, cmd_custom};
