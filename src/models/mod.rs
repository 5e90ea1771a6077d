pub mod download;
pub mod generation;

pub use download::*;
pub use generation::*;
