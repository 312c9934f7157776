// HTTP routes
pub mod health;
pub mod verify;

pub use health::*;
pub use verify::*;
