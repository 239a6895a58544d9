pub mod health;
pub mod parts;
pub mod suppliers;

pub use health::*;
pub use parts::*;
pub use suppliers::*;
