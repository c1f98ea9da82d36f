pub mod logger;
pub mod weather;

pub use logger::*;
pub use weather::*;
