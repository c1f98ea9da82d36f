pub mod city_source;
pub mod file_logger;
pub mod multi_logger;
pub mod noop_logger;
pub mod tracing_logger;
pub mod weather_api;

pub use city_source::*;
pub use file_logger::*;
pub use multi_logger::*;
pub use noop_logger::*;
pub use tracing_logger::*;
pub use weather_api::*;
