pub mod buffer;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod ports;
pub mod types;

pub use buffer::*;
pub use merge::*;
pub use output::*;
pub use pipeline::*;
pub use ports::*;
pub use types::*;
