pub mod weather_layer_service;

pub use weather_layer_service::*;
