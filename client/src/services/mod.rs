//! Client-side services

pub mod geolocation;
pub mod upload;

pub use geolocation::{
    locate_best_effort, provider_from_config, FixedLocation, LocationProvider, NoLocation,
};
pub use upload::{read_image, UploadController};
