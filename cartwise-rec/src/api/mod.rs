//! HTTP API handlers for cartwise-rec

pub mod error;
pub mod products;
pub mod recommendations;
pub mod status;

pub use error::ApiError;
pub use products::list_products;
pub use recommendations::get_recommendations;
pub use status::status_routes;
