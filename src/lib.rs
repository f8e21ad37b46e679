pub mod aggregator;
pub mod environment;
pub mod notifier;
pub mod search;
pub mod store;
pub mod web;

pub use web::start_web_server;
