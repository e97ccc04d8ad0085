pub mod aggregate;
pub mod clean;
pub mod config;
pub mod crawl;
pub mod fetch;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod query;
pub mod store;
pub mod timing;
