//! Adapter traits implemented by every resource and data source

mod data_source;
mod resource;

pub use data_source::DataSource;
pub use resource::Resource;
