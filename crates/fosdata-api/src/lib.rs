// fosdata-api: Async Rust client for the appliance CMDB REST API

pub mod cmdb;
pub mod error;
pub mod transport;

pub use cmdb::client::CmdbClient;
pub use cmdb::models::RawObject;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
