// CMDB API client modules
//
// Read-only access to the appliance's configuration database under
// `/api/v2/cmdb/`, wrapped in the `{ status, http_status, results }` envelope.

pub mod client;
pub mod models;

pub use client::CmdbClient;
