//! Send GraphQL operations to an endpoint, check them client-side, and list
//! sample operations, either fixed or generated from a schema.

pub mod client;
pub mod document;
pub mod errors;
pub mod listing;
pub mod samples;
