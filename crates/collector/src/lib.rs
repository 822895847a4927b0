//! Price collection from public exchange ticker endpoints.
//!
//! One collection cycle issues a single concurrent batch of best-effort
//! requests, one per configured exchange, decodes each exchange-specific
//! JSON shape into a uniform symbol -> price map, and never lets one
//! venue's failure abort the others.

pub mod collector;
pub mod decode;
pub mod endpoint;
pub mod error;

pub use collector::Collector;
pub use endpoint::{default_endpoints, EndpointKind, ExchangeEndpoint};
pub use error::CollectError;
