//! Blocking HTTP transport with ordered endpoint failover.

mod http;

pub use http::{Delivery, HttpTransport, TransportError};
