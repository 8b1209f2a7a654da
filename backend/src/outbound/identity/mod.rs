//! Identity provider outbound adapters.
//!
//! A thin HTTP implementation of the `IdentityGateway` port. The fixture
//! gateway used for local runs lives next to the port itself.

mod dto;
mod http_gateway;

pub use http_gateway::HttpIdentityGateway;
