//! Dashboard server interface: live stream and REST API

pub mod messages;
pub mod rest;
pub mod websocket;

pub use rest::DashboardRestClient;
pub use websocket::DashboardWebSocketClient;
