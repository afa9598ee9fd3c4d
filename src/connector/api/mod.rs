pub mod container;
pub mod controller;
pub mod http;
pub mod router;
pub mod server;

pub use container::{Container, ContainerConfig};
pub use controller::{CHAT_PATH, INTERNAL_SERVER_ERROR};
pub use http::http_router;
pub use router::Router;
pub use server::serve;
