//! React application and module-federation generators.

pub mod application;
pub mod host;
pub mod remote;
pub mod routes;

pub use application::{ReactApplicationSchema, application_generator};
pub use host::{HostSchema, host_generator};
pub use remote::{RemoteSchema, remote_generator};
