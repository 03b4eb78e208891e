//! tenantweb Client Library
//!
//! Host/tenant resolution for the multi-tenant web client, plus the usage
//! logging and API collaborators it is wired to.

pub mod actions;
pub mod config;
pub mod error;
pub mod identity;
pub mod routing;
pub mod usage;

pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult};
pub use identity::{IdentityProvider, KeyValueStore, MemoryStore, StorageIdentityProvider};
pub use routing::{Environment, HostResolver, ResolvedHost, StaticEnvironment};
pub use usage::{LogSink, MemorySink, UsageLogger};
