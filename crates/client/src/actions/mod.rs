//! API action wrappers
//!
//! Request builders for the REST endpoints the client talks to. Execution is
//! delegated to an injected [`HttpTransport`].

mod logs;
mod price_plans;
mod transport;

pub use logs::HttpLogSink;
pub use price_plans::{PricePlanActions, PricePlanQuery};
pub use transport::{ApiClient, ApiRequest, ApiResponse, HttpMethod, HttpTransport};
