//! Host-based tenant routing
//!
//! This module turns the current browser location into tenant-aware URLs:
//! - Tenant subdomains: acme.example.com -> base domain example.com
//! - Visit URLs: tenant "globex" -> https://globex.example.com
//! - Admin root: https://example.com/admin

mod environment;
mod host_resolver;

pub use environment::{Environment, StaticEnvironment};
pub use host_resolver::{
    build_admin_url, build_visit_url, is_tenant_subdomain, navigate_to_admin,
    resolve_base_domain, resolve_host, HostResolver, HostRule, ResolvedHost, DEFAULT_ADMIN_PATH,
    LOCALHOST_MARKER, PLATFORM_PREVIEW_MARKER,
};
