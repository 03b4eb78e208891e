//! Host-to-Tenant Resolution
//!
//! Derives the tenant-independent base domain from the current host and builds
//! tenant and admin URLs on top of it.
//! Supports:
//! - Platform preview hosts: site.netlify.app -> used as-is
//! - Local development: tenant.localhost:3000 -> localhost:3000
//! - Production domains: acme.example.com -> example.com
//!
//! The label heuristic keeps the last two labels, so hosts under a multi-label
//! public suffix (`shop.example.co.uk`) resolve to the suffix itself (`co.uk`).

use crate::config::ClientConfig;

use super::Environment;

/// Hosts containing this marker are platform previews and never tenant-prefixed
pub const PLATFORM_PREVIEW_MARKER: &str = "netlify";

/// Hosts containing this marker are local development hosts
pub const LOCALHOST_MARKER: &str = "localhost";

/// Path appended to the base domain when leaving a tenant for the admin area
pub const DEFAULT_ADMIN_PATH: &str = "/admin";

/// Result of resolving a host to its base domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHost {
    /// The host with any tenant prefix removed
    pub base_domain: String,
    /// Which rule produced the base domain
    pub rule: HostRule,
}

/// How the base domain was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRule {
    /// Platform preview host, returned unchanged
    PlatformPreview,
    /// Local development host (first label stripped when prefixed)
    Localhost,
    /// Dotted production host, trimmed to its last two labels
    Domain,
    /// No dot at all, returned unchanged
    Bare,
}

impl HostRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostRule::PlatformPreview => "platform_preview",
            HostRule::Localhost => "localhost",
            HostRule::Domain => "domain",
            HostRule::Bare => "bare",
        }
    }
}

/// Resolve a host and report which rule matched. First match wins.
pub fn resolve_host(host: &str) -> ResolvedHost {
    if host.contains(PLATFORM_PREVIEW_MARKER) {
        return ResolvedHost {
            base_domain: host.to_string(),
            rule: HostRule::PlatformPreview,
        };
    }

    if host.contains(LOCALHOST_MARKER) {
        let base_domain = match host.split_once('.') {
            Some((_tenant, rest)) => rest.to_string(),
            None => host.to_string(),
        };
        return ResolvedHost {
            base_domain,
            rule: HostRule::Localhost,
        };
    }

    if host.contains('.') {
        let labels: Vec<&str> = host.split('.').collect();
        let base_domain = if labels.len() > 2 {
            labels[labels.len() - 2..].join(".")
        } else {
            host.to_string()
        };
        return ResolvedHost {
            base_domain,
            rule: HostRule::Domain,
        };
    }

    ResolvedHost {
        base_domain: host.to_string(),
        rule: HostRule::Bare,
    }
}

/// Base domain for a host. Total over all inputs, including the empty host.
pub fn resolve_base_domain(host: &str) -> String {
    resolve_host(host).base_domain
}

/// Whether the host carries a tenant prefix
///
/// Unlike [`resolve_base_domain`] this does not special-case platform preview
/// hosts, so `site.netlify.app` counts as a subdomain.
pub fn is_tenant_subdomain(host: &str) -> bool {
    if host.contains(LOCALHOST_MARKER) && host.contains('.') {
        return true;
    }

    host.split('.').count() > 2
}

/// `{protocol}//{tenant}.{base_domain}` for the current location.
///
/// The tenant name is not validated or escaped.
pub fn build_visit_url<E: Environment + ?Sized>(env: &E, tenant: &str) -> String {
    let base_domain = resolve_base_domain(&env.current_host());
    format!("{}//{}.{}", env.current_protocol(), tenant, base_domain)
}

/// `{protocol}//{base_domain}{admin_path}` for the current location
pub fn build_admin_url<E: Environment + ?Sized>(env: &E, admin_path: &str) -> String {
    let base_domain = resolve_base_domain(&env.current_host());
    format!("{}//{}{}", env.current_protocol(), base_domain, admin_path)
}

/// Navigate the environment to the admin root of the base domain
pub fn navigate_to_admin<E: Environment + ?Sized>(env: &E) {
    let url = build_admin_url(env, DEFAULT_ADMIN_PATH);
    env.navigate_to(&url);
}

/// Host resolver bound to an environment
#[derive(Debug, Clone)]
pub struct HostResolver<E> {
    env: E,
    admin_path: String,
}

impl<E: Environment> HostResolver<E> {
    /// Create a resolver using the default admin path
    pub fn new(env: E) -> Self {
        Self {
            env,
            admin_path: DEFAULT_ADMIN_PATH.to_string(),
        }
    }

    /// Create a resolver using the admin path from configuration
    pub fn from_config(env: E, config: &ClientConfig) -> Self {
        Self {
            env,
            admin_path: config.admin_path.clone(),
        }
    }

    /// Resolve the current host
    pub fn resolve(&self) -> ResolvedHost {
        resolve_host(&self.env.current_host())
    }

    pub fn base_domain(&self) -> String {
        resolve_base_domain(&self.env.current_host())
    }

    pub fn is_subdomain(&self) -> bool {
        is_tenant_subdomain(&self.env.current_host())
    }

    pub fn visit_url(&self, tenant: &str) -> String {
        build_visit_url(&self.env, tenant)
    }

    pub fn admin_url(&self) -> String {
        build_admin_url(&self.env, &self.admin_path)
    }

    /// Leave the current tenant for the admin area
    pub fn navigate_to_admin(&self) {
        let url = self.admin_url();
        tracing::debug!(url = %url, "Leaving tenant for admin");
        self.env.navigate_to(&url);
    }

    pub fn environment(&self) -> &E {
        &self.env
    }
}
