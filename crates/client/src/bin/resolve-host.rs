#!/usr/bin/env cargo
//! Host resolution utility for tenantweb
//!
//! Shows how the client would treat a given browser location: the base domain
//! it derives, whether the host counts as a tenant subdomain, and the URLs it
//! would build from there.
//!
//! Usage:
//!   cargo run --bin resolve-host -- https://acme.example.com/dashboard
//!   cargo run --bin resolve-host -- http://tenant.localhost:3000 globex
//!
//! Example output:
//!   Base domain:   example.com (rule: domain)
//!   Subdomain:     yes
//!   Visit URL:     https://globex.example.com
//!   Admin URL:     https://example.com/admin

use std::env;

use anyhow::Context;
use tenantweb_client::{ClientConfig, Environment, HostResolver, StaticEnvironment};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(location) = args.next() else {
        eprintln!("Usage: resolve-host <url> [tenant]");
        std::process::exit(1);
    };
    let tenant = args.next();

    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    let browser = StaticEnvironment::from_url(&location)
        .with_context(|| format!("Cannot use {} as a location", location))?;
    let resolver = HostResolver::from_config(&browser, &config);

    let resolved = resolver.resolve();
    tracing::debug!(location = %location, rule = resolved.rule.as_str(), "Resolved host");

    let host = browser.current_host();
    println!("Host:          {}", if host.is_empty() { "(none)" } else { host.as_str() });
    println!("Base domain:   {} (rule: {})", resolved.base_domain, resolved.rule.as_str());
    println!("Subdomain:     {}", if resolver.is_subdomain() { "yes" } else { "no" });
    if let Some(tenant) = tenant {
        println!("Visit URL:     {}", resolver.visit_url(&tenant));
    }
    println!("Admin URL:     {}", resolver.admin_url());

    Ok(())
}
