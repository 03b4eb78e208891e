//! Browser location capability
//!
//! The resolver never reads process-wide state. Everything it knows about the
//! current page comes from an [`Environment`] passed in by the caller.

use std::sync::{Arc, RwLock};

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Read access to the current location plus the one allowed mutation: navigation.
pub trait Environment {
    /// Host including a non-default port, e.g. `acme.example.com` or `localhost:3000`
    fn current_host(&self) -> String;

    /// Scheme with trailing colon, e.g. `https:`
    fn current_protocol(&self) -> String;

    /// Full current location
    fn current_href(&self) -> String;

    /// Replace the current location. Fire-and-forget.
    fn navigate_to(&self, url: &str);
}

impl<E: Environment + ?Sized> Environment for &E {
    fn current_host(&self) -> String {
        (**self).current_host()
    }

    fn current_protocol(&self) -> String {
        (**self).current_protocol()
    }

    fn current_href(&self) -> String {
        (**self).current_href()
    }

    fn navigate_to(&self, url: &str) {
        (**self).navigate_to(url)
    }
}

impl<E: Environment + ?Sized> Environment for Arc<E> {
    fn current_host(&self) -> String {
        (**self).current_host()
    }

    fn current_protocol(&self) -> String {
        (**self).current_protocol()
    }

    fn current_href(&self) -> String {
        (**self).current_href()
    }

    fn navigate_to(&self, url: &str) {
        (**self).navigate_to(url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Location {
    href: String,
    host: String,
    protocol: String,
}

impl Location {
    fn from_parts(host: &str, protocol: &str) -> Self {
        Self {
            href: format!("{}//{}/", protocol, host),
            host: host.to_string(),
            protocol: protocol.to_string(),
        }
    }

    fn from_url(url: &Url) -> Self {
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        Self {
            href: url.to_string(),
            host,
            protocol: format!("{}:", url.scheme()),
        }
    }
}

/// In-memory environment that records every navigation
///
/// Navigating to a parseable absolute URL moves the location, so later reads
/// observe the new host the way a reloaded page would.
#[derive(Debug)]
pub struct StaticEnvironment {
    location: RwLock<Location>,
    navigations: RwLock<Vec<String>>,
}

impl StaticEnvironment {
    /// Build from a raw host and protocol, without any parsing
    pub fn new(host: impl AsRef<str>, protocol: impl AsRef<str>) -> Self {
        Self::with_location(Location::from_parts(host.as_ref(), protocol.as_ref()))
    }

    /// Build from an absolute URL such as `https://acme.example.com/dashboard`
    pub fn from_url(url: &str) -> ClientResult<Self> {
        let parsed = Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))?;

        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!("{}: not a location", url)));
        }

        Ok(Self::with_location(Location::from_url(&parsed)))
    }

    fn with_location(location: Location) -> Self {
        Self {
            location: RwLock::new(location),
            navigations: RwLock::new(Vec::new()),
        }
    }

    /// Every URL passed to `navigate_to`, oldest first
    pub fn navigations(&self) -> Vec<String> {
        self.navigations
            .read()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    pub fn last_navigation(&self) -> Option<String> {
        self.navigations.read().ok()?.last().cloned()
    }

    fn read_location<T>(&self, f: impl FnOnce(&Location) -> T) -> Option<T> {
        self.location.read().ok().map(|l| f(&l))
    }
}

impl Environment for StaticEnvironment {
    fn current_host(&self) -> String {
        self.read_location(|l| l.host.clone()).unwrap_or_default()
    }

    fn current_protocol(&self) -> String {
        self.read_location(|l| l.protocol.clone()).unwrap_or_default()
    }

    fn current_href(&self) -> String {
        self.read_location(|l| l.href.clone()).unwrap_or_default()
    }

    fn navigate_to(&self, url: &str) {
        tracing::debug!(url = %url, "Navigating");

        if let Ok(mut navigations) = self.navigations.write() {
            navigations.push(url.to_string());
        }

        match Url::parse(url) {
            Ok(parsed) if !parsed.cannot_be_a_base() => {
                if let Ok(mut location) = self.location.write() {
                    *location = Location::from_url(&parsed);
                }
            }
            _ => {
                tracing::warn!(url = %url, "Navigation target is not an absolute URL, location unchanged");
            }
        }
    }
}
