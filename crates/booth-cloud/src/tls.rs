// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTPS enforcement for outbound requests.
//!
//! Remote hosts are always reached over HTTPS: an `http://` URL pointing
//! anywhere but the loopback interface is upgraded rather than rejected, so
//! a misconfigured deployment still talks TLS.

use booth_core::BoothError;
use tracing::debug;
use url::{Host, Url};

/// Parse `raw` and upgrade `http` to `https` for any non-local host.
///
/// Schemes other than `http`/`https` are rejected.
pub fn enforce_https(raw: &str) -> Result<Url, BoothError> {
    let mut url =
        Url::parse(raw).map_err(|e| BoothError::Config(format!("invalid URL '{raw}': {e}")))?;

    match url.scheme() {
        "https" => Ok(url),
        "http" => {
            if is_localhost(&url) {
                return Ok(url);
            }
            url.set_scheme("https").map_err(|()| {
                BoothError::Config(format!("cannot upgrade '{raw}' to https"))
            })?;
            debug!(from = %raw, to = %url, "upgraded remote URL to https");
            Ok(url)
        }
        other => Err(BoothError::Config(format!(
            "unsupported URL scheme '{other}' in '{raw}'"
        ))),
    }
}

/// Check if the URL's host is the loopback interface.
///
/// Only IP literals and the bare name `localhost` count; a DNS name that
/// merely starts with `127.` does not.
pub fn is_localhost(url: &Url) -> bool {
    match url.host() {
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        Some(Host::Domain(name)) => name.eq_ignore_ascii_case("localhost"),
        None => false,
    }
}
