//! Text report.
//!
//! ```text
//! # K8s Health Check URLs
//! # Generated at: 2024-05-01T10:00:00Z
//!
//! # Namespace: apps
//! http://10.1.2.3:8080/ready
//! tcp://db.apps.svc.cluster.local:5432
//!
//! # Namespace: web
//! ...
//! ```
//!
//! `# Namespace: <x>` sets the scope for the address lines after it. Any
//! other `#` line is a comment and blank lines only separate groups.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;

use super::Catalog;
use crate::config::{GENERATED_AT_PREFIX, NAMESPACE_HEADER_PREFIX, REPORT_TITLE};
use crate::error_handling::ReportError;
use crate::model::{Endpoint, Owner};

/// Renders the catalog as a text report.
pub fn render_report(catalog: &Catalog, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "# {REPORT_TITLE}");
    let _ = writeln!(
        out,
        "{GENERATED_AT_PREFIX}{}",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    out.push('\n');

    for (scope, endpoints) in catalog.grouped_by_scope() {
        let _ = writeln!(out, "{NAMESPACE_HEADER_PREFIX}{scope}");
        for endpoint in endpoints {
            let _ = writeln!(out, "{}", endpoint.address);
        }
        out.push('\n');
    }
    out
}

/// Writes the text report, creating parent directories as needed.
///
/// # Errors
///
/// Returns `ReportError::Io` if the directory or file cannot be written.
pub fn write_report(path: &Path, catalog: &Catalog) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_report(catalog, Utc::now()))?;
    debug!("Wrote {} endpoints to {}", catalog.len(), path.display());
    Ok(())
}

/// Rebuilds a catalog from report text.
///
/// Each address line gets the scope of the nearest preceding namespace
/// header and the protocol of its scheme. Addresses on a service host
/// (`*.svc.<cluster_domain>`) are attributed to the service named by the
/// host's first label. Lines before any header get an empty scope.
pub fn parse_report(text: &str, cluster_domain: &str) -> Catalog {
    let header = NAMESPACE_HEADER_PREFIX.trim_end();
    let service_suffix = format!(".svc.{cluster_domain}");
    let mut scope = String::new();
    let mut catalog = Catalog::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix(header) {
            scope = rest.trim().to_string();
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let mut endpoint = Endpoint::from_address(scope.clone(), line);
        if let Some(service) = service_name_from_address(line, &service_suffix) {
            endpoint.owner = Some(Owner::Service(service.to_string()));
        }
        catalog.push(endpoint);
    }
    catalog
}

/// Reads and parses a text report from disk.
///
/// # Errors
///
/// Returns `ReportError::Io` if the file cannot be read.
pub fn read_report(path: &Path, cluster_domain: &str) -> Result<Catalog, ReportError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_report(&text, cluster_domain))
}

/// First DNS label of the address host when the host is a service name.
fn service_name_from_address<'a>(address: &'a str, service_suffix: &str) -> Option<&'a str> {
    let (_, rest) = address.split_once("://")?;
    let authority = rest.split('/').next().unwrap_or(rest);
    let host = match authority.rsplit_once(':') {
        Some((host, _)) if !host.ends_with(']') || host.starts_with('[') => host,
        _ => authority,
    };
    if !host.ends_with(service_suffix) {
        return None;
    }
    host.split('.').next().filter(|label| !label.is_empty())
}
