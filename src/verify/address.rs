//! `host:port` handling for socket verifiers.

/// Splits `host:port` into its two parts.
///
/// Accepts exactly one colon-separated pair, or a bracketed IPv6 literal
/// (`[fd00::1]:53`). Anything else is `None`.
pub fn split_host_port(authority: &str) -> Option<(&str, &str)> {
    if let Some(rest) = authority.strip_prefix('[') {
        let (host, port) = rest.split_once("]:")?;
        if host.is_empty() || port.contains(':') {
            return None;
        }
        return Some((host, port));
    }

    let mut parts = authority.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(host), Some(port), None) => Some((host, port)),
        _ => None,
    }
}

/// Inverse of [`split_host_port`]; re-brackets IPv6 hosts.
pub fn join_host_port(host: &str, port: &str) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}
