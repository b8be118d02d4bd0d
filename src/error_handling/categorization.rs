//! Error categorization.
//!
//! Maps transport errors onto [`FailureKind`] and renders them into the
//! detail text stored in an outcome.

use std::error::Error as StdError;
use std::io;

use super::types::FailureKind;

/// Categorizes a `reqwest::Error` into a `FailureKind`.
///
/// Timeouts win over everything else; connect errors are split into DNS,
/// TLS and plain connection failures by inspecting the source chain.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        return FailureKind::Timeout;
    }

    let chain = error_chain_text(error).to_lowercase();
    if chain.contains("dns error") || chain.contains("failed to lookup address") {
        FailureKind::Dns
    } else if chain.contains("certificate") || chain.contains("tls") || chain.contains("handshake")
    {
        FailureKind::Tls
    } else if error.is_connect() {
        FailureKind::Connect
    } else {
        FailureKind::Request
    }
}

/// Categorizes a socket-level `io::Error` raised while connecting.
pub fn categorize_io_error(error: &io::Error) -> FailureKind {
    match error.kind() {
        io::ErrorKind::TimedOut => FailureKind::Timeout,
        io::ErrorKind::InvalidInput => FailureKind::InvalidAddress,
        _ => FailureKind::Connect,
    }
}

/// Renders an error and all of its sources as `outer: inner: innermost`.
///
/// Adjacent duplicates are dropped; hyper and reqwest often repeat the
/// message of the error they wrap.
pub fn error_chain_text(error: &(dyn StdError + 'static)) -> String {
    let mut parts: Vec<String> = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if parts.last().map(|last| !last.contains(&text)).unwrap_or(true) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapper {
        msg: &'static str,
        inner: Option<io::Error>,
    }

    impl std::fmt::Display for Wrapper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.msg)
        }
    }

    impl StdError for Wrapper {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.inner.as_ref().map(|e| e as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn test_error_chain_text_joins_sources() {
        let err = Wrapper {
            msg: "error sending request",
            inner: Some(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        };
        assert_eq!(
            error_chain_text(&err),
            "error sending request: connection refused"
        );
    }

    #[test]
    fn test_error_chain_text_skips_repeated_messages() {
        let err = Wrapper {
            msg: "tcp connect error: connection refused",
            inner: Some(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        };
        assert_eq!(
            error_chain_text(&err),
            "tcp connect error: connection refused"
        );
    }

    #[test]
    fn test_categorize_io_error() {
        assert_eq!(
            categorize_io_error(&io::Error::from(io::ErrorKind::TimedOut)),
            FailureKind::Timeout
        );
        assert_eq!(
            categorize_io_error(&io::Error::from(io::ErrorKind::ConnectionRefused)),
            FailureKind::Connect
        );
        assert_eq!(
            categorize_io_error(&io::Error::from(io::ErrorKind::InvalidInput)),
            FailureKind::InvalidAddress
        );
    }
}
