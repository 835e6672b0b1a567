use std::fmt;
use thiserror::Error;

/// Exit code for a failed fetch or scrape.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for bad command line input.
pub const EXIT_USAGE: u8 = 2;

/// Which listing field an anchor was looked up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Publisher,
    Price,
    Icon,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Publisher => "publisher",
            Field::Price => "price",
            Field::Icon => "icon link",
        };
        f.write_str(label)
    }
}

/// Transport level failure classes. The discriminant is the reported code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    Request = 1,
    Connect = 2,
    Timeout = 3,
    Redirect = 4,
    Body = 5,
}

impl TransportFailure {
    fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportFailure::Timeout
        } else if err.is_connect() {
            TransportFailure::Connect
        } else if err.is_redirect() {
            TransportFailure::Redirect
        } else if err.is_body() || err.is_decode() {
            TransportFailure::Body
        } else {
            TransportFailure::Request
        }
    }
}

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("ArgumentError: {0}")]
    Argument(String),
    #[error("HTTPError: server answered with status {0}")]
    Http(u16),
    #[error("URLError: {reason}")]
    Url {
        failure: TransportFailure,
        reason: String,
    },
    #[error("ParseError: no anchor found for the {0}")]
    Parse(Field),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::Url {
            failure: TransportFailure::classify(&err),
            reason: err.to_string(),
        }
    }
}

impl ScrapeError {
    /// Storefronts that answer 200 for unknown apps get this synthesized instead.
    pub fn not_found() -> Self {
        ScrapeError::Http(404)
    }

    /// Name reported in the `Error:` line and the JSON `error` key.
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::Argument(_) => "ArgumentError",
            ScrapeError::Http(_) => "HTTPError",
            ScrapeError::Url { .. } => "URLError",
            ScrapeError::Parse(_) => "ParseError",
        }
    }

    /// Code reported in the `Error code:` line and the JSON `code` key.
    pub fn code(&self) -> i64 {
        match self {
            ScrapeError::Argument(_) => i64::from(EXIT_USAGE),
            ScrapeError::Http(status) => i64::from(*status),
            ScrapeError::Url { failure, .. } => *failure as i64,
            ScrapeError::Parse(_) => i64::from(EXIT_FAILURE),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            ScrapeError::Argument(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_an_http_404() {
        let err = ScrapeError::not_found();
        assert_eq!(err.kind(), "HTTPError");
        assert_eq!(err.code(), 404);
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn test_argument_errors_use_the_usage_exit_code() {
        let err = ScrapeError::Argument("missing id".into());
        assert_eq!(err.code(), 2);
        assert_eq!(err.exit_code(), EXIT_USAGE);
    }

    #[test]
    fn test_url_errors_report_the_failure_class() {
        let err = ScrapeError::Url {
            failure: TransportFailure::Timeout,
            reason: "operation timed out".into(),
        };
        assert_eq!(err.kind(), "URLError");
        assert_eq!(err.code(), 3);
        assert_eq!(err.to_string(), "URLError: operation timed out");
    }

    #[test]
    fn test_parse_errors_name_the_field() {
        let err = ScrapeError::Parse(Field::Icon);
        assert_eq!(err.to_string(), "ParseError: no anchor found for the icon link");
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }
}
