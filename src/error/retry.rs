use super::Error;

/// Strategy for handling errors in a retry context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (gateway errors, dropped connections)
    Retry,
    /// Failed permanently
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon the error type
    ///
    /// Only the HTTP connector consults this; entities propagate every error as-is.
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            // 500 & 502 - the service or its proxy is temporarily unavailable
            Self::RequestFailed { status, .. } if matches!(status, 500 | 502) => {
                ErrorRetryStrategy::Retry
            }

            // Any other response means the request itself was wrong or unauthorized,
            // retrying won't change the answer
            Self::RequestFailed { .. } | Self::NotFound { .. } | Self::Forbidden { .. } => {
                ErrorRetryStrategy::Fail
            }

            // Connection reset or timed out before a response arrived
            Self::Http(err) => {
                if err.status().is_none() && (err.is_connect() || err.is_timeout()) {
                    ErrorRetryStrategy::Retry
                } else {
                    ErrorRetryStrategy::Fail
                }
            }

            // Local failures - permanent
            Self::Validation(_)
            | Self::OutOfRange { .. }
            | Self::Schema(_)
            | Self::Config(_)
            | Self::Decode(_) => ErrorRetryStrategy::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retries_gateway_errors_only() {
        let retried = [500, 502];
        for status in retried {
            let err = Error::RequestFailed {
                status,
                body: String::new(),
            };
            assert_eq!(err.to_retry_strategy(), ErrorRetryStrategy::Retry);
        }

        let failed = [
            Error::RequestFailed {
                status: 503,
                body: String::new(),
            },
            Error::RequestFailed {
                status: 400,
                body: String::new(),
            },
            Error::NotFound {
                status: 404,
                body: String::new(),
            },
            Error::Forbidden {
                status: 403,
                body: String::new(),
            },
        ];
        for err in failed {
            assert_eq!(err.to_retry_strategy(), ErrorRetryStrategy::Fail);
        }
    }
}
