//! Timeout configuration for crumb-link client operations.

use std::time::Duration;

/// Timeout configuration for crumb-link client operations.
///
/// # Examples
///
/// ```rust
/// use crumb_link::CrumbLinkTimeouts;
/// use std::time::Duration;
///
/// // Use defaults (recommended for most cases)
/// let timeouts = CrumbLinkTimeouts::default();
///
/// // Custom timeouts for high-latency environments
/// let timeouts = CrumbLinkTimeouts::builder()
///     .connect_timeout(Duration::from_secs(30))
///     .request_timeout(Duration::from_secs(120))
///     .build();
///
/// // Aggressive timeouts for local development
/// let timeouts = CrumbLinkTimeouts::fast();
/// ```
#[derive(Debug, Clone)]
pub struct CrumbLinkTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: 10 seconds
    pub connect_timeout: Duration,

    /// Deadline for a full request/response round trip. Each call races
    /// against this timer; expiry aborts the in-flight request.
    /// Default: 30 seconds
    pub request_timeout: Duration,

    /// Deadline for the token-refresh round trip triggered by a 401.
    /// Default: 10 seconds
    pub refresh_timeout: Duration,
}

impl Default for CrumbLinkTimeouts {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            refresh_timeout: Duration::from_secs(10),
        }
    }
}

impl CrumbLinkTimeouts {
    /// Create a new builder for custom timeout configuration.
    pub fn builder() -> CrumbLinkTimeoutsBuilder {
        CrumbLinkTimeoutsBuilder::new()
    }

    /// Timeouts optimized for fast local development.
    pub fn fast() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
            refresh_timeout: Duration::from_secs(3),
        }
    }

    /// Timeouts optimized for high-latency or unreliable networks.
    pub fn relaxed() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(120),
            refresh_timeout: Duration::from_secs(30),
        }
    }
}

/// Builder for creating custom [`CrumbLinkTimeouts`] configurations.
#[derive(Debug, Clone)]
pub struct CrumbLinkTimeoutsBuilder {
    timeouts: CrumbLinkTimeouts,
}

impl CrumbLinkTimeoutsBuilder {
    fn new() -> Self {
        Self {
            timeouts: CrumbLinkTimeouts::default(),
        }
    }

    /// Set the connection timeout (TCP + TLS handshake).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connect_timeout = timeout;
        self
    }

    /// Set the connection timeout in seconds.
    pub fn connect_timeout_secs(self, secs: u64) -> Self {
        self.connect_timeout(Duration::from_secs(secs))
    }

    /// Set the per-request deadline.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.request_timeout = timeout;
        self
    }

    /// Set the per-request deadline in seconds.
    pub fn request_timeout_secs(self, secs: u64) -> Self {
        self.request_timeout(Duration::from_secs(secs))
    }

    /// Set the token-refresh deadline.
    pub fn refresh_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.refresh_timeout = timeout;
        self
    }

    /// Set the token-refresh deadline in seconds.
    pub fn refresh_timeout_secs(self, secs: u64) -> Self {
        self.refresh_timeout(Duration::from_secs(secs))
    }

    /// Build the timeout configuration.
    pub fn build(self) -> CrumbLinkTimeouts {
        self.timeouts
    }
}
