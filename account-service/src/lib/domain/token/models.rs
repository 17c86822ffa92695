use std::fmt;
use std::net::IpAddr;
use std::net::SocketAddr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Serialize;

use crate::token::errors::AddressError;
use crate::token::errors::TokenLifetimeError;

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// IP portion of the peer address a request came from.
///
/// IPv4-mapped IPv6 addresses are folded into their IPv4 form so the same
/// client compares equal whichever socket family accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientAddress(IpAddr);

impl ClientAddress {
    /// Parse an `ip:port` peer address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Input is not a socket address
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        raw.parse::<SocketAddr>()
            .map(Self::from)
            .map_err(|_| AddressError::InvalidFormat(raw.to_string()))
    }
}

impl From<SocketAddr> for ClientAddress {
    fn from(addr: SocketAddr) -> Self {
        Self(addr.ip().to_canonical())
    }
}

impl fmt::Display for ClientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifetimes applied to newly issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    access: Duration,
    refresh: Duration,
}

impl TokenLifetimes {
    /// Upper bound on either lifetime.
    pub const MAX_DAYS: i64 = 3650;

    /// # Errors
    /// * `NotPositive` - Either lifetime is zero or negative
    /// * `TooLong` - Either lifetime exceeds `MAX_DAYS`
    pub fn new(access: Duration, refresh: Duration) -> Result<Self, TokenLifetimeError> {
        Self::check("access", access)?;
        Self::check("refresh", refresh)?;
        Ok(Self { access, refresh })
    }

    fn check(name: &'static str, lifetime: Duration) -> Result<(), TokenLifetimeError> {
        if lifetime <= Duration::zero() {
            return Err(TokenLifetimeError::NotPositive(name));
        }
        if lifetime > Duration::days(Self::MAX_DAYS) {
            return Err(TokenLifetimeError::TooLong(name, Self::MAX_DAYS));
        }
        Ok(())
    }

    pub fn access(&self) -> Duration {
        self.access
    }

    pub fn refresh(&self) -> Duration {
        self.refresh
    }
}

/// Alert sent to an account owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningMessage {
    pub subject: String,
    pub body: String,
}

impl WarningMessage {
    /// Alert for a refresh attempt from an address the token was not bound to.
    ///
    /// # Arguments
    /// * `at` - When the attempt happened
    /// * `address` - Address the attempt came from
    pub fn suspicious_refresh(at: DateTime<Utc>, address: &ClientAddress) -> Self {
        Self {
            subject: "Warning message".to_string(),
            body: format!(
                "We have noticed suspicious activity on your account. \
                 A session refresh was attempted at {} UTC from the address {}. \
                 If it was not you, change your password immediately.",
                at.format("%H:%M:%S %d.%m.%Y"),
                address
            ),
        }
    }
}
