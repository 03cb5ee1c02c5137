//! Function return status shared across the key management API
//!
//! A status is either [`StatusCode::SUCCESS`] (zero) or a negative value naming
//! an error. The concrete error values belong to the layers that produce them;
//! this module only fixes the shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Return status of a key management operation
///
/// Kept distinct from the other 32-bit encodings (lifetimes, algorithms) so a
/// status can never be passed where one of those is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(i32);

impl StatusCode {
    /// The unique success value
    pub const SUCCESS: Self = Self(0);

    /// Wrap a raw status value
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw status value
    pub const fn value(self) -> i32 {
        self.0
    }

    /// True for zero
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// True for any negative value
    pub const fn is_error(self) -> bool {
        self.0 < 0
    }

    /// Convert into a `Result`, keeping the status as the error
    pub fn into_result(self) -> Result<(), StatusCode> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Collapse a `Result` back into a status, dropping any success payload
    pub fn from_result<T>(result: Result<T, StatusCode>) -> Self {
        match result {
            Ok(_) => Self::SUCCESS,
            Err(status) => status,
        }
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            write!(f, "success")
        } else {
            write!(f, "status {}", self.0)
        }
    }
}

impl std::error::Error for StatusCode {}

impl From<StatusCode> for i32 {
    fn from(status: StatusCode) -> Self {
        status.0
    }
}

impl From<i32> for StatusCode {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
