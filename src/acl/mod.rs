pub mod range;
pub mod store;

pub use range::validate_range;
pub use store::{AccessEntryInput, AccessEntryStore};

/// Privilege levels used across the panel. The access list stores whatever
/// integer the caller supplies; enforcing the domain is the caller's job.
pub mod level {
    pub const GUEST: i64 = 5;
    pub const USER: i64 = 25;
    pub const CONTENT_MANAGER: i64 = 50;
    pub const MANAGER: i64 = 75;
    pub const ADMIN: i64 = 100;
}

/// What an access rule applies to.
///
/// Normalization is total: anything outside the known set coerces to
/// `Stream`, so an entry can never carry an invalid type. Callers depend on
/// the silent fallback; do not turn it into an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    Rpc,
    Interface,
    Network,
    Stream,
}

impl AccessType {
    pub fn normalize(raw: &str) -> Self {
        match raw {
            "rpc" => Self::Rpc,
            "interface" => Self::Interface,
            "network" => Self::Network,
            _ => Self::Stream,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rpc => "rpc",
            Self::Interface => "interface",
            Self::Network => "network",
            Self::Stream => "stream",
        }
    }
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
