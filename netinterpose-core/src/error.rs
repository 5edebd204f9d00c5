use crate::constants::Syscall;
use libc::{sa_family_t, socklen_t};

/// Failures the interposition layer can run into.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The next implementation of a symbol could not be located.
    #[error("can not resolve \"{syscall}\": {reason}")]
    ResolutionFailed {
        /// The entry point that failed to resolve.
        syscall: Syscall,
        /// What the loader reported.
        reason: String,
    },
}

/// Why a socket address was rendered as a placeholder.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum AddressError {
    /// No address was supplied.
    #[error("null address")]
    Null,
    /// The supplied length is too short for the address family.
    #[error("address truncated to {0} bytes")]
    Truncated(socklen_t),
    /// The real call reported the address as unreadable.
    #[error("address not readable")]
    Fault,
    /// The address family is not rendered.
    #[error("unsupported address family {0}")]
    UnsupportedFamily(sa_family_t),
}
