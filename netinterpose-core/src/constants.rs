use std::ffi::CStr;
use std::fmt::{Display, Formatter};

/// Prefix of every trace line.
pub const TRACE_TAG: &str = "[netinterpose]";

/// Rendered in place of an address that can not be read safely.
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// The intercepted entry points.
#[allow(non_camel_case_types, missing_docs)]
#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Syscall {
    socket,
    bind,
    listen,
    accept,
    connect,
    shutdown,
    setsockopt,
}

impl Syscall {
    /// Number of intercepted entry points.
    pub const COUNT: usize = 7;

    /// All intercepted entry points, in slot order.
    pub const ALL: [Syscall; Syscall::COUNT] = [
        Syscall::socket,
        Syscall::bind,
        Syscall::listen,
        Syscall::accept,
        Syscall::connect,
        Syscall::shutdown,
        Syscall::setsockopt,
    ];

    /// The symbol name as the dynamic loader knows it.
    #[must_use]
    pub fn symbol(self) -> &'static CStr {
        match self {
            Syscall::socket => c"socket",
            Syscall::bind => c"bind",
            Syscall::listen => c"listen",
            Syscall::accept => c"accept",
            Syscall::connect => c"connect",
            Syscall::shutdown => c"shutdown",
            Syscall::setsockopt => c"setsockopt",
        }
    }

    /// Index of this entry point in a per-syscall table.
    #[must_use]
    pub fn slot(self) -> usize {
        self as usize
    }
}

impl Display for Syscall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.symbol().to_string_lossy(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_declaration_order() {
        for (index, syscall) in Syscall::ALL.iter().enumerate() {
            assert_eq!(index, syscall.slot());
        }
    }

    #[test]
    fn display_is_symbol_name() {
        assert_eq!("setsockopt", Syscall::setsockopt.to_string());
        assert_eq!(c"accept", Syscall::accept.symbol());
    }
}
