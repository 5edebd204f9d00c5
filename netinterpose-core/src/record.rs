use crate::address::Address;
use crate::constants::{Syscall, TRACE_TAG};
use libc::{c_int, c_void, socklen_t};
use std::fmt::{Display, Formatter};
use std::mem::size_of;

/// Best-effort rendering of a `setsockopt` value.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OptionValue {
    /// No value pointer was passed.
    Null,
    /// An `int` sized value.
    Int(c_int),
    /// A single byte value.
    Byte(u8),
    /// Anything else, only its length is shown.
    Opaque(socklen_t),
}

impl OptionValue {
    /// Read the value behind `value` if it looks like a scalar.
    ///
    /// # Safety
    /// A non-null `value` must be readable for `len` bytes.
    #[must_use]
    pub unsafe fn from_raw(value: *const c_void, len: socklen_t) -> Self {
        if value.is_null() {
            return OptionValue::Null;
        }
        match len as usize {
            n if n == size_of::<c_int>() => OptionValue::Int(value.cast::<c_int>().read_unaligned()),
            1 => OptionValue::Byte(value.cast::<u8>().read()),
            _ => OptionValue::Opaque(len),
        }
    }
}

impl Display for OptionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Null => f.write_str("null"),
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::Byte(v) => write!(f, "{v}"),
            OptionValue::Opaque(len) => write!(f, "<{len} bytes>"),
        }
    }
}

/// What one intercepted call looked like, built right after the real call returned.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CallRecord {
    Socket {
        fd: c_int,
        domain: c_int,
        ty: c_int,
        protocol: c_int,
    },
    Bind {
        fd: c_int,
        address: Address,
    },
    Listen {
        fd: c_int,
    },
    Accept {
        fd: c_int,
        accepted: c_int,
        peer: Address,
    },
    Connect {
        fd: c_int,
        peer: Address,
    },
    Shutdown {
        fd: c_int,
        how: c_int,
    },
    SetSockOpt {
        fd: c_int,
        level: c_int,
        name: c_int,
        value: OptionValue,
    },
}

impl CallRecord {
    /// The entry point this record describes.
    #[must_use]
    pub fn syscall(&self) -> Syscall {
        match self {
            CallRecord::Socket { .. } => Syscall::socket,
            CallRecord::Bind { .. } => Syscall::bind,
            CallRecord::Listen { .. } => Syscall::listen,
            CallRecord::Accept { .. } => Syscall::accept,
            CallRecord::Connect { .. } => Syscall::connect,
            CallRecord::Shutdown { .. } => Syscall::shutdown,
            CallRecord::SetSockOpt { .. } => Syscall::setsockopt,
        }
    }
}

impl Display for CallRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{TRACE_TAG} {}", self.syscall())?;
        match self {
            CallRecord::Socket {
                fd,
                domain,
                ty,
                protocol,
            } => write!(f, " fd={fd} domain={domain} type={ty} protocol={protocol}"),
            CallRecord::Bind { fd, address } => write!(f, " fd={fd} address={address}"),
            CallRecord::Listen { fd } => write!(f, " fd={fd}"),
            CallRecord::Accept { fd, accepted, peer } => {
                write!(f, " fd={fd} accepted={accepted} peer={peer}")
            }
            CallRecord::Connect { fd, peer } => write!(f, " fd={fd} peer={peer}"),
            CallRecord::Shutdown { fd, how } => write!(f, " fd={fd} how={how}"),
            CallRecord::SetSockOpt {
                fd,
                level,
                name,
                value,
            } => write!(f, " fd={fd} level={level} name={name} value={value}"),
        }
    }
}
