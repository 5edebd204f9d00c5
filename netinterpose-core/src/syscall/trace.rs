use crate::address::Address;
use crate::error::AddressError;
use crate::record::{CallRecord, OptionValue};
use crate::resolver::{
    AcceptFn, BindFn, ConnectFn, ListenFn, SetSockOptFn, ShutdownFn, SocketFn,
};
use crate::sink::TraceSink;
use crate::syscall::common::{errno, set_errno};
use libc::{c_int, c_void, sockaddr, socklen_t};

/// Invokes the real implementation it is handed and writes one [`CallRecord`] per
/// call to its sink, leaving result and `errno` as the real call produced them.
#[repr(C)]
#[derive(Debug, Default)]
pub struct TraceSyscall<S: TraceSink> {
    sink: S,
}

/// Addresses passed in by the caller; unreadable if the real call said so.
unsafe fn input_address(
    r: c_int,
    errno: c_int,
    address: *const sockaddr,
    len: socklen_t,
) -> Address {
    if r == -1 && errno == libc::EFAULT {
        return Address(Err(AddressError::Fault));
    }
    Address::from_raw(address, len)
}

impl<S: TraceSink> TraceSyscall<S> {
    /// Trace to `sink`.
    #[must_use]
    pub fn new(sink: S) -> Self {
        TraceSyscall { sink }
    }

    /// The sink trace lines are written to.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn emit(&self, errno: c_int, record: &CallRecord) {
        let line = record.to_string();
        if let Err(e) = self.sink.emit(&line) {
            crate::warn!("dropped trace line \"{line}\": {e}");
        }
        set_errno(errno);
    }

    pub fn socket(&self, fn_ptr: SocketFn, domain: c_int, ty: c_int, protocol: c_int) -> c_int {
        let r = fn_ptr(domain, ty, protocol);
        let errno = errno();
        self.emit(
            errno,
            &CallRecord::Socket {
                fd: r,
                domain,
                ty,
                protocol,
            },
        );
        r
    }

    pub fn bind(
        &self,
        fn_ptr: BindFn,
        socket: c_int,
        address: *const sockaddr,
        address_len: socklen_t,
    ) -> c_int {
        let r = fn_ptr(socket, address, address_len);
        let errno = errno();
        let address = unsafe { input_address(r, errno, address, address_len) };
        self.emit(
            errno,
            &CallRecord::Bind {
                fd: socket,
                address,
            },
        );
        r
    }

    pub fn listen(&self, fn_ptr: ListenFn, socket: c_int, backlog: c_int) -> c_int {
        let r = fn_ptr(socket, backlog);
        self.emit(errno(), &CallRecord::Listen { fd: socket });
        r
    }

    pub fn accept(
        &self,
        fn_ptr: AcceptFn,
        socket: c_int,
        address: *mut sockaddr,
        address_len: *mut socklen_t,
    ) -> c_int {
        // the written-back length may exceed the buffer, so remember its size
        let capacity = if address_len.is_null() {
            0
        } else {
            unsafe { address_len.read_unaligned() }
        };
        let r = fn_ptr(socket, address, address_len);
        if r == -1 {
            return r;
        }
        let errno = errno();
        let peer = unsafe { Address::from_raw_out(address, capacity, address_len) };
        self.emit(
            errno,
            &CallRecord::Accept {
                fd: socket,
                accepted: r,
                peer,
            },
        );
        r
    }

    pub fn connect(
        &self,
        fn_ptr: ConnectFn,
        socket: c_int,
        address: *const sockaddr,
        len: socklen_t,
    ) -> c_int {
        let r = fn_ptr(socket, address, len);
        let errno = errno();
        let peer = unsafe { input_address(r, errno, address, len) };
        self.emit(errno, &CallRecord::Connect { fd: socket, peer });
        r
    }

    pub fn shutdown(&self, fn_ptr: ShutdownFn, socket: c_int, how: c_int) -> c_int {
        let r = fn_ptr(socket, how);
        self.emit(errno(), &CallRecord::Shutdown { fd: socket, how });
        r
    }

    pub fn setsockopt(
        &self,
        fn_ptr: SetSockOptFn,
        socket: c_int,
        level: c_int,
        name: c_int,
        value: *const c_void,
        option_len: socklen_t,
    ) -> c_int {
        let r = fn_ptr(socket, level, name, value, option_len);
        let errno = errno();
        let value = if r == -1 && errno == libc::EFAULT {
            OptionValue::Opaque(option_len)
        } else {
            unsafe { OptionValue::from_raw(value, option_len) }
        };
        self.emit(
            errno,
            &CallRecord::SetSockOpt {
                fd: socket,
                level,
                name,
                value,
            },
        );
        r
    }
}
