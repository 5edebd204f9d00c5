use crate::resolver::{DlsymResolver, Resolver, SymbolTable};
use crate::sink::{StdoutSink, TraceSink};
use crate::syscall::common::{errno, set_errno};
use crate::syscall::trace::TraceSyscall;
use libc::{c_int, c_void, sockaddr, socklen_t};
use once_cell::sync::Lazy;

/// Resolves each call's real implementation and runs it through the tracing chain.
///
/// When the real implementation can not be found the call fails with `EACCES`
/// and `-1`, nothing is invoked and nothing is traced.
#[derive(Debug)]
pub struct Interposer<R: Resolver, S: TraceSink> {
    symbols: SymbolTable<R>,
    chain: TraceSyscall<S>,
}

impl<R: Resolver + Default, S: TraceSink + Default> Default for Interposer<R, S> {
    fn default() -> Self {
        Self::new(R::default(), S::default())
    }
}

macro_rules! interpose {
    ( $self: expr, $syscall:ident, $($arg: expr),* $(,)* ) => {{
        // first-use resolution must not leak its errno into the caller's
        let saved = errno();
        match $self.symbols.$syscall() {
            Ok(fn_ptr) => {
                set_errno(saved);
                $self.chain.$syscall(fn_ptr, $($arg, )*)
            }
            Err(e) => {
                $crate::error!("{e}, failing the call with EACCES");
                set_errno(libc::EACCES);
                -1
            }
        }
    }};
}

impl<R: Resolver, S: TraceSink> Interposer<R, S> {
    #[must_use]
    pub fn new(resolver: R, sink: S) -> Self {
        Interposer {
            symbols: SymbolTable::new(resolver),
            chain: TraceSyscall::new(sink),
        }
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolTable<R> {
        &self.symbols
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        self.chain.sink()
    }

    pub fn socket(&self, domain: c_int, ty: c_int, protocol: c_int) -> c_int {
        interpose!(self, socket, domain, ty, protocol)
    }

    pub fn bind(&self, socket: c_int, address: *const sockaddr, address_len: socklen_t) -> c_int {
        interpose!(self, bind, socket, address, address_len)
    }

    pub fn listen(&self, socket: c_int, backlog: c_int) -> c_int {
        interpose!(self, listen, socket, backlog)
    }

    pub fn accept(
        &self,
        socket: c_int,
        address: *mut sockaddr,
        address_len: *mut socklen_t,
    ) -> c_int {
        interpose!(self, accept, socket, address, address_len)
    }

    pub fn connect(&self, socket: c_int, address: *const sockaddr, len: socklen_t) -> c_int {
        interpose!(self, connect, socket, address, len)
    }

    pub fn shutdown(&self, socket: c_int, how: c_int) -> c_int {
        interpose!(self, shutdown, socket, how)
    }

    pub fn setsockopt(
        &self,
        socket: c_int,
        level: c_int,
        name: c_int,
        value: *const c_void,
        option_len: socklen_t,
    ) -> c_int {
        interpose!(self, setsockopt, socket, level, name, value, option_len)
    }
}

static INTERPOSER: Lazy<Interposer<DlsymResolver, StdoutSink>> = Lazy::new(Interposer::default);

/// socket

#[must_use]
pub fn socket(domain: c_int, ty: c_int, protocol: c_int) -> c_int {
    INTERPOSER.socket(domain, ty, protocol)
}

#[must_use]
pub fn bind(socket: c_int, address: *const sockaddr, address_len: socklen_t) -> c_int {
    INTERPOSER.bind(socket, address, address_len)
}

#[must_use]
pub fn listen(socket: c_int, backlog: c_int) -> c_int {
    INTERPOSER.listen(socket, backlog)
}

#[must_use]
pub fn accept(socket: c_int, address: *mut sockaddr, address_len: *mut socklen_t) -> c_int {
    INTERPOSER.accept(socket, address, address_len)
}

#[must_use]
pub fn connect(socket: c_int, address: *const sockaddr, len: socklen_t) -> c_int {
    INTERPOSER.connect(socket, address, len)
}

#[must_use]
pub fn shutdown(socket: c_int, how: c_int) -> c_int {
    INTERPOSER.shutdown(socket, how)
}

#[must_use]
pub fn setsockopt(
    socket: c_int,
    level: c_int,
    name: c_int,
    value: *const c_void,
    option_len: socklen_t,
) -> c_int {
    INTERPOSER.setsockopt(socket, level, name, value, option_len)
}
