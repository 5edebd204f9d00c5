use libc::{c_int, c_void, sockaddr, socklen_t};
use netinterpose_core::syscall::facade;

/// Traced `socket(2)`.
#[no_mangle]
pub extern "C" fn socket(domain: c_int, ty: c_int, protocol: c_int) -> c_int {
    facade::socket(domain, ty, protocol)
}

/// Traced `bind(2)`.
#[no_mangle]
pub extern "C" fn bind(socket: c_int, address: *const sockaddr, address_len: socklen_t) -> c_int {
    facade::bind(socket, address, address_len)
}

/// Traced `listen(2)`.
#[no_mangle]
pub extern "C" fn listen(socket: c_int, backlog: c_int) -> c_int {
    facade::listen(socket, backlog)
}

/// Traced `accept(2)`; the peer is only traced when a connection was accepted.
#[no_mangle]
pub extern "C" fn accept(socket: c_int, address: *mut sockaddr, address_len: *mut socklen_t) -> c_int {
    facade::accept(socket, address, address_len)
}

/// Traced `connect(2)`.
#[no_mangle]
pub extern "C" fn connect(socket: c_int, address: *const sockaddr, len: socklen_t) -> c_int {
    facade::connect(socket, address, len)
}

/// Traced `shutdown(2)`.
#[no_mangle]
pub extern "C" fn shutdown(socket: c_int, how: c_int) -> c_int {
    facade::shutdown(socket, how)
}

/// Traced `setsockopt(2)`.
#[no_mangle]
pub extern "C" fn setsockopt(
    socket: c_int,
    level: c_int,
    name: c_int,
    value: *const c_void,
    option_len: socklen_t,
) -> c_int {
    facade::setsockopt(socket, level, name, value, option_len)
}
