use crate::constants::UNKNOWN_ADDRESS;
use crate::error::AddressError;
use libc::{sa_family_t, sockaddr, sockaddr_in, socklen_t};
use std::fmt::{Display, Formatter};
use std::mem::size_of;
use std::net::Ipv4Addr;

/// A host and port pulled out of a raw socket address, for display only.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Endpoint {
    /// The host.
    pub ip: Ipv4Addr,
    /// The port, in host byte order.
    pub port: u16,
}

impl Endpoint {
    /// Create an endpoint.
    #[must_use]
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Endpoint { ip, port }
    }

    /// Read an endpoint out of `addr`, looking at no more than `len` bytes.
    ///
    /// Only `AF_INET` addresses are rendered.
    ///
    /// # Errors
    /// if `addr` is null, shorter than the family needs or of another family.
    ///
    /// # Safety
    /// A non-null `addr` must be readable for `len` bytes.
    pub unsafe fn from_raw(addr: *const sockaddr, len: socklen_t) -> Result<Self, AddressError> {
        if addr.is_null() {
            return Err(AddressError::Null);
        }
        let family_len = size_of::<sa_family_t>();
        if (len as usize) < family_len {
            return Err(AddressError::Truncated(len));
        }
        // the family sits at the same offset for every sockaddr layout
        let family = std::ptr::addr_of!((*addr).sa_family).read_unaligned();
        if i32::from(family) != libc::AF_INET {
            return Err(AddressError::UnsupportedFamily(family));
        }
        if (len as usize) < size_of::<sockaddr_in>() {
            return Err(AddressError::Truncated(len));
        }
        let addr = addr.cast::<sockaddr_in>().read_unaligned();
        Ok(Endpoint {
            ip: Ipv4Addr::from(u32::from_be(addr.sin_addr.s_addr)),
            port: u16::from_be(addr.sin_port),
        })
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// Endpoint or the reason it is unavailable; renders the placeholder for the latter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Address(pub Result<Endpoint, AddressError>);

impl Address {
    /// Guarded conversion of a raw address, see [`Endpoint::from_raw`].
    ///
    /// # Safety
    /// A non-null `addr` must be readable for `len` bytes.
    #[must_use]
    pub unsafe fn from_raw(addr: *const sockaddr, len: socklen_t) -> Self {
        Address(Endpoint::from_raw(addr, len))
    }

    /// Like [`Address::from_raw`], for an address a call wrote into a buffer of
    /// `capacity` bytes and reported the full length of in `*len`.
    ///
    /// The reported length may exceed `capacity` when the address was truncated;
    /// no more than `capacity` bytes are read.
    ///
    /// # Safety
    /// Non-null pointers must be readable, `addr` for `capacity` bytes.
    #[must_use]
    pub unsafe fn from_raw_out(
        addr: *const sockaddr,
        capacity: socklen_t,
        len: *const socklen_t,
    ) -> Self {
        if len.is_null() {
            return Address(Err(AddressError::Null));
        }
        Self::from_raw(addr, capacity.min(len.read_unaligned()))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Ok(endpoint) => Display::fmt(endpoint, f),
            Err(_) => f.write_str(UNKNOWN_ADDRESS),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn ipv4(ip: [u8; 4], port: u16) -> sockaddr_in {
        let mut addr: sockaddr_in = unsafe { std::mem::zeroed() };
        addr.sin_family = libc::AF_INET as sa_family_t;
        addr.sin_port = port.to_be();
        addr.sin_addr.s_addr = u32::from_be_bytes(ip).to_be();
        addr
    }

    fn len_of<T>() -> socklen_t {
        socklen_t::try_from(size_of::<T>()).unwrap()
    }

    #[test]
    fn ipv4_is_rendered_in_host_order() {
        let addr = ipv4([127, 0, 0, 1], 9000);
        let endpoint = unsafe {
            Endpoint::from_raw(std::ptr::addr_of!(addr).cast(), len_of::<sockaddr_in>())
        }
        .unwrap();
        assert_eq!(Endpoint::new(Ipv4Addr::LOCALHOST, 9000), endpoint);
        assert_eq!("127.0.0.1:9000", endpoint.to_string());
    }

    #[test]
    fn null_is_unknown() {
        let address = unsafe { Address::from_raw(std::ptr::null(), len_of::<sockaddr_in>()) };
        assert_eq!(Err(AddressError::Null), address.0);
        assert_eq!(UNKNOWN_ADDRESS, address.to_string());
    }

    #[test]
    fn short_length_is_unknown() {
        let addr = ipv4([10, 1, 2, 3], 80);
        let address = unsafe { Address::from_raw(std::ptr::addr_of!(addr).cast(), 4) };
        assert_eq!(Err(AddressError::Truncated(4)), address.0);
        let address = unsafe { Address::from_raw(std::ptr::addr_of!(addr).cast(), 0) };
        assert_eq!(Err(AddressError::Truncated(0)), address.0);
        assert_eq!(UNKNOWN_ADDRESS, address.to_string());
    }

    #[test]
    fn unix_family_is_unknown() {
        let mut addr: libc::sockaddr_un = unsafe { std::mem::zeroed() };
        addr.sun_family = libc::AF_UNIX as sa_family_t;
        let address = unsafe {
            Address::from_raw(std::ptr::addr_of!(addr).cast(), len_of::<libc::sockaddr_un>())
        };
        assert_eq!(
            Err(AddressError::UnsupportedFamily(libc::AF_UNIX as sa_family_t)),
            address.0
        );
        assert_eq!(UNKNOWN_ADDRESS, address.to_string());
    }

    #[test]
    fn out_length_is_honoured() {
        let addr = ipv4([192, 168, 0, 7], 443);
        let full = len_of::<sockaddr_in>();
        let len = full;
        let address =
            unsafe { Address::from_raw_out(std::ptr::addr_of!(addr).cast(), full, &len) };
        assert_eq!("192.168.0.7:443", address.to_string());
        let address = unsafe {
            Address::from_raw_out(std::ptr::addr_of!(addr).cast(), full, std::ptr::null())
        };
        assert_eq!(UNKNOWN_ADDRESS, address.to_string());
    }

    #[test]
    fn out_length_is_capped_by_buffer() {
        let addr = ipv4([192, 168, 0, 7], 443);
        let len = len_of::<sockaddr_in>();
        let address = unsafe { Address::from_raw_out(std::ptr::addr_of!(addr).cast(), 2, &len) };
        assert_eq!(Err(AddressError::Truncated(2)), address.0);
        assert_eq!(UNKNOWN_ADDRESS, address.to_string());
    }
}
