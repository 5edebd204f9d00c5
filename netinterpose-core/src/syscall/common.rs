use libc::c_int;

/// The calling thread's `errno`.
#[must_use]
pub fn errno() -> c_int {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Overwrite the calling thread's `errno`.
pub fn set_errno(errno: c_int) {
    unsafe { *errno_location() = errno }
}

unsafe fn errno_location() -> *mut c_int {
    cfg_if::cfg_if! {
        if #[cfg(any(target_os = "linux", target_os = "l4re", target_os = "emscripten", target_os = "redox", target_os = "fuchsia"))] {
            libc::__errno_location()
        } else if #[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))] {
            libc::__errno()
        } else {
            libc::__error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        set_errno(libc::ECONNREFUSED);
        assert_eq!(libc::ECONNREFUSED, errno());
        set_errno(0);
        assert_eq!(0, errno());
    }
}
