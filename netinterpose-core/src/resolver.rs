use crate::constants::Syscall;
use crate::error::Error;
use libc::{c_int, c_void, sockaddr, socklen_t};
use once_cell::sync::OnceCell;
use std::ffi::CStr;
use std::fmt::Debug;
use std::ptr::NonNull;
use std::sync::Mutex;

/// C signature of `socket`.
pub type SocketFn = extern "C" fn(c_int, c_int, c_int) -> c_int;
/// C signature of `bind`.
pub type BindFn = extern "C" fn(c_int, *const sockaddr, socklen_t) -> c_int;
/// C signature of `listen`.
pub type ListenFn = extern "C" fn(c_int, c_int) -> c_int;
/// C signature of `accept`.
pub type AcceptFn = extern "C" fn(c_int, *mut sockaddr, *mut socklen_t) -> c_int;
/// C signature of `connect`.
pub type ConnectFn = extern "C" fn(c_int, *const sockaddr, socklen_t) -> c_int;
/// C signature of `shutdown`.
pub type ShutdownFn = extern "C" fn(c_int, c_int) -> c_int;
/// C signature of `setsockopt`.
pub type SetSockOptFn = extern "C" fn(c_int, c_int, c_int, *const c_void, socklen_t) -> c_int;

/// Finds the implementation a call would have reached without interposition.
pub trait Resolver: Debug + Send + Sync {
    /// Locate the next implementation of `syscall`.
    ///
    /// The returned address must have the C signature of `syscall`.
    ///
    /// # Errors
    /// [`Error::ResolutionFailed`] if no such implementation exists.
    fn resolve(&self, syscall: Syscall) -> Result<NonNull<c_void>, Error>;
}

/// Resolves through `dlsym(RTLD_NEXT, ..)`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct DlsymResolver {}

// dlerror state is only meaningful to the caller that produced it
static DL_LOCK: Mutex<()> = Mutex::new(());

impl Resolver for DlsymResolver {
    fn resolve(&self, syscall: Syscall) -> Result<NonNull<c_void>, Error> {
        let _guard = DL_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        unsafe {
            _ = libc::dlerror();
            let ptr = libc::dlsym(libc::RTLD_NEXT, syscall.symbol().as_ptr());
            NonNull::new(ptr).ok_or_else(|| {
                let msg = libc::dlerror();
                let reason = if msg.is_null() {
                    String::from("symbol not found")
                } else {
                    CStr::from_ptr(msg).to_string_lossy().into_owned()
                };
                Error::ResolutionFailed { syscall, reason }
            })
        }
    }
}

/// Process-scoped cache of resolved implementations, one slot per [`Syscall`].
///
/// A slot is filled at most once: concurrent first callers wait for the
/// resolving one and then read the same address. Failures leave the slot
/// empty.
#[derive(Debug)]
pub struct SymbolTable<R: Resolver> {
    resolver: R,
    slots: [OnceCell<usize>; Syscall::COUNT],
}

impl<R: Resolver + Default> Default for SymbolTable<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

macro_rules! typed_lookup {
    ( $( $syscall:ident : $ty:ty ),* $(,)* ) => {
        $(
            #[doc = concat!("The real `", stringify!($syscall), "`.")]
            ///
            /// # Errors
            /// if it can not be resolved.
            pub fn $syscall(&self) -> Result<$ty, Error> {
                let addr = self.address(Syscall::$syscall)?;
                // the resolver hands out addresses with the C signature of the symbol
                Ok(unsafe { std::mem::transmute::<usize, $ty>(addr) })
            }
        )*
    };
}

impl<R: Resolver> SymbolTable<R> {
    /// Create an empty table backed by `resolver`.
    #[must_use]
    pub fn new(resolver: R) -> Self {
        SymbolTable {
            resolver,
            slots: Default::default(),
        }
    }

    /// The resolver backing this table.
    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Whether `syscall` has been resolved already.
    #[must_use]
    pub fn is_resolved(&self, syscall: Syscall) -> bool {
        self.slots[syscall.slot()].get().is_some()
    }

    /// Address of the real `syscall`, resolving it on first use.
    ///
    /// # Errors
    /// if it can not be resolved.
    pub fn address(&self, syscall: Syscall) -> Result<usize, Error> {
        self.slots[syscall.slot()]
            .get_or_try_init(|| {
                let ptr = self.resolver.resolve(syscall)?;
                crate::info!("resolved \"{syscall}\" at {ptr:p}");
                Ok(ptr.as_ptr() as usize)
            })
            .copied()
    }

    typed_lookup!(
        socket: SocketFn,
        bind: BindFn,
        listen: ListenFn,
        accept: AcceptFn,
        connect: ConnectFn,
        shutdown: ShutdownFn,
        setsockopt: SetSockOptFn,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;

    extern "C" fn fake_listen(_: c_int, _: c_int) -> c_int {
        42
    }

    #[derive(Debug, Default)]
    struct SlowResolver {
        calls: AtomicUsize,
        available: AtomicBool,
    }

    impl Resolver for SlowResolver {
        fn resolve(&self, syscall: Syscall) -> Result<NonNull<c_void>, Error> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            if !self.available.load(Ordering::SeqCst) {
                return Err(Error::ResolutionFailed {
                    syscall,
                    reason: String::from("not yet"),
                });
            }
            NonNull::new(fake_listen as ListenFn as *mut c_void).ok_or_else(|| {
                Error::ResolutionFailed {
                    syscall,
                    reason: String::from("null"),
                }
            })
        }
    }

    #[test]
    fn concurrent_first_use_resolves_once() {
        let resolver = SlowResolver::default();
        resolver.available.store(true, Ordering::SeqCst);
        let table = SymbolTable::new(resolver);
        let barrier = Barrier::new(16);
        let (table, barrier) = (&table, &barrier);
        let addresses: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(move |_| {
                    s.spawn(move || {
                        _ = barrier.wait();
                        let listen = table.listen().unwrap();
                        assert_eq!(42, listen(3, 5));
                        table.address(Syscall::listen).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(fake_listen as ListenFn as usize, addresses[0]);
        assert_eq!(1, table.resolver().calls.load(Ordering::SeqCst));
        assert!(table.is_resolved(Syscall::listen));
        assert!(!table.is_resolved(Syscall::socket));
    }

    #[test]
    fn failure_is_not_cached() {
        let table = SymbolTable::new(SlowResolver::default());
        let err = table.listen().unwrap_err();
        assert_eq!(
            Error::ResolutionFailed {
                syscall: Syscall::listen,
                reason: String::from("not yet")
            },
            err
        );
        assert!(!table.is_resolved(Syscall::listen));
        table.resolver().available.store(true, Ordering::SeqCst);
        assert_eq!(42, table.listen().unwrap()(0, 0));
        assert_eq!(2, table.resolver().calls.load(Ordering::SeqCst));
    }

    #[test]
    fn dlsym_finds_libc() {
        let table = SymbolTable::<DlsymResolver>::default();
        for syscall in Syscall::ALL {
            assert!(table.address(syscall).is_ok(), "{syscall} not found");
        }
    }
}
