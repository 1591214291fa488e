//! Opaque host object handles
//!
//! A [`Handle`] identifies a native object owned by the host (in practice a
//! pointer into host memory). The shim never dereferences, frees, or tracks
//! it: the host alone decides when a handle stops being valid, and using a
//! stale handle is a contract violation rather than something checked here.

use std::ffi::c_void;
use std::fmt;

/// Pointer-sized token referencing a host-owned native object
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Handle(usize);

impl Handle {
    /// The null handle
    pub const NULL: Handle = Handle(0);

    /// Create a handle from a raw token
    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Create a handle from a host pointer
    #[inline]
    pub fn from_ptr(ptr: *mut c_void) -> Self {
        Self(ptr as usize)
    }

    /// Get the raw token
    #[inline]
    pub const fn raw(self) -> usize {
        self.0
    }

    /// Get the handle back as a host pointer
    #[inline]
    pub fn as_ptr(self) -> *mut c_void {
        self.0 as *mut c_void
    }

    /// Check if this is the null handle
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#x})", self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_pointer_round_trip() {
        let mut target = 7u32;
        let ptr = &mut target as *mut u32 as *mut c_void;
        let handle = Handle::from_ptr(ptr);
        assert_eq!(handle.as_ptr(), ptr);
        assert!(!handle.is_null());
    }

    #[test]
    fn test_null_handle() {
        assert!(Handle::NULL.is_null());
        assert_eq!(Handle::default(), Handle::NULL);
        assert!(Handle::from_ptr(std::ptr::null_mut()).is_null());
        assert_eq!(format!("{:?}", Handle::from_raw(0x10)), "Handle(0x10)");
    }
}
