//! Memory backing.

use std::alloc::{self, Layout};
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use num::Zero;

/// FFTW's allocator guarantees at least this alignment.
const FFTW_ALIGN: usize = 16;

struct RawVec<T> {
    dat: NonNull<T>,
    len: usize
}
impl<T> RawVec<T> {
    fn uninit(n: usize) -> RawVec<T> {
        assert!(mem::align_of::<T>() <= FFTW_ALIGN,
                "FftwVec: alignment of {} exceeds fftw_malloc's", mem::align_of::<T>());
        let layout = Layout::array::<T>(n).expect("FftwVec::uninit: size overflow");
        if layout.size() == 0 {
            return RawVec { dat: NonNull::dangling(), len: n }
        }

        let dat = unsafe { ffi::fftw_malloc(layout.size()) } as *mut T;
        match NonNull::new(dat) {
            Some(dat) => RawVec { dat, len: n },
            None => alloc::handle_alloc_error(layout),
        }
    }

    fn allocated(&self) -> bool {
        self.len * mem::size_of::<T>() > 0
    }
}

impl<T> Drop for RawVec<T> {
    fn drop(&mut self) {
        if self.allocated() {
            unsafe { ffi::fftw_free(self.dat.as_ptr() as *mut libc::c_void) }
        }
    }
}

/// A non-resizable vector allocated using FFTWs allocator.
///
/// This implements `Deref<Target = [T]>` and `DerefMut` and so can be
/// used nearly-interchangeably with slices. Memory from `fftw_malloc`
/// has the alignment FFTW's SIMD code paths want, so plans made on it
/// are usually faster than plans made on a `Vec`.
pub struct FftwVec<T> {
    dat: RawVec<T>
}

unsafe impl<T: Send> Send for FftwVec<T> {}
unsafe impl<T: Sync> Sync for FftwVec<T> {}

/// Elements `..idx` of `dat` are initialised; they are dropped if
/// filling panics.
struct PartialVec<T> {
    dat: RawVec<T>,
    idx: usize
}

impl<T> Drop for PartialVec<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(self.dat.dat.as_ptr(), self.idx));
        }
    }
}

impl<T> FftwVec<T> {
    fn fill_with<F: FnMut(usize) -> T>(n: usize, mut f: F) -> FftwVec<T> {
        let mut v: PartialVec<T> = PartialVec {
            dat: RawVec::uninit(n),
            idx: 0,
        };

        while v.idx < n {
            unsafe {
                ptr::write(v.dat.dat.as_ptr().add(v.idx), f(v.idx));
            }
            v.idx += 1
        }

        unsafe {
            let ret = FftwVec {
                dat: ptr::read(&v.dat)
            };
            mem::forget(v);
            ret
        }
    }

    /// Allocate a `FftwVec` of length `n` filled with clones of `elem`.
    pub fn from_elem(n: usize, elem: T) -> FftwVec<T> where T: Clone {
        FftwVec::fill_with(n, |_| elem.clone())
    }

    /// Allocate a `FftwVec` containing a copy of `data`.
    pub fn from_slice(data: &[T]) -> FftwVec<T> where T: Clone {
        FftwVec::fill_with(data.len(), |i| data[i].clone())
    }
}

impl<T: Zero> FftwVec<T> {
    /// Allocate a `FftwVec` of length `n` containing zeros.
    pub fn zeros(n: usize) -> FftwVec<T> {
        FftwVec::fill_with(n, |_| T::zero())
    }
}

impl<T> Deref for FftwVec<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.dat.dat.as_ptr(), self.dat.len) }
    }
}
impl<T> DerefMut for FftwVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.dat.dat.as_ptr(), self.dat.len) }
    }
}

impl<T> Drop for FftwVec<T> {
    fn drop(&mut self) {
        // free everything
        unsafe { ptr::drop_in_place(&mut **self as *mut [T]) }
    }
}

impl<T: Clone> Clone for FftwVec<T> {
    fn clone(&self) -> FftwVec<T> {
        FftwVec::from_slice(self)
    }
}

impl<T: fmt::Debug> fmt::Debug for FftwVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        (**self).fmt(f)
    }
}

impl<T: PartialEq> PartialEq for FftwVec<T> {
    fn eq(&self, other: &FftwVec<T>) -> bool {
        **self == **other
    }
}

impl<'a, T: Clone> From<&'a [T]> for FftwVec<T> {
    fn from(data: &'a [T]) -> FftwVec<T> {
        FftwVec::from_slice(data)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::panic;
    use crate::mem::FftwVec;
    use num::Complex;

    #[test]
    fn fftw_vec() {
        let mut v = FftwVec::<usize>::zeros(100);
        for (i, x) in v.iter_mut().enumerate() {
            *x = i;
        }
        let mut i = 0;
        for x in v.iter() {
            assert_eq!(*x, i);
            i += 1;
        }
        assert_eq!(i, 100);
    }

    #[test]
    fn aligned_for_simd() {
        let v = FftwVec::<Complex<f64>>::zeros(17);
        assert_eq!(v.as_ptr() as usize % 16, 0);
        assert!(v.iter().all(|z| *z == Complex::new(0.0, 0.0)));
    }

    #[test]
    fn empty() {
        let v = FftwVec::<f64>::zeros(0);
        assert!(v.is_empty());
        let w = v.clone();
        assert_eq!(v, w);
    }

    #[test]
    fn from_slice_and_clone() {
        let v = FftwVec::from_slice(&[1.0f32, 2.0, 3.0]);
        let mut w = v.clone();
        w[0] = 5.0;
        assert_eq!(&*v, &[1.0, 2.0, 3.0]);
        assert_eq!(&*w, &[5.0, 2.0, 3.0]);
        assert_eq!(format!("{:?}", v), "[1.0, 2.0, 3.0]");
    }

    struct Counted<'a>(&'a Cell<usize>);
    impl<'a> Clone for Counted<'a> {
        fn clone(&self) -> Counted<'a> {
            if self.0.get() == 3 {
                panic!("clone number 3")
            }
            self.0.set(self.0.get() + 1);
            Counted(self.0)
        }
    }
    impl<'a> Drop for Counted<'a> {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    #[test]
    fn panicking_clone_drops_written_elements() {
        let live = Cell::new(1);
        let elem = Counted(&live);
        let r = panic::catch_unwind(panic::AssertUnwindSafe(|| FftwVec::from_elem(10, elem.clone())));
        assert!(r.is_err());
        // only the original survives
        assert_eq!(live.get(), 1);
        drop(elem);
        assert_eq!(live.get(), 0);
    }
}
