//! Element types understood by FFTW, and the per-precision entry points.

use std::fmt;
use std::ops::Mul;

use libc::{c_char, c_double, c_int, c_uint, c_void, size_t};
use num::{Complex, Float, Zero};

mod private {
    pub trait Sealed {}
}

/// A value that can be stored in an FFTW input or output array.
///
/// Implemented for `f32`, `f64` and `Complex` of either.
pub trait Scalar: Copy + Zero + Mul<Output = Self> + PartialEq + fmt::Debug
    + Send + Sync + 'static + private::Sealed
{
    /// The floating point type with the same precision.
    type Real: Real;

    /// Whether this is a complex type.
    const COMPLEX: bool;

    /// Multiply by a real factor.
    fn scale(self, factor: Self::Real) -> Self;
}

macro_rules! scalars {
    ($($ty: ty),*) => {
        $(
            impl private::Sealed for $ty {}
            impl Scalar for $ty {
                type Real = $ty;
                const COMPLEX: bool = false;
                fn scale(self, factor: $ty) -> $ty { self * factor }
            }
        )*
    }
}
scalars!(f32, f64);

impl<R: Real> private::Sealed for Complex<R> {}
impl<R: Real> Scalar for Complex<R> {
    type Real = R;
    const COMPLEX: bool = true;
    fn scale(self, factor: R) -> Complex<R> {
        Complex::new(self.re * factor, self.im * factor)
    }
}

/// A floating point precision with its own FFTW library.
///
/// Every function forwards to the correspondingly prefixed FFTW
/// function (`fftw_` for `f64`, `fftwf_` for `f32`), with complex
/// pointers reinterpreted as `fftw_complex`. `num::Complex` is
/// `repr(C)` and so has the same layout.
///
/// The planner, wisdom and destroy functions are not thread-safe;
/// callers hold the [`lock`](../lock/index.html).
pub unsafe trait Real: Scalar<Real = Self> + Float {
    /// The opaque plan handle of this precision.
    type Handle: Copy;

    /// Human readable name, for logging.
    const NAME: &'static str;

    #[doc(hidden)]
    fn is_null(plan: Self::Handle) -> bool;
    #[doc(hidden)]
    fn from_len(n: usize) -> Self;

    #[doc(hidden)]
    unsafe fn malloc(n: size_t) -> *mut c_void;
    #[doc(hidden)]
    unsafe fn free(p: *mut c_void);
    #[doc(hidden)]
    unsafe fn alignment_of(p: *mut Self) -> c_int;

    #[doc(hidden)]
    unsafe fn plan_many_dft(rank: c_int, n: *const c_int, howmany: c_int,
                            in_: *mut Complex<Self>, inembed: *const c_int,
                            istride: c_int, idist: c_int,
                            out: *mut Complex<Self>, onembed: *const c_int,
                            ostride: c_int, odist: c_int,
                            sign: c_int, flags: c_uint) -> Self::Handle;
    #[doc(hidden)]
    unsafe fn plan_many_dft_r2c(rank: c_int, n: *const c_int, howmany: c_int,
                                in_: *mut Self, inembed: *const c_int,
                                istride: c_int, idist: c_int,
                                out: *mut Complex<Self>, onembed: *const c_int,
                                ostride: c_int, odist: c_int,
                                flags: c_uint) -> Self::Handle;
    #[doc(hidden)]
    unsafe fn plan_many_dft_c2r(rank: c_int, n: *const c_int, howmany: c_int,
                                in_: *mut Complex<Self>, inembed: *const c_int,
                                istride: c_int, idist: c_int,
                                out: *mut Self, onembed: *const c_int,
                                ostride: c_int, odist: c_int,
                                flags: c_uint) -> Self::Handle;
    #[doc(hidden)]
    unsafe fn plan_many_r2r(rank: c_int, n: *const c_int, howmany: c_int,
                            in_: *mut Self, inembed: *const c_int,
                            istride: c_int, idist: c_int,
                            out: *mut Self, onembed: *const c_int,
                            ostride: c_int, odist: c_int,
                            kinds: *const ffi::fftw_r2r_kind, flags: c_uint) -> Self::Handle;

    #[doc(hidden)]
    unsafe fn execute(plan: Self::Handle);
    #[doc(hidden)]
    unsafe fn execute_dft(plan: Self::Handle, in_: *mut Complex<Self>, out: *mut Complex<Self>);
    #[doc(hidden)]
    unsafe fn execute_dft_r2c(plan: Self::Handle, in_: *mut Self, out: *mut Complex<Self>);
    #[doc(hidden)]
    unsafe fn execute_dft_c2r(plan: Self::Handle, in_: *mut Complex<Self>, out: *mut Self);
    #[doc(hidden)]
    unsafe fn execute_r2r(plan: Self::Handle, in_: *mut Self, out: *mut Self);
    #[doc(hidden)]
    unsafe fn destroy_plan(plan: Self::Handle);

    #[doc(hidden)]
    unsafe fn print_plan(plan: Self::Handle);
    #[doc(hidden)]
    unsafe fn sprint_plan(plan: Self::Handle) -> *mut c_char;
    #[doc(hidden)]
    unsafe fn flops(plan: Self::Handle, add: *mut c_double, mul: *mut c_double, fma: *mut c_double);
    #[doc(hidden)]
    unsafe fn estimate_cost(plan: Self::Handle) -> c_double;

    #[doc(hidden)]
    unsafe fn set_timelimit(seconds: c_double);
    #[doc(hidden)]
    unsafe fn cleanup();

    #[doc(hidden)]
    unsafe fn export_wisdom_to_filename(filename: *const c_char) -> c_int;
    #[doc(hidden)]
    unsafe fn export_wisdom_to_string() -> *mut c_char;
    #[doc(hidden)]
    unsafe fn import_wisdom_from_filename(filename: *const c_char) -> c_int;
    #[doc(hidden)]
    unsafe fn import_wisdom_from_string(input: *const c_char) -> c_int;
    #[doc(hidden)]
    unsafe fn import_system_wisdom() -> c_int;
    #[doc(hidden)]
    unsafe fn forget_wisdom();
}

macro_rules! reals {
    ($($real: ty => {
        name: $name: expr,
        plan: $plan: ty,
        complex: $complex: ty,
        malloc: $malloc: path,
        free: $free: path,
        alignment_of: $alignment_of: path,
        plan_many_dft: $plan_many_dft: path,
        plan_many_dft_r2c: $plan_many_dft_r2c: path,
        plan_many_dft_c2r: $plan_many_dft_c2r: path,
        plan_many_r2r: $plan_many_r2r: path,
        execute: $execute: path,
        execute_dft: $execute_dft: path,
        execute_dft_r2c: $execute_dft_r2c: path,
        execute_dft_c2r: $execute_dft_c2r: path,
        execute_r2r: $execute_r2r: path,
        destroy_plan: $destroy_plan: path,
        print_plan: $print_plan: path,
        sprint_plan: $sprint_plan: path,
        flops: $flops: path,
        estimate_cost: $estimate_cost: path,
        set_timelimit: $set_timelimit: path,
        cleanup: $cleanup: path,
        export_wisdom_to_filename: $export_wisdom_to_filename: path,
        export_wisdom_to_string: $export_wisdom_to_string: path,
        import_wisdom_from_filename: $import_wisdom_from_filename: path,
        import_wisdom_from_string: $import_wisdom_from_string: path,
        import_system_wisdom: $import_system_wisdom: path,
        forget_wisdom: $forget_wisdom: path,
    }),*) => {$(
        unsafe impl Real for $real {
            type Handle = $plan;
            const NAME: &'static str = $name;

            fn is_null(plan: $plan) -> bool { plan.is_null() }
            fn from_len(n: usize) -> $real { n as $real }

            unsafe fn malloc(n: size_t) -> *mut c_void { $malloc(n) }
            unsafe fn free(p: *mut c_void) { $free(p) }
            unsafe fn alignment_of(p: *mut $real) -> c_int { $alignment_of(p) }

            unsafe fn plan_many_dft(rank: c_int, n: *const c_int, howmany: c_int,
                                    in_: *mut Complex<$real>, inembed: *const c_int,
                                    istride: c_int, idist: c_int,
                                    out: *mut Complex<$real>, onembed: *const c_int,
                                    ostride: c_int, odist: c_int,
                                    sign: c_int, flags: c_uint) -> $plan {
                $plan_many_dft(rank, n, howmany,
                               in_ as *mut $complex, inembed, istride, idist,
                               out as *mut $complex, onembed, ostride, odist,
                               sign, flags)
            }
            unsafe fn plan_many_dft_r2c(rank: c_int, n: *const c_int, howmany: c_int,
                                        in_: *mut $real, inembed: *const c_int,
                                        istride: c_int, idist: c_int,
                                        out: *mut Complex<$real>, onembed: *const c_int,
                                        ostride: c_int, odist: c_int,
                                        flags: c_uint) -> $plan {
                $plan_many_dft_r2c(rank, n, howmany,
                                   in_, inembed, istride, idist,
                                   out as *mut $complex, onembed, ostride, odist,
                                   flags)
            }
            unsafe fn plan_many_dft_c2r(rank: c_int, n: *const c_int, howmany: c_int,
                                        in_: *mut Complex<$real>, inembed: *const c_int,
                                        istride: c_int, idist: c_int,
                                        out: *mut $real, onembed: *const c_int,
                                        ostride: c_int, odist: c_int,
                                        flags: c_uint) -> $plan {
                $plan_many_dft_c2r(rank, n, howmany,
                                   in_ as *mut $complex, inembed, istride, idist,
                                   out, onembed, ostride, odist,
                                   flags)
            }
            unsafe fn plan_many_r2r(rank: c_int, n: *const c_int, howmany: c_int,
                                    in_: *mut $real, inembed: *const c_int,
                                    istride: c_int, idist: c_int,
                                    out: *mut $real, onembed: *const c_int,
                                    ostride: c_int, odist: c_int,
                                    kinds: *const ffi::fftw_r2r_kind, flags: c_uint) -> $plan {
                $plan_many_r2r(rank, n, howmany,
                               in_, inembed, istride, idist,
                               out, onembed, ostride, odist,
                               kinds, flags)
            }

            unsafe fn execute(plan: $plan) { $execute(plan) }
            unsafe fn execute_dft(plan: $plan, in_: *mut Complex<$real>, out: *mut Complex<$real>) {
                $execute_dft(plan, in_ as *mut $complex, out as *mut $complex)
            }
            unsafe fn execute_dft_r2c(plan: $plan, in_: *mut $real, out: *mut Complex<$real>) {
                $execute_dft_r2c(plan, in_, out as *mut $complex)
            }
            unsafe fn execute_dft_c2r(plan: $plan, in_: *mut Complex<$real>, out: *mut $real) {
                $execute_dft_c2r(plan, in_ as *mut $complex, out)
            }
            unsafe fn execute_r2r(plan: $plan, in_: *mut $real, out: *mut $real) {
                $execute_r2r(plan, in_, out)
            }
            unsafe fn destroy_plan(plan: $plan) { $destroy_plan(plan) }

            unsafe fn print_plan(plan: $plan) { $print_plan(plan) }
            unsafe fn sprint_plan(plan: $plan) -> *mut c_char { $sprint_plan(plan) }
            unsafe fn flops(plan: $plan, add: *mut c_double, mul: *mut c_double, fma: *mut c_double) {
                $flops(plan, add, mul, fma)
            }
            unsafe fn estimate_cost(plan: $plan) -> c_double { $estimate_cost(plan) }

            unsafe fn set_timelimit(seconds: c_double) { $set_timelimit(seconds) }
            unsafe fn cleanup() { $cleanup() }

            unsafe fn export_wisdom_to_filename(filename: *const c_char) -> c_int {
                $export_wisdom_to_filename(filename)
            }
            unsafe fn export_wisdom_to_string() -> *mut c_char { $export_wisdom_to_string() }
            unsafe fn import_wisdom_from_filename(filename: *const c_char) -> c_int {
                $import_wisdom_from_filename(filename)
            }
            unsafe fn import_wisdom_from_string(input: *const c_char) -> c_int {
                $import_wisdom_from_string(input)
            }
            unsafe fn import_system_wisdom() -> c_int { $import_system_wisdom() }
            unsafe fn forget_wisdom() { $forget_wisdom() }
        }
    )*}
}

reals! {
    f64 => {
        name: "double",
        plan: ffi::fftw_plan,
        complex: ffi::fftw_complex,
        malloc: ffi::fftw_malloc,
        free: ffi::fftw_free,
        alignment_of: ffi::fftw_alignment_of,
        plan_many_dft: ffi::fftw_plan_many_dft,
        plan_many_dft_r2c: ffi::fftw_plan_many_dft_r2c,
        plan_many_dft_c2r: ffi::fftw_plan_many_dft_c2r,
        plan_many_r2r: ffi::fftw_plan_many_r2r,
        execute: ffi::fftw_execute,
        execute_dft: ffi::fftw_execute_dft,
        execute_dft_r2c: ffi::fftw_execute_dft_r2c,
        execute_dft_c2r: ffi::fftw_execute_dft_c2r,
        execute_r2r: ffi::fftw_execute_r2r,
        destroy_plan: ffi::fftw_destroy_plan,
        print_plan: ffi::fftw_print_plan,
        sprint_plan: ffi::fftw_sprint_plan,
        flops: ffi::fftw_flops,
        estimate_cost: ffi::fftw_estimate_cost,
        set_timelimit: ffi::fftw_set_timelimit,
        cleanup: ffi::fftw_cleanup,
        export_wisdom_to_filename: ffi::fftw_export_wisdom_to_filename,
        export_wisdom_to_string: ffi::fftw_export_wisdom_to_string,
        import_wisdom_from_filename: ffi::fftw_import_wisdom_from_filename,
        import_wisdom_from_string: ffi::fftw_import_wisdom_from_string,
        import_system_wisdom: ffi::fftw_import_system_wisdom,
        forget_wisdom: ffi::fftw_forget_wisdom,
    },
    f32 => {
        name: "float",
        plan: ffi::fftwf_plan,
        complex: ffi::fftwf_complex,
        malloc: ffi::fftwf_malloc,
        free: ffi::fftwf_free,
        alignment_of: ffi::fftwf_alignment_of,
        plan_many_dft: ffi::fftwf_plan_many_dft,
        plan_many_dft_r2c: ffi::fftwf_plan_many_dft_r2c,
        plan_many_dft_c2r: ffi::fftwf_plan_many_dft_c2r,
        plan_many_r2r: ffi::fftwf_plan_many_r2r,
        execute: ffi::fftwf_execute,
        execute_dft: ffi::fftwf_execute_dft,
        execute_dft_r2c: ffi::fftwf_execute_dft_r2c,
        execute_dft_c2r: ffi::fftwf_execute_dft_c2r,
        execute_r2r: ffi::fftwf_execute_r2r,
        destroy_plan: ffi::fftwf_destroy_plan,
        print_plan: ffi::fftwf_print_plan,
        sprint_plan: ffi::fftwf_sprint_plan,
        flops: ffi::fftwf_flops,
        estimate_cost: ffi::fftwf_estimate_cost,
        set_timelimit: ffi::fftwf_set_timelimit,
        cleanup: ffi::fftwf_cleanup,
        export_wisdom_to_filename: ffi::fftwf_export_wisdom_to_filename,
        export_wisdom_to_string: ffi::fftwf_export_wisdom_to_string,
        import_wisdom_from_filename: ffi::fftwf_import_wisdom_from_filename,
        import_wisdom_from_string: ffi::fftwf_import_wisdom_from_string,
        import_system_wisdom: ffi::fftwf_import_system_wisdom,
        forget_wisdom: ffi::fftwf_forget_wisdom,
    }
}

#[cfg(test)]
mod tests {
    use num::Complex;
    use super::{Real, Scalar};

    #[test]
    fn scale() {
        assert_eq!(2.0f64.scale(0.25), 0.5);
        assert_eq!(Complex::new(2.0f32, -4.0).scale(0.5), Complex::new(1.0, -2.0));
    }

    #[test]
    fn complex_flags() {
        assert!(!<f64 as Scalar>::COMPLEX);
        assert!(<Complex<f32> as Scalar>::COMPLEX);
        assert_eq!(<f32 as Real>::NAME, "float");
        assert_eq!(f64::from_len(12), 12.0);
    }
}
