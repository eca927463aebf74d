use std::ops::DerefMut;

use libc::c_int;
use num::Complex;

use crate::layout::TransformKind;
use crate::plan::RawPlan;
use crate::traits::{Real, Scalar};
use super::{FftData, FftSpec, Inplace, Io, Problem, Ready, Secret, R2R};

/// The alignment FFTW sees for `p`.
pub(crate) fn alignment_of<S: Scalar>(p: *mut S) -> c_int {
    unsafe { <S::Real as Real>::alignment_of(p as *mut S::Real) }
}

impl<T: FftData<T>, I: DerefMut<Target = [T]>> FftSpec for Inplace<I> {
    type Real = T::Real;
    type Input = T;
    type Output = T;
    const KIND: TransformKind = <T as FftData<T>>::KIND;

    fn lens(&self) -> (usize, usize) {
        (self.in_out.len(), self.in_out.len())
    }
    unsafe fn plan(&mut self, problem: &Problem) -> <T::Real as Real>::Handle {
        let p = self.in_out.as_mut_ptr();
        T::plan(p, p, problem)
    }
    fn alignments(&mut self) -> (c_int, c_int) {
        let a = alignment_of(self.in_out.as_mut_ptr());
        (a, a)
    }
    fn output_mut(&mut self) -> &mut [T] {
        &mut self.in_out
    }

    fn secret() -> Secret { Secret(()) }
}

impl<T, U, I, O> FftSpec for Io<I, O>
    where T: FftData<U>, U: Scalar<Real = T::Real>,
          I: DerefMut<Target = [T]>, O: DerefMut<Target = [U]>
{
    type Real = T::Real;
    type Input = T;
    type Output = U;
    const KIND: TransformKind = <T as FftData<U>>::KIND;

    fn lens(&self) -> (usize, usize) {
        (self.in_.len(), self.out.len())
    }
    unsafe fn plan(&mut self, problem: &Problem) -> <T::Real as Real>::Handle {
        T::plan(self.in_.as_mut_ptr(), self.out.as_mut_ptr(), problem)
    }
    fn alignments(&mut self) -> (c_int, c_int) {
        (alignment_of(self.in_.as_mut_ptr()), alignment_of(self.out.as_mut_ptr()))
    }
    fn output_mut(&mut self) -> &mut [U] {
        &mut self.out
    }

    fn secret() -> Secret { Secret(()) }
}

impl<R: Real> FftData<Complex<R>> for Complex<R> {
    type State = Ready;
    const KIND: TransformKind = TransformKind::C2c;

    unsafe fn plan(in_: *mut Complex<R>, out: *mut Complex<R>, problem: &Problem) -> R::Handle {
        let l = &problem.layouts;
        R::plan_many_dft(l.rank, l.n.as_ptr(), l.howmany,
                         in_, l.inembed.as_ptr(), l.istride, l.idist,
                         out, l.onembed.as_ptr(), l.ostride, l.odist,
                         problem.sign, problem.flags)
    }
    unsafe fn execute_on(plan: &RawPlan<R>, in_: *mut Complex<R>, out: *mut Complex<R>) {
        R::execute_dft(plan.handle(), in_, out)
    }

    fn secret() -> Secret { Secret(()) }
}

impl<R: Real> FftData<Complex<R>> for R {
    type State = Ready;
    const KIND: TransformKind = TransformKind::R2c;

    unsafe fn plan(in_: *mut R, out: *mut Complex<R>, problem: &Problem) -> R::Handle {
        let l = &problem.layouts;
        R::plan_many_dft_r2c(l.rank, l.n.as_ptr(), l.howmany,
                             in_, l.inembed.as_ptr(), l.istride, l.idist,
                             out, l.onembed.as_ptr(), l.ostride, l.odist,
                             problem.flags)
    }
    unsafe fn execute_on(plan: &RawPlan<R>, in_: *mut R, out: *mut Complex<R>) {
        R::execute_dft_r2c(plan.handle(), in_, out)
    }

    fn secret() -> Secret { Secret(()) }
}

impl<R: Real> FftData<R> for Complex<R> {
    type State = Ready;
    const KIND: TransformKind = TransformKind::C2r;

    unsafe fn plan(in_: *mut Complex<R>, out: *mut R, problem: &Problem) -> R::Handle {
        let l = &problem.layouts;
        R::plan_many_dft_c2r(l.rank, l.n.as_ptr(), l.howmany,
                             in_, l.inembed.as_ptr(), l.istride, l.idist,
                             out, l.onembed.as_ptr(), l.ostride, l.odist,
                             problem.flags)
    }
    unsafe fn execute_on(plan: &RawPlan<R>, in_: *mut Complex<R>, out: *mut R) {
        R::execute_dft_c2r(plan.handle(), in_, out)
    }

    fn secret() -> Secret { Secret(()) }
}

impl<R: Real> FftData<R> for R {
    type State = R2R;
    const KIND: TransformKind = TransformKind::R2r;

    unsafe fn plan(in_: *mut R, out: *mut R, problem: &Problem) -> R::Handle {
        let l = &problem.layouts;
        R::plan_many_r2r(l.rank, l.n.as_ptr(), l.howmany,
                         in_, l.inembed.as_ptr(), l.istride, l.idist,
                         out, l.onembed.as_ptr(), l.ostride, l.odist,
                         problem.kinds.as_ptr(), problem.flags)
    }
    unsafe fn execute_on(plan: &RawPlan<R>, in_: *mut R, out: *mut R) {
        R::execute_r2r(plan.handle(), in_, out)
    }

    fn secret() -> Secret { Secret(()) }
}
