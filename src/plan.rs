use std::ffi::CStr;
use std::ops::DerefMut;

use libc::{c_int, c_void};
use log::trace;
use num::Complex;

use crate::builder::{FftData, FftSpec, Inplace, Io, Planner};
use crate::builder::fft_data::alignment_of;
use crate::error::{Buffer, PlanResult, PlanningError};
use crate::flags::{Direction, Flags, R2rKind, Rigor};
use crate::layout::{Layout, TransformKind};
use crate::lock;
use crate::mem::FftwVec;
use crate::traits::{Real, Scalar};

/// A thin wrapper around the internal FFTW plan type. Prefer `Plan`
/// if possible.
pub struct RawPlan<R: Real> {
    plan: R::Handle
}

unsafe impl<R: Real> Send for RawPlan<R> {}

/// FFTW's count of the floating point operations a plan performs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flops {
    /// Additions.
    pub add: f64,
    /// Multiplications.
    pub mul: f64,
    /// Fused multiply-adds.
    pub fma: f64,
}

impl Flops {
    /// The total, counting a fused multiply-add as two operations.
    pub fn total(&self) -> f64 {
        self.add + self.mul + 2.0 * self.fma
    }
}

impl<R: Real> RawPlan<R> {
    /// Create a `RawPlan` from the output of `f`.
    ///
    /// This executes `f` inside a lock since FFTW plan creation is
    /// not threadsafe.
    pub fn new<F: FnOnce() -> R::Handle>(f: F) -> Option<RawPlan<R>> {
        let plan = lock::run(f);

        if R::is_null(plan) {
            None
        } else {
            Some(RawPlan { plan })
        }
    }

    /// Create a `RawPlan` directly from an FFTW plan, with no
    /// synchronisation or checks. Prefer `RawPlan::new` where possible.
    pub unsafe fn new_unchecked(plan: R::Handle) -> RawPlan<R> {
        RawPlan { plan }
    }

    pub(crate) fn handle(&self) -> R::Handle {
        self.plan
    }

    /// Print information about the plan to stdout.
    pub fn debug_print(&self) {
        lock::run(|| unsafe { R::print_plan(self.plan) })
    }

    /// FFTW's description of the plan, as printed by `debug_print`.
    pub fn description(&self) -> String {
        lock::run(|| unsafe {
            let s = R::sprint_plan(self.plan);
            if s.is_null() {
                return String::new()
            }
            let desc = CStr::from_ptr(s).to_string_lossy().into_owned();
            libc::free(s as *mut c_void);
            desc
        })
    }

    /// The exact number of floating point operations the plan performs.
    pub fn flops(&self) -> Flops {
        let mut f = Flops { add: 0.0, mul: 0.0, fma: 0.0 };
        lock::run(|| unsafe { R::flops(self.plan, &mut f.add, &mut f.mul, &mut f.fma) });
        f
    }

    /// FFTW's estimate of the cost of executing the plan.
    pub fn estimated_cost(&self) -> f64 {
        lock::run(|| unsafe { R::estimate_cost(self.plan) })
    }

    /// Execute the plan
    pub unsafe fn execute(&mut self) {
        R::execute(self.plan)
    }
}

impl<R: Real> Drop for RawPlan<R> {
    fn drop(&mut self) {
        let plan = self.plan;
        lock::run(|| unsafe { R::destroy_plan(plan) })
    }
}

/// A plan over `FftwVec`s, as made by the `_1d` constructors.
pub type VecPlan<I, O> = Plan<Io<FftwVec<I>, FftwVec<O>>>;

pub(crate) fn norm_factor<R: Real>(n: usize) -> R {
    R::one() / R::from_len(n)
}

/// The structure representing the computation of an FFT.
///
/// Manages a native FFTW3 plan, and access to the associated input and output
/// arrays. See the [`Planner`](../builder/struct.Planner.html) for information
/// about creating plans.
pub struct Plan<X: FftSpec> {
    pub(crate) raw: RawPlan<X::Real>,
    pub(crate) data: X,
    pub(crate) kind: TransformKind,
    pub(crate) flags: Flags,
    pub(crate) input: Layout,
    pub(crate) output: Layout,
    pub(crate) norm: X::Real,
    /// The alignments of the planning arrays, as FFTW sees them.
    pub(crate) alignment: (c_int, c_int),
}

impl<X: FftSpec> Plan<X> {
    /// Execute a plan.
    ///
    /// Compute the FFT of the plan's input buffer, into its output buffer.
    pub fn execute(&mut self) {
        trace!("executing {:?} plan", self.kind);
        unsafe {
            self.raw.execute()
        }
    }

    /// The factor that undoes the scaling of an unnormalised forward
    /// and backward transform pair: one over the logical size.
    pub fn normalisation(&self) -> X::Real {
        self.norm
    }

    /// Multiply every element of the output described by the output
    /// layout by [`normalisation`](#method.normalisation).
    ///
    /// An element shared by overlapping transforms is scaled once for
    /// each transform it belongs to.
    pub fn normalise(&mut self) {
        let factor = self.norm;
        let out = self.data.output_mut();
        self.output.for_each_offset(|o| out[o] = out[o].scale(factor));
    }

    /// The transform this plan computes.
    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    /// The flags the plan was created with.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// The layout of the input array.
    pub fn input_layout(&self) -> &Layout {
        &self.input
    }

    /// The layout of the output array.
    pub fn output_layout(&self) -> &Layout {
        &self.output
    }

    /// The underlying FFTW plan.
    pub fn raw(&self) -> &RawPlan<X::Real> {
        &self.raw
    }

    /// Debug printing of the plan
    pub fn debug_print(&self) {
        self.raw.debug_print()
    }

    fn check_array<S: Scalar>(&self, buffer: Buffer, data: &mut [S], layout: &Layout,
                              planned: c_int) -> PlanResult<()> {
        let required = layout.required_len();
        if data.len() < required {
            return Err(PlanningError::BufferTooSmall { buffer, len: data.len(), required })
        }
        if !self.flags.contains(Flags::UNALIGNED) && alignment_of(data.as_mut_ptr()) != planned {
            return Err(PlanningError::Misaligned { buffer })
        }
        Ok(())
    }
}

impl<T, U, I, O> Plan<Io<I, O>>
    where T: FftData<U>, U: Scalar<Real = T::Real>,
          I: DerefMut<Target = [T]>, O: DerefMut<Target = [U]>
{
    /// Get a mutable reference to the plan's input buffer.
    ///
    /// This function is usually used to fill the input buffer with a new set
    /// of data before [executing](struct.Plan.html#method.execute).
    pub fn input(&mut self) -> &mut [T] {
        &mut self.data.in_
    }

    /// Get a mutable reference to the plan's output buffer.
    pub fn output(&mut self) -> &mut [U] {
        &mut self.data.out
    }

    /// Destroy the plan, returning its buffers.
    pub fn into_buffers(self) -> (I, O) {
        (self.data.in_, self.data.out)
    }

    /// Execute the plan on other arrays.
    ///
    /// They must be long enough for the plan's layouts and, unless
    /// the plan was made with `Flags::UNALIGNED`, aligned like the
    /// planning arrays. `FftwVec`s always are.
    pub fn execute_on(&mut self, in_: &mut [T], out: &mut [U]) -> PlanResult<()> {
        self.check_array(Buffer::Input, &mut *in_, &self.input, self.alignment.0)?;
        self.check_array(Buffer::Output, &mut *out, &self.output, self.alignment.1)?;
        trace!("executing {:?} plan on new arrays", self.kind);
        unsafe { T::execute_on(&self.raw, in_.as_mut_ptr(), out.as_mut_ptr()) }
        Ok(())
    }
}

impl<T: FftData<T>, I: DerefMut<Target = [T]>> Plan<Inplace<I>> {
    /// A more ergonomic way of getting the combined input/output buffer for inplace plans.
    pub fn in_out(&mut self) -> &mut [T] {
        &mut self.data.in_out
    }

    /// Destroy the plan, returning its buffer.
    pub fn into_buffer(self) -> I {
        self.data.in_out
    }

    /// Execute the plan in place on another array.
    ///
    /// See [`Plan::execute_on`](#method.execute_on-1) for the requirements.
    pub fn execute_on(&mut self, in_out: &mut [T]) -> PlanResult<()> {
        self.check_array(Buffer::Input, &mut *in_out, &self.input, self.alignment.0)?;
        self.check_array(Buffer::Output, &mut *in_out, &self.output, self.alignment.1)?;
        trace!("executing {:?} plan on a new array", self.kind);
        let p = in_out.as_mut_ptr();
        unsafe { T::execute_on(&self.raw, p, p) }
        Ok(())
    }
}

impl<R: Real, I: DerefMut<Target = [Complex<R>]>, O: DerefMut<Target = [Complex<R>]>> Plan<Io<I, O>> {
    /// Create a 1d complex to complex plan over preallocated buffers,
    /// of the length of `in_`.
    pub fn c2c_1d_prealloc(in_: I, out: O, direction: Direction,
                           rigor: Rigor) -> PlanResult<Plan<Io<I, O>>> {
        Planner::new().rigor(rigor).direction(direction).input(in_).output(out).plan()
    }
}
impl<R: Real> Plan<Io<FftwVec<Complex<R>>, FftwVec<Complex<R>>>> {
    /// A complex to complex transformation of length `n`.
    pub fn c2c_1d(n: usize, direction: Direction, rigor: Rigor) -> PlanResult<Self> {
        Self::c2c_1d_prealloc(FftwVec::zeros(n), FftwVec::zeros(n), direction, rigor)
    }
}

impl<R: Real, I: DerefMut<Target = [R]>, O: DerefMut<Target = [Complex<R>]>> Plan<Io<I, O>> {
    /// Create a 1d real to complex plan over preallocated buffers, of
    /// the length of `in_`. `out` needs at least `in_.len() / 2 + 1`
    /// elements.
    pub fn r2c_1d_prealloc(in_: I, out: O, rigor: Rigor) -> PlanResult<Plan<Io<I, O>>> {
        Planner::new().rigor(rigor).input(in_).output(out).plan()
    }
}
impl<R: Real> Plan<Io<FftwVec<R>, FftwVec<Complex<R>>>> {
    /// A transformation from `n` real numbers to `n / 2 + 1` complex numbers.
    pub fn r2c_1d(n: usize, rigor: Rigor) -> PlanResult<Self> {
        Self::r2c_1d_prealloc(FftwVec::zeros(n), FftwVec::zeros(n / 2 + 1), rigor)
    }
}

impl<R: Real, I: DerefMut<Target = [Complex<R>]>, O: DerefMut<Target = [R]>> Plan<Io<I, O>> {
    /// Create a 1d complex to real plan over preallocated buffers, of
    /// the length of `out`. `in_` needs at least `out.len() / 2 + 1`
    /// elements.
    pub fn c2r_1d_prealloc(in_: I, out: O, rigor: Rigor) -> PlanResult<Plan<Io<I, O>>> {
        Planner::new().rigor(rigor).input(in_).output(out).plan()
    }
}
impl<R: Real> Plan<Io<FftwVec<Complex<R>>, FftwVec<R>>> {
    /// A transformation from `n / 2 + 1` complex numbers to `n` real numbers.
    pub fn c2r_1d(n: usize, rigor: Rigor) -> PlanResult<Self> {
        Self::c2r_1d_prealloc(FftwVec::zeros(n / 2 + 1), FftwVec::zeros(n), rigor)
    }
}

impl<R: Real, I: DerefMut<Target = [R]>, O: DerefMut<Target = [R]>> Plan<Io<I, O>> {
    /// Create a 1d real to real plan over preallocated buffers, of the
    /// length of `in_`.
    pub fn r2r_1d_prealloc(in_: I, out: O, kind: R2rKind,
                           rigor: Rigor) -> PlanResult<Plan<Io<I, O>>> {
        Planner::new().rigor(rigor).input(in_).output(out).r2r_kind(kind).plan()
    }
}
impl<R: Real> Plan<Io<FftwVec<R>, FftwVec<R>>> {
    /// A real to real transformation of length `n`.
    pub fn r2r_1d(n: usize, kind: R2rKind, rigor: Rigor) -> PlanResult<Self> {
        Self::r2r_1d_prealloc(FftwVec::zeros(n), FftwVec::zeros(n), kind, rigor)
    }
}

fn transform_1d<R: Real>(data: &[Complex<R>], direction: Direction)
                         -> PlanResult<FftwVec<Complex<R>>> {
    let mut plan = VecPlan::<Complex<R>, Complex<R>>::c2c_1d_prealloc(
        FftwVec::from_slice(data), FftwVec::zeros(data.len()), direction, Rigor::Estimate)?;
    plan.execute();
    Ok(plan.into_buffers().1)
}

/// The forward transform of `data`, computed by a throwaway
/// `Estimate` plan.
///
/// ```rust
/// use fftw3_typed::plan::fft_1d;
/// use num::Complex;
///
/// let x = fft_1d(&[Complex::new(1.0f64, 0.0), Complex::new(1.0, 0.0)]).unwrap();
/// assert!((x[0].re - 2.0).abs() < 1e-12 && x[1].norm() < 1e-12);
/// ```
pub fn fft_1d<R: Real>(data: &[Complex<R>]) -> PlanResult<FftwVec<Complex<R>>> {
    transform_1d(data, Direction::Forward)
}

/// The unnormalised backward transform of `data`, computed by a
/// throwaway `Estimate` plan.
pub fn ifft_1d<R: Real>(data: &[Complex<R>]) -> PlanResult<FftwVec<Complex<R>>> {
    transform_1d(data, Direction::Backward)
}
