//! The typed planner.
//!
//! ```rust
//! use fftw3_typed::{FftwVec, Planner, Rigor};
//! use num::Complex;
//!
//! let mut plan = Planner::new()
//!     .rigor(Rigor::Estimate)
//!     .input(FftwVec::<f64>::zeros(8))
//!     .output(FftwVec::<Complex<f64>>::zeros(5))
//!     .plan()
//!     .unwrap();
//! plan.input()[0] = 1.0;
//! plan.execute();
//! assert!(plan.output().iter().all(|z| (z.re - 1.0).abs() < 1e-12 && z.im.abs() < 1e-12));
//! ```

use std::marker::PhantomData;
use std::ops::DerefMut;
use std::time::Duration;

use libc::{c_int, c_uint};
use log::debug;

use crate::error::{Buffer, PlanResult, PlanningError, LayoutError};
use crate::flags::{Direction, Flags, R2rKind, Rigor};
use crate::layout::{Layout, RawLayouts, Storage, TransformKind};
use crate::plan::{self, Plan, RawPlan};
use crate::traits::{Real, Scalar};

pub(crate) mod fft_data;

/// Values for which `[Self] -> [Target]` works as a transform.
///
/// Both sides always have the same precision, so `f32` data cannot be
/// planned into an `f64` buffer.
///
/// ```rust,compile_fail
/// use fftw3_typed::{FftwVec, Planner};
/// use num::Complex;
///
/// let plan = Planner::new()
///     .input(FftwVec::<f32>::zeros(8))
///     .output(FftwVec::<Complex<f64>>::zeros(5))
///     .plan();
/// ```
pub trait FftData<Target>: Scalar {
    /// The state the planner reaches once the output is known:
    /// [`Ready`](struct.Ready.html), or [`R2R`](struct.R2R.html) when
    /// kinds are still needed.
    type State;

    /// The transform computed from `[Self]` to `[Target]`.
    const KIND: TransformKind;

    #[doc(hidden)]
    unsafe fn plan(in_: *mut Self, out: *mut Target,
                   problem: &Problem) -> <Self::Real as Real>::Handle;

    #[doc(hidden)]
    unsafe fn execute_on(plan: &RawPlan<Self::Real>, in_: *mut Self, out: *mut Target);

    #[doc(hidden)]
    fn secret() -> Secret;
}

/// Used a placeholder before the plan has been filled out.
///
/// See [`Planner::new`](struct.Planner.html#method.new).
pub struct Begin(());

/// A stage where the input has been configured.
///
/// See [`Planner::input`](struct.Planner.html#method.input).
pub struct Input<I> {
    in_: I
}

/// A stage where both input and output have been configured.
///
/// See [`Planner::output`](struct.Planner.html#method.output).
pub struct Io<I, O> {
    pub(crate) in_: I,
    pub(crate) out: O
}

/// A stage where one buffer is both input and output.
///
/// See [`Planner::inplace`](struct.Planner.html#method.inplace).
pub struct Inplace<I> {
    pub(crate) in_out: I
}

/// Represents that the planner is only interested in real to real transforms
pub struct R2R(());
/// Represents that we have chosen a specific type of transform and are ready to build.
pub struct Ready(());

#[derive(Clone, Debug)]
enum Shape {
    /// One 1d transform over the whole of the buffers.
    Default,
    Dims { n: Vec<usize>, howmany: usize, storage: Storage },
    Layouts(Layout, Layout),
}

#[doc(hidden)]
#[derive(Clone, Debug)]
pub struct Meta {
    rigor: Rigor,
    wisdom_restriction: bool,
    extra: Flags,
    direction: Direction,
    time_limit: Option<Duration>,

    shape: Shape,
    r2r_kinds: Vec<R2rKind>,
}

impl Meta {
    fn flags(&self) -> Flags {
        let mut flags = Flags::from(self.rigor) | self.extra;
        if self.wisdom_restriction {
            flags |= Flags::WISDOM_ONLY;
        }
        flags
    }

    /// The input and output layouts, with dimensions given in terms of
    /// the logical (real space) size.
    fn layouts(&self, kind: TransformKind, in_len: usize,
               out_len: usize) -> Result<(Layout, Layout), LayoutError> {
        match self.shape {
            Shape::Default => {
                let (i, o) = kind.side_dims(&[kind.default_len(in_len, out_len)]);
                Ok((Layout::contiguous(&i)?, Layout::contiguous(&o)?))
            }
            Shape::Dims { ref n, howmany, storage } => {
                let (i, o) = kind.side_dims(n);
                Ok((Layout::many(&i, howmany, storage)?, Layout::many(&o, howmany, storage)?))
            }
            Shape::Layouts(ref i, ref o) => Ok((i.clone(), o.clone())),
        }
    }

    /// One kind per dimension; a single kind applies to all of them.
    fn r2r_kinds(&self, logical: &[usize]) -> PlanResult<Vec<R2rKind>> {
        let kinds = match self.r2r_kinds.len() {
            1 => vec![self.r2r_kinds[0]; logical.len()],
            k if k == logical.len() => self.r2r_kinds.clone(),
            k => return Err(PlanningError::KindCount { rank: logical.len(), kinds: k }),
        };
        for (&kind, &n) in kinds.iter().zip(logical) {
            if !kind.supports_length(n) {
                return Err(PlanningError::UnsupportedLength { kind, n })
            }
        }
        Ok(kinds)
    }
}

/// Everything FFTW needs to know to create a plan, apart from the arrays.
#[doc(hidden)]
pub struct Problem {
    pub(crate) layouts: RawLayouts,
    pub(crate) sign: c_int,
    pub(crate) flags: c_uint,
    pub(crate) kinds: Vec<ffi::fftw_r2r_kind>,
}

/// This is designed to stop the must-be-public traits from being able
/// to be implemented externally, because that would be rather
/// strange.
#[doc(hidden)]
pub struct Secret(());

/// High level interface to building FFTW3 plans.
///
/// The first parameter is refered to as the "Stage" of the planner.
/// Planners progress through the following stages:
///
///   * [`Begin`](struct.Begin.html): The initial stage, indicating that nothing has been set up
///   * [`Input<I>`](struct.Input.html): Set by calling [`Planner::input`](struct.Planner.html#method.input).
///   Indicates that the planner knows what sort of input (`f64`, `Complex<f32>`,
///   etc.) the final plan will be consuming.
///   * [`Inplace<I>`](struct.Inplace.html) or [`Io<I, O>`](struct.Io.html): Indicates that we know what sort of output
///   the planner will be producing.  If the eventual plan will be in place, we transition to the `Inplace<I>` stage
///   using [`Planner::inplace`](struct.Planner.html#method.inplace). Otherwise, we configure the output buffer by
///   calling [`Planner::output`](struct.Planner.html#method.output).
///
/// The second parameter is the state. Real to real transforms start in
/// [`R2R`](struct.R2R.html) and need their kinds set before they are
/// [`Ready`](struct.Ready.html) to [`plan`](struct.Planner.html#method.plan).
///
/// Without an explicit shape, the plan is a single 1d transform over
/// the whole of the buffers.
pub struct Planner<Stage, State> {
    meta: Meta,
    data: Stage,
    _marker: PhantomData<State>
}

impl Planner<Begin, Begin> {
    /// Create a planner where we are in the beginning stage and state.
    ///
    /// Plans default to the forward direction and `Rigor::Estimate`.
    pub fn new() -> Planner<Begin, Begin> {
        Planner {
            meta: Meta {
                rigor: Rigor::Estimate,
                wisdom_restriction: false,
                extra: Flags::EMPTY,
                direction: Direction::Forward,
                time_limit: None,

                shape: Shape::Default,
                r2r_kinds: vec![],
            },

            data: Begin(()),

            _marker: PhantomData
        }
    }
}

impl Default for Planner<Begin, Begin> {
    fn default() -> Planner<Begin, Begin> {
        Planner::new()
    }
}

impl<Y> Planner<Begin, Y> {
    /// Set the input buffer for the planner.
    ///
    /// The plan keeps the address FFTW planned with, so `in_` must
    /// dereference to the same memory for as long as it is owned by
    /// the planner or plan. `FftwVec`, `Vec` and `&mut [T]` all do.
    ///
    /// Transitions from the [`Begin`](struct.Begin.html) stage to the [`Input`](struct.Input.html) stage.
    pub fn input<T, I>(self, in_: I) -> Planner<Input<I>, Begin>
        where T: Scalar, I: DerefMut<Target = [T]>
    {
        Planner {
            meta: self.meta,
            data: Input { in_ },
            _marker: PhantomData
        }
    }
}

impl<X, Y> Planner<X, Y> {
    /// Set the rigor to use for this plan.
    pub fn rigor(mut self, r: Rigor) -> Planner<X, Y> {
        self.meta.rigor = r;
        self
    }
    /// Set whether the planner should only be successfully created if
    /// there exists wisdom created with at least the rigor level set.
    pub fn wisdom_restriction(mut self, wisdom_only: bool) -> Planner<X, Y> {
        self.meta.wisdom_restriction = wisdom_only;
        self
    }

    /// Add planner flags other than the rigor, such as
    /// `Flags::PRESERVE_INPUT` or `Flags::UNALIGNED`.
    pub fn flags(mut self, flags: Flags) -> Planner<X, Y> {
        self.meta.extra |= flags;
        self
    }

    /// Set the direction of the transform to perform.
    ///
    /// Only complex to complex transforms have a direction; the others
    /// are implied by their types and kinds.
    pub fn direction(mut self, direction: Direction) -> Planner<X, Y> {
        self.meta.direction = direction;
        self
    }

    /// Limit the time FFTW spends planning.
    pub fn time_limit(mut self, limit: Duration) -> Planner<X, Y> {
        self.meta.time_limit = Some(limit);
        self
    }
}

impl<T: Scalar, I: DerefMut<Target = [T]>, Y> Planner<Input<I>, Y> {
    /// Set the output buffer of the planner.
    ///
    /// Like the input, `out` must always dereference to the same memory.
    ///
    /// Transitions from the [`Input<I>`](struct.Input.html) stage to the [`Io`](struct.Io.html) stage.
    pub fn output<U, O>(self, out: O) -> Planner<Io<I, O>, <T as FftData<U>>::State>
        where T: FftData<U>, U: Scalar, O: DerefMut<Target = [U]>
    {
        Planner {
            meta: self.meta,
            data: Io { in_: self.data.in_, out },
            _marker: PhantomData
        }
    }
}

impl<T: FftData<T>, I: DerefMut<Target = [T]>, Y> Planner<Input<I>, Y> {
    /// Configure the planner to operate in place
    ///
    /// Only transforms whose input and output have the same type can be
    /// in place.
    ///
    /// Transitions from the [`Input<I>`](struct.Input.html) stage to the [`Inplace<I>`](struct.Inplace.html) stage.
    pub fn inplace(self) -> Planner<Inplace<I>, <T as FftData<T>>::State> {
        Planner {
            meta: self.meta,
            data: Inplace { in_out: self.data.in_ },
            _marker: PhantomData
        }
    }
}

impl<X: FftSpec, Y> Planner<X, Y> {
    /// Declare that we are interested in a 1d FFT
    ///
    /// `n` is the size of the dimension.
    ///
    /// Requires that the planner be in one of the terminal stages ([`Io<I, O>`](struct.Io.html) or
    /// [`Inplace<I>`](struct.Inplace.html)).
    pub fn _1d(self, n: usize) -> Planner<X, Y> {
        self.nd(&[n])
    }

    /// Declare that we are interested in a 2d FFT
    ///
    /// `n0` and `n1` are the size of the first and second dimensions respectively.
    pub fn _2d(self, n0: usize, n1: usize) -> Planner<X, Y> {
        self.nd(&[n0, n1])
    }

    /// Declare that we are interested in a 3d FFT
    ///
    /// `n0`, `n1` and `n2` are the size of the first, second, and third dimensions respectively.
    pub fn _3d(self, n0: usize, n1: usize, n2: usize) -> Planner<X, Y> {
        self.nd(&[n0, n1, n2])
    }

    /// Declare that we are interested in a n-dimensional FFT
    ///
    /// `dims` are the logical (real space) sizes of each of the
    /// dimensions, in row-major order.
    pub fn nd(self, dims: &[usize]) -> Planner<X, Y> {
        self.many(dims, 1, Storage::RowMajor)
    }

    /// Declare `howmany` tightly packed n-dimensional FFTs, stored one
    /// after the other or interleaved according to `storage`.
    pub fn many(mut self, dims: &[usize], howmany: usize, storage: Storage) -> Planner<X, Y> {
        self.meta.shape = Shape::Dims { n: dims.to_vec(), howmany, storage };
        self
    }

    /// Give the layouts of the input and output arrays explicitly.
    ///
    /// The complex side of a real/complex transform has dimensions
    /// `[n0, ..., n / 2 + 1]`.
    pub fn layouts(mut self, input: Layout, output: Layout) -> Planner<X, Y> {
        self.meta.shape = Shape::Layouts(input, output);
        self
    }
}

/// Aggregate information about the buffers of a plan. Used to produce raw plans.
pub trait FftSpec {
    /// The precision of the plan
    type Real: Real;
    /// The input element type
    type Input: Scalar<Real = Self::Real>;
    /// The output element type
    type Output: Scalar<Real = Self::Real>;
    /// The transform being computed
    const KIND: TransformKind;

    #[doc(hidden)]
    fn lens(&self) -> (usize, usize);
    #[doc(hidden)]
    unsafe fn plan(&mut self, problem: &Problem) -> <Self::Real as Real>::Handle;
    #[doc(hidden)]
    fn alignments(&mut self) -> (c_int, c_int);
    #[doc(hidden)]
    fn output_mut(&mut self) -> &mut [Self::Output];

    #[doc(hidden)]
    fn secret() -> Secret;
}

impl<X: FftSpec> Planner<X, R2R> {
    /// Use the same real to real kind along every dimension.
    pub fn r2r_kind(self, kind: R2rKind) -> Planner<X, Ready> {
        self.r2r_kinds(&[kind])
    }
    /// Set the real to real kind of each dimension.
    ///
    /// Planning fails unless there is exactly one kind, or one kind
    /// per dimension.
    pub fn r2r_kinds(mut self, kinds: &[R2rKind]) -> Planner<X, Ready> {
        self.meta.r2r_kinds = kinds.to_vec();

        Planner {
            meta: self.meta,
            data: self.data,
            _marker: PhantomData
        }
    }
}

fn check_len(buffer: Buffer, len: usize, layout: &Layout) -> PlanResult<()> {
    let required = layout.required_len();
    if len < required {
        Err(PlanningError::BufferTooSmall { buffer, len, required })
    } else {
        Ok(())
    }
}

impl<X: FftSpec> Planner<X, Ready> {
    /// Produce a plan
    ///
    /// Planning with a rigor other than `Estimate` overwrites the
    /// buffers, so fill them afterwards.
    pub fn plan(mut self) -> PlanResult<Plan<X>> {
        let kind = X::KIND;
        let (in_len, out_len) = self.data.lens();
        let (input, output) = self.meta.layouts(kind, in_len, out_len)?;
        if !kind.comparable(&input, &output) {
            return Err(PlanningError::IncompatibleLayouts {
                kind,
                input: input.n().to_vec(),
                output: output.n().to_vec(),
            })
        }
        check_len(Buffer::Input, in_len, &input)?;
        check_len(Buffer::Output, out_len, &output)?;

        let logical = kind.logical_dims(&input, &output).to_vec();
        let (kinds, logical_size) = if kind == TransformKind::R2r {
            let kinds = self.meta.r2r_kinds(&logical)?;
            let size = kinds.iter().zip(&logical).map(|(k, &n)| k.logical_dimension(n)).product();
            (kinds, size)
        } else {
            (vec![], logical.iter().product())
        };

        let flags = self.meta.flags();
        let problem = Problem {
            layouts: RawLayouts::new(kind, &input, &output)?,
            sign: self.meta.direction.sign(),
            flags: flags.bits(),
            kinds: kinds.iter().map(|k| k.as_fftw()).collect(),
        };
        debug!("planning {:?} ({}) of size {:?} x {}, kinds {:?}, flags {:?}",
               kind, <X::Real as Real>::NAME, logical, input.howmany(), kinds, flags);

        let time_limit = self.meta.time_limit;
        let data = &mut self.data;
        let raw = RawPlan::<X::Real>::new(|| unsafe {
            if let Some(limit) = time_limit {
                <X::Real as Real>::set_timelimit(limit.as_secs_f64());
            }
            let p = data.plan(&problem);
            if time_limit.is_some() {
                <X::Real as Real>::set_timelimit(ffi::FFTW_NO_TIMELIMIT);
            }
            p
        }).ok_or(PlanningError::FftwError)?;
        debug!("planned: {}", raw.description());

        let alignment = self.data.alignments();
        Ok(Plan {
            raw,
            data: self.data,
            kind,
            flags,
            input,
            output,
            norm: plan::norm_factor(logical_size),
            alignment,
        })
    }
}

#[cfg(test)]
mod tests {
    use num::Complex;

    use crate::error::{Buffer, LayoutError, PlanningError};
    use crate::flags::{R2rKind, Rigor};
    use crate::layout::{Layout, Storage, TransformKind};
    use crate::mem::FftwVec;
    use super::Planner;

    #[test]
    fn default_shape_uses_buffers() {
        let plan = Planner::new()
            .input(FftwVec::<f32>::zeros(10))
            .output(FftwVec::<Complex<f32>>::zeros(6))
            .plan()
            .unwrap();
        assert_eq!(plan.kind(), TransformKind::R2c);
        assert_eq!(plan.input_layout().n(), &[10]);
        assert_eq!(plan.output_layout().n(), &[6]);

        // the real side gives the size of a c2r
        let plan = Planner::new()
            .input(vec![Complex::new(0.0f64, 0.0); 6])
            .output(vec![0.0f64; 11])
            .plan()
            .unwrap();
        assert_eq!(plan.kind(), TransformKind::C2r);
        assert_eq!(plan.output_layout().n(), &[11]);
        assert_eq!(plan.normalisation(), 1.0 / 11.0);
    }

    #[test]
    fn buffer_too_small() {
        let r = Planner::new()
            .input(FftwVec::<Complex<f64>>::zeros(16))
            .output(FftwVec::<Complex<f64>>::zeros(15))
            ._2d(4, 4)
            .plan();
        assert_eq!(r.err(), Some(PlanningError::BufferTooSmall {
            buffer: Buffer::Output,
            len: 15,
            required: 16,
        }));

        let r = Planner::new()
            .input(FftwVec::<f64>::zeros(7))
            .output(FftwVec::<Complex<f64>>::zeros(5))
            ._1d(8)
            .plan();
        assert_eq!(r.err(), Some(PlanningError::BufferTooSmall {
            buffer: Buffer::Input,
            len: 7,
            required: 8,
        }));
    }

    #[test]
    fn incompatible_layouts() {
        let r = Planner::new()
            .input(FftwVec::<f64>::zeros(8))
            .output(FftwVec::<Complex<f64>>::zeros(8))
            .layouts(Layout::contiguous(&[8]).unwrap(), Layout::contiguous(&[8]).unwrap())
            .plan();
        assert_eq!(r.err(), Some(PlanningError::IncompatibleLayouts {
            kind: TransformKind::R2c,
            input: vec![8],
            output: vec![8],
        }));
    }

    #[test]
    fn invalid_shape() {
        let r = Planner::new()
            .input(FftwVec::<Complex<f64>>::zeros(8))
            .inplace()
            .many(&[8], 0, Storage::RowMajor)
            .plan();
        assert_eq!(r.err(), Some(PlanningError::Layout(LayoutError::ZeroHowmany)));

        let r = Planner::new()
            .input(FftwVec::<Complex<f64>>::zeros(0))
            .inplace()
            .plan();
        assert_eq!(r.err(), Some(PlanningError::Layout(LayoutError::ZeroDimension { axis: 0 })));
    }

    #[test]
    fn r2r_kind_checks() {
        let r = Planner::new()
            .input(FftwVec::<f64>::zeros(12))
            .output(FftwVec::<f64>::zeros(12))
            ._2d(3, 4)
            .r2r_kinds(&[R2rKind::Dct10, R2rKind::Dct10, R2rKind::Dht])
            .plan();
        assert_eq!(r.err(), Some(PlanningError::KindCount { rank: 2, kinds: 3 }));

        let r = Planner::new()
            .input(FftwVec::<f64>::zeros(1))
            .inplace()
            .r2r_kind(R2rKind::Dct00)
            .plan();
        assert_eq!(r.err(), Some(PlanningError::UnsupportedLength { kind: R2rKind::Dct00, n: 1 }));

        let plan = Planner::new()
            .input(FftwVec::<f64>::zeros(12))
            .output(FftwVec::<f64>::zeros(12))
            ._2d(3, 4)
            .r2r_kind(R2rKind::Dct10)
            .plan()
            .unwrap();
        assert_eq!(plan.kind(), TransformKind::R2r);
        // (2 * 3) * (2 * 4)
        assert_eq!(plan.normalisation(), 1.0 / 48.0);
    }

    #[test]
    fn batched_layouts() {
        let plan = Planner::new()
            .rigor(Rigor::Estimate)
            .input(FftwVec::<f64>::zeros(3 * 8))
            .output(FftwVec::<Complex<f64>>::zeros(3 * 5))
            .many(&[8], 3, Storage::ColumnMajor)
            .plan()
            .unwrap();
        assert_eq!(plan.input_layout().howmany(), 3);
        assert_eq!(plan.input_layout().stride(), 3);
        assert_eq!(plan.output_layout().n(), &[5]);
        assert_eq!(plan.normalisation(), 1.0 / 8.0);
    }
}
