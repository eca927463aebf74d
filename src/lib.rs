//! Typed, safe-by-construction plans for FFTW3.
//!
//! Plans are built with the [`Planner`](builder/struct.Planner.html),
//! whose element types choose the transform (complex to complex, real
//! to complex, complex to real or real to real) and the precision
//! (`f64` uses `libfftw3`, `f32` uses `libfftw3f`). Mismatched element
//! types do not compile.
//!
//! ```rust
//! use fftw3_typed::{Direction, Rigor};
//! use fftw3_typed::plan::VecPlan;
//! use num::Complex;
//!
//! let mut p = VecPlan::<Complex<f64>, Complex<f64>>::c2c_1d(4, Direction::Forward, Rigor::Estimate).unwrap();
//! p.input()[1] = Complex::new(1.0, 0.0);
//! p.execute();
//! assert!((p.output()[1] - Complex::new(0.0, -1.0)).norm() < 1e-12);
//! ```

pub use crate::builder::{FftData, Planner};
pub use crate::error::{Buffer, LayoutError, PlanResult, PlanningError, WisdomError};
pub use crate::flags::{Direction, Flags, R2rKind, Rigor};
pub use crate::layout::{Layout, Storage, TransformKind};
pub use crate::mem::FftwVec;
pub use crate::plan::{Flops, Plan, RawPlan, VecPlan};
pub use crate::traits::{Real, Scalar};

mod mem;

pub mod builder;
pub mod error;
pub mod flags;
pub mod layout;
pub mod plan;

pub mod wisdom;
pub mod lock;

pub mod traits;

#[test]
fn test() {
    let mut p = plan::VecPlan::<f64, num::Complex<f64>>::r2c_1d(4, Rigor::Estimate).unwrap();
    p.input()[0] = 1.0;
    p.input()[1] = 1.0;
    p.execute();

    let expected = [num::Complex::new(2.0, 0.0), num::Complex::new(1.0, -1.0), num::Complex::new(0.0, 0.0)];
    let out = p.output();
    for (z, e) in out.iter().zip(expected.iter()) {
        assert!((z - e).norm() < 1e-12, "{:?}", out);
    }
}
