//! Saving and restoring FFTW's wisdom.
//!
//! Each precision has its own wisdom, so everything here is generic
//! over the [`Real`](../traits/trait.Real.html) type.

use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use libc::c_void;
use log::{debug, warn};

use crate::builder::{FftData, Planner, Ready};
use crate::error::{PlanResult, WisdomError};
use crate::flags::{Direction, R2rKind, Rigor};
use crate::layout::Layout;
use crate::lock;
use crate::mem::FftwVec;
use crate::traits::{Real, Scalar};

/// Import and export FFTW wisdom implicitly.
///
/// The destructor will save wisdom to the file from which it was
/// loaded.
///
/// The `wisdom` macro performs this automatically.
///
/// # Example
///
/// ```rust,no_run
/// # #[macro_use] extern crate fftw3_typed;
/// # use std::path::Path;
/// # fn main() {
/// {
///    wisdom!(Path::new("./wise.fftw"));
///    wisdom!(f32, Path::new("./wise.fftwf"));
///    // ... perform FFTs with the assistance of that wisdom
///
/// } // any new wisdom is automatically saved.
/// # }
/// ```
pub struct WisdomGuard<R: Real = f64> {
    p: PathBuf,
    _marker: PhantomData<R>,
}

impl<R: Real> WisdomGuard<R> {
    /// Load wisdom from `p`, and save it automatically on clean-up.
    ///
    /// Failure to load is logged and otherwise ignored, so one can
    /// supply a wisdom file that does not exist (yet) and it will be
    /// created on the next run.
    pub fn import(p: &Path) -> WisdomGuard<R> {
        if !p.exists() {
            debug!("no {} wisdom at {} yet", R::NAME, p.display());
        } else if let Err(e) = import_from_file::<R>(p) {
            warn!("importing {} wisdom from {}: {}", R::NAME, p.display(), e);
        }
        WisdomGuard { p: p.to_path_buf(), _marker: PhantomData }
    }

    /// The file the wisdom is saved to.
    pub fn path(&self) -> &Path {
        &self.p
    }
}

impl<R: Real> Drop for WisdomGuard<R> {
    fn drop(&mut self) {
        if let Err(e) = export_to_file::<R>(&self.p) {
            warn!("exporting {} wisdom to {}: {}", R::NAME, self.p.display(), e);
        }
    }
}

/// Load wisdom from a file for the rest of the enclosing scope, and
/// save it back at the end. The precision defaults to `f64`.
#[macro_export]
macro_rules! wisdom {
    ($p: expr) => {
        let _guard = $crate::wisdom::WisdomGuard::<f64>::import($p);
    };
    ($real: ty, $p: expr) => {
        let _guard = $crate::wisdom::WisdomGuard::<$real>::import($p);
    };
}

fn native_file_name(p: &Path) -> Result<CString, WisdomError> {
    p.to_str()
        .and_then(|s| CString::new(s).ok())
        .ok_or_else(|| WisdomError::InvalidPath(p.to_path_buf()))
}

fn check(ret: libc::c_int, err: WisdomError) -> Result<(), WisdomError> {
    if ret != 0 { Ok(()) } else { Err(err) }
}

/// Attempt to load the system's wisdom, usually `/etc/fftw/wisdom`.
pub fn import_from_system<R: Real>() -> Result<(), WisdomError> {
    check(lock::run(|| unsafe { R::import_system_wisdom() }), WisdomError::Import)
}

/// Attempt to save wisdom to `p`.
pub fn export_to_file<R: Real>(p: &Path) -> Result<(), WisdomError> {
    let name = native_file_name(p)?;
    check(lock::run(|| unsafe { R::export_wisdom_to_filename(name.as_ptr()) }),
          WisdomError::Export)
}

/// Attempt to load wisdom from `p`.
pub fn import_from_file<R: Real>(p: &Path) -> Result<(), WisdomError> {
    let name = native_file_name(p)?;
    check(lock::run(|| unsafe { R::import_wisdom_from_filename(name.as_ptr()) }),
          WisdomError::Import)
}

/// The accumulated wisdom, in FFTW's text format.
pub fn export_to_string<R: Real>() -> Result<String, WisdomError> {
    lock::run(|| unsafe {
        let s = R::export_wisdom_to_string();
        if s.is_null() {
            return Err(WisdomError::Export)
        }
        let wisdom = CStr::from_ptr(s).to_string_lossy().into_owned();
        libc::free(s as *mut c_void);
        Ok(wisdom)
    })
}

/// Add the wisdom in `wisdom` to the accumulated wisdom.
pub fn import_from_string<R: Real>(wisdom: &str) -> Result<(), WisdomError> {
    let s = CString::new(wisdom).map_err(|_| WisdomError::InteriorNul)?;
    check(lock::run(|| unsafe { R::import_wisdom_from_string(s.as_ptr()) }),
          WisdomError::Import)
}

/// Discard all accumulated wisdom. Existing plans are unaffected.
pub fn forget<R: Real>() {
    lock::run(|| unsafe { R::forget_wisdom() })
}

/// Plan the transform from `input` to `output` and its inverse, so
/// that the wisdom for both is recorded for later plans of the same
/// problem, for example ones made with `wisdom_restriction`.
///
/// `Rigor::Estimate` produces no wisdom, so nothing is planned.
pub fn generate<I, O>(input: &Layout, output: &Layout, rigor: Rigor) -> PlanResult<()>
    where I: FftData<O, State = Ready>,
          O: FftData<I, State = Ready> + Scalar<Real = I::Real>
{
    if rigor == Rigor::Estimate {
        return Ok(())
    }
    debug!("generating {} wisdom at {:?} for {:?} -> {:?}",
           <I::Real as Real>::NAME, rigor, input.n(), output.n());

    Planner::new()
        .rigor(rigor)
        .input(FftwVec::<I>::zeros(input.required_len()))
        .output(FftwVec::<O>::zeros(output.required_len()))
        .layouts(input.clone(), output.clone())
        .plan()?;
    Planner::new()
        .rigor(rigor)
        .direction(Direction::Backward)
        .input(FftwVec::<O>::zeros(output.required_len()))
        .output(FftwVec::<I>::zeros(input.required_len()))
        .layouts(output.clone(), input.clone())
        .plan()?;
    Ok(())
}

/// Like [`generate`](fn.generate.html), for real to real transforms
/// of the given kinds. The inverse is planned with the inverse kinds.
pub fn generate_r2r<R: Real>(input: &Layout, output: &Layout, kinds: &[R2rKind],
                             rigor: Rigor) -> PlanResult<()> {
    if rigor == Rigor::Estimate {
        return Ok(())
    }
    debug!("generating {} r2r wisdom at {:?} for {:?} {:?}",
           R::NAME, rigor, kinds, input.n());

    Planner::new()
        .rigor(rigor)
        .input(FftwVec::<R>::zeros(input.required_len()))
        .output(FftwVec::<R>::zeros(output.required_len()))
        .layouts(input.clone(), output.clone())
        .r2r_kinds(kinds)
        .plan()?;

    let inverse: Vec<_> = kinds.iter().map(|k| k.inverse()).collect();
    Planner::new()
        .rigor(rigor)
        .input(FftwVec::<R>::zeros(output.required_len()))
        .output(FftwVec::<R>::zeros(input.required_len()))
        .layouts(output.clone(), input.clone())
        .r2r_kinds(&inverse)
        .plan()?;
    Ok(())
}

/// Free FFTW's internal state for the precision `R`, including wisdom.
///
/// # Safety
///
/// No plans of precision `R` may be alive, or be used afterwards.
pub unsafe fn cleanup<R: Real>() {
    lock::run(|| R::cleanup())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::error::WisdomError;
    use super::{export_to_string, import_from_string, import_from_system, export_to_file};

    #[test]
    fn string_format() {
        let w = export_to_string::<f64>().unwrap();
        assert!(w.starts_with("(fftw-3"), "{}", w);
        assert!(import_from_string::<f64>(&w).is_ok());
    }

    #[test]
    fn bad_input() {
        assert_eq!(import_from_string::<f32>("certainly not wisdom"), Err(WisdomError::Import));
        assert_eq!(import_from_string::<f32>("(fftw\0"), Err(WisdomError::InteriorNul));
        let p = Path::new("wisdom\0file");
        assert_eq!(export_to_file::<f64>(p), Err(WisdomError::InvalidPath(p.to_path_buf())));
    }

    #[test]
    fn system_wisdom() {
        // most machines have no /etc/fftw/wisdom
        match import_from_system::<f64>() {
            Ok(()) | Err(WisdomError::Import) => {}
            Err(e) => panic!("unexpected {:?}", e),
        }
    }
}
