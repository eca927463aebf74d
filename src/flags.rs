//! Planner flags, transform directions and real-to-real kinds.

use std::ops::{BitOr, BitOrAssign};

use libc::{c_int, c_uint};

/// How much effort FFTW should put into computing the best strategy
/// to use.
///
/// The `FFTW_WISDOM_ONLY` rigor level is replaced by the
/// [`wisdom_restriction`](../builder/struct.Planner.html#method.wisdom_restriction)
/// option of the planner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Rigor {
    Estimate,
    Measure,
    Patient,
    Exhaustive,
}
impl Rigor {
    /// All rigor levels, from cheapest to most thorough.
    pub const ALL: [Rigor; 4] = [Rigor::Estimate, Rigor::Measure, Rigor::Patient, Rigor::Exhaustive];

    fn bits(self) -> c_uint {
        match self {
            Rigor::Estimate => ffi::FFTW_ESTIMATE,
            Rigor::Measure => ffi::FFTW_MEASURE,
            Rigor::Patient => ffi::FFTW_PATIENT,
            Rigor::Exhaustive => ffi::FFTW_EXHAUSTIVE,
        }
    }
}

/// A set of FFTW planner flags.
///
/// Flags combine with `|`, following the FFTW conventions:
///
/// ```rust
/// use fftw3_typed::Flags;
/// let f = Flags::PATIENT | Flags::WISDOM_ONLY;
/// assert!(f.contains(Flags::WISDOM_ONLY));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Flags(c_uint);

impl Flags {
    /// No flags at all. Equal to `MEASURE`, which FFTW encodes as zero.
    pub const EMPTY: Flags = Flags(0);
    /// Pick a (probably sub-optimal) plan quickly by heuristic. The
    /// arrays are not touched during planning.
    pub const ESTIMATE: Flags = Flags(ffi::FFTW_ESTIMATE);
    /// Time several candidate algorithms. Overwrites the arrays while
    /// planning.
    pub const MEASURE: Flags = Flags(ffi::FFTW_MEASURE);
    /// Like `MEASURE`, over a wider range of algorithms.
    pub const PATIENT: Flags = Flags(ffi::FFTW_PATIENT);
    /// Like `PATIENT`, over an even wider range of algorithms.
    pub const EXHAUSTIVE: Flags = Flags(ffi::FFTW_EXHAUSTIVE);
    /// Only create a plan if wisdom of at least the requested rigor
    /// is available.
    pub const WISDOM_ONLY: Flags = Flags(ffi::FFTW_WISDOM_ONLY);
    /// An out-of-place transform may overwrite its input.
    pub const DESTROY_INPUT: Flags = Flags(ffi::FFTW_DESTROY_INPUT);
    /// An out-of-place transform must not change its input.
    ///
    /// Multi-dimensional complex to real transforms have no input
    /// preserving algorithm, and planning them with this flag fails.
    pub const PRESERVE_INPUT: Flags = Flags(ffi::FFTW_PRESERVE_INPUT);
    /// Make no alignment assumptions, so that the plan can be executed
    /// on arrays with an alignment different to the planning arrays.
    pub const UNALIGNED: Flags = Flags(ffi::FFTW_UNALIGNED);
    /// Prefer algorithms using less memory.
    pub const CONSERVE_MEMORY: Flags = Flags(ffi::FFTW_CONSERVE_MEMORY);

    /// The raw FFTW representation.
    pub fn bits(self) -> c_uint {
        self.0
    }

    /// Whether every flag set in `other` is also set in `self`.
    ///
    /// `MEASURE` has no bits, so every set contains it.
    pub fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for Flags {
    fn default() -> Flags {
        Flags::ESTIMATE
    }
}

impl From<Rigor> for Flags {
    fn from(r: Rigor) -> Flags {
        Flags(r.bits())
    }
}

impl BitOr for Flags {
    type Output = Flags;
    fn bitor(self, other: Flags) -> Flags {
        Flags(self.0 | other.0)
    }
}
impl BitOr<Rigor> for Flags {
    type Output = Flags;
    fn bitor(self, other: Rigor) -> Flags {
        self | Flags::from(other)
    }
}
impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, other: Flags) {
        self.0 |= other.0
    }
}

/// The direction of the transform to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Direction {
    Forward, Backward
}
impl Direction {
    /// The sign of the exponent, as FFTW expects it.
    pub fn sign(self) -> c_int {
        match self {
            Direction::Forward => ffi::FFTW_FORWARD,
            Direction::Backward => ffi::FFTW_BACKWARD,
        }
    }

    /// The opposite direction.
    pub fn inverse(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

impl Default for Direction {
    fn default() -> Direction {
        Direction::Forward
    }
}

/// Represents what type of real to real transformation we want to be doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum R2rKind {
    /// A forward FFT which computes a half complex transform.
    ///
    /// Since the FFT of a real series is always symetrical, this mode can use
    /// an output array of the same size as the input. It stores the real
    /// components in the first half of the output array and the imaginary
    /// components in the second half, in reverse order.
    R2hc,
    /// The inverse of `R2hc` above. Expects the same encoding scheme.
    Hc2r,
    /// Computes the discrete Hartley transform. Is its own inverse.
    Dht,
    /// REDFT00, also known as DCT-I. Is its own inverse.
    Dct00,
    /// REDFT01, also known as DCT-III. Inverse is `Dct10`.
    Dct01,
    /// REDFT10, also known as DCT-II. Inverse is `Dct01`.
    Dct10,
    /// REDFT11, also known as DCT-IV. Is its own inverse.
    Dct11,
    /// RODFT00, also known as DST-I. Is its own inverse.
    Dst00,
    /// RODFT01, also known as DST-III. Inverse is `Dst10`.
    Dst01,
    /// RODFT10, also known as DST-II. Inverse is `Dst01`.
    Dst10,
    /// RODFT11, also known as DST-IV. Is its own inverse.
    Dst11,
}
impl R2rKind {
    /// All the kinds FFTW supports.
    pub const ALL: [R2rKind; 11] = [
        R2rKind::R2hc, R2rKind::Hc2r, R2rKind::Dht,
        R2rKind::Dct00, R2rKind::Dct01, R2rKind::Dct10, R2rKind::Dct11,
        R2rKind::Dst00, R2rKind::Dst01, R2rKind::Dst10, R2rKind::Dst11,
    ];

    /// Internal utility to convert our enums to native FFTW enums.
    pub(crate) fn as_fftw(self) -> ffi::fftw_r2r_kind {
        match self {
            R2rKind::R2hc => ffi::FFTW_R2HC,
            R2rKind::Hc2r => ffi::FFTW_HC2R,
            R2rKind::Dht => ffi::FFTW_DHT,
            R2rKind::Dct00 => ffi::FFTW_REDFT00,
            R2rKind::Dct01 => ffi::FFTW_REDFT01,
            R2rKind::Dct10 => ffi::FFTW_REDFT10,
            R2rKind::Dct11 => ffi::FFTW_REDFT11,
            R2rKind::Dst00 => ffi::FFTW_RODFT00,
            R2rKind::Dst01 => ffi::FFTW_RODFT01,
            R2rKind::Dst10 => ffi::FFTW_RODFT10,
            R2rKind::Dst11 => ffi::FFTW_RODFT11,
        }
    }

    /// The kind computing the (unnormalised) inverse of this one.
    pub fn inverse(self) -> R2rKind {
        match self {
            R2rKind::R2hc => R2rKind::Hc2r,
            R2rKind::Hc2r => R2rKind::R2hc,
            R2rKind::Dct01 => R2rKind::Dct10,
            R2rKind::Dct10 => R2rKind::Dct01,
            R2rKind::Dst01 => R2rKind::Dst10,
            R2rKind::Dst10 => R2rKind::Dst01,
            k @ (R2rKind::Dht | R2rKind::Dct00 | R2rKind::Dct11 |
                 R2rKind::Dst00 | R2rKind::Dst11) => k,
        }
    }

    /// The size of the DFT equivalent to this transform on `n` points.
    ///
    /// A forward transform followed by its inverse scales the data by
    /// this amount.
    pub fn logical_dimension(self, n: usize) -> usize {
        match self {
            R2rKind::R2hc | R2rKind::Hc2r | R2rKind::Dht => n,
            R2rKind::Dct00 => 2 * n.saturating_sub(1),
            R2rKind::Dst00 => 2 * (n + 1),
            R2rKind::Dct01 | R2rKind::Dct10 | R2rKind::Dct11 |
            R2rKind::Dst01 | R2rKind::Dst10 | R2rKind::Dst11 => 2 * n,
        }
    }

    /// Whether FFTW defines this transform for `n` points.
    pub fn supports_length(self, n: usize) -> bool {
        match self {
            R2rKind::Dct00 => n >= 2,
            _ => n >= 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Flags, R2rKind, Rigor};

    #[test]
    fn flags_combine() {
        let f = Flags::from(Rigor::Patient) | Flags::WISDOM_ONLY;
        assert!(f.contains(Flags::PATIENT));
        assert!(f.contains(Flags::WISDOM_ONLY));
        assert!(!f.contains(Flags::ESTIMATE));
        assert_eq!(f.bits(), ffi::FFTW_PATIENT | ffi::FFTW_WISDOM_ONLY);

        let mut g = Flags::default();
        g |= Flags::UNALIGNED;
        assert_eq!(g, Flags::ESTIMATE | Flags::UNALIGNED);
        assert_eq!(Flags::from(Rigor::Measure).bits(), 0);
    }

    #[test]
    fn direction_signs() {
        assert_eq!(Direction::Forward.sign(), -1);
        assert_eq!(Direction::Backward.sign(), 1);
        assert_eq!(Direction::Forward.inverse(), Direction::Backward);
    }

    #[test]
    fn r2r_inverse_is_involution() {
        for &k in R2rKind::ALL.iter() {
            assert_eq!(k.inverse().inverse(), k);
            assert_eq!(k.logical_dimension(8), k.inverse().logical_dimension(8));
        }
        assert_eq!(R2rKind::Dct10.inverse(), R2rKind::Dct01);
        assert_eq!(R2rKind::Dst11.inverse(), R2rKind::Dst11);
    }

    #[test]
    fn logical_dimensions() {
        assert_eq!(R2rKind::R2hc.logical_dimension(10), 10);
        assert_eq!(R2rKind::Dct00.logical_dimension(10), 18);
        assert_eq!(R2rKind::Dst00.logical_dimension(10), 22);
        assert_eq!(R2rKind::Dct10.logical_dimension(10), 20);
        assert!(!R2rKind::Dct00.supports_length(1));
        assert!(R2rKind::Dst00.supports_length(1));
    }
}
