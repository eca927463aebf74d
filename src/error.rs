//! All the ways planning, layouts and wisdom can fail.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use crate::layout::TransformKind;
use crate::flags::R2rKind;

/// Which of a plan's arrays an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Buffer {
    Input,
    Output,
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Buffer::Input => f.write_str("input"),
            Buffer::Output => f.write_str("output"),
        }
    }
}

/// All the ways planning can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// FFTW returned a null plan, e.g. `WISDOM_ONLY` without matching
    /// wisdom, or `PRESERVE_INPUT` on a multi-dimensional c2r.
    FftwError,
    /// A buffer is too short for the layout describing it.
    BufferTooSmall {
        /// The offending buffer.
        buffer: Buffer,
        /// Its length.
        len: usize,
        /// The length the layout touches.
        required: usize,
    },
    /// The input and output layouts cannot describe the same transform.
    IncompatibleLayouts {
        /// The transform being planned.
        kind: TransformKind,
        /// Dimensions of the input layout.
        input: Vec<usize>,
        /// Dimensions of the output layout.
        output: Vec<usize>,
    },
    /// Real to real plans need one kind, or one kind per dimension.
    KindCount {
        /// The rank of the transform.
        rank: usize,
        /// The number of kinds supplied.
        kinds: usize,
    },
    /// The kind is undefined for the length along its dimension.
    UnsupportedLength {
        /// The kind.
        kind: R2rKind,
        /// The length of the dimension.
        n: usize,
    },
    /// A buffer for new-array execution is aligned differently to the
    /// one the plan was created with.
    Misaligned {
        /// The offending buffer.
        buffer: Buffer,
    },
    /// An invalid layout.
    Layout(LayoutError),
}

/// A `Result` alias representing result of trying to create a plan.
pub type PlanResult<T> = Result<T, PlanningError>;

impl fmt::Display for PlanningError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PlanningError::FftwError => f.write_str("FFTW could not create a plan"),
            PlanningError::BufferTooSmall { buffer, len, required } => {
                write!(f, "{} buffer has length {}, but requires at least {}",
                       buffer, len, required)
            }
            PlanningError::IncompatibleLayouts { kind, ref input, ref output } => {
                write!(f, "layouts with dimensions {:?} and {:?} do not match for a {:?} transform",
                       input, output, kind)
            }
            PlanningError::KindCount { rank, kinds } => {
                write!(f, "{} real to real kinds given for a rank {} transform", kinds, rank)
            }
            PlanningError::UnsupportedLength { kind, n } => {
                write!(f, "{:?} is not defined for length {}", kind, n)
            }
            PlanningError::Misaligned { buffer } => {
                write!(f, "{} buffer is not aligned like the planning buffer", buffer)
            }
            PlanningError::Layout(ref e) => e.fmt(f),
        }
    }
}

impl Error for PlanningError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            PlanningError::Layout(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<LayoutError> for PlanningError {
    fn from(e: LayoutError) -> PlanningError {
        PlanningError::Layout(e)
    }
}

/// Reasons a [`Layout`](../layout/struct.Layout.html) is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A layout needs at least one dimension.
    EmptyDimensions,
    /// Every dimension must be non-empty.
    ZeroDimension {
        /// The index of the dimension.
        axis: usize,
    },
    /// `embed` must have one entry per dimension.
    EmbedRank {
        /// The number of dimensions.
        rank: usize,
        /// The number of embed entries.
        embed: usize,
    },
    /// The storage along a dimension is smaller than the data.
    EmbedTooSmall {
        /// The index of the dimension.
        axis: usize,
        /// The size of the data.
        n: usize,
        /// The size of the storage.
        embed: usize,
    },
    /// There must be at least one transform.
    ZeroHowmany,
    /// Strides must be positive.
    ZeroStride,
    /// Batches of more than one transform need a positive distance.
    ZeroDist,
    /// A size does not fit in FFTW's `int`.
    Overflow,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LayoutError::EmptyDimensions => f.write_str("layout has no dimensions"),
            LayoutError::ZeroDimension { axis } => write!(f, "dimension {} is empty", axis),
            LayoutError::EmbedRank { rank, embed } => {
                write!(f, "{} embed sizes given for a rank {} layout", embed, rank)
            }
            LayoutError::EmbedTooSmall { axis, n, embed } => {
                write!(f, "dimension {} has size {} but is embedded in {}", axis, n, embed)
            }
            LayoutError::ZeroHowmany => f.write_str("layout describes no transforms"),
            LayoutError::ZeroStride => f.write_str("layout has a zero stride"),
            LayoutError::ZeroDist => f.write_str("layout has several transforms at distance zero"),
            LayoutError::Overflow => f.write_str("layout is too large for FFTW"),
        }
    }
}

impl Error for LayoutError {}

/// Failures importing or exporting wisdom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WisdomError {
    /// FFTW could not read the wisdom.
    Import,
    /// FFTW could not write the wisdom.
    Export,
    /// The path cannot be passed to FFTW as a C string.
    InvalidPath(PathBuf),
    /// The wisdom string contains a NUL byte.
    InteriorNul,
}

impl fmt::Display for WisdomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            WisdomError::Import => f.write_str("failed to import wisdom"),
            WisdomError::Export => f.write_str("failed to export wisdom"),
            WisdomError::InvalidPath(ref p) => write!(f, "invalid wisdom path {}", p.display()),
            WisdomError::InteriorNul => f.write_str("wisdom contains a NUL byte"),
        }
    }
}

impl Error for WisdomError {}
