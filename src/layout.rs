//! Array layouts for FFTW's advanced interface.
//!
//! A [`Layout`](struct.Layout.html) describes how one array of a plan
//! is laid out: the dimensions `n` of each transform, how many
//! transforms there are, the dimensions of the storage each transform
//! is embedded in, the stride between consecutive elements and the
//! distance between consecutive transforms. Element `(i0, ..., ik)` of
//! transform `t` lives at
//!
//! ```text
//! t * dist + stride * (i0 * embed[1] * ... * embed[k] + ... + ik)
//! ```

use libc::c_int;

use crate::builder::FftData;
use crate::error::LayoutError;

/// The four kinds of transform FFTW computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TransformKind {
    C2c,
    R2c,
    C2r,
    R2r,
}

/// How a batch of transforms is interleaved in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Storage {
    /// Each transform is contiguous, one after the other.
    #[default]
    RowMajor,
    /// The `i`th elements of all transforms are adjacent.
    ColumnMajor,
}

/// The layout of one array of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    n: Vec<usize>,
    howmany: usize,
    embed: Vec<usize>,
    stride: usize,
    dist: usize,
    len: usize,
}

impl Layout {
    /// Describe `howmany` transforms of dimensions `n`, stored in
    /// arrays of dimensions `embed` with the given stride and distance.
    ///
    /// Transforms are allowed to overlap. FFTW then reads the shared
    /// elements once per transform.
    pub fn new(n: &[usize], howmany: usize, embed: &[usize],
               stride: usize, dist: usize) -> Result<Layout, LayoutError> {
        if n.is_empty() {
            return Err(LayoutError::EmptyDimensions)
        }
        if let Some(axis) = n.iter().position(|&d| d == 0) {
            return Err(LayoutError::ZeroDimension { axis })
        }
        if embed.len() != n.len() {
            return Err(LayoutError::EmbedRank { rank: n.len(), embed: embed.len() })
        }
        if let Some(axis) = n.iter().zip(embed.iter()).position(|(n, e)| e < n) {
            return Err(LayoutError::EmbedTooSmall { axis, n: n[axis], embed: embed[axis] })
        }
        if howmany == 0 {
            return Err(LayoutError::ZeroHowmany)
        }
        if stride == 0 {
            return Err(LayoutError::ZeroStride)
        }
        if howmany > 1 && dist == 0 {
            return Err(LayoutError::ZeroDist)
        }

        let len = required_len(n, howmany, embed, stride, dist).ok_or(LayoutError::Overflow)?;
        Ok(Layout {
            n: n.to_vec(),
            howmany,
            embed: embed.to_vec(),
            stride,
            dist,
            len,
        })
    }

    /// A single tightly packed transform of dimensions `n`.
    pub fn contiguous(n: &[usize]) -> Result<Layout, LayoutError> {
        Layout::many(n, 1, Storage::RowMajor)
    }

    /// `howmany` tightly packed transforms of dimensions `n`.
    pub fn many(n: &[usize], howmany: usize, storage: Storage) -> Result<Layout, LayoutError> {
        let size = n.iter().try_fold(1usize, |m, &d| m.checked_mul(d)).ok_or(LayoutError::Overflow)?;
        let (stride, dist) = match storage {
            Storage::RowMajor => (1, size),
            Storage::ColumnMajor => (howmany, 1),
        };
        Layout::new(n, howmany, n, stride, dist)
    }

    /// The number of dimensions of each transform.
    pub fn rank(&self) -> usize { self.n.len() }
    /// The dimensions of each transform.
    pub fn n(&self) -> &[usize] { &self.n }
    /// The number of transforms.
    pub fn howmany(&self) -> usize { self.howmany }
    /// The dimensions of the storage of each transform.
    pub fn embed(&self) -> &[usize] { &self.embed }
    /// The distance between consecutive elements.
    pub fn stride(&self) -> usize { self.stride }
    /// The distance between the first elements of consecutive transforms.
    pub fn dist(&self) -> usize { self.dist }

    /// The number of elements in each transform.
    pub fn size(&self) -> usize {
        self.n.iter().product()
    }

    /// The smallest buffer length containing every element of the layout.
    pub fn required_len(&self) -> usize {
        self.len
    }

    /// Call `f` with the offset of every element, transform by
    /// transform in row-major order.
    pub fn for_each_offset<F: FnMut(usize)>(&self, mut f: F) {
        let pitches = pitches(&self.embed);
        let mut idx = vec![0; self.n.len()];
        for t in 0..self.howmany {
            let base = t * self.dist;
            idx.iter_mut().for_each(|i| *i = 0);
            'elems: loop {
                let offset = idx.iter().zip(pitches.iter()).map(|(i, p)| i * p).sum::<usize>();
                f(base + self.stride * offset);

                for axis in (0..idx.len()).rev() {
                    idx[axis] += 1;
                    if idx[axis] < self.n[axis] {
                        continue 'elems;
                    }
                    idx[axis] = 0;
                }
                break;
            }
        }
    }
}

/// `pitch[k]` is the product of the embed sizes after axis `k`.
fn pitches(embed: &[usize]) -> Vec<usize> {
    let mut pitch = vec![1; embed.len()];
    for k in (0..embed.len().saturating_sub(1)).rev() {
        pitch[k] = pitch[k + 1] * embed[k + 1];
    }
    pitch
}

fn required_len(n: &[usize], howmany: usize, embed: &[usize],
                stride: usize, dist: usize) -> Option<usize> {
    let mut pitch = 1usize;
    let mut last = 0usize;
    for k in (0..n.len()).rev() {
        last = last.checked_add((n[k] - 1).checked_mul(pitch)?)?;
        pitch = pitch.checked_mul(embed[k])?;
    }
    (howmany - 1).checked_mul(dist)?
        .checked_add(last.checked_mul(stride)?)?
        .checked_add(1)
}

fn halved(dims: &[usize]) -> Vec<usize> {
    let mut v = dims.to_vec();
    if let Some(last) = v.last_mut() {
        *last = *last / 2 + 1;
    }
    v
}

impl TransformKind {
    /// The input and output dimensions of a transform whose real-space
    /// (logical) dimensions are `logical`.
    ///
    /// The last dimension of the complex side of a real/complex
    /// transform is `n / 2 + 1`.
    pub fn side_dims(self, logical: &[usize]) -> (Vec<usize>, Vec<usize>) {
        match self {
            TransformKind::C2c | TransformKind::R2r => (logical.to_vec(), logical.to_vec()),
            TransformKind::R2c => (logical.to_vec(), halved(logical)),
            TransformKind::C2r => (halved(logical), logical.to_vec()),
        }
    }

    /// Whether `input` and `output` can be the two sides of one
    /// transform of this kind.
    pub fn comparable(self, input: &Layout, output: &Layout) -> bool {
        if input.rank() != output.rank() || input.howmany() != output.howmany() {
            return false
        }
        match self {
            TransformKind::C2c | TransformKind::R2r => input.n() == output.n(),
            TransformKind::R2c => halved(input.n()) == output.n(),
            TransformKind::C2r => input.n() == &halved(output.n())[..],
        }
    }

    /// The real-space dimensions FFTW is given for a pair of layouts.
    pub fn logical_dims<'a>(self, input: &'a Layout, output: &'a Layout) -> &'a [usize] {
        match self {
            TransformKind::C2r => output.n(),
            _ => input.n(),
        }
    }

    /// The length of a 1d transform inferred from the buffer lengths.
    pub(crate) fn default_len(self, in_len: usize, out_len: usize) -> usize {
        match self {
            TransformKind::C2r => out_len,
            _ => in_len,
        }
    }
}

/// The lengths of a tightly packed input and output array for a
/// transform from `I` to `O` of (logical) dimensions `dims`.
///
/// ```rust
/// use fftw3_typed::layout::data_size;
/// use num::Complex;
/// assert_eq!(data_size::<f64, Complex<f64>>(&[4, 6]), (24, 16));
/// ```
pub fn data_size<I: FftData<O>, O>(dims: &[usize]) -> (usize, usize) {
    let (i, o) = I::KIND.side_dims(dims);
    (i.iter().product(), o.iter().product())
}

/// A pair of layouts converted to FFTW's argument types.
pub(crate) struct RawLayouts {
    pub rank: c_int,
    pub n: Vec<c_int>,
    pub howmany: c_int,
    pub inembed: Vec<c_int>,
    pub istride: c_int,
    pub idist: c_int,
    pub onembed: Vec<c_int>,
    pub ostride: c_int,
    pub odist: c_int,
}

fn to_int(x: usize) -> Result<c_int, LayoutError> {
    c_int::try_from(x).map_err(|_| LayoutError::Overflow)
}
fn to_ints(xs: &[usize]) -> Result<Vec<c_int>, LayoutError> {
    xs.iter().map(|&x| to_int(x)).collect()
}

impl RawLayouts {
    pub fn new(kind: TransformKind, input: &Layout, output: &Layout) -> Result<RawLayouts, LayoutError> {
        Ok(RawLayouts {
            rank: to_int(input.rank())?,
            n: to_ints(kind.logical_dims(input, output))?,
            howmany: to_int(input.howmany())?,
            inembed: to_ints(input.embed())?,
            istride: to_int(input.stride())?,
            idist: to_int(input.dist())?,
            onembed: to_ints(output.embed())?,
            ostride: to_int(output.stride())?,
            odist: to_int(output.dist())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Layout, Storage, TransformKind};
    use crate::error::LayoutError;

    fn offsets(l: &Layout) -> Vec<usize> {
        let mut v = vec![];
        l.for_each_offset(|o| v.push(o));
        v
    }

    #[test]
    fn contiguous() {
        let l = Layout::contiguous(&[3, 4]).unwrap();
        assert_eq!(l.rank(), 2);
        assert_eq!(l.size(), 12);
        assert_eq!(l.required_len(), 12);
        assert_eq!(offsets(&l), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn many_storage_orders() {
        let row = Layout::many(&[4], 3, Storage::RowMajor).unwrap();
        assert_eq!((row.stride(), row.dist()), (1, 4));
        assert_eq!(row.required_len(), 12);

        let col = Layout::many(&[4], 3, Storage::ColumnMajor).unwrap();
        assert_eq!((col.stride(), col.dist()), (3, 1));
        assert_eq!(col.required_len(), 12);
        assert_eq!(&offsets(&col)[..4], &[0, 3, 6, 9]);
        assert_eq!(&offsets(&col)[4..8], &[1, 4, 7, 10]);
    }

    #[test]
    fn embedded() {
        // a 2x3 block inside 2x5 storage, every other element
        let l = Layout::new(&[2, 3], 1, &[2, 5], 2, 0).unwrap();
        assert_eq!(offsets(&l), vec![0, 2, 4, 10, 12, 14]);
        assert_eq!(l.required_len(), 15);
    }

    #[test]
    fn invalid() {
        assert_eq!(Layout::contiguous(&[]), Err(LayoutError::EmptyDimensions));
        assert_eq!(Layout::contiguous(&[4, 0]), Err(LayoutError::ZeroDimension { axis: 1 }));
        assert_eq!(Layout::new(&[4], 1, &[4, 4], 1, 4),
                   Err(LayoutError::EmbedRank { rank: 1, embed: 2 }));
        assert_eq!(Layout::new(&[4, 4], 1, &[4, 3], 1, 16),
                   Err(LayoutError::EmbedTooSmall { axis: 1, n: 4, embed: 3 }));
        assert_eq!(Layout::new(&[4], 0, &[4], 1, 4), Err(LayoutError::ZeroHowmany));
        assert_eq!(Layout::new(&[4], 1, &[4], 0, 4), Err(LayoutError::ZeroStride));
        assert_eq!(Layout::new(&[4], 2, &[4], 1, 0), Err(LayoutError::ZeroDist));
        // a single transform never uses its dist
        assert!(Layout::new(&[4], 1, &[4], 1, 0).is_ok());
        assert_eq!(Layout::contiguous(&[usize::MAX, 2]), Err(LayoutError::Overflow));
    }

    #[test]
    fn overlapping_transforms() {
        let l = Layout::new(&[4], 2, &[4], 1, 1).unwrap();
        assert_eq!(l.required_len(), 5);
        assert_eq!(offsets(&l), vec![0, 1, 2, 3, 1, 2, 3, 4]);
    }

    #[test]
    fn side_dims() {
        assert_eq!(TransformKind::R2c.side_dims(&[4, 7]), (vec![4, 7], vec![4, 4]));
        assert_eq!(TransformKind::C2r.side_dims(&[8]), (vec![5], vec![8]));
        assert_eq!(TransformKind::R2r.side_dims(&[8]), (vec![8], vec![8]));
    }

    #[test]
    fn comparable() {
        let real = Layout::contiguous(&[6, 8]).unwrap();
        let half = Layout::contiguous(&[6, 5]).unwrap();
        assert!(TransformKind::R2c.comparable(&real, &half));
        assert!(TransformKind::C2r.comparable(&half, &real));
        assert!(!TransformKind::R2c.comparable(&half, &real));
        assert!(!TransformKind::C2c.comparable(&real, &half));
        assert!(TransformKind::C2c.comparable(&real, &real));

        let batch = Layout::many(&[6, 8], 2, Storage::RowMajor).unwrap();
        assert!(!TransformKind::R2r.comparable(&real, &batch));
        assert_eq!(TransformKind::C2r.logical_dims(&half, &real), &[6, 8]);
    }
}
