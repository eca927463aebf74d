mod common;

use float_cmp::assert_approx_eq;
use num::Complex;
use rand::random;
use std::time::Duration;

use fftw3_typed::{Direction, FftwVec, Flags, Layout, Planner, PlanningError, R2rKind, Rigor, Storage};
use common::{close_c32, close_c64, close_f32, close_f64};

const N: usize = 32;

/// Transform random data forward and back at every rigor, and check
/// the normalised result against the original.
macro_rules! smoke_test {
    ($input: ty, $output: ty, $n_out: expr, $ctor: expr, $cmp: expr) => {{
        common::init();
        for &rigor in Rigor::ALL.iter() {
            let mut plan = Planner::new()
                .rigor(rigor)
                .input(FftwVec::<$input>::zeros(N))
                .output(FftwVec::<$output>::zeros($n_out))
                .plan().unwrap();
            let mut inv = Planner::new()
                .direction(Direction::Backward)
                .rigor(rigor)
                .input(FftwVec::<$output>::zeros($n_out))
                .output(FftwVec::<$input>::zeros(N))
                .plan().unwrap();

            let data: Vec<$input> = (0..N).map(|_| $ctor).collect();
            plan.input().copy_from_slice(&data);
            plan.execute();

            inv.input().copy_from_slice(plan.output());
            inv.execute();
            inv.normalise();
            assert!($cmp(&data, inv.output()), "rigor {:?}", rigor);
        }
    }}
}

#[test]
fn c2c_smoke_test() {
    smoke_test!(Complex<f64>, Complex<f64>, N, Complex::new(random(), random()), close_c64)
}
#[test]
fn c2c_f32_smoke_test() {
    smoke_test!(Complex<f32>, Complex<f32>, N, Complex::new(random(), random()), close_c32)
}
#[test]
fn r2c_c2r_smoke_test() {
    smoke_test!(f64, Complex<f64>, N / 2 + 1, random(), close_f64)
}
#[test]
fn r2c_c2r_f32_smoke_test() {
    smoke_test!(f32, Complex<f32>, N / 2 + 1, random(), close_f32)
}

#[test]
fn c2c_inplace_smoke_test() {
    common::init();
    for &rigor in Rigor::ALL.iter() {
        let data = (0..N).map(|_| Complex::new(random(), random())).collect::<Vec<Complex<f64>>>();
        let mut plan = Planner::new()
            .rigor(rigor)
            .input(FftwVec::<Complex<f64>>::zeros(N))
            .inplace()
            .plan().unwrap();
        plan.in_out().copy_from_slice(&data);
        plan.execute();

        let mut inv = Planner::new()
            .rigor(rigor)
            .direction(Direction::Backward)
            .input(FftwVec::<Complex<f64>>::zeros(N))
            .inplace()
            .plan().unwrap();
        inv.in_out().copy_from_slice(plan.in_out());
        inv.execute();
        inv.normalise();
        assert!(close_c64(inv.in_out(), &data), "rigor {:?}", rigor);
    }
}

#[test]
fn r2r_smoke_test() {
    common::init();
    for &kind in R2rKind::ALL.iter() {
        for &rigor in [Rigor::Estimate, Rigor::Measure].iter() {
            let mut plan = Planner::new()
                .rigor(rigor)
                .input(FftwVec::<f64>::zeros(N))
                .output(FftwVec::<f64>::zeros(N))
                .r2r_kind(kind)
                .plan().unwrap();
            let mut inv = Planner::new()
                .rigor(rigor)
                .input(FftwVec::<f64>::zeros(N))
                .inplace()
                .r2r_kind(kind.inverse())
                .plan().unwrap();

            let data: Vec<f64> = (0..N).map(|_| random()).collect();
            plan.input().copy_from_slice(&data);
            plan.execute();
            inv.in_out().copy_from_slice(plan.output());
            inv.execute();
            inv.normalise();
            assert!(close_f64(&data, inv.in_out()), "{:?} at {:?}", kind, rigor);
        }
    }
}

#[test]
fn c2c_known_values() {
    let x = [1.0, 2.0, 3.0, 4.0].iter().map(|&r| Complex::new(r, 0.0)).collect::<Vec<Complex<f64>>>();
    let mut plan = Planner::new()
        .input(FftwVec::from_slice(&x))
        .output(FftwVec::<Complex<f64>>::zeros(4))
        .plan().unwrap();
    plan.execute();
    let expected = [Complex::new(10.0, 0.0), Complex::new(-2.0, 2.0),
                    Complex::new(-2.0, 0.0), Complex::new(-2.0, -2.0)];
    assert!(close_c64(plan.output(), &expected));

    let mut inv = Planner::new()
        .direction(Direction::Backward)
        .input(FftwVec::from_slice(&expected))
        .output(FftwVec::<Complex<f64>>::zeros(4))
        .plan().unwrap();
    inv.execute();
    for (y, x) in inv.output().iter().zip(x.iter()) {
        assert_approx_eq!(f64, y.re, 4.0 * x.re, epsilon = 1e-12);
        assert_approx_eq!(f64, y.im, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn r2c_2d_round_trip() {
    common::init();
    let (n0, n1) = (4, 6);
    let data: Vec<f32> = (0..n0 * n1).map(|_| random()).collect();
    let mut plan = Planner::new()
        .input(FftwVec::from_slice(&data))
        .output(FftwVec::<Complex<f32>>::zeros(n0 * (n1 / 2 + 1)))
        ._2d(n0, n1)
        .plan().unwrap();
    plan.execute();
    // the zero frequency is the sum
    assert_approx_eq!(f32, plan.output()[0].re, data.iter().sum::<f32>(), epsilon = 1e-4);

    let mut inv = Planner::new()
        .input(FftwVec::<Complex<f32>>::zeros(n0 * (n1 / 2 + 1)))
        .output(FftwVec::<f32>::zeros(n0 * n1))
        ._2d(n0, n1)
        .plan().unwrap();
    inv.input().copy_from_slice(plan.output());
    inv.execute();
    inv.normalise();
    assert!(close_f32(inv.output(), &data));
}

#[test]
fn batched_column_major() {
    // three interleaved transforms of length 8
    let howmany = 3;
    let data: Vec<Complex<f64>> = (0..8 * howmany).map(|_| Complex::new(random(), random())).collect();
    let mut batch = Planner::new()
        .input(FftwVec::from_slice(&data))
        .output(FftwVec::<Complex<f64>>::zeros(8 * howmany))
        .many(&[8], howmany, Storage::ColumnMajor)
        .plan().unwrap();
    batch.execute();

    for t in 0..howmany {
        let single: Vec<_> = (0..8).map(|i| data[i * howmany + t]).collect();
        let mut plan = Planner::new()
            .input(FftwVec::from_slice(&single))
            .output(FftwVec::<Complex<f64>>::zeros(8))
            .plan().unwrap();
        plan.execute();
        let column: Vec<_> = (0..8).map(|i| batch.output()[i * howmany + t]).collect();
        assert!(close_c64(&column, plan.output()), "transform {}", t);
    }
}

#[test]
fn strided_layout() {
    // every other element of a buffer of 15
    let data: Vec<f64> = (0..15).map(|_| random()).collect();
    let mut strided = Planner::new()
        .input(FftwVec::from_slice(&data))
        .output(FftwVec::<Complex<f64>>::zeros(5))
        .layouts(Layout::new(&[8], 1, &[8], 2, 0).unwrap(), Layout::contiguous(&[5]).unwrap())
        .plan().unwrap();
    strided.execute();

    let packed: Vec<f64> = data.iter().step_by(2).cloned().collect();
    let mut plan = Planner::new()
        .input(FftwVec::from_slice(&packed))
        .output(FftwVec::<Complex<f64>>::zeros(5))
        .plan().unwrap();
    plan.execute();
    assert!(close_c64(strided.output(), plan.output()));
}

#[test]
fn plans_are_send() {
    let plan = Planner::new()
        .input(FftwVec::<Complex<f32>>::zeros(N))
        .inplace()
        .plan().unwrap();
    let handle = std::thread::spawn(move || {
        let mut plan = plan;
        plan.in_out()[0] = Complex::new(1.0, 0.0);
        plan.execute();
        plan.into_buffer()
    });
    let out = handle.join().unwrap();
    assert!(out.iter().all(|z| (z.re - 1.0).abs() < 1e-6 && z.im.abs() < 1e-6));
}

#[test]
fn time_limited_measure() {
    common::init();
    let n = 1 << 12;
    let mut plan = Planner::new()
        .rigor(Rigor::Measure)
        .time_limit(Duration::from_millis(5))
        .input(FftwVec::<Complex<f64>>::zeros(n))
        .output(FftwVec::<Complex<f64>>::zeros(n))
        .plan().unwrap();
    plan.input()[0] = Complex::new(1.0, 0.0);
    plan.execute();
    assert!(close_c64(plan.output(), &vec![Complex::new(1.0, 0.0); n]));

    // the limit does not leak into later plans
    let later = Planner::new()
        .rigor(Rigor::Measure)
        .input(FftwVec::<Complex<f64>>::zeros(16))
        .output(FftwVec::<Complex<f64>>::zeros(16))
        .plan();
    assert!(later.is_ok());
}

#[test]
fn fftw_rejects_preserving_multi_dimensional_c2r() {
    common::init();
    let planner = || Planner::new()
        .input(FftwVec::<Complex<f64>>::zeros(4 * 5))
        .output(FftwVec::<f64>::zeros(4 * 8))
        ._2d(4, 8);
    assert_eq!(planner().flags(Flags::PRESERVE_INPUT).plan().err(), Some(PlanningError::FftwError));
    assert!(planner().plan().is_ok());
}
