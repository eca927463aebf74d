mod common;

use num::Complex;

use fftw3_typed::{wisdom, FftwVec, Layout, Planner, PlanningError, Rigor};

// cleanup needs every plan of its precision gone, so this binary holds
// only this test

#[test]
fn cleanup_discards_wisdom_and_allows_replanning() {
    common::init();
    let make = || Planner::new()
        .rigor(Rigor::Measure)
        .wisdom_restriction(true)
        .input(FftwVec::<f64>::zeros(48))
        .output(FftwVec::<Complex<f64>>::zeros(25))
        .plan();

    let real = Layout::contiguous(&[48]).unwrap();
    let half = Layout::contiguous(&[25]).unwrap();
    wisdom::generate::<f64, Complex<f64>>(&real, &half, Rigor::Measure).unwrap();
    drop(make().unwrap());

    unsafe { wisdom::cleanup::<f64>() }
    assert_eq!(make().err(), Some(PlanningError::FftwError));

    let mut plan = Planner::new()
        .input(FftwVec::<f64>::from_elem(48, 1.0))
        .output(FftwVec::<Complex<f64>>::zeros(25))
        .plan().unwrap();
    plan.execute();
    assert!((plan.output()[0].re - 48.0).abs() < 1e-9);
}
