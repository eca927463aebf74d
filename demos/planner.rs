use fftw3_typed::{Direction, FftwVec, Planner, R2rKind, Rigor, Storage};
use num::Complex;

fn main() {
    env_logger::init();

    let mut plan = Planner::new()
        .rigor(Rigor::Estimate)
        .input(FftwVec::<f64>::zeros(16))
        .output(FftwVec::<Complex<f64>>::zeros(9))
        .plan()
        .expect("failed to create plan");

    for v in plan.input().iter_mut() { *v = 1.0 }
    println!("{:?}", plan.input());

    plan.execute();

    println!("{:?}", plan.output());

    let mut inverse = Planner::new()
        .input(FftwVec::<Complex<f64>>::zeros(9))
        .output(FftwVec::<f64>::zeros(16))
        .plan()
        .expect("failed to create plan");
    inverse.input().copy_from_slice(plan.output());
    inverse.execute();
    inverse.normalise();
    println!("{:?}", inverse.output());

    // four interleaved complex transforms, in single precision
    let mut batch = Planner::new()
        .direction(Direction::Backward)
        .input(vec![Complex::new(1.0f32, 0.0); 4 * 8])
        .inplace()
        .many(&[8], 4, Storage::ColumnMajor)
        .plan()
        .expect("failed to create plan");
    batch.execute();
    println!("{:?}", &batch.in_out()[..4]);
    batch.debug_print();
    println!();

    let mut dct = Planner::new()
        .input(FftwVec::<f64>::from_elem(12, 1.0))
        .output(FftwVec::<f64>::zeros(12))
        ._2d(3, 4)
        .r2r_kinds(&[R2rKind::Dct10, R2rKind::Dst10])
        .plan()
        .expect("failed to create plan");
    dct.execute();
    let flops = dct.raw().flops().total();
    println!("{:?} ({} flops)", dct.output(), flops);
}
