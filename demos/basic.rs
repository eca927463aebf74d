use std::env;
use std::path::PathBuf;

use fftw3_typed::{wisdom, Rigor, VecPlan};
use num::Complex;

fn main() {
    env_logger::init();

    let n: u32 = env::args().nth(1)
        .and_then(|a| a.parse().ok())
        .expect("./basic integer");
    let p = PathBuf::from(format!("wisdom-{}.fftw", n));

    wisdom!(&p);
    let mut plan = VecPlan::<f64, Complex<f64>>::r2c_1d(1 << n, Rigor::Measure)
        .expect("failed to create plan");
    for (i, x) in plan.input().iter_mut().enumerate() {
        *x = (i % 7) as f64;
    }
    plan.execute();
    println!("{:?}", &plan.output()[..4]);
}
