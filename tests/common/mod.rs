#![allow(dead_code)]

use float_cmp::approx_eq;
use num::Complex;

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn close_f64(x: &[f64], y: &[f64]) -> bool {
    x.len() == y.len() &&
        x.iter().zip(y).all(|(a, b)| approx_eq!(f64, *a, *b, epsilon = 1e-9))
}
pub fn close_f32(x: &[f32], y: &[f32]) -> bool {
    x.len() == y.len() &&
        x.iter().zip(y).all(|(a, b)| approx_eq!(f32, *a, *b, epsilon = 1e-4))
}

pub fn close_c64(x: &[Complex<f64>], y: &[Complex<f64>]) -> bool {
    x.len() == y.len() &&
        x.iter().zip(y).all(|(a, b)| approx_eq!(f64, a.re, b.re, epsilon = 1e-9) &&
                                     approx_eq!(f64, a.im, b.im, epsilon = 1e-9))
}
pub fn close_c32(x: &[Complex<f32>], y: &[Complex<f32>]) -> bool {
    x.len() == y.len() &&
        x.iter().zip(y).all(|(a, b)| approx_eq!(f32, a.re, b.re, epsilon = 1e-4) &&
                                     approx_eq!(f32, a.im, b.im, epsilon = 1e-4))
}
