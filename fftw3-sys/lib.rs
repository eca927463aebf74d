//! Raw declarations for `fftw3.h`, double (`fftw_`) and single
//! (`fftwf_`) precision.
//!
//! Only the advanced ("many") planning interface is declared; the
//! basic and 1d/2d/3d planners are special cases of it.

#![allow(non_camel_case_types)]

use libc::{c_char, c_double, c_float, c_int, c_uint, c_void, size_t};

pub type fftw_complex = [c_double; 2];
pub type fftwf_complex = [c_float; 2];

pub enum fftw_plan_s {}
pub type fftw_plan = *mut fftw_plan_s;

pub enum fftwf_plan_s {}
pub type fftwf_plan = *mut fftwf_plan_s;

pub type fftw_r2r_kind = c_uint;

pub const FFTW_FORWARD: c_int = -1;
pub const FFTW_BACKWARD: c_int = 1;

pub const FFTW_NO_TIMELIMIT: c_double = -1.0;

pub const FFTW_MEASURE: c_uint = 0;
pub const FFTW_DESTROY_INPUT: c_uint = 1 << 0;
pub const FFTW_UNALIGNED: c_uint = 1 << 1;
pub const FFTW_CONSERVE_MEMORY: c_uint = 1 << 2;
pub const FFTW_EXHAUSTIVE: c_uint = 1 << 3;
pub const FFTW_PRESERVE_INPUT: c_uint = 1 << 4;
pub const FFTW_PATIENT: c_uint = 1 << 5;
pub const FFTW_ESTIMATE: c_uint = 1 << 6;
pub const FFTW_WISDOM_ONLY: c_uint = 1 << 21;

pub const FFTW_R2HC: fftw_r2r_kind = 0;
pub const FFTW_HC2R: fftw_r2r_kind = 1;
pub const FFTW_DHT: fftw_r2r_kind = 2;
pub const FFTW_REDFT00: fftw_r2r_kind = 3;
pub const FFTW_REDFT01: fftw_r2r_kind = 4;
pub const FFTW_REDFT10: fftw_r2r_kind = 5;
pub const FFTW_REDFT11: fftw_r2r_kind = 6;
pub const FFTW_RODFT00: fftw_r2r_kind = 7;
pub const FFTW_RODFT01: fftw_r2r_kind = 8;
pub const FFTW_RODFT10: fftw_r2r_kind = 9;
pub const FFTW_RODFT11: fftw_r2r_kind = 10;

extern "C" {
    pub fn fftw_malloc(n: size_t) -> *mut c_void;
    pub fn fftw_free(p: *mut c_void);
    pub fn fftw_alignment_of(p: *mut c_double) -> c_int;

    pub fn fftw_plan_many_dft(rank: c_int, n: *const c_int, howmany: c_int,
                              in_: *mut fftw_complex, inembed: *const c_int,
                              istride: c_int, idist: c_int,
                              out: *mut fftw_complex, onembed: *const c_int,
                              ostride: c_int, odist: c_int,
                              sign: c_int, flags: c_uint) -> fftw_plan;
    pub fn fftw_plan_many_dft_r2c(rank: c_int, n: *const c_int, howmany: c_int,
                                  in_: *mut c_double, inembed: *const c_int,
                                  istride: c_int, idist: c_int,
                                  out: *mut fftw_complex, onembed: *const c_int,
                                  ostride: c_int, odist: c_int,
                                  flags: c_uint) -> fftw_plan;
    pub fn fftw_plan_many_dft_c2r(rank: c_int, n: *const c_int, howmany: c_int,
                                  in_: *mut fftw_complex, inembed: *const c_int,
                                  istride: c_int, idist: c_int,
                                  out: *mut c_double, onembed: *const c_int,
                                  ostride: c_int, odist: c_int,
                                  flags: c_uint) -> fftw_plan;
    pub fn fftw_plan_many_r2r(rank: c_int, n: *const c_int, howmany: c_int,
                              in_: *mut c_double, inembed: *const c_int,
                              istride: c_int, idist: c_int,
                              out: *mut c_double, onembed: *const c_int,
                              ostride: c_int, odist: c_int,
                              kind: *const fftw_r2r_kind, flags: c_uint) -> fftw_plan;

    pub fn fftw_execute(p: fftw_plan);
    pub fn fftw_execute_dft(p: fftw_plan, in_: *mut fftw_complex, out: *mut fftw_complex);
    pub fn fftw_execute_dft_r2c(p: fftw_plan, in_: *mut c_double, out: *mut fftw_complex);
    pub fn fftw_execute_dft_c2r(p: fftw_plan, in_: *mut fftw_complex, out: *mut c_double);
    pub fn fftw_execute_r2r(p: fftw_plan, in_: *mut c_double, out: *mut c_double);
    pub fn fftw_destroy_plan(p: fftw_plan);

    pub fn fftw_print_plan(p: fftw_plan);
    pub fn fftw_sprint_plan(p: fftw_plan) -> *mut c_char;
    pub fn fftw_flops(p: fftw_plan, add: *mut c_double, mul: *mut c_double, fma: *mut c_double);
    pub fn fftw_estimate_cost(p: fftw_plan) -> c_double;
    pub fn fftw_cost(p: fftw_plan) -> c_double;

    pub fn fftw_set_timelimit(t: c_double);
    pub fn fftw_cleanup();

    pub fn fftw_export_wisdom_to_filename(filename: *const c_char) -> c_int;
    pub fn fftw_export_wisdom_to_string() -> *mut c_char;
    pub fn fftw_import_wisdom_from_filename(filename: *const c_char) -> c_int;
    pub fn fftw_import_wisdom_from_string(input: *const c_char) -> c_int;
    pub fn fftw_import_system_wisdom() -> c_int;
    pub fn fftw_forget_wisdom();
}

extern "C" {
    pub fn fftwf_malloc(n: size_t) -> *mut c_void;
    pub fn fftwf_free(p: *mut c_void);
    pub fn fftwf_alignment_of(p: *mut c_float) -> c_int;

    pub fn fftwf_plan_many_dft(rank: c_int, n: *const c_int, howmany: c_int,
                               in_: *mut fftwf_complex, inembed: *const c_int,
                               istride: c_int, idist: c_int,
                               out: *mut fftwf_complex, onembed: *const c_int,
                               ostride: c_int, odist: c_int,
                               sign: c_int, flags: c_uint) -> fftwf_plan;
    pub fn fftwf_plan_many_dft_r2c(rank: c_int, n: *const c_int, howmany: c_int,
                                   in_: *mut c_float, inembed: *const c_int,
                                   istride: c_int, idist: c_int,
                                   out: *mut fftwf_complex, onembed: *const c_int,
                                   ostride: c_int, odist: c_int,
                                   flags: c_uint) -> fftwf_plan;
    pub fn fftwf_plan_many_dft_c2r(rank: c_int, n: *const c_int, howmany: c_int,
                                   in_: *mut fftwf_complex, inembed: *const c_int,
                                   istride: c_int, idist: c_int,
                                   out: *mut c_float, onembed: *const c_int,
                                   ostride: c_int, odist: c_int,
                                   flags: c_uint) -> fftwf_plan;
    pub fn fftwf_plan_many_r2r(rank: c_int, n: *const c_int, howmany: c_int,
                               in_: *mut c_float, inembed: *const c_int,
                               istride: c_int, idist: c_int,
                               out: *mut c_float, onembed: *const c_int,
                               ostride: c_int, odist: c_int,
                               kind: *const fftw_r2r_kind, flags: c_uint) -> fftwf_plan;

    pub fn fftwf_execute(p: fftwf_plan);
    pub fn fftwf_execute_dft(p: fftwf_plan, in_: *mut fftwf_complex, out: *mut fftwf_complex);
    pub fn fftwf_execute_dft_r2c(p: fftwf_plan, in_: *mut c_float, out: *mut fftwf_complex);
    pub fn fftwf_execute_dft_c2r(p: fftwf_plan, in_: *mut fftwf_complex, out: *mut c_float);
    pub fn fftwf_execute_r2r(p: fftwf_plan, in_: *mut c_float, out: *mut c_float);
    pub fn fftwf_destroy_plan(p: fftwf_plan);

    pub fn fftwf_print_plan(p: fftwf_plan);
    pub fn fftwf_sprint_plan(p: fftwf_plan) -> *mut c_char;
    pub fn fftwf_flops(p: fftwf_plan, add: *mut c_double, mul: *mut c_double, fma: *mut c_double);
    pub fn fftwf_estimate_cost(p: fftwf_plan) -> c_double;
    pub fn fftwf_cost(p: fftwf_plan) -> c_double;

    pub fn fftwf_set_timelimit(t: c_double);
    pub fn fftwf_cleanup();

    pub fn fftwf_export_wisdom_to_filename(filename: *const c_char) -> c_int;
    pub fn fftwf_export_wisdom_to_string() -> *mut c_char;
    pub fn fftwf_import_wisdom_from_filename(filename: *const c_char) -> c_int;
    pub fn fftwf_import_wisdom_from_string(input: *const c_char) -> c_int;
    pub fn fftwf_import_system_wisdom() -> c_int;
    pub fn fftwf_forget_wisdom();
}
