fn main() {
    for lib in ["fftw3", "fftw3f"] {
        match pkg_config::Config::new().probe(lib) {
            Ok(_) => {}
            Err(e) => {
                // not every distribution ships .pc files for fftw
                println!("cargo:warning=pkg-config could not find {}: {}", lib, e);
                println!("cargo:rustc-link-lib={}", lib);
            }
        }
    }
}
