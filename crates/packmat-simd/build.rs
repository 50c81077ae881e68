//! Compiles the C wrappers for the enabled vendor math backend and links the
//! vendor library.
//!
//! `PACKMAT_VENDOR_LIB_DIR` adds a library search path for the vendor
//! library when it is not on the default linker path.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PACKMAT_VENDOR_LIB_DIR");

    #[cfg(feature = "svml")]
    vendor::build("csrc/svml_shim.c", "packmat_svml_shim", "svml");

    #[cfg(feature = "amdlibm")]
    vendor::build("csrc/amdlibm_shim.c", "packmat_amdlibm_shim", "alm");
}

#[cfg(any(feature = "svml", feature = "amdlibm"))]
mod vendor {
    use std::env;

    pub fn build(source: &str, shim: &str, lib: &str) {
        println!("cargo:rerun-if-changed={}", source);

        // The binding table only uses vendor routines on x86_64.
        if env::var("CARGO_CFG_TARGET_ARCH").as_deref() != Ok("x86_64") {
            return;
        }

        let features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
        let mut build = cc::Build::new();
        build.file(source).opt_level(2);
        if features.split(',').any(|f| f == "avx") {
            build.flag_if_supported("-mavx");
        }
        build.compile(shim);

        if let Ok(dir) = env::var("PACKMAT_VENDOR_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", dir);
        }
        println!("cargo:rustc-link-lib={}", lib);
    }
}
