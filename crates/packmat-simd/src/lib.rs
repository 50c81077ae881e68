//! Portable packed-vector values and elementwise math for packmat.
//!
//! Provides:
//! - [`Pack`]: a fixed number of `f32`/`f64` lanes sized to one SSE or AVX
//!   register, with arithmetic, comparison masks and branchless select
//! - [`math`]: elementwise transcendental functions bound at build time to
//!   a native instruction, a vendor vector library, or per-lane emulation
//! - [`BuildConfig`] and [`CapabilityReport`] describing what was compiled in
//!
//! Nothing dispatches at runtime. The hardware ceiling follows the build's
//! `target_feature` set; the math backend follows cargo features:
//!
//! - `emulate` (default): scalar fallback for anything without a faster tier
//! - `svml`: link Intel SVML (`libsvml`)
//! - `amdlibm`: link AMD LibM (`libalm`, mutually exclusive with `svml`)
//!
//! The vendor features compile a small C wrapper with `cc` and need a C
//! compiler. Set `PACKMAT_VENDOR_LIB_DIR` when the library is not on the
//! default linker path. Each feature set has its own tests, so run
//! `cargo test` once per combination in use, e.g. with
//! `--no-default-features` or `--features svml`.

pub mod capability;
pub mod config;
pub mod error;
pub mod math;
pub mod pack;
pub mod scalar;

pub use capability::{Avx, DefaultKind, HardwareKind, KindFor, PackTraits, SimdKind, Sse};
pub use config::{BuildConfig, VendorBackend};
pub use error::{Error, Result};
pub use math::{CapabilityReport, FnGroup, MathFn, Tier, has_fast_path, resolve};
pub use pack::{Mask, Pack};
pub use scalar::{SimdScalar, ulp_distance};
