//! Build configuration: hardware ceiling, vendor math backend, emulation.
//!
//! All three are fixed when the crate is compiled. The hardware ceiling
//! comes from `target_feature`; the other two are cargo features.

use std::fmt;

use crate::capability::HardwareKind;
use crate::math::FnGroup;

#[cfg(all(feature = "svml", feature = "amdlibm"))]
compile_error!("the `svml` and `amdlibm` vendor math backends cannot be enabled simultaneously");

/// An externally linked vectorized math library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorBackend {
    /// Intel Short Vector Math Library.
    Svml,
    /// AMD LibM vector entry points.
    AmdLibm,
}

impl VendorBackend {
    /// The backend enabled by cargo feature, if any.
    pub const fn active() -> Option<Self> {
        if cfg!(feature = "svml") {
            Some(VendorBackend::Svml)
        } else if cfg!(feature = "amdlibm") {
            Some(VendorBackend::AmdLibm)
        } else {
            None
        }
    }

    /// Whether this backend declares entry points for every function of `group`.
    pub const fn provides(self, group: FnGroup) -> bool {
        match self {
            VendorBackend::Svml => !matches!(
                group,
                FnGroup::Sqrt | FnGroup::Round | FnGroup::Gamma
            ),
            VendorBackend::AmdLibm => matches!(
                group,
                FnGroup::Pow | FnGroup::ExpLog | FnGroup::Trig | FnGroup::ExpLog2
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VendorBackend::Svml => "Intel SVML",
            VendorBackend::AmdLibm => "AMD LibM",
        }
    }
}

impl fmt::Display for VendorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The configuration this crate was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    /// Widest hardware kind enabled at compile time.
    pub kind: HardwareKind,
    /// Linked vendor math backend.
    pub vendor: Option<VendorBackend>,
    /// Whether the scalar-emulated tier fills gaps.
    pub emulate: bool,
}

impl BuildConfig {
    pub const fn current() -> Self {
        Self {
            kind: HardwareKind::compiled(),
            vendor: VendorBackend::active(),
            emulate: cfg!(feature = "emulate"),
        }
    }

    /// Emit the configuration through the `log` facade.
    pub fn log(&self) {
        log::info!("packmat-simd build configuration: {}", self);
        if !HardwareKind::build_is_supported() {
            log::warn!(
                "running CPU ({}) is narrower than the compiled kind ({})",
                HardwareKind::detect(),
                self.kind
            );
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kind={}, vendor=", self.kind)?;
        match self.vendor {
            Some(v) => write!(f, "{}", v)?,
            None => f.write_str("none")?,
        }
        write!(
            f,
            ", emulation={}",
            if self.emulate { "on" } else { "off" }
        )
    }
}
