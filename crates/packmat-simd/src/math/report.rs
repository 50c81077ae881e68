//! Per-function tier table for one (scalar, kind) pair.

use std::fmt;

use super::{MathFn, Tier, resolve};
use crate::capability::{HardwareKind, KindFor};
use crate::scalar::SimdScalar;

/// Which tier every [`MathFn`] resolved to for a (scalar, kind) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityReport {
    pub scalar: &'static str,
    pub kind: HardwareKind,
    pub entries: Vec<(MathFn, Option<Tier>)>,
}

impl CapabilityReport {
    pub fn for_pair<T: SimdScalar, K: KindFor<T>>() -> Self {
        Self {
            scalar: T::NAME,
            kind: K::KIND,
            entries: MathFn::ALL
                .iter()
                .map(|&f| (f, resolve::<T, K>(f)))
                .collect(),
        }
    }

    pub fn tier(&self, f: MathFn) -> Option<Tier> {
        self.entries
            .iter()
            .find(|(g, _)| *g == f)
            .and_then(|(_, t)| *t)
    }

    /// Number of functions bound to `tier`.
    pub fn count(&self, tier: Tier) -> usize {
        self.entries.iter().filter(|(_, t)| *t == Some(tier)).count()
    }

    /// Functions with no implementation in this build.
    pub fn unavailable(&self) -> impl Iterator<Item = MathFn> + '_ {
        self.entries
            .iter()
            .filter(|(_, t)| t.is_none())
            .map(|(f, _)| *f)
    }

    /// Log a one-line summary at debug level and each entry at trace level.
    pub fn log(&self) {
        log::debug!(
            "{} x {}: {} native, {} vendor, {} emulated, {} unavailable",
            self.scalar,
            self.kind,
            self.count(Tier::Native),
            self.count(Tier::Vendor),
            self.count(Tier::Emulated),
            self.unavailable().count()
        );
        for (f, tier) in &self.entries {
            match tier {
                Some(t) => log::trace!("  {:<8} {}", f.name(), t),
                None => log::trace!("  {:<8} unavailable", f.name()),
            }
        }
    }
}

impl fmt::Display for CapabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} on {}", self.scalar, self.kind)?;
        for (func, tier) in &self.entries {
            match tier {
                Some(t) => writeln!(f, "  {:<8} {}", func.name(), t)?,
                None => writeln!(f, "  {:<8} -", func.name())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Avx, Sse};

    #[test]
    fn report_covers_every_function() {
        let r = CapabilityReport::for_pair::<f32, Avx>();
        assert_eq!(r.entries.len(), MathFn::ALL.len());
        assert_eq!(r.scalar, "f32");
        assert_eq!(r.kind, HardwareKind::Avx);

        let total = r.count(Tier::Native)
            + r.count(Tier::Vendor)
            + r.count(Tier::Emulated)
            + r.unavailable().count();
        assert_eq!(total, MathFn::ALL.len());
    }

    #[test]
    fn tier_lookup_matches_resolve() {
        let r = CapabilityReport::for_pair::<f64, Sse>();
        for f in MathFn::ALL {
            assert_eq!(r.tier(f), resolve::<f64, Sse>(f));
        }
    }

    #[test]
    fn display_lists_functions() {
        let text = CapabilityReport::for_pair::<f64, Avx>().to_string();
        assert!(text.starts_with("f64 on AVX (256-bit)"));
        assert!(text.contains("xlogy"));
        assert!(text.contains("tgamma"));
        assert_eq!(text.lines().count(), MathFn::ALL.len() + 1);
    }
}
