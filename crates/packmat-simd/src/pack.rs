//! Fixed-width packed values and lane masks.
//!
//! A [`Pack<T, K>`] holds `K::WIDTH` lanes of `T`. All operations are pure
//! and elementwise; both operands of a binary operation share `(T, K)`, so
//! mixing an AVX pack with an SSE pack, or `f32` with `f64`, does not type
//! check.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{
    Add, AddAssign, BitAnd, BitOr, Div, DivAssign, Index, Mul, MulAssign, Neg, Not, Sub,
    SubAssign,
};

use num_traits::{Bounded, Zero};

use crate::capability::{HardwareKind, KindFor};
use crate::error::{Error, Result};
use crate::scalar::SimdScalar;

/// `K::WIDTH` scalars of type `T`.
#[repr(transparent)]
pub struct Pack<T: SimdScalar, K: KindFor<T>> {
    lanes: K::Lanes,
    _scalar: PhantomData<T>,
}

impl<T: SimdScalar, K: KindFor<T>> Clone for Pack<T, K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: SimdScalar, K: KindFor<T>> Copy for Pack<T, K> {}

impl<T: SimdScalar, K: KindFor<T>> Pack<T, K> {
    pub const WIDTH: usize = K::WIDTH;

    #[inline]
    pub fn from_lanes(lanes: K::Lanes) -> Self {
        Self {
            lanes,
            _scalar: PhantomData,
        }
    }

    /// All lanes zero.
    #[inline]
    pub fn zeros() -> Self {
        Self::splat(T::zero())
    }

    /// Broadcast `value` to every lane.
    #[inline]
    pub fn splat(value: T) -> Self {
        Self::from_lanes(K::splat_lanes(value))
    }

    #[inline]
    pub fn from_fn(mut f: impl FnMut(usize) -> T) -> Self {
        let mut lanes = K::splat_lanes(T::zero());
        for (i, x) in lanes.as_mut().iter_mut().enumerate() {
            *x = f(i);
        }
        Self::from_lanes(lanes)
    }

    /// Load the first `WIDTH` values of `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src` holds fewer than `WIDTH` values.
    #[inline]
    pub fn load(src: &[T]) -> Self {
        assert!(src.len() >= K::WIDTH, "slice too short for pack");
        let mut lanes = K::splat_lanes(T::zero());
        lanes.as_mut().copy_from_slice(&src[..K::WIDTH]);
        Self::from_lanes(lanes)
    }

    /// Like [`load`](Self::load), reporting a short slice as an error.
    pub fn try_load(src: &[T]) -> Result<Self> {
        if src.len() < K::WIDTH {
            return Err(Error::SliceLength {
                expected: K::WIDTH,
                actual: src.len(),
            });
        }
        Ok(Self::load(src))
    }

    /// Load `WIDTH` values from an aligned address.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading `WIDTH` values of `T` and aligned to
    /// `K::PACK_BYTES`. Alignment is asserted in debug builds only.
    #[inline]
    pub unsafe fn load_aligned(src: *const T) -> Self {
        debug_assert_eq!(
            src as usize % K::PACK_BYTES,
            0,
            "pack load requires {}-byte alignment",
            K::PACK_BYTES
        );
        // SAFETY: the caller guarantees `WIDTH` readable values; `Lanes` is
        // `[T; WIDTH]` so its alignment never exceeds the pack alignment.
        let lanes = unsafe { src.cast::<K::Lanes>().read() };
        Self::from_lanes(lanes)
    }

    /// Validating counterpart of [`load_aligned`](Self::load_aligned).
    pub fn try_load_aligned(src: &[T]) -> Result<Self> {
        let addr = src.as_ptr() as usize;
        if addr % K::PACK_BYTES != 0 {
            return Err(Error::Misaligned {
                addr,
                align: K::PACK_BYTES,
            });
        }
        Self::try_load(src)
    }

    /// Write all lanes to the first `WIDTH` slots of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` holds fewer than `WIDTH` slots.
    #[inline]
    pub fn store(&self, dst: &mut [T]) {
        dst[..K::WIDTH].copy_from_slice(self.lanes.as_ref());
    }

    /// # Safety
    ///
    /// `dst` must be valid for writing `WIDTH` values of `T` and aligned to
    /// `K::PACK_BYTES`.
    #[inline]
    pub unsafe fn store_aligned(&self, dst: *mut T) {
        debug_assert_eq!(dst as usize % K::PACK_BYTES, 0);
        // SAFETY: see `load_aligned`.
        unsafe { dst.cast::<K::Lanes>().write(self.lanes) }
    }

    #[inline]
    pub fn lanes(&self) -> &[T] {
        self.lanes.as_ref()
    }

    #[inline]
    pub fn into_lanes(self) -> K::Lanes {
        self.lanes
    }

    #[inline]
    pub fn lane(&self, i: usize) -> T {
        self.lanes.as_ref()[i]
    }

    /// Raw bit pattern of the whole pack.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.lanes)
    }

    #[inline]
    pub fn width(&self) -> usize {
        K::WIDTH
    }

    #[inline]
    pub fn kind(&self) -> HardwareKind {
        K::KIND
    }

    #[inline]
    pub fn map(self, f: impl Fn(T) -> T) -> Self {
        let mut lanes = self.lanes;
        for x in lanes.as_mut() {
            *x = f(*x);
        }
        Self::from_lanes(lanes)
    }

    #[inline]
    pub fn zip_map(self, other: Self, f: impl Fn(T, T) -> T) -> Self {
        let mut lanes = self.lanes;
        for (x, &y) in lanes.as_mut().iter_mut().zip(other.lanes.as_ref()) {
            *x = f(*x, y);
        }
        Self::from_lanes(lanes)
    }

    #[inline]
    fn compare(self, other: Self, f: impl Fn(T, T) -> bool) -> Mask<T, K> {
        Mask::from_fn(|i| f(self.lane(i), other.lane(i)))
    }

    #[inline]
    pub fn eq_mask(self, other: Self) -> Mask<T, K> {
        self.compare(other, |a, b| a == b)
    }

    #[inline]
    pub fn ne_mask(self, other: Self) -> Mask<T, K> {
        self.compare(other, |a, b| a != b)
    }

    #[inline]
    pub fn lt(self, other: Self) -> Mask<T, K> {
        self.compare(other, |a, b| a < b)
    }

    #[inline]
    pub fn le(self, other: Self) -> Mask<T, K> {
        self.compare(other, |a, b| a <= b)
    }

    #[inline]
    pub fn gt(self, other: Self) -> Mask<T, K> {
        self.compare(other, |a, b| a > b)
    }

    #[inline]
    pub fn ge(self, other: Self) -> Mask<T, K> {
        self.compare(other, |a, b| a >= b)
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        self.zip_map(other, |a, b| if b < a { b } else { a })
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        self.zip_map(other, |a, b| if b > a { b } else { a })
    }

    #[inline]
    pub fn abs(self) -> Self {
        self.map(|a| a.abs())
    }

    /// Horizontal sum of all lanes.
    #[inline]
    pub fn sum(self) -> T {
        self.lanes
            .as_ref()
            .iter()
            .fold(T::zero(), |acc, &x| acc + x)
    }
}

impl<T: SimdScalar, K: KindFor<T>> Default for Pack<T, K> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: SimdScalar, K: KindFor<T>> PartialEq for Pack<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.lanes == other.lanes
    }
}

impl<T: SimdScalar, K: KindFor<T>> fmt::Debug for Pack<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pack<{}, {:?}>", T::NAME, K::KIND)?;
        f.debug_list().entries(self.lanes.as_ref()).finish()
    }
}

impl<T: SimdScalar, K: KindFor<T>> Index<usize> for Pack<T, K> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.lanes.as_ref()[i]
    }
}

macro_rules! pack_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl<T: SimdScalar, K: KindFor<T>> $Op for Pack<T, K> {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: Self) -> Self {
                self.zip_map(rhs, |a, b| $Op::$op(a, b))
            }
        }

        impl<T: SimdScalar, K: KindFor<T>> $OpAssign for Pack<T, K> {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                *self = $Op::$op(*self, rhs);
            }
        }
    };
}

pack_binop!(Add, add, AddAssign, add_assign);
pack_binop!(Sub, sub, SubAssign, sub_assign);
pack_binop!(Mul, mul, MulAssign, mul_assign);
pack_binop!(Div, div, DivAssign, div_assign);

impl<T: SimdScalar, K: KindFor<T>> Neg for Pack<T, K> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

// ============================================================================
// Masks
// ============================================================================

/// Per-lane boolean, stored as all-ones / all-zeros bit patterns in the same
/// layout as the pack it was compared from.
#[repr(transparent)]
pub struct Mask<T: SimdScalar, K: KindFor<T>> {
    lanes: K::Lanes,
    _scalar: PhantomData<T>,
}

impl<T: SimdScalar, K: KindFor<T>> Clone for Mask<T, K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: SimdScalar, K: KindFor<T>> Copy for Mask<T, K> {}

impl<T: SimdScalar, K: KindFor<T>> Mask<T, K> {
    #[inline]
    fn lane_bits(set: bool) -> T {
        if set {
            T::from_raw_bits(T::Bits::max_value())
        } else {
            T::from_raw_bits(T::Bits::zero())
        }
    }

    #[inline]
    pub fn splat(set: bool) -> Self {
        Self {
            lanes: K::splat_lanes(Self::lane_bits(set)),
            _scalar: PhantomData,
        }
    }

    #[inline]
    pub fn from_fn(f: impl Fn(usize) -> bool) -> Self {
        let mut lanes = K::splat_lanes(Self::lane_bits(false));
        for (i, x) in lanes.as_mut().iter_mut().enumerate() {
            *x = Self::lane_bits(f(i));
        }
        Self {
            lanes,
            _scalar: PhantomData,
        }
    }

    #[inline]
    pub fn lane(&self, i: usize) -> bool {
        self.lanes.as_ref()[i].to_raw_bits() != T::Bits::zero()
    }

    pub fn any(&self) -> bool {
        (0..K::WIDTH).any(|i| self.lane(i))
    }

    pub fn all(&self) -> bool {
        (0..K::WIDTH).all(|i| self.lane(i))
    }

    pub fn count(&self) -> usize {
        (0..K::WIDTH).filter(|&i| self.lane(i)).count()
    }

    #[inline]
    fn zip_bits(self, other: Self, f: impl Fn(T::Bits, T::Bits) -> T::Bits) -> Self {
        let mut lanes = self.lanes;
        for (x, &y) in lanes.as_mut().iter_mut().zip(other.lanes.as_ref()) {
            *x = T::from_raw_bits(f(x.to_raw_bits(), y.to_raw_bits()));
        }
        Self {
            lanes,
            _scalar: PhantomData,
        }
    }

    /// Lane-wise `if mask { a } else { b }` as a bitwise blend.
    #[inline]
    pub fn select(self, a: Pack<T, K>, b: Pack<T, K>) -> Pack<T, K> {
        let mut lanes = a.lanes;
        for ((x, &y), &m) in lanes
            .as_mut()
            .iter_mut()
            .zip(b.lanes.as_ref())
            .zip(self.lanes.as_ref())
        {
            let m = m.to_raw_bits();
            *x = T::from_raw_bits((x.to_raw_bits() & m) | (y.to_raw_bits() & !m));
        }
        Pack::from_lanes(lanes)
    }
}

impl<T: SimdScalar, K: KindFor<T>> PartialEq for Mask<T, K> {
    fn eq(&self, other: &Self) -> bool {
        (0..K::WIDTH).all(|i| self.lane(i) == other.lane(i))
    }
}

impl<T: SimdScalar, K: KindFor<T>> fmt::Debug for Mask<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..K::WIDTH).map(|i| self.lane(i)))
            .finish()
    }
}

impl<T: SimdScalar, K: KindFor<T>> BitAnd for Mask<T, K> {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.zip_bits(rhs, |a, b| a & b)
    }
}

impl<T: SimdScalar, K: KindFor<T>> BitOr for Mask<T, K> {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.zip_bits(rhs, |a, b| a | b)
    }
}

impl<T: SimdScalar, K: KindFor<T>> Not for Mask<T, K> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        self.zip_bits(self, |a, _| !a)
    }
}
