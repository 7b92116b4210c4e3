// Copyright (c) GMP Gateway Contributors
// SPDX-License-Identifier: Apache-2.0

//! A compact unsigned floating-point type for relative gas prices.

use std::{cmp::Ordering, fmt};

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

const MANTISSA_BITS: u32 = 55;
const MANTISSA_MASK: u64 = (1 << MANTISSA_BITS) - 1;
const IMPLICIT_ONE: u64 = 1 << MANTISSA_BITS;
/// `value = (IMPLICIT_ONE | mantissa) * 2^(exponent - EXPONENT_BIAS)`.
const EXPONENT_BIAS: i32 = 311;

/// An unsigned float packed in 64 bits: a 9-bit biased exponent followed by a
/// 55-bit mantissa with an implicit leading one. The raw value `0` is zero.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UFloat9x56(u64);

impl UFloat9x56 {
    pub const ZERO: Self = UFloat9x56(0);
    pub const ONE: Self = UFloat9x56(1 << 63);

    pub const fn from_raw(raw: u64) -> Self {
        UFloat9x56(raw)
    }

    /// The packed representation, as hashed and sent over the wire.
    pub const fn raw(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn exponent(&self) -> i32 {
        (self.0 >> MANTISSA_BITS) as i32
    }

    fn significand(&self) -> u64 {
        IMPLICIT_ONE | (self.0 & MANTISSA_MASK)
    }

    /// Returns the largest representable value not above `numerator / denominator`,
    /// or `None` if the denominator is zero.
    pub fn from_rational(numerator: u128, denominator: u128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        if numerator == 0 {
            return Some(Self::ZERO);
        }
        let numerator_bits = (u128::BITS - numerator.leading_zeros()) as i32;
        let denominator_bits = (u128::BITS - denominator.leading_zeros()) as i32;
        // The quotient `numerator * 2^shift / denominator` lands in [2^54, 2^56).
        let mut shift = MANTISSA_BITS as i32 - (numerator_bits - denominator_bits);
        let mut quotient = scaled_quotient(numerator, denominator, shift);
        if quotient < U256::from(IMPLICIT_ONE) {
            shift += 1;
            quotient = scaled_quotient(numerator, denominator, shift);
        }
        let significand = u64::try_from(quotient).ok()?;
        let exponent = (EXPONENT_BIAS - shift) as u64;
        Some(UFloat9x56(
            (exponent << MANTISSA_BITS) | (significand & MANTISSA_MASK),
        ))
    }

    /// Multiplies an integer by this value, rounding down and saturating at `u128::MAX`.
    pub fn saturating_mul(&self, value: u128) -> u128 {
        if self.is_zero() || value == 0 {
            return 0;
        }
        let product = U256::from(value) * U256::from(self.significand());
        let shift = self.exponent() - EXPONENT_BIAS;
        let scaled = if shift >= 0 {
            match product.checked_shl(shift as usize) {
                Some(scaled) => scaled,
                None => return u128::MAX,
            }
        } else {
            product >> (-shift) as usize
        };
        u128::try_from(scaled).unwrap_or(u128::MAX)
    }
}

/// Computes `numerator * 2^shift / denominator`, rounding down.
fn scaled_quotient(numerator: u128, denominator: u128, shift: i32) -> U256 {
    let numerator = U256::from(numerator);
    let denominator = U256::from(denominator);
    if shift >= 0 {
        (numerator << shift as usize) / denominator
    } else {
        numerator / (denominator << (-shift) as usize)
    }
}

impl Ord for UFloat9x56 {
    fn cmp(&self, other: &Self) -> Ordering {
        // Zero aside, the packed layout is monotonic in the value.
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for UFloat9x56 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for UFloat9x56 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "UFloat9x56(0)");
        }
        write!(
            f,
            "UFloat9x56({:#x} * 2^{})",
            self.significand(),
            self.exponent() - EXPONENT_BIAS
        )
    }
}
