// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Single-bit helpers for unsigned register words.
//!
//! `n` is not range checked. Shifting by the width of the type or more is a
//! caller error (it panics in debug builds).

use tock_registers::UIntLike;

/// Unsigned integer types the bit helpers operate on.
pub trait Bits: UIntLike {
    const ONE: Self;
}

macro_rules! Bits_impl_for {
    ($type:ty) => {
        impl Bits for $type {
            const ONE: Self = 1;
        }
    };
}

Bits_impl_for!(u8);
Bits_impl_for!(u16);
Bits_impl_for!(u32);
Bits_impl_for!(usize);

/// Returns whether bit `n` of `value` is set.
#[inline(always)]
pub fn is_set<T: Bits>(value: T, n: usize) -> bool {
    (value >> n) & T::ONE == T::ONE
}

/// Sets bit `n` of `value`.
#[inline(always)]
pub fn set<T: Bits>(value: &mut T, n: usize) {
    *value = *value | (T::ONE << n);
}

/// Clears bit `n` of `value`.
#[inline(always)]
pub fn clear<T: Bits>(value: &mut T, n: usize) {
    *value = *value & !(T::ONE << n);
}
