// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Volatile register cells for the core peripheral blocks.
//!
//! These implement the Tock register interface traits, so register blocks
//! declared with `register_structs!` get the usual `get`, `set`, `read`,
//! `write`, `modify` and `extract` methods. Every `get` is exactly one
//! volatile load and every `set` exactly one volatile store of the cell's
//! width.
//!
//! In test builds accesses are routed to the [`emu`] backend instead of
//! memory.

use core::cell::UnsafeCell;
use core::marker::PhantomData;

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::{RegisterLongName, UIntLike};

#[cfg(test)]
pub(crate) mod emu;

/// Width of a single bus access.
#[cfg(test)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessWidth {
    U8,
    U16,
    U32,
}

/// Integer types a register cell can hold: the access widths the core
/// peripheral bus supports.
pub trait Word: UIntLike {
    #[cfg(test)]
    const WIDTH: AccessWidth;

    #[cfg(test)]
    fn into_u32(self) -> u32;

    /// Truncates to the width of `Self`.
    #[cfg(test)]
    fn from_u32(value: u32) -> Self;
}

macro_rules! Word_impl_for {
    ($type:ty, $width:expr) => {
        impl Word for $type {
            #[cfg(test)]
            const WIDTH: AccessWidth = $width;

            #[cfg(test)]
            #[inline(always)]
            fn into_u32(self) -> u32 {
                self as u32
            }

            #[cfg(test)]
            #[inline(always)]
            fn from_u32(value: u32) -> Self {
                value as $type
            }
        }
    };
}

Word_impl_for!(u8, AccessWidth::U8);
Word_impl_for!(u16, AccessWidth::U16);
Word_impl_for!(u32, AccessWidth::U32);

/// Read-only register.
#[repr(transparent)]
pub struct ReadOnly<T: Word, R: RegisterLongName = ()> {
    value: UnsafeCell<T>,
    associated_register: PhantomData<R>,
}

/// Read/write register.
#[repr(transparent)]
pub struct ReadWrite<T: Word, R: RegisterLongName = ()> {
    value: UnsafeCell<T>,
    associated_register: PhantomData<R>,
}

impl<T: Word, R: RegisterLongName> Readable for ReadOnly<T, R> {
    type T = T;
    type R = R;

    #[inline(always)]
    fn get(&self) -> T {
        load(&self.value)
    }
}

impl<T: Word, R: RegisterLongName> Readable for ReadWrite<T, R> {
    type T = T;
    type R = R;

    #[inline(always)]
    fn get(&self) -> T {
        load(&self.value)
    }
}

impl<T: Word, R: RegisterLongName> Writeable for ReadWrite<T, R> {
    type T = T;
    type R = R;

    #[inline(always)]
    fn set(&self, value: T) {
        store(&self.value, value)
    }
}

#[cfg(not(test))]
#[inline(always)]
fn load<T: Word>(cell: &UnsafeCell<T>) -> T {
    // SAFETY: cells only exist inside register blocks reached through a
    // `StaticRef`, whose constructor guarantees the address is valid.
    unsafe { core::ptr::read_volatile(cell.get()) }
}

#[cfg(not(test))]
#[inline(always)]
fn store<T: Word>(cell: &UnsafeCell<T>, value: T) {
    // SAFETY: see `load`.
    unsafe { core::ptr::write_volatile(cell.get(), value) }
}

#[cfg(test)]
fn load<T: Word>(cell: &UnsafeCell<T>) -> T {
    T::from_u32(emu::load(cell.get() as usize, T::WIDTH))
}

#[cfg(test)]
fn store<T: Word>(cell: &UnsafeCell<T>, value: T) {
    emu::store(cell.get() as usize, T::WIDTH, value.into_u32())
}
