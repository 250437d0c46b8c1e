// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Cortex-M0 NVIC
//!
//! The ARMv6-M NVIC handles 32 external interrupts, so every register is a
//! single word apart from the priorities, which are one byte per interrupt.
//! <https://developer.arm.com/documentation/ddi0419/latest/>
//!
//! Enable and pending state is only ever changed through the write-1-to-set
//! and write-1-to-clear registers, with a single store that carries only the
//! bit of the targeted interrupt. A read-modify-write of ISER or ISPR could
//! lose a bit set by hardware between the read and the write.
//!
//! Interrupt numbers are `0..=31`. Larger numbers are a caller error and
//! panic (shift overflow in debug builds, out of bounds priority index).

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::{register_bitfields, register_structs};

use crate::bits;
use crate::mmio::ReadWrite;
use crate::static_ref::StaticRef;

register_structs! {
    /// NVIC Registers.
    pub NvicRegisters {
        /// Interrupt Set-Enable Register
        (0x000 => iser: ReadWrite<u32, NvicSetClear::Register>),

        (0x004 => _reserved0),

        /// Interrupt Clear-Enable Register
        (0x080 => icer: ReadWrite<u32, NvicSetClear::Register>),

        (0x084 => _reserved1),

        /// Interrupt Set-Pending Register
        (0x100 => ispr: ReadWrite<u32, NvicSetClear::Register>),

        (0x104 => _reserved2),

        /// Interrupt Clear-Pending Register
        (0x180 => icpr: ReadWrite<u32, NvicSetClear::Register>),

        (0x184 => _reserved3),

        /// Interrupt Priority Registers, byte addressed
        (0x300 => ipr: [ReadWrite<u8, InterruptPriority::Register>; 32]),

        (0x320 => @END),
    }
}

register_bitfields![u32,
    pub NvicSetClear [
        /// Bit `n` accesses interrupt `n`.
        BITS OFFSET(0) NUMBITS(32) []
    ]
];

register_bitfields![u8,
    pub InterruptPriority [
        /// The only implemented priority bits. Bits [5:0] read as zero and
        /// ignore writes.
        PRI OFFSET(6) NUMBITS(2) []
    ]
];

pub const NVIC_BASE: usize = 0xE000_E100;

/// Number of implemented priority bits per interrupt.
pub const PRIORITY_BITS: u32 = 2;

/// The NVIC of the running core.
pub const NVIC: Nvic = unsafe { Nvic::new(NVIC_BASE) };

/// Driver for the interrupt controller.
pub struct Nvic {
    registers: StaticRef<NvicRegisters>,
}

impl Nvic {
    /// # Safety
    ///
    /// `base` must be the address of an ARMv6-M NVIC register block.
    pub const unsafe fn new(base: usize) -> Nvic {
        Nvic {
            registers: StaticRef::new(base as *const NvicRegisters),
        }
    }

    /// Whether interrupt `n` is enabled.
    #[inline(always)]
    pub fn is_enabled(&self, n: u32) -> bool {
        bits::is_set(self.registers.iser.get(), n as usize)
    }

    /// Enables interrupt `n`.
    #[inline(always)]
    pub fn enable(&self, n: u32) {
        self.registers.iser.set(1 << n);
    }

    /// Disables interrupt `n`.
    #[inline(always)]
    pub fn disable(&self, n: u32) {
        self.registers.icer.set(1 << n);
    }

    #[inline(always)]
    pub fn is_pending(&self, n: u32) -> bool {
        bits::is_set(self.registers.ispr.get(), n as usize)
    }

    /// Pends interrupt `n` from software.
    #[inline(always)]
    pub fn set_pending(&self, n: u32) {
        self.registers.ispr.set(1 << n);
    }

    #[inline(always)]
    pub fn clear_pending(&self, n: u32) {
        self.registers.icpr.set(1 << n);
    }

    /// Priority byte of interrupt `n`. Only the top [`PRIORITY_BITS`] bits
    /// can be non-zero; lower values are more urgent.
    #[inline(always)]
    pub fn priority(&self, n: u32) -> u8 {
        self.registers.ipr[n as usize].get()
    }

    /// Sets the priority byte of interrupt `n` with a single byte store.
    #[inline(always)]
    pub fn set_priority(&self, n: u32, priority: u8) {
        self.registers.ipr[n as usize].set(priority);
    }

    /// Disable all interrupts
    pub fn disable_all(&self) {
        self.registers.icer.set(!0)
    }

    /// Clear all pending interrupts
    pub fn clear_all_pending(&self) {
        self.registers.icpr.set(!0)
    }

    /// Get the index (0-31) of the lowest numbered pending interrupt, or
    /// `None` if none are pending.
    pub fn next_pending(&self) -> Option<u32> {
        let ispr = self.registers.ispr.get();

        // trailing_zeros == index of first high bit
        if ispr != 0 {
            Some(ispr.trailing_zeros())
        } else {
            None
        }
    }

    pub fn has_pending(&self) -> bool {
        self.registers.ispr.get() != 0
    }
}

/// An opaque wrapper for a single NVIC interrupt.
///
/// Hand these out to low-level drivers to let them control their own
/// interrupt but not others.
pub struct Interrupt(u32);

impl Interrupt {
    /// Creates a new `Interrupt`
    ///
    /// # Safety
    ///
    /// Only chip or platform configuration code should create these, once
    /// per interrupt line. `idx` must be below 32.
    pub const unsafe fn new(idx: u32) -> Interrupt {
        Interrupt(idx)
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    /// Enable the interrupt
    pub fn enable(&self) {
        NVIC.enable(self.0)
    }

    /// Disable the interrupt
    pub fn disable(&self) {
        NVIC.disable(self.0)
    }

    pub fn is_enabled(&self) -> bool {
        NVIC.is_enabled(self.0)
    }

    pub fn is_pending(&self) -> bool {
        NVIC.is_pending(self.0)
    }

    pub fn set_pending(&self) {
        NVIC.set_pending(self.0)
    }

    /// Clear pending state
    pub fn clear_pending(&self) {
        NVIC.clear_pending(self.0)
    }

    pub fn set_priority(&self, priority: u8) {
        NVIC.set_priority(self.0, priority)
    }
}
