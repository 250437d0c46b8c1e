// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! ARMv6-M exception numbers.
//!
//! Exception numbers are what the hardware reports in `ICSR.VECTACTIVE`,
//! `ICSR.VECTPENDING` and `IPSR`. External interrupt `n` is exception
//! `FIRST_IRQ + n`.

use core::fmt;

/// Number of external interrupt lines on a Cortex-M0.
pub const NUM_OF_IRQS: u8 = 32;

pub const THREAD_MODE: u8 = 0;
pub const RESET: u8 = 1;
pub const NMI: u8 = 2;
pub const HARD_FAULT: u8 = 3;
pub const SV_CALL: u8 = 11;
pub const PEND_SV: u8 = 14;
pub const SYS_TICK: u8 = 15;
pub const FIRST_IRQ: u8 = 16;
pub const LAST_IRQ: u8 = FIRST_IRQ + NUM_OF_IRQS - 1;

/// Whether `exception` is an external interrupt rather than a system
/// exception.
#[inline(always)]
pub const fn is_irq_number(exception: u8) -> bool {
    exception >= FIRST_IRQ && exception <= LAST_IRQ
}

/// A decoded exception number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Exception {
    ThreadMode,
    Reset,
    Nmi,
    HardFault,
    SvCall,
    PendSv,
    SysTick,
    /// External interrupt, numbered from zero.
    Irq(u8),
    /// A number with no exception behind it on this core.
    Reserved(u32),
}

impl Exception {
    /// Decodes a raw exception number.
    pub const fn from_number(number: u32) -> Exception {
        match number {
            0 => Exception::ThreadMode,
            1 => Exception::Reset,
            2 => Exception::Nmi,
            3 => Exception::HardFault,
            11 => Exception::SvCall,
            14 => Exception::PendSv,
            15 => Exception::SysTick,
            n if n >= FIRST_IRQ as u32 && n <= LAST_IRQ as u32 => {
                Exception::Irq((n - FIRST_IRQ as u32) as u8)
            }
            n => Exception::Reserved(n),
        }
    }

    /// The raw exception number.
    pub const fn number(self) -> u32 {
        match self {
            Exception::ThreadMode => THREAD_MODE as u32,
            Exception::Reset => RESET as u32,
            Exception::Nmi => NMI as u32,
            Exception::HardFault => HARD_FAULT as u32,
            Exception::SvCall => SV_CALL as u32,
            Exception::PendSv => PEND_SV as u32,
            Exception::SysTick => SYS_TICK as u32,
            Exception::Irq(irq) => FIRST_IRQ as u32 + irq as u32,
            Exception::Reserved(n) => n,
        }
    }

    /// The NVIC line if this is an external interrupt.
    pub const fn irq(self) -> Option<u8> {
        match self {
            Exception::Irq(irq) => Some(irq),
            _ => None,
        }
    }
}

impl From<u32> for Exception {
    fn from(number: u32) -> Self {
        Exception::from_number(number)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Exception::ThreadMode => write!(f, "Thread mode"),
            Exception::Reset => write!(f, "Reset"),
            Exception::Nmi => write!(f, "NMI"),
            Exception::HardFault => write!(f, "HardFault"),
            Exception::SvCall => write!(f, "SVCall"),
            Exception::PendSv => write!(f, "PendSV"),
            Exception::SysTick => write!(f, "SysTick"),
            Exception::Irq(irq) => write!(f, "IRQ{}", irq),
            Exception::Reserved(n) => write!(f, "Reserved({})", n),
        }
    }
}
