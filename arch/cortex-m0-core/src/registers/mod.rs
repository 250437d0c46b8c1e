// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Special-purpose CPU registers.
//!
//! These are not memory mapped. Reads are `MRS` (`MOV` for LR) and do not
//! touch memory; writes are `MSR` and act as compiler barriers, since they
//! change how every following instruction executes.
//!
//! Writes do not issue an `ISB`. After switching the stack pointer through
//! CONTROL the caller must execute [`crate::support::isb`] before relying
//! on the new stack.

/// Defines a function returning the raw value of a special register.
macro_rules! mrs {
    ($(#[$attr:meta])* $vis:vis fn $name:ident = $instruction:literal, $register:ident) => {
        $(#[$attr])*
        #[cfg(all(target_arch = "arm", target_os = "none"))]
        #[inline(always)]
        $vis fn $name() -> u32 {
            let value: u32;
            // SAFETY: reading a special register has no side effects.
            unsafe {
                core::arch::asm!(
                    $instruction,
                    out(reg) value,
                    options(nomem, nostack, preserves_flags)
                );
            }
            value
        }

        $(#[$attr])*
        #[cfg(not(all(target_arch = "arm", target_os = "none")))]
        #[inline(always)]
        $vis fn $name() -> u32 {
            $crate::registers::host::mrs($crate::registers::host::SpecialRegister::$register)
        }
    };
}

/// Defines a function writing the raw value of a special register.
macro_rules! msr {
    ($(#[$attr:meta])* $vis:vis unsafe fn $name:ident = $instruction:literal, $register:ident) => {
        $(#[$attr])*
        #[cfg(all(target_arch = "arm", target_os = "none"))]
        #[inline(always)]
        $vis unsafe fn $name(value: u32) {
            core::arch::asm!($instruction, in(reg) value, options(nostack, preserves_flags));
        }

        $(#[$attr])*
        #[cfg(not(all(target_arch = "arm", target_os = "none")))]
        #[inline(always)]
        $vis unsafe fn $name(value: u32) {
            $crate::registers::host::msr($crate::registers::host::SpecialRegister::$register, value)
        }
    };
}

pub mod control;
pub mod lr;
pub mod primask;
pub mod psr;
pub mod sp;

pub use self::control::{Control, StackPointer};
pub use self::lr::ExcReturn;
pub use self::primask::PriMask;
pub use self::psr::Psr;

/// Stand-ins for the special registers on non-ARM builds. Test builds are
/// served by the MMIO emulator; anything else is a mock that panics.
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
pub(crate) mod host {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) enum SpecialRegister {
        Apsr,
        Iapsr,
        Eapsr,
        Psr,
        Ipsr,
        Epsr,
        Iepsr,
        Msp,
        Psp,
        Primask,
        Control,
        Lr,
    }

    #[cfg(test)]
    pub(crate) use crate::mmio::emu::{mrs, msr};

    // Mock implementations for host builds outside of unit tests.
    #[cfg(not(test))]
    pub(crate) fn mrs(_register: SpecialRegister) -> u32 {
        unimplemented!()
    }

    #[cfg(not(test))]
    pub(crate) fn msr(_register: SpecialRegister, _value: u32) {
        unimplemented!()
    }
}
