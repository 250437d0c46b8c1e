// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Program status register and its views.
//!
//! The PSR combines the application (APSR), interrupt (IPSR) and execution
//! (EPSR) status registers. `MRS` can read any combination of them; EPSR
//! bits always read as zero.

use tock_registers::{register_bitfields, LocalRegisterCopy};

use crate::exceptions::Exception;

register_bitfields![u32,
    pub PSR [
        /// Negative
        N OFFSET(31) NUMBITS(1) [],
        /// Zero
        Z OFFSET(30) NUMBITS(1) [],
        /// Carry
        C OFFSET(29) NUMBITS(1) [],
        /// Overflow
        V OFFSET(28) NUMBITS(1) [],
        /// Thumb state
        T OFFSET(24) NUMBITS(1) [],
        /// Number of the active exception, 0 in Thread mode
        ISR OFFSET(0) NUMBITS(9) []
    ]
];

pub type Psr = LocalRegisterCopy<u32, PSR::Register>;

mrs!(fn apsr = "mrs {}, APSR", Apsr);
mrs!(fn ipsr = "mrs {}, IPSR", Ipsr);
mrs!(fn epsr = "mrs {}, EPSR", Epsr);
mrs!(fn iepsr = "mrs {}, IEPSR", Iepsr);
mrs!(fn iapsr = "mrs {}, IAPSR", Iapsr);
mrs!(fn eapsr = "mrs {}, EAPSR", Eapsr);
mrs!(fn xpsr = "mrs {}, XPSR", Psr);

#[inline(always)]
pub fn read_apsr() -> Psr {
    Psr::new(apsr())
}

#[inline(always)]
pub fn read_ipsr() -> Psr {
    Psr::new(ipsr())
}

#[inline(always)]
pub fn read_epsr() -> Psr {
    Psr::new(epsr())
}

#[inline(always)]
pub fn read_iepsr() -> Psr {
    Psr::new(iepsr())
}

#[inline(always)]
pub fn read_iapsr() -> Psr {
    Psr::new(iapsr())
}

#[inline(always)]
pub fn read_eapsr() -> Psr {
    Psr::new(eapsr())
}

/// Reads all three views at once.
#[inline(always)]
pub fn read_psr() -> Psr {
    Psr::new(xpsr())
}

/// The exception the core is currently handling, from IPSR.
pub fn current_exception() -> Exception {
    Exception::from_number(read_ipsr().read(PSR::ISR))
}
