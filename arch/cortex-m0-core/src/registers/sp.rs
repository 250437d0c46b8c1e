// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Main and process stack pointers.
//!
//! Bits [1:0] of both are always zero; writes drop them.

mrs!(
    /// Reads MSP.
    pub fn read_msp = "mrs {}, MSP", Msp
);
mrs!(
    /// Reads PSP.
    pub fn read_psp = "mrs {}, PSP", Psp
);
msr!(
    /// Writes MSP.
    ///
    /// # Safety
    ///
    /// If MSP is the active stack, every live frame is abandoned.
    pub unsafe fn write_msp = "msr MSP, {}", Msp
);
msr!(
    /// Writes PSP.
    ///
    /// # Safety
    ///
    /// If PSP is the active stack, every live frame is abandoned.
    pub unsafe fn write_psp = "msr PSP, {}", Psp
);
