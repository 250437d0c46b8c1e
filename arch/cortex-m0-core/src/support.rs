// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Barrier and hint instructions for the Cortex-M0.

use crate::registers::primask::{self, PRIMASK};

/// DSB SY instruction
#[cfg(all(target_arch = "arm", target_os = "none"))]
#[inline(always)]
pub fn dsb() {
    use core::arch::asm;
    unsafe {
        asm!("dsb sy", options(nostack, preserves_flags));
    }
}

/// ISB SY instruction
#[cfg(all(target_arch = "arm", target_os = "none"))]
#[inline(always)]
pub fn isb() {
    use core::arch::asm;
    unsafe {
        asm!("isb sy", options(nostack, preserves_flags));
    }
}

/// DMB SY instruction
#[cfg(all(target_arch = "arm", target_os = "none"))]
#[inline(always)]
pub fn dmb() {
    use core::arch::asm;
    unsafe {
        asm!("dmb sy", options(nostack, preserves_flags));
    }
}

/// NOP instruction
#[cfg(all(target_arch = "arm", target_os = "none"))]
#[inline(always)]
pub fn nop() {
    use core::arch::asm;
    unsafe {
        asm!("nop", options(nomem, nostack, preserves_flags));
    }
}

/// WFI instruction
///
/// # Safety
///
/// The caller must have arranged for an interrupt to wake the core, or it
/// sleeps forever.
#[cfg(all(target_arch = "arm", target_os = "none"))]
#[inline(always)]
pub unsafe fn wfi() {
    use core::arch::asm;
    asm!("wfi", options(nomem, preserves_flags));
}

/// WFE instruction
///
/// # Safety
///
/// As for [`wfi`], with an event or interrupt as the wakeup source.
#[cfg(all(target_arch = "arm", target_os = "none"))]
#[inline(always)]
pub unsafe fn wfe() {
    use core::arch::asm;
    asm!("wfe", options(nomem, preserves_flags));
}

/// SEV instruction
#[cfg(all(target_arch = "arm", target_os = "none"))]
#[inline(always)]
pub fn sev() {
    use core::arch::asm;
    unsafe {
        asm!("sev", options(nomem, nostack, preserves_flags));
    }
}

/// DSB SY instruction (host)
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
pub fn dsb() {
    host::execute(host::Instruction::Dsb)
}

/// ISB SY instruction (host)
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
pub fn isb() {
    host::execute(host::Instruction::Isb)
}

/// DMB SY instruction (host)
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
pub fn dmb() {
    host::execute(host::Instruction::Dmb)
}

/// NOP instruction (host)
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
pub fn nop() {
    host::execute(host::Instruction::Nop)
}

/// WFI instruction (host)
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
pub unsafe fn wfi() {
    host::execute(host::Instruction::Wfi)
}

/// WFE instruction (host)
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
pub unsafe fn wfe() {
    host::execute(host::Instruction::Wfe)
}

/// SEV instruction (host)
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
pub fn sev() {
    host::execute(host::Instruction::Sev)
}

/// Runs `f` with interrupts masked through PRIMASK.
///
/// PRIMASK is only cleared again if it was clear on entry, so critical
/// sections nest.
pub fn atomic<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let saved = primask::read();
    let mut masked = saved;
    masked.modify(PRIMASK::PM::SET);
    // SAFETY: masking interrupts cannot invalidate any Rust invariant.
    unsafe { primask::write(masked) };

    let res = f();

    if !saved.is_set(PRIMASK::PM) {
        // SAFETY: restores the state found on entry.
        unsafe { primask::write(saved) };
    }
    res
}

/// Stand-ins for the instructions on non-ARM builds.
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
pub(crate) mod host {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) enum Instruction {
        Dsb,
        Isb,
        Dmb,
        Nop,
        Wfi,
        Wfe,
        Sev,
    }

    #[cfg(test)]
    pub(crate) fn execute(instruction: Instruction) {
        crate::mmio::emu::execute(instruction);
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }

    // Mock implementations for host builds outside of unit tests.
    #[cfg(not(test))]
    pub(crate) fn execute(_instruction: Instruction) {
        unimplemented!()
    }
}
