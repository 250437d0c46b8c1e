// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! CONTROL register.
//!
//! ARMv6-M only implements the stack pointer selection; Thread mode is
//! always privileged on a Cortex-M0.

use tock_registers::{register_bitfields, LocalRegisterCopy};

register_bitfields![u32,
    pub CONTROL [
        /// Stack pointer used in Thread mode. Handler mode always uses MSP.
        SPSEL OFFSET(1) NUMBITS(1) [
            Main = 0,
            Process = 1
        ]
    ]
];

pub type Control = LocalRegisterCopy<u32, CONTROL::Register>;

/// Stack pointer selected by `CONTROL.SPSEL`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StackPointer {
    Main,
    Process,
}

mrs!(fn control = "mrs {}, CONTROL", Control);
msr!(unsafe fn set_control = "msr CONTROL, {}", Control);

#[inline(always)]
pub fn read() -> Control {
    Control::new(control())
}

/// Writes CONTROL.
///
/// # Safety
///
/// Switching SPSEL in Thread mode changes the stack every following
/// instruction uses. The new stack pointer must already be valid, and the
/// caller must execute an ISB before depending on the switch.
#[inline(always)]
pub unsafe fn write(value: Control) {
    set_control(value.get())
}

/// The stack pointer Thread mode currently runs on.
pub fn stack_pointer() -> StackPointer {
    match read().read_as_enum(CONTROL::SPSEL) {
        Some(CONTROL::SPSEL::Value::Process) => StackPointer::Process,
        _ => StackPointer::Main,
    }
}
