// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! PRIMASK, the single-bit mask of all configurable-priority exceptions.

use tock_registers::{register_bitfields, LocalRegisterCopy};

register_bitfields![u32,
    pub PRIMASK [
        /// Set to prevent activation of every exception with configurable
        /// priority.
        PM OFFSET(0) NUMBITS(1) []
    ]
];

pub type PriMask = LocalRegisterCopy<u32, PRIMASK::Register>;

mrs!(fn primask = "mrs {}, PRIMASK", Primask);
msr!(unsafe fn set_primask = "msr PRIMASK, {}", Primask);

#[inline(always)]
pub fn read() -> PriMask {
    PriMask::new(primask())
}

/// Writes PRIMASK.
///
/// # Safety
///
/// Clearing PRIMASK ends any critical section the caller is inside of.
#[inline(always)]
pub unsafe fn write(value: PriMask) {
    set_primask(value.get())
}
