// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Link register and EXC_RETURN values.

mrs!(
    /// Reads LR at the point where this call is inlined.
    ///
    /// Inside an exception handler, before anything is called, this is the
    /// EXC_RETURN value.
    pub fn read = "mov {}, lr", Lr
);

/// EXC_RETURN values loaded into LR on exception entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ExcReturn {
    /// Return to Handler mode, using MSP.
    Handler = 0xFFFF_FFF1,
    /// Return to Thread mode, using MSP.
    ThreadMsp = 0xFFFF_FFF9,
    /// Return to Thread mode, using PSP.
    ThreadPsp = 0xFFFF_FFFD,
}

impl ExcReturn {
    pub const fn from_lr(lr: u32) -> Option<ExcReturn> {
        match lr {
            0xFFFF_FFF1 => Some(ExcReturn::Handler),
            0xFFFF_FFF9 => Some(ExcReturn::ThreadMsp),
            0xFFFF_FFFD => Some(ExcReturn::ThreadPsp),
            _ => None,
        }
    }
}
