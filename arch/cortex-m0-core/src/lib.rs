// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Core peripheral access for the ARM Cortex-M0.
//!
//! Covers the parts of an ARMv6-M processor that every Cortex-M0 chip has:
//! the NVIC, the System Control Block, SysTick and the special-purpose CPU
//! registers. Vendor peripherals, startup code and vector tables live
//! elsewhere.
//!
//! The peripherals exist from power-on, so they are exposed as `const`
//! handles ([`nvic::NVIC`], [`scb::SCB`], [`systick::SYSTICK`]) and need no
//! initialization.

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

use core::fmt::Write;

pub mod bits;
pub mod exceptions;
pub mod mmio;
pub mod nvic;
pub mod registers;
pub mod scb;
pub mod static_ref;
pub mod support;
pub mod systick;

pub use static_ref::StaticRef;

use registers::{control, primask};
use scb::SCB;
use systick::SYSTICK;

/// Writes a summary of the core state to `writer`.
///
/// This reads SysTick `CTRL` and so clears `COUNTFLAG`.
pub fn print_core_state(writer: &mut dyn Write) {
    let cpuid = SCB.cpuid();
    let active = SCB.active_exception();
    let pending = SCB.pending_exception();
    let masked = primask::read().is_set(primask::PRIMASK::PM);
    let stack = control::stack_pointer();

    let _ = writer.write_fmt(format_args!("\r\n---| Core State |---\r\n"));
    let _ = writer.write_fmt(format_args!("CPU:                {}\r\n", cpuid));
    let _ = writer.write_fmt(format_args!("Active exception:   {}\r\n", active));
    match pending {
        Some(exception) => {
            let _ = writer.write_fmt(format_args!("Pending exception:  {}\r\n", exception));
        }
        None => {
            let _ = writer.write_fmt(format_args!("Pending exception:  none\r\n"));
        }
    }
    let _ = writer.write_fmt(format_args!(
        "NMI pending:        {}\r\n",
        SCB.is_nmi_pending()
    ));
    let _ = writer.write_fmt(format_args!(
        "PendSV pending:     {}\r\n",
        SCB.is_pendsv_pending()
    ));
    let _ = writer.write_fmt(format_args!(
        "SysTick pending:    {}\r\n",
        SCB.is_systick_pending()
    ));
    let _ = writer.write_fmt(format_args!("Interrupts masked:  {}\r\n", masked));
    let _ = writer.write_fmt(format_args!("Thread stack:       {:?}\r\n", stack));

    let ctrl = SYSTICK.ctrl();
    let _ = writer.write_fmt(format_args!("\r\n---| SysTick |---\r\n"));
    let _ = writer.write_fmt(format_args!(
        "Enabled:            {}\r\n",
        ctrl.is_set(systick::ControlAndStatus::ENABLE)
    ));
    let _ = writer.write_fmt(format_args!(
        "Interrupt:          {}\r\n",
        ctrl.is_set(systick::ControlAndStatus::TICKINT)
    ));
    let _ = writer.write_fmt(format_args!(
        "Processor clock:    {}\r\n",
        ctrl.is_set(systick::ControlAndStatus::CLKSOURCE)
    ));
    let _ = writer.write_fmt(format_args!(
        "Counted to zero:    {}\r\n",
        ctrl.is_set(systick::ControlAndStatus::COUNTFLAG)
    ));
    let _ = writer.write_fmt(format_args!(
        "Reload:             {}\r\n",
        SYSTICK.reload_value()
    ));
    let _ = writer.write_fmt(format_args!(
        "Current:            {}\r\n",
        SYSTICK.current_value()
    ));
}
