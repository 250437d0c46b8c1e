// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! ARM Cortex-M0 SysTick peripheral.
//!
//! A 24-bit down-counter. It reloads from `LOAD` on reaching zero, sets
//! `COUNTFLAG` and, with `TICKINT` set, pends the SysTick exception.
//!
//! Any read of `CTRL` clears `COUNTFLAG`. That includes the read half of
//! every read-modify-write of `CTRL`, so [`SysTick::enable`],
//! [`SysTick::disable`] and the `CTRL` setters all consume a pending count
//! to zero, as does [`SysTick::ctrl`].

use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::fields::FieldValue;
use tock_registers::{register_bitfields, register_structs, LocalRegisterCopy};

use crate::mmio::{ReadOnly, ReadWrite};
use crate::static_ref::StaticRef;

register_structs! {
    pub SysTickRegisters {
        /// SysTick Control and Status Register
        (0x0 => syst_csr: ReadWrite<u32, ControlAndStatus::Register>),

        /// SysTick Reload Value Register
        (0x4 => syst_rvr: ReadWrite<u32, ReloadValue::Register>),

        /// SysTick Current Value Register
        (0x8 => syst_cvr: ReadWrite<u32, CurrentValue::Register>),

        /// SysTick Calibration Value Register
        (0xc => syst_calib: ReadOnly<u32, CalibrationValue::Register>),

        (0x10 => @END),
    }
}

register_bitfields![u32,
    pub ControlAndStatus [
        /// Returns 1 if timer counted to 0 since last time this was read.
        COUNTFLAG OFFSET(16) NUMBITS(1) [],

        /// Clock source is (0) External Clock or (1) Processor Clock.
        CLKSOURCE OFFSET(2) NUMBITS(1) [
            External = 0,
            Processor = 1
        ],

        /// Set to 1 to enable SysTick exception request.
        TICKINT OFFSET(1) NUMBITS(1) [],

        /// Enable the counter (1 == Enabled).
        ENABLE OFFSET(0) NUMBITS(1) []
    ],

    pub ReloadValue [
        /// Value loaded to `syst_cvr` when counter is enabled and reaches 0.
        RELOAD          OFFSET(0)  NUMBITS(24) []
    ],

    pub CurrentValue [
        /// Reads current value. Write of any value sets to 0.
        CURRENT         OFFSET(0)  NUMBITS(24) []
    ],

    pub CalibrationValue [
        /// 0 if device provides reference clock to processor.
        NOREF           OFFSET(31) NUMBITS(1) [],

        /// 0 if TENMS value is exact, 1 if inexact or not given.
        SKEW            OFFSET(30) NUMBITS(1) [],

        /// Reload value for 10ms ticks, or 0 if no calibration.
        TENMS           OFFSET(0)  NUMBITS(24) []
    ]
];

pub const SYSTICK_BASE: usize = 0xE000_E010;

/// Largest value `LOAD` can hold.
pub const MAX_RELOAD: u32 = 0x00FF_FFFF;

/// The SysTick of the running core.
pub const SYSTICK: SysTick = unsafe { SysTick::new(SYSTICK_BASE) };

/// Clock the counter decrements on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClockSource {
    /// The implementation defined reference clock.
    External,
    Processor,
}

impl ClockSource {
    fn field(self) -> FieldValue<u32, ControlAndStatus::Register> {
        match self {
            ClockSource::External => ControlAndStatus::CLKSOURCE::External,
            ClockSource::Processor => ControlAndStatus::CLKSOURCE::Processor,
        }
    }
}

/// The ARM Cortex-M0 SysTick peripheral
///
/// Documented in the Cortex-M0 Devices Generic User Guide, Chapter 4.4
pub struct SysTick {
    registers: StaticRef<SysTickRegisters>,
}

impl SysTick {
    /// # Safety
    ///
    /// `base` must be the address of an ARMv6-M SysTick register block.
    pub const unsafe fn new(base: usize) -> SysTick {
        SysTick {
            registers: StaticRef::new(base as *const SysTickRegisters),
        }
    }

    /// Reads `CTRL`. This clears `COUNTFLAG`.
    pub fn ctrl(&self) -> LocalRegisterCopy<u32, ControlAndStatus::Register> {
        self.registers.syst_csr.extract()
    }

    pub fn is_enabled(&self) -> bool {
        self.registers.syst_csr.is_set(ControlAndStatus::ENABLE)
    }

    /// Starts the counter.
    pub fn enable(&self) {
        self.registers.syst_csr.modify(ControlAndStatus::ENABLE::SET);
    }

    pub fn disable(&self) {
        self.registers.syst_csr.modify(ControlAndStatus::ENABLE::CLEAR);
    }

    pub fn is_interrupt_enabled(&self) -> bool {
        self.registers.syst_csr.is_set(ControlAndStatus::TICKINT)
    }

    /// Whether reaching zero pends the SysTick exception.
    pub fn set_interrupt_enabled(&self, enable: bool) {
        if enable {
            self.registers.syst_csr.modify(ControlAndStatus::TICKINT::SET);
        } else {
            self.registers
                .syst_csr
                .modify(ControlAndStatus::TICKINT::CLEAR);
        }
    }

    pub fn clock_source(&self) -> ClockSource {
        match self
            .registers
            .syst_csr
            .read_as_enum(ControlAndStatus::CLKSOURCE)
        {
            Some(ControlAndStatus::CLKSOURCE::Value::Processor) => ClockSource::Processor,
            _ => ClockSource::External,
        }
    }

    pub fn set_clock_source(&self, source: ClockSource) {
        self.registers.syst_csr.modify(source.field());
    }

    pub fn is_running_on_processor_clock(&self) -> bool {
        self.clock_source() == ClockSource::Processor
    }

    /// Returns true if the timer counted to 0 since `CTRL` was last read.
    ///
    /// The read clears the flag, so a second call returns false until the
    /// counter wraps again.
    pub fn has_counted_to_zero(&self) -> bool {
        self.registers.syst_csr.is_set(ControlAndStatus::COUNTFLAG)
    }

    pub fn load(&self) -> LocalRegisterCopy<u32, ReloadValue::Register> {
        self.registers.syst_rvr.extract()
    }

    pub fn set_load(&self, value: u32) {
        self.registers.syst_rvr.set(value);
    }

    pub fn reload_value(&self) -> u32 {
        self.registers.syst_rvr.read(ReloadValue::RELOAD)
    }

    /// Sets the reload value. Bits above [`MAX_RELOAD`] are dropped.
    pub fn set_reload_value(&self, reload: u32) {
        self.registers
            .syst_rvr
            .write(ReloadValue::RELOAD.val(reload));
    }

    pub fn val(&self) -> LocalRegisterCopy<u32, CurrentValue::Register> {
        self.registers.syst_cvr.extract()
    }

    /// Writes `VAL`. Whatever the value, the counter and `COUNTFLAG` are
    /// cleared.
    pub fn set_val(&self, value: u32) {
        self.registers.syst_cvr.set(value);
    }

    pub fn current_value(&self) -> u32 {
        self.registers.syst_cvr.read(CurrentValue::CURRENT)
    }

    pub fn clear_current_value(&self) {
        self.registers.syst_cvr.set(0);
    }

    pub fn calibration(&self) -> LocalRegisterCopy<u32, CalibrationValue::Register> {
        self.registers.syst_calib.extract()
    }

    /// Reload value for 10ms ticks, or 0 if no calibration.
    pub fn ten_ms_calibration(&self) -> u32 {
        self.registers.syst_calib.read(CalibrationValue::TENMS)
    }

    pub fn has_10ms_calibration(&self) -> bool {
        self.ten_ms_calibration() != 0
    }

    pub fn is_calibration_exact(&self) -> bool {
        !self.registers.syst_calib.is_set(CalibrationValue::SKEW)
    }

    pub fn has_reference_clock(&self) -> bool {
        !self.registers.syst_calib.is_set(CalibrationValue::NOREF)
    }

    /// Programs the period and starts counting.
    pub fn configure(&self, reload: u32, clock_source: ClockSource, with_interrupt: bool) {
        // n.b.: 4.4.5 'hints and tips' suggests setting reload before value
        self.set_reload_value(reload);
        self.clear_current_value();

        let tickint = if with_interrupt {
            ControlAndStatus::TICKINT::SET
        } else {
            ControlAndStatus::TICKINT::CLEAR
        };
        self.registers
            .syst_csr
            .write(ControlAndStatus::ENABLE::SET + tickint + clock_source.field());
    }

    /// Stops the counter and zeroes it.
    pub fn reset(&self) {
        self.registers.syst_csr.set(0);
        self.registers.syst_rvr.set(0);
        self.registers.syst_cvr.set(0);
    }
}
