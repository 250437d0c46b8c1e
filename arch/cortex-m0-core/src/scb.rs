// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! ARMv6-M System Control Block
//!
//! <https://developer.arm.com/documentation/dui0497/a/cortex-m0-peripherals/system-control-block>

use core::fmt;

use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::{register_bitfields, register_structs, LocalRegisterCopy};

use crate::exceptions::Exception;
use crate::mmio::{ReadOnly, ReadWrite};
use crate::static_ref::StaticRef;
use crate::support;

register_structs! {
    /// In an ARMv6-M processor, a System Control Block (SCB) in the SCS
    /// provides key status information and control features for the processor.
    pub ScbRegisters {
        /// CPUID Base Register
        (0x00 => cpuid: ReadOnly<u32, CpuId::Register>),

        /// Interrupt Control and State Register
        (0x04 => icsr: ReadWrite<u32, InterruptControlAndState::Register>),

        /// 0xE000ED08, VTOR is optional on ARMv6-M and absent on Cortex-M0.
        (0x08 => _reserved0),

        /// Application Interrupt and Reset Control Register
        (0x0c => aircr: ReadWrite<u32, ApplicationInterruptAndReset::Register>),

        /// System Control Register
        (0x10 => scr: ReadWrite<u32, SystemControl::Register>),

        /// Configuration and Control Register
        (0x14 => ccr: ReadOnly<u32, ConfigurationAndControl::Register>),

        /// 0xE000ED18, SHPR1 is not implemented on ARMv6-M.
        (0x18 => _reserved1),

        /// System Handler Priority Register 2
        (0x1c => shpr2: ReadWrite<u32, SystemHandlerPriority2::Register>),

        /// System Handler Priority Register 3
        (0x20 => shpr3: ReadWrite<u32, SystemHandlerPriority3::Register>),

        /// System Handler Control and State Register
        (0x24 => shcsr: ReadWrite<u32, SystemHandlerControlAndState::Register>),

        (0x28 => @END),
    }
}

register_bitfields![u32,
    pub CpuId [
        /// Implementer code assigned by ARM. ARM implementations are 0x41.
        IMPLEMENTER     OFFSET(24)  NUMBITS(8) [],

        /// Implementer-defined variant number.
        VARIANT         OFFSET(20)  NUMBITS(4) [],

        /// Reads as 0xC for ARMv6-M.
        ARCHITECTURE    OFFSET(16)  NUMBITS(4) [],

        /// Implementer-defined part number. 0xC20 for Cortex-M0.
        PARTNO          OFFSET(4)   NUMBITS(12) [],

        /// Implementer-defined revision number.
        REVISION        OFFSET(0)   NUMBITS(4) []
    ],

    pub InterruptControlAndState [
        /// Non-Maskable Interrupt.
        /// Write 0 is no-op, write 1 triggers. Read returns whether NMI is pending.
        /// There is no way to clear it.
        NMIPENDSET      OFFSET(31)  NUMBITS(1) [],

        /// Pendable SerVice.
        /// Write 0 is no-op, write 1 triggers. Read returns whether PendSV is pending.
        PENDSVSET       OFFSET(28)  NUMBITS(1) [],

        /// Write 1 to clear PendSV.
        /// WO.
        PENDSVCLR       OFFSET(27)  NUMBITS(1) [],

        /// Pendable SysTick.
        /// Write 0 is no-op, write 1 triggers. Read returns whether SysTick is pending.
        PENDSTSET       OFFSET(26)  NUMBITS(1) [],

        /// Write 1 to clear PendST.
        /// WO.
        PENDSTCLR       OFFSET(25)  NUMBITS(1) [],

        /// Whether a pending exception will be serviced on exit from debug halt.
        /// RO.
        ISRPREEMPT      OFFSET(23)  NUMBITS(1) [],

        /// Whether an external interrupt (from NVIC) is pending.
        /// RO.
        ISRPENDING      OFFSET(22)  NUMBITS(1) [],

        /// Highest priority pending exception. Zero if none pending.
        /// RO.
        VECTPENDING     OFFSET(12)  NUMBITS(9) [],

        /// Active exception. Zero in Thread mode.
        /// RO.
        VECTACTIVE      OFFSET(0)   NUMBITS(9) []
    ],

    pub ApplicationInterruptAndReset [
        /// Key field. Must write 0x05FA or write is ignored. Reads as 0xFA05.
        /// RW.
        VECTKEY         OFFSET(16)  NUMBITS(16) [],

        /// 0=Little endian, 1=Big endian.
        /// RO.
        ENDIANNESS      OFFSET(15)  NUMBITS(1) [],

        /// Writing 1 to this bit requests a system reset.
        /// RW.
        SYSRESETREQ     OFFSET(2)   NUMBITS(1) [],

        /// Reserved for debug use. Must be written as 0.
        /// WO.
        VECTCLRACTIVE   OFFSET(1)   NUMBITS(1) []
    ],

    pub SystemControl [
        SEVONPEND       OFFSET(4)   NUMBITS(1) [],
        SLEEPDEEP       OFFSET(2)   NUMBITS(1) [],
        SLEEPONEXIT     OFFSET(1)   NUMBITS(1) []
    ],

    /// Both bits read as one on ARMv6-M.
    pub ConfigurationAndControl [
        STKALIGN        OFFSET(9)   NUMBITS(1) [],
        UNALIGN_TRP     OFFSET(3)   NUMBITS(1) []
    ],

    pub SystemHandlerPriority2 [
        /// SVCall
        PRI_11          OFFSET(24)  NUMBITS(8) []
    ],

    pub SystemHandlerPriority3 [
        /// SysTick
        PRI_15          OFFSET(24)  NUMBITS(8) [],
        /// PendSV
        PRI_14          OFFSET(16)  NUMBITS(8) []
    ],

    pub SystemHandlerControlAndState [
        SVCALLPENDED    OFFSET(15)  NUMBITS(1) []
    ]
];

pub const SCB_BASE: usize = 0xE000_ED00;

/// Value AIRCR writes must carry in `VECTKEY`.
pub const AIRCR_VECTKEY: u32 = 0x05FA;

/// The SCB of the running core.
pub const SCB: Scb = unsafe { Scb::new(SCB_BASE) };

/// Decoded CPUID base register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProcessorId(u32);

impl ProcessorId {
    pub const fn new(cpuid: u32) -> ProcessorId {
        ProcessorId(cpuid)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    fn register(self) -> LocalRegisterCopy<u32, CpuId::Register> {
        LocalRegisterCopy::new(self.0)
    }

    pub fn implementer(self) -> u32 {
        self.register().read(CpuId::IMPLEMENTER)
    }

    pub fn variant(self) -> u32 {
        self.register().read(CpuId::VARIANT)
    }

    pub fn architecture(self) -> u32 {
        self.register().read(CpuId::ARCHITECTURE)
    }

    pub fn part_number(self) -> u32 {
        self.register().read(CpuId::PARTNO)
    }

    pub fn revision(self) -> u32 {
        self.register().read(CpuId::REVISION)
    }

    /// An ARM-designed Cortex-M0 of any revision.
    pub fn is_cortex_m0(self) -> bool {
        self.implementer() == 0x41 && self.architecture() == 0xC && self.part_number() == 0xC20
    }
}

impl fmt::Display for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_cortex_m0() {
            write!(f, "ARM Cortex-M0 r{}p{}", self.variant(), self.revision())
        } else {
            write!(
                f,
                "implementer {:#04x} part {:#05x} r{}p{}",
                self.implementer(),
                self.part_number(),
                self.variant(),
                self.revision()
            )
        }
    }
}

/// Driver for the System Control Block.
pub struct Scb {
    registers: StaticRef<ScbRegisters>,
}

impl Scb {
    /// # Safety
    ///
    /// `base` must be the address of an ARMv6-M SCB register block.
    pub const unsafe fn new(base: usize) -> Scb {
        Scb {
            registers: StaticRef::new(base as *const ScbRegisters),
        }
    }

    pub fn cpuid(&self) -> ProcessorId {
        ProcessorId(self.registers.cpuid.get())
    }

    pub fn icsr(&self) -> LocalRegisterCopy<u32, InterruptControlAndState::Register> {
        self.registers.icsr.extract()
    }

    /// The exception being handled, or `ThreadMode`.
    pub fn active_exception(&self) -> Exception {
        Exception::from_number(self.registers.icsr.read(InterruptControlAndState::VECTACTIVE))
    }

    /// The highest priority pending exception, if any.
    pub fn pending_exception(&self) -> Option<Exception> {
        match self.registers.icsr.read(InterruptControlAndState::VECTPENDING) {
            0 => None,
            number => Some(Exception::from_number(number)),
        }
    }

    /// Whether an NVIC interrupt is pending.
    pub fn is_isr_pending(&self) -> bool {
        self.registers
            .icsr
            .is_set(InterruptControlAndState::ISRPENDING)
    }

    #[inline(always)]
    pub fn is_systick_pending(&self) -> bool {
        self.registers.icsr.is_set(InterruptControlAndState::PENDSTSET)
    }

    #[inline(always)]
    pub fn set_systick_pending(&self) {
        self.registers
            .icsr
            .write(InterruptControlAndState::PENDSTSET::SET);
    }

    #[inline(always)]
    pub fn clear_systick_pending(&self) {
        self.registers
            .icsr
            .write(InterruptControlAndState::PENDSTCLR::SET);
    }

    #[inline(always)]
    pub fn is_pendsv_pending(&self) -> bool {
        self.registers.icsr.is_set(InterruptControlAndState::PENDSVSET)
    }

    /// Pends PendSV, usually to request a context switch.
    #[inline(always)]
    pub fn set_pendsv(&self) {
        self.registers
            .icsr
            .write(InterruptControlAndState::PENDSVSET::SET);
    }

    #[inline(always)]
    pub fn clear_pendsv(&self) {
        self.registers
            .icsr
            .write(InterruptControlAndState::PENDSVCLR::SET);
    }

    #[inline(always)]
    pub fn is_nmi_pending(&self) -> bool {
        self.registers.icsr.is_set(InterruptControlAndState::NMIPENDSET)
    }

    /// Pends the NMI. Software cannot take this back.
    #[inline(always)]
    pub fn trigger_nmi(&self) {
        self.registers
            .icsr
            .write(InterruptControlAndState::NMIPENDSET::SET);
    }

    pub fn aircr(&self) -> LocalRegisterCopy<u32, ApplicationInterruptAndReset::Register> {
        self.registers.aircr.extract()
    }

    pub fn is_big_endian(&self) -> bool {
        self.registers
            .aircr
            .is_set(ApplicationInterruptAndReset::ENDIANNESS)
    }

    /// Requests a system reset and waits for it.
    pub fn system_reset(&self) -> ! {
        self.request_reset();
        loop {
            // This is required to avoid the empty loop clippy
            // warning #[warn(clippy::empty_loop)]
            support::nop();
        }
    }

    /// Writes SYSRESETREQ with the key, keeping the other AIRCR bits as read.
    /// Outstanding memory accesses complete before the request and nothing
    /// after it executes before the request is seen.
    fn request_reset(&self) {
        support::dsb();
        let aircr = self.registers.aircr.extract();
        self.registers.aircr.modify_no_read(
            aircr,
            ApplicationInterruptAndReset::VECTKEY.val(AIRCR_VECTKEY)
                + ApplicationInterruptAndReset::VECTCLRACTIVE::CLEAR
                + ApplicationInterruptAndReset::SYSRESETREQ::SET,
        );
        support::dsb();
        support::isb();
    }

    pub fn scr(&self) -> LocalRegisterCopy<u32, SystemControl::Register> {
        self.registers.scr.extract()
    }

    /// Sleep again on return from the last handler instead of resuming
    /// Thread mode.
    pub fn set_sleep_on_exit(&self, enable: bool) {
        if enable {
            self.registers.scr.modify(SystemControl::SLEEPONEXIT::SET);
        } else {
            self.registers.scr.modify(SystemControl::SLEEPONEXIT::CLEAR);
        }
    }

    /// Use deep sleep for WFI and WFE. What deep sleep means is chip
    /// specific.
    pub fn set_sleep_deep(&self, enable: bool) {
        if enable {
            self.registers.scr.modify(SystemControl::SLEEPDEEP::SET);
        } else {
            self.registers.scr.modify(SystemControl::SLEEPDEEP::CLEAR);
        }
    }

    /// Let newly pended interrupts, including disabled ones, wake WFE.
    pub fn set_sev_on_pend(&self, enable: bool) {
        if enable {
            self.registers.scr.modify(SystemControl::SEVONPEND::SET);
        } else {
            self.registers.scr.modify(SystemControl::SEVONPEND::CLEAR);
        }
    }

    pub fn ccr(&self) -> LocalRegisterCopy<u32, ConfigurationAndControl::Register> {
        self.registers.ccr.extract()
    }

    pub fn shpr2(&self) -> LocalRegisterCopy<u32, SystemHandlerPriority2::Register> {
        self.registers.shpr2.extract()
    }

    pub fn shpr3(&self) -> LocalRegisterCopy<u32, SystemHandlerPriority3::Register> {
        self.registers.shpr3.extract()
    }

    pub fn svcall_priority(&self) -> u8 {
        self.registers.shpr2.read(SystemHandlerPriority2::PRI_11) as u8
    }

    // SHPR2 and SHPR3 are word accessible only, so the priority setters
    // read-modify-write the whole register.

    pub fn set_svcall_priority(&self, priority: u8) {
        self.registers
            .shpr2
            .modify(SystemHandlerPriority2::PRI_11.val(priority as u32));
    }

    pub fn pendsv_priority(&self) -> u8 {
        self.registers.shpr3.read(SystemHandlerPriority3::PRI_14) as u8
    }

    pub fn set_pendsv_priority(&self, priority: u8) {
        self.registers
            .shpr3
            .modify(SystemHandlerPriority3::PRI_14.val(priority as u32));
    }

    pub fn systick_priority(&self) -> u8 {
        self.registers.shpr3.read(SystemHandlerPriority3::PRI_15) as u8
    }

    pub fn set_systick_priority(&self, priority: u8) {
        self.registers
            .shpr3
            .modify(SystemHandlerPriority3::PRI_15.val(priority as u32));
    }

    pub fn shcsr(&self) -> LocalRegisterCopy<u32, SystemHandlerControlAndState::Register> {
        self.registers.shcsr.extract()
    }

    pub fn is_svcall_pending(&self) -> bool {
        self.registers
            .shcsr
            .is_set(SystemHandlerControlAndState::SVCALLPENDED)
    }
}

/// Allow the core to go into deep sleep on WFI.
///
/// The specific definition of "deep sleep" is chip specific.
pub fn set_sleepdeep() {
    SCB.set_sleep_deep(true);
}

/// Do not allow the core to go into deep sleep on WFI.
///
/// The specific definition of "deep sleep" is chip specific.
pub fn unset_sleepdeep() {
    SCB.set_sleep_deep(false);
}

/// Software reset using the ARM System Control Block
pub fn reset() -> ! {
    SCB.system_reset()
}
