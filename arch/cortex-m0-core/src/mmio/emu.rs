// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Host backend for emulating the core peripherals in unit tests.
//!
//! Register cells call into this module instead of touching memory. Devices
//! are mapped over an address range (normally the real base address of the
//! block they stand in for) and service every load and store that lands in
//! it. The emulator also plays the CPU side: barrier and hint instructions
//! and special register moves are recorded, and special registers are kept
//! in a small register file.
//!
//! All state is per thread, so tests running in parallel each see their own
//! machine.

use std::boxed::Box;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::vec::Vec;

use super::AccessWidth;
use crate::registers::host::SpecialRegister;
use crate::support::host::Instruction;

/// A device that is controlled by reading or writing MMIO registers.
pub(crate) trait MmioDevice {
    /// Services a load of `width` at `offset` into the device.
    fn mmio_read(&mut self, offset: usize, width: AccessWidth) -> u32;
    /// Services a store of `value` with `width` at `offset` into the device.
    fn mmio_write(&mut self, offset: usize, width: AccessWidth, value: u32);
}

/// One observable step of the emulated machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BusEvent {
    Load {
        address: usize,
        width: AccessWidth,
        value: u32,
    },
    Store {
        address: usize,
        width: AccessWidth,
        value: u32,
    },
    Execute(Instruction),
    Mrs(SpecialRegister, u32),
    Msr(SpecialRegister, u32),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
struct MmioRegion {
    base: usize,
    size: usize,
}

impl MmioRegion {
    /// Returns true if there is overlap with the given range.
    fn overlaps(&self, base: usize, size: usize) -> bool {
        self.base < (base + size) && base < self.base + self.size
    }
}

/// Special register file of the emulated core.
#[derive(Default)]
struct CoreRegisters {
    xpsr: u32,
    primask: u32,
    control: u32,
    msp: u32,
    psp: u32,
    lr: u32,
}

const APSR_MASK: u32 = 0xF000_0000;
const IPSR_MASK: u32 = 0x0000_01FF;

impl CoreRegisters {
    /// Value returned by `MRS`. The `SYSm` encoding of the PSR views selects
    /// IPSR with bit 0 and APSR when bit 2 is clear; EPSR always reads as
    /// zero.
    fn read(&self, register: SpecialRegister) -> u32 {
        match register {
            SpecialRegister::Apsr | SpecialRegister::Eapsr => self.xpsr & APSR_MASK,
            SpecialRegister::Iapsr | SpecialRegister::Psr => {
                self.xpsr & (APSR_MASK | IPSR_MASK)
            }
            SpecialRegister::Ipsr | SpecialRegister::Iepsr => self.xpsr & IPSR_MASK,
            SpecialRegister::Epsr => 0,
            SpecialRegister::Msp => self.msp,
            SpecialRegister::Psp => self.psp,
            SpecialRegister::Primask => self.primask,
            SpecialRegister::Control => self.control,
            SpecialRegister::Lr => self.lr,
        }
    }

    /// Effect of `MSR`, with the bits ARMv6-M does not implement dropped.
    fn write(&mut self, register: SpecialRegister, value: u32) {
        match register {
            SpecialRegister::Msp => self.msp = value & !0b11,
            SpecialRegister::Psp => self.psp = value & !0b11,
            SpecialRegister::Primask => self.primask = value & 0b1,
            SpecialRegister::Control => self.control = value & 0b10,
            _ => panic!("mmio_emu: {:?} is not writable with MSR", register),
        }
    }

    /// Forces a register to `value`, the way hardware would on exception
    /// entry or reset.
    fn force(&mut self, register: SpecialRegister, value: u32) {
        match register {
            SpecialRegister::Apsr
            | SpecialRegister::Iapsr
            | SpecialRegister::Eapsr
            | SpecialRegister::Psr
            | SpecialRegister::Ipsr
            | SpecialRegister::Epsr
            | SpecialRegister::Iepsr => self.xpsr = value,
            SpecialRegister::Lr => self.lr = value,
            _ => self.write(register, value),
        }
    }
}

struct MmioEmu {
    devices: BTreeMap<MmioRegion, Rc<RefCell<dyn MmioDevice>>>,
    core: CoreRegisters,
    log: Vec<BusEvent>,
}

impl MmioEmu {
    fn new() -> Self {
        MmioEmu {
            devices: BTreeMap::new(),
            core: CoreRegisters::default(),
            log: Vec::new(),
        }
    }

    /// Gets the device associated with `addr`, if any, along with the offset
    /// of `addr` into its region.
    fn get_device(&self, addr: usize) -> Option<(usize, Rc<RefCell<dyn MmioDevice>>)> {
        let (range, dev) = self
            .devices
            .range(
                ..=MmioRegion {
                    base: addr,
                    size: usize::MAX,
                },
            )
            .next_back()?;
        let offset = addr - range.base;
        if offset < range.size {
            Some((offset, dev.clone()))
        } else {
            None
        }
    }
}

std::thread_local! {
    static MMIO_STATE: RefCell<MmioEmu> = RefCell::new(MmioEmu::new());
}

/// Unmaps every device, clears the log and zeroes the special registers.
pub(crate) fn reset() {
    MMIO_STATE.with(|state| *state.borrow_mut() = MmioEmu::new())
}

/// Maps `device` over `size` bytes starting at `base` and returns a handle
/// the test can use to inspect it.
///
/// # Panics
///
/// Panics if the region is empty or overlaps a device already mapped on
/// this thread.
pub(crate) fn map_device<D: MmioDevice + 'static>(
    base: usize,
    size: usize,
    device: D,
) -> Rc<RefCell<D>> {
    assert!(size != 0, "mmio_emu: region at {:#x} is zero-sized", base);
    let device = Rc::new(RefCell::new(device));
    MMIO_STATE.with(|state| {
        let mut state = state.borrow_mut();
        assert!(
            !state
                .devices
                .keys()
                .any(|region| region.overlaps(base, size)),
            "mmio_emu: region {:#x}+{:#x} overlaps an existing device",
            base,
            size
        );
        let mapped: Rc<RefCell<dyn MmioDevice>> = device.clone();
        state.devices.insert(MmioRegion { base, size }, mapped);
    });
    device
}

/// Load from the device that owns `addr`.
///
/// # Panics
///
/// Panics if no device is mapped at `addr`.
pub(crate) fn load(addr: usize, width: AccessWidth) -> u32 {
    MMIO_STATE.with(|state| {
        let mut state = state.borrow_mut();
        let (offset, dev) = state
            .get_device(addr)
            .expect("mmio_emu: read: no device for address");
        let value = dev.borrow_mut().mmio_read(offset, width);
        state.log.push(BusEvent::Load {
            address: addr,
            width,
            value,
        });
        value
    })
}

/// Store to the device that owns `addr`.
///
/// # Panics
///
/// Panics if no device is mapped at `addr`.
pub(crate) fn store(addr: usize, width: AccessWidth, value: u32) {
    MMIO_STATE.with(|state| {
        let mut state = state.borrow_mut();
        let (offset, dev) = state
            .get_device(addr)
            .expect("mmio_emu: write: no device for address");
        dev.borrow_mut().mmio_write(offset, width, value);
        state.log.push(BusEvent::Store {
            address: addr,
            width,
            value,
        });
    })
}

/// Records execution of a barrier or hint instruction.
pub(crate) fn execute(instruction: Instruction) {
    MMIO_STATE.with(|state| state.borrow_mut().log.push(BusEvent::Execute(instruction)))
}

/// `MRS` from the emulated special register file.
pub(crate) fn mrs(register: SpecialRegister) -> u32 {
    MMIO_STATE.with(|state| {
        let mut state = state.borrow_mut();
        let value = state.core.read(register);
        state.log.push(BusEvent::Mrs(register, value));
        value
    })
}

/// `MSR` into the emulated special register file.
pub(crate) fn msr(register: SpecialRegister, value: u32) {
    MMIO_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.core.write(register, value);
        state.log.push(BusEvent::Msr(register, value));
    })
}

/// Sets a special register without logging, e.g. to stage the PSR an
/// exception handler would observe.
pub(crate) fn force_special(register: SpecialRegister, value: u32) {
    MMIO_STATE.with(|state| state.borrow_mut().core.force(register, value))
}

/// Drains the event log.
pub(crate) fn take_log() -> Vec<BusEvent> {
    MMIO_STATE.with(|state| core::mem::take(&mut state.borrow_mut().log))
}

/// Stores recorded in `log`, as `(address, width, value)`.
pub(crate) fn stores(log: &[BusEvent]) -> Vec<(usize, AccessWidth, u32)> {
    log.iter()
        .filter_map(|event| match *event {
            BusEvent::Store {
                address,
                width,
                value,
            } => Some((address, width, value)),
            _ => None,
        })
        .collect()
}

/// Plain little-endian backing store for device models.
pub(crate) struct RegisterFile {
    bytes: Box<[u8]>,
}

impl RegisterFile {
    pub(crate) fn new(size: usize) -> Self {
        RegisterFile {
            bytes: vec![0; size].into_boxed_slice(),
        }
    }

    pub(crate) fn read(&self, offset: usize, width: AccessWidth) -> u32 {
        match width {
            AccessWidth::U8 => self.bytes[offset] as u32,
            AccessWidth::U16 => {
                u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]]) as u32
            }
            AccessWidth::U32 => self.word(offset),
        }
    }

    pub(crate) fn write(&mut self, offset: usize, width: AccessWidth, value: u32) {
        match width {
            AccessWidth::U8 => self.bytes[offset] = value as u8,
            AccessWidth::U16 => {
                self.bytes[offset..offset + 2].copy_from_slice(&(value as u16).to_le_bytes())
            }
            AccessWidth::U32 => self.set_word(offset, value),
        }
    }

    pub(crate) fn word(&self, offset: usize) -> u32 {
        let mut word = [0; 4];
        word.copy_from_slice(&self.bytes[offset..offset + 4]);
        u32::from_le_bytes(word)
    }

    pub(crate) fn set_word(&mut self, offset: usize, value: u32) {
        self.bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn byte(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }
}

impl MmioDevice for RegisterFile {
    fn mmio_read(&mut self, offset: usize, width: AccessWidth) -> u32 {
        self.read(offset, width)
    }

    fn mmio_write(&mut self, offset: usize, width: AccessWidth, value: u32) {
        self.write(offset, width, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_accesses_by_address() {
        reset();
        let first = map_device(0x1000, 0x10, RegisterFile::new(0x10));
        let second = map_device(0x2000, 0x10, RegisterFile::new(0x10));

        store(0x1004, AccessWidth::U32, 0xdead_beef);
        store(0x2001, AccessWidth::U8, 0x5a);

        assert_eq!(first.borrow().word(4), 0xdead_beef);
        assert_eq!(second.borrow().byte(1), 0x5a);
        assert_eq!(second.borrow().word(0), 0x0000_5a00);
        assert_eq!(load(0x1006, AccessWidth::U16), 0xdead);

        let log = take_log();
        assert_eq!(log.len(), 3);
        assert_eq!(
            stores(&log),
            [
                (0x1004, AccessWidth::U32, 0xdead_beef),
                (0x2001, AccessWidth::U8, 0x5a)
            ]
        );
        assert!(take_log().is_empty());
    }

    #[test]
    #[should_panic(expected = "overlaps")]
    fn rejects_overlapping_regions() {
        reset();
        map_device(0x1000, 0x10, RegisterFile::new(0x10));
        map_device(0x100c, 0x10, RegisterFile::new(0x10));
    }

    #[test]
    #[should_panic(expected = "no device")]
    fn unmapped_load_panics() {
        reset();
        map_device(0x1000, 0x10, RegisterFile::new(0x10));
        load(0x1010, AccessWidth::U32);
    }

    #[test]
    fn psr_views_follow_sysm_encoding() {
        reset();
        force_special(SpecialRegister::Psr, 0xA100_0023);

        assert_eq!(mrs(SpecialRegister::Apsr), 0xA000_0000);
        assert_eq!(mrs(SpecialRegister::Eapsr), 0xA000_0000);
        assert_eq!(mrs(SpecialRegister::Iapsr), 0xA000_0023);
        assert_eq!(mrs(SpecialRegister::Psr), 0xA000_0023);
        assert_eq!(mrs(SpecialRegister::Ipsr), 0x23);
        assert_eq!(mrs(SpecialRegister::Iepsr), 0x23);
        assert_eq!(mrs(SpecialRegister::Epsr), 0);
    }

    #[test]
    fn msr_drops_unimplemented_bits() {
        reset();
        msr(SpecialRegister::Primask, 0xffff_ffff);
        msr(SpecialRegister::Control, 0xffff_ffff);
        msr(SpecialRegister::Msp, 0x2000_1003);

        assert_eq!(mrs(SpecialRegister::Primask), 1);
        assert_eq!(mrs(SpecialRegister::Control), 0b10);
        assert_eq!(mrs(SpecialRegister::Msp), 0x2000_1000);
    }
}
