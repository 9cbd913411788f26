// CPU execution loop and trace logging

use crate::bus::Bus;
use crate::cpu::addressing::{AddressingMode, AddressingResult};
use crate::cpu::opcodes::{OpcodeInfo, OPCODE_TABLE};
use crate::cpu::{Cpu, Interrupt};

impl Cpu {
    /// Execute one CPU step and return the cycles consumed
    ///
    /// In order:
    /// 1. While an OAM DMA stall is active, burn one cycle per call.
    /// 2. Service a latched NMI/IRQ (7 cycles).
    /// 3. Fetch, decode through the opcode table, compute the effective
    ///    address, execute, and account base plus penalty cycles.
    pub fn step(&mut self, bus: &mut Bus) -> u32 {
        // A $4014 write during the previous instruction requests a DMA
        // stall; one extra cycle when the transfer starts on an odd cycle.
        if self.stall == 0 && bus.take_oam_dma() {
            self.stall = 513 + (self.cycles & 1) as u32;
        }
        if self.stall > 0 {
            self.stall -= 1;
            return 1;
        }

        let start_cycles = self.cycles;

        match self.pending {
            Interrupt::Nmi => self.interrupt_nmi(bus),
            Interrupt::Irq => self.interrupt_irq(bus),
            Interrupt::None => {}
        }
        self.pending = Interrupt::None;

        if self.trace {
            println!("{}", self.trace_line(bus));
        }

        // Fetch and decode
        let opcode = bus.read(self.pc);
        let info = &OPCODE_TABLE[opcode as usize];
        self.pc = self.pc.wrapping_add(1);

        // The addressing method consumes the operand bytes
        let r = match info.mode {
            AddressingMode::Implied => self.addr_implied(),
            AddressingMode::Accumulator => self.addr_accumulator(),
            AddressingMode::Immediate => self.addr_immediate(bus),
            AddressingMode::ZeroPage => self.addr_zero_page(bus),
            AddressingMode::ZeroPageX => self.addr_zero_page_x(bus),
            AddressingMode::ZeroPageY => self.addr_zero_page_y(bus),
            AddressingMode::Relative => self.addr_relative(bus),
            AddressingMode::Absolute => self.addr_absolute(bus),
            AddressingMode::AbsoluteX => self.addr_absolute_x(bus),
            AddressingMode::AbsoluteY => self.addr_absolute_y(bus),
            AddressingMode::Indirect => self.addr_indirect(bus),
            AddressingMode::IndexedIndirect => self.addr_indexed_indirect(bus),
            AddressingMode::IndirectIndexed => self.addr_indirect_indexed(bus),
        };

        let extra = self.execute_instruction(opcode, &r, bus);

        let mut cycles = info.cycles as u64;
        // Branch targets account for their page penalty in the handler
        if info.page_cycle && r.page_crossed && info.mode != AddressingMode::Relative {
            cycles += 1;
        }
        cycles += extra as u64;
        self.cycles = self.cycles.wrapping_add(cycles);

        (self.cycles - start_cycles) as u32
    }

    /// Dispatch one opcode to its handler
    ///
    /// Returns extra cycles consumed by taken branches. Opcode bytes with no
    /// official instruction fall through to the empty arm and behave as NOPs
    /// (their operand bytes were already consumed by the addressing step).
    fn execute_instruction(&mut self, opcode: u8, r: &AddressingResult, bus: &mut Bus) -> u8 {
        match opcode {
            // Load/Store
            0xA9 | 0xA5 | 0xB5 | 0xAD | 0xBD | 0xB9 | 0xA1 | 0xB1 => self.lda(bus, r),
            0xA2 | 0xA6 | 0xB6 | 0xAE | 0xBE => self.ldx(bus, r),
            0xA0 | 0xA4 | 0xB4 | 0xAC | 0xBC => self.ldy(bus, r),
            0x85 | 0x95 | 0x8D | 0x9D | 0x99 | 0x81 | 0x91 => self.sta(bus, r),
            0x86 | 0x96 | 0x8E => self.stx(bus, r),
            0x84 | 0x94 | 0x8C => self.sty(bus, r),

            // Arithmetic
            0x69 | 0x65 | 0x75 | 0x6D | 0x7D | 0x79 | 0x61 | 0x71 => self.adc(bus, r),
            0xE9 | 0xE5 | 0xF5 | 0xED | 0xFD | 0xF9 | 0xE1 | 0xF1 => self.sbc(bus, r),
            0xE6 | 0xF6 | 0xEE | 0xFE => self.inc(bus, r),
            0xC6 | 0xD6 | 0xCE | 0xDE => self.dec(bus, r),
            0xE8 => self.inx(),
            0xC8 => self.iny(),
            0xCA => self.dex(),
            0x88 => self.dey(),

            // Logical
            0x29 | 0x25 | 0x35 | 0x2D | 0x3D | 0x39 | 0x21 | 0x31 => self.and(bus, r),
            0x09 | 0x05 | 0x15 | 0x0D | 0x1D | 0x19 | 0x01 | 0x11 => self.ora(bus, r),
            0x49 | 0x45 | 0x55 | 0x4D | 0x5D | 0x59 | 0x41 | 0x51 => self.eor(bus, r),
            0x24 | 0x2C => self.bit(bus, r),

            // Shifts/Rotates
            0x0A => self.asl(bus, r, true),
            0x06 | 0x16 | 0x0E | 0x1E => self.asl(bus, r, false),
            0x4A => self.lsr(bus, r, true),
            0x46 | 0x56 | 0x4E | 0x5E => self.lsr(bus, r, false),
            0x2A => self.rol(bus, r, true),
            0x26 | 0x36 | 0x2E | 0x3E => self.rol(bus, r, false),
            0x6A => self.ror(bus, r, true),
            0x66 | 0x76 | 0x6E | 0x7E => self.ror(bus, r, false),

            // Comparisons
            0xC9 | 0xC5 | 0xD5 | 0xCD | 0xDD | 0xD9 | 0xC1 | 0xD1 => self.cmp(bus, r),
            0xE0 | 0xE4 | 0xEC => self.cpx(bus, r),
            0xC0 | 0xC4 | 0xCC => self.cpy(bus, r),

            // Branches (return extra cycles)
            0x90 => return self.bcc(r),
            0xB0 => return self.bcs(r),
            0xF0 => return self.beq(r),
            0xD0 => return self.bne(r),
            0x30 => return self.bmi(r),
            0x10 => return self.bpl(r),
            0x50 => return self.bvc(r),
            0x70 => return self.bvs(r),

            // Jumps/Subroutines
            0x4C | 0x6C => self.jmp(r),
            0x20 => self.jsr(bus, r),
            0x60 => self.rts(bus),

            // Stack
            0x48 => self.pha(bus),
            0x68 => self.pla(bus),
            0x08 => self.php(bus),
            0x28 => self.plp(bus),

            // Transfers
            0xAA => self.tax(),
            0xA8 => self.tay(),
            0x8A => self.txa(),
            0x98 => self.tya(),
            0xBA => self.tsx(),
            0x9A => self.txs(),

            // Flags
            0x18 => self.clc(),
            0x38 => self.sec(),
            0x58 => self.cli(),
            0x78 => self.sei(),
            0xD8 => self.cld(),
            0xF8 => self.sed(),
            0xB8 => self.clv(),

            // Miscellaneous
            0x00 => self.brk(bus),
            0x40 => self.rti(bus),
            0xEA => self.nop(),

            // Unofficial opcodes execute as NOPs
            _ => {}
        }
        0
    }

    /// Format a Nintendulator-style trace line for the instruction at PC
    ///
    /// ```text
    /// C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7
    /// ```
    pub fn trace_line(&self, bus: &mut Bus) -> String {
        let pc = self.pc;
        let opcode = bus.read(pc);
        let info = &OPCODE_TABLE[opcode as usize];

        let byte2 = if info.bytes >= 2 {
            bus.read(pc.wrapping_add(1))
        } else {
            0
        };
        let byte3 = if info.bytes >= 3 {
            bus.read(pc.wrapping_add(2))
        } else {
            0
        };

        let hex_bytes = match info.bytes {
            2 => format!("{:02X} {:02X}   ", opcode, byte2),
            3 => format!("{:02X} {:02X} {:02X}", opcode, byte2, byte3),
            _ => format!("{:02X}      ", opcode),
        };

        let disassembly = self.disassemble(pc, bus, info, byte2, byte3);

        format!(
            "{:04X}  {}  {:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, hex_bytes, disassembly, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }

    /// Disassemble one instruction, resolving the operand the way
    /// Nintendulator does (current register state, memory contents shown)
    fn disassemble(
        &self,
        pc: u16,
        bus: &mut Bus,
        info: &OpcodeInfo,
        byte2: u8,
        byte3: u8,
    ) -> String {
        let mnemonic = info.mnemonic;

        match info.mode {
            AddressingMode::Implied => mnemonic.to_string(),
            AddressingMode::Accumulator => format!("{} A", mnemonic),
            AddressingMode::Immediate => format!("{} #${:02X}", mnemonic, byte2),
            AddressingMode::ZeroPage => {
                let value = bus.read(byte2 as u16);
                format!("{} ${:02X} = {:02X}", mnemonic, byte2, value)
            }
            AddressingMode::ZeroPageX => {
                let addr = byte2.wrapping_add(self.x);
                let value = bus.read(addr as u16);
                format!("{} ${:02X},X @ {:02X} = {:02X}", mnemonic, byte2, addr, value)
            }
            AddressingMode::ZeroPageY => {
                let addr = byte2.wrapping_add(self.y);
                let value = bus.read(addr as u16);
                format!("{} ${:02X},Y @ {:02X} = {:02X}", mnemonic, byte2, addr, value)
            }
            AddressingMode::Relative => {
                let offset = byte2 as i8;
                let base = pc.wrapping_add(2);
                let target = if offset >= 0 {
                    base.wrapping_add(offset as u16)
                } else {
                    base.wrapping_sub((-(offset as i16)) as u16)
                };
                format!("{} ${:04X}", mnemonic, target)
            }
            AddressingMode::Absolute => {
                let addr = u16::from_le_bytes([byte2, byte3]);
                if mnemonic == "JMP" || mnemonic == "JSR" {
                    format!("{} ${:04X}", mnemonic, addr)
                } else {
                    let value = bus.read(addr);
                    format!("{} ${:04X} = {:02X}", mnemonic, addr, value)
                }
            }
            AddressingMode::AbsoluteX => {
                let base = u16::from_le_bytes([byte2, byte3]);
                let addr = base.wrapping_add(self.x as u16);
                let value = bus.read(addr);
                format!("{} ${:04X},X @ {:04X} = {:02X}", mnemonic, base, addr, value)
            }
            AddressingMode::AbsoluteY => {
                let base = u16::from_le_bytes([byte2, byte3]);
                let addr = base.wrapping_add(self.y as u16);
                let value = bus.read(addr);
                format!("{} ${:04X},Y @ {:04X} = {:02X}", mnemonic, base, addr, value)
            }
            AddressingMode::Indirect => {
                let ptr = u16::from_le_bytes([byte2, byte3]);
                let lo = bus.read(ptr);
                let hi_addr = (ptr & 0xFF00) | (ptr as u8).wrapping_add(1) as u16;
                let hi = bus.read(hi_addr);
                let target = u16::from_le_bytes([lo, hi]);
                format!("{} (${:04X}) = {:04X}", mnemonic, ptr, target)
            }
            AddressingMode::IndexedIndirect => {
                let ptr = byte2.wrapping_add(self.x);
                let lo = bus.read(ptr as u16);
                let hi = bus.read(ptr.wrapping_add(1) as u16);
                let addr = u16::from_le_bytes([lo, hi]);
                let value = bus.read(addr);
                format!(
                    "{} (${:02X},X) @ {:02X} = {:04X} = {:02X}",
                    mnemonic, byte2, ptr, addr, value
                )
            }
            AddressingMode::IndirectIndexed => {
                let lo = bus.read(byte2 as u16);
                let hi = bus.read(byte2.wrapping_add(1) as u16);
                let base = u16::from_le_bytes([lo, hi]);
                let addr = base.wrapping_add(self.y as u16);
                let value = bus.read(addr);
                format!(
                    "{} (${:02X}),Y = {:04X} @ {:04X} = {:02X}",
                    mnemonic, byte2, base, addr, value
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::testing::bus_with_program;
    use crate::cpu::{Cpu, Interrupt};

    #[test]
    fn test_lda_immediate_step() {
        // Program at $C000: LDA #$42
        let mut bus = bus_with_program(&[0xA9, 0x42]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        let cycles_before = cpu.cycles;

        let cycles = cpu.step(&mut bus);

        assert_eq!(cpu.a, 0x42);
        assert!(!cpu.get_zero());
        assert!(!cpu.get_negative());
        assert_eq!(cpu.pc, 0xC002);
        assert_eq!(cycles, 2);
        assert_eq!(cpu.cycles, cycles_before + 2);
    }

    #[test]
    fn test_page_cross_penalty() {
        // LDA $C0FF,X with X=1 crosses into $C100: 4 + 1 cycles
        let mut bus = bus_with_program(&[0xBD, 0xFF, 0xC0]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.x = 1;

        assert_eq!(cpu.step(&mut bus), 5);
    }

    #[test]
    fn test_store_has_no_page_cross_penalty() {
        // STA $00FF,X with X=1: always 5 cycles
        let mut bus = bus_with_program(&[0x9D, 0xFF, 0x00]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.x = 1;
        cpu.a = 0x77;

        assert_eq!(cpu.step(&mut bus), 5);
        assert_eq!(bus.read(0x0100), 0x77);
    }

    #[test]
    fn test_branch_taken_cycles() {
        // BNE +2 with Z clear: 2 base + 1 taken
        let mut bus = bus_with_program(&[0xD0, 0x02]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.set_zero(false);

        assert_eq!(cpu.step(&mut bus), 3);
        assert_eq!(cpu.pc, 0xC004);
    }

    #[test]
    fn test_branch_not_taken_cycles() {
        let mut bus = bus_with_program(&[0xD0, 0x02]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.set_zero(true);

        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.pc, 0xC002);
    }

    #[test]
    fn test_pending_nmi_serviced_before_instruction() {
        let mut bus = bus_with_program(&[0xA9, 0x42]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.trigger_nmi();

        let cycles = cpu.step(&mut bus);

        // 7 interrupt cycles plus the handler's first instruction
        assert!(cycles >= 7);
        assert_eq!(cpu.pending, Interrupt::None);
    }

    #[test]
    fn test_illegal_opcode_behaves_as_nop() {
        // $04 is an unofficial zero-page NOP: 2 bytes, 3 cycles
        let mut bus = bus_with_program(&[0x04, 0x10]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        let cycles = cpu.step(&mut bus);
        assert_eq!(cycles, 3);
        assert_eq!(cpu.pc, 0xC002);
    }

    #[test]
    fn test_brk_jumps_through_irq_vector() {
        let mut bus = bus_with_program(&[0x00]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        let cycles = cpu.step(&mut bus);
        assert_eq!(cycles, 7);
        assert_eq!(cpu.pc, bus.read_u16(0xFFFE));
        assert!(cpu.get_interrupt_disable());
    }

    #[test]
    fn test_trace_line_format() {
        // JMP $C5F5 at $C000
        let mut bus = bus_with_program(&[0x4C, 0xF5, 0xC5]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        let line = cpu.trace_line(&mut bus);
        assert!(
            line.starts_with("C000  4C F5 C5  JMP $C5F5"),
            "unexpected trace line: {}",
            line
        );
        assert!(line.contains("A:00 X:00 Y:00 P:24 SP:FD CYC:7"));
    }
}
