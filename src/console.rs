// Console module - top-level glue between CPU, PPU, mapper and controllers
//
// The console drives everything: each step runs one CPU instruction, then
// advances the PPU three dots per CPU cycle and the mapper once per CPU
// cycle. NMIs latched by the PPU are handed to the CPU before its next
// instruction, and controller latches are refreshed from the host once per
// completed frame.

use crate::bus::Bus;
use crate::cartridge::{create_mapper, Cartridge, MapperError};
use crate::cpu::Cpu;
use crate::input::{Controller, ControllerInput};
use crate::ppu::FrameBuffer;
use std::cell::RefCell;
use std::rc::Rc;

/// NTSC CPU clock rate in Hz
pub const CPU_FREQ: f64 = 1_789_773.0;

/// The wired-together NES
pub struct Console {
    pub cpu: Cpu,
    pub bus: Bus,
}

impl Console {
    /// Create a console with no cartridge inserted
    pub fn new() -> Self {
        Console {
            cpu: Cpu::new(),
            bus: Bus::new(),
        }
    }

    /// Insert a cartridge and reset
    ///
    /// Builds the mapper for the cartridge, shares it between the CPU bus
    /// and the PPU, and resets both processors.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::UnsupportedMapper` when the cartridge needs a
    /// mapper this emulator does not implement.
    pub fn run(&mut self, cartridge: Cartridge) -> Result<(), MapperError> {
        let mapper = create_mapper(cartridge)?;
        self.bus.attach_mapper(Rc::new(RefCell::new(mapper)));
        self.bus.ppu.reset();
        self.cpu.reset(&mut self.bus);
        Ok(())
    }

    /// Run one CPU instruction and keep the PPU and mapper in lockstep
    ///
    /// Returns the CPU cycles consumed; the PPU advanced three dots per
    /// cycle before this returns.
    pub fn step(&mut self) -> u32 {
        if self.bus.ppu.take_nmi() {
            self.cpu.trigger_nmi();
        }

        let cpu_cycles = self.cpu.step(&mut self.bus);

        for _ in 0..cpu_cycles * 3 {
            if self.bus.ppu.step() {
                let frame = self.bus.ppu.frame_count();
                self.bus.flush_controllers(frame);
            }
        }
        for _ in 0..cpu_cycles {
            self.bus.step_mapper();
        }

        cpu_cycles
    }

    /// Run for a wall-clock interval at the NTSC clock rate
    pub fn step_seconds(&mut self, seconds: f64) {
        let mut cycles = (CPU_FREQ * seconds) as i64;
        while cycles > 0 {
            cycles -= self.step() as i64;
        }
    }

    /// The most recently completed frame, 256x240 RGBA
    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.bus.ppu.frame_buffer()
    }

    /// Attach the input source for controller 1
    pub fn set_controller1(&mut self, input: Box<dyn ControllerInput>) {
        self.bus.controller1.set_input(input);
    }

    /// Plug in controller 2 with the given input source
    pub fn set_controller2(&mut self, input: Box<dyn ControllerInput>) {
        let mut controller = Controller::new();
        controller.set_input(input);
        self.bus.controller2 = Some(controller);
    }

    /// Toggle per-instruction trace output on stdout
    pub fn set_trace(&mut self, enabled: bool) {
        self.cpu.trace = enabled;
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
