// nescore - NES emulator core
//
// Cycle-coordinated emulation of the 2A03 CPU and 2C02 PPU with their
// shared buses, NROM/UxROM mappers, and the controller latch, plus a thin
// winit/pixels frontend.

// Public modules
pub mod bus;
pub mod cartridge;
pub mod console;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod input;
pub mod ppu;

// Re-export main types for convenience
pub use bus::Bus;
pub use cartridge::{create_mapper, Cartridge, INesError, Mapper, MapperError, Mirroring};
pub use console::{Console, CPU_FREQ};
pub use cpu::Cpu;
pub use display::{run_display, WindowConfig};
pub use emulator::{Emulator, EmulatorConfig, LoadError};
pub use input::{Button, Controller, ControllerInput};
pub use ppu::{FrameBuffer, Ppu};
