// Mappers module - address-space translators between the buses and the
// cartridge banks
//
// A mapper sits between the CPU/PPU buses and the cartridge. It decodes
// bus addresses into PRG/CHR offsets and reacts to CPU writes by switching
// banks. `step()` is driven once per CPU cycle so scanline-counting mappers
// can be added later; the two mappers implemented here ignore it.

mod mapper0;
mod mapper2;

use super::Cartridge;
use crate::cartridge::Mirroring;
pub use mapper0::Mapper0;
pub use mapper2::Mapper2;

/// Interface every mapper implements
///
/// `cpu_read`/`cpu_write` see CPU bus addresses ($6000-$FFFF in practice);
/// `ppu_read`/`ppu_write` see PPU pattern-table addresses ($0000-$1FFF).
pub trait Mapper {
    /// Read a byte on behalf of the CPU bus
    fn cpu_read(&self, addr: u16) -> u8;

    /// Write a byte on behalf of the CPU bus (may switch banks)
    fn cpu_write(&mut self, addr: u16, value: u8);

    /// Read a pattern-table byte on behalf of the PPU bus
    fn ppu_read(&self, addr: u16) -> u8;

    /// Write a pattern-table byte on behalf of the PPU bus (CHR-RAM only)
    fn ppu_write(&mut self, addr: u16, value: u8);

    /// Advance the mapper by one CPU cycle
    ///
    /// NROM and UxROM have no time-dependent state; mappers with scanline
    /// counters hook in here.
    fn step(&mut self) {}

    /// Nametable mirroring selected by this mapper
    fn mirroring(&self) -> Mirroring;
}

/// Error type for mapper creation
#[derive(Debug)]
pub enum MapperError {
    /// The requested mapper number is not supported
    UnsupportedMapper(u8),
}

impl std::fmt::Display for MapperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapperError::UnsupportedMapper(num) => {
                write!(f, "mapper {} is not supported", num)
            }
        }
    }
}

impl std::error::Error for MapperError {}

/// Create a mapper instance for the given cartridge
///
/// The mapper number comes from the iNES header. Only NROM (0) and
/// UxROM (2) are implemented.
///
/// # Errors
///
/// Returns `MapperError::UnsupportedMapper` for any other mapper number.
pub fn create_mapper(cartridge: Cartridge) -> Result<Box<dyn Mapper>, MapperError> {
    match cartridge.mapper_id {
        0 => Ok(Box::new(Mapper0::new(cartridge))),
        2 => Ok(Box::new(Mapper2::new(cartridge))),
        mapper_id => Err(MapperError::UnsupportedMapper(mapper_id)),
    }
}
