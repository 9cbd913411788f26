// Shared helpers for integration tests: in-memory iNES images and consoles
// wired to them

use nescore::{Cartridge, Console};

/// Build an iNES image in memory
///
/// `prg` must be a whole number of 16KB banks, `chr` a whole number of 8KB
/// banks (possibly empty for CHR-RAM boards).
pub fn build_ines(prg: &[u8], chr: &[u8], mapper_id: u8, vertical_mirroring: bool) -> Vec<u8> {
    assert!(prg.len() % (16 * 1024) == 0 && !prg.is_empty());
    assert!(chr.len() % (8 * 1024) == 0);

    let control1 = ((mapper_id & 0x0F) << 4) | vertical_mirroring as u8;
    let control2 = mapper_id & 0xF0;

    let mut data = vec![
        0x4E,
        0x45,
        0x53,
        0x1A,
        (prg.len() / (16 * 1024)) as u8,
        (chr.len() / (8 * 1024)) as u8,
        control1,
        control2,
    ];
    data.resize(16, 0);
    data.extend_from_slice(prg);
    data.extend_from_slice(chr);
    data
}

/// One 16KB NROM PRG bank holding `program` at $C000, with the RESET
/// vector pointing there, NMI at $C100 and IRQ at $C200
pub fn nrom_program_bank(program: &[u8]) -> Vec<u8> {
    let mut prg = vec![0u8; 16 * 1024];
    prg[..program.len()].copy_from_slice(program);
    prg[0x3FFA] = 0x00; // NMI   -> $C100
    prg[0x3FFB] = 0xC1;
    prg[0x3FFC] = 0x00; // RESET -> $C000
    prg[0x3FFD] = 0xC0;
    prg[0x3FFE] = 0x00; // IRQ   -> $C200
    prg[0x3FFF] = 0xC2;
    prg
}

/// Console running `program` from a synthetic NROM cartridge
pub fn console_with_program(program: &[u8]) -> Console {
    let prg = nrom_program_bank(program);
    let image = build_ines(&prg, &[0u8; 8 * 1024], 0, false);
    let cartridge = Cartridge::from_ines_bytes(&image).expect("synthetic ROM is valid");

    let mut console = Console::new();
    console.run(cartridge).expect("NROM is supported");
    console
}
