//! The PPU's odd corners: palette read behavior, open bus, OAM wrap

use super::*;

#[test]
fn test_palette_reads_bypass_the_buffer() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    ppu.write_ppu_memory(0x3F07, 0x2C);

    set_address(&mut ppu, 0x3F07);
    assert_eq!(
        ppu.read_register(PPUDATA),
        0x2C,
        "palette reads return live data on the first read"
    );
}

#[test]
fn test_palette_read_refills_buffer_with_nametable_shadow() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    // The nametable byte "underneath" the palette region at $3F07 - $1000
    ppu.write_ppu_memory(0x2F07, 0x5A);
    ppu.write_ppu_memory(0x3F07, 0x2C);

    set_address(&mut ppu, 0x3F07);
    let _ = ppu.read_register(PPUDATA);
    assert_eq!(
        ppu.read_buffer, 0x5A,
        "buffer refills from the nametable shadow, not the palette"
    );
}

#[test]
fn test_status_open_bus_reflects_any_port_write() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    ppu.write_register(OAMADDR, 0x15);
    let status = ppu.read_register(PPUSTATUS);
    assert_eq!(status & 0x1F, 0x15);

    ppu.write_register(PPUSCROLL, 0x0B);
    let status = ppu.read_register(PPUSTATUS);
    assert_eq!(status & 0x1F, 0x0B);
}

#[test]
fn test_oam_dma_write_wraps_address() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    ppu.write_register(OAMADDR, 0xFF);
    ppu.write_oam_dma(0x11);
    ppu.write_oam_dma(0x22);

    assert_eq!(ppu.read_oam(0xFF), 0x11);
    assert_eq!(ppu.read_oam(0x00), 0x22, "DMA wraps past the end of OAM");
}

#[test]
fn test_v_masked_to_15_bits_on_increment() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    ppu.v = 0x7FFF;
    ppu.write_register(PPUDATA, 0x00);
    assert_eq!(ppu.v, 0x0000, "v wraps within 15 bits");

    set_address(&mut ppu, 0x3FFF);
    let _ = ppu.read_register(PPUDATA);
    assert_eq!(ppu.v, 0x4000, "bit 14 is part of v even though reads mask it");
}

#[test]
fn test_four_screen_falls_back_to_two_tables() {
    let mut ppu = test_ppu(Mirroring::FourScreen);

    // Only 2KB of VRAM exists; logical tables fold onto two physical ones
    ppu.write_ppu_memory(0x2005, 0x77);
    assert_eq!(ppu.read_ppu_memory(0x2805), 0x77);
}
