//! PPU address space: pattern tables, nametable mirroring, palette RAM

use super::*;

#[test]
fn test_pattern_table_reads_reach_chr() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    ppu.write_ppu_memory(0x0000, 0x42);
    ppu.write_ppu_memory(0x1FFF, 0x99);
    assert_eq!(ppu.read_ppu_memory(0x0000), 0x42);
    assert_eq!(ppu.read_ppu_memory(0x1FFF), 0x99);
}

#[test]
fn test_horizontal_mirroring() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    // Tables {0,0,1,1}: $2000=$2400, $2800=$2C00
    ppu.write_ppu_memory(0x2005, 0x11);
    assert_eq!(ppu.read_ppu_memory(0x2405), 0x11);

    ppu.write_ppu_memory(0x2805, 0x22);
    assert_eq!(ppu.read_ppu_memory(0x2C05), 0x22);
    assert_eq!(ppu.read_ppu_memory(0x2005), 0x11, "top pair is distinct");
}

#[test]
fn test_vertical_mirroring() {
    let mut ppu = test_ppu(Mirroring::Vertical);

    // Tables {0,1,0,1}: $2000=$2800, $2400=$2C00
    ppu.write_ppu_memory(0x2005, 0x11);
    assert_eq!(ppu.read_ppu_memory(0x2805), 0x11);

    ppu.write_ppu_memory(0x2405, 0x22);
    assert_eq!(ppu.read_ppu_memory(0x2C05), 0x22);
}

#[test]
fn test_single_screen_mirroring() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    ppu.mirroring = Mirroring::SingleLower;
    ppu.write_ppu_memory(0x2005, 0x33);
    for base in [0x2005u16, 0x2405, 0x2805, 0x2C05] {
        assert_eq!(ppu.read_ppu_memory(base), 0x33);
    }

    ppu.mirroring = Mirroring::SingleUpper;
    ppu.write_ppu_memory(0x2005, 0x44);
    assert_eq!(ppu.read_ppu_memory(0x2C05), 0x44);
    assert_eq!(
        ppu.nametables[1024 + 5],
        0x44,
        "single-upper writes land in the second physical table"
    );
}

#[test]
fn test_nametable_mirror_region() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    // $3000-$3EFF mirrors $2000-$2EFF
    ppu.write_ppu_memory(0x2123, 0x55);
    assert_eq!(ppu.read_ppu_memory(0x3123), 0x55);
}

#[test]
fn test_palette_write_read() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    ppu.write_ppu_memory(0x3F00, 0x0F);
    ppu.write_ppu_memory(0x3F1F, 0x30);
    assert_eq!(ppu.read_ppu_memory(0x3F00), 0x0F);
    assert_eq!(ppu.read_ppu_memory(0x3F1F), 0x30);
}

#[test]
fn test_palette_aliases() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    // $3F10/$14/$18/$1C alias $3F00/$04/$08/$0C in both directions
    ppu.write_ppu_memory(0x3F10, 0x21);
    assert_eq!(ppu.read_ppu_memory(0x3F00), 0x21);

    ppu.write_ppu_memory(0x3F04, 0x22);
    assert_eq!(ppu.read_ppu_memory(0x3F14), 0x22);
}

#[test]
fn test_palette_region_mirrors_every_32_bytes() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    ppu.write_ppu_memory(0x3F01, 0x17);
    assert_eq!(ppu.read_ppu_memory(0x3F21), 0x17);
    assert_eq!(ppu.read_ppu_memory(0x3FE1), 0x17);
}

#[test]
fn test_addresses_masked_to_14_bits() {
    let mut ppu = test_ppu(Mirroring::Horizontal);

    ppu.write_ppu_memory(0x2005, 0x66);
    assert_eq!(ppu.read_ppu_memory(0x6005), 0x66, "bit 14 is ignored");
}
