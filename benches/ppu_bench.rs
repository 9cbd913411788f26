// PPU benchmarks - dot stepping and whole-frame rendering throughput

use criterion::{criterion_group, criterion_main, Criterion};
use nescore::{Cartridge, Console};
use std::hint::black_box;

/// Console with background and sprite rendering enabled
fn rendering_console() -> Console {
    let mut prg = vec![0u8; 16 * 1024];
    prg[0x3FFC] = 0x00; // RESET -> $C000
    prg[0x3FFD] = 0xC0;
    prg[0] = 0x4C; // JMP $C000 spin
    prg[1] = 0x00;
    prg[2] = 0xC0;

    let mut image = vec![0x4E, 0x45, 0x53, 0x1A, 1, 1, 0, 0];
    image.resize(16, 0);
    image.extend_from_slice(&prg);
    image.extend_from_slice(&[0x55u8; 8 * 1024]); // busy CHR patterns

    let cartridge = Cartridge::from_ines_bytes(&image).unwrap();
    let mut console = Console::new();
    console.run(cartridge).unwrap();

    console.bus.write(0x2001, 0x1E); // background + sprites + left columns
    console
}

fn bench_ppu_stepping(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu");

    group.bench_function("dot", |b| {
        let mut console = rendering_console();
        b.iter(|| black_box(console.bus.ppu.step()));
    });

    group.bench_function("scanline", |b| {
        let mut console = rendering_console();
        b.iter(|| {
            for _ in 0..341 {
                console.bus.ppu.step();
            }
        });
    });

    group.bench_function("full_frame", |b| {
        let mut console = rendering_console();
        b.iter(|| {
            while !console.bus.ppu.step() {}
        });
    });

    group.finish();
}

fn bench_register_ports(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_registers");

    group.bench_function("status_read", |b| {
        let mut console = rendering_console();
        b.iter(|| black_box(console.bus.read(0x2002)));
    });

    group.bench_function("data_write", |b| {
        let mut console = rendering_console();
        console.bus.read(0x2002);
        console.bus.write(0x2006, 0x20);
        console.bus.write(0x2006, 0x00);
        b.iter(|| console.bus.write(0x2007, black_box(0x42)));
    });

    group.finish();
}

criterion_group!(benches, bench_ppu_stepping, bench_register_ports);
criterion_main!(benches);
