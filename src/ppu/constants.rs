// PPU timing and memory constants (NTSC)

/// Size of one nametable in bytes (1KB)
pub(super) const NAMETABLE_SIZE: usize = 1024;

/// Size of palette RAM in bytes
pub(super) const PALETTE_SIZE: usize = 32;

/// Size of OAM in bytes (64 sprites x 4 bytes)
pub(super) const OAM_SIZE: usize = 256;

/// Number of PPU dots per scanline
pub(super) const DOTS_PER_SCANLINE: u16 = 341;

/// Number of scanlines per frame
pub(super) const SCANLINES_PER_FRAME: u16 = 262;

/// Total dots per frame when no dot is skipped
#[allow(dead_code)]
pub(super) const DOTS_PER_FRAME: u32 = DOTS_PER_SCANLINE as u32 * SCANLINES_PER_FRAME as u32;

/// Last visible scanline
pub(super) const LAST_VISIBLE_SCANLINE: u16 = 239;

/// First VBlank scanline; VBlank is raised at dot 1 of this line
pub(super) const VBLANK_SCANLINE: u16 = 241;

/// Pre-render scanline (also written as scanline -1)
pub(super) const PRERENDER_SCANLINE: u16 = 261;
