// Emulator module - application-level coordinator
//
// Wraps the console with the quality-of-life pieces a frontend needs:
// configuration, ROM loading with a recent-ROMs list, pause state, and
// screenshots. The display layer drives this instead of the raw console.

mod config;
mod recent_roms;
mod screenshot;

pub use config::{EmulatorConfig, ScreenshotConfig, VideoConfig};
pub use recent_roms::{RecentRomEntry, RecentRomsList};
pub use screenshot::{save_screenshot, ScreenshotError};

use crate::cartridge::{Cartridge, INesError, MapperError};
use crate::console::Console;
use crate::input::ControllerInput;
use crate::ppu::FrameBuffer;
use std::path::{Path, PathBuf};

/// Why a ROM could not be started
#[derive(Debug)]
pub enum LoadError {
    /// The file is not a usable iNES image
    Rom(INesError),

    /// The image needs a mapper this emulator does not implement
    Mapper(MapperError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Rom(e) => write!(f, "{}", e),
            LoadError::Mapper(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<INesError> for LoadError {
    fn from(e: INesError) -> Self {
        LoadError::Rom(e)
    }
}

impl From<MapperError> for LoadError {
    fn from(e: MapperError) -> Self {
        LoadError::Mapper(e)
    }
}

/// Console plus host-side state
pub struct Emulator {
    console: Console,
    config: EmulatorConfig,
    rom_path: Option<PathBuf>,
    paused: bool,
}

impl Emulator {
    /// Create an emulator with configuration loaded from disk
    pub fn new() -> Self {
        Emulator {
            console: Console::new(),
            config: EmulatorConfig::load_or_default(),
            rom_path: None,
            paused: false,
        }
    }

    /// Load an iNES file and start it
    ///
    /// On success the ROM lands at the top of the recent-ROMs list.
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        let cartridge = Cartridge::from_ines_file(path)?;
        self.console.run(cartridge)?;
        self.rom_path = Some(path.to_path_buf());
        self.paused = false;

        let mut recent = RecentRomsList::load_or_default();
        recent.add(path);
        // A read-only working directory should not stop the game
        let _ = recent.save();

        Ok(())
    }

    /// Advance emulation by a wall-clock interval, unless paused
    pub fn step_seconds(&mut self, seconds: f64) {
        if !self.paused {
            self.console.step_seconds(seconds);
        }
    }

    /// The most recently completed frame
    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.console.frame_buffer()
    }

    /// Attach the input source for controller 1
    pub fn set_controller1(&mut self, input: Box<dyn ControllerInput>) {
        self.console.set_controller1(input);
    }

    /// Attach the input source for controller 2
    pub fn set_controller2(&mut self, input: Box<dyn ControllerInput>) {
        self.console.set_controller2(input);
    }

    /// Toggle per-instruction trace output
    pub fn set_trace(&mut self, enabled: bool) {
        self.console.set_trace(enabled);
    }

    /// Write the current frame to a PNG
    pub fn screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        save_screenshot(
            self.console.frame_buffer(),
            &self.config.screenshot.directory,
            self.rom_path.as_deref(),
        )
    }

    /// Toggle the pause state
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Whether emulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The active configuration
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Mutable access to the configuration (CLI overrides)
    pub fn config_mut(&mut self) -> &mut EmulatorConfig {
        &mut self.config
    }

    /// The loaded ROM's path, if any
    pub fn rom_path(&self) -> Option<&Path> {
        self.rom_path.as_deref()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
