// Display module - windowed frontend
//
// Hosts the emulator in a winit window with a pixels surface. Everything in
// here is host plumbing; the core never depends on it.

mod window;

pub use window::{run_display, WindowConfig};
