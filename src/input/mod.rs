// Input module - the controller shift-register latch
//
// The standard NES controller is an 8-bit parallel-in/serial-out shift
// register. The CPU strobes $4016 to latch the current button state, then
// reads one bit per access. Reads past the eighth bit return 1.
//
// # Reading sequence
//
// 1. Write $01 to $4016 (strobe high: the latch tracks the live buttons)
// 2. Write $00 to $4016 (strobe low: the latch freezes)
// 3. Read $4016 eight times, one button per read, bit 0 = pressed
//
// Button order: A, B, Select, Start, Up, Down, Left, Right.

pub mod keyboard;

pub use keyboard::{KeyboardController, KeyboardHandler, KeyboardMapping, Player};

/// Controller button indexes, in shift-register order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A = 0,
    B = 1,
    Select = 2,
    Start = 3,
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,
}

/// Snapshot of all eight buttons, indexed by `Button`
pub type ButtonState = [bool; 8];

/// Host-side input source feeding a controller latch
///
/// `flush` is called once per completed frame with the frame counter, and
/// returns the current button snapshot; implementations may use the counter
/// for effects like turbo fire.
pub trait ControllerInput {
    fn flush(&mut self, frame_counter: u64) -> ButtonState;
}

/// One controller port: button latch plus shift index
pub struct Controller {
    /// Latched button state
    buttons: ButtonState,
    /// Next bit to shift out (0-8)
    index: u8,
    /// Strobe line: while high the latch keeps reloading
    strobe: bool,
    /// Host input source, if any
    input: Option<Box<dyn ControllerInput>>,
}

impl Controller {
    /// Create a controller with no input source and all buttons released
    pub fn new() -> Self {
        Controller {
            buttons: [false; 8],
            index: 0,
            strobe: false,
            input: None,
        }
    }

    /// Attach the host input source
    pub fn set_input(&mut self, input: Box<dyn ControllerInput>) {
        self.input = Some(input);
    }

    /// Overwrite the latched buttons directly (tests, replay input)
    pub fn set_buttons(&mut self, buttons: ButtonState) {
        self.buttons = buttons;
    }

    /// Refresh the latched buttons from the input source and reset the
    /// shift index; invoked by the console once per frame
    pub fn flush(&mut self, frame_counter: u64) {
        if let Some(input) = self.input.as_mut() {
            self.buttons = input.flush(frame_counter);
        }
        self.index = 0;
    }

    /// $4016 write: bit 0 drives the strobe line
    ///
    /// While the strobe is high the shift index stays pinned at the first
    /// button; dropping it low freezes the latch for serial reads.
    pub fn write_strobe(&mut self, value: u8) {
        self.strobe = value & 1 != 0;
        if self.strobe {
            self.index = 0;
        }
    }

    /// $4016/$4017 read: shift out one bit
    ///
    /// Returns the current button in bit 0 and advances; reads past the
    /// eighth bit return 1, which games use to detect the end of the
    /// report.
    pub fn read(&mut self) -> u8 {
        let value = if self.index < 8 {
            self.buttons[self.index as usize] as u8
        } else {
            1
        };
        if self.strobe {
            self.index = 0;
        } else if self.index < 9 {
            self.index += 1;
        }
        value
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
