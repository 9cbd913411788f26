// nescore - main entry point
//
// Usage: nescore <rom.nes> [--scale N] [--opcodes]
//
// Exit codes: 0 on success, 1 for an unusable ROM, 2 for an unsupported
// mapper.

use nescore::emulator::LoadError;
use nescore::{run_display, Emulator, WindowConfig};
use std::process::ExitCode;

struct Args {
    rom_path: String,
    scale: Option<u32>,
    opcodes: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut rom_path = None;
    let mut scale = None;
    let mut opcodes = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--scale" => {
                let value = args.next().ok_or("--scale needs a value")?;
                scale = Some(value.parse::<u32>().map_err(|_| "bad --scale value")?);
            }
            "--opcodes" => opcodes = true,
            "--help" | "-h" => {
                return Err("usage: nescore <rom.nes> [--scale N] [--opcodes]".to_string())
            }
            _ if rom_path.is_none() => rom_path = Some(arg),
            _ => return Err(format!("unexpected argument: {}", arg)),
        }
    }

    Ok(Args {
        rom_path: rom_path.ok_or("usage: nescore <rom.nes> [--scale N] [--opcodes]")?,
        scale,
        opcodes,
    })
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(1);
        }
    };

    let mut emulator = Emulator::new();
    if let Err(err) = emulator.load_rom(&args.rom_path) {
        eprintln!("{}: {}", args.rom_path, err);
        return match err {
            LoadError::Rom(_) => ExitCode::from(1),
            LoadError::Mapper(_) => ExitCode::from(2),
        };
    }
    emulator.set_trace(args.opcodes);

    let scale = args.scale.unwrap_or(emulator.config().video.scale);
    let vsync = emulator.config().video.vsync;
    let config = WindowConfig::new().with_scale(scale);
    let config = WindowConfig { vsync, ..config };

    if let Err(err) = run_display(config, emulator) {
        eprintln!("display error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
