use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{error, info, trace};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::Display;
use vm8::{CycleOutcome, Machine, CLOCK_SPEED};

use crate::keymap::keymap;

pub fn run(rom: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    let mut machine = match seed {
        Some(seed) => Machine::with_seed(seed),
        None => Machine::new(),
    };

    // Load ROM
    let image = fs::read(rom).with_context(|| format!("unable to read rom {}", rom.display()))?;
    machine.load_rom(&image)?;
    info!("loaded {} byte rom {}", image.len(), rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl).map_err(anyhow::Error::msg)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    // Set initial timing
    let cycle_time: Duration = Duration::new(0, CLOCK_SPEED as u32);
    let mut last_cycle: Instant = Instant::now();

    // Whether or not the default clock speed should be respected
    let mut fast_forward: bool = false;

    'event: loop {
        // If the frame changed, render it
        if machine.take_changed_flag() {
            display.render(machine.frame()).map_err(anyhow::Error::msg)?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => machine.set_key(kc, true),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => machine.set_key(kc, false),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        match machine.execute_cycle() {
            Ok(CycleOutcome::Continued) => {}
            Ok(CycleOutcome::AwaitingKeyInput) => trace!("awaiting a keypress"),
            Err(e) => {
                error!("halted at pc {:04X}: {}", machine.program_counter(), e);
                return Err(e.into());
            }
        }
        trace!(
            "v{:02X?} i{:04X} pc{:04X}",
            machine.registers(),
            machine.index_register(),
            machine.program_counter()
        );

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = current_time;
    }

    Ok(())
}
