pub use constants::CLOCK_SPEED;
pub use error::{CycleOutcome, ExecutionError};
pub use framebuffer::Frame;
pub use machine::Machine;

pub mod constants;
mod error;
mod framebuffer;
mod instruction;
mod keypad;
mod machine;
mod memory;
mod opcode;
mod operations;
mod stack;
mod timers;
