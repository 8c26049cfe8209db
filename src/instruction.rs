use crate::error::{CycleOutcome, ExecutionError};
use crate::machine::Machine;
use crate::opcode::Opcode;
use crate::operations::*;

/// A decoded instruction's semantic handler.
///
/// Handlers run after the program counter has already advanced past the
/// instruction word, so control-flow operations overwrite the program
/// counter and everything else falls through to the next instruction.
pub type Operation = fn(&mut Machine, u16) -> Result<CycleOutcome, ExecutionError>;

/// Selects the handler for an instruction word.
///
/// Dispatch is two-level: the family nibble first, then the full word or
/// the trailing byte/nibble for families 0x0, 0x8, 0xE and 0xF. A word
/// matching no known pattern is a [`DecodeError`], never a silent no-op.
///
/// [`DecodeError`]: ExecutionError::DecodeError
pub fn decode(op: u16) -> Result<Operation, ExecutionError> {
    match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => Ok(clr),
        (0x0, 0x0, 0xE, 0xE) => Ok(rts),
        (0x1, ..) => Ok(jump),
        (0x2, ..) => Ok(call),
        (0x3, ..) => Ok(ske),
        (0x4, ..) => Ok(skne),
        (0x5, .., 0x0) => Ok(skre),
        (0x6, ..) => Ok(load),
        (0x7, ..) => Ok(add),
        (0x8, .., 0x0) => Ok(mv),
        (0x8, .., 0x1) => Ok(or),
        (0x8, .., 0x2) => Ok(and),
        (0x8, .., 0x3) => Ok(xor),
        (0x8, .., 0x4) => Ok(addr),
        (0x8, .., 0x5) => Ok(sub),
        (0x8, .., 0x6) => Ok(shr),
        (0x8, .., 0x7) => Ok(subn),
        (0x8, .., 0xE) => Ok(shl),
        (0x9, .., 0x0) => Ok(skrne),
        (0xA, ..) => Ok(loadi),
        (0xB, ..) => Ok(jumpi),
        (0xC, ..) => Ok(rand),
        (0xD, ..) => Ok(draw),
        (0xE, .., 0x9, 0xE) => Ok(skpr),
        (0xE, .., 0xA, 0x1) => Ok(skup),
        (0xF, .., 0x0, 0x7) => Ok(moved),
        (0xF, .., 0x0, 0xA) => Ok(keyd),
        (0xF, .., 0x1, 0x5) => Ok(loads),
        (0xF, .., 0x1, 0x8) => Ok(ld),
        (0xF, .., 0x1, 0xE) => Ok(addi),
        (0xF, .., 0x2, 0x9) => Ok(ldspr),
        (0xF, .., 0x3, 0x3) => Ok(bcd),
        (0xF, .., 0x5, 0x5) => Ok(stor),
        (0xF, .., 0x6, 0x5) => Ok(read),
        _ => Err(ExecutionError::DecodeError { opcode: op }),
    }
}
