use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE};
use crate::error::{CycleOutcome, ExecutionError};
use crate::machine::Machine;
use crate::opcode::Opcode;

/// clear
pub fn clr(machine: &mut Machine, _op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.framebuffer.clear();
    Ok(CycleOutcome::Continued)
}

/// PC = STACK.pop()
pub fn rts(machine: &mut Machine, _op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.pc = machine.stack.pop()?;
    Ok(CycleOutcome::Continued)
}

/// PC = nnn
pub fn jump(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.pc = op.nnn();
    Ok(CycleOutcome::Continued)
}

/// STACK.push(PC); PC = nnn
/// The pushed PC has already advanced past this instruction, so it is the
/// return address. Overflow is detected before either mutation.
pub fn call(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.stack.push(machine.pc)?;
    machine.pc = op.nnn();
    Ok(CycleOutcome::Continued)
}

/// if Vx == kk then pc += 2
pub fn ske(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    if machine.v[op.x() as usize] == op.kk() {
        machine.pc += 2;
    }
    Ok(CycleOutcome::Continued)
}

/// if Vx != kk then pc += 2
pub fn skne(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    if machine.v[op.x() as usize] != op.kk() {
        machine.pc += 2;
    }
    Ok(CycleOutcome::Continued)
}

/// if Vx == Vy then pc += 2
pub fn skre(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    if machine.v[op.x() as usize] == machine.v[op.y() as usize] {
        machine.pc += 2;
    }
    Ok(CycleOutcome::Continued)
}

/// Vx = kk
pub fn load(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.v[op.x() as usize] = op.kk();
    Ok(CycleOutcome::Continued)
}

/// Vx += kk
/// Overflow wraps to 8 bits and sets no flag.
pub fn add(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let x = op.x() as usize;
    machine.v[x] = machine.v[x].wrapping_add(op.kk());
    Ok(CycleOutcome::Continued)
}

/// Vx = Vy
pub fn mv(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.v[op.x() as usize] = machine.v[op.y() as usize];
    Ok(CycleOutcome::Continued)
}

/// Vx |= Vy
pub fn or(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.v[op.x() as usize] |= machine.v[op.y() as usize];
    Ok(CycleOutcome::Continued)
}

/// Vx &= Vy
pub fn and(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.v[op.x() as usize] &= machine.v[op.y() as usize];
    Ok(CycleOutcome::Continued)
}

/// Vx ^= Vy
pub fn xor(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.v[op.x() as usize] ^= machine.v[op.y() as usize];
    Ok(CycleOutcome::Continued)
}

/// Vx += Vy; VF = carry
/// When x is 0xF the sum wins over the flag.
pub fn addr(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let x = op.x() as usize;
    let (res, carry) = machine.v[x].overflowing_add(machine.v[op.y() as usize]);
    machine.v[0xF] = if carry { 0x1 } else { 0x0 };
    machine.v[x] = res;
    Ok(CycleOutcome::Continued)
}

/// Vx -= Vy; VF = no borrow
/// The flag is strictly Vx > Vy on the original operands, so equal operands
/// clear it.
pub fn sub(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let x = op.x() as usize;
    let y = op.y() as usize;
    let no_borrow = machine.v[x] > machine.v[y];
    let res = machine.v[x].wrapping_sub(machine.v[y]);
    machine.v[0xF] = if no_borrow { 0x1 } else { 0x0 };
    machine.v[x] = res;
    Ok(CycleOutcome::Continued)
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let x = op.x() as usize;
    machine.v[0xF] = machine.v[x] & 0x1;
    machine.v[x] >>= 1;
    Ok(CycleOutcome::Continued)
}

/// Vx = Vy - Vx; VF = no borrow
/// The flag is strictly Vy > Vx on the original operands.
pub fn subn(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let x = op.x() as usize;
    let y = op.y() as usize;
    let no_borrow = machine.v[y] > machine.v[x];
    let res = machine.v[y].wrapping_sub(machine.v[x]);
    machine.v[0xF] = if no_borrow { 0x1 } else { 0x0 };
    machine.v[x] = res;
    Ok(CycleOutcome::Continued)
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let x = op.x() as usize;
    machine.v[0xF] = machine.v[x] >> 7;
    machine.v[x] <<= 1;
    Ok(CycleOutcome::Continued)
}

/// if Vx != Vy then pc += 2
pub fn skrne(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    if machine.v[op.x() as usize] != machine.v[op.y() as usize] {
        machine.pc += 2;
    }
    Ok(CycleOutcome::Continued)
}

/// I = nnn
pub fn loadi(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.i = op.nnn();
    Ok(CycleOutcome::Continued)
}

/// PC = V0 + nnn
pub fn jumpi(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.pc = op.nnn() + u16::from(machine.v[0x0]);
    Ok(CycleOutcome::Continued)
}

/// Vx = rand_byte & kk
pub fn rand(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let byte = machine.random_byte();
    machine.v[op.x() as usize] = byte & op.kk();
    Ok(CycleOutcome::Continued)
}

/// draw_sprite(x=Vx y=Vy rows=n)
/// XORs the n-row sprite at memory I..I+n onto the frame at (Vx, Vy).
/// Row and column both wrap independently, VF reports whether any pixel was
/// erased, and the frame is flagged changed whether or not one toggled.
pub fn draw(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let sprite = machine.memory.read_range(machine.i, op.n() as usize)?;
    let origin_col = machine.v[op.x() as usize] as usize;
    let origin_row = machine.v[op.y() as usize] as usize;

    machine.v[0xF] = 0x0;
    for (row, &byte) in sprite.iter().enumerate() {
        let y = (origin_row + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if (byte >> (7 - bit)) & 1 == 1 {
                let x = (origin_col + bit) % DISPLAY_WIDTH;
                if machine.framebuffer.flip(y, x) {
                    machine.v[0xF] = 0x1;
                }
            }
        }
    }
    machine.framebuffer.mark_changed();
    Ok(CycleOutcome::Continued)
}

/// if Vx.pressed then pc += 2
pub fn skpr(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    if machine.keypad.is_pressed(machine.v[op.x() as usize]) {
        machine.pc += 2;
    }
    Ok(CycleOutcome::Continued)
}

/// if !Vx.pressed then pc += 2
pub fn skup(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    if !machine.keypad.is_pressed(machine.v[op.x() as usize]) {
        machine.pc += 2;
    }
    Ok(CycleOutcome::Continued)
}

/// Vx = DT
pub fn moved(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.v[op.x() as usize] = machine.timers.delay;
    Ok(CycleOutcome::Continued)
}

/// await keypress for Vx
/// Records the pending register and parks the machine; execute_cycle owns
/// the scan that eventually resolves it.
pub fn keyd(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.awaiting_key = Some(op.x());
    Ok(CycleOutcome::AwaitingKeyInput)
}

/// DT = Vx
pub fn loads(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.timers.delay = machine.v[op.x() as usize];
    Ok(CycleOutcome::Continued)
}

/// ST = Vx
pub fn ld(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.timers.sound = machine.v[op.x() as usize];
    Ok(CycleOutcome::Continued)
}

/// I += Vx; VF = carry past 0xFFF
/// I is truncated to its 12-bit effective range.
pub fn addi(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let sum = u32::from(machine.i) + u32::from(machine.v[op.x() as usize]);
    machine.v[0xF] = if sum > 0xFFF { 0x1 } else { 0x0 };
    machine.i = (sum & 0xFFF) as u16;
    Ok(CycleOutcome::Continued)
}

/// I = Vx * 5
/// The address of the font glyph for digit Vx; see constants::FONT_SET.
pub fn ldspr(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    machine.i = u16::from(machine.v[op.x() as usize]) * FONT_GLYPH_SIZE as u16;
    Ok(CycleOutcome::Continued)
}

/// mem[I..I+3] = bcd(Vx)
/// Hundreds, tens and units digits of Vx, one byte each.
pub fn bcd(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let value = machine.v[op.x() as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    machine.memory.write_range(machine.i, &digits)?;
    Ok(CycleOutcome::Continued)
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn stor(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let x = op.x() as usize;
    machine.memory.write_range(machine.i, &machine.v[..=x])?;
    machine.i += op.x() as u16 + 1;
    Ok(CycleOutcome::Continued)
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn read(machine: &mut Machine, op: u16) -> Result<CycleOutcome, ExecutionError> {
    let x = op.x() as usize;
    let source = machine.memory.read_range(machine.i, x + 1)?;
    machine.v[..=x].copy_from_slice(source);
    machine.i += op.x() as u16 + 1;
    Ok(CycleOutcome::Continued)
}
