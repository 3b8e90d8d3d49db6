use rand::{Rng, RngCore};

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_HEIGHT, STACK_SIZE, VF};
use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::state::State;

/// clear
pub fn clr(_op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.frame_buffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    state.pc += 0x2;
    Ok(())
}

/// PC = STACK.pop() + 2
/// The stack holds the address of the call itself so we step over it on the way back
pub fn rts(_op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    if state.sp == 0 {
        return Err(Error::StackUnderflow { pc: state.pc });
    }
    state.sp -= 0x1;
    state.pc = state.stack[state.sp as usize] + 0x2;
    Ok(())
}

/// PC = addr
pub fn jump(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.pc = op.addr();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    if state.sp as usize == STACK_SIZE {
        return Err(Error::StackOverflow { pc: state.pc });
    }
    state.stack[state.sp as usize] = state.pc;
    state.sp += 0x1;
    state.pc = op.addr();
    Ok(())
}

/// Skips the next instruction when `condition` holds
fn skip_if(state: &mut State, condition: bool) -> Result<()> {
    state.pc += if condition { 0x4 } else { 0x2 };
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let condition = state.v[op.x()] == op.kk();
    skip_if(state, condition)
}

/// if Vx != kk then pc += 2
pub fn skne(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let condition = state.v[op.x()] != op.kk();
    skip_if(state, condition)
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let condition = state.v[op.x()] == state.v[op.y()];
    skip_if(state, condition)
}

/// Vx = kk
pub fn load(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.v[op.x()] = op.kk();
    state.pc += 0x2;
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
    state.pc += 0x2;
    Ok(())
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.v[op.x()] = state.v[op.y()];
    state.pc += 0x2;
    Ok(())
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.v[op.x()] |= state.v[op.y()];
    state.pc += 0x2;
    Ok(())
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.v[op.x()] &= state.v[op.y()];
    state.pc += 0x2;
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.v[op.x()] ^= state.v[op.y()];
    state.pc += 0x2;
    Ok(())
}

// The ALU operations below write VF before Vx, so when x is F the result replaces the flag.

/// Vx += Vy; VF = overflow
pub fn addr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let (res, over) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.v[VF] = u8::from(over);
    state.v[op.x()] = res;
    state.pc += 0x2;
    Ok(())
}

/// Vx -= Vy; VF = !underflow
pub fn sub(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let (res, under) = state.v[op.x()].overflowing_sub(state.v[op.y()]);
    state.v[VF] = u8::from(!under);
    state.v[op.x()] = res;
    state.pc += 0x2;
    Ok(())
}

/// Vx /= 2; VF = lsb
pub fn shr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let vx = state.v[op.x()];
    state.v[VF] = vx & 0x1;
    state.v[op.x()] = vx / 0x2;
    state.pc += 0x2;
    Ok(())
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let (res, under) = state.v[op.y()].overflowing_sub(state.v[op.x()]);
    state.v[VF] = u8::from(!under);
    state.v[op.x()] = res;
    state.pc += 0x2;
    Ok(())
}

/// Vx *= 2; VF = msb
pub fn shl(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let vx = state.v[op.x()];
    state.v[VF] = (vx & 0x80) >> 7;
    state.v[op.x()] = vx.wrapping_mul(0x2);
    state.pc += 0x2;
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let condition = state.v[op.x()] != state.v[op.y()];
    skip_if(state, condition)
}

/// I = addr
pub fn loadi(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.i = op.addr();
    state.pc += 0x2;
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.pc = u16::from(state.v[0x0]) + op.addr();
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: &dyn Opcode, state: &mut State, rng: &mut dyn RngCore) -> Result<()> {
    let rand_byte: u8 = rng.gen();
    state.v[op.x()] = rand_byte & op.kk();
    state.pc += 0x2;
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let sprite = state.memory_at(state.i, op.n() as usize)?.to_vec();
    let x = state.v[op.x()] as usize;
    let mut y = state.v[op.y()] as usize % DISPLAY_HEIGHT;
    let mut collision = false;

    for row in sprite {
        for bit in 0..8 {
            if (row >> (7 - bit)) & 0x1 == 0 {
                continue;
            }
            let pixel = &mut state.frame_buffer[y][(x + bit) % DISPLAY_WIDTH];
            collision |= *pixel;
            *pixel = !*pixel;
        }
        y = (y + 1) % DISPLAY_HEIGHT;
    }

    state.v[VF] = u8::from(collision);
    state.draw_flag = true;
    state.pc += 0x2;
    Ok(())
}

/// Whether the key named by Vx is held; there is no key past F so those are never held
fn key_held(state: &State, register: usize) -> bool {
    state
        .pressed_keys
        .get(state.v[register] as usize)
        .copied()
        .unwrap_or(false)
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let condition = key_held(state, op.x());
    skip_if(state, condition)
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let condition = !key_held(state, op.x());
    skip_if(state, condition)
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.v[op.x()] = state.delay_timer;
    state.pc += 0x2;
    Ok(())
}

/// await keypress for Vx
/// Nothing else runs until `Chip8::key_press` fills the register
pub fn keyd(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.register_needing_key = Some(op.x() as u8);
    state.pc += 0x2;
    Ok(())
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.delay_timer = state.v[op.x()];
    state.pc += 0x2;
    Ok(())
}

/// ST = Vx
/// Also asks for a tone lasting as long as the sound timer
pub fn ld(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.sound_timer = state.v[op.x()];
    state.tone = Some(state.sound_timer).filter(|&ticks| ticks > 0);
    state.pc += 0x2;
    Ok(())
}

/// I += Vx; VF = I > 0xFFF
pub fn addi(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let i = state.i.wrapping_add(u16::from(state.v[op.x()]));
    state.v[VF] = u8::from(i > 0xFFF);
    state.i = i;
    state.pc += 0x2;
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    state.i = u16::from(state.v[op.x()]) * SPRITE_HEIGHT;
    state.pc += 0x2;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let vx = state.v[op.x()];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state.memory_at_mut(state.i, digits.len())?.copy_from_slice(&digits);
    state.pc += 0x2;
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn stor(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let count = op.x() + 1;
    let v = state.v;
    state.memory_at_mut(state.i, count)?.copy_from_slice(&v[..count]);
    state.i = state.i.wrapping_add(count as u16);
    state.pc += 0x2;
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn read(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Result<()> {
    let count = op.x() + 1;
    let mut v = state.v;
    v[..count].copy_from_slice(state.memory_at(state.i, count)?);
    state.v = v;
    state.i = state.i.wrapping_add(count as u16);
    state.pc += 0x2;
    Ok(())
}
