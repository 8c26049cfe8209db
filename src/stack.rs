use crate::constants::STACK_DEPTH;
use crate::error::ExecutionError;

/// # Call stack
///
/// A bounded LIFO of return addresses, 16 frames deep. Both limits are
/// checked before any mutation so a failed push or pop leaves the stored
/// frames and the pointer untouched.
pub struct CallStack {
    frames: [u16; STACK_DEPTH],
    pointer: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: [0; STACK_DEPTH],
            pointer: 0,
        }
    }

    /// Stack a return address.
    pub fn push(&mut self, addr: u16) -> Result<(), ExecutionError> {
        if self.pointer == STACK_DEPTH {
            return Err(ExecutionError::StackOverflow);
        }
        self.frames[self.pointer] = addr;
        self.pointer += 1;
        Ok(())
    }

    /// Unstack the most recent return address.
    pub fn pop(&mut self) -> Result<u16, ExecutionError> {
        if self.pointer == 0 {
            return Err(ExecutionError::StackUnderflow);
        }
        self.pointer -= 1;
        Ok(self.frames[self.pointer])
    }

    /// How many return addresses are stacked.
    pub fn depth(&self) -> usize {
        self.pointer
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_lifo_order() {
        let mut stack = CallStack::new();
        stack.push(0x202).unwrap();
        stack.push(0x204).unwrap();
        assert_eq!(stack.pop(), Ok(0x204));
        assert_eq!(stack.pop(), Ok(0x202));
    }

    #[test]
    fn test_overflow_leaves_frames_intact() {
        let mut stack = CallStack::new();
        for frame in 0..STACK_DEPTH as u16 {
            stack.push(frame).unwrap();
        }
        assert_eq!(stack.push(0xFFF), Err(ExecutionError::StackOverflow));
        assert_eq!(stack.depth(), STACK_DEPTH);
        // The 16 stored addresses survive the rejected push
        for frame in (0..STACK_DEPTH as u16).rev() {
            assert_eq!(stack.pop(), Ok(frame));
        }
    }

    #[test]
    fn test_pop_on_empty_underflows() {
        let mut stack = CallStack::new();
        assert_eq!(stack.pop(), Err(ExecutionError::StackUnderflow));
        stack.push(0x202).unwrap();
        stack.pop().unwrap();
        assert_eq!(stack.pop(), Err(ExecutionError::StackUnderflow));
    }
}
