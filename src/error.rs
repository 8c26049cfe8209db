use thiserror::Error;

/// What a successful call to [`Machine::execute_cycle`] accomplished.
///
/// [`Machine::execute_cycle`]: crate::Machine::execute_cycle
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// An instruction was fetched and executed.
    Continued,
    /// The machine is stopped on a wait-for-key instruction and will not
    /// fetch again until the keypad reports a pressed key.
    AwaitingKeyInput,
}

/// Everything that can go wrong while loading or running a program.
///
/// Errors are terminal for the cycle that raised them; the machine performs
/// no recovery of its own and leaves halt/reset policy to the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// An address (the program counter included) fell outside memory.
    #[error("memory access out of bounds at address {address:#05X}")]
    MemoryOverflow { address: u16 },

    /// A subroutine call would exceed the call stack's capacity.
    #[error("call stack exhausted by a subroutine call")]
    StackOverflow,

    /// A subroutine return was executed with no return address stacked.
    #[error("subroutine return with an empty call stack")]
    StackUnderflow,

    /// The fetched instruction word matches no known opcode pattern.
    #[error("unrecognized opcode {opcode:#06X}")]
    DecodeError { opcode: u16 },

    /// A program image is bigger than the memory reserved for programs.
    #[error("rom of {size} bytes exceeds the {capacity} byte program space")]
    RomTooLarge { size: usize, capacity: usize },
}
