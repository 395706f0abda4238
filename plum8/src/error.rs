use core::fmt;

/// Fatal conditions raised by `Plum8`
///
/// None of them is recoverable: once `cycle` reports one, the machine stays
/// halted and keeps returning the same error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Decoded word matches none of the 35 instruction forms
    UnknownOpcode { opcode: u16, address: u16 },
    /// Subroutine call with a full call stack
    StackOverflow { address: u16 },
    /// Return with an empty call stack
    StackUnderflow { address: u16 },
    /// Program does not fit between 0x200 and the end of memory
    ProgramTooLarge { len: usize, max: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::UnknownOpcode { opcode, address } => {
                write!(f, "unknown opcode {:#06X} at {:#05X}", opcode, address)
            }
            Error::StackOverflow { address } => {
                write!(f, "call stack overflow at {:#05X}", address)
            }
            Error::StackUnderflow { address } => {
                write!(f, "return with empty call stack at {:#05X}", address)
            }
            Error::ProgramTooLarge { len, max } => {
                write!(f, "program is {} bytes, at most {} fit in memory", len, max)
            }
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    use core::fmt::Write;
    use heapless::String;

    #[test]
    fn display_messages() {
        let mut out: String<64> = String::new();
        write!(out, "{}", Error::UnknownOpcode { opcode: 0x0123, address: 0x200 }).unwrap();
        assert_eq!(out.as_str(), "unknown opcode 0x0123 at 0x200");

        out.clear();
        write!(out, "{}", Error::ProgramTooLarge { len: 4000, max: 3584 }).unwrap();
        assert_eq!(out.as_str(), "program is 4000 bytes, at most 3584 fit in memory");
    }
}
