//! Typed IR values carried by instructions.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Register class derived from the register's spelling.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RegisterFlags: u8 {
        const GENERAL           = 0b1;
        const PREDICATE         = 0b10;
        const NEW_VALUE         = 0b100;
        const MODIFIER          = 0b1000;
        const CONTROL           = 0b1_0000;
        const EFFECTIVE_ADDRESS = 0b10_0000;
        const DOT_NEW           = 0b100_0000; // `.new` suffix
    }
}

impl RegisterFlags {
    pub fn classify(name: &str) -> Self {
        if name == "EA" {
            return RegisterFlags::EFFECTIVE_ADDRESS;
        }
        let mut flags = match name.chars().next() {
            Some('R') => RegisterFlags::GENERAL,
            Some('P') => RegisterFlags::PREDICATE,
            Some('N') => RegisterFlags::NEW_VALUE,
            Some('M') => RegisterFlags::MODIFIER,
            Some('C') => RegisterFlags::CONTROL,
            _ => RegisterFlags::empty(),
        };
        if name.ends_with(".new") {
            flags |= RegisterFlags::DOT_NEW;
        }
        flags
    }

    /// `GENERAL|DOT_NEW` style rendering; empty sets render as `-`.
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        self.iter_names()
            .map(|(name, _)| name)
            .collect::<Vec<_>>()
            .join("|")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Register {
        name: String,
        width: u32,
        flags: RegisterFlags,
    },
    Immediate {
        value: u64,
        width: u32,
    },
    Temporary {
        name: String,
        width: u32,
    },
}

impl Operand {
    pub fn register(name: impl Into<String>, width: u32) -> Self {
        let name = name.into();
        let flags = RegisterFlags::classify(&name);
        Operand::Register { name, width, flags }
    }

    pub fn immediate(value: u64, width: u32) -> Self {
        Operand::Immediate { value, width }
    }

    pub fn temporary(name: impl Into<String>, width: u32) -> Self {
        Operand::Temporary {
            name: name.into(),
            width,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Operand::Register { width, .. }
            | Operand::Immediate { width, .. }
            | Operand::Temporary { width, .. } => *width,
        }
    }

    /// Register or temporary name; immediates have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Operand::Register { name, .. } | Operand::Temporary { name, .. } => Some(name),
            Operand::Immediate { .. } => None,
        }
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, Operand::Temporary { .. })
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register { name, width, .. } | Operand::Temporary { name, width } => {
                write!(f, "{name}:{width}")
            }
            Operand::Immediate { value, width } => write!(f, "0x{value:X}:{width}"),
        }
    }
}
