//! Vs. System sub-fields of NES 2.0 byte 13.
//!
//! Only meaningful when the console type is [`super::ConsoleType::VsSystem`].

use std::fmt;

/// Board wiring and copy protection (byte 13 high nibble).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VsHardwareType {
    /// $0: Vs. Unisystem (normal).
    UnisystemNormal,
    /// $1: Vs. Unisystem (RBI Baseball protection).
    UnisystemRbiBaseballProtection,
    /// $2: Vs. Unisystem (TKO Boxing protection).
    UnisystemTkoBoxingProtection,
    /// $3: Vs. Unisystem (Super Xevious protection).
    UnisystemSuperXeviousProtection,
    /// $4: Vs. Unisystem (Vs. Ice Climber Japan protection).
    UnisystemIceClimberJapanProtection,
    /// $5: Vs. Dual System (normal).
    DualSystemNormal,
    /// $6: Vs. Dual System (Raid on Bungeling Bay protection).
    DualSystemRaidOnBungelingBayProtection,
    /// Unassigned nibble, kept so it re-encodes unchanged.
    Unknown(u8),
}

impl VsHardwareType {
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0x0 => Self::UnisystemNormal,
            0x1 => Self::UnisystemRbiBaseballProtection,
            0x2 => Self::UnisystemTkoBoxingProtection,
            0x3 => Self::UnisystemSuperXeviousProtection,
            0x4 => Self::UnisystemIceClimberJapanProtection,
            0x5 => Self::DualSystemNormal,
            0x6 => Self::DualSystemRaidOnBungelingBayProtection,
            other => Self::Unknown(other),
        }
    }

    pub fn to_nibble(self) -> u8 {
        match self {
            Self::UnisystemNormal => 0x0,
            Self::UnisystemRbiBaseballProtection => 0x1,
            Self::UnisystemTkoBoxingProtection => 0x2,
            Self::UnisystemSuperXeviousProtection => 0x3,
            Self::UnisystemIceClimberJapanProtection => 0x4,
            Self::DualSystemNormal => 0x5,
            Self::DualSystemRaidOnBungelingBayProtection => 0x6,
            Self::Unknown(raw) => raw & 0x0F,
        }
    }
}

impl fmt::Display for VsHardwareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnisystemNormal => "Unisystem",
            Self::UnisystemRbiBaseballProtection => "Unisystem (RBI Baseball)",
            Self::UnisystemTkoBoxingProtection => "Unisystem (TKO Boxing)",
            Self::UnisystemSuperXeviousProtection => "Unisystem (Super Xevious)",
            Self::UnisystemIceClimberJapanProtection => "Unisystem (Ice Climber Japan)",
            Self::DualSystemNormal => "Dual System",
            Self::DualSystemRaidOnBungelingBayProtection => "Dual System (Raid on Bungeling Bay)",
            Self::Unknown(raw) => return write!(f, "unassigned ({raw:#X})"),
        };
        f.write_str(name)
    }
}

/// PPU model on the board (byte 13 low nibble). Each model has its own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VsPpuType {
    /// $0: Any RP2C03/RC2C03 variant.
    AnyRp2c03OrRc2c03,
    /// $2: RP2C04-0001.
    Rp2c04_0001,
    /// $3: RP2C04-0002.
    Rp2c04_0002,
    /// $4: RP2C04-0003.
    Rp2c04_0003,
    /// $5: RP2C04-0004.
    Rp2c04_0004,
    /// $8: RC2C05-01.
    Rc2c05_01,
    /// $9: RC2C05-02.
    Rc2c05_02,
    /// $A: RC2C05-03.
    Rc2c05_03,
    /// $B: RC2C05-04.
    Rc2c05_04,
    /// Unassigned nibble, kept so it re-encodes unchanged.
    Unknown(u8),
}

impl VsPpuType {
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0x0 => Self::AnyRp2c03OrRc2c03,
            0x2 => Self::Rp2c04_0001,
            0x3 => Self::Rp2c04_0002,
            0x4 => Self::Rp2c04_0003,
            0x5 => Self::Rp2c04_0004,
            0x8 => Self::Rc2c05_01,
            0x9 => Self::Rc2c05_02,
            0xA => Self::Rc2c05_03,
            0xB => Self::Rc2c05_04,
            other => Self::Unknown(other),
        }
    }

    pub fn to_nibble(self) -> u8 {
        match self {
            Self::AnyRp2c03OrRc2c03 => 0x0,
            Self::Rp2c04_0001 => 0x2,
            Self::Rp2c04_0002 => 0x3,
            Self::Rp2c04_0003 => 0x4,
            Self::Rp2c04_0004 => 0x5,
            Self::Rc2c05_01 => 0x8,
            Self::Rc2c05_02 => 0x9,
            Self::Rc2c05_03 => 0xA,
            Self::Rc2c05_04 => 0xB,
            Self::Unknown(raw) => raw & 0x0F,
        }
    }
}

impl fmt::Display for VsPpuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AnyRp2c03OrRc2c03 => "RP2C03/RC2C03",
            Self::Rp2c04_0001 => "RP2C04-0001",
            Self::Rp2c04_0002 => "RP2C04-0002",
            Self::Rp2c04_0003 => "RP2C04-0003",
            Self::Rp2c04_0004 => "RP2C04-0004",
            Self::Rc2c05_01 => "RC2C05-01",
            Self::Rc2c05_02 => "RC2C05-02",
            Self::Rc2c05_03 => "RC2C05-03",
            Self::Rc2c05_04 => "RC2C05-04",
            Self::Unknown(raw) => return write!(f, "unassigned ({raw:#X})"),
        };
        f.write_str(name)
    }
}
