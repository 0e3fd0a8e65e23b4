use std::{fmt, str::FromStr};

/// A whole percentage in `0..=100`.
#[derive(Clone, Copy, Debug, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Percent(u8);

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("not a valid percentage, expected a whole number between 0 and 100")]
pub struct PercentError;

impl Percent {
    pub const ZERO: Self = Percent(0);
    pub const HUNDRED: Self = Percent(100);

    pub const fn new(value: u8) -> Result<Self, PercentError> {
        if value <= 100 {
            Ok(Percent(value))
        } else {
            Err(PercentError)
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// This percentage of `total`, rounded down.
    pub fn of(self, total: u64) -> u64 {
        total * u64::from(self.0) / 100
    }

    /// This percentage of the byte range `0..=255`, rounded down.
    pub fn of_u8_range(self) -> u8 {
        let scaled = u16::from(self.0) * u16::from(u8::MAX) / 100;
        scaled.try_into().expect("at most 255")
    }
}

impl From<Percent> for u8 {
    fn from(value: Percent) -> Self {
        value.get()
    }
}

impl TryFrom<u8> for Percent {
    type Error = PercentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Percent {
    type Err = PercentError;

    /// Accepts both `40` and `40%`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix('%').unwrap_or(s);
        let num: u8 = s.parse().map_err(|_| PercentError)?;
        Self::new(num)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A binarization threshold, or nothing if binarization is turned off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    Off,
    At(Percent),
}

impl Threshold {
    pub fn percent(self) -> Option<Percent> {
        match self {
            Threshold::Off => None,
            Threshold::At(p) => Some(p),
        }
    }
}

impl From<Percent> for Threshold {
    fn from(value: Percent) -> Self {
        Threshold::At(value)
    }
}

impl FromStr for Threshold {
    type Err = PercentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "off" | "none" | "-1" => Ok(Threshold::Off),
            s => s.parse().map(Threshold::At),
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Off => write!(f, "off"),
            Threshold::At(p) => write!(f, "{p}"),
        }
    }
}
