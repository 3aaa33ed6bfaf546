use std::str::FromStr;

use strum_macros::EnumString;

use super::FluxError;

/// AE8/AP8 model variant, including the alternate-source (ESA interpolation)
/// forms the native library selects with negated codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ModelId {
    Ae8Min,
    Ae8Max,
    Ap8Min,
    Ap8Max,
    Ae8MinEsa,
    Ae8MaxEsa,
    Ap8MinEsa,
    Ap8MaxEsa,
}

impl ModelId {
    /// Parse a user-supplied model name, ignoring case, hyphens and spaces.
    pub fn parse(name: &str) -> Result<Self, FluxError> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | ' '))
            .collect();
        Self::from_str(&key).map_err(|_| FluxError::UnknownModel(name.to_string()))
    }

    /// The `whichm` selector the native flux entry point expects.
    pub fn selector(self) -> i32 {
        match self {
            ModelId::Ae8Min => 1,
            ModelId::Ae8Max => 2,
            ModelId::Ap8Min => 3,
            ModelId::Ap8Max => 4,
            ModelId::Ae8MinEsa => -1,
            ModelId::Ae8MaxEsa => -2,
            ModelId::Ap8MinEsa => -3,
            ModelId::Ap8MaxEsa => -4,
        }
    }
}
