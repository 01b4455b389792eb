//! # treesh Number Conversion (`bin2dec`, `dec2hex`, ...)
//!
//! File: cli/src/commands/convert.rs
//!
//! Converts between decimal and base 2, 8 or 16 with 32-bit two's complement
//! semantics: `hex2dec ffffffff` prints `-1` and `dec2bin -1` prints 32 ones.
//! Hexadecimal input may carry a `0x` / `0X` prefix.
//!
use crate::common::ui::Response;
use crate::core::error::{Result, ShellError};

/// A base that numbers can be converted from or to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Octal,
    Hex,
}

impl Radix {
    pub fn value(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Hex => 16,
        }
    }
}

/// Parses `input` in `radix` as a 32-bit pattern and returns its signed value.
pub fn to_decimal(input: &str, radix: Radix) -> std::result::Result<i32, ShellError> {
    let digits = match radix {
        Radix::Hex => input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input),
        _ => input,
    };
    // `from_str_radix` accepts a leading `+`, which is not a digit here.
    if digits.starts_with('+') {
        return Err(ShellError::Conversion(format!(
            "'{}' is not a base-{} number",
            input,
            radix.value()
        )));
    }
    let bits = u32::from_str_radix(digits, radix.value()).map_err(|e| {
        ShellError::Conversion(format!(
            "'{}' is not a base-{} number ({})",
            input,
            radix.value(),
            e
        ))
    })?;
    Ok(bits as i32)
}

/// Formats the decimal `input` in `radix`; negative values print their
/// two's complement bits.
pub fn from_decimal(input: &str, radix: Radix) -> std::result::Result<String, ShellError> {
    let value: i32 = input.parse().map_err(|e| {
        ShellError::Conversion(format!("'{}' is not a 32-bit decimal number ({})", input, e))
    })?;
    Ok(match radix {
        Radix::Binary => format!("{:b}", value),
        Radix::Octal => format!("{:o}", value),
        Radix::Hex => format!("{:x}", value),
    })
}

/// Handles `bin2dec`, `oct2dec` and `hex2dec`.
pub fn handle_to_decimal(radix: Radix, args: &[String]) -> Result<Response> {
    let Some(input) = args.first() else {
        anyhow::bail!(ShellError::usage(format!(
            "Expected a base-{} number",
            radix.value()
        )));
    };
    let value = to_decimal(input, radix)?;
    let mut response = Response::new();
    response.plain(value.to_string());
    Ok(response)
}

/// Handles `dec2bin`, `dec2oct` and `dec2hex`.
pub fn handle_from_decimal(radix: Radix, args: &[String]) -> Result<Response> {
    let Some(input) = args.first() else {
        anyhow::bail!(ShellError::usage("Expected a decimal number"));
    };
    let mut response = Response::new();
    response.plain(from_decimal(input, radix)?);
    Ok(response)
}
