// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Iranian national ID (کد ملی) checksum validation

/// Length of a national ID
pub const NATIONAL_ID_LENGTH: usize = 10;

/// Map Persian (۰-۹) and Arabic-Indic (٠-٩) digits to ASCII, leave everything else
pub fn normalize_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '۰'..='۹' => char::from(b'0' + (c as u32 - '۰' as u32) as u8),
            '٠'..='٩' => char::from(b'0' + (c as u32 - '٠' as u32) as u8),
            _ => c,
        })
        .collect()
}

/// Validate a national ID against its check digit
///
/// The first nine digits are weighted 10 down to 2 and summed; with
/// `r = sum % 11` the last digit must equal `r` when `r < 2`, else `11 - r`.
/// IDs made of a single repeated digit are rejected.
pub fn validate_national_id(national_id: &str) -> bool {
    let normalized = normalize_digits(national_id);

    let digits: Vec<u32> = match normalized
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
    {
        Some(digits) => digits,
        None => return false,
    };

    if digits.len() != NATIONAL_ID_LENGTH {
        return false;
    }

    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    let check_sum: u32 = digits[..9]
        .iter()
        .enumerate()
        .map(|(i, d)| d * (10 - i as u32))
        .sum();

    let remainder = check_sum % 11;
    let check_digit = digits[9];

    if remainder < 2 {
        check_digit == remainder
    } else {
        check_digit == 11 - remainder
    }
}
