// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Field parsing from recognized ID card text

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::{normalize_digits, NATIONAL_ID_LENGTH};

/// Fields read from the front of an Iranian national ID card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCardInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub father_name: Option<String>,
    pub national_id: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub certificate_number: Option<String>,
    /// Checksum result; false when no national ID was found
    #[serde(default)]
    pub national_id_valid: bool,
}

impl IdCardInfo {
    /// Fields with their Persian labels, in card order
    pub fn labeled_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("نام", self.first_name.as_deref()),
            ("نام_خانوادگی", self.last_name.as_deref()),
            ("نام_پدر", self.father_name.as_deref()),
            ("کد_ملی", self.national_id.as_deref()),
            ("تاریخ_تولد", self.birth_date.as_deref()),
            ("محل_تولد", self.birth_place.as_deref()),
            ("شماره_شناسنامه", self.certificate_number.as_deref()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.labeled_fields().iter().all(|(_, v)| v.is_none())
    }
}

/// Compiled patterns for each card field
#[derive(Debug, Clone)]
pub struct IdCardParser {
    national_id: Regex,
    birth_date: Regex,
    certificate_number: Regex,
    first_name: Regex,
    last_name: Regex,
    father_name: Regex,
    birth_place: Regex,
}

impl Default for IdCardParser {
    fn default() -> Self {
        Self::new()
    }
}

impl IdCardParser {
    pub fn new() -> Self {
        // `\d` is Unicode-aware, so Persian digits match too
        Self {
            national_id: Regex::new(r"(\d{10})").unwrap(),
            birth_date: Regex::new(r"(\d{4}/\d{1,2}/\d{1,2})").unwrap(),
            certificate_number: Regex::new(r"شناسنامه.*?(\d+)").unwrap(),
            first_name: Regex::new(r"نام\s*:?\s*([^\n\r]+)").unwrap(),
            last_name: Regex::new(r"نام خانوادگی\s*:?\s*([^\n\r]+)").unwrap(),
            father_name: Regex::new(r"نام پدر\s*:?\s*([^\n\r]+)").unwrap(),
            birth_place: Regex::new(r"محل تولد\s*:?\s*([^\n\r]+)").unwrap(),
        }
    }

    /// Parse all fields from OCR output
    ///
    /// Each field takes the first acceptable match. Name-like fields are
    /// trimmed and must be longer than one character. `national_id_valid`
    /// is left false; the extractor fills it in.
    pub fn parse(&self, text: &str) -> IdCardInfo {
        IdCardInfo {
            first_name: first_name_like(&self.first_name, text),
            last_name: first_name_like(&self.last_name, text),
            father_name: first_name_like(&self.father_name, text),
            national_id: first_capture(&self.national_id, text)
                .filter(|m| m.chars().count() == NATIONAL_ID_LENGTH)
                .map(|m| normalize_digits(&m)),
            birth_date: first_capture(&self.birth_date, text).map(|m| normalize_digits(&m)),
            birth_place: first_name_like(&self.birth_place, text),
            certificate_number: first_capture(&self.certificate_number, text)
                .map(|m| normalize_digits(&m)),
            national_id_valid: false,
        }
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .next()
}

fn first_name_like(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|m| m.chars().count() > 1)
        .map(str::to_string)
}
