// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! SysEx Pattern Matcher (C10, spec §4.10).

/// The wildcard byte: matches any received byte. Never legal as a literal
/// MIDI data byte (those are ≤ 0x7F), so it's unambiguous in a pattern.
pub const WILDCARD: u8 = 0xFF;

/// A validated SysEx match pattern.
///
/// Construction is the only way to get one — `SysExPattern::new` rejects
/// anything that fails the structural rules in §4.10, so once you hold a
/// `SysExPattern` it is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SysExPattern(Vec<u8>);

impl SysExPattern {
    /// Validates and wraps `bytes`. A pattern is valid iff: length ≥ 3,
    /// first byte 0xF0, last byte 0xF7, and every interior byte is either
    /// ≤ 0x7F (literal) or exactly 0xFF (wildcard).
    pub fn new(bytes: Vec<u8>) -> Result<Self, String> {
        if bytes.len() < 3 {
            return Err(format!("pattern too short: {} bytes, need ≥ 3", bytes.len()));
        }
        if bytes[0] != 0xF0 {
            return Err(format!("pattern must start with 0xF0, got 0x{:02X}", bytes[0]));
        }
        if *bytes.last().unwrap() != 0xF7 {
            return Err(format!(
                "pattern must end with 0xF7, got 0x{:02X}",
                bytes.last().unwrap()
            ));
        }
        for (i, &b) in bytes.iter().enumerate().skip(1).take(bytes.len() - 2) {
            if b > 0x7F && b != WILDCARD {
                return Err(format!(
                    "interior byte {i} (0x{b:02X}) must be ≤ 0x7F or exactly 0xFF"
                ));
            }
        }
        Ok(SysExPattern(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// `matches(b, p) == (|b|=|p| ∧ ∀i. p[i]=0xFF ∨ p[i]=b[i])`.
    pub fn matches(&self, received: &[u8]) -> bool {
        self.0.len() == received.len()
            && self
                .0
                .iter()
                .zip(received.iter())
                .all(|(&p, &b)| p == WILDCARD || p == b)
    }

    /// Renders for display: 0xFF as `XX`, others as two-digit uppercase hex,
    /// space-separated.
    pub fn format(&self) -> String {
        self.0
            .iter()
            .map(|&b| if b == WILDCARD { "XX".to_string() } else { format!("{b:02X}") })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl serde::Serialize for SysExPattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for SysExPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        SysExPattern::new(bytes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_pattern_with_wildcard() {
        let p = SysExPattern::new(vec![0xF0, 0x00, 0x20, 0x29, 0xFF, 0x7F, 0xF7]).unwrap();
        assert!(p.matches(&[0xF0, 0x00, 0x20, 0x29, 0x3C, 0x7F, 0xF7]));
        assert!(!p.matches(&[0xF0, 0x00, 0x20, 0x29, 0x3C, 0x00, 0xF7]));
    }

    #[test]
    fn rejects_too_short() {
        assert!(SysExPattern::new(vec![0xF0, 0xF7]).is_err());
    }

    #[test]
    fn rejects_bad_bookends() {
        assert!(SysExPattern::new(vec![0x00, 0x01, 0xF7]).is_err());
        assert!(SysExPattern::new(vec![0xF0, 0x01, 0x00]).is_err());
    }

    #[test]
    fn rejects_bad_interior_byte() {
        assert!(SysExPattern::new(vec![0xF0, 0x80, 0xF7]).is_err());
    }

    #[test]
    fn length_mismatch_never_matches() {
        let p = SysExPattern::new(vec![0xF0, 0x01, 0xF7]).unwrap();
        assert!(!p.matches(&[0xF0, 0x01, 0x02, 0xF7]));
    }

    #[test]
    fn format_renders_wildcard_as_xx() {
        let p = SysExPattern::new(vec![0xF0, 0xFF, 0x7F, 0xF7]).unwrap();
        assert_eq!(p.format(), "F0 XX 7F F7");
    }

    #[test]
    fn scenario_6_sysex_wildcard_match() {
        let p = SysExPattern::new(vec![
            0xF0, 0x00, 0x20, 0x29, 0x02, 0x0C, 0x03, 0xFF, 0x7F, 0xF7,
        ])
        .unwrap();
        assert!(p.matches(&[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0C, 0x03, 0x3C, 0x7F, 0xF7]));
        assert!(!p.matches(&[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0C, 0x03, 0x3C, 0x00, 0xF7]));
    }
}
