//! Enzyme Commission numbers and their one-hot indicator vectors.
//!
//! An EC number has up to four levels, e.g. `3.4.21.62`. Levels may be
//! unspecified (`3.4.21.-`) or preliminary (`3.4.21.n5`, read as `5`).
use crate::error::{FeatureError, Result};
use crate::Protein;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const EC_LEVELS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EcNumber {
    levels: [Option<u32>; EC_LEVELS],
}

impl EcNumber {
    /// Parse the first whitespace-separated token, so `"1.1.1.1 {ECO:0000256}"` works.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || FeatureError::InvalidEcNumber(text.to_string());
        let token = text.split_whitespace().next().ok_or_else(invalid)?;
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() > EC_LEVELS {
            return Err(invalid());
        }
        let mut levels = [None; EC_LEVELS];
        for (level, part) in levels.iter_mut().zip(parts) {
            *level = match part {
                "-" => None,
                _ => {
                    let digits = part.strip_prefix('n').unwrap_or(part);
                    Some(digits.parse::<u32>().map_err(|_| invalid())?)
                }
            };
        }
        Ok(EcNumber { levels })
    }
    pub fn level(&self, index: usize) -> Option<u32> {
        self.levels.get(index).copied().flatten()
    }
    pub fn levels(&self) -> &[Option<u32>; EC_LEVELS] {
        &self.levels
    }
}

impl FromStr for EcNumber {
    type Err = FeatureError;
    fn from_str(s: &str) -> Result<Self> {
        EcNumber::parse(s)
    }
}

impl fmt::Display for EcNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.levels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match level {
                Some(value) => write!(f, "{value}")?,
                None => f.write_str("-")?,
            }
        }
        Ok(())
    }
}

/// Largest value seen at each EC level across a corpus.
///
/// Defines the layout of the indicator vector: one block of
/// `greatest[level] + 1` slots per level, concatenated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcHierarchy {
    greatest: [u32; EC_LEVELS],
}

impl EcHierarchy {
    pub fn from_ec_numbers<'a, I>(numbers: I) -> Self
    where
        I: IntoIterator<Item = &'a EcNumber>,
    {
        let mut greatest = [0; EC_LEVELS];
        for number in numbers {
            for (max, level) in greatest.iter_mut().zip(number.levels) {
                if let Some(value) = level {
                    *max = (*max).max(value);
                }
            }
        }
        EcHierarchy { greatest }
    }
    pub fn from_proteins(proteins: &[Protein]) -> Result<Self> {
        let numbers = proteins
            .iter()
            .map(|p| EcNumber::parse(p.ec_number()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_ec_numbers(&numbers))
    }
    pub fn greatest(&self) -> &[u32; EC_LEVELS] {
        &self.greatest
    }
    fn block_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.greatest.iter().map(|&max| max as usize + 1)
    }
    /// Length of every indicator vector.
    pub fn len(&self) -> usize {
        self.block_sizes().sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// One-hot per level. Unspecified levels, and values larger than the
    /// hierarchy knows about, leave their block all zero.
    pub fn indicator(&self, number: &EcNumber) -> Vec<u8> {
        let mut vector = vec![0u8; self.len()];
        let mut offset = 0;
        for (size, level) in self.block_sizes().zip(number.levels) {
            if let Some(value) = level {
                let value = value as usize;
                if value < size {
                    vector[offset + value] = 1;
                }
            }
            offset += size;
        }
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let ec = EcNumber::parse("3.4.21.62").unwrap();
        assert_eq!(ec.levels(), &[Some(3), Some(4), Some(21), Some(62)]);
        let ec: EcNumber = "3.4.21.-".parse().unwrap();
        assert_eq!(ec.level(3), None);
        assert_eq!(ec.to_string(), "3.4.21.-");
        let ec = EcNumber::parse("3.4.21.n5 {ECO:0000256}").unwrap();
        assert_eq!(ec.level(3), Some(5));
        let ec = EcNumber::parse("2.7").unwrap();
        assert_eq!(ec.to_string(), "2.7.-.-");
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "   ", "1.2.3.4.5", "1.x.3.4", "1..3.4", "EC 1.1.1.1"] {
            assert_eq!(
                EcNumber::parse(bad),
                Err(FeatureError::InvalidEcNumber(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_hierarchy_indicator() {
        let proteins = vec![
            Protein::new("1.1.1.1", "A"),
            Protein::new("2.7.11.1", "B"),
            Protein::new("3.4.21.-", "C"),
        ];
        let hierarchy = EcHierarchy::from_proteins(&proteins).unwrap();
        assert_eq!(hierarchy.greatest(), &[3, 7, 21, 1]);
        assert_eq!(hierarchy.len(), 4 + 8 + 22 + 2);

        let indicator = hierarchy.indicator(&EcNumber::parse("2.7.11.1").unwrap());
        assert_eq!(indicator.len(), hierarchy.len());
        assert_eq!(indicator.iter().filter(|&&b| b == 1).count(), 4);
        assert_eq!(indicator[2], 1);
        assert_eq!(indicator[4 + 7], 1);
        assert_eq!(indicator[4 + 8 + 11], 1);
        assert_eq!(indicator[4 + 8 + 22 + 1], 1);

        let partial = hierarchy.indicator(&EcNumber::parse("3.4.21.-").unwrap());
        assert_eq!(partial.iter().map(|&b| b as usize).sum::<usize>(), 3);

        let unknown = hierarchy.indicator(&EcNumber::parse("9.1.1.1").unwrap());
        assert_eq!(unknown[..4], [0, 0, 0, 0]);
    }

    #[test]
    fn test_hierarchy_rejects_bad_ec() {
        let proteins = vec![Protein::new("not-an-ec", "A")];
        assert!(EcHierarchy::from_proteins(&proteins).is_err());
    }
}
