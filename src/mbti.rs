//! MBTI vocabulary: trait tags, the four axes and the 16 personality types.
//!
//! A type is four letters, one per axis, always in the order
//! E/I, S/N, T/F, J/P. Questionnaire options carry a [`Trait`] tag, which is
//! either one of the eight axis letters or the neutral marker `X`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Trait tag attached to a questionnaire option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trait {
    /// Extraversion
    E,
    /// Introversion
    I,
    /// Sensing
    S,
    /// Intuition
    N,
    /// Thinking
    T,
    /// Feeling
    F,
    /// Judging
    J,
    /// Perceiving
    P,
    /// Neutral, counts towards no axis
    X,
}

impl Trait {
    /// The eight scoring letters, grouped by axis.
    pub const LETTERS: [Trait; 8] = [
        Trait::E,
        Trait::I,
        Trait::S,
        Trait::N,
        Trait::T,
        Trait::F,
        Trait::J,
        Trait::P,
    ];

    pub fn as_char(self) -> char {
        match self {
            Trait::E => 'E',
            Trait::I => 'I',
            Trait::S => 'S',
            Trait::N => 'N',
            Trait::T => 'T',
            Trait::F => 'F',
            Trait::J => 'J',
            Trait::P => 'P',
            Trait::X => 'X',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'E' => Some(Trait::E),
            'I' => Some(Trait::I),
            'S' => Some(Trait::S),
            'N' => Some(Trait::N),
            'T' => Some(Trait::T),
            'F' => Some(Trait::F),
            'J' => Some(Trait::J),
            'P' => Some(Trait::P),
            'X' => Some(Trait::X),
            _ => None,
        }
    }

    /// The axis this letter belongs to, `None` for the neutral tag.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Trait::E | Trait::I => Some(Axis::EnergyFocus),
            Trait::S | Trait::N => Some(Axis::Perception),
            Trait::T | Trait::F => Some(Axis::Judgment),
            Trait::J | Trait::P => Some(Axis::Lifestyle),
            Trait::X => None,
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Trait::X
    }

    /// Position in [`Trait::LETTERS`].
    pub(crate) fn slot(self) -> Option<usize> {
        Trait::LETTERS.iter().position(|&t| t == self)
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One of the four binary MBTI dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Extraversion / Introversion
    EnergyFocus,
    /// Sensing / Intuition
    Perception,
    /// Thinking / Feeling
    Judgment,
    /// Judging / Perceiving
    Lifestyle,
}

impl Axis {
    /// Axes in type-string order.
    pub const ALL: [Axis; 4] = [
        Axis::EnergyFocus,
        Axis::Perception,
        Axis::Judgment,
        Axis::Lifestyle,
    ];

    /// The two letters of this axis, in the order they are written ("E/I").
    pub fn poles(self) -> (Trait, Trait) {
        match self {
            Axis::EnergyFocus => (Trait::E, Trait::I),
            Axis::Perception => (Trait::S, Trait::N),
            Axis::Judgment => (Trait::T, Trait::F),
            Axis::Lifestyle => (Trait::J, Trait::P),
        }
    }

    /// Letter chosen when both poles have the same count.
    ///
    /// These follow label frequency in the reference corpus and must not change.
    pub fn tie_break(self) -> Trait {
        match self {
            Axis::EnergyFocus => Trait::I,
            Axis::Perception => Trait::N,
            Axis::Judgment => Trait::F,
            Axis::Lifestyle => Trait::P,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Axis::EnergyFocus => 0,
            Axis::Perception => 1,
            Axis::Judgment => 2,
            Axis::Lifestyle => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::EnergyFocus => "E/I",
            Axis::Perception => "S/N",
            Axis::Judgment => "T/F",
            Axis::Lifestyle => "J/P",
        }
    }
}

/// A canonical four-letter MBTI type such as `INTJ`.
///
/// Construction always validates that each letter belongs to its axis, so
/// every value is one of the 16 valid combinations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MbtiType([Trait; 4]);

impl MbtiType {
    /// Build a type from one letter per axis.
    pub fn from_letters(letters: [Trait; 4]) -> Result<Self> {
        for (axis, letter) in Axis::ALL.iter().zip(letters.iter()) {
            if letter.axis() != Some(*axis) {
                let text: String = letters.iter().map(|t| t.as_char()).collect();
                return Err(Error::InvalidMbtiType(text));
            }
        }
        Ok(MbtiType(letters))
    }

    /// Build a type by choosing, per axis, the first (`false`) or second
    /// (`true`) pole.
    pub fn from_poles(second: [bool; 4]) -> Self {
        let mut letters = [Trait::X; 4];
        for axis in Axis::ALL {
            let (first, other) = axis.poles();
            letters[axis.index()] = if second[axis.index()] { other } else { first };
        }
        MbtiType(letters)
    }

    /// All 16 types. Bit `3 - axis` of the index selects the second pole.
    pub fn all() -> impl Iterator<Item = MbtiType> {
        (0u8..16).map(|bits| {
            MbtiType::from_poles(Axis::ALL.map(|axis| bits & (1 << (3 - axis.index())) != 0))
        })
    }

    pub fn letter(&self, axis: Axis) -> Trait {
        self.0[axis.index()]
    }

    pub fn letters(&self) -> [Trait; 4] {
        self.0
    }

    fn chars(&self) -> [char; 4] {
        self.0.map(Trait::as_char)
    }
}

impl FromStr for MbtiType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let letters: Vec<Trait> = trimmed.chars().filter_map(Trait::from_char).collect();
        if letters.len() != 4 || trimmed.chars().count() != 4 {
            return Err(Error::InvalidMbtiType(s.to_string()));
        }
        MbtiType::from_letters([letters[0], letters[1], letters[2], letters[3]])
            .map_err(|_| Error::InvalidMbtiType(s.to_string()))
    }
}

impl TryFrom<String> for MbtiType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MbtiType> for String {
    fn from(value: MbtiType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MbtiType({})", self)
    }
}

// Alphabetical, so sorted label sets match their string form.
impl Ord for MbtiType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chars().cmp(&other.chars())
    }
}

impl PartialOrd for MbtiType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
