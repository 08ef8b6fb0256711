//! Posture alphabet and body regions

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::error::PostureError;

/// Classification of one body region for one sampling tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostureLabel {
    /// Correct posture
    Upright,
    /// Leaning back (back only)
    Reclined,
    /// Leaning toward the screen
    ForwardLeaning,
}

impl PostureLabel {
    /// All labels, in code order
    pub const ALL: [PostureLabel; 3] = [
        PostureLabel::Upright,
        PostureLabel::Reclined,
        PostureLabel::ForwardLeaning,
    ];

    /// Single-character wire code
    pub fn code(&self) -> char {
        match self {
            PostureLabel::Upright => 'u',
            PostureLabel::Reclined => 'r',
            PostureLabel::ForwardLeaning => 'f',
        }
    }

    /// Parse a wire code (case-insensitive)
    pub fn from_code(code: char) -> Result<Self, PostureError> {
        match code.to_ascii_lowercase() {
            'u' => Ok(PostureLabel::Upright),
            'r' => Ok(PostureLabel::Reclined),
            'f' => Ok(PostureLabel::ForwardLeaning),
            _ => Err(PostureError::ContractViolation { code }),
        }
    }
}

impl TryFrom<char> for PostureLabel {
    type Error = PostureError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl FromStr for PostureLabel {
    type Err = PostureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_code(c),
            (Some(c), Some(_)) => Err(PostureError::ContractViolation { code: c }),
            (None, _) => Err(PostureError::ContractViolation { code: ' ' }),
        }
    }
}

impl std::fmt::Display for PostureLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PostureLabel::Upright => "UPRIGHT",
            PostureLabel::Reclined => "RECLINED",
            PostureLabel::ForwardLeaning => "FORWARD_LEANING",
        };
        write!(f, "{}", name)
    }
}

/// Body region a window watches
///
/// The region selects the predicate set used to classify its window:
/// the back treats reclined and forward-leaning as incorrect, the neck
/// only forward-leaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    Back,
    Neck,
}

impl Region {
    /// Labels that count as incorrect posture for this region
    pub fn incorrect_labels(&self) -> &'static [PostureLabel] {
        match self {
            Region::Back => &[PostureLabel::Reclined, PostureLabel::ForwardLeaning],
            Region::Neck => &[PostureLabel::ForwardLeaning],
        }
    }

    /// Does `label` count as incorrect for this region?
    pub fn is_incorrect_label(&self, label: PostureLabel) -> bool {
        self.incorrect_labels().contains(&label)
    }

    /// Human description, e.g. "forward-leaning neck"
    pub fn describe(&self, label: PostureLabel) -> String {
        let posture = match label {
            PostureLabel::Upright => "upright",
            PostureLabel::Reclined => "reclined",
            PostureLabel::ForwardLeaning => "forward-leaning",
        };
        format!("{} {}", posture, self.name())
    }

    /// Lowercase region name
    pub fn name(&self) -> &'static str {
        match self {
            Region::Back => "back",
            Region::Neck => "neck",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name().to_uppercase())
    }
}
