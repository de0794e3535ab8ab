use serde::{Deserialize, Serialize};

/// Recorded outcome for a single card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
  #[default]
  Unseen,
  Correct,
  Wrong,
}

impl CardStatus {
  /// Parse a stored value. Unknown strings fall back to `Unseen`.
  pub fn from_str(s: &str) -> Self {
    match s {
      "CORRECT" => Self::Correct,
      "WRONG" => Self::Wrong,
      _ => Self::Unseen,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Unseen => "UNSEEN",
      Self::Correct => "CORRECT",
      Self::Wrong => "WRONG",
    }
  }
}

/// Global policy selecting which cards of a collection are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterMode {
  #[default]
  All,
  WrongOnly,
  WrongAndUnseen,
}

impl FilterMode {
  pub const ALL_MODES: [FilterMode; 3] = [Self::All, Self::WrongOnly, Self::WrongAndUnseen];

  /// Parse a stored value. Unknown strings fall back to `All`.
  pub fn from_str(s: &str) -> Self {
    match s {
      "WRONG_ONLY" => Self::WrongOnly,
      "WRONG_AND_UNSEEN" => Self::WrongAndUnseen,
      _ => Self::All,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::All => "ALL",
      Self::WrongOnly => "WRONG_ONLY",
      Self::WrongAndUnseen => "WRONG_AND_UNSEEN",
    }
  }

  /// Whether a card with the given status passes this filter
  pub fn admits(&self, status: CardStatus) -> bool {
    match self {
      Self::All => true,
      Self::WrongOnly => status == CardStatus::Wrong,
      Self::WrongAndUnseen => matches!(status, CardStatus::Wrong | CardStatus::Unseen),
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::All => "All Questions",
      Self::WrongOnly => "Wrong Only",
      Self::WrongAndUnseen => "Wrong + Unseen",
    }
  }
}

/// Which face of a card is presented first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardMode {
  /// Meaning first, glyph shown
  #[default]
  Recall,
  /// Pronunciation first, glyph hidden
  Read,
}

impl CardMode {
  /// Parse a stored value. Unknown strings fall back to `Recall`.
  pub fn from_str(s: &str) -> Self {
    match s {
      "READ" => Self::Read,
      _ => Self::Recall,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Recall => "RECALL",
      Self::Read => "READ",
    }
  }
}
