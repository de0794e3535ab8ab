use serde::Serialize;
use std::collections::HashMap;

use super::filter::status_of;
use crate::domain::{Card, CardStatus, CollectionPath};

/// Status counts over a whole (unfiltered) collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
  pub total: usize,
  pub unseen: usize,
  pub correct: usize,
  pub wrong: usize,
}

impl ProgressSummary {
  pub fn from_statuses(path: &CollectionPath, cards: &[Card], statuses: &HashMap<String, CardStatus>) -> Self {
    let mut summary = Self {
      total: cards.len(),
      ..Self::default()
    };
    for card in cards {
      match status_of(statuses, path, card) {
        CardStatus::Unseen => summary.unseen += 1,
        CardStatus::Correct => summary.correct += 1,
        CardStatus::Wrong => summary.wrong += 1,
      }
    }
    summary
  }

  /// Share of cards marked correct, 0-100
  pub fn percentage(&self) -> usize {
    if self.total > 0 {
      (self.correct * 100) / self.total
    } else {
      0
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_summary_counts() {
    let path = CollectionPath::new("N5", "All", None);
    let cards = vec![
      Card::new("👋", "Hello", "konnichiwa"),
      Card::new("🌅", "Good morning", "ohayou gozaimasu"),
      Card::new("🌙", "Good evening", "konbanwa"),
      Card::new("🙏", "Thank you", "arigatou"),
    ];
    let statuses: HashMap<String, CardStatus> = [
      (path.card_id("Hello"), CardStatus::Correct),
      (path.card_id("Good morning"), CardStatus::Wrong),
      (path.card_id("Thank you"), CardStatus::Correct),
    ]
    .into_iter()
    .collect();

    let summary = ProgressSummary::from_statuses(&path, &cards, &statuses);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.wrong, 1);
    assert_eq!(summary.unseen, 1);
    assert_eq!(summary.percentage(), 50);
  }

  #[test]
  fn test_empty_summary_percentage() {
    assert_eq!(ProgressSummary::default().percentage(), 0);
  }
}
