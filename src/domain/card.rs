use serde::{Deserialize, Serialize};

/// One learnable unit: a glyph plus two display texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
  pub glyph: String,
  /// Recall-mode front face (English meaning or phrase)
  pub primary_text: String,
  /// Alternate face (pronunciation)
  pub secondary_text: String,
}

impl Card {
  pub fn new(glyph: &str, primary_text: &str, secondary_text: &str) -> Self {
    Self {
      glyph: glyph.to_string(),
      primary_text: primary_text.to_string(),
      secondary_text: secondary_text.to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubGroup {
  pub name: String,
  pub cards: Vec<Card>,
}

/// What a group holds: cards directly, or a further level of sub-groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum GroupContents {
  Direct(Vec<Card>),
  Nested(Vec<SubGroup>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
  pub name: String,
  pub contents: GroupContents,
}

impl Group {
  pub fn direct(name: &str, cards: Vec<Card>) -> Self {
    Self {
      name: name.to_string(),
      contents: GroupContents::Direct(cards),
    }
  }

  pub fn nested(name: &str, sub_groups: Vec<SubGroup>) -> Self {
    Self {
      name: name.to_string(),
      contents: GroupContents::Nested(sub_groups),
    }
  }

  pub fn has_sub_groups(&self) -> bool {
    matches!(self.contents, GroupContents::Nested(_))
  }

  /// Cards held directly by this group (empty for nested groups)
  pub fn direct_cards(&self) -> &[Card] {
    match &self.contents {
      GroupContents::Direct(cards) => cards,
      GroupContents::Nested(_) => &[],
    }
  }

  /// Sub-groups of this group (empty for direct groups)
  pub fn sub_groups(&self) -> &[SubGroup] {
    match &self.contents {
      GroupContents::Direct(_) => &[],
      GroupContents::Nested(subs) => subs,
    }
  }

  /// Total number of cards at or below this group
  pub fn card_count(&self) -> usize {
    match &self.contents {
      GroupContents::Direct(cards) => cards.len(),
      GroupContents::Nested(subs) => subs.iter().map(|s| s.cards.len()).sum(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub name: String,
  pub groups: Vec<Group>,
}

impl Category {
  pub fn group(&self, name: &str) -> Option<&Group> {
    self.groups.iter().find(|g| g.name == name)
  }
}

/// Address of one card collection inside a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionPath {
  pub category: String,
  pub group: String,
  #[serde(default)]
  pub sub_group: Option<String>,
}

impl CollectionPath {
  pub fn new(category: &str, group: &str, sub_group: Option<&str>) -> Self {
    Self {
      category: category.to_string(),
      group: group.to_string(),
      sub_group: sub_group.map(|s| s.to_string()),
    }
  }

  /// Persistence key for this collection's cursor: `category-group-subgroup`
  pub fn collection_key(&self) -> String {
    format!(
      "{}-{}-{}",
      self.category,
      self.group,
      self.sub_group.as_deref().unwrap_or("")
    )
  }

  /// Common prefix of every card id in this collection
  pub fn card_id_prefix(&self) -> String {
    self.card_id("")
  }

  /// Stable id of a card within this collection.
  pub fn card_id(&self, primary_text: &str) -> String {
    generate_card_id(
      &self.category,
      &self.group,
      self.sub_group.as_deref(),
      primary_text,
    )
  }
}

/// Build the persistence id of a card.
///
/// Cards whose primary text differs only by case or spacing collide; that is accepted.
pub fn generate_card_id(
  category: &str,
  group: &str,
  sub_group: Option<&str>,
  primary_text: &str,
) -> String {
  format!(
    "{}-{}-{}-{}",
    category,
    group,
    sub_group.unwrap_or("none"),
    primary_text
  )
  .replace(' ', "_")
  .to_lowercase()
}
