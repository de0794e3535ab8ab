//! Builds the category tree out of flat records.
//!
//! Grouping keeps first-seen order for every key and for the cards in each bucket.

use serde::Serialize;
use std::collections::HashMap;

use super::records::{PhraseRecord, VocabularyRecord};
use crate::domain::{Card, Category, Group, GroupContents, SubGroup};

/// Name of the single synthetic group every phrase level gets.
pub const ALL_GROUP: &str = "All";

/// A built, immutable tree of cards for one data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub categories: Vec<Category>,
}

impl Dataset {
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Cards at `category / group / sub_group`.
    ///
    /// Returns an empty slice when any component does not match. Asking for a
    /// sub-group of a direct group, or for direct cards of a nested group, also
    /// yields nothing.
    pub fn cards_for_path(&self, category: &str, group: &str, sub_group: Option<&str>) -> &[Card] {
        let Some(group) = self.category(category).and_then(|c| c.group(group)) else {
            return &[];
        };

        match (sub_group, &group.contents) {
            (None, GroupContents::Direct(cards)) => cards,
            (Some(name), GroupContents::Nested(subs)) => subs
                .iter()
                .find(|s| s.name == name)
                .map(|s| s.cards.as_slice())
                .unwrap_or(&[]),
            _ => &[],
        }
    }

    pub fn card_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.groups.iter())
            .map(Group::card_count)
            .sum()
    }
}

/// Insertion-ordered buckets keyed by string.
struct Buckets<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V: Default> Buckets<V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn entry(&mut self, key: &str) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot].1
    }

    fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<V: Default> Default for Buckets<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Phrases: each level becomes a category holding one `All` group of direct cards.
pub fn build_phrases(records: &[PhraseRecord]) -> Dataset {
    let mut levels: Buckets<Vec<Card>> = Buckets::new();
    for r in records {
        levels
            .entry(&r.level)
            .push(Card::new(&r.glyph, &r.meaning, &r.phrase));
    }

    let categories = levels
        .into_entries()
        .into_iter()
        .map(|(name, cards)| Category {
            name,
            groups: vec![Group::direct(ALL_GROUP, cards)],
        })
        .collect();

    Dataset { categories }
}

/// Vocabulary: category, then group, then sub-group.
///
/// A group whose only sub-group key is empty holds its cards directly. Otherwise each
/// non-empty key becomes a sub-group and cards filed under the empty key are dropped.
pub fn build_vocabulary(records: &[VocabularyRecord]) -> Dataset {
    let mut tree: Buckets<Buckets<Buckets<Vec<Card>>>> = Buckets::new();
    for r in records {
        tree.entry(&r.category)
            .entry(&r.group)
            .entry(&r.sub_group)
            .push(Card::new(&r.glyph, &r.meaning, &r.pronunciation));
    }

    let categories = tree
        .into_entries()
        .into_iter()
        .map(|(category, groups)| Category {
            groups: groups
                .into_entries()
                .into_iter()
                .map(|(group, subs)| build_group(&category, group, subs))
                .collect(),
            name: category,
        })
        .collect();

    Dataset { categories }
}

fn build_group(category: &str, name: String, subs: Buckets<Vec<Card>>) -> Group {
    let mut entries = subs.into_entries();

    if entries.len() == 1 && entries[0].0.is_empty() {
        let (_, cards) = entries.remove(0);
        return Group {
            name,
            contents: GroupContents::Direct(cards),
        };
    }

    let mut sub_groups = Vec::with_capacity(entries.len());
    for (sub_name, cards) in entries {
        if sub_name.is_empty() {
            tracing::warn!(
                "Dropping {} cards without sub-group in {}/{} (group has sub-groups)",
                cards.len(),
                category,
                name
            );
            continue;
        }
        sub_groups.push(SubGroup {
            name: sub_name,
            cards,
        });
    }

    Group {
        name,
        contents: GroupContents::Nested(sub_groups),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::records::{parse_phrases, parse_vocabulary};

    const VOCAB: &str = "\
category,group,sub_group,glyph,meaning,pronunciation
Noun,Food,,🍎,apple,ringo
Noun,Animal,Pet,🐶,dog,inu
Verb,Motion,,🚶,to walk,aruku
Noun,Food,,🍵,tea,ocha
Noun,Animal,Wild,🦊,fox,kitsune
Noun,Animal,Pet,🐱,cat,neko
";

    fn names(dataset: &Dataset) -> Vec<&str> {
        dataset.categories.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_phrase_row_builds_all_group() {
        let dataset = build_phrases(&parse_phrases("level,glyph,phrase,meaning\nN5,🍎,ringo,apple\n"));

        assert_eq!(names(&dataset), vec!["N5"]);
        let category = &dataset.categories[0];
        assert_eq!(category.groups.len(), 1);
        assert_eq!(category.groups[0].name, "All");
        assert_eq!(
            category.groups[0].direct_cards(),
            &[Card::new("🍎", "apple", "ringo")]
        );
    }

    #[test]
    fn test_phrase_levels_keep_file_order() {
        let content = "h\nN4,a,x,1\nN5,b,y,2\nN4,c,z,3\n";
        let dataset = build_phrases(&parse_phrases(content));
        assert_eq!(names(&dataset), vec!["N4", "N5"]);
        let n4: Vec<&str> = dataset
            .cards_for_path("N4", "All", None)
            .iter()
            .map(|c| c.primary_text.as_str())
            .collect();
        assert_eq!(n4, vec!["1", "3"]);
    }

    #[test]
    fn test_vocabulary_preserves_first_seen_order() {
        let dataset = build_vocabulary(&parse_vocabulary(VOCAB));
        assert_eq!(names(&dataset), vec!["Noun", "Verb"]);

        let noun = dataset.category("Noun").unwrap();
        let groups: Vec<&str> = noun.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(groups, vec!["Food", "Animal"]);

        let animal = noun.group("Animal").unwrap();
        let subs: Vec<&str> = animal.sub_groups().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(subs, vec!["Pet", "Wild"]);

        let pets: Vec<&str> = animal.sub_groups()[0]
            .cards
            .iter()
            .map(|c| c.primary_text.as_str())
            .collect();
        assert_eq!(pets, vec!["dog", "cat"]);
    }

    #[test]
    fn test_empty_sub_group_attaches_cards_directly() {
        let dataset = build_vocabulary(&parse_vocabulary(VOCAB));
        let food = dataset.category("Noun").unwrap().group("Food").unwrap();

        assert!(!food.has_sub_groups());
        assert!(food.sub_groups().is_empty());
        assert_eq!(
            food.direct_cards(),
            &[Card::new("🍎", "apple", "ringo"), Card::new("🍵", "tea", "ocha")]
        );
    }

    #[test]
    fn test_mixed_group_drops_unfiled_cards() {
        let content = "h\nNoun,Food,Fruit,🍎,apple,ringo\nNoun,Food,,🍞,bread,pan\nNoun,Food,Drink,🍵,tea,ocha\n";
        let dataset = build_vocabulary(&parse_vocabulary(content));
        let food = dataset.category("Noun").unwrap().group("Food").unwrap();

        assert!(food.direct_cards().is_empty());
        let subs: Vec<&str> = food.sub_groups().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(subs, vec!["Fruit", "Drink"]);
        assert_eq!(food.card_count(), 2);
    }

    #[test]
    fn test_groups_are_never_both_direct_and_nested() {
        let dataset = build_vocabulary(&parse_vocabulary(VOCAB));
        for group in dataset.categories.iter().flat_map(|c| c.groups.iter()) {
            assert!(group.direct_cards().is_empty() || group.sub_groups().is_empty());
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let records = parse_vocabulary(VOCAB);
        assert_eq!(build_vocabulary(&records), build_vocabulary(&records));
    }

    #[test]
    fn test_cards_for_path() {
        let dataset = build_vocabulary(&parse_vocabulary(VOCAB));

        assert_eq!(dataset.cards_for_path("Noun", "Food", None).len(), 2);
        assert_eq!(dataset.cards_for_path("Noun", "Animal", Some("Pet")).len(), 2);
        assert_eq!(dataset.cards_for_path("Verb", "Motion", None)[0].secondary_text, "aruku");
    }

    #[test]
    fn test_cards_for_unmatched_path_is_empty() {
        let dataset = build_vocabulary(&parse_vocabulary(VOCAB));

        assert!(dataset.cards_for_path("Adverb", "Food", None).is_empty());
        assert!(dataset.cards_for_path("Noun", "Plants", None).is_empty());
        assert!(dataset.cards_for_path("Noun", "Animal", Some("Bird")).is_empty());
        // Level mismatches
        assert!(dataset.cards_for_path("Noun", "Animal", None).is_empty());
        assert!(dataset.cards_for_path("Noun", "Food", Some("Fruit")).is_empty());
    }

    #[test]
    fn test_card_count() {
        let dataset = build_vocabulary(&parse_vocabulary(VOCAB));
        assert_eq!(dataset.card_count(), 6);
    }
}
