pub mod card;
pub mod progress;

pub use card::{generate_card_id, Card, Category, CollectionPath, Group, GroupContents, SubGroup};
pub use progress::{CardMode, CardStatus, FilterMode};
