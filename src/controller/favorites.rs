use crate::config::FavoriteMode;

/// Favorited jokes in the order they were added, without duplicates.
#[derive(Debug, Clone)]
pub struct Favorites {
    mode: FavoriteMode,
    items: Vec<String>,
}

impl Favorites {
    pub fn new(mode: FavoriteMode) -> Self {
        Self {
            mode,
            items: Vec::new(),
        }
    }

    /// Adds `joke` if absent. In toggle mode a present joke is removed instead.
    /// Returns whether the joke is a favorite afterwards.
    pub fn toggle(&mut self, joke: &str) -> bool {
        match self.items.iter().position(|j| j == joke) {
            None => {
                self.items.push(joke.to_string());
                true
            }
            Some(idx) => match self.mode {
                FavoriteMode::Latch => true,
                FavoriteMode::Toggle => {
                    self.items.remove(idx);
                    false
                }
            },
        }
    }

    pub fn contains(&self, joke: &str) -> bool {
        self.items.iter().any(|j| j == joke)
    }

    pub fn list(&self) -> &[String] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
