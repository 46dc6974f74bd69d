use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the levels table: one playable campus location
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LevelModel {
    pub id: String,
    pub latitude: f64,  // degrees, [-90, 90]
    pub longitude: f64, // degrees, [-180, 180]
    pub image_id: String,
    pub play_count: i64, // monotonic, only ever incremented
    pub tags: Vec<String>,
    pub author: Option<String>,
}

impl LevelModel {
    /// Creates a new level with a generated ID and zero plays
    pub fn new(latitude: f64, longitude: f64, image_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            latitude,
            longitude,
            image_id,
            play_count: 0,
            tags: Vec::new(),
            author: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_author(mut self, author: String) -> Self {
        self.author = Some(author);
        self
    }

    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_level_starts_unplayed() {
        let level = LevelModel::new(33.7934, -117.8514, "img-1".to_string());
        assert!(!level.id.is_empty());
        assert_eq!(level.play_count, 0);
        assert!(level.tags.is_empty());
        assert!(level.author.is_none());
        assert!(level.has_valid_coordinates());
    }

    #[test]
    fn coordinate_validity_bounds() {
        let mut level = LevelModel::new(90.0, 180.0, "img".to_string());
        assert!(level.has_valid_coordinates());

        level.latitude = 90.1;
        assert!(!level.has_valid_coordinates());

        level.latitude = 45.0;
        level.longitude = f64::NAN;
        assert!(!level.has_valid_coordinates());
    }
}
