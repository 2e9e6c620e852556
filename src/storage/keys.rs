use crate::models::TutorialId;

pub const SAVED_TUTORIALS: &str = "savedTutorials";
pub const LIKED_TUTORIALS: &str = "likedTutorials";
pub const FONT_SIZE: &str = "tutorial-font-size";
pub const DARK_MODE: &str = "tutorial-dark-mode";

pub fn completed_sections(tutorial_id: &TutorialId) -> String {
    format!("tutorial-{tutorial_id}-completed-sections")
}

/// Denormalized cache of the derived percentage.
pub fn progress_percent(tutorial_id: &TutorialId) -> String {
    format!("tutorial-{tutorial_id}-progress")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_tutorial_keys_embed_id() {
        let id = TutorialId::from("python-loops");
        assert_eq!(
            completed_sections(&id),
            "tutorial-python-loops-completed-sections"
        );
        assert_eq!(progress_percent(&id), "tutorial-python-loops-progress");
    }
}
