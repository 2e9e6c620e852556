use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    XLarge,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPreferences {
    pub font_size: FontSize,
    pub dark_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_medium_light_reading() {
        let prefs = ReadingPreferences::default();
        assert_eq!(prefs.font_size, FontSize::Medium);
        assert!(!prefs.dark_mode);
        assert_eq!(
            serde_json::to_string(&FontSize::XLarge).unwrap(),
            r#""x-large""#
        );
    }
}
