use serde::{Deserialize, Serialize};

/// Profile handed over by the session provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Who is looking at the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Viewer {
    #[default]
    Guest,
    Authenticated(AuthenticatedUser),
}

impl Viewer {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::Authenticated(_))
    }

    pub fn display_name(&self) -> &str {
        match self {
            Viewer::Guest => "Guest",
            Viewer::Authenticated(user) => &user.name,
        }
    }

    /// Initials for the navbar avatar fallback.
    pub fn initials(&self) -> String {
        match self {
            Viewer::Guest => "G".into(),
            Viewer::Authenticated(user) => user
                .name
                .split_whitespace()
                .filter_map(|part| part.chars().next())
                .take(2)
                .flat_map(char::to_uppercase)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_payload_deserializes_into_variant() {
        let viewer: Viewer = serde_json::from_str(
            r#"{"status":"authenticated","name":"grace hopper","email":"grace@example.com"}"#,
        )
        .unwrap();
        assert!(viewer.is_authenticated());
        assert_eq!(viewer.display_name(), "grace hopper");
        assert_eq!(viewer.initials(), "GH");

        let guest: Viewer = serde_json::from_str(r#"{"status":"guest"}"#).unwrap();
        assert_eq!(guest, Viewer::Guest);
        assert_eq!(guest.initials(), "G");
    }
}
