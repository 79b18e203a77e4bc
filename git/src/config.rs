use git2::Config as GitConfig;

/// Identity used when git config has no `user.name`/`user.email`
pub const FALLBACK_NAME: &str = "github-actions[bot]";
pub const FALLBACK_EMAIL: &str = "41898282+github-actions[bot]@users.noreply.github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorInfo {
    pub name: String,
    pub email: String,
}

impl AuthorInfo {
    /// Reads the commit identity from `config`, filling gaps with the bot identity
    pub fn from_config(config: &GitConfig) -> Self {
        let name = config
            .get_string("user.name")
            .unwrap_or_else(|_| FALLBACK_NAME.to_string());
        let email = config
            .get_string("user.email")
            .unwrap_or_else(|_| FALLBACK_EMAIL.to_string());

        Self { name, email }
    }
}

impl Default for AuthorInfo {
    fn default() -> Self {
        Self {
            name: FALLBACK_NAME.to_string(),
            email: FALLBACK_EMAIL.to_string(),
        }
    }
}
