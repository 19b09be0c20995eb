use super::types::User;

pub const DEFAULT_AVATAR: &str = "/default-avatar.png";

/// Resolves an avatar reference from the API into an absolute URL. Relative
/// media paths are served from the API origin.
#[must_use]
pub fn avatar_url(origin: &str, avatar: Option<&str>) -> String {
    let Some(avatar) = avatar.map(str::trim).filter(|a| !a.is_empty()) else {
        return DEFAULT_AVATAR.to_string();
    };

    if avatar.starts_with("http://") || avatar.starts_with("https://") {
        return avatar.to_string();
    }

    let origin = origin.trim_end_matches('/');

    if avatar.starts_with("/media/") {
        format!("{origin}{avatar}")
    } else if avatar.starts_with("media/") {
        format!("{origin}/{avatar}")
    } else {
        format!("{origin}/media/profile_pictures/{avatar}")
    }
}

/// Avatar URL of a user; `profile_picture` wins over `avatar`.
#[must_use]
pub fn user_avatar(origin: &str, user: Option<&User>) -> String {
    let picture = user.and_then(|user| {
        user.profile_picture
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(user.avatar.as_deref())
    });
    avatar_url(origin, picture)
}

/// Single-letter fallback shown when there is no picture.
#[must_use]
pub fn initials(username: Option<&str>) -> String {
    username
        .and_then(|name| name.trim().chars().next())
        .map_or_else(|| "U".to_string(), |c| c.to_uppercase().collect())
}
