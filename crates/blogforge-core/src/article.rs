//! Article composition from raw model output.
//!
//! The generator is prompted to return a title and an article separated by
//! [`CONTENT_DELIMITER`]. Models do not always follow instructions, so the
//! split has to tolerate a missing delimiter.

/// Literal token separating title from article in the model response.
pub const CONTENT_DELIMITER: &str = "---CONTENT---";

/// Title used when neither the caller nor the model produced one.
pub const FALLBACK_TITLE: &str = "A Blog Post About Your Video";

/// A composed article, both fields non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub body: String,
}

/// Split raw model output into a title and body.
///
/// A `preferred_title` (user-supplied, or the video's metadata title) always
/// overrides whatever the model produced. When the delimiter is absent the
/// whole response becomes the body and the title falls back to
/// `preferred_title` or [`FALLBACK_TITLE`].
///
/// Returns `None` when the resulting body would be empty.
pub fn compose_article(raw: &str, preferred_title: Option<&str>) -> Option<Article> {
    let raw = raw.trim();
    let preferred = preferred_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let (title, body) = match raw.split_once(CONTENT_DELIMITER) {
        Some((model_title, body)) => {
            let model_title = model_title.trim().replace('"', "");
            let title = preferred.unwrap_or(model_title);
            (title, body.trim().to_string())
        }
        None => {
            let title = preferred.unwrap_or_else(|| FALLBACK_TITLE.to_string());
            (title, raw.to_string())
        }
    };

    if body.is_empty() {
        return None;
    }

    let title = if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title
    };

    Some(Article { title, body })
}
