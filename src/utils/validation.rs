use crate::dom::selector::Selector;
use crate::utils::error::{Result, TopicsError};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn slug_pattern() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("slug pattern is valid"))
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TopicsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TopicsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TopicsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Routes are relative directories such as `courses/java/`.
pub fn validate_route(field_name: &str, route: &str) -> Result<()> {
    validate_path(field_name, route)?;

    let reason = if route.starts_with('/') {
        Some("Route must be relative")
    } else if !route.ends_with('/') {
        Some("Route must end with '/'")
    } else if route.split('/').any(|segment| segment == "..") {
        Some("Route cannot contain '..'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(TopicsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: route.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn validate_slug(field_name: &str, slug: &str) -> Result<()> {
    if !slug_pattern().is_match(slug) {
        return Err(TopicsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: slug.to_string(),
            reason: "Slug must be lowercase letters, digits, '-' or '_'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_selector(field_name: &str, selector: &str) -> Result<()> {
    Selector::parse(selector).map(|_| ()).map_err(|e| match e {
        TopicsError::InvalidSelector { reason, .. } => TopicsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: selector.to_string(),
            reason,
        },
        other => other,
    })
}

/// The call-to-action must point at an in-page anchor (`#<id>`).
pub fn validate_fragment_href(field_name: &str, href: &str) -> Result<()> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() && !id.contains(char::is_whitespace) => Ok(()),
        _ => Err(TopicsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: href.to_string(),
            reason: "Expected a same-page fragment like '#topics'".to_string(),
        }),
    }
}
