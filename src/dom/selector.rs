//! The `querySelector` subset the course pages rely on: a single compound
//! selector made of an optional tag name, an optional `#id` and any number of
//! `.class` parts (`.topics-container`, `a.btn-primary`, `#topics`).

use crate::utils::error::{Result, TopicsError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| TopicsError::InvalidSelector {
            selector: input.to_string(),
            reason: reason.to_string(),
        };

        let source = input.trim();
        if source.is_empty() {
            return Err(invalid("selector is empty"));
        }

        let mut selector = Selector::default();
        let mut chars = source.chars().peekable();

        // leading tag name
        let mut tag = String::new();
        while let Some(&c) = chars.peek() {
            if !is_ident_char(c) {
                break;
            }
            tag.push(c.to_ascii_lowercase());
            chars.next();
        }
        if !tag.is_empty() {
            selector.tag = Some(tag);
        }

        while let Some(marker) = chars.next() {
            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if !is_ident_char(c) {
                    break;
                }
                name.push(c);
                chars.next();
            }

            match marker {
                '#' | '.' if name.is_empty() => {
                    return Err(invalid(&format!("'{}' must be followed by a name", marker)));
                }
                '#' if selector.id.is_some() => {
                    return Err(invalid("only one #id is supported"));
                }
                '#' => selector.id = Some(name),
                '.' => selector.classes.push(name),
                c if c.is_whitespace() || c == '>' || c == '+' || c == '~' || c == ',' => {
                    return Err(invalid("combinators and selector lists are not supported"));
                }
                c => return Err(invalid(&format!("unexpected character '{}'", c))),
            }
        }

        Ok(selector)
    }
}
