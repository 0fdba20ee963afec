use serde::{Deserialize, Serialize};

/// A titled group of topics, displayed as one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub title: String,
    pub items: Vec<String>,
}

impl ModuleDescriptor {
    pub fn new<T, I>(title: T, items: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            title: title.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

fn default_container_selector() -> String {
    ".topics-container".to_string()
}

fn default_action_selector() -> String {
    ".btn-primary".to_string()
}

fn default_action_href() -> String {
    "#topics".to_string()
}

fn default_card_class() -> String {
    "topic-card".to_string()
}

/// Where the renderer finds its mount point and call-to-action on the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default = "default_container_selector")]
    pub container_selector: String,
    #[serde(default = "default_action_selector")]
    pub action_selector: String,
    #[serde(default = "default_action_href")]
    pub action_href: String,
    #[serde(default = "default_card_class")]
    pub card_class: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            container_selector: default_container_selector(),
            action_selector: default_action_selector(),
            action_href: default_action_href(),
            card_class: default_card_class(),
        }
    }
}

impl PageLayout {
    /// Id of the section the call-to-action scrolls to, if the href is a fragment.
    pub fn target_id(&self) -> Option<&str> {
        self.action_href
            .strip_prefix('#')
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub slug: String,
    pub name: String,
    pub route: String,
    #[serde(default)]
    pub layout: PageLayout,
    pub modules: Vec<ModuleDescriptor>,
}

impl Course {
    pub fn topic_count(&self) -> usize {
        self.modules.iter().map(|m| m.items.len()).sum()
    }

    /// Relative path of the published page, e.g. `courses/java/index.html`.
    pub fn output_file(&self) -> String {
        format!("{}index.html", self.route)
    }
}
