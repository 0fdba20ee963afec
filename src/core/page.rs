use crate::core::lifecycle::{LifecycleState, PageLifecycle};
use crate::core::renderer::{render, wire_smooth_scroll};
use crate::dom::{ClickEvent, Document, NodeId, Selector};
use crate::domain::model::Course;
use crate::utils::error::Result;

pub const CALL_TO_ACTION_LABEL: &str = "EXPLORE COURSE";
pub const TOPICS_HEADING: &str = "Course Topics";

/// One course landing page: the host markup the LMS template provides, plus
/// the topic cards rendered into it once the page is ready.
#[derive(Debug)]
pub struct CoursePage<'a> {
    course: &'a Course,
    lifecycle: PageLifecycle,
}

impl<'a> CoursePage<'a> {
    /// Builds the host skeleton:
    ///
    /// ```text
    /// header.hero > h1 {name} + a.btn-primary[href]
    /// section#{target} > h2 + div.topics-container
    /// ```
    pub fn build(course: &'a Course) -> Result<Self> {
        let mut document = Document::new();
        let layout = &course.layout;

        let charset = document.create_element("meta");
        document.set_attribute(charset, "charset", "utf-8")?;
        let title = document.create_element("title");
        document.set_text_content(title, &course.name)?;
        document.append_child(document.head(), charset)?;
        document.append_child(document.head(), title)?;

        let hero = document.create_element("header");
        document.set_class_name(hero, "hero")?;
        let heading = document.create_element("h1");
        document.set_text_content(heading, &course.name)?;
        let action = scaffold_element(&mut document, &layout.action_selector, "a")?;
        document.set_attribute(action, "href", &layout.action_href)?;
        document.set_text_content(action, CALL_TO_ACTION_LABEL)?;
        document.append_child(hero, heading)?;
        document.append_child(hero, action)?;

        let section = document.create_element("section");
        if let Some(id) = layout.target_id() {
            document.set_attribute(section, "id", id)?;
        }
        let section_heading = document.create_element("h2");
        document.set_text_content(section_heading, TOPICS_HEADING)?;
        let container = scaffold_element(&mut document, &layout.container_selector, "div")?;
        document.append_child(section, section_heading)?;
        document.append_child(section, container)?;

        document.append_child(document.body(), hero)?;
        document.append_child(document.body(), section)?;

        Ok(Self {
            course,
            lifecycle: PageLifecycle::new(document),
        })
    }

    /// Wraps an existing document, e.g. hand-built markup in tests.
    pub fn from_document(course: &'a Course, document: Document) -> Self {
        Self {
            course,
            lifecycle: PageLifecycle::new(document),
        }
    }

    /// Fires the ready hook: render the modules, then wire the call-to-action.
    /// If rendering fails the button is left unwired. Returns `false` when
    /// the page was already loaded.
    pub fn load(&mut self) -> Result<bool> {
        let course = self.course;
        let layout = &course.layout;

        self.lifecycle.on_ready(|document| {
            render(
                document,
                &course.modules,
                &layout.container_selector,
                &layout.card_class,
            )?;
            wire_smooth_scroll(document, &layout.action_selector)?;
            Ok(())
        })
    }

    pub fn click_call_to_action(&mut self) -> Result<ClickEvent> {
        self.lifecycle.click(&self.course.layout.action_selector)
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn course(&self) -> &Course {
        self.course
    }

    pub fn document(&self) -> &Document {
        self.lifecycle.document()
    }

    pub fn to_html(&self) -> String {
        self.document().document_html()
    }
}

/// Creates an element that the given selector will match.
fn scaffold_element(document: &mut Document, selector: &str, fallback_tag: &str) -> Result<NodeId> {
    let parsed = Selector::parse(selector)?;
    let tag = parsed.tag.as_deref().unwrap_or(fallback_tag);
    let element = document.create_element(tag);

    if let Some(id) = &parsed.id {
        document.set_attribute(element, "id", id)?;
    }
    if !parsed.classes.is_empty() {
        document.set_class_name(element, &parsed.classes.join(" "))?;
    }
    Ok(element)
}
