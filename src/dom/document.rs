use crate::dom::events::{ClickEvent, Listener, Navigation, ScrollBehavior, ScrollRecord, CLICK};
use crate::dom::selector::Selector;
use crate::utils::error::{Result, TopicsError};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// In-memory stand-in for the browser document: an arena of nodes rooted at
/// `<html>`, plus the click listeners, scroll calls and default navigations
/// observed while the page is live.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    listeners: HashMap<NodeId, Vec<(String, Listener)>>,
    scroll_log: Vec<ScrollRecord>,
    navigations: Vec<Navigation>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .field("scroll_log", &self.scroll_log)
            .field("navigations", &self.navigations)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut document = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            listeners: HashMap::new(),
            scroll_log: Vec::new(),
            navigations: Vec::new(),
        };

        let root = document.push_node(NodeKind::Element {
            tag: "html".to_string(),
            attributes: Vec::new(),
        });
        let head = document.create_element("head");
        let body = document.create_element("body");
        document.attach(root, head);
        document.attach(root, body);

        document.root = root;
        document.head = head;
        document.body = body;
        document
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .ok_or(TopicsError::InvalidNode { id: id.0 })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .ok_or(TopicsError::InvalidNode { id: id.0 })
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Links a freshly created, parentless node. Both ids must be valid.
    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != child);
        }
    }

    /// Creates a detached element, like `document.createElement`.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    /// Appends `child` as the last child of `parent`, moving it out of its
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.is_element(parent)? {
            return Err(TopicsError::HierarchyError {
                parent: parent.0,
                child: child.0,
                reason: "parent is a text node".to_string(),
            });
        }
        self.node(child)?;

        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(TopicsError::HierarchyError {
                    parent: parent.0,
                    child: child.0,
                    reason: "child is an ancestor of parent".to_string(),
                });
            }
            cursor = self.nodes[ancestor.0].parent;
        }

        self.detach(child);
        self.attach(parent, child);
        Ok(())
    }

    pub fn is_element(&self, id: NodeId) -> Result<bool> {
        Ok(matches!(self.node(id)?.kind, NodeKind::Element { .. }))
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    /// All child nodes, text included.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| matches!(self.nodes[child.0].kind, NodeKind::Element { .. }))
            .collect()
    }

    /// Replaces every child with a single text node (none for an empty string).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<()> {
        if let NodeKind::Text(content) = &mut self.node_mut(id)?.kind {
            *content = text.to_string();
            return Ok(());
        }

        let old_children = std::mem::take(&mut self.nodes[id.0].children);
        for child in old_children {
            self.nodes[child.0].parent = None;
        }

        if !text.is_empty() {
            let text_node = self.push_node(NodeKind::Text(text.to_string()));
            self.attach(id, text_node);
        }
        Ok(())
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for &child in &node.children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element { attributes, .. } => {
                let name = name.to_ascii_lowercase();
                match attributes.iter_mut().find(|(key, _)| *key == name) {
                    Some((_, existing)) => *existing = value.to_string(),
                    None => attributes.push((name, value.to_string())),
                }
                Ok(())
            }
            NodeKind::Text(_) => Err(TopicsError::InvalidNode { id: id.0 }),
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn set_class_name(&mut self, id: NodeId, class_name: &str) -> Result<()> {
        self.set_attribute(id, "class", class_name)
    }

    pub fn has_class(&self, id: NodeId, class_name: &str) -> bool {
        self.attribute(id, "class")
            .map(|classes| classes.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }

    /// True when the node hangs off the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == self.root {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let Some(tag) = self.tag_name(id) else {
            return false;
        };
        if let Some(expected) = &selector.tag {
            if tag != expected {
                return false;
            }
        }
        if let Some(expected) = &selector.id {
            if self.attribute(id, "id") != Some(expected.as_str()) {
                return false;
            }
        }
        selector.classes.iter().all(|class| self.has_class(id, class))
    }

    /// Connected elements in document (pre-)order.
    fn elements_in_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !matches!(self.nodes[id.0].kind, NodeKind::Element { .. }) {
                continue;
            }
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev());
        }
        order
    }

    pub fn select_first(&self, selector: &Selector) -> Option<NodeId> {
        self.elements_in_order()
            .into_iter()
            .find(|&id| self.matches(id, selector))
    }

    /// `document.querySelector`: first connected element in document order.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_first(&selector))
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .elements_in_order()
            .into_iter()
            .filter(|&id| self.matches(id, &selector))
            .collect())
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements_in_order()
            .into_iter()
            .find(|&node| self.attribute(node, "id") == Some(id))
    }

    pub fn add_event_listener(
        &mut self,
        id: NodeId,
        event_type: &str,
        listener: Listener,
    ) -> Result<()> {
        if !self.is_element(id)? {
            return Err(TopicsError::InvalidNode { id: id.0 });
        }
        self.listeners
            .entry(id)
            .or_default()
            .push((event_type.to_string(), listener));
        Ok(())
    }

    pub fn listener_count(&self, id: NodeId, event_type: &str) -> usize {
        self.listeners
            .get(&id)
            .map(|listeners| listeners.iter().filter(|(t, _)| t == event_type).count())
            .unwrap_or(0)
    }

    /// Simulates a user click on `id`. Listeners on the element run in
    /// registration order; if none of them prevented the default and the
    /// element is a link, the navigation is recorded.
    pub fn dispatch_click(&mut self, id: NodeId) -> Result<ClickEvent> {
        if !self.is_element(id)? {
            return Err(TopicsError::InvalidNode { id: id.0 });
        }

        let listeners: Vec<Listener> = self
            .listeners
            .get(&id)
            .map(|registered| {
                registered
                    .iter()
                    .filter(|(event_type, _)| event_type == CLICK)
                    .map(|(_, listener)| listener.clone())
                    .collect()
            })
            .unwrap_or_default();

        let mut event = ClickEvent::new(id);
        for listener in listeners {
            (*listener)(self, &mut event);
        }

        if !event.default_prevented() && self.tag_name(id) == Some("a") {
            if let Some(href) = self.attribute(id, "href") {
                let navigation = Navigation {
                    source: id,
                    href: href.to_string(),
                };
                tracing::debug!("Default navigation to {}", navigation.href);
                self.navigations.push(navigation);
            }
        }

        Ok(event)
    }

    /// `element.scrollIntoView({ behavior })`. The viewport is not modelled,
    /// so the call is recorded instead.
    pub fn scroll_into_view(&mut self, id: NodeId, behavior: ScrollBehavior) -> Result<()> {
        self.node(id)?;
        self.scroll_log.push(ScrollRecord {
            target: id,
            behavior,
        });
        Ok(())
    }

    pub fn scroll_log(&self) -> &[ScrollRecord] {
        &self.scroll_log
    }

    pub fn navigations(&self) -> &[Navigation] {
        &self.navigations
    }

    #[cfg(test)]
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_new_document_skeleton() {
        let doc = Document::new();
        assert_eq!(doc.tag_name(doc.root()), Some("html"));
        assert_eq!(doc.element_children(doc.root()), vec![doc.head(), doc.body()]);
        assert!(doc.is_connected(doc.body()));
    }

    #[test]
    fn test_append_child_moves_node() {
        let mut doc = Document::new();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        let item = doc.create_element("span");
        doc.append_child(doc.body(), first).unwrap();
        doc.append_child(doc.body(), second).unwrap();

        doc.append_child(first, item).unwrap();
        doc.append_child(second, item).unwrap();

        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), &[item]);
        assert_eq!(doc.parent(item), Some(second));
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();

        let err = doc.append_child(inner, outer).unwrap_err();
        assert!(matches!(err, TopicsError::HierarchyError { .. }));
    }

    #[test]
    fn test_text_content_replaces_children() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        let li = doc.create_element("li");
        doc.append_child(list, li).unwrap();
        doc.set_text_content(li, "Loops").unwrap();
        assert_eq!(doc.text_content(list), "Loops");

        doc.set_text_content(list, "replaced").unwrap();
        assert_eq!(doc.text_content(list), "replaced");
        assert_eq!(doc.parent(li), None);
        assert!(doc.element_children(list).is_empty());
    }

    #[test]
    fn test_query_selector_finds_first_connected_match() {
        let mut doc = Document::new();
        let detached = doc.create_element("div");
        doc.set_class_name(detached, "card").unwrap();

        let first = doc.create_element("div");
        doc.set_class_name(first, "card featured").unwrap();
        let second = doc.create_element("div");
        doc.set_class_name(second, "card").unwrap();
        doc.append_child(doc.body(), first).unwrap();
        doc.append_child(doc.body(), second).unwrap();

        assert_eq!(doc.query_selector(".card").unwrap(), Some(first));
        assert_eq!(doc.query_selector("div.featured").unwrap(), Some(first));
        assert_eq!(doc.query_selector_all(".card").unwrap(), vec![first, second]);
        assert_eq!(doc.query_selector("span.card").unwrap(), None);
        assert!(doc.query_selector("div > .card").is_err());
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new();
        let section = doc.create_element("section");
        doc.set_attribute(section, "id", "topics").unwrap();
        assert_eq!(doc.get_element_by_id("topics"), None);

        doc.append_child(doc.body(), section).unwrap();
        assert_eq!(doc.get_element_by_id("topics"), Some(section));
        assert_eq!(doc.query_selector("#topics").unwrap(), Some(section));
    }

    #[test]
    fn test_dispatch_click_records_default_navigation() {
        let mut doc = Document::new();
        let link = doc.create_element("a");
        doc.set_attribute(link, "href", "#topics").unwrap();
        doc.append_child(doc.body(), link).unwrap();

        let event = doc.dispatch_click(link).unwrap();
        assert!(!event.default_prevented());
        assert_eq!(doc.navigations().len(), 1);
        assert_eq!(doc.navigations()[0].href, "#topics");
    }

    #[test]
    fn test_listeners_run_in_order_and_can_prevent_default() {
        let mut doc = Document::new();
        let link = doc.create_element("a");
        doc.set_attribute(link, "href", "#topics").unwrap();
        doc.append_child(doc.body(), link).unwrap();

        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        doc.add_event_listener(
            link,
            CLICK,
            Rc::new(move |_doc: &mut Document, _event: &mut ClickEvent| {
                seen.set(seen.get() * 10 + 1)
            }),
        )
        .unwrap();
        let seen = calls.clone();
        doc.add_event_listener(
            link,
            CLICK,
            Rc::new(move |_doc: &mut Document, event: &mut ClickEvent| {
                seen.set(seen.get() * 10 + 2);
                event.prevent_default();
            }),
        )
        .unwrap();

        let event = doc.dispatch_click(link).unwrap();
        assert_eq!(calls.get(), 12);
        assert!(event.default_prevented());
        assert!(doc.navigations().is_empty());
        assert_eq!(doc.listener_count(link, CLICK), 2);
    }

    #[test]
    fn test_scroll_into_view_is_recorded() {
        let mut doc = Document::new();
        let section = doc.create_element("section");
        doc.scroll_into_view(section, ScrollBehavior::Smooth).unwrap();
        assert_eq!(
            doc.scroll_log(),
            &[ScrollRecord {
                target: section,
                behavior: ScrollBehavior::Smooth
            }]
        );
        assert!(doc.scroll_into_view(NodeId(999), ScrollBehavior::Auto).is_err());
    }
}
