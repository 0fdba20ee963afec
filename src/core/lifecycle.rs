use crate::dom::{ClickEvent, Document};
use crate::utils::error::{Result, TopicsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Markup parsed, ready hook not fired yet.
    Init,
    /// Ready hook is running.
    Rendering,
    /// Hook done (successfully or not); only click handlers run from here.
    Idle,
}

/// Owns a page's document and fires its "structure ready" hook at most once:
/// `Init -> Rendering -> Idle`. After that only user clicks reach the page.
#[derive(Debug)]
pub struct PageLifecycle {
    document: Document,
    state: LifecycleState,
}

impl PageLifecycle {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            state: LifecycleState::Init,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Runs `handler` if the hook has not fired yet. Returns `Ok(true)` when it
    /// ran and `Ok(false)` when the hook had already fired. A failing handler
    /// still consumes the hook; the document keeps whatever it did before
    /// failing.
    pub fn on_ready<F>(&mut self, handler: F) -> Result<bool>
    where
        F: FnOnce(&mut Document) -> Result<()>,
    {
        if self.state != LifecycleState::Init {
            tracing::debug!("Ready hook already fired (state {:?}), ignoring", self.state);
            return Ok(false);
        }

        self.state = LifecycleState::Rendering;
        let outcome = handler(&mut self.document);
        self.state = LifecycleState::Idle;

        outcome?;
        tracing::debug!("Page rendered");
        Ok(true)
    }

    /// Clicks the first element matching `selector`.
    pub fn click(&mut self, selector: &str) -> Result<ClickEvent> {
        let target = self
            .document
            .query_selector(selector)?
            .ok_or_else(|| TopicsError::ActionElementNotFound {
                selector: selector.to_string(),
            })?;
        self.document.dispatch_click(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_hook_fires_once() {
        let mut page = PageLifecycle::new(Document::new());
        assert_eq!(page.state(), LifecycleState::Init);

        let mut runs = 0;
        assert!(page
            .on_ready(|_doc| {
                runs += 1;
                Ok(())
            })
            .unwrap());
        assert!(!page
            .on_ready(|_doc| {
                runs += 1;
                Ok(())
            })
            .unwrap());

        assert_eq!(runs, 1);
        assert_eq!(page.state(), LifecycleState::Idle);
    }

    #[test]
    fn test_failing_hook_is_not_retried() {
        let mut page = PageLifecycle::new(Document::new());

        let err = page
            .on_ready(|doc| {
                let div = doc.create_element("div");
                doc.append_child(doc.body(), div)?;
                Err(TopicsError::MountPointNotFound {
                    selector: ".topics-container".to_string(),
                })
            })
            .unwrap_err();
        assert!(matches!(err, TopicsError::MountPointNotFound { .. }));
        assert_eq!(page.state(), LifecycleState::Idle);

        // partial work stays; the hook does not run again
        assert_eq!(page.document().element_children(page.document().body()).len(), 1);
        assert!(!page.on_ready(|_doc| Ok(())).unwrap());
    }

    #[test]
    fn test_click_unknown_selector() {
        let mut page = PageLifecycle::new(Document::new());
        assert!(page.click(".btn-primary").is_err());
    }
}
