//! In-memory host collaborators for tests.
//!
//! Every mock shares its state through `Rc`, so a test can keep a clone and
//! inspect what the regions did after handing the original away.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use crate::error::CropError;
use crate::host::{EditingContext, HostField, NavItem, NavMarker, Navigation};
use crate::overlay::{OverlayBackend, OverlayConfig, OverlayHandle, SelectionSink};
use crate::rect::Rect;

#[derive(Debug, Clone)]
pub struct MockField {
    name: Option<String>,
    value: Rc<RefCell<String>>,
    label: Rc<RefCell<Option<String>>>,
    hidden: Rc<Cell<bool>>,
}

impl MockField {
    pub fn new(name: &str, label: &str, value: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            value: Rc::new(RefCell::new(value.to_string())),
            label: Rc::new(RefCell::new(Some(label.to_string()))),
            hidden: Rc::new(Cell::new(false)),
        }
    }

    pub fn unnamed() -> Self {
        let mut field = Self::new("", "", "");
        field.name = None;
        field
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn has_label(&self) -> bool {
        self.label.borrow().is_some()
    }
}

impl HostField for MockField {
    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&mut self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }

    fn take_label(&mut self) -> String {
        self.label.borrow_mut().take().unwrap_or_default()
    }

    fn hide(&mut self) {
        self.hidden.set(true);
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockNavItem {
    label: String,
    markers: Rc<RefCell<HashSet<NavMarker>>>,
    warning: Rc<RefCell<Option<String>>>,
}

impl MockNavItem {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn has(&self, marker: NavMarker) -> bool {
        self.markers.borrow().contains(&marker)
    }

    pub fn warning(&self) -> Option<String> {
        self.warning.borrow().clone()
    }
}

impl NavItem for MockNavItem {
    fn set_marker(&mut self, marker: NavMarker, on: bool) {
        let mut markers = self.markers.borrow_mut();
        if on {
            markers.insert(marker);
        } else {
            markers.remove(&marker);
        }
    }

    fn attach_warning(&mut self, text: &str) {
        *self.warning.borrow_mut() = Some(text.to_string());
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockNav {
    items: Rc<RefCell<Vec<MockNavItem>>>,
}

impl MockNav {
    pub fn items(&self) -> Vec<MockNavItem> {
        self.items.borrow().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.items
            .borrow()
            .iter()
            .map(|i| i.label().to_string())
            .collect()
    }
}

impl Navigation for MockNav {
    type Item = MockNavItem;

    fn append(&mut self, label: &str) -> Result<MockNavItem, CropError> {
        let item = MockNavItem {
            label: label.to_string(),
            ..MockNavItem::default()
        };
        self.items.borrow_mut().push(item.clone());
        Ok(item)
    }
}

#[derive(Default)]
struct BackendState {
    configs: Vec<OverlayConfig>,
    sinks: Vec<Option<Box<dyn SelectionSink>>>,
    destroyed: usize,
    set_selects: Vec<Rect>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    state: Rc<RefCell<BackendState>>,
    fail: bool,
}

impl MockBackend {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn attach_count(&self) -> usize {
        self.state.borrow().configs.len()
    }

    pub fn destroy_count(&self) -> usize {
        self.state.borrow().destroyed
    }

    pub fn live_count(&self) -> usize {
        self.state.borrow().sinks.iter().filter(|s| s.is_some()).count()
    }

    pub fn last_config(&self) -> Option<OverlayConfig> {
        self.state.borrow().configs.last().cloned()
    }

    pub fn last_set_select(&self) -> Option<Rect> {
        self.state.borrow().set_selects.last().copied()
    }

    /// Report a selection from the most recently attached live overlay.
    pub fn drag(&self, display: Rect) {
        let mut state = self.state.borrow_mut();
        if let Some(sink) = state.sinks.iter_mut().rev().flatten().next() {
            sink.selection_changed(display);
        }
    }
}

impl OverlayBackend for MockBackend {
    type Handle = MockHandle;

    fn attach<S>(&mut self, config: &OverlayConfig, sink: S) -> Result<MockHandle, CropError>
    where
        S: SelectionSink + 'static,
    {
        if self.fail {
            return Err(CropError::Overlay("widget failed to load".into()));
        }

        let mut state = self.state.borrow_mut();
        state.configs.push(config.clone());
        state.sinks.push(Some(Box::new(sink)));
        Ok(MockHandle {
            index: state.sinks.len() - 1,
            state: Rc::clone(&self.state),
        })
    }
}

pub struct MockHandle {
    index: usize,
    state: Rc<RefCell<BackendState>>,
}

impl OverlayHandle for MockHandle {
    fn set_select(&mut self, display: Rect) {
        self.state.borrow_mut().set_selects.push(display);
    }

    fn destroy(&mut self) {
        let mut state = self.state.borrow_mut();
        state.sinks[self.index] = None;
        state.destroyed += 1;
    }
}

#[derive(Clone)]
pub struct MockContext {
    pub id: String,
    pub fields: Vec<MockField>,
    pub backend: Option<MockBackend>,
    pub nav: MockNav,
    claimed: Rc<Cell<bool>>,
    height_syncs: Rc<Cell<usize>>,
}

impl MockContext {
    pub fn new(id: &str, fields: Vec<MockField>) -> Self {
        Self {
            id: id.to_string(),
            fields,
            backend: Some(MockBackend::default()),
            nav: MockNav::default(),
            claimed: Rc::new(Cell::new(false)),
            height_syncs: Rc::new(Cell::new(0)),
        }
    }

    pub fn without_image(mut self) -> Self {
        self.backend = None;
        self
    }

    pub fn with_backend(mut self, backend: MockBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn height_syncs(&self) -> usize {
        self.height_syncs.get()
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed.get()
    }
}

impl EditingContext for MockContext {
    type Field = MockField;
    type Nav = MockNav;
    type Backend = MockBackend;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn claim(&mut self) -> bool {
        !self.claimed.replace(true)
    }

    fn locate_image(&mut self) -> Option<MockBackend> {
        self.backend.clone()
    }

    fn create_navigation(&mut self) -> Result<MockNav, CropError> {
        Ok(self.nav.clone())
    }

    fn schedule_height_sync(&mut self, _nav: &MockNav) {
        self.height_syncs.set(self.height_syncs.get() + 1);
    }

    fn text_fields(&self) -> Vec<MockField> {
        self.fields.clone()
    }
}
