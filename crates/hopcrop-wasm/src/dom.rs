//! Browser DOM implementation of the host collaborators.
//!
//! Markup expected inside a `.form-type-hopcrop` editing context:
//!
//! ```html
//! <div class="form-type-hopcrop" id="edit-image-crop">
//!   <div class="hopcrop-image"><img src="..."></div>
//!   <div class="form-type-textfield">
//!     <label>Thumbnail</label>
//!     <input type="text" name="image[crop][thumbnail]" value="">
//!   </div>
//! </div>
//! ```
//!
//! The navigation (`div.hopcrop-navigation > ul`) is inserted right before
//! `.hopcrop-image` and sized to it once layout has settled.

use hopcrop_core::{CropError, EditingContext, HostField, NavItem, NavMarker, Navigation};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement, Node};

use crate::jcrop::JcropBackend;
use crate::types::describe_js;

/// Marks a context that has already been attached.
const PROCESSED_CLASS: &str = "hopcrop-processed";

/// Delay before sizing the navigation to the image.
const HEIGHT_SYNC_DELAY_MS: i32 = 100;

fn host_error(e: JsValue) -> CropError {
    CropError::Host(describe_js(&e))
}

fn owner_document(element: &Element) -> Result<Document, CropError> {
    element
        .owner_document()
        .ok_or_else(|| CropError::Host("element is not attached to a document".into()))
}

/// One crop text field and the form item wrapping it.
#[derive(Debug, Clone)]
pub struct DomField {
    item: Element,
    input: HtmlInputElement,
}

impl DomField {
    /// Wrap a `.form-type-textfield` item, if it contains a text input.
    pub fn from_item(item: Element) -> Option<Self> {
        let input = item
            .query_selector("input[type=text]")
            .ok()
            .flatten()?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        Some(Self { item, input })
    }
}

impl HostField for DomField {
    fn name(&self) -> Option<String> {
        Some(self.input.name()).filter(|n| !n.is_empty())
    }

    fn value(&self) -> String {
        self.input.value()
    }

    fn set_value(&mut self, value: &str) {
        self.input.set_value(value);
    }

    fn take_label(&mut self) -> String {
        match self.item.query_selector("label") {
            Ok(Some(label)) => {
                let text = label.text_content().unwrap_or_default();
                label.remove();
                text.trim().to_string()
            }
            _ => String::new(),
        }
    }

    fn hide(&mut self) {
        self.input.set_type("hidden");
    }
}

/// One `<li>` of the navigation list.
#[derive(Debug, Clone)]
pub struct DomNavItem {
    item: Element,
    link: Element,
}

impl DomNavItem {
    /// The clickable `<a>` switching to this entry's region.
    pub fn link(&self) -> &Element {
        &self.link
    }
}

impl NavItem for DomNavItem {
    fn set_marker(&mut self, marker: NavMarker, on: bool) {
        let classes = self.item.class_list();
        let result = if on {
            classes.add_1(marker.class_name())
        } else {
            classes.remove_1(marker.class_name())
        };
        if let Err(e) = result {
            log::warn!("Failed to update navigation marker: {}", describe_js(&e));
        }
    }

    fn attach_warning(&mut self, text: &str) {
        let warning = owner_document(&self.item)
            .and_then(|doc| doc.create_element("p").map_err(host_error))
            .and_then(|p| {
                p.set_class_name("hopcrop-warning");
                p.set_text_content(Some(text));
                self.item.append_child(&p).map_err(host_error)
            });
        if let Err(e) = warning {
            log::warn!("Failed to attach crop warning: {}", e);
        }
    }
}

/// The `div.hopcrop-navigation > ul` shared by a context's regions.
#[derive(Debug, Clone)]
pub struct DomNavigation {
    container: HtmlElement,
    list: Element,
}

impl Navigation for DomNavigation {
    type Item = DomNavItem;

    fn append(&mut self, label: &str) -> Result<DomNavItem, CropError> {
        let doc = owner_document(&self.list)?;
        let item = doc.create_element("li").map_err(host_error)?;
        let link = doc.create_element("a").map_err(host_error)?;
        link.set_attribute("href", "#").map_err(host_error)?;
        link.set_text_content(Some(label));

        item.append_child(&link).map_err(host_error)?;
        self.list.append_child(&item).map_err(host_error)?;
        Ok(DomNavItem { item, link })
    }
}

/// A `.form-type-hopcrop` element scoping one image and its fields.
#[derive(Debug, Clone)]
pub struct DomContext {
    root: Element,
}

impl DomContext {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// All editing contexts below `scope`, in document order.
    pub fn find_all(scope: &Element) -> Result<Vec<Self>, CropError> {
        let nodes = scope
            .query_selector_all(".form-type-hopcrop")
            .map_err(host_error)?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(Self::new)
            .collect())
    }

    fn image_frame(&self) -> Option<HtmlElement> {
        self.root
            .query_selector(".hopcrop-image")
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl EditingContext for DomContext {
    type Field = DomField;
    type Nav = DomNavigation;
    type Backend = JcropBackend;

    fn id(&self) -> String {
        self.root.id()
    }

    fn claim(&mut self) -> bool {
        let classes = self.root.class_list();
        if classes.contains(PROCESSED_CLASS) {
            return false;
        }
        classes.add_1(PROCESSED_CLASS).is_ok()
    }

    fn locate_image(&mut self) -> Option<JcropBackend> {
        self.root
            .query_selector(".hopcrop-image > img")
            .ok()
            .flatten()?
            .dyn_into::<HtmlImageElement>()
            .ok()
            .map(JcropBackend::new)
    }

    fn create_navigation(&mut self) -> Result<DomNavigation, CropError> {
        let frame = self
            .image_frame()
            .ok_or_else(|| CropError::Host("missing .hopcrop-image".into()))?;
        let parent = frame
            .parent_node()
            .ok_or_else(|| CropError::Host("detached .hopcrop-image".into()))?;
        let doc = owner_document(&self.root)?;

        let container = doc
            .create_element("div")
            .map_err(host_error)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| CropError::Host("navigation container is not an HTML element".into()))?;
        container.set_class_name("hopcrop-navigation");
        let frame_node: &Node = frame.as_ref();
        parent
            .insert_before(&container, Some(frame_node))
            .map_err(host_error)?;

        let list = doc.create_element("ul").map_err(host_error)?;
        container.append_child(&list).map_err(host_error)?;

        Ok(DomNavigation { container, list })
    }

    fn schedule_height_sync(&mut self, nav: &DomNavigation) {
        let (Some(window), Some(frame)) = (web_sys::window(), self.image_frame()) else {
            return;
        };

        let container = nav.container.clone();
        let sync = Closure::once_into_js(move || {
            let height = format!("{}px", frame.offset_height());
            if let Err(e) = container.style().set_property("height", &height) {
                log::warn!("Failed to size crop navigation: {}", describe_js(&e));
            }
        });

        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            sync.unchecked_ref(),
            HEIGHT_SYNC_DELAY_MS,
        ) {
            log::warn!("Failed to schedule navigation sizing: {}", describe_js(&e));
        }
    }

    fn text_fields(&self) -> Vec<DomField> {
        let Ok(nodes) = self.root.query_selector_all(".form-type-textfield") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(DomField::from_item)
            .collect()
    }
}
