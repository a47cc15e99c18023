//! Attach-on-load entry point.
//!
//! The host page calls [`attach`] with the element it just rendered (the
//! whole document on first load) and its settings object. Every unprocessed
//! `.form-type-hopcrop` below that element gets a coordinator, and each
//! navigation link is wired to switch the active crop tool.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! import init, { attach } from '@hopcrop/wasm';
//!
//! await init();
//! const editors = attach(document.body, drupalSettings.HopCrop);
//! console.log(`Cropping ${editors.len} image(s)`);
//! ```
//!
//! The returned [`JsCropEditors`] owns the click handlers; the page must keep
//! it alive for as long as the editing UI is shown. Freeing it destroys every
//! Jcrop instance it created.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use hopcrop_core::Coordinator;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use crate::dom::DomContext;
use crate::types::{settings_from_js, to_js_error};

type DomCoordinator = Coordinator<DomContext>;
type ClickHandler = Closure<dyn FnMut(Event) -> Result<(), JsValue>>;

/// Crop editors attached by one [`attach`] call.
#[wasm_bindgen]
pub struct JsCropEditors {
    editors: Vec<Rc<RefCell<DomCoordinator>>>,
    _handlers: Vec<ClickHandler>,
}

#[wasm_bindgen]
impl JsCropEditors {
    /// Number of images that got a crop editor.
    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.editors.len()
    }

    /// Name of the active style of each editor (`undefined` if none).
    pub fn active_styles(&self) -> Array {
        self.editors
            .iter()
            .map(|editor| {
                editor
                    .borrow()
                    .active()
                    .map(|r| JsValue::from_str(r.name()))
                    .unwrap_or(JsValue::UNDEFINED)
            })
            .collect()
    }

    /// Switch editor `index` to `style`, as if its navigation link was clicked.
    pub fn switch_to(&self, index: usize, style: &str) -> Result<bool, JsValue> {
        let editor = self
            .editors
            .get(index)
            .ok_or_else(|| JsValue::from_str(&format!("No crop editor at index {}", index)))?;
        editor.borrow_mut().switch_to(style).map_err(to_js_error)
    }

    /// Tear down every crop tool, e.g. before the editing UI is removed.
    pub fn deactivate_all(&self) {
        for editor in &self.editors {
            editor.borrow_mut().deactivate_all();
        }
    }
}

impl JsCropEditors {
    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}

/// Wire every navigation link of `editor` to switch to its region.
fn bind_navigation(editor: &Rc<RefCell<DomCoordinator>>) -> Result<Vec<ClickHandler>, JsValue> {
    let coordinator = editor.borrow();
    let mut handlers = Vec::with_capacity(coordinator.len());

    for region in coordinator.regions() {
        let weak: Weak<RefCell<DomCoordinator>> = Rc::downgrade(editor);
        let name = region.name().to_string();

        let handler = ClickHandler::new(move |event: Event| {
            event.prevent_default();
            let Some(editor) = weak.upgrade() else {
                return Ok(());
            };
            let Ok(mut coordinator) = editor.try_borrow_mut() else {
                log::warn!("Ignoring crop switch to '{}' while busy", name);
                return Ok(());
            };
            let result = coordinator.switch_to(&name);
            result.map(|_| ()).map_err(to_js_error)
        });

        region
            .nav_item()
            .link()
            .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        handlers.push(handler);
    }

    Ok(handlers)
}

/// Attach crop editing to every `.form-type-hopcrop` below `context`.
///
/// `settings` maps context element ids to their crop settings. Contexts
/// without settings or without an image are skipped; a context is never
/// attached twice.
///
/// # Errors
///
/// Returns an error if the settings object is malformed, or if the overlay
/// widget throws while the first region of a context activates.
#[wasm_bindgen]
pub fn attach(context: &Element, settings: JsValue) -> Result<JsCropEditors, JsValue> {
    let bundle = settings_from_js(settings)?;
    let contexts = DomContext::find_all(context).map_err(to_js_error)?;
    let coordinators = hopcrop_core::attach(contexts, &bundle).map_err(to_js_error)?;

    let mut editors = Vec::with_capacity(coordinators.len());
    let mut handlers = Vec::new();
    for coordinator in coordinators {
        let editor = Rc::new(RefCell::new(coordinator));
        handlers.extend(bind_navigation(&editor)?);
        editors.push(editor);
    }

    log::debug!("Attached {} crop editor(s)", editors.len());
    Ok(JsCropEditors {
        editors,
        _handlers: handlers,
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use js_sys::{Function, Object, Reflect};
    use wasm_bindgen_test::*;
    use web_sys::EventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    const CONTEXT: &str = r#"
        <div class="form-type-hopcrop" id="nav-ctx">
          <div class="hopcrop-image"><img src=""></div>
          <div class="form-type-textfield">
            <label>First</label>
            <input type="text" name="image[crop][first]" value="">
          </div>
          <div class="form-type-textfield">
            <label>Second</label>
            <input type="text" name="image[crop][second]" value="">
          </div>
        </div>"#;

    const SETTINGS: &str = r#"{
        "nav-ctx": {
            "display_factor": 1,
            "styles": {
                "first": { "width": 100, "height": 100 },
                "second": { "width": 200, "height": 100 }
            }
        }
    }"#;

    /// Install a `jQuery.Jcrop` that returns an inert API object.
    fn stub_jcrop() {
        let jcrop = Function::new_with_args(
            "image, options",
            "return { destroy: function () {}, setSelect: function (coords) {} };",
        );
        let jquery = Object::new();
        Reflect::set(&jquery, &"Jcrop".into(), &jcrop).unwrap();
        Reflect::set(&js_sys::global(), &"jQuery".into(), &jquery).unwrap();
    }

    fn fixture() -> Element {
        let doc = web_sys::window().unwrap().document().unwrap();
        let root = doc.create_element("div").unwrap();
        root.set_inner_html(CONTEXT);
        doc.body().unwrap().append_child(&root).unwrap();
        root
    }

    fn click(link: &Element) -> Event {
        let init = EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = Event::new_with_event_init_dict("click", &init).unwrap();
        link.dispatch_event(&event).unwrap();
        event
    }

    fn active_labels(root: &Element) -> Vec<String> {
        let items = root.query_selector_all(".hopcrop-navigation li.active").unwrap();
        (0..items.length())
            .filter_map(|i| items.item(i))
            .filter_map(|node| node.text_content())
            .collect()
    }

    fn styles(editors: &JsCropEditors) -> Vec<Option<String>> {
        editors.active_styles().iter().map(|v| v.as_string()).collect()
    }

    #[wasm_bindgen_test]
    fn test_navigation_click_switches_region() {
        stub_jcrop();
        let root = fixture();
        let settings = js_sys::JSON::parse(SETTINGS).unwrap();
        let editors = attach(&root, settings).unwrap();

        assert_eq!(editors.len(), 1);
        assert_eq!(styles(&editors), vec![Some("first".to_string())]);
        assert_eq!(active_labels(&root), vec!["First".to_string()]);

        let links = root.query_selector_all(".hopcrop-navigation a").unwrap();
        let second = links.item(1).unwrap().dyn_into::<Element>().unwrap();

        let event = click(&second);
        assert!(event.default_prevented());
        assert_eq!(styles(&editors), vec![Some("second".to_string())]);
        assert_eq!(active_labels(&root), vec!["Second".to_string()]);

        let again = click(&second);
        assert!(again.default_prevented());
        assert_eq!(styles(&editors), vec![Some("second".to_string())]);
        assert_eq!(active_labels(&root), vec!["Second".to_string()]);
    }

    #[wasm_bindgen_test]
    fn test_context_attached_once() {
        stub_jcrop();
        let root = fixture();
        let first = attach(&root, js_sys::JSON::parse(SETTINGS).unwrap()).unwrap();
        let second = attach(&root, js_sys::JSON::parse(SETTINGS).unwrap()).unwrap();

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        let navs = root.query_selector_all(".hopcrop-navigation").unwrap();
        assert_eq!(navs.length(), 1);
    }
}
