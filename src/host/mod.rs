//! Browser host: reads platform hints, boots the page over the live
//! document, and subscribes every listener and observer the page asks for.
//!
//! Listener closures are leaked with `forget`; they live as long as the page
//! and are discarded wholesale on navigation.

mod storage;
mod web_tree;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

pub use storage::LocalStorageBackend;
pub use web_tree::WebTree;

use crate::boot::{HostHints, ObserverSpec, Page, PageEvent, Wiring};
use crate::config::PageConfig;
use crate::geometry::Rect;
use crate::i18n::LocaleCatalog;
use crate::prefs::Preferences;
use crate::viewport::IntersectionEntry;

const CONFIG_ELEMENT_ID: &str = "page-config";

type SharedPage = Rc<RefCell<Page<WebTree>>>;

/// Entry point: logging, config, boot, wiring.
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let (config, config_err) = match read_config(&document) {
        Ok(config) => (config, None),
        Err(err) => (PageConfig::default(), Some(err)),
    };
    let _ = console_log::init_with_level(config.log_level());
    if let Some(err) = config_err {
        log::warn!("{err}; using default page config");
    }

    let hints = read_hints(&window);
    let prefs = Preferences::new(Rc::new(LocalStorageBackend::from_window(&window)), config.storage.clone());
    let catalog = match LocaleCatalog::embedded() {
        Ok(catalog) => Some(Rc::new(catalog)),
        Err(err) => {
            log::error!("string tables failed to load: {err}");
            None
        }
    };

    let page = Page::boot(WebTree::new(document), prefs, catalog, config, hints);
    let wiring = page.wiring();
    wire(&window, &Rc::new(RefCell::new(page)), wiring);
}

fn read_config(document: &Document) -> Result<PageConfig, crate::config::ConfigError> {
    match document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) {
        Some(raw) if !raw.trim().is_empty() => PageConfig::from_json(&raw),
        _ => Ok(PageConfig::default()),
    }
}

fn read_hints(window: &Window) -> HostHints {
    let prefers_dark = window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .is_some_and(|mq| mq.matches());
    let intersection_observer = js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
    #[allow(clippy::cast_possible_wrap)]
    let current_year = js_sys::Date::new_0().get_full_year() as i32;
    HostHints { prefers_dark, intersection_observer, current_year, scroll_y: window.scroll_y().unwrap_or(0.0) }
}

fn dispatch(page: &SharedPage, event: PageEvent<Element>) -> Vec<Element> {
    match page.try_borrow_mut() {
        Ok(mut page) => page.dispatch(event),
        Err(_) => {
            log::warn!("re-entrant page event dropped");
            Vec::new()
        }
    }
}

fn on_click(target: &Element, page: &SharedPage, event: impl Fn() -> PageEvent<Element> + 'static) {
    let page = Rc::clone(page);
    let cb = Closure::wrap(Box::new(move |_e: Event| {
        dispatch(&page, event());
    }) as Box<dyn FnMut(Event)>);
    if target.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref()).is_ok() {
        cb.forget();
    }
}

fn viewport_rect(window: &Window) -> Rect {
    let extent = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Rect::new(0.0, 0.0, extent(window.inner_width()), extent(window.inner_height()))
}

fn measure_sections(window: &Window, sections: &[Element]) -> PageEvent<Element> {
    let rects = sections
        .iter()
        .map(|el| {
            let r = el.get_bounding_client_rect();
            (el.clone(), Rect::new(r.top(), r.left(), r.width(), r.height()))
        })
        .collect();
    PageEvent::SectionsMeasured { viewport: viewport_rect(window), rects }
}

fn on_scroll(window: &Window, page: &SharedPage, measured: Vec<Element>) {
    if !measured.is_empty() {
        dispatch(page, measure_sections(window, &measured));
    }

    let page = Rc::clone(page);
    let win = window.clone();
    let cb = Closure::wrap(Box::new(move |_e: Event| {
        dispatch(&page, PageEvent::Scroll { y: win.scroll_y().unwrap_or(0.0) });
        if !measured.is_empty() {
            dispatch(&page, measure_sections(&win, &measured));
        }
    }) as Box<dyn FnMut(Event)>);

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    if window
        .add_event_listener_with_callback_and_add_event_listener_options("scroll", cb.as_ref().unchecked_ref(), &options)
        .is_ok()
    {
        cb.forget();
    }
}

fn observe(spec: ObserverSpec<Element>, page: &SharedPage, event: fn(Vec<IntersectionEntry<Element>>) -> PageEvent<Element>) {
    let page = Rc::clone(page);
    let cb = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        let batch = entries
            .iter()
            .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
            .map(|e| IntersectionEntry::new(e.target(), e.is_intersecting(), e.intersection_ratio()))
            .collect();
        for done in dispatch(&page, event(batch)) {
            observer.unobserve(&done);
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(spec.threshold));
    init.set_root_margin(&spec.margin.to_string());

    match IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            for target in &spec.targets {
                observer.observe(target);
            }
            cb.forget();
        }
        Err(err) => log::warn!("intersection observer rejected: {err:?}"),
    }
}

fn wire(window: &Window, page: &SharedPage, wiring: Wiring<Element>) {
    if let Some(toggle) = &wiring.theme_toggle {
        on_click(toggle, page, || PageEvent::ThemeToggle);
    }
    if let Some(toggle) = &wiring.language_toggle {
        on_click(toggle, page, || PageEvent::LanguageToggle);
    }
    if let Some(trigger) = &wiring.menu_trigger {
        on_click(trigger, page, || PageEvent::MenuToggle);
    }
    for link in &wiring.menu_links {
        on_click(link, page, || PageEvent::MenuLink);
    }
    for (id, trigger) in &wiring.accordion_triggers {
        let id = *id;
        on_click(trigger, page, move || PageEvent::AccordionTrigger(id));
    }
    if wiring.scroll {
        on_scroll(window, page, wiring.measured_sections);
    }
    if let Some(spec) = wiring.reveal {
        observe(spec, page, PageEvent::RevealIntersections);
    }
    if let Some(spec) = wiring.sections {
        observe(spec, page, PageEvent::SectionIntersections);
    }
    log::debug!("page listeners wired");
}
