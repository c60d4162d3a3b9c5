//! Location access and forced navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway needs to know where the user is and to send them to sign-in
//! without going through the router, which it cannot see. `BrowserNavigator`
//! performs a full page navigation, so all in-memory state starts fresh.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::cell::RefCell;
use std::rc::Rc;

pub trait Navigator {
    /// Current location path, e.g. `/decks`.
    fn current_path(&self) -> String;

    /// Force navigation to `path`.
    fn navigate(&self, path: &str);
}

/// `window.location`. Reports `/` and ignores navigation outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_owned())
        }
        #[cfg(not(feature = "csr"))]
        {
            "/".to_owned()
        }
    }

    fn navigate(&self, path: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(path);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
        }
    }
}

/// Navigator over an in-memory location. Clones share the same location and
/// history.
#[derive(Clone, Debug, Default)]
pub struct MemoryNavigator {
    path: Rc<RefCell<String>>,
    visits: Rc<RefCell<Vec<String>>>,
}

impl MemoryNavigator {
    pub fn at(path: &str) -> Self {
        Self { path: Rc::new(RefCell::new(path.to_owned())), visits: Rc::default() }
    }

    /// Every forced navigation, oldest first.
    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn navigate(&self, path: &str) {
        path.clone_into(&mut self.path.borrow_mut());
        self.visits.borrow_mut().push(path.to_owned());
    }
}
