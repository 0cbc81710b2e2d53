//! Route table and history-style navigation.
//!
//! The table is static and ordered. Resolution is an exact path match after
//! the query string and fragment are removed; like common history routers it
//! ignores ASCII case and tolerates one trailing slash. There is no catch-all
//! route, so unknown locations resolve to `None`.

use crate::pages::Page;

/// A path-to-page mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub page: Page,
}

/// The application's routes, in match order.
pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        name: "Home",
        page: Page::Home,
    },
    Route {
        path: "/dashboard",
        name: "Dashboard",
        page: Page::Dashboard,
    },
];

/// Resolves locations against a route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: &'static [Route],
}

impl Default for Router {
    fn default() -> Self {
        Self::new(ROUTES)
    }
}

impl Router {
    /// Creates a router over the given table.
    pub fn new(routes: &'static [Route]) -> Self {
        Self { routes }
    }

    /// Returns the route table.
    pub fn routes(&self) -> &'static [Route] {
        self.routes
    }

    /// Finds the first route matching `location`.
    pub fn resolve(&self, location: &str) -> Option<&'static Route> {
        let path = normalize(location);
        self.routes
            .iter()
            .find(|route| normalize(route.path).eq_ignore_ascii_case(path))
    }

    /// Finds a route by its name (case-sensitive).
    pub fn resolve_name(&self, name: &str) -> Option<&'static Route> {
        self.routes.iter().find(|route| route.name == name)
    }
}

/// Strips query string, fragment and a single trailing slash.
fn normalize(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    if path.is_empty() {
        return "/";
    }
    match path.strip_suffix('/') {
        Some("") | None => path,
        Some(trimmed) => trimmed,
    }
}

/// Visited locations with a cursor, like the browser history stack.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current location, if anything has been visited.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    /// Pushes a location, discarding any forward entries.
    pub fn push(&mut self, location: impl Into<String>) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(location.into());
        self.index = self.entries.len() - 1;
    }

    /// Moves back one entry. Returns the new current location.
    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.current()
    }

    /// Moves forward one entry. Returns the new current location.
    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.current()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
