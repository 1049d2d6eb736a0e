//! Route table.
//!
//! Every request path maps to at most one [`Route`]. Anything outside the
//! table is answered with 404 by the dispatcher.

use std::sync::LazyLock;

use regex::Regex;

/// Paths that address a single page: `/{action}/{title}`.
static PAGE_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(edit|save|view)/([a-zA-Z0-9]+)$").expect("page route pattern is valid")
});

/// A recognized request route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    /// `/` - list all pages.
    Index,
    /// `/view/{title}` - show a page.
    View(String),
    /// `/edit/{title}` - edit form for a page.
    Edit(String),
    /// `/save/{title}` - persist the submitted body.
    Save(String),
    /// `/create/` - blank creation form.
    Create,
    /// `/new/` - create a page from submitted title and body.
    New,
}

impl Route {
    /// Match a request path against the route table.
    ///
    /// Returns `None` for any path the wiki doesn't serve, including page
    /// routes whose title isn't plain ASCII alphanumeric.
    pub(crate) fn parse(path: &str) -> Option<Self> {
        match path {
            "/" => return Some(Self::Index),
            "/create" | "/create/" => return Some(Self::Create),
            "/new" | "/new/" => return Some(Self::New),
            _ => {}
        }

        let captures = PAGE_ROUTE.captures(path)?;
        let title = captures[2].to_owned();
        match &captures[1] {
            "view" => Some(Self::View(title)),
            "edit" => Some(Self::Edit(title)),
            "save" => Some(Self::Save(title)),
            _ => None,
        }
    }
}
