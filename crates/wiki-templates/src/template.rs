//! The fixed set of named page templates.

/// Name of one of the templates the wiki renders.
///
/// The set is closed: the registry loads exactly these at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    /// A single page, read-only.
    View,
    /// The edit form for a single page.
    Edit,
    /// One entry of the page listing.
    Docs,
    /// The page listing wrapper.
    Main,
    /// The blank creation form.
    Create,
}

impl TemplateName {
    /// All template names, in registration order.
    pub const ALL: [Self; 5] = [Self::View, Self::Edit, Self::Docs, Self::Main, Self::Create];

    /// File name of the template, also its name inside the registry.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::View => "view.html",
            Self::Edit => "edit.html",
            Self::Docs => "docs.html",
            Self::Main => "main.html",
            Self::Create => "create.html",
        }
    }

    /// Template source compiled into the binary.
    #[must_use]
    pub(crate) const fn builtin_source(self) -> &'static str {
        match self {
            Self::View => include_str!("../templates/view.html"),
            Self::Edit => include_str!("../templates/edit.html"),
            Self::Docs => include_str!("../templates/docs.html"),
            Self::Main => include_str!("../templates/main.html"),
            Self::Create => include_str!("../templates/create.html"),
        }
    }
}

impl std::fmt::Display for TemplateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_are_unique_html() {
        let mut names: Vec<_> = TemplateName::ALL.iter().map(|n| n.file_name()).collect();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), TemplateName::ALL.len());
        assert!(names.iter().all(|n| n.ends_with(".html")));
    }

    #[test]
    fn test_builtin_sources_are_not_empty() {
        for name in TemplateName::ALL {
            assert!(!name.builtin_source().trim().is_empty(), "{name} is empty");
        }
    }

    #[test]
    fn test_display_is_file_name() {
        assert_eq!(TemplateName::Edit.to_string(), "edit.html");
    }
}
