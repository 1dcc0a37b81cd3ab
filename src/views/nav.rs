/// The two form pages of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Contact,
    Feedback,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Contact, Page::Feedback];

    pub fn href(&self) -> &'static str {
        match self {
            Page::Contact => "/",
            Page::Feedback => "/feedback",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Contact => "Contact Form",
            Page::Feedback => "Feedback Form",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Sidebar linking the form pages, highlighting the current one
#[derive(Debug, Clone, Copy)]
pub struct NavShell {
    current: Page,
}

impl NavShell {
    pub fn new(current: Page) -> Self {
        Self { current }
    }

    pub fn links(&self) -> Vec<NavLink> {
        Page::ALL
            .into_iter()
            .map(|page| NavLink {
                label: page.label(),
                href: page.href(),
                active: page == self.current,
            })
            .collect()
    }
}
