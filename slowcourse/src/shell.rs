//! Page shell state: navigation sidebar and collapsing header

/// Scroll offset past which the header collapses.
pub const HEADER_COLLAPSE_OFFSET: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarSection {
    Modules,
    Resources,
}

impl SidebarSection {
    pub const ALL: [SidebarSection; 2] = [SidebarSection::Modules, SidebarSection::Resources];

    pub fn label(self) -> &'static str {
        match self {
            SidebarSection::Modules => "Modules",
            SidebarSection::Resources => "Resources",
        }
    }
}

/// Left navigation. Clicking a section toggles its expansion and flips the
/// sidebar open or closed with it; expanded content only shows while open.
#[derive(Debug, Clone, Default)]
pub struct Sidebar {
    open: bool,
    expanded: Option<SidebarSection>,
}

impl Sidebar {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Section whose contents are on screen.
    pub fn visible_section(&self) -> Option<SidebarSection> {
        if self.open {
            self.expanded
        } else {
            None
        }
    }

    pub fn toggle_section(&mut self, section: SidebarSection) {
        self.expanded = if self.expanded == Some(section) {
            None
        } else {
            Some(section)
        };
        self.open = !self.open;
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeaderState {
    collapsed: bool,
}

impl HeaderState {
    pub fn on_scroll(&mut self, offset: f32) {
        self.collapsed = offset > HEADER_COLLAPSE_OFFSET;
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Header bar height in points.
    pub fn height(&self) -> f32 {
        if self.collapsed {
            48.0
        } else {
            64.0
        }
    }
}
