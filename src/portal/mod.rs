//! Documentation portal widgets that carry logic of their own: section
//! search, feature/timeline detail lookups, theme preference, metric
//! counters and keyboard shortcuts.

pub mod counter;
pub mod details;
pub mod search;
pub mod theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalAction {
    FocusSearch,
    ToggleTheme,
}

/// Ctrl/Cmd+K focuses search, Ctrl/Cmd+D toggles the theme.
pub fn shortcut(modifier: bool, key: char) -> Option<PortalAction> {
    if !modifier {
        return None;
    }
    match key {
        'k' => Some(PortalAction::FocusSearch),
        'd' => Some(PortalAction::ToggleTheme),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts_need_modifier() {
        assert_eq!(shortcut(true, 'k'), Some(PortalAction::FocusSearch));
        assert_eq!(shortcut(true, 'd'), Some(PortalAction::ToggleTheme));
        assert_eq!(shortcut(false, 'k'), None);
        assert_eq!(shortcut(true, 'x'), None);
    }
}
