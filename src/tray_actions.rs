pub const TRAY_MENU_TOGGLE_WINDOW: &str = "tray_toggle_window";
pub const TRAY_MENU_TOGGLE_COMPANION: &str = "tray_toggle_companion";
pub const TRAY_MENU_CHECK_UPDATE: &str = "tray_check_update";
pub const TRAY_MENU_QUIT: &str = "tray_quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMenuAction {
    ToggleWindow,
    ToggleCompanion,
    CheckUpdate,
    Quit,
}

pub fn action_from_menu_id(menu_id: &str) -> Option<TrayMenuAction> {
    match menu_id {
        TRAY_MENU_TOGGLE_WINDOW => Some(TrayMenuAction::ToggleWindow),
        TRAY_MENU_TOGGLE_COMPANION => Some(TrayMenuAction::ToggleCompanion),
        TRAY_MENU_CHECK_UPDATE => Some(TrayMenuAction::CheckUpdate),
        TRAY_MENU_QUIT => Some(TrayMenuAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_from_menu_id_maps_all_known_actions() {
        assert_eq!(
            action_from_menu_id(TRAY_MENU_TOGGLE_WINDOW),
            Some(TrayMenuAction::ToggleWindow)
        );
        assert_eq!(
            action_from_menu_id(TRAY_MENU_TOGGLE_COMPANION),
            Some(TrayMenuAction::ToggleCompanion)
        );
        assert_eq!(
            action_from_menu_id(TRAY_MENU_CHECK_UPDATE),
            Some(TrayMenuAction::CheckUpdate)
        );
        assert_eq!(
            action_from_menu_id(TRAY_MENU_QUIT),
            Some(TrayMenuAction::Quit)
        );
    }

    #[test]
    fn action_from_menu_id_returns_none_for_unknown_menu_id() {
        assert_eq!(action_from_menu_id("tray_reload_window"), None);
    }
}
