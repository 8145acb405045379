pub mod tray;

use crate::error::HostError;
use crate::model::MenuEntry;

/// What the panel offers to the menu controller.
pub trait PanelHost {
    type Menu: PopupMenu;

    fn register_icon(&mut self, icon_id: &str, tooltip: &str) -> Result<(), HostError>;
    fn create_menu(&mut self) -> Result<Self::Menu, HostError>;
}

/// Popup menu owned by the host. Positions count every entry, separators included.
pub trait PopupMenu {
    fn toggle(&mut self);
    /// Last known visibility. Hosts that draw the popup natively report it
    /// on a best-effort basis and may miss opens they are not told about.
    fn is_open(&self) -> bool;
    fn len(&self) -> usize;
    fn clear(&mut self) -> Result<(), HostError>;
    fn insert(&mut self, position: usize, entry: &MenuEntry) -> Result<(), HostError>;
    fn remove(&mut self, position: usize) -> Result<(), HostError>;

    fn append(&mut self, entry: &MenuEntry) -> Result<(), HostError> {
        self.insert(self.len(), entry)
    }
}
