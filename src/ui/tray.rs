use crate::error::HostError;
use crate::model::{MenuAction, MenuEntry};
use crate::ui::{PanelHost, PopupMenu};
use std::collections::HashMap;
use tracing::debug;
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const ICON_SIZE: u32 = 22;

/// Panel host backed by a system tray icon.
pub struct TrayHost {
    icon: Option<TrayIcon>,
}

impl TrayHost {
    pub fn new() -> Self {
        Self { icon: None }
    }
}

impl PanelHost for TrayHost {
    type Menu = TrayMenu;

    fn register_icon(&mut self, icon_id: &str, tooltip: &str) -> Result<(), HostError> {
        let icon = TrayIconBuilder::new()
            .with_id(icon_id)
            .with_icon(render_icon()?)
            .with_tooltip(tooltip)
            .with_menu_on_left_click(true)
            .build()?;
        debug!(icon_id, "registered tray icon");
        self.icon = Some(icon);
        Ok(())
    }

    fn create_menu(&mut self) -> Result<TrayMenu, HostError> {
        let icon = self.icon.as_ref().ok_or(HostError::IconNotRegistered)?;
        let menu = Menu::new();
        icon.set_menu(Some(Box::new(menu.clone())));
        Ok(TrayMenu::new(menu))
    }
}

/// Native tray menu plus the bookkeeping needed to map clicks back to actions.
pub struct TrayMenu {
    menu: Menu,
    /// Native id of each item by position; `None` for separators.
    slots: Vec<Option<MenuId>>,
    actions: HashMap<MenuId, MenuAction>,
    open: bool,
}

impl TrayMenu {
    fn new(menu: Menu) -> Self {
        Self {
            menu,
            slots: Vec::new(),
            actions: HashMap::new(),
            open: false,
        }
    }

    /// Action bound to an activated item. Activation dismisses the popup.
    pub fn take_action(&mut self, id: &MenuId) -> Option<MenuAction> {
        self.open = false;
        self.actions.get(id).cloned()
    }
}

impl PopupMenu for TrayMenu {
    // The platform draws the popup itself on left click. The flag follows the
    // click and activation events the tray reports; Linux trays report no clicks.
    fn toggle(&mut self) {
        self.open = !self.open;
        debug!(open = self.open, "tray menu toggled");
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn clear(&mut self) -> Result<(), HostError> {
        while self.menu.remove_at(0).is_some() {}
        self.slots.clear();
        self.actions.clear();
        Ok(())
    }

    fn insert(&mut self, position: usize, entry: &MenuEntry) -> Result<(), HostError> {
        if position > self.slots.len() {
            return Err(HostError::OutOfRange {
                position,
                len: self.slots.len(),
            });
        }
        let slot = match entry.label() {
            Some(label) => {
                let item = MenuItem::new(label, entry.is_interactive(), None);
                self.menu.insert(&item, position)?;
                if let MenuEntry::Action { action, .. } = entry {
                    self.actions.insert(item.id().clone(), action.clone());
                }
                Some(item.id().clone())
            }
            None => {
                self.menu.insert(&PredefinedMenuItem::separator(), position)?;
                None
            }
        };
        self.slots.insert(position, slot);
        Ok(())
    }

    fn remove(&mut self, position: usize) -> Result<(), HostError> {
        let len = self.slots.len();
        if position >= len || self.menu.remove_at(position).is_none() {
            return Err(HostError::OutOfRange { position, len });
        }
        if let Some(id) = self.slots.remove(position) {
            self.actions.remove(&id);
        }
        Ok(())
    }
}

/// Draws the panel icon: a monitor with a stand, as RGBA.
fn render_icon() -> Result<Icon, HostError> {
    Ok(Icon::from_rgba(icon_pixels(), ICON_SIZE, ICON_SIZE)?)
}

fn icon_pixels() -> Vec<u8> {
    let size = ICON_SIZE;
    let mut rgba = vec![0u8; (size * size * 4) as usize];

    for y in 0..size {
        for x in 0..size {
            let idx = ((y * size + x) * 4) as usize;
            let bezel = (2..=19).contains(&x) && (3..=15).contains(&y);
            let screen = (4..=17).contains(&x) && (5..=13).contains(&y);
            let stand = (9..=12).contains(&x) && (16..=17).contains(&y);
            let base = (6..=15).contains(&x) && y == 18;

            let color = if screen {
                Some([70, 140, 220])
            } else if bezel || stand || base {
                Some([60, 60, 66])
            } else {
                None
            };
            if let Some([r, g, b]) = color {
                rgba[idx] = r;
                rgba[idx + 1] = g;
                rgba[idx + 2] = b;
                rgba[idx + 3] = 255;
            }
        }
    }
    rgba
}
