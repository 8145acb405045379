use crate::config::Config;
use crate::launcher::CommandLauncher;
use crate::menu::MenuController;
use crate::model::MenuAction;
use crate::profiles::ProfileStore;
use crate::ui::tray::{TrayHost, TrayMenu};
use crate::ui::PopupMenu;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tray_icon::menu::MenuEvent;
use tray_icon::{MouseButton, MouseButtonState, TrayIconEvent};

pub struct App {
    config: Config,
    host: TrayHost,
    controller: Option<MenuController<TrayMenu, CommandLauncher>>,
}

impl App {
    pub fn new() -> Self {
        Self {
            config: Config::load(),
            host: TrayHost::new(),
            controller: None,
        }
    }

    /// Registers the tray icon and builds the menu. Must run once the event loop is live.
    pub fn start(&mut self) -> Result<()> {
        let launcher = CommandLauncher::from_config(&self.config);
        match launcher.locate() {
            Some(path) => info!(launcher = %path.display(), "found client"),
            None => warn!(launcher = %self.config.launcher, "client not found in PATH"),
        }

        let store = match self.config.mru_path() {
            Some(path) => ProfileStore::new(path),
            None => ProfileStore::unlocated(),
        };
        info!(mru = ?store.path(), "reading recent profiles");

        let controller = MenuController::new(&mut self.host, store, launcher)
            .context("failed to set up the tray menu")?;
        self.controller = Some(controller);
        Ok(())
    }

    pub fn handle_tray_event(&mut self, event: &TrayIconEvent) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if let TrayIconEvent::Click {
            button: MouseButton::Left,
            button_state: MouseButtonState::Up,
            ..
        } = event
        {
            controller.on_activate();
            debug!(open = controller.menu().is_open(), "tray icon activated");
        }
    }

    /// Runs the action behind an activated menu item. Returns `true` on quit.
    pub fn handle_menu_event(&mut self, event: &MenuEvent) -> bool {
        let Some(controller) = self.controller.as_mut() else {
            return false;
        };
        let Some(action) = controller.menu_mut().take_action(event.id()) else {
            return false;
        };
        if action == MenuAction::Quit {
            return true;
        }
        if let Err(e) = controller.handle(&action) {
            warn!(error = %e, ?action, "menu action failed");
        }
        false
    }
}
