use crate::config::{ICON_ID, TOOLTIP};
use crate::error::HostError;
use crate::launcher::Launcher;
use crate::model::{MenuAction, MenuEntry};
use crate::profiles::ProfileStore;
use crate::ui::{PanelHost, PopupMenu};
use tracing::info;

pub const OPEN_CLIENT_LABEL: &str = "Open client…";
pub const REFRESH_LABEL: &str = "Refresh Profiles";
pub const NO_PROFILES_LABEL: &str = "No saved profiles";
pub const QUIT_LABEL: &str = "Quit";

/// Index of the first recent-profile item: after open, refresh and the separator.
const SECTION_START: usize = 3;

/// Owns the panel's popup menu: two fixed actions, the recent-profiles
/// section, and a quit footer.
pub struct MenuController<M, L> {
    menu: M,
    store: ProfileStore,
    launcher: L,
    section_len: usize,
}

impl<M: PopupMenu, L: Launcher> MenuController<M, L> {
    /// Registers the panel icon, creates the popup and fills it once.
    pub fn new<H>(host: &mut H, store: ProfileStore, launcher: L) -> Result<Self, HostError>
    where
        H: PanelHost<Menu = M>,
    {
        host.register_icon(ICON_ID, TOOLTIP)?;
        let menu = host.create_menu()?;
        let mut controller = Self {
            menu,
            store,
            launcher,
            section_len: 0,
        };
        controller.build_menu()?;
        Ok(controller)
    }

    pub fn menu(&self) -> &M {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut M {
        &mut self.menu
    }

    pub fn on_activate(&mut self) {
        self.menu.toggle();
    }

    /// Replaces the whole menu. Safe to call repeatedly.
    pub fn build_menu(&mut self) -> Result<(), HostError> {
        self.menu.clear()?;
        self.section_len = 0;

        self.menu
            .append(&MenuEntry::action(OPEN_CLIENT_LABEL, MenuAction::OpenClient))?;
        self.menu
            .append(&MenuEntry::action(REFRESH_LABEL, MenuAction::RefreshProfiles))?;
        self.menu.append(&MenuEntry::Separator)?;
        self.refresh_profiles_section()?;
        self.menu.append(&MenuEntry::Separator)?;
        self.menu
            .append(&MenuEntry::action(QUIT_LABEL, MenuAction::Quit))?;
        Ok(())
    }

    /// Re-reads the MRU file and replaces only the recent-profiles section.
    pub fn refresh_profiles_section(&mut self) -> Result<(), HostError> {
        while self.section_len > 0 {
            self.menu.remove(SECTION_START)?;
            self.section_len -= 1;
        }

        let profiles = self.store.load_entries();
        info!(count = profiles.len(), "rebuilding recent profiles");
        let entries = profile_entries(&profiles);
        for entry in &entries {
            self.menu.insert(SECTION_START + self.section_len, entry)?;
            self.section_len += 1;
        }
        Ok(())
    }

    /// Starts the client; an empty path launches it without a profile.
    pub fn launch(&self, path: Option<&str>) {
        self.launcher.launch(path.filter(|path| !path.is_empty()));
    }

    /// Runs an activated menu action. `Quit` belongs to the event loop and is ignored here.
    pub fn handle(&mut self, action: &MenuAction) -> Result<(), HostError> {
        match action {
            MenuAction::OpenClient => self.launch(None),
            MenuAction::LaunchProfile(path) => self.launch(Some(path.as_str())),
            MenuAction::RefreshProfiles => self.refresh_profiles_section()?,
            MenuAction::Quit => {}
        }
        Ok(())
    }
}

/// Menu items for a profile list, in list order; a placeholder when empty.
pub fn profile_entries(profiles: &[String]) -> Vec<MenuEntry> {
    if profiles.is_empty() {
        return vec![MenuEntry::Placeholder(NO_PROFILES_LABEL.to_string())];
    }
    profiles
        .iter()
        .map(|path| MenuEntry::action(path.as_str(), MenuAction::LaunchProfile(path.clone())))
        .collect()
}
