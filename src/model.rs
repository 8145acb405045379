/// A saved connection profile, identified only by its file-system path.
/// The path doubles as the menu label.
pub type ProfileEntry = String;

/// Profiles in the order the MRU file lists them.
pub type ProfileList = Vec<ProfileEntry>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    OpenClient,
    RefreshProfiles,
    LaunchProfile(ProfileEntry),
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    Action { label: String, action: MenuAction },
    /// Inert item that cannot be activated.
    Placeholder(String),
    Separator,
}

impl MenuEntry {
    pub fn action(label: impl Into<String>, action: MenuAction) -> Self {
        Self::Action {
            label: label.into(),
            action,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Action { label, .. } | Self::Placeholder(label) => Some(label),
            Self::Separator => None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Action { .. })
    }
}
