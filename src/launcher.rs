use crate::config::Config;
use crate::error::LaunchError;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::{info, warn};

/// Starts the remote-desktop client, optionally with a saved profile.
///
/// Implementations spawn a detached process, never observe its exit
/// status, and return immediately.
pub trait Launcher {
    fn launch(&self, profile: Option<&str>);
}

pub struct CommandLauncher {
    program: String,
    profile_flag: String,
}

impl CommandLauncher {
    pub fn new(program: impl Into<String>, profile_flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            profile_flag: profile_flag.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.launcher.clone(), config.profile_flag.clone())
    }

    /// `program`, or `program <flag> <quoted profile>`. An empty profile counts as none.
    pub fn command_line(&self, profile: Option<&str>) -> String {
        match profile.filter(|path| !path.is_empty()) {
            Some(path) => format!(
                "{} {} {}",
                self.program,
                self.profile_flag,
                shell_words::quote(path)
            ),
            None => self.program.clone(),
        }
    }

    pub fn argv(&self, profile: Option<&str>) -> Result<Vec<String>, LaunchError> {
        let argv = shell_words::split(&self.command_line(profile))?;
        if argv.is_empty() {
            return Err(LaunchError::EmptyCommand);
        }
        Ok(argv)
    }

    /// Resolves the client executable through `PATH`.
    pub fn locate(&self) -> Option<PathBuf> {
        let argv = self.argv(None).ok()?;
        which::which(&argv[0]).ok()
    }

    pub fn spawn(&self, profile: Option<&str>) -> Result<Child, LaunchError> {
        let argv = self.argv(profile)?;
        Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: argv[0].clone(),
                source,
            })
    }
}

impl Launcher for CommandLauncher {
    fn launch(&self, profile: Option<&str>) {
        match self.spawn(profile) {
            Ok(child) => info!(pid = child.id(), profile = ?profile, "launched client"),
            Err(e) => warn!(error = %e, profile = ?profile, "client launch failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tsclient() -> CommandLauncher {
        CommandLauncher::new("tsclient", "-x")
    }

    #[test]
    fn bare_launch_has_no_flag() {
        let launcher = tsclient();
        assert_eq!(launcher.command_line(None), "tsclient");
        assert_eq!(launcher.argv(None).unwrap(), vec!["tsclient"]);
    }

    #[test]
    fn profile_follows_flag() {
        let launcher = tsclient();
        assert_eq!(
            launcher.argv(Some("/home/u/.tsclient/work.rdp")).unwrap(),
            vec!["tsclient", "-x", "/home/u/.tsclient/work.rdp"]
        );
    }

    #[test]
    fn metacharacters_stay_one_argument() {
        let launcher = tsclient();
        let line = launcher.command_line(Some("/tmp/a;rm -rf b"));
        assert_eq!(line, "tsclient -x '/tmp/a;rm -rf b'");
        assert_eq!(
            launcher.argv(Some("/tmp/a;rm -rf b")).unwrap(),
            vec!["tsclient", "-x", "/tmp/a;rm -rf b"]
        );
    }

    #[test]
    fn quotes_and_substitutions_stay_literal() {
        let launcher = tsclient();
        let path = "/tmp/it's $(whoami) `id` \"x\".rdp";
        assert_eq!(launcher.argv(Some(path)).unwrap()[2], path);
        assert_eq!(launcher.argv(Some(path)).unwrap().len(), 3);
    }

    #[test]
    fn launcher_with_arguments_is_split() {
        let launcher = CommandLauncher::new("flatpak run org.tsclient.Client", "--file");
        assert_eq!(
            launcher.argv(Some("/p1")).unwrap(),
            vec!["flatpak", "run", "org.tsclient.Client", "--file", "/p1"]
        );
    }

    #[test]
    fn empty_program_is_rejected() {
        let launcher = CommandLauncher::new("   ", "-x");
        assert!(matches!(launcher.argv(None), Err(LaunchError::EmptyCommand)));
        assert!(launcher.locate().is_none());
    }

    #[test]
    fn empty_profile_launches_bare() {
        let launcher = tsclient();
        assert_eq!(launcher.command_line(Some("")), "tsclient");
        assert_eq!(launcher.argv(Some("")).unwrap(), vec!["tsclient"]);
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let launcher = CommandLauncher::new("tsclient-tray-test-no-such-binary", "-x");
        assert!(matches!(
            launcher.spawn(None),
            Err(LaunchError::Spawn { .. })
        ));
        assert!(launcher.locate().is_none());
    }
}
