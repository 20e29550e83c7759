use crate::core::i18n::{translate, Locale};
use crate::core::notify::{Alert, Severity};
use crate::core::runtime::InstallInfo;

pub const UBISOFT_INSTALLER_URL: &str =
    "https://ubistatic3-a.akamaihd.net/orbit/launcher_installer/UbisoftConnectInstaller.exe";

pub const UBISOFT_MANUAL_INSTALL_URL: &str =
    "https://github.com/Heroic-Games-Launcher/HeroicGamesLauncher/wiki/How-to-install-Ubisoft-Connect-on-Linux-and-Mac";

/// Everything needed to install and detect one prefix dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Stable identifier, used in logs.
    pub id: String,
    pub display_name: String,
    pub installer_url: String,
    /// Cache key (file name) of the downloaded installer.
    pub installer_file: String,
    pub silent_args: Vec<String>,
    /// Guest path whose presence means the dependency is installed.
    pub probe_path: String,
    /// Main executable of games that need this dependency.
    pub trigger_executable: String,
    /// Font packages installed alongside the dependency.
    pub font_packages: Vec<String>,
    pub manual_install_url: String,
    pub alert_title_key: String,
    pub alert_message_key: String,
    pub alert_message_default: String,
}

impl Dependency {
    pub fn ubisoft_connect() -> Self {
        Self {
            id: "ubisoft-connect".into(),
            display_name: "Ubisoft Connect".into(),
            installer_url: UBISOFT_INSTALLER_URL.into(),
            installer_file: "UbisoftConnectInstaller.exe".into(),
            silent_args: vec!["/S".into()],
            probe_path:
                "C:\\Program Files (x86)\\Ubisoft\\Ubisoft Game Launcher\\UbisoftConnect.exe"
                    .into(),
            trigger_executable: "UplayLaunch.exe".into(),
            font_packages: vec!["arial".into()],
            manual_install_url: UBISOFT_MANUAL_INSTALL_URL.into(),
            alert_title_key: "box.error.ubisoft-connect.title".into(),
            alert_message_key: "box.error.ubisoft-connect.message".into(),
            alert_message_default: "Installation of Ubisoft Connect in the game prefix failed. \
                Check our wiki page at {url} to install it manually."
                .into(),
        }
    }

    pub fn with_installer_url(mut self, url: impl Into<String>) -> Self {
        self.installer_url = url.into();
        self
    }

    /// Whether a game with this install metadata needs the dependency.
    pub fn is_required_by(&self, install: &InstallInfo) -> bool {
        install.executable_name() == self.trigger_executable
    }

    /// Alert raised when the dependency is still missing after installing.
    pub fn failure_alert(&self, locale: Locale) -> Alert {
        let title = translate(locale, &self.alert_title_key, &self.display_name);
        let message = translate(locale, &self.alert_message_key, &self.alert_message_default)
            .replace("{url}", &self.manual_install_url);
        Alert {
            title,
            message,
            severity: Severity::Error,
        }
    }
}
