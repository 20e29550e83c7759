use std::path::{Path, PathBuf};

use crate::core::error::{SetupError, SetupResult};

/// Translate a Windows guest path (`C:\Program Files\...`) into the host path
/// it maps to inside `prefix`.
///
/// Drive letters go through `<prefix>/dosdevices/<x>:` when that link exists,
/// `C:` falls back to `<prefix>/drive_c`. Each component is then matched
/// case-insensitively against what is on disk, the way wine resolves file
/// names; components that do not exist yet are kept verbatim.
pub async fn translate_guest_path(prefix: &Path, guest: &str) -> SetupResult<PathBuf> {
    let normalized = guest.replace('\\', "/");
    let mut chars = normalized.chars();
    let drive = match (chars.next(), chars.next()) {
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => letter.to_ascii_lowercase(),
        _ => return Err(SetupError::PathTranslation(guest.to_string())),
    };

    let mut host = drive_root(prefix, drive)
        .await
        .ok_or_else(|| SetupError::PathTranslation(guest.to_string()))?;

    for component in normalized[2..].split('/').filter(|c| !c.is_empty()) {
        if component == "." || component == ".." {
            return Err(SetupError::PathTranslation(guest.to_string()));
        }
        host = match find_case_insensitive(&host, component).await {
            Some(existing) => existing,
            None => host.join(component),
        };
    }

    Ok(host)
}

async fn drive_root(prefix: &Path, drive: char) -> Option<PathBuf> {
    let device = prefix.join("dosdevices").join(format!("{drive}:"));
    if exists(&device).await {
        return Some(device);
    }
    if drive == 'c' {
        return Some(prefix.join("drive_c"));
    }
    None
}

async fn find_case_insensitive(dir: &Path, name: &str) -> Option<PathBuf> {
    let exact = dir.join(name);
    if exists(&exact).await {
        return Some(exact);
    }

    let wanted = name.to_lowercase();
    let mut entries = tokio::fs::read_dir(dir).await.ok()?;
    while let Ok(Some(entry)) = entries.next_entry().await {
        if entry.file_name().to_string_lossy().to_lowercase() == wanted {
            return Some(entry.path());
        }
    }
    None
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
