use std::path::{Component, Path, PathBuf};

pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("chromemark");
    }

    if let Some(home) = home_dir() {
        return home.join(".config/chromemark");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("chromemark");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn home_dir() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    #[cfg(target_os = "windows")]
    if let Ok(profile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(profile));
    }

    None
}

/// Chrome's user data directory for the current platform, holding one
/// subdirectory per profile. `None` on platforms Chrome has no known
/// location for.
pub fn default_chrome_dir() -> Option<PathBuf> {
    chrome_user_data_dir()
}

#[cfg(target_os = "linux")]
fn chrome_user_data_dir() -> Option<PathBuf> {
    Some(home_dir()?.join(".config/google-chrome"))
}

#[cfg(target_os = "macos")]
fn chrome_user_data_dir() -> Option<PathBuf> {
    Some(home_dir()?.join("Library/Application Support/Google/Chrome"))
}

#[cfg(target_os = "windows")]
fn chrome_user_data_dir() -> Option<PathBuf> {
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        return Some(PathBuf::from(local).join("Google\\Chrome\\User Data"));
    }
    Some(home_dir()?.join("AppData\\Local\\Google\\Chrome\\User Data"))
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn chrome_user_data_dir() -> Option<PathBuf> {
    None
}

/// Turn the literal escapes `\t`, `\n` and `\r` into the characters they
/// name. Anything else is kept as typed.
pub fn unescape_indent(raw: &str) -> String {
    raw.replace("\\t", "\t")
        .replace("\\n", "\n")
        .replace("\\r", "\r")
}

/// Lexically normalise a path: drop `.` components and trailing
/// separators, fold `dir/..` pairs. The filesystem is never consulted.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}
