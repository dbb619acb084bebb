//! JSON helpers for files under ~/.leviathan/ such as the engine config.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.leviathan/ directory path, creating it if needed.
pub fn leviathan_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".leviathan");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path for a file in ~/.leviathan/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(leviathan_dir()?.join(filename))
}

/// Load a JSON file from ~/.leviathan/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    let path = match data_path(filename) {
        Ok(p) => p,
        Err(_) => return T::default(),
    };
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable JSON file");
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.leviathan/, returning the path written.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<PathBuf> {
    let path = data_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leviathan_dir_exists() {
        let dir = leviathan_dir().expect("leviathan_dir should succeed");
        assert!(dir.exists());
        assert!(dir.ends_with(".leviathan"));
    }

    #[test]
    fn test_data_path_format() {
        let path = data_path("test.json").expect("data_path should succeed");
        assert!(path.to_string_lossy().ends_with(".leviathan/test.json"));
    }

    #[test]
    fn test_load_missing_returns_default() {
        let val: Vec<String> = load_json_or_default("nonexistent_test_file_12345.json");
        assert!(val.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let data = vec!["boss".to_string(), "ledger".to_string()];
        let path = save_json("persistence_test.json", &data).expect("save should succeed");

        let loaded: Vec<String> = load_json_or_default("persistence_test.json");
        assert_eq!(loaded, data);

        fs::remove_file(path).ok();
    }
}
