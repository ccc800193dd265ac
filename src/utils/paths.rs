use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub fn get_taskdeck_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".taskdeck"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_taskdeck_dir()?;
    Ok(app_dir.join("config.toml"))
}

pub fn get_credentials_path() -> Result<PathBuf> {
    let app_dir = get_taskdeck_dir()?;
    Ok(app_dir.join("credentials.toml"))
}

pub fn get_logs_dir() -> Result<PathBuf> {
    let app_dir = get_taskdeck_dir()?;
    Ok(app_dir.join("logs"))
}

pub fn get_crash_log_path() -> Result<PathBuf> {
    let app_dir = get_taskdeck_dir()?;
    Ok(app_dir.join("crash.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_taskdeck_dir() {
        let dir = get_taskdeck_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".taskdeck"));
    }

    #[test]
    fn test_get_config_path() {
        let path = get_config_path().unwrap();
        assert!(path.to_string_lossy().contains(".taskdeck"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_get_credentials_path() {
        let path = get_credentials_path().unwrap();
        assert!(path.to_string_lossy().ends_with("credentials.toml"));
    }

    #[test]
    fn test_get_logs_dir() {
        let dir = get_logs_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".taskdeck"));
        assert!(dir.to_string_lossy().ends_with("logs"));
    }

    #[test]
    fn test_get_crash_log_path() {
        let path = get_crash_log_path().unwrap();
        assert!(path.to_string_lossy().ends_with("crash.log"));
    }
}
