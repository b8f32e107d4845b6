const PERSONALIZE_KEY: &str = r"HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize";

/// `AppsUseLightTheme` is `0x0` in dark mode.
pub fn is_dark_mode() -> bool {
    std::process::Command::new("reg")
        .args(["query", PERSONALIZE_KEY, "/v", "AppsUseLightTheme"])
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).contains("0x0"))
        .unwrap_or(true)
}
