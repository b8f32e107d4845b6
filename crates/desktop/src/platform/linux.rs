/// GNOME and most GTK desktops expose the preference as
/// `org.gnome.desktop.interface color-scheme`.
pub fn is_dark_mode() -> bool {
    std::process::Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "color-scheme"])
        .output()
        .map(|o| parse_color_scheme(&String::from_utf8_lossy(&o.stdout)))
        .unwrap_or(true)
}

fn parse_color_scheme(output: &str) -> bool {
    let value = output.trim().trim_matches('\'');
    value != "prefer-light" && value != "default"
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("'prefer-dark'\n", true)]
    #[case("'prefer-light'\n", false)]
    #[case("'default'\n", false)]
    #[case("", true)]
    fn test_parse_color_scheme(#[case] output: &str, #[case] dark: bool) {
        assert_eq!(parse_color_scheme(output), dark);
    }
}
