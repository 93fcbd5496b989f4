//! Theme preference commands.

use anyhow::{bail, Result};

use aichat_core::theme::{ResolvedTheme, Theme};

pub fn get() -> Result<()> {
    let theme = Theme::load();
    if theme == Theme::System {
        let resolved = match theme.resolve(terminal_prefers_dark) {
            ResolvedTheme::Dark => "dark",
            ResolvedTheme::Light => "light",
        };
        println!("system (resolved: {resolved})");
    } else {
        println!("{}", theme.as_str());
    }
    Ok(())
}

pub fn set(theme: &str) -> Result<()> {
    let Ok(theme) = theme.parse::<Theme>() else {
        bail!("unknown theme '{theme}' (expected light, dark, or system)");
    };

    theme.save()?;
    println!("Theme set to {}", theme.as_str());
    Ok(())
}

/// Environment probe for the "system" theme.
///
/// COLORFGBG looks like "15;0"; the last field is the background color and
/// values below 8 are dark. Absent the variable, assume a dark terminal.
fn terminal_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| v.rsplit(';').next().and_then(|bg| bg.trim().parse::<u8>().ok()))
        .is_none_or(|bg| bg < 8)
}
