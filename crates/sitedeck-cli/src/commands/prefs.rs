//! Theme and disclaimer preference handlers

use anyhow::Result;

use sitedeck_core::{Environment, Persistence, Preferences, Theme};

use crate::output::{Output, OutputFormat};

/// Show the stored theme and what it resolves to here
pub fn show_theme(prefs: &Preferences, env: &dyn Environment, output: &Output) -> Result<()> {
    let theme = prefs.theme();
    let resolved = theme.resolve(env);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "theme": theme.as_str(),
                    "resolved": resolved.to_string(),
                    "persistent": prefs.is_persistent()
                })
            );
        }
        OutputFormat::Quiet => println!("{}", theme),
        OutputFormat::Human => {
            if theme == Theme::System {
                println!("Theme: system (currently {})", resolved);
            } else {
                println!("Theme: {}", theme);
            }
        }
    }
    Ok(())
}

/// Store a theme
pub fn set_theme(prefs: &mut Preferences, theme: Theme, output: &Output) -> Result<()> {
    let persistence = prefs.set_theme(theme);
    report(persistence, &format!("Theme set to {}", theme), output);
    Ok(())
}

/// Advance to the next theme (light -> dark -> system)
pub fn toggle_theme(prefs: &mut Preferences, output: &Output) -> Result<()> {
    let next = prefs.theme().next();
    set_theme(prefs, next, output)
}

/// Show, accept or reset the outbound-link disclaimer
pub fn disclaimer(prefs: &mut Preferences, accept: bool, reset: bool, output: &Output) -> Result<()> {
    if accept {
        let persistence = prefs.confirm_disclaimer();
        report(persistence, "Disclaimer accepted", output);
    } else if reset {
        let persistence = prefs.reset_disclaimer();
        report(persistence, "Disclaimer reset", output);
    } else {
        match output.format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({"confirmed": prefs.disclaimer_confirmed()})
            ),
            OutputFormat::Quiet => println!("{}", prefs.disclaimer_confirmed()),
            OutputFormat::Human => println!(
                "Disclaimer: {}",
                if prefs.disclaimer_confirmed() {
                    "accepted"
                } else {
                    "not accepted"
                }
            ),
        }
    }
    Ok(())
}

fn report(persistence: Persistence, message: &str, output: &Output) {
    output.success(message);
    if persistence == Persistence::SessionOnly {
        output.warning("Preferences storage unavailable; this change lasts for this session only.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycles_theme() {
        let mut prefs = Preferences::in_memory();
        let output = Output::new(OutputFormat::Quiet);

        toggle_theme(&mut prefs, &output).unwrap();
        assert_eq!(prefs.theme(), Theme::Light);
        toggle_theme(&mut prefs, &output).unwrap();
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn test_disclaimer_accept_and_reset() {
        let mut prefs = Preferences::in_memory();
        let output = Output::new(OutputFormat::Quiet);

        disclaimer(&mut prefs, true, false, &output).unwrap();
        assert!(prefs.disclaimer_confirmed());
        disclaimer(&mut prefs, false, true, &output).unwrap();
        assert!(!prefs.disclaimer_confirmed());
    }
}
