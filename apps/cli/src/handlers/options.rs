use anyhow::Result;
use hkc_domain::OptionSpec;
use hkc_haiku::Haiku;
use hkc_haiku::options::bundled_options;
use hkc_kernel::Platform;

/// Prints the platform options, or the bundled-library toggles with `bundled`.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn list_options(bundled: bool, json: bool) -> Result<()> {
    let options = if bundled { bundled_options() } else { Haiku::new().options() };

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        render_options(&options);
    }
    Ok(())
}

fn render_options(options: &[OptionSpec]) {
    println!("{:<24} {:<8} {:<16} {}", "Option", "Default", "Allowed", "Description");
    println!("{:-<100}", "");

    for option in options {
        println!(
            "{:<24} {:<8} {:<16} {}",
            option.name,
            option.default_value(),
            option.allowed_values().join("|"),
            option.description,
        );
    }
}
