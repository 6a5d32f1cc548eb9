use anyhow::Result;
use hkc_haiku::Haiku;
use hkc_kernel::Platform;

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Prints the platform's activation and build status for the current host.
///
/// # Errors
/// Never fails today; kept fallible like the other handlers.
pub fn detect() -> Result<()> {
    let haiku = Haiku::new();
    let host = haiku.host();

    println!("{:<10} {:<8} {:<10} {:<10}", "Platform", "Active", "Can build", "Host");
    println!("{:-<50}", "");
    println!(
        "{:<10} {:<8} {:<10} {}/{}",
        haiku.name(),
        yes_no(haiku.is_active()),
        yes_no(haiku.can_build()),
        host.os,
        host.machine,
    );
    Ok(())
}
