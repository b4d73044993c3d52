/// Try to point the default browser at `url`. Failure only costs the user a click.
pub fn launch(url: &str) {
    match open::that_detached(url) {
        Ok(()) => log::debug!("Opened browser at {}", url),
        Err(e) => log::debug!("Failed to open browser at {}: {}", url, e),
    }
}
