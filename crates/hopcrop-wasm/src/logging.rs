//! `log` backend writing to the browser console.

use log::LevelFilter;

/// Install the console logger. Later calls only change the level.
pub fn init(level: LevelFilter) {
    // Fails if a logger is already installed, which is fine.
    let _ = console_log::init();
    log::set_max_level(level);
}
