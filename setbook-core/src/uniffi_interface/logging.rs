use log::LevelFilter;

#[uniffi::export]
pub fn set_debug_log_level() {
    crate::logging::init_logger(LevelFilter::Trace);
}

#[uniffi::export]
pub fn set_log_level(level: &str) -> bool {
    crate::logging::set_log_level(level)
}
