/// Install the stderr logger for diagnostics, once per process.
///
/// stdout belongs to the trace lines. Only records from this crate's targets
/// are let through, the host process may log through the same facade.
#[cfg(feature = "logs")]
pub fn init() {
    use log::LevelFilter;
    static LOGGER: once_cell::sync::OnceCell<()> = once_cell::sync::OnceCell::new();
    _ = LOGGER.get_or_init(|| {
        let mut builder = simplelog::ConfigBuilder::new();
        _ = builder
            .set_time_format_rfc3339()
            .set_thread_level(LevelFilter::Error)
            .set_target_level(LevelFilter::Off)
            .add_filter_allow_str("netinterpose");
        _ = simplelog::TermLogger::init(
            LevelFilter::Info,
            builder.build(),
            simplelog::TerminalMode::Stderr,
            simplelog::ColorChoice::Never,
        );
    });
}

#[doc(hidden)]
#[macro_export]
macro_rules! diag {
    ($level:ident, $($arg:tt)+) => {
        cfg_if::cfg_if! {
            if #[cfg(feature = "logs")] {
                $crate::log::init();
                log::$level!($($arg)+)
            } else {
                let _ = format_args!($($arg)+);
            }
        }
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::diag!(info, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::diag!(warn, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::diag!(error, $($arg)+) };
}
