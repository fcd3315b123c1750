use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Installs the stderr subscriber. Crates outside `flexkit*` are capped at WARN.
/// The returned handle lets the caller change the level after startup.
pub(crate) fn setup_tracing(initial: LevelFilter) -> Arc<AtomicU8> {
    let log_level_state = Arc::new(AtomicU8::new(level_filter_to_u8(initial)));
    let filter_state = log_level_state.clone();
    let filter_layer = tracing_subscriber::filter::filter_fn(move |metadata| {
        let Some(level) = u8_to_level(filter_state.load(Ordering::Relaxed)) else {
            return false;
        };
        let is_flexkit = metadata.target().starts_with("flexkit");
        let effective_level = if is_flexkit { level } else { level.min(Level::WARN) };
        metadata.level() <= &effective_level
    });
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter_layer))
        .init();

    log_level_state
}

pub(crate) fn set_log_level(state: &AtomicU8, level: LevelFilter) {
    state.store(level_filter_to_u8(level), Ordering::Relaxed);
}

pub(crate) fn level_filter_to_u8(level: LevelFilter) -> u8 {
    match level {
        LevelFilter::OFF => 0,
        LevelFilter::ERROR => 1,
        LevelFilter::WARN => 2,
        LevelFilter::INFO => 3,
        LevelFilter::DEBUG => 4,
        LevelFilter::TRACE => 5,
    }
}

fn u8_to_level(value: u8) -> Option<Level> {
    match value {
        0 => None,
        1 => Some(Level::ERROR),
        2 => Some(Level::WARN),
        3 => Some(Level::INFO),
        4 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_encoding_round_trips() {
        for level in [
            LevelFilter::ERROR,
            LevelFilter::WARN,
            LevelFilter::INFO,
            LevelFilter::DEBUG,
            LevelFilter::TRACE,
        ] {
            let decoded = u8_to_level(level_filter_to_u8(level)).map(LevelFilter::from_level);
            assert_eq!(decoded, Some(level));
        }
        assert_eq!(u8_to_level(level_filter_to_u8(LevelFilter::OFF)), None);
    }

    #[test]
    fn set_log_level_updates_state() {
        let state = AtomicU8::new(level_filter_to_u8(LevelFilter::INFO));
        set_log_level(&state, LevelFilter::DEBUG);
        assert_eq!(state.load(Ordering::Relaxed), level_filter_to_u8(LevelFilter::DEBUG));
    }
}
