/// Emits a `tracing` event if the `tracing` feature is enabled, otherwise
/// expands to nothing.
macro_rules! log_event {
    ( $level:ident: $( $args:tt )* ) => {
        #[cfg(feature = "tracing")]
        tracing::$level!($( $args )*);
    };
}

pub mod difficulty;
pub mod float_ext;
