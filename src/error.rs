use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No event named '{0}' is declared for the active device role")]
    UnknownEvent(String),

    #[error(
        "Configured CPU mask width of {requested} bits exceeds the capture capacity of {capacity} bits"
    )]
    MaskWidthExceedsCapacity { requested: u16, capacity: usize },

    #[error("Trace capture has already been initialized")]
    AlreadyInitialized,

    #[error("An event sink has already been installed")]
    SinkAlreadyInstalled,
}
