use std::time::Duration;

/// Default initial capacity of the receive buffer, also the size reserved before each read
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Default limit for bytes buffered while a request-line or header section is incomplete
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 8 * 1024;

/// Default deadline for reading one complete request
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a [`StreamReader`](super::StreamReader).
///
/// The receive buffer starts at `initial_capacity` and grows on demand, but never
/// holds more than `max_buffer_size` unconsumed bytes. Body bytes are consumed as
/// they arrive, so the limit effectively bounds the request-line plus the header
/// section, not the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    initial_capacity: usize,
    max_buffer_size: usize,
    read_timeout: Option<Duration>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
        }
    }
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_max_buffer_size(mut self, max_buffer_size: usize) -> Self {
        self.max_buffer_size = max_buffer_size;
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = Some(read_timeout);
        self
    }

    /// Disables the deadline: a silent peer keeps the reader waiting forever.
    pub fn without_read_timeout(mut self) -> Self {
        self.read_timeout = None;
        self
    }

    /// Never larger than `max_buffer_size`.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity.min(self.max_buffer_size)
    }

    pub fn max_buffer_size(&self) -> usize {
        self.max_buffer_size
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
}
