/// Album data accessor: the four album page operations
pub mod albums;
/// Endpoint identifiers, path templates and request parameters
pub mod endpoints;
/// Data entities for albums, tracks and artists
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// User-visible notifications
pub mod notification;
/// Request transport and its HTTP implementation
pub mod transport;

pub use albums::AlbumClient;
pub use notification::{LogNotifier, NotificationSink, Severity};
pub use transport::{HttpTransport, Transport};
