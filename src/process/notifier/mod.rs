mod ordering;
mod registry;
mod sovereign;
mod watch;

pub use ordering::{IncomingTransaction, order_incoming_transactions};
pub use registry::Registry;
pub use sovereign::{SovereignNotifier, SovereignNotifierBuilder, WatchMode};
pub use watch::{SubscribedEvent, WatchedAddressSet, WatchedEventSet};
