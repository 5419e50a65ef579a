pub(crate) mod bus;
pub(crate) mod registry;

pub use bus::{EventBus, EventBusBuilder};
pub use registry::{SubscriberRegistry, SubscriptionId};
