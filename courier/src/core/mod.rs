pub(crate) mod dead_event;
