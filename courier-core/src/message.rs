//! Message trait for payload types.

/// A marker trait for payloads that can be published on a bus.
///
/// Messages must be `Send + Sync + 'static` so an [`Event`](crate::Event)
/// carrying one can be queued and delivered from any thread.
///
/// # Example
///
/// ```rust
/// use courier_core::Message;
///
/// #[derive(Debug)]
/// struct OrderPlaced { id: u64 }
///
/// impl Message for OrderPlaced {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Implement `Message` for `{Self}` to publish it on a bus."
)]
pub trait Message: Send + Sync + 'static {}

// Common Message implementations
impl Message for () {}
impl Message for bool {}
impl Message for char {}
impl Message for String {}
impl Message for &'static str {}
impl Message for i8 {}
impl Message for i16 {}
impl Message for i32 {}
impl Message for i64 {}
impl Message for u8 {}
impl Message for u16 {}
impl Message for u32 {}
impl Message for u64 {}
impl Message for usize {}
impl Message for isize {}
impl Message for f32 {}
impl Message for f64 {}
impl<T: Message> Message for Box<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
impl<T: Message, E: Message> Message for Result<T, E> {}
