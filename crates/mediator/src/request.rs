/// A command or query routed through the [`Mediator`](crate::Mediator).
///
/// Requests are **owned, transient values**: they carry everything the handler
/// needs and are consumed by it. The associated `Response` is whatever the
/// handler produces; for fallible operations this is usually a `Result`.
///
/// ## Design Constraints
///
/// - **Send + 'static**: requests cross `.await` points and task boundaries
/// - **One handler per type**: the request type itself is the routing key
pub trait Request: Send + 'static {
    type Response: Send + 'static;
}
