/// Application hooks on the client's shared error path.
///
/// Every failed request goes through exactly one of these: authentication
/// failures hit [`handle_unauthorized`](Hooks::handle_unauthorized), every
/// other failure hits [`show_error_message`](Hooks::show_error_message)
/// before the error is returned to the caller.
pub trait Hooks: Send + Sync {
    /// Present `message` to the end user. Any user-visible notification
    /// mechanism will do; the reference behavior is a blocking modal.
    fn show_error_message(&self, message: &str);

    /// A request failed with 401 Unauthorized. Expected to start whatever
    /// re-authentication or redirect flow the application needs.
    fn handle_unauthorized(&self) {}
}

/// Default hooks: report through `tracing` instead of a UI.
#[derive(Debug, Default)]
pub struct TracingHooks;

impl Hooks for TracingHooks {
    fn show_error_message(&self, message: &str) {
        tracing::error!("resource request failed: {message}");
    }

    fn handle_unauthorized(&self) {
        tracing::warn!("resource request was unauthorized");
    }
}
