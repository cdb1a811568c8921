use std::fmt::Debug;


/// Build a `map_err` closure that logs `message` along with the cause,
/// then wraps the cause into the error to propagate.
pub fn log_message_and_return<E: Debug, T>(
    message: &str,
    wrap: impl FnOnce(E) -> T,
) -> impl FnOnce(E) -> T {
    move |e| {
        log::error!("{message}\n{e:#?}");
        wrap(e)
    }
}
