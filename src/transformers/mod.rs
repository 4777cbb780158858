//! Composable stream transformers for view-model pipelines.
//!
//! Every transformer is a free function from one stream to another, and is
//! also available as a chained method through [`Transform`]:
//!
//! ```ignore
//! use backer::transformers::Transform;
//!
//! let requests = form_data
//!     .take_when(submit_clicks)
//!     .then(move |form| api.login(&form.email, &form.password).pipe_api_errors_to(errors.clone()));
//! ```
//!
//! Fallible streams are streams of `Result`. The first `Err` is terminal:
//! transformers never read past it.

mod combine;
mod errors;
mod notification;
mod ui;
mod values;

pub use combine::{combine_latest_pair, take_pair_when, take_when, wait_until, zip_pair};
pub use errors::{
    never_api_error, never_api_error_with, never_error, never_error_with, pipe_api_errors_to,
    pipe_errors_to,
};
pub use notification::{completed, errors, materialize, values, Notification};
pub use ui::{observe_for_ui, ObserveForUi};
pub use values::{coalesce, ignore_values, incremental_count};

use futures::Stream;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::{ApiErrorSource, ErrorEnvelope};
use crate::scheduler::UiScheduler;

/// Method-chaining access to every transformer in this module.
pub trait Transform: Stream + Sized {
    fn coalesce<T>(self, default: T) -> impl Stream<Item = T>
    where
        Self: Stream<Item = Option<T>>,
        T: Clone,
    {
        values::coalesce(self, default)
    }

    fn combine_latest_pair<U>(self, second: U) -> impl Stream<Item = (Self::Item, U::Item)>
    where
        U: Stream,
        Self::Item: Clone,
        U::Item: Clone,
    {
        combine::combine_latest_pair(self, second)
    }

    fn zip_pair<U>(self, second: U) -> impl Stream<Item = (Self::Item, U::Item)>
    where
        U: Stream,
    {
        combine::zip_pair(self, second)
    }

    fn take_when<G>(self, signal: G) -> impl Stream<Item = Self::Item>
    where
        G: Stream,
        Self::Item: Clone,
    {
        combine::take_when(self, signal)
    }

    fn take_pair_when<G>(self, signal: G) -> impl Stream<Item = (Self::Item, G::Item)>
    where
        G: Stream,
        Self::Item: Clone,
    {
        combine::take_pair_when(self, signal)
    }

    fn wait_until<U>(self, until: U) -> impl Stream<Item = Self::Item>
    where
        U: Stream,
    {
        combine::wait_until(self, until)
    }

    fn ignore_values(self) -> impl Stream<Item = ()> {
        values::ignore_values(self)
    }

    fn incremental_count(self, first_page: u32) -> impl Stream<Item = u32> {
        values::incremental_count(self, first_page)
    }

    fn observe_for_ui(self, scheduler: UiScheduler) -> ObserveForUi<Self>
    where
        Self::Item: Send + 'static,
    {
        ui::observe_for_ui(self, scheduler)
    }

    fn never_error<T, E>(self) -> impl Stream<Item = T>
    where
        Self: Stream<Item = Result<T, E>>,
    {
        errors::never_error(self)
    }

    fn never_error_with<T, E, F>(self, on_error: F) -> impl Stream<Item = T>
    where
        Self: Stream<Item = Result<T, E>>,
        F: FnOnce(E),
    {
        errors::never_error_with(self, on_error)
    }

    fn pipe_errors_to<T, E>(self, sink: UnboundedSender<E>) -> impl Stream<Item = T>
    where
        Self: Stream<Item = Result<T, E>>,
    {
        errors::pipe_errors_to(self, sink)
    }

    fn never_api_error<T, E>(self) -> impl Stream<Item = Result<T, E>>
    where
        Self: Stream<Item = Result<T, E>>,
        E: ApiErrorSource,
    {
        errors::never_api_error(self)
    }

    fn never_api_error_with<T, E, F>(self, on_error: F) -> impl Stream<Item = Result<T, E>>
    where
        Self: Stream<Item = Result<T, E>>,
        E: ApiErrorSource,
        F: FnOnce(ErrorEnvelope),
    {
        errors::never_api_error_with(self, on_error)
    }

    fn pipe_api_errors_to<T, E>(
        self,
        sink: UnboundedSender<ErrorEnvelope>,
    ) -> impl Stream<Item = Result<T, E>>
    where
        Self: Stream<Item = Result<T, E>>,
        E: ApiErrorSource,
    {
        errors::pipe_api_errors_to(self, sink)
    }

    fn materialize<T, E>(self) -> impl Stream<Item = Notification<T, E>>
    where
        Self: Stream<Item = Result<T, E>>,
    {
        notification::materialize(self)
    }

    fn values<T, E>(self) -> impl Stream<Item = T>
    where
        Self: Stream<Item = Notification<T, E>>,
    {
        notification::values(self)
    }

    fn errors<T, E>(self) -> impl Stream<Item = E>
    where
        Self: Stream<Item = Notification<T, E>>,
    {
        notification::errors(self)
    }

    fn completed<T, E>(self) -> impl Stream<Item = ()>
    where
        Self: Stream<Item = Notification<T, E>>,
    {
        notification::completed(self)
    }
}

impl<S: Stream> Transform for S {}
