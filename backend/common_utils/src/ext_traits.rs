//! Extension traits for foreign types.

use error_stack::ResultExt;

use crate::errors::{self, CustomResult};

/// Parsing of JSON byte slices into typed structs.
pub trait ByteSliceExt {
    /// Deserialize the slice as JSON into `T`, tagging failures with
    /// `type_name` for diagnostics.
    fn parse_struct<'de, T>(
        &'de self,
        type_name: &'static str,
    ) -> CustomResult<T, errors::ParsingError>
    where
        T: serde::Deserialize<'de>;
}

impl ByteSliceExt for [u8] {
    #[track_caller]
    fn parse_struct<'de, T>(
        &'de self,
        type_name: &'static str,
    ) -> CustomResult<T, errors::ParsingError>
    where
        T: serde::Deserialize<'de>,
    {
        serde_json::from_slice(self)
            .change_context(errors::ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| format!("Unable to parse {type_name} from a byte slice"))
    }
}

/// An async counterpart of `Option::map` / `Result::map`.
#[allow(async_fn_in_trait)]
pub trait AsyncExt<A> {
    /// Output type of [`Self::async_map`]
    type WrappedSelf<T>;

    /// Map the wrapped value through an async function.
    async fn async_map<F, B, Fut>(self, func: F) -> Self::WrappedSelf<B>
    where
        F: FnOnce(A) -> Fut + Send,
        Fut: futures::Future<Output = B> + Send;
}

impl<A: Send, E: Send + std::fmt::Debug> AsyncExt<A> for Result<A, E> {
    type WrappedSelf<T> = Result<T, E>;

    async fn async_map<F, B, Fut>(self, func: F) -> Self::WrappedSelf<B>
    where
        F: FnOnce(A) -> Fut + Send,
        Fut: futures::Future<Output = B> + Send,
    {
        match self {
            Ok(a) => Ok(func(a).await),
            Err(err) => Err(err),
        }
    }
}

impl<A: Send> AsyncExt<A> for Option<A> {
    type WrappedSelf<T> = Option<T>;

    async fn async_map<F, B, Fut>(self, func: F) -> Self::WrappedSelf<B>
    where
        F: FnOnce(A) -> Fut + Send,
        Fut: futures::Future<Output = B> + Send,
    {
        match self {
            Some(a) => Some(func(a).await),
            None => None,
        }
    }
}
