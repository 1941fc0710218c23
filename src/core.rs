//! Core layer: pure stream transformations.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;

/// Apply `validator` to every value emitted by a fallible stream.
///
/// Values the validator accepts are forwarded unchanged, in emission order.
/// The first rejection terminates the stream with the validator's error; a
/// failure already present in the source is forwarded as-is without invoking
/// the validator. The operator never fails on its own.
///
/// # Examples
///
/// ```
/// use futures_util::{StreamExt, stream};
/// use wirepoint::core::validate;
///
/// # futures_util::future::FutureExt::now_or_never(async {
/// let source = stream::iter([Ok::<_, &str>(1), Ok(2), Ok(3)]);
/// let checked: Vec<_> = validate(source, |n| {
///     if *n < 3 { Ok(()) } else { Err("too large") }
/// })
/// .collect()
/// .await;
///
/// assert_eq!(checked, vec![Ok(1), Ok(2), Err("too large")]);
/// # }).unwrap();
/// ```
pub fn validate<S, T, E, F>(source: S, validator: F) -> Validate<S, F>
where
    S: Stream<Item = Result<T, E>>,
    F: FnMut(&T) -> Result<(), E>,
{
    Validate {
        source,
        validator,
        done: false,
    }
}

/// Stream returned by [`validate`] and [`ValidateExt::validate`].
#[derive(Debug)]
pub struct Validate<S, F> {
    source:    S,
    validator: F,
    done:      bool,
}

impl<S, T, E, F> Stream for Validate<S, F>
where
    S: Stream<Item = Result<T, E>> + Unpin,
    F: FnMut(&T) -> Result<(), E> + Unpin,
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }

        match Pin::new(&mut this.source).poll_next(cx) {
            Poll::Ready(Some(Ok(value))) => match (this.validator)(&value) {
                Ok(()) => Poll::Ready(Some(Ok(value))),
                Err(error) => {
                    this.done = true;
                    Poll::Ready(Some(Err(error)))
                }
            },
            // Upstream failures pass through untouched; the validator never
            // sees them.
            Poll::Ready(Some(Err(error))) => {
                this.done = true;
                Poll::Ready(Some(Err(error)))
            }
            Poll::Ready(None) => {
                this.done = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // A rejection may cut the stream short at any point.
        (0, self.source.size_hint().1)
    }
}

/// Extension adding [`validate`] as a combinator on fallible streams.
pub trait ValidateExt: Stream {
    fn validate<T, E, F>(self, validator: F) -> Validate<Self, F>
    where
        Self: Stream<Item = Result<T, E>> + Sized,
        F: FnMut(&T) -> Result<(), E>,
    {
        validate(self, validator)
    }
}

impl<S: Stream> ValidateExt for S {}
