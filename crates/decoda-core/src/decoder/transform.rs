//! `map` and `try_map` adapters
//!
//! Both keep the wrapped decoder's name, so a transformed decoder still
//! reports failures in terms of what it expects from the input.

use super::Decoder;
use crate::decoding::DecodingResult;
use crate::value::Value;

/// Decoder returned by [`DecoderExt::map`](super::DecoderExt::map)
#[derive(Debug, Clone)]
pub struct MapDecoder<D, F> {
    inner: D,
    transformer: F,
}

impl<D, F> MapDecoder<D, F> {
    pub(crate) fn new(inner: D, transformer: F) -> Self {
        Self { inner, transformer }
    }
}

impl<D, F, U> Decoder for MapDecoder<D, F>
where
    D: Decoder,
    F: Fn(D::Output) -> U,
{
    type Output = U;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn decode(&self, input: &Value) -> DecodingResult<U> {
        self.inner.decode(input).map(&self.transformer)
    }

    fn test(&self, input: &Value) -> bool {
        self.inner.test(input)
    }
}

/// Decoder returned by [`DecoderExt::try_map`](super::DecoderExt::try_map)
///
/// The operation only runs after the inner decoder succeeded.
#[derive(Debug, Clone)]
pub struct TryMapDecoder<D, F> {
    inner: D,
    operation: F,
}

impl<D, F> TryMapDecoder<D, F> {
    pub(crate) fn new(inner: D, operation: F) -> Self {
        Self { inner, operation }
    }
}

impl<D, F, U> Decoder for TryMapDecoder<D, F>
where
    D: Decoder,
    F: Fn(D::Output) -> DecodingResult<U>,
{
    type Output = U;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn decode(&self, input: &Value) -> DecodingResult<U> {
        self.inner.decode(input).and_then(&self.operation)
    }
}
