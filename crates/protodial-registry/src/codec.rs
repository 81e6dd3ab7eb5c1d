//! A [`Codec`] that encodes and decodes [`DynamicMessage`] values.
//!
//! Generated clients carry one codec per message type. Here the message type
//! is only known at runtime, so the decoder is parameterised by the
//! [`MessageDescriptor`] of the message it expects on the wire.

use prost::Message;
use prost_reflect::{DynamicMessage, MessageDescriptor};
use tonic::Status;
use tonic::codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder};

/// Codec for runtime-described protobuf messages.
#[derive(Debug, Clone)]
pub struct DynamicCodec {
    decode_as: MessageDescriptor,
}

impl DynamicCodec {
    /// Creates a codec that decodes incoming messages as `decode_as`.
    #[must_use]
    pub const fn new(decode_as: MessageDescriptor) -> Self {
        Self { decode_as }
    }
}

impl Codec for DynamicCodec {
    type Encode = DynamicMessage;
    type Decode = DynamicMessage;
    type Encoder = DynamicEncoder;
    type Decoder = DynamicDecoder;

    fn encoder(&mut self) -> Self::Encoder {
        DynamicEncoder
    }

    fn decoder(&mut self) -> Self::Decoder {
        DynamicDecoder {
            descriptor: self.decode_as.clone(),
        }
    }
}

/// Writes a [`DynamicMessage`] in protobuf wire format.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicEncoder;

impl Encoder for DynamicEncoder {
    type Item = DynamicMessage;
    type Error = Status;

    fn encode(&mut self, item: Self::Item, dst: &mut EncodeBuf<'_>) -> Result<(), Self::Error> {
        item.encode(dst)
            .map_err(|error| Status::internal(format!("failed to encode message: {error}")))
    }
}

/// Reads a [`DynamicMessage`] of a fixed type from protobuf wire format.
#[derive(Debug, Clone)]
pub struct DynamicDecoder {
    descriptor: MessageDescriptor,
}

impl Decoder for DynamicDecoder {
    type Item = DynamicMessage;
    type Error = Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> Result<Option<Self::Item>, Self::Error> {
        let mut message = DynamicMessage::new(self.descriptor.clone());
        message
            .merge(src)
            .map_err(|error| Status::internal(format!("failed to decode message: {error}")))?;
        Ok(Some(message))
    }
}
