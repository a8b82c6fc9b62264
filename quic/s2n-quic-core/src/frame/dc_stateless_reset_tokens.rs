// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{frame::ExtensionTag, stateless_reset, varint::VarInt};
use s2n_codec::{
    decoder_invariant,
    zerocopy::{AsBytes as _, FromBytes as _},
    DecoderError, Encoder, EncoderValue,
};

const TAG: VarInt = VarInt::from_u32(0xdc0000);

// The maximum number of stateless reset tokens that could fit in a maximum sized QUIC packet
// based on the maximum permitted UDP payload of 65527 and the long packet header size.
const MAX_STATELESS_RESET_TOKEN_COUNT: usize = 4092;

macro_rules! dc_stateless_reset_tokens_tag {
    () => {
        0xdc0000u64
    };
}

//# DC_STATELESS_RESET_TOKENS Frame {
//#   Type (i) = 0xdc0000,
//#   Count (i),
//#   Stateless Reset Tokens [(128)],
//# }

//# DC_STATELESS_RESET_TOKENS frames contain the following fields:
//#
//# Count: A variable-length integer specifying the number of stateless
//#     reset tokens in the frame.
//# Stateless Reset Tokens: 1 or more 128-bit values that will be used
//#     for a stateless reset of dc path secrets.

#[derive(Debug, PartialEq, Eq)]
pub struct DcStatelessResetTokens<'a> {
    /// 1 or more 128-bit values
    stateless_reset_tokens: &'a [stateless_reset::Token],
}

impl<'a> DcStatelessResetTokens<'a> {
    pub const fn tag(&self) -> ExtensionTag {
        TAG
    }

    /// Constructs a new `DcStatelessResetTokens` frame with the given `stateless_reset_tokens`
    ///
    /// `Err` if the given `stateless_reset_tokens` is empty
    pub fn new(stateless_reset_tokens: &'a [stateless_reset::Token]) -> Result<Self, &'static str> {
        ensure!(
            !stateless_reset_tokens.is_empty(),
            Err("at least one stateless reset token is required")
        );

        ensure!(
            stateless_reset_tokens.len() <= MAX_STATELESS_RESET_TOKEN_COUNT,
            Err("too many stateless reset tokens")
        );

        Ok(Self {
            stateless_reset_tokens,
        })
    }
}

impl<'a> IntoIterator for DcStatelessResetTokens<'a> {
    type Item = &'a stateless_reset::Token;
    type IntoIter = core::slice::Iter<'a, stateless_reset::Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.stateless_reset_tokens.iter()
    }
}

macro_rules! impl_decode_parameterized {
    ($slice_from_prefix:ident, $buffer:ident) => {{
        let (count, buffer) = $buffer.decode::<VarInt>()?;

        decoder_invariant!(
            count > VarInt::ZERO,
            "at least one stateless token must be supplied"
        );

        decoder_invariant!(
            count <= MAX_STATELESS_RESET_TOKEN_COUNT,
            "too many stateless reset tokens"
        );

        let count: usize = count
            .try_into()
            .expect("MAX_STATELESS_RESET_TOKEN_COUNT fits in usize");

        let buffer = buffer.into_less_safe_slice();
        let (stateless_reset_tokens, remaining) =
            stateless_reset::Token::$slice_from_prefix(buffer, count)
                .ok_or(DecoderError::InvariantViolation("invalid encoding"))?;

        let frame = DcStatelessResetTokens {
            stateless_reset_tokens,
        };

        Ok((frame, remaining.into()))
    }};
}

impl<'a> ::s2n_codec::DecoderParameterizedValue<'a> for DcStatelessResetTokens<'a> {
    type Parameter = ExtensionTag;

    #[inline]
    fn decode_parameterized(
        _tag: Self::Parameter,
        buffer: ::s2n_codec::DecoderBuffer<'a>,
    ) -> ::s2n_codec::DecoderBufferResult<'a, Self> {
        impl_decode_parameterized!(slice_from_prefix, buffer)
    }
}

impl<'a> ::s2n_codec::DecoderParameterizedValueMut<'a> for DcStatelessResetTokens<'a> {
    type Parameter = ExtensionTag;

    #[inline]
    fn decode_parameterized_mut(
        _tag: Self::Parameter,
        buffer: ::s2n_codec::DecoderBufferMut<'a>,
    ) -> ::s2n_codec::DecoderBufferMutResult<'a, Self> {
        impl_decode_parameterized!(mut_slice_from_prefix, buffer)
    }
}

impl EncoderValue for DcStatelessResetTokens<'_> {
    fn encode<E: Encoder>(&self, buffer: &mut E) {
        buffer.encode(&TAG);
        let count =
            self.stateless_reset_tokens.len().try_into().expect(
                "count is limited to MAX_STATELESS_RESET_TOKEN_COUNT, which fits in VarInt",
            );
        buffer.encode::<VarInt>(&count);
        buffer.encode(&self.stateless_reset_tokens.as_bytes());
    }
}
