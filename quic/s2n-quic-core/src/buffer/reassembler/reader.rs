// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::Reassembler;
use crate::{
    buffer::{
        reader::{
            storage::{Chunk, Infallible},
            Reader, Storage,
        },
        writer,
    },
    varint::VarInt,
};
use bytes::BytesMut;

impl Storage for Reassembler {
    type Error = core::convert::Infallible;

    #[inline]
    fn buffered_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn buffer_is_empty(&self) -> bool {
        self.is_empty()
    }

    #[inline]
    fn read_chunk(&mut self, watermark: usize) -> Result<Chunk, Self::Error> {
        if let Some(chunk) = self.pop_watermarked(watermark) {
            return Ok(chunk.into());
        }

        Ok(Default::default())
    }

    #[inline]
    fn partial_copy_into<Dest>(&mut self, dest: &mut Dest) -> Result<Chunk, Self::Error>
    where
        Dest: writer::Storage + ?Sized,
    {
        // ensure we have enough capacity in the destination buf
        ensure!(dest.has_remaining_capacity(), Ok(Default::default()));

        let mut prev = BytesMut::new();

        loop {
            let remaining = dest.remaining_capacity();
            unsafe {
                assume!(prev.len() <= remaining);
            }
            let watermark = remaining - prev.len();

            debug_assert!(remaining > 0);

            match self.pop_watermarked(watermark) {
                Some(chunk) => {
                    debug_assert!(!chunk.is_empty(), "pop should never return an empty chunk");
                    debug_assert!(
                        chunk.len() <= watermark,
                        "chunk should never exceed watermark"
                    );

                    // flush the previous chunk if needed
                    if !prev.is_empty() {
                        dest.put_bytes_mut(prev);
                    }

                    // if the chunk is exactly the same size as the watermark, then return it
                    if chunk.len() == watermark {
                        return Ok(chunk.into());
                    }

                    // store the chunk for another iteration, in case we can pull more
                    prev = chunk;
                }
                None if prev.is_empty() => {
                    return Ok(Default::default());
                }
                None => {
                    return Ok(prev.into());
                }
            }
        }
    }

    #[inline]
    fn copy_into<Dest>(&mut self, dest: &mut Dest) -> Result<(), Self::Error>
    where
        Dest: writer::Storage + ?Sized,
    {
        loop {
            // ensure we have enough capacity in the destination buf
            ensure!(dest.has_remaining_capacity(), Ok(()));

            let transform = |buffer: &mut BytesMut, _is_final_offset| {
                let mut dest = dest.track_write();
                buffer.infallible_copy_into(&mut dest);
                ((), dest.written_len())
            };

            if self.pop_transform(transform).is_none() {
                return Ok(());
            }
        }
    }
}

impl Reader for Reassembler {
    #[inline]
    fn current_offset(&self) -> VarInt {
        unsafe {
            // SAFETY: offset will always fit into a VarInt
            VarInt::new_unchecked(self.cursors.start_offset)
        }
    }

    #[inline]
    fn final_offset(&self) -> Option<VarInt> {
        self.final_size().map(|v| unsafe {
            // SAFETY: offset will always fit into a VarInt
            VarInt::new_unchecked(v)
        })
    }
}
