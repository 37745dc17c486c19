//! LSB embedding and extraction over a [`PixelBuffer`].
//!
//! A bit position maps to `(pixel = pos / 3, channel = pos % 3)`, so each
//! pixel carries up to 3 bits in the low bits of R, G and B. Alpha never
//! carries payload and is normalized to fully opaque on every write.

use std::collections::HashMap;

use rand::Rng;

use super::PixelBuffer;
use crate::error::StegError;
use crate::permute::scramble_order;
use crate::result::Result;

/// A sparse write plan: which physical bit positions receive which message
/// bit, plus the fill policy for all remaining positions.
///
/// Built once per embed, consumed once. Construction fails before any pixel
/// is mutated when the message does not fit.
#[derive(Debug)]
pub struct WritePlan {
    sparse: HashMap<usize, u8>,
    obfuscate: bool,
    capacity: usize,
}

impl WritePlan {
    pub fn prepare(
        bits: &[u8],
        scramble_key: &str,
        capacity: usize,
        obfuscate: bool,
    ) -> Result<Self> {
        if bits.len() > capacity {
            return Err(StegError::CapacityExceeded {
                required: bits.len(),
                available: capacity,
            });
        }

        let order = scramble_order(scramble_key, capacity);
        let mut sparse = HashMap::with_capacity(bits.len());
        for (i, &bit) in bits.iter().enumerate() {
            sparse.insert(order[i], bit);
        }

        Ok(Self {
            sparse,
            obfuscate,
            capacity,
        })
    }

    pub fn len(&self) -> usize {
        self.sparse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparse.is_empty()
    }
}

/// Write a plan into the buffer's pixel LSBs.
///
/// Positions outside the plan get a freshly drawn random low bit when
/// obfuscating, camouflage only, so the thread RNG is good enough. Without
/// obfuscation those channel bytes stay byte-identical to the source.
pub fn embed(buffer: &mut PixelBuffer, plan: &WritePlan) {
    let mut rng = rand::thread_rng();
    let data = buffer.data_mut();

    for position in 0..plan.capacity {
        let index = (position / 3) * 4 + position % 3;
        match plan.sparse.get(&position) {
            Some(&bit) => hide_bit(&mut data[index], bit == 1),
            None if plan.obfuscate => hide_bit(&mut data[index], rng.gen()),
            None => {}
        }
    }

    for alpha in data.iter_mut().skip(3).step_by(4) {
        *alpha = 255;
    }
}

/// Dense read of every R, G, B low bit in pixel order.
///
/// The extractor has no idea which bits carry payload; undoing the
/// scrambling over the full capacity is the pipeline's job.
pub fn extract(buffer: &PixelBuffer) -> Vec<u8> {
    let mut bits = Vec::with_capacity(buffer.capacity_bits());

    for pixel in buffer.data().chunks_exact(4) {
        bits.push(pixel[0] & 1);
        bits.push(pixel[1] & 1);
        bits.push(pixel[2] & 1);
    }

    bits
}

fn hide_bit(channel: &mut u8, bit: bool) {
    *channel = (*channel & (u8::MAX - 1)) | if bit { 1 } else { 0 };
}
