//! Conversion between text and the redundant, terminated bit sequence that
//! gets embedded into pixel LSBs.
//!
//! Every byte is emitted MSB first with each bit repeated `num_copies` times,
//! followed by a 24-bit all-ones end marker. Decoding majority-votes each
//! run of copies back into one bit and stops at the first reconstructed
//! `0xFF` byte.
//!
//! Decoding must survive arbitrary garbage: extracting with the wrong
//! password yields effectively random bits, and the result is only rejected
//! later by the envelope's authentication check. Nothing in here is allowed
//! to error or read out of bounds, it degrades to a partial string instead.

/// Number of logical all-ones bits terminating a message.
pub const END_MARKER_BITS: usize = 24;

/// Byte value that terminates decoding.
///
/// A genuine message byte of the same value is indistinguishable from the
/// marker and truncates the message. Kept as is for compatibility with
/// existing images; envelope strings are ASCII and never contain it.
const END_MARKER_BYTE: u8 = 0xFF;

/// Encode text into a bit sequence with `num_copies`-fold redundancy.
///
/// The text is first flattened into raw bytes: characters that percent-style
/// escaping leaves alone contribute their single byte, everything else
/// contributes the bytes its escape sequence stands for, which are exactly
/// its UTF-8 bytes.
pub fn text_to_bits(text: &str, num_copies: usize) -> Vec<u8> {
    let bytes = text_to_bytes(text);
    let mut bits = Vec::with_capacity((bytes.len() * 8 + END_MARKER_BITS) * num_copies);

    for byte in bytes {
        for shift in (0..8).rev() {
            let bit = (byte >> shift) & 1;
            for _ in 0..num_copies {
                bits.push(bit);
            }
        }
    }

    for _ in 0..END_MARKER_BITS {
        for _ in 0..num_copies {
            bits.push(1);
        }
    }

    bits
}

/// Decode a bit sequence back into text.
///
/// Never fails: garbage input yields a (possibly nonsensical) string and the
/// caller decides whether it was the right password.
pub fn bits_to_text(bits: &[u8], num_copies: usize) -> String {
    if num_copies == 0 {
        return String::new();
    }

    let byte_count = bits.len() / num_copies / 8;
    let mut bytes = Vec::with_capacity(byte_count);

    for i in 0..byte_count {
        let mut byte = 0u8;
        for j in 0..8 {
            let run = &bits[(i * 8 + j) * num_copies..(i * 8 + j + 1) * num_copies];
            byte = (byte << 1) | majority(run);
        }
        if byte == END_MARKER_BYTE {
            break;
        }
        bytes.push(byte);
    }

    bytes_to_text(&bytes)
}

/// Majority vote over one run of bit copies, ties round up.
fn majority(run: &[u8]) -> u8 {
    let ones: usize = run.iter().map(|&bit| bit as usize).sum();
    u8::from(ones * 2 >= run.len())
}

fn text_to_bytes(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut utf8 = [0u8; 4];
    for ch in text.chars() {
        bytes.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }
    bytes
}

/// Bounded byte decoder: one, two or three byte sequences, cursor based.
///
/// A multi-byte lead without enough trailing bytes left ends decoding right
/// there instead of indexing past the buffer. That case is routine, not
/// exceptional: it is what a wrong password looks like.
fn bytes_to_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut offset = 0;
    let len = bytes.len();

    while offset < len {
        let lead = bytes[offset];

        let code = if lead < 128 {
            offset += 1;
            lead as u32
        } else if lead > 191 && lead < 224 {
            if offset + 1 >= len {
                break; // truncated two byte sequence
            }
            let second = bytes[offset + 1];
            offset += 2;
            (((lead & 31) as u32) << 6) | (second & 63) as u32
        } else {
            // every remaining lead is consumed as a three byte sequence,
            // garbage bytes included
            if offset + 2 >= len {
                break;
            }
            let second = bytes[offset + 1];
            let third = bytes[offset + 2];
            offset += 3;
            (((lead & 15) as u32) << 12) | (((second & 63) as u32) << 6) | (third & 63) as u32
        };

        // garbage three byte sequences can land in the surrogate range
        text.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    text
}
