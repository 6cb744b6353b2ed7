use crate::Error;

/// Number of bytes in an encoded value.
pub const VALUE_LEN: usize = 16;

/// Number of characters in an encoded suffix.  26 symbols of 5 bits hold 130 bits, the two
/// extra high bits are always zero.
pub const SUFFIX_LEN: usize = 26;

// Inverse table entry for bytes outside of the alphabet.
const INVALID: u8 = 0xFF;

// The leading symbol carries the two padding bits, so it can be at most 0b00111.
const MAX_LEADING: u8 = 7;

/// Crockford's base32 alphabet in upper case (excludes I, L, O and U).
pub static UPPER: Alphabet = Alphabet::new(b"0123456789ABCDEFGHJKMNPQRSTVWXYZ");

/// Crockford's base32 alphabet in lower case (excludes i, l, o and u).
pub static LOWER: Alphabet = Alphabet::new(b"0123456789abcdefghjkmnpqrstvwxyz");

/// A base32 symbol table together with its inverse lookup table.
///
/// The codec only handles exactly 16 bytes in and 26 symbols out, which keeps encoding and
/// decoding free of any variable length logic.  Decoding is strict: a table only accepts its
/// own case, and none of Crockford's lenient substitutions (`O` for `0`, `I`/`L` for `1`)
/// are applied.
///
/// # Examples
///
/// ```
/// use typeid_rs::codec::{LOWER, UPPER};
///
/// let value = [0xffu8; 16];
/// assert_eq!(LOWER.encode(&value), "7zzzzzzzzzzzzzzzzzzzzzzzzz");
/// assert_eq!(UPPER.decode("7ZZZZZZZZZZZZZZZZZZZZZZZZZ").unwrap(), value);
/// ```
#[derive(Debug)]
pub struct Alphabet {
    encode: [u8; 32],
    decode: [u8; 256],
}

impl Alphabet {
    /// Builds the inverse table for `symbols`.  Evaluated at compile time for the `UPPER`
    /// and `LOWER` statics, so a broken alphabet fails the build.
    const fn new(symbols: &[u8; 32]) -> Alphabet {
        let mut decode = [INVALID; 256];
        let mut i = 0;
        while i < symbols.len() {
            let symbol = symbols[i];
            assert!(symbol.is_ascii(), "alphabet symbols must be ASCII");
            assert!(symbol != b'_', "alphabet cannot contain the separator");
            assert!(
                decode[symbol as usize] == INVALID,
                "duplicate symbol in alphabet"
            );
            decode[symbol as usize] = i as u8;
            i += 1;
        }

        let mut i = 0;
        while i < symbols.len() {
            assert!(
                decode[symbols[i] as usize] as usize == i,
                "alphabet does not round-trip"
            );
            i += 1;
        }

        Alphabet {
            encode: *symbols,
            decode,
        }
    }

    /// Returns the 32 symbols, ordered by value.
    pub fn symbols(&self) -> &[u8; 32] {
        &self.encode
    }

    /// Returns the 5-bit value of `symbol`, or `None` if it is not part of the alphabet.
    pub fn index_of(&self, symbol: u8) -> Option<u8> {
        match self.decode[symbol as usize] {
            INVALID => None,
            index => Some(index),
        }
    }

    /// Encodes 16 bytes into a new 26 character string.
    pub fn encode(&self, src: &[u8; VALUE_LEN]) -> String {
        let mut buf = [0u8; SUFFIX_LEN];
        self.encode_to(&mut buf, src);
        buf.iter().copied().map(char::from).collect()
    }

    /// Encodes 16 bytes into the caller provided buffer.  Every byte written is an ASCII
    /// symbol of this alphabet.
    pub fn encode_to(&self, dst: &mut [u8; SUFFIX_LEN], src: &[u8; VALUE_LEN]) {
        let value = u128::from_be_bytes(*src);
        for (i, slot) in dst.iter_mut().enumerate() {
            let shift = 5 * (SUFFIX_LEN - 1 - i);
            *slot = self.encode[((value >> shift) & 0x1f) as usize];
        }
    }

    /// Decodes a 26 character string back into 16 bytes.
    ///
    /// Fails with `InvalidLength` when `src` is not 26 bytes long, `InvalidCharacter` at the
    /// first byte outside of the alphabet, and `Overflow` when the leading symbol is
    /// above 7.
    pub fn decode(&self, src: &str) -> Result<[u8; VALUE_LEN], Error> {
        let bytes = src.as_bytes();
        if bytes.len() != SUFFIX_LEN {
            return Err(Error::InvalidLength {
                length: bytes.len(),
            });
        }

        let mut value: u128 = 0;
        for (index, &byte) in bytes.iter().enumerate() {
            let digit = self.decode[byte as usize];
            if digit == INVALID {
                // Everything before `index` was ASCII, so it is a char boundary.
                let character = src
                    .get(index..)
                    .and_then(|rest| rest.chars().next())
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(Error::InvalidCharacter { index, character });
            }
            if index == 0 && digit > MAX_LEADING {
                return Err(Error::Overflow);
            }
            value = (value << 5) | u128::from(digit);
        }

        Ok(value.to_be_bytes())
    }
}
