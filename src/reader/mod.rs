#![doc = r#"
Contains the [`Reader`] struct and its associated errors

The reader is a sequential, bounds-checked, big-endian cursor over an
immutable byte slice. One reader is created for the whole file (to split it
into [`Chunk`]s) and one more per track chunk (to decode its events).

# Example
```rust
# use midi2wav::reader::Reader;
let bytes = [0x81, 0x00, 0xFF];
let mut reader = Reader::from_byte_slice(&bytes);

assert_eq!(reader.read_var_u32().unwrap(), 128);
assert_eq!(reader.read_u8().unwrap(), 0xFF);
assert!(reader.read_u8().unwrap_err().is_out_of_bounds());
```
"#]

mod error;
pub use error::*;

mod chunk;
pub use chunk::*;

mod event;

/// A cursor over a MIDI byte buffer.
///
/// Carries the running status byte for the events it decodes, so a reader
/// must never be shared between two tracks.
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
    last_status: u8,
}

impl<'slc> Reader<'slc> {
    /// Create a reader positioned at the start of `data`
    pub const fn from_byte_slice(data: &'slc [u8]) -> Self {
        Self {
            data,
            position: 0,
            last_status: 0x00,
        }
    }

    /// The current byte offset into the buffer
    #[inline]
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// True once every byte has been consumed
    #[inline]
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&'slc [u8]> {
        let start = self.position;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(ReaderError::oob(start))?;
        self.position = end;
        Ok(&self.data[start..end])
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let start = self.position;
        let slice = self.read_slice(N)?;
        slice.try_into().map_err(|_| ReaderError::oob(start))
    }

    /// Read `len` bytes as a string, one character per byte.
    ///
    /// Bytes are not interpreted as UTF-8: `0xE9` becomes `'é'` (U+00E9).
    pub fn read_string(&mut self, len: usize) -> ReadResult<String> {
        Ok(latin1(self.read_slice(len)?))
    }

    /// Read an unsigned byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_exact_size()?;
        Ok(byte)
    }

    /// Read a sign-extended byte
    pub fn read_i8(&mut self) -> ReadResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a big-endian u16
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        Ok(u16::from_be_bytes(self.read_exact_size()?))
    }

    /// Read a big-endian 24-bit unsigned integer
    pub fn read_u24(&mut self) -> ReadResult<u32> {
        let [a, b, c] = self.read_exact_size()?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    /// Read a big-endian u32
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        Ok(u32::from_be_bytes(self.read_exact_size()?))
    }

    /// Read a MIDI variable-length quantity.
    ///
    /// Each byte contributes its low 7 bits; a set high bit means another
    /// byte follows. Bits shifted past the top of a u32 are discarded.
    pub fn read_var_u32(&mut self) -> ReadResult<u32> {
        let mut value: u32 = 0;
        loop {
            let byte = self.read_u8()?;
            value = (value << 7) | (byte & 0x7F) as u32;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
    }

    /// Advance the cursor by `len` bytes without interpreting them.
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        self.read_slice(len).map(|_| ())
    }

    /// Read a 4 byte tag, a big-endian length, then exactly that many bytes.
    ///
    /// The cursor always ends up past the body, whether or not the caller
    /// looks at it.
    pub fn read_chunk(&mut self) -> ReadResult<Chunk<'slc>> {
        let id = self.read_exact_size::<4>()?;
        let length = self.read_u32()?;
        let data = self.read_slice(length as usize)?;
        Ok(Chunk::new(id, length, data))
    }
}

pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
