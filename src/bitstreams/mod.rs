use crate::codebook::Code;

/// Packed output of a [`BinaryWriterBuilder`].
///
/// Bits are stored MSB-first. The last `padding_bits` low bits of the final
/// byte are zero filler.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct BinaryWriter {
    pub os: Box<[u8]>,
    pub padding_bits: u8,
}

impl BinaryWriter {
    /// Number of meaningful bits, padding excluded.
    #[inline(always)]
    pub fn written_bits(&self) -> usize {
        (self.os.len() * 8).saturating_sub(self.padding_bits as usize)
    }
}

/// Accumulates bits MSB-first into a byte buffer.
pub struct BinaryWriterBuilder {
    os: Vec<u8>,
    pub written_bits: usize,
    pub current: u64,
    pub free: usize,
}

impl Default for BinaryWriterBuilder {
    fn default() -> Self {
        BinaryWriterBuilder {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BinaryWriterBuilder {
    /// Flushes the partial byte, if any, and reports how many of its bits are padding.
    pub fn build(mut self) -> BinaryWriter {
        let padding_bits = if self.free == 8 { 0 } else { self.free as u8 };

        if padding_bits != 0 {
            self.write(self.current);
        }

        BinaryWriter {
            os: self.os.into_boxed_slice(),
            padding_bits,
        }
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self { os: Vec::with_capacity((bits + 7) >> 3), ..Default::default() }
    }

    #[inline(always)]
    pub fn write(&mut self, b: u64) {
        self.os.push(b as u8);
    }

    /// Appends the low `len` bits of `b` to the current byte; `len` must fit in it.
    #[inline(always)]
    pub fn write_in_current(&mut self, b: u64, len: u64) -> u64 {
        debug_assert!(len as usize <= self.free);

        self.free -= len as usize;
        self.current |= (b & ((1 << len) - 1)) << self.free;

        if self.free == 0 {
            self.write(self.current);
            self.free = 8;
            self.current = 0;
        }

        self.written_bits += len as usize;
        len
    }

    /// Appends the low `len` bits of `x`, most significant first.
    #[inline(always)]
    pub fn push_bits(&mut self, x: u64, len: u64) -> u64 {
        assert!(len <= 64, "Cannot write {} bits from an integer", len);

        let mut left = len;
        while left != 0 {
            let take = left.min(self.free as u64);
            self.write_in_current(x >> (left - take), take);
            left -= take;
        }

        len
    }

    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) -> u64 {
        self.write_in_current(bit as u64, 1)
    }

    /// Appends a whole code, one byte of it at a time.
    #[inline(always)]
    pub fn push_code(&mut self, code: &Code) -> u64 {
        let len = code.len();

        for (i, &byte) in code.as_bytes().iter().enumerate() {
            let chunk = (len - (i << 3)).min(8) as u64;
            self.push_bits(byte as u64 >> (8 - chunk), chunk);
        }

        len as u64
    }
}

/// Packs a sequence of bits into bytes, MSB-first.
pub fn pack<I: IntoIterator<Item = bool>>(bits: I) -> BinaryWriter {
    let mut writer = BinaryWriterBuilder::new();

    for bit in bits {
        writer.push_bit(bit);
    }

    writer.build()
}

/// Reads back what a [`BinaryWriterBuilder`] produced, never past the padding.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BinaryReader {
    is: Box<[u8]>,
    pub position: usize,
    pub read_bits: usize,
    pub current: u64,
    pub fill: usize,
    available_bits: usize,
}

impl BinaryReader {
    /// `padding_bits` trailing bits of `input_stream` are treated as absent.
    pub fn new(input_stream: Box<[u8]>, padding_bits: u8) -> Self {
        let available_bits = (input_stream.len() * 8).saturating_sub(padding_bits as usize);

        BinaryReader {
            is: input_stream,
            position: 0,
            read_bits: 0,
            current: 0,
            fill: 0,
            available_bits,
        }
    }

    /// Bits left before the padding.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.available_bits - self.read_bits
    }

    #[inline(always)]
    fn read(&mut self) -> Option<u64> {
        let b = *self.is.get(self.position)?;
        self.position += 1;
        Some(b as u64)
    }

    /// Feeds whole bytes into `current` while they fit.
    #[inline(always)]
    pub fn refill(&mut self) -> usize {
        while self.fill <= 48 {
            match self.read() {
                Some(b) => {
                    self.current = (self.current << 8) | b;
                    self.fill += 8;
                }
                None => break,
            }
        }

        self.fill
    }

    /// Reads `len` bits as an integer, MSB-first, or `None` if fewer remain.
    #[inline(always)]
    pub fn read_int(&mut self, len: u64) -> Option<u64> {
        assert!(len <= 32, "Cannot read {} bits at once", len);

        if len as usize > self.remaining() {
            return None;
        }

        if self.fill < len as usize {
            self.refill();
        }

        self.fill -= len as usize;
        self.read_bits += len as usize;

        Some((self.current >> self.fill) & ((1 << len) - 1))
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        self.read_int(1).map(|b| b == 1)
    }
}
