/// Number of bits still free in the current byte, minus one
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct State(u8);

impl State {
    const EMPTY: State = State(7);

    fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    fn avail(&self) -> u32 {
        u32::from(self.0) + 1
    }
}

/// A bitwise writer that packs MSB-first
#[derive(Debug)]
pub(crate) struct BitWriter {
    buffer: Vec<u8>,
    state: State,
    curr: u8,
    /// bits written so far, including padding
    count: usize,
}

impl BitWriter {
    /// Creates a new instance with the given capacity of bits
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity / 8 + (capacity % 8).min(1)),
            state: State::EMPTY,
            curr: 0,
            count: 0,
        }
    }

    /// Write a single bit
    pub fn write(&mut self, bit: bool) {
        self.curr = (self.curr << 1) | u8::from(bit);
        self.count += 1;
        if self.state.0 == 0 {
            self.buffer.push(self.curr);
            self.curr = 0;
            self.state = State::EMPTY;
        } else {
            self.state = State(self.state.0 - 1);
        }
    }

    /// Fill the current byte with zeros, returns the number of padding bits
    pub fn pad(&mut self) -> usize {
        if self.state.is_empty() {
            return 0;
        }
        let padding = self.state.avail();
        self.buffer.push(self.curr << padding);
        self.curr = 0;
        self.state = State::EMPTY;
        self.count += padding as usize;
        padding as usize
    }

    /// Number of bits written, including padding
    pub fn bit_count(&self) -> usize {
        self.count
    }

    /// The completed bytes
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Append `times` copies of the last `len` completed bytes.
    ///
    /// The copies are not counted as written bits.
    pub fn repeat_tail(&mut self, len: usize, times: usize) {
        if len == 0 || len > self.buffer.len() {
            return;
        }
        let start = self.buffer.len() - len;
        for _ in 0..times {
            self.buffer.extend_from_within(start..start + len);
        }
    }

    /// Return the completed bytes, dropping an unfinished byte
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::BitWriter;

    #[test]
    fn test_bit_writer() {
        let mut writer = BitWriter::with_capacity(24);
        for bit in [true, true, true, false, false, false, false, true, true] {
            writer.write(bit);
        }
        assert_eq!(writer.bytes(), &[0b1110_0001]);
        assert_eq!(writer.pad(), 7);
        assert_eq!(writer.pad(), 0);
        assert_eq!(writer.bit_count(), 16);
        writer.repeat_tail(1, 2);
        assert_eq!(writer.bit_count(), 16);
        assert_eq!(
            writer.into_inner(),
            vec![0b1110_0001, 0b1000_0000, 0b1000_0000, 0b1000_0000]
        );
    }
}
