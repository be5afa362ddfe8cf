/// One four-line FASTQ record, kept as raw bytes.
///
/// `id` and `plus` carry their `@` / `+` sentinels verbatim; no line
/// terminators are stored. Entries produced by [`FastqSource`] always have
/// `seq.len() == qual.len()`.
///
/// [`FastqSource`]: crate::FastqSource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FastqEntry {
    pub id: Vec<u8>,
    pub seq: Vec<u8>,
    pub plus: Vec<u8>,
    pub qual: Vec<u8>,
}

impl FastqEntry {
    pub fn new(
        id: impl Into<Vec<u8>>,
        seq: impl Into<Vec<u8>>,
        plus: impl Into<Vec<u8>>,
        qual: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            id: id.into(),
            seq: seq.into(),
            plus: plus.into(),
            qual: qual.into(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Read name: header without `@`, up to the first whitespace.
    pub fn name(&self) -> &[u8] {
        let header = self.id.strip_prefix(b"@").unwrap_or(&self.id);
        let end = header
            .iter()
            .position(u8::is_ascii_whitespace)
            .unwrap_or(header.len());
        &header[..end]
    }

    /// Header text after the name, if any.
    pub fn description(&self) -> Option<&[u8]> {
        let header = self.id.strip_prefix(b"@").unwrap_or(&self.id);
        let start = header.iter().position(u8::is_ascii_whitespace)?;
        let desc = header[start..].trim_ascii();
        (!desc.is_empty()).then_some(desc)
    }

    /// Truncate sequence and quality to at most `len` characters.
    ///
    /// Shorter records are left as they are. Returns whether anything was cut.
    pub fn trim_to(&mut self, len: usize) -> bool {
        if self.seq.len() <= len && self.qual.len() <= len {
            return false;
        }
        self.seq.truncate(len);
        self.qual.truncate(len);
        true
    }
}
