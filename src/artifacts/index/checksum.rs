use crate::artifacts::index::CHECKSUM_SIZE;
use crate::errors::{Error, Result};
use sha1::{Digest, Sha1};
use std::io::Write;

/// Writer that hashes everything passing through it and can seal the stream
/// with the trailing SHA-1.
#[derive(Debug)]
pub struct Checksum<W> {
    inner: W,
    digest: Sha1,
}

impl<W: Write> Checksum<W> {
    pub fn new(inner: W) -> Self {
        Checksum {
            inner,
            digest: Sha1::new(),
        }
    }

    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    /// Append the digest of everything written so far and hand back the writer.
    pub fn write_checksum(mut self) -> Result<W> {
        let checksum = self.digest.finalize();
        self.inner.write_all(checksum.as_slice())?;

        Ok(self.inner)
    }
}

/// Check the trailing digest of `data` and return the bytes it covers.
pub fn verify(data: &[u8]) -> Result<&[u8]> {
    if data.len() < CHECKSUM_SIZE {
        return Err(Error::TruncatedIndex(format!(
            "{} bytes is too short to hold a checksum",
            data.len()
        )));
    }

    let (body, expected) = data.split_at(data.len() - CHECKSUM_SIZE);
    let actual = Sha1::digest(body);

    if actual.as_slice() != expected {
        return Err(Error::ChecksumMismatch);
    }

    Ok(body)
}
