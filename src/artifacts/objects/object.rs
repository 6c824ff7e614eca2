//! Content addressing
//!
//! Every object is identified by the SHA-1 of `<kind> <length>\0<content>`, and the
//! same byte sequence, zlib-compressed, is what lands on disk.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(bytes: &[u8]) -> Result<Self>
    where
        Self: Sized;
}

/// A typed payload exactly as the object store sees it
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RawObject {
    kind: ObjectType,
    content: Bytes,
}

impl RawObject {
    pub fn kind(&self) -> ObjectType {
        self.kind
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }

    fn header(&self) -> String {
        format!("{} {}\0", self.kind.as_str(), self.content.len())
    }

    /// Hash of the header-prefixed content; identical input always yields the same ID.
    pub fn object_id(&self) -> ObjectId {
        let mut hasher = Sha1::new();
        hasher.update(self.header().as_bytes());
        hasher.update(&self.content);

        ObjectId::from_hasher(hasher)
    }

    /// Compressed on-disk representation
    pub fn encode(&self) -> Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&self.serialize()?)?;

        Ok(encoder.finish()?.into())
    }

    /// Inverse of [`RawObject::encode`]
    pub fn decode(compressed: &[u8]) -> Result<Self> {
        let mut decoder = flate2::read::ZlibDecoder::new(compressed);
        let mut full_data = Vec::new();
        decoder
            .read_to_end(&mut full_data)
            .map_err(|e| Error::CorruptObject(format!("unable to decompress: {e}")))?;

        Self::deserialize(&full_data)
    }
}

impl Packable for RawObject {
    fn serialize(&self) -> Result<Bytes> {
        let mut bytes = Vec::with_capacity(self.content.len() + 32);
        bytes.write_all(self.header().as_bytes())?;
        bytes.write_all(&self.content)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for RawObject {
    fn deserialize(bytes: &[u8]) -> Result<Self> {
        let nul_index = bytes
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| Error::CorruptObject("missing header terminator".to_string()))?;

        let header = std::str::from_utf8(&bytes[..nul_index])
            .map_err(|_| Error::CorruptObject("header is not valid UTF-8".to_string()))?;
        let (kind, size) = header
            .split_once(' ')
            .ok_or_else(|| Error::CorruptObject(format!("malformed header '{header}'")))?;
        let kind = kind
            .parse::<ObjectType>()
            .map_err(|_| Error::CorruptObject(format!("unknown object type '{kind}'")))?;
        let size = size
            .parse::<usize>()
            .map_err(|_| Error::CorruptObject(format!("malformed size '{size}'")))?;

        let content = &bytes[nul_index + 1..];
        if size != content.len() {
            return Err(Error::CorruptObject(format!(
                "expected size {size}, got {} bytes",
                content.len()
            )));
        }

        Ok(Self::new(kind, Bytes::copy_from_slice(content)))
    }
}
