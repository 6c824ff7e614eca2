use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::path::Path;

impl Repository {
    pub fn hash_object(&self, object_path: &Path, kind: ObjectType, write: bool) -> anyhow::Result<()> {
        let data = std::fs::read(object_path)
            .with_context(|| format!("unable to read {}", object_path.display()))?;

        let object_id = self.database().hash_object(Bytes::from(data), kind, write)?;

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
