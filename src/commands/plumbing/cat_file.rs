use crate::areas::repository::Repository;
use crate::artifacts::objects::display_mode::DisplayMode;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;

impl Repository {
    /// Print the object named by `prefix` the way `mode` asks for
    pub fn cat_file(&self, mode: &str, prefix: &str) -> anyhow::Result<()> {
        let mode = mode.parse::<DisplayMode>()?;

        let object = match mode {
            DisplayMode::Typed(kind) => self.database().load_as(prefix, kind)?,
            _ => self.database().load(prefix)?,
        };

        match mode {
            DisplayMode::Typed(_) => self.writer().write_all(object.content())?,
            DisplayMode::Size => writeln!(self.writer(), "{}", object.content().len())?,
            DisplayMode::Type => writeln!(self.writer(), "{}", object.kind())?,
            DisplayMode::Pretty if object.kind() == ObjectType::Tree => {
                let tree = Tree::deserialize(object.content())?;
                for entry in tree.entries() {
                    writeln!(self.writer(), "{entry}")?;
                }
            }
            DisplayMode::Pretty => self.writer().write_all(object.content())?,
        }

        Ok(())
    }
}
