use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Error;
use std::str::FromStr;

/// How `cat-file` should present an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Raw content, but only if the object has this kind
    Typed(ObjectType),
    Size,
    Type,
    Pretty,
}

impl FromStr for DisplayMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "commit" => Ok(DisplayMode::Typed(ObjectType::Commit)),
            "tree" => Ok(DisplayMode::Typed(ObjectType::Tree)),
            "blob" => Ok(DisplayMode::Typed(ObjectType::Blob)),
            "size" => Ok(DisplayMode::Size),
            "type" => Ok(DisplayMode::Type),
            "pretty" => Ok(DisplayMode::Pretty),
            _ => Err(Error::UnexpectedMode(value.to_string())),
        }
    }
}
