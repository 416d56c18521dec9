//! A [`Value`] that is either borrowed from the render context or produced
//! while resolving a tag.

use std::ops::Deref;

use crate::Value;

#[derive(Debug)]
pub enum ValueCow<'a> {
    Borrowed(&'a Value),
    Owned(Value),
}

impl Deref for ValueCow<'_> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(v) => v,
            Self::Owned(v) => v,
        }
    }
}

impl ValueCow<'_> {
    pub fn into_owned(self) -> Value {
        match self {
            Self::Borrowed(v) => v.clone(),
            Self::Owned(v) => v,
        }
    }
}

impl From<Value> for ValueCow<'_> {
    fn from(v: Value) -> Self {
        Self::Owned(v)
    }
}

impl<'a> From<&'a Value> for ValueCow<'a> {
    fn from(v: &'a Value) -> Self {
        Self::Borrowed(v)
    }
}
